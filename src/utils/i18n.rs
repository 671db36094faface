// ============================================================================
// MÓDULO DE INTERNACIONALIZACIÓN
// ============================================================================

use std::collections::HashMap;

/// Obtener diccionario de traducciones para un idioma
fn get_translations(lang: &str) -> HashMap<&'static str, &'static str> {
    let mut translations = HashMap::new();
    let lang_upper = lang.to_uppercase();

    match lang_upper.as_str() {
        "EN" => {
            // Gateway / sesión
            translations.insert("sessao_expirada", "Session expired. Please log in again.");
            translations.insert("falha_requisicao", "API request failed");
            translations.insert("erro_desconhecido", "Unknown error");
            translations.insert("resposta_invalida", "Invalid server response");
            translations.insert("erro_login", "Login failed.");
            translations.insert("entrar", "Sign in");

            // Router
            translations.insert("seccao_nao_encontrada", "Section not found.");
            translations.insert("titulo_dashboard", "Dashboard");
            translations.insert("titulo_chamados", "Tickets");
            translations.insert("titulo_clientes", "Customers");
            translations.insert("titulo_elevadores", "Elevators");
            translations.insert("titulo_tecnicos", "Technicians");

            // Tablas y filtros
            translations.insert("todos", "All");
            translations.insert("selecione", "Select...");
            translations.insert("atribuir", "Assign");
            translations.insert("editar", "Edit");
            translations.insert("apagar", "Delete");
            translations.insert("sim", "Yes");
            translations.insert("nao", "No");
            translations.insert("ativo", "Active");
            translations.insert("inativo", "Inactive");
            translations.insert("nenhum_dado", "No data");

            // Borrado
            translations.insert("confirmar_apagar", "Are you sure you want to delete item #{id}?");
            translations.insert("item_apagado", "Item deleted successfully!");
            translations.insert("falha_apagar", "Failed to delete item");

            // Formularios
            translations.insert("registo_atualizado", "Record updated successfully!");
            translations.insert("registo_adicionado", "Record added successfully!");
            translations.insert("erro", "Error");
            translations.insert("guardar_alteracoes", "Save changes");
            translations.insert("adicionar", "Add");
            translations.insert("cancelar", "Cancel");
            translations.insert("novo_cliente", "Add New Customer");
            translations.insert("editar_cliente", "Edit Customer #{id}");
            translations.insert("nome_cliente", "Customer name");
            translations.insert("possui_contrato", "Has active contract");
            translations.insert("novo_elevador", "Add New Elevator");
            translations.insert("editar_elevador", "Edit Elevator #{id}");
            translations.insert("codigo_qr", "QR code");
            translations.insert("endereco", "Address");
            translations.insert("latitude", "Latitude");
            translations.insert("longitude", "Longitude");
            translations.insert("cliente", "Customer");
            translations.insert("novo_tecnico", "Add New Technician");
            translations.insert("editar_tecnico", "Edit Technician #{id}");
            translations.insert("nome_completo", "Full name");
            translations.insert("username_login", "Username (for login)");
            translations.insert("senha", "Password");
            translations.insert("senha_manter", "Password (leave blank to keep)");

            // Técnicos / chamados
            translations.insert("status_tecnico_atualizado", "Technician status updated!");
            translations.insert("falha_status", "Failed to change status");
            translations.insert("selecione_tecnico", "Please select a technician.");
            translations.insert("tecnico_atribuido", "Technician assigned successfully!");
            translations.insert("falha_atribuir", "Failed to assign technician");

            // Gráficos
            translations.insert("n_chamados", "No. of tickets");
            translations.insert("total_chamados", "Total tickets");
        }
        _ => {
            // PT (por defecto)
            translations.insert("sessao_expirada", "Sessão expirada. Por favor, faça login novamente.");
            translations.insert("falha_requisicao", "Falha na requisição à API");
            translations.insert("erro_desconhecido", "Erro desconhecido");
            translations.insert("resposta_invalida", "Resposta inválida do servidor");
            translations.insert("erro_login", "Erro ao fazer login.");
            translations.insert("entrar", "Entrar");

            translations.insert("seccao_nao_encontrada", "Secção não encontrada.");
            translations.insert("titulo_dashboard", "Dashboard");
            translations.insert("titulo_chamados", "Chamados");
            translations.insert("titulo_clientes", "Clientes");
            translations.insert("titulo_elevadores", "Elevadores");
            translations.insert("titulo_tecnicos", "Tecnicos");

            translations.insert("todos", "Todos");
            translations.insert("selecione", "Selecione...");
            translations.insert("atribuir", "Atribuir");
            translations.insert("editar", "Editar");
            translations.insert("apagar", "Apagar");
            translations.insert("sim", "Sim");
            translations.insert("nao", "Não");
            translations.insert("ativo", "Ativo");
            translations.insert("inativo", "Inativo");
            translations.insert("nenhum_dado", "Nenhum dado");

            translations.insert("confirmar_apagar", "Tem a certeza que deseja apagar o item #{id}?");
            translations.insert("item_apagado", "Item apagado com sucesso!");
            translations.insert("falha_apagar", "Falha ao apagar o item");

            translations.insert("registo_atualizado", "Registo atualizado com sucesso!");
            translations.insert("registo_adicionado", "Registo adicionado com sucesso!");
            translations.insert("erro", "Erro");
            translations.insert("guardar_alteracoes", "Guardar Alterações");
            translations.insert("adicionar", "Adicionar");
            translations.insert("cancelar", "Cancelar");
            translations.insert("novo_cliente", "Adicionar Novo Cliente");
            translations.insert("editar_cliente", "Editar Cliente #{id}");
            translations.insert("nome_cliente", "Nome do Cliente");
            translations.insert("possui_contrato", "Possui Contrato Ativo");
            translations.insert("novo_elevador", "Adicionar Novo Elevador");
            translations.insert("editar_elevador", "Editar Elevador #{id}");
            translations.insert("codigo_qr", "Código QR");
            translations.insert("endereco", "Endereço");
            translations.insert("latitude", "Latitude");
            translations.insert("longitude", "Longitude");
            translations.insert("cliente", "Cliente");
            translations.insert("novo_tecnico", "Adicionar Novo Técnico");
            translations.insert("editar_tecnico", "Editar Técnico #{id}");
            translations.insert("nome_completo", "Nome Completo");
            translations.insert("username_login", "Username (para login)");
            translations.insert("senha", "Senha");
            translations.insert("senha_manter", "Senha (deixar em branco para não alterar)");

            translations.insert("status_tecnico_atualizado", "Status do técnico atualizado!");
            translations.insert("falha_status", "Falha ao alterar o status");
            translations.insert("selecione_tecnico", "Por favor, selecione um técnico.");
            translations.insert("tecnico_atribuido", "Técnico atribuído com sucesso!");
            translations.insert("falha_atribuir", "Falha ao atribuir técnico");

            translations.insert("n_chamados", "Nº de Chamados");
            translations.insert("total_chamados", "Total de Chamados");
        }
    }

    translations
}

/// Función de traducción
///
/// # Arguments
/// * `key` - Clave de traducción
/// * `lang` - Idioma ("PT" o "EN")
///
/// # Returns
/// String traducida o la clave si no se encuentra traducción
pub fn t(key: &str, lang: &str) -> String {
    let translations = get_translations(lang);

    if let Some(translation) = translations.get(key) {
        return translation.to_string();
    }

    key.to_string()
}

/// Traducción con sustitución de `{id}`
pub fn t_id(key: &str, lang: &str, id: i64) -> String {
    t(key, lang).replace("{id}", &id.to_string())
}
