// ============================================================================
// CLIENTES VIEWMODEL - Tabla de clientes
// ============================================================================

use crate::models::{Cliente, Collection, EntityKind};
use crate::state::app_state::AppContext;
use crate::viewmodels::entity_row_actions;
use crate::views::{CellContent, TableBody, TableRow};

pub async fn load(ctx: &AppContext) {
    let ticket = ctx.view.begin_load();

    let clientes = match ctx.cache.get_typed::<Cliente>(Collection::Clientes).await {
        Ok(clientes) => clientes,
        Err(e) => {
            if ctx.view.is_current(ticket) {
                ctx.report(&e);
            }
            return;
        }
    };
    if !ctx.view.is_current(ticket) {
        log::debug!("⏭️ [CLIENTES] Respuesta obsoleta descartada");
        return;
    }

    log::info!("📋 [CLIENTES] {} clientes", clientes.len());
    let rows = clientes.iter().map(|c| row(ctx, c)).collect();
    ctx.surface.render_rows(TableBody::Entities, rows);
}

fn row(ctx: &AppContext, cliente: &Cliente) -> TableRow {
    let contrato = if cliente.possui_contrato { "sim" } else { "nao" };
    TableRow {
        cells: vec![
            CellContent::Text(cliente.id.to_string()),
            CellContent::Text(cliente.nome.clone()),
            CellContent::Text(ctx.t(contrato)),
        ],
        actions: entity_row_actions(ctx, EntityKind::Cliente, cliente.id),
    }
}
