// ============================================================================
// FORM VIEWMODEL - Modal genérico de alta/edición + borrado
// ============================================================================
// Un único controlador para las tres entidades: el builder de cada una
// decide los campos y `submit` elige POST (plural) o PUT (singular/id)
// según haya o no objetivo de edición.
// ============================================================================

use crate::models::{Cliente, Collection, Elevador, EntityKind, Tecnico};
use crate::router::Section;
use crate::services::error::ApiError;
use crate::state::app_state::AppContext;
use crate::viewmodels::reload_if_current;
use crate::views::{FieldInput, FormField, FormSpec, FormValues, SelectOption};
use serde_json::{Map, Value};

// ============================================================================
// APERTURA / CIERRE
// ============================================================================

pub async fn open_create(ctx: &AppContext, kind: EntityKind) {
    match build_form(ctx, kind, None).await {
        Ok(form) => {
            ctx.view.open_form(kind, None);
            ctx.surface.open_modal(&form);
        }
        Err(e) => ctx.report(&e),
    }
}

/// Abre el formulario con los datos del registro en caché
pub async fn open_edit(ctx: &AppContext, kind: EntityKind, id: i64) {
    let records = match ctx.cache.get_or_fetch(kind.collection()).await {
        Ok(records) => records,
        Err(e) => {
            ctx.report(&e);
            return;
        }
    };
    let Some(record) = records.iter().find(|r| r.get("id").and_then(Value::as_i64) == Some(id)).cloned() else {
        log::warn!("⚠️ [FORM] {:?} #{} no está en la colección", kind, id);
        return;
    };

    match build_form(ctx, kind, Some((id, record))).await {
        Ok(form) => {
            ctx.view.open_form(kind, Some(id));
            ctx.surface.open_modal(&form);
        }
        Err(e) => ctx.report(&e),
    }
}

/// Cierra el modal; el objetivo de edición se limpia siempre
pub fn close(ctx: &AppContext) {
    ctx.view.close_form();
    ctx.surface.close_modal();
}

// ============================================================================
// BUILDERS POR ENTIDAD
// ============================================================================

async fn build_form(ctx: &AppContext, kind: EntityKind, editing: Option<(i64, Value)>) -> Result<FormSpec, ApiError> {
    let (title, record) = match &editing {
        Some((id, record)) => (ctx.t_id(edit_title_key(kind), *id), Some(record)),
        None => (ctx.t(create_title_key(kind)), None),
    };

    let fields = match kind {
        EntityKind::Cliente => cliente_fields(ctx, record.and_then(|r| serde_json::from_value(r.clone()).ok())),
        EntityKind::Elevador => {
            let clientes = ctx.cache.get_typed::<Cliente>(Collection::Clientes).await?;
            elevador_fields(ctx, record.and_then(|r| serde_json::from_value(r.clone()).ok()), &clientes)
        }
        EntityKind::Tecnico => tecnico_fields(ctx, record.and_then(|r| serde_json::from_value(r.clone()).ok())),
    };

    Ok(FormSpec {
        kind,
        title,
        submit_label: submit_label(ctx, editing.is_some()),
        cancel_label: ctx.t("cancelar"),
        fields,
    })
}

fn create_title_key(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Cliente => "novo_cliente",
        EntityKind::Elevador => "novo_elevador",
        EntityKind::Tecnico => "novo_tecnico",
    }
}

fn edit_title_key(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Cliente => "editar_cliente",
        EntityKind::Elevador => "editar_elevador",
        EntityKind::Tecnico => "editar_tecnico",
    }
}

fn submit_label(ctx: &AppContext, editing: bool) -> String {
    ctx.t(if editing { "guardar_alteracoes" } else { "adicionar" })
}

fn text_field(name: &'static str, label: String, value: String) -> FormField {
    FormField {
        name,
        label,
        input: FieldInput::Text,
        value,
        required: true,
    }
}

fn cliente_fields(ctx: &AppContext, cliente: Option<Cliente>) -> Vec<FormField> {
    vec![
        text_field("nome", ctx.t("nome_cliente"), cliente.as_ref().map(|c| c.nome.clone()).unwrap_or_default()),
        FormField {
            name: "possui_contrato",
            label: ctx.t("possui_contrato"),
            input: FieldInput::Checkbox {
                checked: cliente.as_ref().map(|c| c.possui_contrato).unwrap_or(false),
            },
            value: String::new(),
            required: false,
        },
    ]
}

fn elevador_fields(ctx: &AppContext, elevador: Option<Elevador>, clientes: &[Cliente]) -> Vec<FormField> {
    let coord = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    let number = |name, label: String, value| FormField {
        name,
        label,
        input: FieldInput::Number,
        value,
        required: true,
    };
    let e = elevador.as_ref();

    vec![
        text_field("codigo_qr", ctx.t("codigo_qr"), e.map(|e| e.codigo_qr.clone()).unwrap_or_default()),
        text_field("endereco", ctx.t("endereco"), e.map(|e| e.endereco.clone()).unwrap_or_default()),
        number("latitude", ctx.t("latitude"), coord(e.and_then(|e| e.latitude))),
        number("longitude", ctx.t("longitude"), coord(e.and_then(|e| e.longitude))),
        FormField {
            name: "cliente_id",
            label: ctx.t("cliente"),
            input: FieldInput::Select {
                options: clientes.iter().map(|c| SelectOption::new(c.id, c.nome.clone())).collect(),
            },
            value: e.and_then(|e| e.cliente_id).map(|id| id.to_string()).unwrap_or_default(),
            required: true,
        },
    ]
}

fn tecnico_fields(ctx: &AppContext, tecnico: Option<Tecnico>) -> Vec<FormField> {
    let editing = tecnico.is_some();
    let t = tecnico.as_ref();
    vec![
        text_field("nome", ctx.t("nome_completo"), t.map(|t| t.nome.clone()).unwrap_or_default()),
        text_field("username", ctx.t("username_login"), t.map(|t| t.username.clone()).unwrap_or_default()),
        FormField {
            name: "password",
            label: ctx.t(if editing { "senha_manter" } else { "senha" }),
            input: FieldInput::Password,
            value: String::new(),
            required: !editing,
        },
    ]
}

// ============================================================================
// SUBMIT
// ============================================================================

/// Cuerpo JSON del formulario. Los checkbox viajan como booleano explícito.
pub fn form_body(kind: EntityKind, values: &FormValues, editing: bool) -> Value {
    let mut body = Map::new();
    for (name, value) in values {
        // Contraseña vacía en edición = no cambiarla
        if editing && kind == EntityKind::Tecnico && name == "password" && value.is_empty() {
            continue;
        }
        body.insert(name.clone(), Value::String(value.clone()));
    }
    for field in kind.checkbox_fields() {
        let checked = values.iter().any(|(name, _)| name == field);
        body.insert(field.to_string(), Value::Bool(checked));
    }
    Value::Object(body)
}

pub async fn submit(ctx: &AppContext, values: FormValues) {
    let Some(kind) = ctx.view.form_kind() else {
        log::warn!("⚠️ [FORM] Submit sin formulario abierto");
        return;
    };
    let edit_target = ctx.view.edit_target_id();
    let label = submit_label(ctx, edit_target.is_some());
    let body = form_body(kind, &values, edit_target.is_some());

    ctx.surface.set_submit_busy(true, &label);
    let result = match edit_target {
        Some(id) => {
            log::info!("💾 [FORM] PUT {}", kind.item_endpoint(id));
            ctx.gateway.put(&kind.item_endpoint(id), &body).await
        }
        None => {
            log::info!("💾 [FORM] POST {}", kind.collection().endpoint());
            ctx.gateway.post(kind.collection().endpoint(), &body).await
        }
    };
    ctx.surface.set_submit_busy(false, &label);

    match result {
        Ok(_) => {
            ctx.cache.invalidate(kind.collection());
            close(ctx);
            ctx.toast_success(if edit_target.is_some() {
                "registo_atualizado"
            } else {
                "registo_adicionado"
            });
            reload_if_current(ctx, Section::for_entity(kind)).await;
        }
        // El modal sigue abierto con lo escrito y el mismo objetivo de edición
        Err(e) => ctx.report_failure("erro", &e),
    }
}

// ============================================================================
// BORRADO
// ============================================================================

pub async fn delete(ctx: &AppContext, kind: EntityKind, id: i64) {
    if !ctx.surface.confirm(&ctx.t_id("confirmar_apagar", id)).await {
        log::debug!("🚫 [FORM] Borrado de {:?} #{} cancelado", kind, id);
        return;
    }

    match ctx.gateway.delete(&kind.item_endpoint(id)).await {
        Ok(_) => {
            ctx.toast_success("item_apagado");
            ctx.cache.invalidate(kind.collection());
            reload_if_current(ctx, Section::for_entity(kind)).await;
        }
        Err(e) => ctx.report_failure("falha_apagar", &e),
    }
}
