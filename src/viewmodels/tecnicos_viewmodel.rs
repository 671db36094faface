// ============================================================================
// TECNICOS VIEWMODEL - Tabla de técnicos + interruptor de plantão
// ============================================================================

use crate::models::{Collection, EntityKind, Tecnico, TecnicoStatusUpdate};
use crate::state::app_state::AppContext;
use crate::viewmodels::entity_row_actions;
use crate::viewmodels::optimistic::apply_optimistic;
use crate::views::{CellContent, TableBody, TableRow};
use serde_json::json;

pub async fn load(ctx: &AppContext) {
    let ticket = ctx.view.begin_load();

    let tecnicos = match ctx.cache.get_typed::<Tecnico>(Collection::Tecnicos).await {
        Ok(tecnicos) => tecnicos,
        Err(e) => {
            if ctx.view.is_current(ticket) {
                ctx.report(&e);
            }
            return;
        }
    };
    if !ctx.view.is_current(ticket) {
        log::debug!("⏭️ [TECNICOS] Respuesta obsoleta descartada");
        return;
    }

    log::info!("👷 [TECNICOS] {} técnicos", tecnicos.len());
    let rows = tecnicos.iter().map(|t| row(ctx, t)).collect();
    ctx.surface.render_rows(TableBody::Entities, rows);
}

fn row(ctx: &AppContext, tecnico: &Tecnico) -> TableRow {
    let label = if tecnico.de_plantao { "ativo" } else { "inativo" };
    TableRow {
        cells: vec![
            CellContent::Text(tecnico.id.to_string()),
            CellContent::Text(tecnico.nome.clone()),
            CellContent::Text(tecnico.username.clone()),
            CellContent::StatusToggle {
                tecnico_id: tecnico.id,
                on: tecnico.de_plantao,
                label: ctx.t(label),
            },
        ],
        actions: entity_row_actions(ctx, EntityKind::Tecnico, tecnico.id),
    }
}

/// Cambia el plantão: la UI se actualiza antes de la respuesta del backend
pub async fn toggle_status(ctx: &AppContext, tecnico_id: i64, on: bool) {
    log::info!("🔁 [TECNICOS] Plantão de {} → {}", tecnico_id, on);
    let endpoint = format!("{}/status", EntityKind::Tecnico.item_endpoint(tecnico_id));
    let body = json!(TecnicoStatusUpdate { de_plantao: on });

    let result = apply_optimistic(
        || ctx.surface.set_toggle(tecnico_id, on),
        || ctx.surface.set_toggle(tecnico_id, !on),
        ctx.gateway.put(&endpoint, &body),
    )
    .await;

    match result {
        Ok(_) => {
            ctx.cache.invalidate(Collection::Tecnicos);
            super::reload_if_current(ctx, crate::router::Section::Tecnicos).await;
            ctx.toast_success("status_tecnico_atualizado");
        }
        Err(e) => ctx.report_failure("falha_status", &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Section;
    use crate::test_support::TestHarness;
    use futures::executor::block_on;

    fn on_tecnicos_view() -> TestHarness {
        let harness = TestHarness::logged_in();
        harness.transport.respond_json(
            "GET",
            "tecnicos",
            json!([{"id": 3, "nome": "Rui", "username": "rui", "de_plantao": false}]),
        );
        block_on(crate::router::navigate(&harness.ctx, "#tecnicos"));
        harness
    }

    #[test]
    fn toggle_success_flips_once_and_reloads() {
        let harness = on_tecnicos_view();
        harness.transport.respond_json("PUT", "tecnico/3/status", json!({"message": "ok"}));

        block_on(toggle_status(&harness.ctx, 3, true));

        assert_eq!(harness.surface.toggles(), vec![(3, true)]);
        assert_eq!(harness.notifier.success_toasts(), vec!["Status do técnico atualizado!".to_string()]);
        assert_eq!(harness.transport.count("GET", "tecnicos"), 2);
        let body = harness.transport.last_body("PUT", "tecnico/3/status").unwrap();
        assert_eq!(body, json!({"de_plantao": true}));
        assert_eq!(harness.ctx.view.current_section(), Some(Section::Tecnicos));
    }

    #[test]
    fn toggle_failure_reverts_and_shows_error() {
        let harness = on_tecnicos_view();
        harness.transport.respond("PUT", "tecnico/3/status", 500, r#"{"message": "boom"}"#);

        block_on(toggle_status(&harness.ctx, 3, true));

        assert_eq!(harness.surface.toggles(), vec![(3, true), (3, false)]);
        assert_eq!(harness.notifier.error_toasts(), vec!["Falha ao alterar o status: boom".to_string()]);
        assert!(harness.notifier.success_toasts().is_empty());
        assert_eq!(harness.transport.count("GET", "tecnicos"), 1);
    }

    #[test]
    fn rows_show_status_label() {
        let harness = on_tecnicos_view();

        let rows = harness.surface.rows(TableBody::Entities).unwrap();
        assert_eq!(
            rows[0].cells[3],
            CellContent::StatusToggle {
                tecnico_id: 3,
                on: false,
                label: "Inativo".to_string()
            }
        );
    }
}
