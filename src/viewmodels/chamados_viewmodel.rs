// ============================================================================
// CHAMADOS VIEWMODEL - Tabla filtrable de chamados + atribuição manual
// ============================================================================

use crate::models::chamado::{STATUS_ATRIBUIDO, STATUS_FINALIZADO};
use crate::models::{AssignmentRequest, Chamado, Cliente, Collection, Elevador, Tecnico};
use crate::router::Section;
use crate::services::error::ApiError;
use crate::state::app_state::AppContext;
use crate::viewmodels::refresh_filter_select;
use crate::views::{BadgeTone, CellContent, FilterControl, SelectOption, TableBody, TableRow};
use serde_json::json;

pub async fn load(ctx: &AppContext) {
    let ticket = ctx.view.begin_load();
    let endpoint = ctx.view.filters().endpoint("chamados");

    let result = futures::try_join!(
        fetch_chamados(ctx, &endpoint),
        ctx.cache.get_typed::<Tecnico>(Collection::Tecnicos),
        ctx.cache.get_typed::<Cliente>(Collection::Clientes),
        ctx.cache.get_typed::<Elevador>(Collection::Elevadores),
    );
    if !ctx.view.is_current(ticket) {
        log::debug!("⏭️ [CHAMADOS] Respuesta obsoleta descartada");
        return;
    }
    let (chamados, tecnicos, clientes, elevadores) = match result {
        Ok(data) => data,
        Err(e) => {
            ctx.report(&e);
            return;
        }
    };

    refresh_filter_select(
        ctx,
        FilterControl::Cliente,
        clientes.iter().map(|c| SelectOption::new(c.id, c.nome.clone())).collect(),
    );
    refresh_filter_select(
        ctx,
        FilterControl::Elevador,
        elevadores.iter().map(|e| SelectOption::new(e.id, e.endereco.clone())).collect(),
    );
    let tecnico_options: Vec<SelectOption> = tecnicos.iter().map(|t| SelectOption::new(t.id, t.nome.clone())).collect();
    refresh_filter_select(ctx, FilterControl::Tecnico, tecnico_options.clone());

    log::info!("🎫 [CHAMADOS] {} chamados", chamados.len());
    let rows = chamados.iter().map(|c| row(ctx, c, &tecnico_options)).collect();
    ctx.surface.render_rows(TableBody::Chamados, rows);
}

async fn fetch_chamados(ctx: &AppContext, endpoint: &str) -> Result<Vec<Chamado>, ApiError> {
    let value = ctx.gateway.get(endpoint).await?;
    if value.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value).map_err(|e| {
        log::error!("❌ [CHAMADOS] Respuesta inválida: {}", e);
        ApiError::failed(ctx.t("resposta_invalida"))
    })
}

fn status_tone(status: &str) -> BadgeTone {
    match status {
        STATUS_FINALIZADO => BadgeTone::Success,
        STATUS_ATRIBUIDO => BadgeTone::Warning,
        _ => BadgeTone::Danger,
    }
}

fn row(ctx: &AppContext, chamado: &Chamado, tecnicos: &[SelectOption]) -> TableRow {
    let tecnico_cell = if chamado.is_open() {
        CellContent::AssignSelect {
            chamado_id: chamado.id_chamado,
            placeholder: ctx.t("selecione"),
            options: tecnicos.to_vec(),
            button_label: ctx.t("atribuir"),
        }
    } else {
        CellContent::Text(chamado.tecnico_responsavel.clone().unwrap_or_default())
    };

    TableRow {
        cells: vec![
            CellContent::Text(chamado.id_chamado.to_string()),
            CellContent::Badge {
                text: chamado.status.clone(),
                tone: status_tone(&chamado.status),
            },
            CellContent::Text(chamado.endereco.clone()),
            tecnico_cell,
            CellContent::Text(chamado.data_abertura.clone()),
        ],
        actions: Vec::new(),
    }
}

/// Atribuição manual. Sin técnico seleccionado no hay llamada al backend.
pub async fn assign(ctx: &AppContext, chamado_id: i64, tecnico_id: &str) {
    let Ok(tecnico_id) = tecnico_id.trim().parse::<i64>() else {
        log::warn!("⚠️ [CHAMADOS] Atribuição de {} sin técnico", chamado_id);
        ctx.toast_error(&ctx.t("selecione_tecnico"));
        return;
    };

    log::info!("👷 [CHAMADOS] Atribuyendo chamado {} a técnico {}", chamado_id, tecnico_id);
    let body = json!(AssignmentRequest { tecnico_id });
    match ctx.gateway.post(&format!("chamado/{}/atribuir", chamado_id), &body).await {
        Ok(_) => {
            ctx.toast_success("tecnico_atribuido");
            super::reload_if_current(ctx, Section::Chamados).await;
        }
        Err(e) => ctx.report_failure("falha_atribuir", &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::filter_state::FilterState;
    use crate::test_support::TestHarness;
    use futures::executor::block_on;

    fn with_references(harness: &TestHarness) {
        harness.transport.respond_json("GET", "tecnicos", json!([{"id": 5, "nome": "Rui", "username": "rui"}]));
        harness.transport.respond_json("GET", "clientes", json!([{"id": 1, "nome": "Ana"}]));
        harness.transport.respond_json(
            "GET",
            "elevadores",
            json!([{"id": 8, "codigo_qr": "QR-8", "endereco": "Rua das Flores"}]),
        );
    }

    fn on_chamados_view() -> TestHarness {
        let harness = TestHarness::logged_in();
        with_references(&harness);
        harness.transport.respond_json(
            "GET",
            "chamados",
            json!([
                {"id_chamado": 10, "status": "aberto", "endereco": "Rua A", "data_abertura": "2024-05-01"},
                {"id_chamado": 11, "status": "finalizado", "endereco": "Rua B",
                 "tecnico_responsavel": "Rui", "data_abertura": "2024-04-01"}
            ]),
        );
        block_on(crate::router::navigate(&harness.ctx, "#chamados"));
        harness
    }

    #[test]
    fn open_tickets_get_assignment_controls() {
        let harness = on_chamados_view();

        let rows = harness.surface.rows(TableBody::Chamados).unwrap();
        assert!(matches!(rows[0].cells[3], CellContent::AssignSelect { chamado_id: 10, .. }));
        assert_eq!(rows[1].cells[3], CellContent::Text("Rui".to_string()));
        assert_eq!(
            rows[1].cells[1],
            CellContent::Badge {
                text: "finalizado".to_string(),
                tone: BadgeTone::Success
            }
        );
    }

    #[test]
    fn filter_selects_list_references_with_todos() {
        let harness = on_chamados_view();

        let options = harness.surface.select_options(FilterControl::Elevador);
        assert_eq!(options, vec![SelectOption::new(8, "Rua das Flores")]);
        assert_eq!(harness.surface.select_placeholder(FilterControl::Elevador).as_deref(), Some("Todos"));
    }

    #[test]
    fn previous_selection_survives_repopulation_if_still_present() {
        let harness = on_chamados_view();
        harness.surface.select(FilterControl::Tecnico, "5");
        harness.surface.select(FilterControl::Cliente, "99");

        block_on(load(&harness.ctx));

        assert_eq!(harness.surface.selected_value_of(FilterControl::Tecnico), "5");
        assert_eq!(harness.surface.selected_value_of(FilterControl::Cliente), "");
    }

    #[test]
    fn applied_filters_reach_the_query_without_empty_fields() {
        let harness = on_chamados_view();
        harness.ctx.view.set_filters(FilterState {
            tecnico_id: Some("5".to_string()),
            data_inicio: Some("2024-01-01".to_string()),
            ..FilterState::default()
        });

        block_on(load(&harness.ctx));

        let call = harness.transport.last_call_to("GET", "chamados").unwrap();
        assert_eq!(call.url, "http://test.local/admin/chamados?data_inicio=2024-01-01&tecnico_id=5");
    }

    #[test]
    fn assignment_without_tecnico_makes_no_call() {
        let harness = on_chamados_view();
        let calls_before = harness.transport.calls().len();

        block_on(assign(&harness.ctx, 10, ""));

        assert_eq!(harness.transport.calls().len(), calls_before);
        assert_eq!(harness.notifier.error_toasts(), vec!["Por favor, selecione um técnico.".to_string()]);
    }

    #[test]
    fn assignment_posts_tecnico_and_reloads() {
        let harness = on_chamados_view();
        harness.transport.respond_json("POST", "chamado/10/atribuir", json!({"message": "ok"}));

        block_on(assign(&harness.ctx, 10, "5"));

        assert_eq!(
            harness.transport.last_body("POST", "chamado/10/atribuir").unwrap(),
            json!({"tecnico_id": 5})
        );
        assert_eq!(harness.notifier.success_toasts(), vec!["Técnico atribuído com sucesso!".to_string()]);
        assert_eq!(harness.transport.count("GET", "chamados"), 2);
        // Referencias desde caché: sin nuevas peticiones
        assert_eq!(harness.transport.count("GET", "tecnicos"), 1);
    }

    #[test]
    fn assignment_failure_is_reported_without_reload() {
        let harness = on_chamados_view();
        harness.transport.respond("POST", "chamado/10/atribuir", 409, r#"{"message": "Chamado já atribuído"}"#);

        block_on(assign(&harness.ctx, 10, "5"));

        assert_eq!(
            harness.notifier.error_toasts(),
            vec!["Falha ao atribuir técnico: Chamado já atribuído".to_string()]
        );
        assert_eq!(harness.transport.count("GET", "chamados"), 1);
    }

    #[test]
    fn late_response_after_leaving_the_view_is_not_rendered() {
        let harness = TestHarness::logged_in();
        with_references(&harness);
        harness.transport.respond_json(
            "GET",
            "chamados",
            json!([{"id_chamado": 10, "status": "aberto", "endereco": "Rua A", "data_abertura": "2024-05-01"}]),
        );
        let view = harness.ctx.view.clone();
        harness
            .transport
            .on_send("GET", "chamados", move || view.enter_section(Some(Section::Clientes)));

        block_on(load(&harness.ctx));

        assert_eq!(harness.transport.count("GET", "chamados"), 1);
        assert!(harness.surface.rows(TableBody::Chamados).is_none());
        assert!(harness.surface.select_options(FilterControl::Cliente).is_empty());
        assert!(harness.notifier.toasts().is_empty());
    }

    #[test]
    fn late_failure_after_leaving_the_view_is_not_toasted() {
        let harness = TestHarness::logged_in();
        with_references(&harness);
        harness.transport.respond("GET", "chamados", 500, r#"{"message": "DB offline"}"#);
        let view = harness.ctx.view.clone();
        harness.transport.on_send("GET", "chamados", move || view.enter_section(None));

        block_on(load(&harness.ctx));

        assert!(harness.notifier.toasts().is_empty());
    }
}
