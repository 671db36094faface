// ============================================================================
// DASHBOARD VIEWMODEL - Contadores, gráficos y filtros de referencia
// ============================================================================
// Las estadísticas nunca se cachean. Si fallan solo se registra el error:
// los selects de filtro se pueblan igualmente.
// ============================================================================

use crate::models::{Cliente, Collection, DashboardStats, Distribution, Elevador, Tecnico};
use crate::services::charts::{ChartKind, ChartSpec, Dataset};
use crate::services::error::ApiError;
use crate::state::app_state::AppContext;
use crate::utils::constants::{
    MES_CHART_BORDER, MES_CHART_FILL, MES_CHART_ID, STATUS_CHART_COLORS, STATUS_CHART_ID, TECNICO_CHART_COLOR,
    TECNICO_CHART_ID,
};
use crate::viewmodels::refresh_filter_select;
use crate::views::{Counter, FilterControl, SelectOption};

pub async fn load(ctx: &AppContext) {
    let ticket = ctx.view.begin_load();
    let endpoint = ctx.view.filters().endpoint("dashboard/stats");

    let (stats, references) = futures::join!(fetch_stats(ctx, &endpoint), async {
        futures::try_join!(
            ctx.cache.get_typed::<Cliente>(Collection::Clientes),
            ctx.cache.get_typed::<Elevador>(Collection::Elevadores),
            ctx.cache.get_typed::<Tecnico>(Collection::Tecnicos),
        )
    });
    if !ctx.view.is_current(ticket) {
        log::debug!("⏭️ [DASHBOARD] Respuesta obsoleta descartada");
        return;
    }

    match references {
        Ok((clientes, elevadores, tecnicos)) => {
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
            refresh_filter_select(
                ctx,
                FilterControl::Tecnico,
                tecnicos.iter().map(|t| SelectOption::new(t.id, t.nome.clone())).collect(),
            );
        }
        Err(e) => ctx.report(&e),
    }

    match stats {
        Ok(stats) => {
            ctx.surface.set_counter(Counter::TotalChamados, stats.total_chamados);
            ctx.surface.set_counter(Counter::TotalTecnicos, stats.total_tecnicos);
            ctx.surface.set_counter(Counter::TotalElevadores, stats.total_elevadores);

            ctx.charts.render(STATUS_CHART_ID, &status_chart(ctx, &stats));
            ctx.charts.render(TECNICO_CHART_ID, &tecnico_chart(ctx, &stats));
            ctx.charts.render(MES_CHART_ID, &mes_chart(ctx, &stats));
        }
        Err(e) => log::error!("❌ [DASHBOARD] Falha ao carregar estatísticas: {}", e),
    }
}

async fn fetch_stats(ctx: &AppContext, endpoint: &str) -> Result<DashboardStats, ApiError> {
    let value = ctx.gateway.get(endpoint).await?;
    serde_json::from_value(value).map_err(|e| ApiError::failed(format!("stats: {}", e)))
}

/// Etiquetas/valores de una distribución; vacía → una categoría "Nenhum dado"
fn distribution(ctx: &AppContext, map: &Distribution) -> (Vec<String>, Vec<f64>) {
    if map.is_empty() {
        return (vec![ctx.t("nenhum_dado")], vec![1.0]);
    }
    map.iter().map(|(k, v)| (k.clone(), *v as f64)).unzip()
}

fn status_chart(ctx: &AppContext, stats: &DashboardStats) -> ChartSpec {
    let (labels, data) = distribution(ctx, &stats.chamados_por_status);
    ChartSpec {
        kind: ChartKind::Doughnut,
        labels,
        datasets: vec![Dataset {
            data,
            background: STATUS_CHART_COLORS.iter().map(|c| c.to_string()).collect(),
            ..Dataset::default()
        }],
        horizontal: false,
    }
}

fn tecnico_chart(ctx: &AppContext, stats: &DashboardStats) -> ChartSpec {
    let (labels, data) = distribution(ctx, &stats.chamados_por_tecnico);
    ChartSpec {
        kind: ChartKind::Bar,
        labels,
        datasets: vec![Dataset {
            label: Some(ctx.t("n_chamados")),
            data,
            background: vec![TECNICO_CHART_COLOR.to_string()],
            ..Dataset::default()
        }],
        horizontal: true,
    }
}

fn mes_chart(ctx: &AppContext, stats: &DashboardStats) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        labels: stats.chamados_por_mes.iter().map(|m| m.mes.clone()).collect(),
        datasets: vec![Dataset {
            label: Some(ctx.t("total_chamados")),
            data: stats.chamados_por_mes.iter().map(|m| m.total as f64).collect(),
            background: vec![MES_CHART_FILL.to_string()],
            border_color: Some(MES_CHART_BORDER.to_string()),
            fill: true,
            tension: Some(0.3),
        }],
        horizontal: false,
    }
}
