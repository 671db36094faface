// ============================================================================
// VIEWMODELS - Loaders por sección + flujos de escritura
// ============================================================================

pub mod optimistic;
pub mod dashboard_viewmodel;
pub mod chamados_viewmodel;
pub mod clientes_viewmodel;
pub mod elevadores_viewmodel;
pub mod tecnicos_viewmodel;
pub mod form_viewmodel;

use crate::models::EntityKind;
use crate::router::Section;
use crate::state::app_state::AppContext;
use crate::views::{FilterControl, RowAction, SelectOption, UiAction};

/// Ejecuta el loader de la sección
pub async fn load_section(ctx: &AppContext, section: Section) {
    match section {
        Section::Dashboard => dashboard_viewmodel::load(ctx).await,
        Section::Chamados => chamados_viewmodel::load(ctx).await,
        Section::Clientes => clientes_viewmodel::load(ctx).await,
        Section::Elevadores => elevadores_viewmodel::load(ctx).await,
        Section::Tecnicos => tecnicos_viewmodel::load(ctx).await,
    }
}

/// Recarga la sección actual si sigue siendo la de la entidad
pub async fn reload_if_current(ctx: &AppContext, section: Section) {
    if ctx.view.current_section() == Some(section) {
        load_section(ctx, section).await;
    } else {
        log::debug!("⏭️ [VIEW] {:?} ya no está activa, sin recarga", section);
    }
}

/// Repuebla un select de filtro manteniendo la selección si sigue existiendo
pub(crate) fn refresh_filter_select(ctx: &AppContext, control: FilterControl, options: Vec<SelectOption>) {
    let previous = ctx.surface.selected_value(control);
    let selected = if options.iter().any(|o| o.value == previous) {
        previous
    } else {
        String::new()
    };
    ctx.surface.populate_select(control, &ctx.t("todos"), &options, &selected);
}

/// Acciones "Editar" / "Apagar" de una fila
pub(crate) fn entity_row_actions(ctx: &AppContext, kind: EntityKind, id: i64) -> Vec<RowAction> {
    vec![
        RowAction {
            label: ctx.t("editar"),
            action: UiAction::OpenEdit(kind, id),
            danger: false,
        },
        RowAction {
            label: ctx.t("apagar"),
            action: UiAction::Delete(kind, id),
            danger: true,
        },
    ]
}
