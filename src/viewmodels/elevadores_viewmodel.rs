// ============================================================================
// ELEVADORES VIEWMODEL - Tabla de elevadores (join con clientes)
// ============================================================================

use crate::models::{Cliente, Collection, Elevador, EntityKind};
use crate::state::app_state::AppContext;
use crate::viewmodels::entity_row_actions;
use crate::views::{CellContent, TableBody, TableRow};

pub async fn load(ctx: &AppContext) {
    let ticket = ctx.view.begin_load();

    let result = futures::try_join!(
        ctx.cache.get_typed::<Elevador>(Collection::Elevadores),
        ctx.cache.get_typed::<Cliente>(Collection::Clientes),
    );
    if !ctx.view.is_current(ticket) {
        log::debug!("⏭️ [ELEVADORES] Respuesta obsoleta descartada");
        return;
    }
    let (elevadores, clientes) = match result {
        Ok(data) => data,
        Err(e) => {
            ctx.report(&e);
            return;
        }
    };

    log::info!("🛗 [ELEVADORES] {} elevadores", elevadores.len());
    let rows = elevadores
        .iter()
        .map(|e| TableRow {
            cells: vec![
                CellContent::Text(e.codigo_qr.clone()),
                CellContent::Text(e.endereco.clone()),
                CellContent::Text(e.cliente_label(&clientes).to_string()),
            ],
            actions: entity_row_actions(ctx, EntityKind::Elevador, e.id),
        })
        .collect();
    ctx.surface.render_rows(TableBody::Entities, rows);
}
