// ============================================================================
// UPLINE ADMIN - CONSOLA DE ADMINISTRACIÓN (RUST + WASM)
// ============================================================================
// Arquitectura:
// - Views: contrato de superficie + implementación DOM (sin lógica)
// - ViewModels: loaders por sección, formularios, flujos de escritura
// - Services: gateway HTTP, caché de colecciones, gráficos
// - State: sesión, sección activa, filtros (Rc<RefCell> / Cell)
// - Models: estructuras compartidas con el backend
// ============================================================================

pub mod app;
pub mod config;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;
pub mod views;

#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(test)]
mod test_support;

pub use app::AdminConsole;
pub use config::{AppConfig, CONFIG};
pub use views::UiAction;

#[cfg(target_arch = "wasm32")]
mod web {
    use crate::app::AdminConsole;
    use crate::config::CONFIG;
    use crate::services::charts::chartjs::ChartJsRenderer;
    use crate::services::token_store::LocalStorageTokenStore;
    use crate::services::transport::GlooTransport;
    use crate::views::dom_surface::{install_global_listeners, DomSurface};
    use crate::views::UiAction;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;

    // Instancia global de la consola (solo el punto de entrada la toca)
    thread_local! {
        static CONSOLE: RefCell<Option<AdminConsole>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        // Inicializar panic hook para mejor debugging
        console_error_panic_hook::set_once();

        let config = (*CONFIG).clone();
        if config.is_logging_enabled() {
            wasm_logger::init(wasm_logger::Config::default());
        }
        log::info!("🚀 UpLine Admin - Rust + WASM ({})", config.api_url);

        let surface = Rc::new(DomSurface::new(&config, dispatch));
        let token_store = Rc::new(LocalStorageTokenStore::new(&config.token_storage_key));
        let console = AdminConsole::new(
            config,
            Rc::new(GlooTransport),
            token_store,
            surface.clone(),
            surface,
            Rc::new(ChartJsRenderer),
        );

        CONSOLE.with(|cell| *cell.borrow_mut() = Some(console.clone()));
        install_global_listeners(dispatch)?;

        spawn_local(async move { console.start().await });
        Ok(())
    }

    /// Entrega una acción de la superficie a la consola
    pub fn dispatch(action: UiAction) {
        let console = CONSOLE.with(|cell| cell.borrow().clone());
        match console {
            Some(console) => spawn_local(async move { console.handle(action).await }),
            None => log::warn!("⚠️ [MAIN] Consola no inicializada, acción descartada: {:?}", action),
        }
    }

    /// Navegación desde JavaScript (p.ej. enlaces fuera del menú)
    #[wasm_bindgen]
    pub fn navigate_to(fragment: String) {
        dispatch(UiAction::Navigate(fragment));
    }
}
