// ============================================================================
// APP CONTEXT - Dependencias compartidas por todos los componentes
// ============================================================================
// Un único valor clonable (todo Rc) que se pasa explícitamente a router,
// loaders y formularios. Nada del núcleo vive en singletons.
// ============================================================================

use crate::config::AppConfig;
use crate::services::api_client::ApiClient;
use crate::services::cache_service::{CacheEntries, EntityCache};
use crate::services::charts::{ChartRegistry, ChartRenderer};
use crate::services::error::ApiError;
use crate::services::notifier::{BusyIndicator, Notifier, ToastKind};
use crate::services::token_store::TokenStore;
use crate::services::transport::HttpTransport;
use crate::state::session_state::SessionStore;
use crate::state::view_state::ViewState;
use crate::utils::i18n::{t, t_id};
use crate::views::ViewSurface;
use std::rc::Rc;

#[derive(Clone)]
pub struct AppContext {
    pub config: Rc<AppConfig>,
    pub session: SessionStore,
    pub gateway: ApiClient,
    pub cache: EntityCache,
    pub view: ViewState,
    pub charts: ChartRegistry,
    pub surface: Rc<dyn ViewSurface>,
    pub notifier: Rc<dyn Notifier>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        transport: Rc<dyn HttpTransport>,
        token_store: Rc<dyn TokenStore>,
        surface: Rc<dyn ViewSurface>,
        notifier: Rc<dyn Notifier>,
        chart_renderer: Rc<dyn ChartRenderer>,
    ) -> Self {
        let config = Rc::new(config);
        let entries = CacheEntries::new();
        let session = SessionStore::new(token_store, entries.clone());
        let busy = BusyIndicator::new(notifier.clone());
        let gateway = ApiClient::new(config.clone(), transport, session.clone(), busy);
        let cache = EntityCache::new(entries, gateway.clone());

        Self {
            config,
            session,
            gateway,
            cache,
            view: ViewState::new(),
            charts: ChartRegistry::new(chart_renderer),
            surface,
            notifier,
        }
    }

    pub fn t(&self, key: &str) -> String {
        t(key, &self.config.language)
    }

    pub fn t_id(&self, key: &str, id: i64) -> String {
        t_id(key, &self.config.language, id)
    }

    pub fn toast_success(&self, key: &str) {
        self.notifier.toast(&self.t(key), ToastKind::Success);
    }

    pub fn toast_error(&self, message: &str) {
        self.notifier.toast(message, ToastKind::Error);
    }

    /// Fallo de carga: el mensaje del backend tal cual
    pub fn report(&self, error: &ApiError) {
        match error {
            ApiError::Unauthorized => {
                log::debug!("🔒 [UI] Carga interrumpida por sesión expirada");
            }
            ApiError::RequestFailed { message } => self.toast_error(message),
        }
    }

    /// Muestra un fallo como "<prefijo>: <mensaje>".
    /// Un 401 no se muestra: la sesión ya terminó y el login lo explica.
    pub fn report_failure(&self, prefix_key: &str, error: &ApiError) {
        match error {
            ApiError::Unauthorized => {
                log::debug!("🔒 [UI] Fallo por sesión expirada, sin toast");
            }
            ApiError::RequestFailed { message } => {
                self.toast_error(&format!("{}: {}", self.t(prefix_key), message));
            }
        }
    }
}
