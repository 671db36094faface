// ============================================================================
// APP - Consola de administración (arranque, login/logout, despacho)
// ============================================================================

use crate::config::AppConfig;
use crate::router;
use crate::services::charts::ChartRenderer;
use crate::services::notifier::Notifier;
use crate::services::token_store::TokenStore;
use crate::services::transport::HttpTransport;
use crate::state::app_state::AppContext;
use crate::state::session_state::SessionEnd;
use crate::viewmodels::{chamados_viewmodel, form_viewmodel, load_section, tecnicos_viewmodel};
use crate::views::{UiAction, ViewSurface};
use std::rc::Rc;

/// Aplicación principal
#[derive(Clone)]
pub struct AdminConsole {
    ctx: AppContext,
}

impl AdminConsole {
    pub fn new(
        config: AppConfig,
        transport: Rc<dyn HttpTransport>,
        token_store: Rc<dyn TokenStore>,
        surface: Rc<dyn ViewSurface>,
        notifier: Rc<dyn Notifier>,
        chart_renderer: Rc<dyn ChartRenderer>,
    ) -> Self {
        let ctx = AppContext::new(config, transport, token_store, surface, notifier, chart_renderer);

        // Fin de sesión: la sesión ya está limpia cuando se llega aquí
        let listener_ctx = ctx.clone();
        ctx.session.on_cleared(move |reason| {
            listener_ctx.charts.destroy_all();
            listener_ctx.view.reset();
            listener_ctx.surface.close_modal();
            let message = match reason {
                SessionEnd::Expired => Some(listener_ctx.t("sessao_expirada")),
                SessionEnd::LoggedOut => None,
            };
            listener_ctx.surface.show_login(message.as_deref());
        });

        Self { ctx }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Con token guardado se entra directo al panel
    pub async fn start(&self) {
        if self.ctx.session.is_logged_in() {
            log::info!("🔐 [APP] Token encontrado, abriendo panel");
            self.enter_panel().await;
        } else {
            log::info!("🔐 [APP] Sin token, mostrando login");
            self.ctx.surface.show_login(None);
        }
    }

    async fn enter_panel(&self) {
        self.ctx.surface.show_main_panel();
        let fragment = self.ctx.surface.current_fragment();
        let fragment = if fragment.trim_start_matches('#').is_empty() {
            "#dashboard".to_string()
        } else {
            fragment
        };
        router::navigate(&self.ctx, &fragment).await;
    }

    pub async fn login(&self, username: &str, password: &str) {
        let label = self.ctx.t("entrar");
        self.ctx.surface.set_login_busy(true, &label);
        let result = self.ctx.gateway.login(username, password).await;
        self.ctx.surface.set_login_busy(false, &label);

        match result {
            Ok(token) => {
                self.ctx.session.set_token(&token);
                self.enter_panel().await;
            }
            Err(e) => {
                log::warn!("⚠️ [AUTH] Login fallido: {}", e);
                self.ctx.surface.show_login(Some(&e.to_string()));
            }
        }
    }

    pub fn logout(&self) {
        log::info!("🚪 [APP] Logout solicitado");
        self.ctx.session.clear();
    }

    /// Punto de entrada de todas las acciones de la superficie
    pub async fn handle(&self, action: UiAction) {
        let ctx = &self.ctx;
        match action {
            UiAction::Navigate(fragment) => router::navigate(ctx, &fragment).await,
            UiAction::Login { username, password } => self.login(&username, &password).await,
            UiAction::Logout => self.logout(),
            UiAction::ApplyFilters(filters) => {
                ctx.view.set_filters(filters);
                self.reload_current().await;
            }
            UiAction::ClearFilters => {
                ctx.surface.clear_filters();
                ctx.view.set_filters(Default::default());
                self.reload_current().await;
            }
            UiAction::OpenCreate(kind) => form_viewmodel::open_create(ctx, kind).await,
            UiAction::OpenEdit(kind, id) => form_viewmodel::open_edit(ctx, kind, id).await,
            UiAction::Delete(kind, id) => form_viewmodel::delete(ctx, kind, id).await,
            UiAction::SubmitForm(values) => form_viewmodel::submit(ctx, values).await,
            UiAction::CloseForm => form_viewmodel::close(ctx),
            UiAction::ToggleTecnico { tecnico_id, on } => tecnicos_viewmodel::toggle_status(ctx, tecnico_id, on).await,
            UiAction::AssignTecnico { chamado_id, tecnico_id } => {
                chamados_viewmodel::assign(ctx, chamado_id, &tecnico_id).await
            }
        }
    }

    async fn reload_current(&self) {
        match self.ctx.view.current_section() {
            Some(section) => load_section(&self.ctx, section).await,
            None => log::debug!("⏭️ [APP] Sin sección activa que recargar"),
        }
    }
}
