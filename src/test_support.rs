// ============================================================================
// TEST SUPPORT - Fakes guionizados para probar el núcleo sin navegador
// ============================================================================

use crate::app::AdminConsole;
use crate::config::AppConfig;
use crate::router::Section;
use crate::services::charts::{ChartHandle, ChartRenderer, ChartSpec};
use crate::services::notifier::{Notifier, ToastKind};
use crate::services::token_store::{MemoryTokenStore, TokenStore};
use crate::services::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::state::app_state::AppContext;
use crate::views::{Counter, FilterControl, FormSpec, SelectOption, TableBody, TableRow, ViewSurface};
use async_trait::async_trait;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

pub const TEST_API_URL: &str = "http://test.local";
pub const TEST_TOKEN: &str = "token-123";

// ============================================================================
// TRANSPORT
// ============================================================================

type RouteKey = (String, String);

/// Respuestas fijas por (método, ruta sin query). Sin guion → 404.
#[derive(Default)]
pub struct FakeTransport {
    routes: RefCell<HashMap<RouteKey, Result<HttpResponse, String>>>,
    hooks: RefCell<HashMap<RouteKey, Rc<dyn Fn()>>>,
    calls: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn respond(&self, method: &str, path: &str, status: u16, body: &str) {
        self.routes.borrow_mut().insert(
            (method.to_string(), path.to_string()),
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub fn respond_json(&self, method: &str, path: &str, body: Value) {
        self.respond(method, path, 200, &body.to_string());
    }

    pub fn fail(&self, method: &str, path: &str, message: &str) {
        self.routes
            .borrow_mut()
            .insert((method.to_string(), path.to_string()), Err(message.to_string()));
    }

    /// Se ejecuta mientras la request está "en vuelo", antes de responder
    pub fn on_send(&self, method: &str, path: &str, hook: impl Fn() + 'static) {
        self.hooks
            .borrow_mut()
            .insert((method.to_string(), path.to_string()), Rc::new(hook));
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.borrow().clone()
    }

    pub fn last_call(&self) -> Option<HttpRequest> {
        self.calls.borrow().last().cloned()
    }

    pub fn calls_to(&self, method: &str, path: &str) -> Vec<HttpRequest> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.method.as_str() == method && route_path(&c.url) == path)
            .cloned()
            .collect()
    }

    pub fn last_call_to(&self, method: &str, path: &str) -> Option<HttpRequest> {
        self.calls_to(method, path).pop()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.calls_to(method, path).len()
    }

    pub fn last_body(&self, method: &str, path: &str) -> Option<Value> {
        let call = self.last_call_to(method, path)?;
        serde_json::from_str(call.body.as_deref()?).ok()
    }
}

fn route_path(url: &str) -> String {
    let prefix = format!("{}/admin/", TEST_API_URL);
    let path = url.strip_prefix(&prefix).unwrap_or(url);
    path.split('?').next().unwrap_or(path).to_string()
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let key = (request.method.as_str().to_string(), route_path(&request.url));
        self.calls.borrow_mut().push(request);
        let hook = self.hooks.borrow().get(&key).cloned();
        if let Some(hook) = hook {
            hook();
        }
        self.routes.borrow().get(&key).cloned().unwrap_or(Ok(HttpResponse {
            status: 404,
            body: r#"{"message": "Not found"}"#.to_string(),
        }))
    }
}

// ============================================================================
// NOTIFIER
// ============================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    toasts: RefCell<Vec<(String, ToastKind)>>,
    busy: RefCell<Vec<bool>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<(String, ToastKind)> {
        self.toasts.borrow().clone()
    }

    fn toasts_of(&self, kind: ToastKind) -> Vec<String> {
        self.toasts
            .borrow()
            .iter()
            .filter(|(_, k)| *k == kind)
            .map(|(m, _)| m.clone())
            .collect()
    }

    pub fn success_toasts(&self) -> Vec<String> {
        self.toasts_of(ToastKind::Success)
    }

    pub fn error_toasts(&self) -> Vec<String> {
        self.toasts_of(ToastKind::Error)
    }

    pub fn busy_changes(&self) -> Vec<bool> {
        self.busy.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn toast(&self, message: &str, kind: ToastKind) {
        self.toasts.borrow_mut().push((message.to_string(), kind));
    }

    fn set_busy(&self, visible: bool) {
        self.busy.borrow_mut().push(visible);
    }
}

// ============================================================================
// CHARTS
// ============================================================================

#[derive(Default)]
pub struct FakeCharts {
    drawn: RefCell<Vec<(String, ChartSpec)>>,
    destroyed: Rc<RefCell<Vec<String>>>,
}

impl FakeCharts {
    pub fn drawn(&self) -> Vec<(String, ChartSpec)> {
        self.drawn.borrow().clone()
    }

    pub fn last_spec(&self, surface_id: &str) -> Option<ChartSpec> {
        self.drawn
            .borrow()
            .iter()
            .rev()
            .find(|(id, _)| id == surface_id)
            .map(|(_, spec)| spec.clone())
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.borrow().clone()
    }
}

struct FakeChartHandle {
    surface_id: String,
    destroyed: Rc<RefCell<Vec<String>>>,
}

impl ChartHandle for FakeChartHandle {
    fn destroy(&self) {
        self.destroyed.borrow_mut().push(self.surface_id.clone());
    }
}

impl ChartRenderer for FakeCharts {
    fn draw(&self, surface_id: &str, spec: &ChartSpec) -> Option<Box<dyn ChartHandle>> {
        self.drawn.borrow_mut().push((surface_id.to_string(), spec.clone()));
        Some(Box::new(FakeChartHandle {
            surface_id: surface_id.to_string(),
            destroyed: self.destroyed.clone(),
        }))
    }
}

// ============================================================================
// VIEW SURFACE
// ============================================================================

#[derive(Default)]
struct SelectState {
    placeholder: String,
    options: Vec<SelectOption>,
    selected: String,
}

/// Superficie que graba todo lo que el núcleo le pide
#[derive(Default)]
pub struct RecordingSurface {
    fragment: RefCell<String>,
    login_messages: RefCell<Vec<Option<String>>>,
    main_panel: Cell<usize>,
    login_busy: RefCell<Vec<bool>>,
    titles: RefCell<Vec<String>>,
    highlighted: Cell<Option<Section>>,
    missing_templates: RefCell<HashSet<Section>>,
    not_found: RefCell<Vec<String>>,
    rows: RefCell<HashMap<&'static str, Vec<TableRow>>>,
    selects: RefCell<HashMap<&'static str, SelectState>>,
    cleared_filters: Cell<usize>,
    counters: RefCell<HashMap<&'static str, i64>>,
    toggles: RefCell<Vec<(i64, bool)>>,
    forms: RefCell<Vec<FormSpec>>,
    modal_open: Cell<bool>,
    submit_busy: RefCell<Vec<(bool, String)>>,
    confirm_answer: Cell<bool>,
    confirm_messages: RefCell<Vec<String>>,
}

impl RecordingSurface {
    pub fn set_fragment(&self, fragment: &str) {
        *self.fragment.borrow_mut() = fragment.to_string();
    }

    pub fn remove_template(&self, section: Section) {
        self.missing_templates.borrow_mut().insert(section);
    }

    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    /// El gestor elige un valor en un select de filtro
    pub fn select(&self, control: FilterControl, value: &str) {
        self.selects
            .borrow_mut()
            .entry(control.element_id())
            .or_default()
            .selected = value.to_string();
    }

    pub fn login_messages(&self) -> Vec<Option<String>> {
        self.login_messages.borrow().clone()
    }

    pub fn main_panel_count(&self) -> usize {
        self.main_panel.get()
    }

    pub fn login_busy(&self) -> Vec<bool> {
        self.login_busy.borrow().clone()
    }

    pub fn page_titles(&self) -> Vec<String> {
        self.titles.borrow().clone()
    }

    pub fn highlighted(&self) -> Option<Section> {
        self.highlighted.get()
    }

    pub fn not_found_messages(&self) -> Vec<String> {
        self.not_found.borrow().clone()
    }

    pub fn rows(&self, body: TableBody) -> Option<Vec<TableRow>> {
        self.rows.borrow().get(body.element_id()).cloned()
    }

    pub fn select_options(&self, control: FilterControl) -> Vec<SelectOption> {
        self.selects
            .borrow()
            .get(control.element_id())
            .map(|s| s.options.clone())
            .unwrap_or_default()
    }

    pub fn select_placeholder(&self, control: FilterControl) -> Option<String> {
        self.selects.borrow().get(control.element_id()).map(|s| s.placeholder.clone())
    }

    pub fn selected_value_of(&self, control: FilterControl) -> String {
        self.selected_value(control)
    }

    pub fn clear_filters_count(&self) -> usize {
        self.cleared_filters.get()
    }

    pub fn counter(&self, counter: Counter) -> Option<i64> {
        self.counters.borrow().get(counter.element_id()).copied()
    }

    pub fn toggles(&self) -> Vec<(i64, bool)> {
        self.toggles.borrow().clone()
    }

    pub fn last_form(&self) -> Option<FormSpec> {
        self.forms.borrow().last().cloned()
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open.get()
    }

    pub fn submit_busy(&self) -> Vec<(bool, String)> {
        self.submit_busy.borrow().clone()
    }

    pub fn confirm_messages(&self) -> Vec<String> {
        self.confirm_messages.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ViewSurface for RecordingSurface {
    fn show_login(&self, message: Option<&str>) {
        self.login_messages.borrow_mut().push(message.map(str::to_string));
    }

    fn show_main_panel(&self) {
        self.main_panel.set(self.main_panel.get() + 1);
    }

    fn set_login_busy(&self, busy: bool, _label: &str) {
        self.login_busy.borrow_mut().push(busy);
    }

    fn current_fragment(&self) -> String {
        self.fragment.borrow().clone()
    }

    fn set_page_title(&self, title: &str) {
        self.titles.borrow_mut().push(title.to_string());
    }

    fn highlight_nav(&self, section: Option<Section>) {
        self.highlighted.set(section);
    }

    fn mount_section(&self, section: Section) -> bool {
        if self.missing_templates.borrow().contains(&section) {
            return false;
        }
        // Plantilla nueva: tablas y selects vacíos
        self.rows.borrow_mut().clear();
        self.selects.borrow_mut().clear();
        true
    }

    fn show_section_not_found(&self, message: &str) {
        self.not_found.borrow_mut().push(message.to_string());
    }

    fn render_rows(&self, body: TableBody, rows: Vec<TableRow>) {
        self.rows.borrow_mut().insert(body.element_id(), rows);
    }

    fn selected_value(&self, control: FilterControl) -> String {
        self.selects
            .borrow()
            .get(control.element_id())
            .map(|s| s.selected.clone())
            .unwrap_or_default()
    }

    fn populate_select(&self, control: FilterControl, placeholder: &str, options: &[SelectOption], selected: &str) {
        self.selects.borrow_mut().insert(
            control.element_id(),
            SelectState {
                placeholder: placeholder.to_string(),
                options: options.to_vec(),
                selected: selected.to_string(),
            },
        );
    }

    fn clear_filters(&self) {
        self.cleared_filters.set(self.cleared_filters.get() + 1);
        for state in self.selects.borrow_mut().values_mut() {
            state.selected.clear();
        }
    }

    fn set_counter(&self, counter: Counter, value: i64) {
        self.counters.borrow_mut().insert(counter.element_id(), value);
    }

    fn set_toggle(&self, tecnico_id: i64, on: bool) {
        self.toggles.borrow_mut().push((tecnico_id, on));
    }

    fn open_modal(&self, form: &FormSpec) {
        self.forms.borrow_mut().push(form.clone());
        self.modal_open.set(true);
    }

    fn close_modal(&self) {
        self.modal_open.set(false);
    }

    fn set_submit_busy(&self, busy: bool, label: &str) {
        self.submit_busy.borrow_mut().push((busy, label.to_string()));
    }

    async fn confirm(&self, message: &str) -> bool {
        self.confirm_messages.borrow_mut().push(message.to_string());
        self.confirm_answer.get()
    }
}

// ============================================================================
// HARNESS
// ============================================================================

pub struct TestHarness {
    pub console: AdminConsole,
    pub ctx: AppContext,
    pub transport: Rc<FakeTransport>,
    pub token_store: MemoryTokenStore,
    pub surface: Rc<RecordingSurface>,
    pub notifier: Rc<RecordingNotifier>,
    pub charts: Rc<FakeCharts>,
}

impl TestHarness {
    pub fn logged_in() -> Self {
        Self::with_store(MemoryTokenStore::with_token(TEST_TOKEN))
    }

    pub fn logged_out() -> Self {
        Self::with_store(MemoryTokenStore::new())
    }

    fn with_store(token_store: MemoryTokenStore) -> Self {
        let config = AppConfig {
            api_url: TEST_API_URL.to_string(),
            language: "PT".to_string(),
            ..AppConfig::default()
        };
        let transport = Rc::new(FakeTransport::default());
        let surface = Rc::new(RecordingSurface::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let charts = Rc::new(FakeCharts::default());

        let console = AdminConsole::new(
            config,
            transport.clone(),
            Rc::new(token_store.clone()) as Rc<dyn TokenStore>,
            surface.clone(),
            notifier.clone(),
            charts.clone(),
        );
        let ctx = console.context().clone();

        Self {
            console,
            ctx,
            transport,
            token_store,
            surface,
            notifier,
            charts,
        }
    }
}
