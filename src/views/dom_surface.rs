// ============================================================================
// DOM SURFACE - Implementación de la superficie sobre el DOM real
// ============================================================================
// Opera sobre el markup estático de la página (login, panel, modales,
// plantillas por sección). Los clicks se traducen a `UiAction` y se
// entregan al dispatcher.
// ============================================================================

use crate::config::AppConfig;
use crate::dom::{
    append_child, as_html, clear_children, control_value, get_element_by_id, on_change, on_click, query_selector,
    query_selector_all, remove_class, replace_onclick, replace_onsubmit, set_control_value, set_disabled,
    set_hidden_by_id, set_text_by_id, add_class, listen, ElementBuilder,
};
use crate::router::Section;
use crate::services::notifier::{Notifier, ToastKind};
use crate::state::filter_state::FilterState;
use crate::views::{
    BadgeTone, CellContent, Counter, FieldInput, FilterControl, FormSpec, FormValues, SelectOption, TableBody,
    TableRow, UiAction, ViewSurface,
};
use async_trait::async_trait;
use futures::channel::oneshot;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, HtmlInputElement};

const LOGIN_SECTION: &str = "login-section";
const MAIN_PANEL: &str = "main-panel";
const LOGIN_FORM: &str = "login-form";
const LOGIN_ERROR: &str = "login-error";
const LOGOUT_BTN: &str = "logout-btn";
const MAIN_NAV: &str = "main-nav";
const CONTENT_AREA: &str = "content-area";
const PAGE_TITLE: &str = "page-title";
const FORM_MODAL: &str = "form-modal";
const FORM_MODAL_TITLE: &str = "form-modal-title";
const GENERIC_FORM: &str = "generic-form";
const SPINNER_OVERLAY: &str = "spinner-overlay";
const TOAST_CONTAINER: &str = "toast-container";
const CONFIRMATION_MODAL: &str = "confirmation-modal";
const MODAL_TEXT: &str = "modal-text";
const MODAL_CONFIRM_BTN: &str = "modal-confirm-btn";
const MODAL_CANCEL_BTN: &str = "modal-cancel-btn";

const CELL_CLASS: &str = "px-6 py-4 whitespace-nowrap";

pub type Dispatch = fn(UiAction);

pub struct DomSurface {
    toast_duration_ms: u32,
    dispatch: Dispatch,
}

impl DomSurface {
    pub fn new(config: &AppConfig, dispatch: Dispatch) -> Self {
        Self {
            toast_duration_ms: config.toast_duration_ms,
            dispatch,
        }
    }

    fn log_err(context: &str, result: Result<(), JsValue>) {
        if let Err(e) = result {
            log::error!("❌ [DOM] {}: {:?}", context, e);
        }
    }

    // ========================================================================
    // TABLAS
    // ========================================================================

    fn build_row(&self, row: &TableRow) -> Result<Element, JsValue> {
        let tr = ElementBuilder::new("tr")?.build();
        for cell in &row.cells {
            append_child(&tr, &self.build_cell(cell)?)?;
        }
        if !row.actions.is_empty() {
            let td = ElementBuilder::new("td")?
                .class(&format!("{} text-sm font-medium", CELL_CLASS))
                .build();
            for action in &row.actions {
                let class = if action.danger {
                    "delete-btn text-red-600 hover:text-red-900 ml-4"
                } else {
                    "edit-btn text-sky-600 hover:text-sky-900"
                };
                let button = ElementBuilder::new("button")?.class(class).text(&action.label).build();
                let dispatch = self.dispatch;
                let action = action.action.clone();
                on_click(&button, move |_| dispatch(action.clone()))?;
                append_child(&td, &button)?;
            }
            append_child(&tr, &td)?;
        }
        Ok(tr)
    }

    fn build_cell(&self, cell: &CellContent) -> Result<Element, JsValue> {
        let td = ElementBuilder::new("td")?.class(CELL_CLASS).build();
        match cell {
            CellContent::Text(text) => td.set_text_content(Some(text)),
            CellContent::Badge { text, tone } => {
                let tone_class = match tone {
                    BadgeTone::Success => "bg-green-100 text-green-800",
                    BadgeTone::Warning => "bg-yellow-100 text-yellow-800",
                    BadgeTone::Danger => "bg-red-100 text-red-800",
                };
                let badge = ElementBuilder::new("span")?
                    .class(&format!(
                        "px-2 inline-flex text-xs leading-5 font-semibold rounded-full {}",
                        tone_class
                    ))
                    .text(text)
                    .build();
                append_child(&td, &badge)?;
            }
            CellContent::StatusToggle { tecnico_id, on, label } => {
                let input = ElementBuilder::new("input")?
                    .class("sr-only peer status-toggle")
                    .attr("type", "checkbox")?
                    .attr("data-id", &tecnico_id.to_string())?
                    .flag("checked", *on)?
                    .build();
                let dispatch = self.dispatch;
                let tecnico_id = *tecnico_id;
                on_change(&input, move |event| {
                    let checked = event
                        .target()
                        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                        .map(|i| i.checked());
                    if let Some(on) = checked {
                        dispatch(UiAction::ToggleTecnico { tecnico_id, on });
                    }
                })?;
                let wrapper = ElementBuilder::new("label")?
                    .class("relative inline-flex items-center cursor-pointer")
                    .child(input)?
                    .child(ElementBuilder::new("div")?.class("toggle-track").build())?
                    .child(
                        ElementBuilder::new("span")?
                            .class("ml-3 text-sm font-medium text-gray-900")
                            .text(label)
                            .build(),
                    )?
                    .build();
                append_child(&td, &wrapper)?;
            }
            CellContent::AssignSelect {
                chamado_id,
                placeholder,
                options,
                button_label,
            } => {
                let select = ElementBuilder::new("select")?
                    .class("assign-tech-select block w-full border-slate-300 rounded-md text-sm")
                    .attr("data-chamado-id", &chamado_id.to_string())?
                    .build();
                fill_select(&select, placeholder, options)?;

                let button = ElementBuilder::new("button")?
                    .class("assign-btn bg-sky-500 text-white px-2 py-1 rounded text-xs hover:bg-sky-600")
                    .text(button_label)
                    .build();
                let dispatch = self.dispatch;
                let chamado_id = *chamado_id;
                let select_ref = select.clone();
                on_click(&button, move |_| {
                    dispatch(UiAction::AssignTecnico {
                        chamado_id,
                        tecnico_id: control_value(&select_ref),
                    });
                })?;

                let wrapper = ElementBuilder::new("div")?
                    .class("flex items-center gap-2")
                    .child(select)?
                    .child(button)?
                    .build();
                append_child(&td, &wrapper)?;
            }
        }
        Ok(td)
    }

    // ========================================================================
    // FORMULARIOS
    // ========================================================================

    fn build_field(field: &crate::views::FormField) -> Result<Element, JsValue> {
        let wrapper = ElementBuilder::new("div")?.build();
        let input_class = "mt-1 block w-full border-slate-300 rounded-md";

        let control = match &field.input {
            FieldInput::Checkbox { checked } => {
                let input = ElementBuilder::new("input")?
                    .class("h-4 w-4 rounded")
                    .attr("type", "checkbox")?
                    .attr("name", field.name)?
                    .flag("checked", *checked)?
                    .build();
                wrapper.set_class_name("flex items-center");
                append_child(&wrapper, &input)?;
                let label = ElementBuilder::new("label")?.class("ml-2").text(&field.label).build();
                append_child(&wrapper, &label)?;
                return Ok(wrapper);
            }
            FieldInput::Select { options } => {
                let select = ElementBuilder::new("select")?
                    .class(input_class)
                    .attr("name", field.name)?
                    .flag("required", field.required)?
                    .build();
                for option in options {
                    let element = ElementBuilder::new("option")?
                        .attr("value", &option.value)?
                        .flag("selected", option.value == field.value)?
                        .text(&option.label)
                        .build();
                    append_child(&select, &element)?;
                }
                select
            }
            FieldInput::Text | FieldInput::Password | FieldInput::Number => {
                let input_type = match field.input {
                    FieldInput::Password => "password",
                    FieldInput::Number => "number",
                    _ => "text",
                };
                let mut builder = ElementBuilder::new("input")?
                    .class(input_class)
                    .attr("type", input_type)?
                    .attr("name", field.name)?
                    .attr("value", &field.value)?
                    .flag("required", field.required)?;
                if matches!(field.input, FieldInput::Number) {
                    builder = builder.attr("step", "any")?;
                }
                builder.build()
            }
        };

        let label = ElementBuilder::new("label")?.class("block text-sm").text(&field.label).build();
        append_child(&wrapper, &label)?;
        append_child(&wrapper, &control)?;
        Ok(wrapper)
    }

    fn fill_form(&self, form_el: &Element, spec: &FormSpec) -> Result<(), JsValue> {
        clear_children(form_el);
        for field in &spec.fields {
            append_child(form_el, &Self::build_field(field)?)?;
        }

        let cancel = ElementBuilder::new("button")?
            .class("cancel-btn bg-slate-200 px-4 py-2 rounded-lg")
            .attr("type", "button")?
            .text(&spec.cancel_label)
            .build();
        let dispatch = self.dispatch;
        on_click(&cancel, move |_| dispatch(UiAction::CloseForm))?;

        let submit = ElementBuilder::new("button")?
            .class("bg-sky-600 text-white px-4 py-2 rounded-lg")
            .attr("type", "submit")?
            .text(&spec.submit_label)
            .build();

        let buttons = ElementBuilder::new("div")?
            .class("pt-4 flex justify-end gap-4")
            .child(cancel)?
            .child(submit)?
            .build();
        append_child(form_el, &buttons)?;

        if let Some(html) = as_html(form_el) {
            let dispatch = self.dispatch;
            replace_onsubmit(html, move |event| {
                event.prevent_default();
                let form = event.target().and_then(|t| t.dyn_into::<HtmlFormElement>().ok());
                if let Some(form) = form {
                    dispatch(UiAction::SubmitForm(read_form(&form)));
                }
            });
        }
        Ok(())
    }

    // ========================================================================
    // SECCIONES
    // ========================================================================

    /// Botones propios de la plantilla montada (alta, filtros)
    fn wire_section_controls(&self, section: Section) -> Result<(), JsValue> {
        let dispatch = self.dispatch;
        if let (Some(kind), Some(add)) = (section.entity_kind(), get_element_by_id("add-btn")) {
            on_click(&add, move |_| dispatch(UiAction::OpenCreate(kind)))?;
        }
        if let Some(apply) = get_element_by_id("apply-filters-btn") {
            on_click(&apply, move |_| dispatch(UiAction::ApplyFilters(read_filters())))?;
        }
        if let Some(clear) = get_element_by_id("clear-filters-btn") {
            on_click(&clear, move |_| dispatch(UiAction::ClearFilters))?;
        }
        Ok(())
    }
}

fn fill_select(select: &Element, placeholder: &str, options: &[SelectOption]) -> Result<(), JsValue> {
    clear_children(select);
    let first = ElementBuilder::new("option")?.attr("value", "")?.text(placeholder).build();
    append_child(select, &first)?;
    for option in options {
        let element = ElementBuilder::new("option")?
            .attr("value", &option.value)?
            .text(&option.label)
            .build();
        append_child(select, &element)?;
    }
    Ok(())
}

fn read_filters() -> FilterState {
    FilterState::from_pairs(FilterControl::ALL.iter().map(|control| {
        let value = get_element_by_id(control.element_id())
            .map(|el| control_value(&el))
            .unwrap_or_default();
        (control.query_key(), value)
    }))
}

fn read_form(form: &HtmlFormElement) -> FormValues {
    let mut values = FormValues::new();
    let Ok(data) = web_sys::FormData::new_with_form(form) else {
        return values;
    };
    let Ok(Some(entries)) = js_sys::try_iter(&data) else {
        return values;
    };
    for entry in entries.flatten() {
        let pair = js_sys::Array::from(&entry);
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            values.push((name, value));
        }
    }
    values
}

// ============================================================================
// CONTRATO
// ============================================================================

#[async_trait(?Send)]
impl ViewSurface for DomSurface {
    fn show_login(&self, message: Option<&str>) {
        set_hidden_by_id(MAIN_PANEL, true);
        set_hidden_by_id(LOGIN_SECTION, false);
        match message {
            Some(message) => {
                set_text_by_id(LOGIN_ERROR, message);
                set_hidden_by_id(LOGIN_ERROR, false);
            }
            None => set_hidden_by_id(LOGIN_ERROR, true),
        }
    }

    fn show_main_panel(&self) {
        set_hidden_by_id(LOGIN_SECTION, true);
        set_hidden_by_id(MAIN_PANEL, false);
        if let Some(panel) = get_element_by_id(MAIN_PANEL) {
            if let Some(html) = as_html(&panel) {
                Self::log_err("display main-panel", html.style().set_property("display", "flex"));
            }
        }
    }

    fn set_login_busy(&self, busy: bool, label: &str) {
        if busy {
            set_hidden_by_id(LOGIN_ERROR, true);
        }
        let selector = format!("#{} button[type=\"submit\"]", LOGIN_FORM);
        if let Some(button) = query_selector(&selector) {
            Self::log_err("login button", set_disabled(&button, busy));
            if !busy {
                button.set_text_content(Some(label));
            }
        }
    }

    fn current_fragment(&self) -> String {
        crate::dom::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default()
    }

    fn set_page_title(&self, title: &str) {
        set_text_by_id(PAGE_TITLE, title);
    }

    fn highlight_nav(&self, section: Option<Section>) {
        let target = section.map(|s| s.fragment());
        match query_selector_all(None, ".nav-link") {
            Ok(links) => {
                for link in links {
                    let _ = remove_class(&link, "active");
                    if target.is_some() && link.get_attribute("href") == target {
                        let _ = add_class(&link, "active");
                    }
                }
            }
            Err(e) => log::warn!("⚠️ [DOM] .nav-link: {:?}", e),
        }
    }

    fn mount_section(&self, section: Section) -> bool {
        let (Some(template), Some(content)) = (get_element_by_id(&section.template_id()), get_element_by_id(CONTENT_AREA))
        else {
            return false;
        };
        content.set_inner_html(&template.inner_html());
        Self::log_err("section controls", self.wire_section_controls(section));
        true
    }

    fn show_section_not_found(&self, message: &str) {
        if let Some(content) = get_element_by_id(CONTENT_AREA) {
            clear_children(&content);
            match ElementBuilder::new("p") {
                Ok(p) => Self::log_err("not found", append_child(&content, &p.text(message).build())),
                Err(e) => log::error!("❌ [DOM] {:?}", e),
            }
        }
    }

    fn render_rows(&self, body: TableBody, rows: Vec<TableRow>) {
        let Some(tbody) = get_element_by_id(body.element_id()) else {
            log::warn!("⚠️ [DOM] #{} no existe en la vista actual", body.element_id());
            return;
        };
        clear_children(&tbody);
        for row in &rows {
            match self.build_row(row) {
                Ok(tr) => Self::log_err("append row", append_child(&tbody, &tr)),
                Err(e) => log::error!("❌ [DOM] Fila no renderizada: {:?}", e),
            }
        }
    }

    fn selected_value(&self, control: FilterControl) -> String {
        get_element_by_id(control.element_id())
            .map(|el| control_value(&el))
            .unwrap_or_default()
    }

    fn populate_select(&self, control: FilterControl, placeholder: &str, options: &[SelectOption], selected: &str) {
        let Some(select) = get_element_by_id(control.element_id()) else {
            return;
        };
        Self::log_err("populate select", fill_select(&select, placeholder, options));
        set_control_value(&select, selected);
    }

    fn clear_filters(&self) {
        for control in FilterControl::ALL {
            if let Some(element) = get_element_by_id(control.element_id()) {
                set_control_value(&element, "");
            }
        }
    }

    fn set_counter(&self, counter: Counter, value: i64) {
        set_text_by_id(counter.element_id(), &value.to_string());
    }

    fn set_toggle(&self, tecnico_id: i64, on: bool) {
        let selector = format!(".status-toggle[data-id=\"{}\"]", tecnico_id);
        if let Some(input) = query_selector(&selector).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) {
            input.set_checked(on);
        }
    }

    fn open_modal(&self, form: &FormSpec) {
        set_text_by_id(FORM_MODAL_TITLE, &form.title);
        if let Some(form_el) = get_element_by_id(GENERIC_FORM) {
            Self::log_err("fill form", self.fill_form(&form_el, form));
        }
        set_hidden_by_id(FORM_MODAL, false);
    }

    fn close_modal(&self) {
        set_hidden_by_id(FORM_MODAL, true);
        if let Some(form_el) = get_element_by_id(GENERIC_FORM) {
            clear_children(&form_el);
        }
    }

    fn set_submit_busy(&self, busy: bool, label: &str) {
        let selector = format!("#{} button[type=\"submit\"]", GENERIC_FORM);
        if let Some(button) = query_selector(&selector) {
            Self::log_err("submit button", set_disabled(&button, busy));
            if !busy {
                button.set_text_content(Some(label));
            }
        }
    }

    async fn confirm(&self, message: &str) -> bool {
        let (Some(confirm_btn), Some(cancel_btn)) = (get_element_by_id(MODAL_CONFIRM_BTN), get_element_by_id(MODAL_CANCEL_BTN))
        else {
            log::warn!("⚠️ [DOM] Modal de confirmación no disponible");
            return false;
        };
        let (Some(confirm_btn), Some(cancel_btn)) = (as_html(&confirm_btn).cloned(), as_html(&cancel_btn).cloned()) else {
            return false;
        };

        set_text_by_id(MODAL_TEXT, message);
        set_hidden_by_id(CONFIRMATION_MODAL, false);

        let (sender, receiver) = oneshot::channel::<bool>();
        let sender = Rc::new(RefCell::new(Some(sender)));
        for (button, answer) in [(&confirm_btn, true), (&cancel_btn, false)] {
            let sender = sender.clone();
            replace_onclick(button, move |_| {
                set_hidden_by_id(CONFIRMATION_MODAL, true);
                if let Some(sender) = sender.borrow_mut().take() {
                    let _ = sender.send(answer);
                }
            });
        }

        receiver.await.unwrap_or(false)
    }
}

impl Notifier for DomSurface {
    fn toast(&self, message: &str, kind: ToastKind) {
        let Some(container) = get_element_by_id(TOAST_CONTAINER) else {
            return;
        };
        let bg = match kind {
            ToastKind::Success => "bg-green-500",
            ToastKind::Error => "bg-red-500",
        };
        let toast = match ElementBuilder::new("div") {
            Ok(b) => b
                .class(&format!("{} text-white px-6 py-3 rounded-md shadow-lg animate-pulse", bg))
                .text(message)
                .build(),
            Err(e) => {
                log::error!("❌ [DOM] Toast: {:?}", e);
                return;
            }
        };
        Self::log_err("toast", append_child(&container, &toast));

        Timeout::new(self.toast_duration_ms, move || {
            if let Some(html) = as_html(&toast) {
                let _ = html.style().set_property("opacity", "0");
            }
            Timeout::new(300, move || toast.remove()).forget();
        })
        .forget();
    }

    fn set_busy(&self, visible: bool) {
        set_hidden_by_id(SPINNER_OVERLAY, !visible);
    }
}

// ============================================================================
// LISTENERS GLOBALES (una sola vez al arrancar)
// ============================================================================

pub fn install_global_listeners(dispatch: Dispatch) -> Result<(), JsValue> {
    let window = crate::dom::window().ok_or_else(|| JsValue::from_str("No window"))?;

    listen(&window, "hashchange", move |_| {
        let hash = crate::dom::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default();
        dispatch(UiAction::Navigate(hash));
    })?;

    if let Some(form) = get_element_by_id(LOGIN_FORM) {
        listen(&form, "submit", move |event| {
            event.prevent_default();
            let read = |id: &str| get_element_by_id(id).map(|el| control_value(&el)).unwrap_or_default();
            dispatch(UiAction::Login {
                username: read("admin-username"),
                password: read("admin-password"),
            });
        })?;
    }

    if let Some(logout) = get_element_by_id(LOGOUT_BTN) {
        on_click(&logout, move |_| dispatch(UiAction::Logout))?;
    }

    // Los enlaces del menú solo escriben el fragmento; el hashchange navega
    if let Some(nav) = get_element_by_id(MAIN_NAV) {
        on_click(&nav, |event| {
            let link = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlAnchorElement>().ok());
            if let Some(link) = link {
                event.prevent_default();
                if let Some(window) = crate::dom::window() {
                    let _ = window.location().set_hash(&link.hash());
                }
            }
        })?;
    }

    Ok(())
}
