// ============================================================================
// VIEWS - Contrato con la superficie de presentación
// ============================================================================
// El núcleo describe QUÉ se muestra (filas, opciones, formularios); la
// superficie decide CÓMO (DOM en el navegador, grabadora en los tests).
// ============================================================================

#[cfg(target_arch = "wasm32")]
pub mod dom_surface;

use crate::models::EntityKind;
use crate::router::Section;
use crate::state::filter_state::{
    FilterState, FILTER_CLIENTE, FILTER_DATA_FIM, FILTER_DATA_INICIO, FILTER_ELEVADOR, FILTER_TECNICO,
};
use async_trait::async_trait;

/// Cuerpos de tabla que renderizan los loaders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableBody {
    /// Tabla genérica de clientes/elevadores/técnicos
    Entities,
    Chamados,
}

impl TableBody {
    pub fn element_id(self) -> &'static str {
        match self {
            TableBody::Entities => "data-table-body",
            TableBody::Chamados => "chamados-table-body",
        }
    }
}

/// Controles de filtro (dashboard y chamados comparten ids)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterControl {
    DataInicio,
    DataFim,
    Cliente,
    Elevador,
    Tecnico,
}

impl FilterControl {
    pub const ALL: [FilterControl; 5] = [
        FilterControl::DataInicio,
        FilterControl::DataFim,
        FilterControl::Cliente,
        FilterControl::Elevador,
        FilterControl::Tecnico,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            FilterControl::DataInicio => "filter-data-inicio",
            FilterControl::DataFim => "filter-data-fim",
            FilterControl::Cliente => "filter-cliente",
            FilterControl::Elevador => "filter-elevador",
            FilterControl::Tecnico => "filter-tecnico",
        }
    }

    /// Nombre del parámetro en la query
    pub fn query_key(self) -> &'static str {
        match self {
            FilterControl::DataInicio => FILTER_DATA_INICIO,
            FilterControl::DataFim => FILTER_DATA_FIM,
            FilterControl::Cliente => FILTER_CLIENTE,
            FilterControl::Elevador => FILTER_ELEVADOR,
            FilterControl::Tecnico => FILTER_TECNICO,
        }
    }
}

/// Contadores del dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    TotalChamados,
    TotalTecnicos,
    TotalElevadores,
}

impl Counter {
    pub fn element_id(self) -> &'static str {
        match self {
            Counter::TotalChamados => "total-chamados",
            Counter::TotalTecnicos => "total-tecnicos",
            Counter::TotalElevadores => "total-elevadores",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl ToString, label: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Text(String),
    Badge { text: String, tone: BadgeTone },
    /// Interruptor de plantão de un técnico
    StatusToggle { tecnico_id: i64, on: bool, label: String },
    /// Selector de técnico + botón "Atribuir" de un chamado abierto
    AssignSelect {
        chamado_id: i64,
        placeholder: String,
        options: Vec<SelectOption>,
        button_label: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowAction {
    pub label: String,
    pub action: UiAction,
    pub danger: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<CellContent>,
    pub actions: Vec<RowAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text,
    Password,
    Number,
    Checkbox { checked: bool },
    Select { options: Vec<SelectOption> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: &'static str,
    pub label: String,
    pub input: FieldInput,
    /// Valor inicial (en selects, la opción preseleccionada)
    pub value: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormSpec {
    pub kind: EntityKind,
    pub title: String,
    pub submit_label: String,
    pub cancel_label: String,
    pub fields: Vec<FormField>,
}

/// Pares nombre/valor tal como los entrega el formulario.
/// Un checkbox sin marcar no aparece.
pub type FormValues = Vec<(String, String)>;

/// Intenciones del gestor que la superficie reenvía al núcleo
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Navigate(String),
    Login { username: String, password: String },
    Logout,
    ApplyFilters(FilterState),
    ClearFilters,
    OpenCreate(EntityKind),
    OpenEdit(EntityKind, i64),
    Delete(EntityKind, i64),
    SubmitForm(FormValues),
    CloseForm,
    ToggleTecnico { tecnico_id: i64, on: bool },
    AssignTecnico { chamado_id: i64, tecnico_id: String },
}

/// Superficie de presentación
#[async_trait(?Send)]
pub trait ViewSurface {
    // Login / panel
    fn show_login(&self, message: Option<&str>);
    fn show_main_panel(&self);
    fn set_login_busy(&self, busy: bool, label: &str);

    // Router
    fn current_fragment(&self) -> String;
    fn set_page_title(&self, title: &str);
    fn highlight_nav(&self, section: Option<Section>);
    /// Monta la plantilla `<section>-template`; `false` si no existe
    fn mount_section(&self, section: Section) -> bool;
    fn show_section_not_found(&self, message: &str);

    // Tablas, filtros y contadores
    fn render_rows(&self, body: TableBody, rows: Vec<TableRow>);
    fn selected_value(&self, control: FilterControl) -> String;
    fn populate_select(&self, control: FilterControl, placeholder: &str, options: &[SelectOption], selected: &str);
    fn clear_filters(&self);
    fn set_counter(&self, counter: Counter, value: i64);
    fn set_toggle(&self, tecnico_id: i64, on: bool);

    // Modal de formulario
    fn open_modal(&self, form: &FormSpec);
    fn close_modal(&self);
    fn set_submit_busy(&self, busy: bool, label: &str);

    /// Diálogo de confirmación; resuelve cuando el gestor responde
    async fn confirm(&self, message: &str) -> bool;
}
