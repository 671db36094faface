// ============================================================================
// CHARTS - Contrato con la librería de gráficos + registro de instancias
// ============================================================================

use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Doughnut,
    Bar,
    Line,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Doughnut => "doughnut",
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub background: Vec<String>,
    pub border_color: Option<String>,
    pub fill: bool,
    pub tension: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    /// Barras horizontales (`indexAxis: 'y'`)
    pub horizontal: bool,
}

impl ChartSpec {
    /// Configuración en el formato que espera Chart.js
    pub fn to_config(&self) -> Value {
        let datasets: Vec<Value> = self
            .datasets
            .iter()
            .map(|d| {
                let mut dataset = json!({ "data": d.data });
                if let Some(label) = &d.label {
                    dataset["label"] = json!(label);
                }
                match d.background.len() {
                    0 => {}
                    1 => dataset["backgroundColor"] = json!(d.background[0]),
                    _ => dataset["backgroundColor"] = json!(d.background),
                }
                if let Some(border) = &d.border_color {
                    dataset["borderColor"] = json!(border);
                }
                if d.fill {
                    dataset["fill"] = json!(true);
                }
                if let Some(tension) = d.tension {
                    dataset["tension"] = json!(tension);
                }
                dataset
            })
            .collect();

        let mut options = json!({ "responsive": true, "maintainAspectRatio": false });
        if self.horizontal {
            options["indexAxis"] = json!("y");
        }

        json!({
            "type": self.kind.as_str(),
            "data": { "labels": self.labels, "datasets": datasets },
            "options": options,
        })
    }
}

/// Instancia dibujada; hay que destruirla explícitamente
pub trait ChartHandle {
    fn destroy(&self);
}

/// Librería de gráficos. `None` si la superficie no existe en la vista actual.
pub trait ChartRenderer {
    fn draw(&self, surface_id: &str, spec: &ChartSpec) -> Option<Box<dyn ChartHandle>>;
}

/// Gráficos vivos de la vista actual, por id de superficie
#[derive(Clone)]
pub struct ChartRegistry {
    renderer: Rc<dyn ChartRenderer>,
    charts: Rc<RefCell<HashMap<String, Box<dyn ChartHandle>>>>,
}

impl ChartRegistry {
    pub fn new(renderer: Rc<dyn ChartRenderer>) -> Self {
        Self {
            renderer,
            charts: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Dibuja o reemplaza el gráfico de una superficie
    pub fn render(&self, surface_id: &str, spec: &ChartSpec) {
        let previous = self.charts.borrow_mut().remove(surface_id);
        if let Some(previous) = previous {
            previous.destroy();
        }
        match self.renderer.draw(surface_id, spec) {
            Some(handle) => {
                self.charts.borrow_mut().insert(surface_id.to_string(), handle);
            }
            None => log::warn!("⚠️ [CHARTS] Superficie {} no disponible", surface_id),
        }
    }

    /// Destruye todos los gráficos (cambio de vista o logout)
    pub fn destroy_all(&self) {
        let drained: Vec<(String, Box<dyn ChartHandle>)> = self.charts.borrow_mut().drain().collect();
        for (id, chart) in drained {
            log::debug!("🧹 [CHARTS] Destruyendo {}", id);
            chart.destroy();
        }
    }

    pub fn len(&self) -> usize {
        self.charts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.borrow().is_empty()
    }
}

/// Chart.js vía `new Chart(ctx, config)` sobre el canvas de la superficie
#[cfg(target_arch = "wasm32")]
pub mod chartjs {
    use super::{ChartHandle, ChartRenderer, ChartSpec};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    pub struct ChartJsRenderer;

    struct ChartJsHandle {
        instance: JsValue,
    }

    impl ChartHandle for ChartJsHandle {
        fn destroy(&self) {
            let destroy = js_sys::Reflect::get(&self.instance, &JsValue::from_str("destroy"))
                .ok()
                .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
            if let Some(destroy) = destroy {
                if let Err(e) = destroy.call0(&self.instance) {
                    log::warn!("⚠️ [CHARTS] destroy() falló: {:?}", e);
                }
            }
        }
    }

    impl ChartRenderer for ChartJsRenderer {
        fn draw(&self, surface_id: &str, spec: &ChartSpec) -> Option<Box<dyn ChartHandle>> {
            let canvas = crate::dom::get_element_by_id(surface_id)?
                .dyn_into::<web_sys::HtmlCanvasElement>()
                .ok()?;
            let context = canvas.get_context("2d").ok()??;

            let window = web_sys::window()?;
            let constructor = js_sys::Reflect::get(&window, &JsValue::from_str("Chart"))
                .ok()?
                .dyn_into::<js_sys::Function>()
                .ok()?;
            let config = js_sys::JSON::parse(&spec.to_config().to_string()).ok()?;

            let args = js_sys::Array::of2(&JsValue::from(context), &config);
            match js_sys::Reflect::construct(&constructor, &args) {
                Ok(instance) => Some(Box::new(ChartJsHandle { instance })),
                Err(e) => {
                    log::error!("❌ [CHARTS] new Chart() falló en {}: {:?}", surface_id, e);
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeCharts;

    fn doughnut() -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Doughnut,
            labels: vec!["aberto".to_string()],
            datasets: vec![Dataset {
                data: vec![3.0],
                background: vec!["#f59e0b".to_string(), "#22c55e".to_string()],
                ..Dataset::default()
            }],
            horizontal: false,
        }
    }

    #[test]
    fn rendering_same_surface_destroys_previous_instance() {
        let fake = Rc::new(FakeCharts::default());
        let registry = ChartRegistry::new(fake.clone());

        registry.render("statusChart", &doughnut());
        registry.render("statusChart", &doughnut());

        assert_eq!(registry.len(), 1);
        assert_eq!(fake.destroyed(), vec!["statusChart".to_string()]);
    }

    #[test]
    fn destroy_all_on_empty_registry_is_a_no_op() {
        let fake = Rc::new(FakeCharts::default());
        let registry = ChartRegistry::new(fake.clone());

        registry.destroy_all();

        assert!(registry.is_empty());
        assert!(fake.destroyed().is_empty());
    }

    #[test]
    fn horizontal_bar_config_sets_index_axis() {
        let spec = ChartSpec {
            kind: ChartKind::Bar,
            labels: vec!["Rui".to_string()],
            datasets: vec![Dataset {
                label: Some("Nº de Chamados".to_string()),
                data: vec![4.0],
                background: vec!["#38bdf8".to_string()],
                ..Dataset::default()
            }],
            horizontal: true,
        };
        let config = spec.to_config();

        assert_eq!(config["type"], "bar");
        assert_eq!(config["options"]["indexAxis"], "y");
        assert_eq!(config["data"]["datasets"][0]["backgroundColor"], "#38bdf8");
        assert_eq!(config["data"]["datasets"][0]["label"], "Nº de Chamados");
    }
}
