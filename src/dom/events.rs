// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// Listeners en elementos del DOM: se destruyen con el elemento, así que
// closure.forget() es seguro. Listeners globales (window, formulario de
// login, nav): se registran UNA sola vez al arrancar.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlElement};

/// Listener genérico
pub fn listen<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Helper para click
pub fn on_click<F>(target: &EventTarget, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    listen(target, "click", handler)
}

/// Helper para change (checkbox, select)
pub fn on_change<F>(target: &EventTarget, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    listen(target, "change", handler)
}

/// Reemplaza el `onclick` del elemento (un único handler activo)
pub fn replace_onclick<F>(element: &HtmlElement, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    element.set_onclick(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
}

/// Reemplaza el `onsubmit` del formulario (un único handler activo)
pub fn replace_onsubmit<F>(element: &HtmlElement, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    element.set_onsubmit(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
}
