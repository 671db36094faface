// ============================================================================
// VIEW STATE - Sección activa, objetivo de edición y tickets de carga
// ============================================================================

use crate::models::EntityKind;
use crate::router::Section;
use crate::state::filter_state::FilterState;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Número de activación de un loader; solo el último puede renderizar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Clone, Default)]
pub struct ViewState {
    current_section: Rc<Cell<Option<Section>>>,
    edit_target_id: Rc<Cell<Option<i64>>>,
    form_kind: Rc<Cell<Option<EntityKind>>>,
    filters: Rc<RefCell<FilterState>>,
    load_counter: Rc<Cell<u64>>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_section(&self) -> Option<Section> {
        self.current_section.get()
    }

    /// Nueva sección (o `None` si no existe). Los filtros no sobreviven a la navegación.
    pub fn enter_section(&self, section: Option<Section>) {
        self.current_section.set(section);
        *self.filters.borrow_mut() = FilterState::default();
        self.begin_load();
    }

    pub fn edit_target_id(&self) -> Option<i64> {
        self.edit_target_id.get()
    }

    /// Entidad del modal abierto (`None` si no hay modal)
    pub fn form_kind(&self) -> Option<EntityKind> {
        self.form_kind.get()
    }

    pub fn open_form(&self, kind: EntityKind, edit_target_id: Option<i64>) {
        self.form_kind.set(Some(kind));
        self.edit_target_id.set(edit_target_id);
    }

    pub fn close_form(&self) {
        self.form_kind.set(None);
        self.edit_target_id.set(None);
    }

    pub fn filters(&self) -> FilterState {
        self.filters.borrow().clone()
    }

    pub fn set_filters(&self, filters: FilterState) {
        *self.filters.borrow_mut() = filters;
    }

    /// Invalida cualquier carga anterior todavía en vuelo
    pub fn begin_load(&self) -> LoadTicket {
        let next = self.load_counter.get() + 1;
        self.load_counter.set(next);
        LoadTicket(next)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.load_counter.get() == ticket.0
    }

    /// Vuelta a la pantalla de login
    pub fn reset(&self) {
        self.close_form();
        self.current_section.set(None);
        *self.filters.borrow_mut() = FilterState::default();
        self.begin_load();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_load_makes_older_ticket_stale() {
        let view = ViewState::new();
        let first = view.begin_load();
        let second = view.begin_load();

        assert!(!view.is_current(first));
        assert!(view.is_current(second));
    }

    #[test]
    fn navigation_drops_filters() {
        let view = ViewState::new();
        view.set_filters(FilterState {
            tecnico_id: Some("2".to_string()),
            ..FilterState::default()
        });

        view.enter_section(Some(Section::Clientes));

        assert!(view.filters().is_empty());
        assert_eq!(view.current_section(), Some(Section::Clientes));
    }
}
