// ============================================================================
// NOTIFIER - Toasts y overlay de "ocupado"
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Capa de notificaciones transitorias (implementada por la vista)
pub trait Notifier {
    fn toast(&self, message: &str, kind: ToastKind);
    fn set_busy(&self, visible: bool);
}

/// Contador de llamadas en vuelo: el overlay solo se oculta con la última
#[derive(Clone)]
pub struct BusyIndicator {
    notifier: Rc<dyn Notifier>,
    in_flight: Rc<Cell<usize>>,
}

impl BusyIndicator {
    pub fn new(notifier: Rc<dyn Notifier>) -> Self {
        Self {
            notifier,
            in_flight: Rc::new(Cell::new(0)),
        }
    }

    /// Marca una llamada en vuelo hasta que el guard se destruye
    pub fn hold(&self) -> BusyGuard {
        let count = self.in_flight.get() + 1;
        self.in_flight.set(count);
        if count == 1 {
            self.notifier.set_busy(true);
        }
        BusyGuard {
            indicator: self.clone(),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }
}

pub struct BusyGuard {
    indicator: BusyIndicator,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let count = self.indicator.in_flight.get().saturating_sub(1);
        self.indicator.in_flight.set(count);
        if count == 0 {
            self.indicator.notifier.set_busy(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingNotifier;

    #[test]
    fn overlay_hides_only_after_last_call() {
        let notifier = Rc::new(RecordingNotifier::default());
        let busy = BusyIndicator::new(notifier.clone());

        let first = busy.hold();
        let second = busy.hold();
        assert_eq!(notifier.busy_changes(), vec![true]);

        drop(first);
        assert_eq!(notifier.busy_changes(), vec![true]);
        assert_eq!(busy.in_flight(), 1);

        drop(second);
        assert_eq!(notifier.busy_changes(), vec![true, false]);
        assert_eq!(busy.in_flight(), 0);
    }
}
