// ============================================================================
// SESSION STATE - Token del gestor + fin de sesión
// ============================================================================

use crate::services::cache_service::CacheEntries;
use crate::services::token_store::TokenStore;
use std::cell::RefCell;
use std::rc::Rc;

/// Motivo por el que la sesión terminó
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// El gestor pulsó "Sair"
    LoggedOut,
    /// El backend respondió 401
    Expired,
}

type SessionListener = Rc<dyn Fn(SessionEnd)>;

/// Token en memoria respaldado por un almacén duradero.
/// Al terminar la sesión se purga el caché y se avisa a los listeners.
#[derive(Clone)]
pub struct SessionStore {
    token: Rc<RefCell<Option<String>>>,
    store: Rc<dyn TokenStore>,
    cache: CacheEntries,
    listeners: Rc<RefCell<Vec<SessionListener>>>,
}

impl SessionStore {
    /// Restaura el token guardado (si lo hay)
    pub fn new(store: Rc<dyn TokenStore>, cache: CacheEntries) -> Self {
        let token = store.load().filter(|t| !t.is_empty());
        if token.is_some() {
            log::info!("🔐 [AUTH] Token restaurado desde el almacén");
        }
        Self {
            token: Rc::new(RefCell::new(token)),
            store,
            cache,
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn get_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.borrow().is_some()
    }

    /// Guarda el token tras un login correcto
    pub fn set_token(&self, token: &str) {
        if let Err(e) = self.store.save(token) {
            log::error!("❌ [AUTH] {}", e);
        }
        *self.token.borrow_mut() = Some(token.to_string());
        log::info!("✅ [AUTH] Sesión iniciada");
    }

    /// Logout explícito
    pub fn clear(&self) {
        self.end(SessionEnd::LoggedOut);
    }

    /// Token rechazado por el backend
    pub fn expire(&self) {
        self.end(SessionEnd::Expired);
    }

    /// Listener de fin de sesión (mostrar login, destruir gráficos...)
    pub fn on_cleared(&self, listener: impl Fn(SessionEnd) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn end(&self, reason: SessionEnd) {
        *self.token.borrow_mut() = None;
        if let Err(e) = self.store.remove() {
            log::error!("❌ [AUTH] {}", e);
        }
        self.cache.purge();
        log::info!("🚪 [AUTH] Sesión terminada: {:?}", reason);

        // Copia: un listener puede registrar otro sin chocar con el borrow
        let listeners: Vec<SessionListener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(reason);
        }
    }
}
