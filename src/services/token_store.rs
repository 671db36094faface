// ============================================================================
// TOKEN STORE - Almacenamiento duradero del token de sesión
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

/// Almacén clave/valor para un único token
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), String>;
    fn remove(&self) -> Result<(), String>;
}

/// Token en memoria (sin persistencia). Fallback si localStorage no está disponible.
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    token: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Rc::new(RefCell::new(Some(token.to_string()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) -> Result<(), String> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), String> {
        *self.token.borrow_mut() = None;
        Ok(())
    }
}

/// Token en localStorage bajo una clave fija (valor crudo, sin JSON)
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageTokenStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageTokenStore {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string() }
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw().get_item(&self.key).ok().flatten()
    }

    fn save(&self, token: &str) -> Result<(), String> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw()
            .set_item(&self.key, token)
            .map_err(|_| "Error guardando token en localStorage".to_string())
    }

    fn remove(&self) -> Result<(), String> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::raw()
            .remove_item(&self.key)
            .map_err(|_| "Error eliminando token de localStorage".to_string())
    }
}
