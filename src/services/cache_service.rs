// ============================================================================
// CACHE SERVICE - Memo de colecciones de referencia por sesión
// ============================================================================
// Sin TTL ni límite de tamaño: una entrada vive hasta que una escritura sobre
// su colección (o el fin de la sesión) la invalida.
// ============================================================================

use crate::models::Collection;
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Colección tal y como la devolvió el backend, compartida sin copia
pub type CachedCollection = Rc<Vec<Value>>;

#[derive(Default)]
struct CacheInner {
    entries: HashMap<Collection, CachedCollection>,
    // Se incrementa en cada invalidación: un fetch que empezó antes no guarda
    epochs: HashMap<Collection, u64>,
}

/// Almacén de entradas (compartido con el SessionStore para purgarlo)
#[derive(Clone, Default)]
pub struct CacheEntries {
    inner: Rc<RefCell<CacheInner>>,
}

impl CacheEntries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: Collection) -> Option<CachedCollection> {
        self.inner.borrow().entries.get(&key).cloned()
    }

    pub fn contains(&self, key: Collection) -> bool {
        self.inner.borrow().entries.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    fn epoch(&self, key: Collection) -> u64 {
        self.inner.borrow().epochs.get(&key).copied().unwrap_or(0)
    }

    fn store_if_current(&self, key: Collection, epoch: u64, value: CachedCollection) -> bool {
        let mut inner = self.inner.borrow_mut();
        let current = inner.epochs.get(&key).copied().unwrap_or(0);
        if current != epoch {
            return false;
        }
        inner.entries.insert(key, value);
        true
    }

    /// Invalida exactamente una colección
    pub fn invalidate(&self, key: Collection) {
        let mut inner = self.inner.borrow_mut();
        inner.entries.remove(&key);
        *inner.epochs.entry(key).or_insert(0) += 1;
        log::debug!("🗑️ [CACHE] {} invalidada", key);
    }

    /// Vacía todo el caché (fin de sesión)
    pub fn purge(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.entries.clear();
        for key in Collection::ALL {
            *inner.epochs.entry(key).or_insert(0) += 1;
        }
        log::info!("🧹 [CACHE] Caché purgado");
    }
}

/// Caché de colecciones con fetch a través del gateway
#[derive(Clone)]
pub struct EntityCache {
    entries: CacheEntries,
    gateway: ApiClient,
}

impl EntityCache {
    pub fn new(entries: CacheEntries, gateway: ApiClient) -> Self {
        Self { entries, gateway }
    }

    pub fn entries(&self) -> &CacheEntries {
        &self.entries
    }

    /// Devuelve la colección memorizada o la pide con `GET <key>`
    pub async fn get_or_fetch(&self, key: Collection) -> Result<CachedCollection, ApiError> {
        if let Some(hit) = self.entries.get(key) {
            log::debug!("📋 [CACHE] Hit {} ({} registros)", key, hit.len());
            return Ok(hit);
        }

        let epoch = self.entries.epoch(key);
        log::info!("🌐 [CACHE] Miss {}, pidiendo al backend", key);
        let value = self.gateway.get(key.endpoint()).await?;
        let records = match value {
            Value::Array(records) => Rc::new(records),
            Value::Null => Rc::new(Vec::new()),
            other => {
                log::error!("❌ [CACHE] {} no es una lista: {}", key, other);
                return Err(ApiError::failed(self.gateway.translate("resposta_invalida")));
            }
        };

        if !self.entries.store_if_current(key, epoch, records.clone()) {
            log::warn!("⚠️ [CACHE] {} invalidada durante el fetch, no se guarda", key);
        }
        Ok(records)
    }

    /// Igual que `get_or_fetch` pero deserializado al modelo de la colección
    pub async fn get_typed<T: DeserializeOwned>(&self, key: Collection) -> Result<Vec<T>, ApiError> {
        let records = self.get_or_fetch(key).await?;
        records
            .iter()
            .map(|record| serde_json::from_value(record.clone()))
            .collect::<Result<Vec<T>, _>>()
            .map_err(|e| {
                log::error!("❌ [CACHE] Registro inválido en {}: {}", key, e);
                ApiError::failed(self.gateway.translate("resposta_invalida"))
            })
    }

    pub fn invalidate(&self, key: Collection) {
        self.entries.invalidate(key);
    }
}
