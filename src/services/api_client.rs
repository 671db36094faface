// ============================================================================
// API CLIENT - Gateway HTTP hacia /admin
// ============================================================================
// Inyecta el token, traduce errores y mantiene el overlay de "ocupado".
// No tiene lógica de negocio.
// ============================================================================

use crate::config::AppConfig;
use crate::models::{ErrorBody, LoginRequest, LoginResponse};
use crate::services::error::ApiError;
use crate::services::notifier::BusyIndicator;
use crate::services::transport::{HttpRequest, HttpResponse, HttpTransport, Method};
use crate::state::session_state::SessionStore;
use crate::utils::constants::TOKEN_HEADER;
use crate::utils::i18n::t;
use serde_json::Value;
use std::rc::Rc;

#[derive(Clone)]
pub struct ApiClient {
    config: Rc<AppConfig>,
    transport: Rc<dyn HttpTransport>,
    session: SessionStore,
    busy: BusyIndicator,
}

impl ApiClient {
    pub fn new(
        config: Rc<AppConfig>,
        transport: Rc<dyn HttpTransport>,
        session: SessionStore,
        busy: BusyIndicator,
    ) -> Self {
        Self {
            config,
            transport,
            session,
            busy,
        }
    }

    pub fn translate(&self, key: &str) -> String {
        t(key, &self.config.language)
    }

    /// Request autenticada a `/admin/<endpoint>`
    pub async fn request(&self, endpoint: &str, method: Method, body: Option<&Value>) -> Result<Value, ApiError> {
        let _busy = self.busy.hold();

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = self.session.get_token() {
            headers.push((TOKEN_HEADER.to_string(), token));
        }

        let request = HttpRequest {
            method,
            url: self.config.admin_url(endpoint),
            headers,
            body: body.map(|b| b.to_string()),
        };

        log::debug!("🌐 [API] {} {}", method.as_str(), endpoint);
        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("❌ [API] {} {}: {}", method.as_str(), endpoint, e);
            ApiError::failed(e)
        })?;

        if response.status == 401 {
            log::warn!("🔒 [API] 401 en {} {}, cerrando sesión", method.as_str(), endpoint);
            self.session.expire();
            return Err(ApiError::Unauthorized);
        }

        if !response.ok() {
            let message = self.error_message(&response);
            log::error!("❌ [API] HTTP {} en {}: {}", response.status, endpoint, message);
            return Err(ApiError::RequestFailed { message });
        }

        if method == Method::Delete || response.status == 204 || response.body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&response.body).map_err(|e| {
            log::error!("❌ [API] Parse error en {}: {}", endpoint, e);
            ApiError::failed(self.translate("resposta_invalida"))
        })
    }

    pub async fn get(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(endpoint, Method::Get, None).await
    }

    pub async fn post(&self, endpoint: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(endpoint, Method::Post, Some(body)).await
    }

    pub async fn put(&self, endpoint: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(endpoint, Method::Put, Some(body)).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.request(endpoint, Method::Delete, None).await
    }

    /// Login del gestor. Un 401 aquí son credenciales inválidas, no una sesión expirada.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let _busy = self.busy.hold();

        let payload = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let body = serde_json::to_string(&payload).map_err(|e| ApiError::failed(format!("Serialization error: {}", e)))?;
        let request = HttpRequest {
            method: Method::Post,
            url: self.config.admin_url("login"),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        };

        log::info!("🔐 [AUTH] Login para usuario: {}", username);
        let response = self.transport.send(request).await.map_err(ApiError::failed)?;

        if !response.ok() {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| self.translate("erro_login"));
            log::warn!("⚠️ [AUTH] Login rechazado (HTTP {}): {}", response.status, message);
            return Err(ApiError::RequestFailed { message });
        }

        serde_json::from_str::<LoginResponse>(&response.body)
            .map(|r| r.token)
            .map_err(|_| ApiError::failed(self.translate("erro_login")))
    }

    fn error_message(&self, response: &HttpResponse) -> String {
        match serde_json::from_str::<ErrorBody>(&response.body) {
            Ok(ErrorBody { message: Some(message) }) if !message.is_empty() => message,
            Ok(_) => self.translate("erro_desconhecido"),
            Err(_) => self.translate("falha_requisicao"),
        }
    }
}
