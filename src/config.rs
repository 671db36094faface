use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_url: String,
    pub token_storage_key: String,
    pub language: String,
    pub toast_duration_ms: u32,
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "https://upline01.onrender.com".to_string(),
            token_storage_key: "upline_token".to_string(),
            language: "PT".to_string(),
            toast_duration_ms: 3000,
            enable_logging: true,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: option_env!("API_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            token_storage_key: option_env!("TOKEN_STORAGE_KEY")
                .map(|s| s.to_string())
                .unwrap_or(defaults.token_storage_key),
            language: option_env!("LANGUAGE")
                .map(|s| s.to_uppercase())
                .unwrap_or(defaults.language),
            toast_duration_ms: option_env!("TOAST_DURATION_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.toast_duration_ms),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.enable_logging),
        }
    }

    /// URL completa de un endpoint de administración (`/admin/<endpoint>`)
    pub fn admin_url(&self, endpoint: &str) -> String {
        format!("{}/admin/{}", self.api_url, endpoint.trim_start_matches('/'))
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
