/// Errores de la capa HTTP tal y como los ve el resto de la consola
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401: token ausente, inválido o expirado. La sesión ya se ha cerrado.
    Unauthorized,
    /// Cualquier otro fallo (HTTP no-2xx, red, parseo)
    RequestFailed { message: String },
}

impl ApiError {
    pub fn failed(message: impl Into<String>) -> Self {
        ApiError::RequestFailed { message: message.into() }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "Unauthorized"),
            ApiError::RequestFailed { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ApiError {}
