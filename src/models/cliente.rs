use serde::{Deserialize, Serialize};

/// Cliente (empresa con contrato de mantenimiento)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cliente {
    pub id: i64,
    pub nome: String,
    #[serde(default)]
    pub possui_contrato: bool,
}
