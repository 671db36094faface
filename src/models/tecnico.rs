use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tecnico {
    pub id: i64,
    pub nome: String,
    pub username: String,
    /// De plantão (on-duty)
    #[serde(default)]
    pub de_plantao: bool,
}

/// Cuerpo de `PUT tecnico/<id>/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TecnicoStatusUpdate {
    pub de_plantao: bool,
}
