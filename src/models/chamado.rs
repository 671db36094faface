use serde::{Deserialize, Serialize};

/// Estados conocidos de un chamado
pub const STATUS_ABERTO: &str = "aberto";
pub const STATUS_ATRIBUIDO: &str = "atribuido";
pub const STATUS_FINALIZADO: &str = "finalizado";

/// Chamado (ticket de servicio)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chamado {
    pub id_chamado: i64,
    pub status: String,
    #[serde(default)]
    pub endereco: String,
    #[serde(default)]
    pub tecnico_responsavel: Option<String>,
    #[serde(default)]
    pub data_abertura: String,
}

impl Chamado {
    /// Un chamado abierto todavía no tiene técnico y admite asignación manual
    pub fn is_open(&self) -> bool {
        self.status == STATUS_ABERTO
    }
}

/// Cuerpo de `POST chamado/<id>/atribuir`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRequest {
    pub tecnico_id: i64,
}
