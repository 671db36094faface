use serde::{Deserialize, Serialize};

/// Elevador instalado; referencia a su cliente por `cliente_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Elevador {
    pub id: i64,
    pub codigo_qr: String,
    pub endereco: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub cliente_id: Option<i64>,
    /// Copia del nombre hecha por el backend; puede quedar desfasada
    #[serde(default)]
    pub cliente_nome: Option<String>,
}

impl Elevador {
    /// Nombre del cliente por join con `clientes`; la copia del listado solo si el id no aparece
    pub fn cliente_label<'a>(&'a self, clientes: &'a [crate::models::Cliente]) -> &'a str {
        self.cliente_id
            .and_then(|id| clientes.iter().find(|c| c.id == id))
            .map(|c| c.nome.as_str())
            .or(self.cliente_nome.as_deref())
            .unwrap_or("-")
    }
}
