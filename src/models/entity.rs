// ============================================================================
// ENTITY KINDS - Colecciones y tipos de entidad administrables
// ============================================================================

/// Colecciones de referencia que se cachean por sesión
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Clientes,
    Elevadores,
    Tecnicos,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Clientes, Collection::Elevadores, Collection::Tecnicos];

    /// Endpoint de listado (`GET /admin/<endpoint>`)
    pub fn endpoint(self) -> &'static str {
        match self {
            Collection::Clientes => "clientes",
            Collection::Elevadores => "elevadores",
            Collection::Tecnicos => "tecnicos",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Entidades con formulario de alta/edición y borrado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Cliente,
    Elevador,
    Tecnico,
}

impl EntityKind {
    /// Endpoint singular (`PUT/DELETE /admin/<singular>/<id>`)
    pub fn singular_endpoint(self) -> &'static str {
        match self {
            EntityKind::Cliente => "cliente",
            EntityKind::Elevador => "elevador",
            EntityKind::Tecnico => "tecnico",
        }
    }

    pub fn collection(self) -> Collection {
        match self {
            EntityKind::Cliente => Collection::Clientes,
            EntityKind::Elevador => Collection::Elevadores,
            EntityKind::Tecnico => Collection::Tecnicos,
        }
    }

    pub fn item_endpoint(self, id: i64) -> String {
        format!("{}/{}", self.singular_endpoint(), id)
    }

    /// Campos checkbox que se transmiten como booleano explícito
    pub fn checkbox_fields(self) -> &'static [&'static str] {
        match self {
            EntityKind::Cliente => &["possui_contrato"],
            EntityKind::Elevador => &[],
            EntityKind::Tecnico => &[],
        }
    }
}
