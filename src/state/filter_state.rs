// ============================================================================
// FILTER STATE - Filtros opcionales de dashboard y chamados
// ============================================================================

use url::form_urlencoded;

pub const FILTER_DATA_INICIO: &str = "data_inicio";
pub const FILTER_DATA_FIM: &str = "data_fim";
pub const FILTER_CLIENTE: &str = "cliente_id";
pub const FILTER_ELEVADOR: &str = "elevador_id";
pub const FILTER_TECNICO: &str = "tecnico_id";

/// Restricciones dispersas; un campo vacío es un campo ausente
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub cliente_id: Option<String>,
    pub elevador_id: Option<String>,
    pub tecnico_id: Option<String>,
}

impl FilterState {
    /// Reconstruye los filtros desde los controles del formulario
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, String)>,
    {
        let mut filters = Self::default();
        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let slot = match key {
                FILTER_DATA_INICIO => &mut filters.data_inicio,
                FILTER_DATA_FIM => &mut filters.data_fim,
                FILTER_CLIENTE => &mut filters.cliente_id,
                FILTER_ELEVADOR => &mut filters.elevador_id,
                FILTER_TECNICO => &mut filters.tecnico_id,
                other => {
                    log::warn!("⚠️ [FILTERS] Filtro desconocido ignorado: {}", other);
                    continue;
                }
            };
            *slot = Some(value.to_string());
        }
        filters
    }

    /// Pares presentes, en orden estable
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            (FILTER_DATA_INICIO, &self.data_inicio),
            (FILTER_DATA_FIM, &self.data_fim),
            (FILTER_CLIENTE, &self.cliente_id),
            (FILTER_ELEVADOR, &self.elevador_id),
            (FILTER_TECNICO, &self.tecnico_id),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }

    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// `base` o `base?query` si hay algún filtro
    pub fn endpoint(&self, base: &str) -> String {
        if self.is_empty() {
            base.to_string()
        } else {
            format!("{}?{}", base, self.to_query())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_controls_are_omitted_from_query() {
        let filters = FilterState::from_pairs(vec![
            (FILTER_DATA_INICIO, "2024-01-01".to_string()),
            (FILTER_DATA_FIM, String::new()),
            (FILTER_CLIENTE, "  ".to_string()),
            (FILTER_TECNICO, "5".to_string()),
        ]);

        assert_eq!(filters.to_query(), "data_inicio=2024-01-01&tecnico_id=5");
        assert_eq!(filters.endpoint("chamados"), "chamados?data_inicio=2024-01-01&tecnico_id=5");
    }

    #[test]
    fn no_filters_means_bare_endpoint() {
        let filters = FilterState::from_pairs(vec![(FILTER_ELEVADOR, String::new())]);
        assert!(filters.is_empty());
        assert_eq!(filters.endpoint("dashboard/stats"), "dashboard/stats");
    }
}
