use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Agregados de `GET dashboard/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_chamados: i64,
    #[serde(default)]
    pub total_tecnicos: i64,
    #[serde(default)]
    pub total_elevadores: i64,
    #[serde(default)]
    pub chamados_por_status: Distribution,
    #[serde(default)]
    pub chamados_por_tecnico: Distribution,
    #[serde(default)]
    pub chamados_por_mes: Vec<MonthlyTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub mes: String,
    pub total: i64,
}

/// Objeto `{categoría: total}` en el orden en que lo envía el backend
/// (los colores del gráfico de estado se asignan por posición)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Distribution(pub Vec<(String, i64)>);

impl Distribution {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, i64)> {
        self.0.iter()
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, total) in &self.0 {
            map.serialize_entry(category, total)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Distribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DistributionVisitor;

        impl<'de> Visitor<'de> for DistributionVisitor {
            type Value = Distribution;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("un objeto {categoría: total}")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((category, total)) = access.next_entry::<String, i64>()? {
                    entries.push((category, total));
                }
                Ok(Distribution(entries))
            }
        }

        deserializer.deserialize_map(DistributionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn distribution_keeps_backend_order() {
        let stats: DashboardStats = serde_json::from_value(json!({
            "chamados_por_status": {"finalizado": 8, "aberto": 4, "atribuido": 2}
        }))
        .unwrap();

        let labels: Vec<&str> = stats.chamados_por_status.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(labels, vec!["finalizado", "aberto", "atribuido"]);
        assert!(stats.chamados_por_tecnico.is_empty());
    }
}
