// ============================================================================
// ROUTER - Fragmento de URL → sección
// ============================================================================

use crate::models::EntityKind;
use crate::state::app_state::AppContext;
use crate::viewmodels;

/// Secciones navegables del panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Dashboard,
    Chamados,
    Clientes,
    Elevadores,
    Tecnicos,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Dashboard,
        Section::Chamados,
        Section::Clientes,
        Section::Elevadores,
        Section::Tecnicos,
    ];

    /// `#clientes` → Clientes; vacío → Dashboard; desconocido → None
    pub fn from_fragment(fragment: &str) -> Option<Section> {
        let name = fragment.trim_start_matches('#');
        if name.is_empty() {
            return Some(Section::Dashboard);
        }
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Chamados => "chamados",
            Section::Clientes => "clientes",
            Section::Elevadores => "elevadores",
            Section::Tecnicos => "tecnicos",
        }
    }

    pub fn fragment(self) -> String {
        format!("#{}", self.name())
    }

    /// Id de la plantilla de la sección
    pub fn template_id(self) -> String {
        format!("{}-template", self.name())
    }

    pub fn title_key(self) -> &'static str {
        match self {
            Section::Dashboard => "titulo_dashboard",
            Section::Chamados => "titulo_chamados",
            Section::Clientes => "titulo_clientes",
            Section::Elevadores => "titulo_elevadores",
            Section::Tecnicos => "titulo_tecnicos",
        }
    }

    /// Entidad administrable de la sección (las que tienen formulario)
    pub fn entity_kind(self) -> Option<EntityKind> {
        match self {
            Section::Clientes => Some(EntityKind::Cliente),
            Section::Elevadores => Some(EntityKind::Elevador),
            Section::Tecnicos => Some(EntityKind::Tecnico),
            Section::Dashboard | Section::Chamados => None,
        }
    }

    pub fn for_entity(kind: EntityKind) -> Section {
        match kind {
            EntityKind::Cliente => Section::Clientes,
            EntityKind::Elevador => Section::Elevadores,
            EntityKind::Tecnico => Section::Tecnicos,
        }
    }
}

/// Transición a la sección indicada por el fragmento
pub async fn navigate(ctx: &AppContext, fragment: &str) {
    let section = Section::from_fragment(fragment);
    log::info!("🧭 [ROUTER] Navegando a {:?} ({})", section, fragment);

    // Los gráficos de la vista anterior no sobreviven a la transición
    ctx.charts.destroy_all();
    ctx.view.close_form();
    ctx.view.enter_section(section);
    ctx.surface.highlight_nav(section);

    let Some(section) = section else {
        let name = fragment.trim_start_matches('#');
        ctx.surface.set_page_title(&capitalize(name));
        ctx.surface.show_section_not_found(&ctx.t("seccao_nao_encontrada"));
        return;
    };

    ctx.surface.set_page_title(&ctx.t(section.title_key()));
    if !ctx.surface.mount_section(section) {
        log::warn!("⚠️ [ROUTER] Plantilla {} no encontrada", section.template_id());
        ctx.view.enter_section(None);
        ctx.surface.show_section_not_found(&ctx.t("seccao_nao_encontrada"));
        return;
    }

    viewmodels::load_section(ctx, section).await;
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestHarness;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn fragments_map_to_sections() {
        assert_eq!(Section::from_fragment(""), Some(Section::Dashboard));
        assert_eq!(Section::from_fragment("#"), Some(Section::Dashboard));
        assert_eq!(Section::from_fragment("#tecnicos"), Some(Section::Tecnicos));
        assert_eq!(Section::from_fragment("#relatorios"), None);
    }

    #[test]
    fn unknown_section_shows_placeholder_without_loading() {
        let harness = TestHarness::logged_in();

        block_on(navigate(&harness.ctx, "#relatorios"));

        assert_eq!(harness.surface.not_found_messages(), vec!["Secção não encontrada.".to_string()]);
        assert_eq!(harness.surface.page_titles(), vec!["Relatorios".to_string()]);
        assert!(harness.transport.calls().is_empty());
        assert_eq!(harness.ctx.view.current_section(), None);
    }

    #[test]
    fn missing_template_is_not_found() {
        let harness = TestHarness::logged_in();
        harness.surface.remove_template(Section::Clientes);

        block_on(navigate(&harness.ctx, "#clientes"));

        assert_eq!(harness.surface.not_found_messages().len(), 1);
        assert!(harness.transport.calls().is_empty());
    }

    #[test]
    fn clientes_to_elevadores_destroys_charts_without_failing() {
        let harness = TestHarness::logged_in();
        harness.transport.respond_json("GET", "clientes", json!([{"id": 1, "nome": "Ana"}]));
        harness.transport.respond_json("GET", "elevadores", json!([]));

        block_on(navigate(&harness.ctx, "#clientes"));
        block_on(navigate(&harness.ctx, "#elevadores"));

        assert!(harness.ctx.charts.is_empty());
        assert!(harness.charts.destroyed().is_empty());
        assert_eq!(harness.ctx.view.current_section(), Some(Section::Elevadores));
        assert_eq!(harness.surface.highlighted(), Some(Section::Elevadores));
        assert_eq!(harness.surface.page_titles().last().map(String::as_str), Some("Elevadores"));
    }

    #[test]
    fn leaving_dashboard_destroys_its_charts() {
        let harness = TestHarness::logged_in();
        harness.transport.respond_json("GET", "dashboard/stats", json!({"total_chamados": 0}));
        harness.transport.respond_json("GET", "clientes", json!([]));
        harness.transport.respond_json("GET", "elevadores", json!([]));
        harness.transport.respond_json("GET", "tecnicos", json!([]));

        block_on(navigate(&harness.ctx, "#dashboard"));
        assert_eq!(harness.ctx.charts.len(), 3);

        block_on(navigate(&harness.ctx, "#clientes"));

        assert!(harness.ctx.charts.is_empty());
        assert_eq!(harness.charts.destroyed().len(), 3);
    }
}
