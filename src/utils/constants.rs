/// Superficies (canvas) de los gráficos del dashboard
pub const STATUS_CHART_ID: &str = "statusChart";
pub const TECNICO_CHART_ID: &str = "tecnicoChart";
pub const MES_CHART_ID: &str = "mesChart";

/// Colores de los datasets (mismos que la hoja de estilos del panel)
pub const STATUS_CHART_COLORS: [&str; 4] = ["#f59e0b", "#22c55e", "#ef4444", "#6b7280"];
pub const TECNICO_CHART_COLOR: &str = "#38bdf8";
pub const MES_CHART_BORDER: &str = "#0ea5e9";
pub const MES_CHART_FILL: &str = "rgba(14, 165, 233, 0.1)";

/// Cabecera que transporta el token de sesión
pub const TOKEN_HEADER: &str = "x-access-token";
