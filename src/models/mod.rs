pub mod auth;
pub mod entity;
pub mod cliente;
pub mod elevador;
pub mod tecnico;
pub mod chamado;
pub mod dashboard;

pub use auth::{ErrorBody, LoginRequest, LoginResponse};
pub use entity::{Collection, EntityKind};
pub use cliente::Cliente;
pub use elevador::Elevador;
pub use tecnico::{Tecnico, TecnicoStatusUpdate};
pub use chamado::{AssignmentRequest, Chamado};
pub use dashboard::{DashboardStats, Distribution, MonthlyTotal};
