// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> / Cell
// ============================================================================

pub mod session_state;
pub mod filter_state;
pub mod view_state;
pub mod app_state;

pub use session_state::{SessionEnd, SessionStore};
pub use filter_state::FilterState;
pub use view_state::{LoadTicket, ViewState};
pub use app_state::AppContext;
