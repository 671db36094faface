pub mod error;
pub mod transport;
pub mod token_store;
pub mod notifier;
pub mod api_client;
pub mod cache_service;
pub mod charts;

pub use error::ApiError;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method};
pub use token_store::{MemoryTokenStore, TokenStore};
pub use notifier::{BusyIndicator, Notifier, ToastKind};
pub use api_client::ApiClient;
pub use cache_service::{CacheEntries, CachedCollection, EntityCache};
pub use charts::{ChartHandle, ChartKind, ChartRegistry, ChartRenderer, ChartSpec, Dataset};
