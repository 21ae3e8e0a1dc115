mod auth;
mod table;

pub use auth::TokenManager;
pub use table::FeatureTableManager;
pub use table::TableError;
