// Receipt Processor - Core Library
// Exposes all modules for use in the CLI, API server, and tests

pub mod config;
pub mod points;
pub mod receipt;
pub mod store;
pub mod validation;

// Only compile the HTTP layer when the server feature is enabled
#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use config::ServerConfig;
pub use points::{breakdown, calculate, PointsBreakdown, Rule, RuleScore};
pub use receipt::{parse_amount, parse_non_negative_amount, Item, Receipt};
pub use store::{InMemoryStore, ReceiptStore, ScoreRecord, StoreError};
pub use validation::{is_valid, validate, ValidationError, ValidationResult};

#[cfg(feature = "server")]
pub use server::{
    create_router, serve, ApiError, ApiResult, AppState, ErrorResponse, PointsResponse,
    ProcessResponse,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
