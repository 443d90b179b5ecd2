// SWIFT Code Directory - Core Library
// Exposes the directory core, store and importer for the CLI, API server and tests

pub mod error;
pub mod validator;
pub mod hierarchy;
pub mod models;
pub mod store;
pub mod views;
pub mod service;
pub mod import;
pub mod config;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use error::{DirectoryError, DirectoryResult, FormatError};
pub use validator::{validate_country_code, validate_swift_code};
pub use hierarchy::{family_key_of, find_branches, is_headquarter_code};
pub use models::{Country, NewSwiftEntry, SwiftEntry};
pub use store::{setup_database, SqliteStore, SwiftStore};
pub use views::{
    BranchView, CodeDetails, CountryView, HeadquarterView, SwiftCodeRequest, SwiftCodeView,
};
pub use service::DirectoryService;
pub use import::{import_csv, import_rows, load_csv, ImportReport, ImportRow};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the fmt subscriber used by both binaries (`RUST_LOG` overrides `info`)
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}
