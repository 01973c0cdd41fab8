// Warden - email and URL validation for persisted records
//
// Re-exports the validation pipeline plus the optional client, logging and
// configuration crates behind feature flags.

// Re-export core functionality
pub use warden_validation::*;

// Re-export optional crates
#[cfg(feature = "http-client")]
pub use warden_http_client;

#[cfg(feature = "config")]
pub use warden_config;

#[cfg(feature = "log")]
pub use warden_log;

#[cfg(feature = "config")]
mod settings;

#[cfg(feature = "config")]
pub use settings::{HttpSettings, LogSettings, Settings};

// Prelude for common imports
pub mod prelude {
    pub use warden_validation::prelude::*;

    #[cfg(feature = "http-client")]
    pub use warden_http_client::{HttpClient, HttpClientConfig};

    #[cfg(feature = "config")]
    pub use crate::settings::Settings;
}
