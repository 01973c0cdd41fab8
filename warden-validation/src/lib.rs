//! Email and URL field validation for persisted records
//!
//! Declarations are registered on a [`ValidationSet`] for one record type
//! and run whenever the host asks the set to validate a record. Failures
//! are collected on the record's [`ValidationErrors`], never returned as
//! `Err`.
//!
//! - Email declarations check presence, length, format and optional
//!   case-insensitive uniqueness.
//! - URL declarations either match a pattern, or prefix a missing scheme
//!   and check that the URL can be fetched.
//!
//! # Examples
//!
//! ## Reachability
//!
//! ```
//! use warden_validation::prelude::*;
//!
//! #[derive(Default)]
//! struct Site {
//!     id: Option<RecordId>,
//!     url: Option<String>,
//!     errors: ValidationErrors,
//! }
//!
//! impl Record for Site {
//!     fn id(&self) -> Option<RecordId> { self.id }
//!     fn attribute(&self, field: &str) -> Option<String> {
//!         (field == "url").then(|| self.url.clone()).flatten()
//!     }
//!     fn set_attribute(&mut self, field: &str, value: String) {
//!         if field == "url" { self.url = Some(value) }
//!     }
//!     fn errors(&self) -> &ValidationErrors { &self.errors }
//!     fn errors_mut(&mut self) -> &mut ValidationErrors { &mut self.errors }
//! }
//!
//! // stands in for a real HTTP client
//! let fetcher = fetcher_fn(|url: &str| {
//!     if url == "http://www.google.com" { Ok(()) } else { Err(FetchError::Status(404)) }
//! });
//!
//! let mut validations = ValidationSet::<Site>::new().with_fetcher(fetcher);
//! validations.validates_url(["url"], Options::new()).unwrap();
//!
//! let mut site = Site { url: Some("www.google.com".into()), ..Site::default() };
//! assert!(validations.validate(&mut site));
//! assert_eq!(site.url.as_deref(), Some("http://www.google.com"));
//! ```
//!
//! ## Pattern only
//!
//! ```
//! use regex::Regex;
//! use warden_validation::{ErrorKind, Options, ValidationSet};
//! # use warden_validation::{Record, RecordId, ValidationErrors};
//! # #[derive(Default)]
//! # struct Site { url: Option<String>, errors: ValidationErrors }
//! # impl Record for Site {
//! #     fn id(&self) -> Option<RecordId> { None }
//! #     fn attribute(&self, _: &str) -> Option<String> { self.url.clone() }
//! #     fn set_attribute(&mut self, _: &str, value: String) { self.url = Some(value) }
//! #     fn errors(&self) -> &ValidationErrors { &self.errors }
//! #     fn errors_mut(&mut self) -> &mut ValidationErrors { &mut self.errors }
//! # }
//!
//! let mut validations = ValidationSet::<Site>::new();
//! validations
//!     .validates_url(["url"], Options::new().pattern(Regex::new(r"(?i)^vnc").unwrap()))
//!     .unwrap();
//!
//! let mut site = Site { url: Some("www.example.com".into()), ..Site::default() };
//! assert!(!validations.validate(&mut site));
//! assert_eq!(site.errors.iter().next().unwrap().kind, ErrorKind::FormatMismatch);
//! assert_eq!(site.url.as_deref(), Some("www.example.com"));
//! ```

mod condition;
mod declaration;
mod email;
mod errors;
mod messages;
mod options;
mod reachability;
mod record;
mod store;
mod traits;
mod url;

#[cfg(test)]
mod testing;

pub use condition::*;
pub use declaration::*;
pub use email::{EMAIL_LENGTH, EMAIL_PATTERN};
pub use errors::*;
pub use messages::{BLANK_MESSAGE, EMAIL_MESSAGE, TAKEN_MESSAGE, URL_MESSAGE};
pub use options::*;
pub use reachability::*;
pub use record::*;
pub use store::*;
pub use traits::*;
pub use url::{Normalized, normalize_url};

/// Prelude for common imports.
///
/// ```
/// use warden_validation::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        DeclarationError, ErrorKind, Fetch, FetchError, MemoryStore, Operation, Options, Phase,
        Record, RecordId, UniquenessStore, ValidationError, ValidationErrors, ValidationSet,
        fetcher_fn,
    };
}
