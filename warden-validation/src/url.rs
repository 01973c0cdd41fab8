// URL field validator

use crate::messages::BLANK_MESSAGE;
use crate::record::is_blank;
use crate::{
    Conditions, ErrorKind, Fetch, FieldDeclaration, FieldValidator, Record, ValidationError,
};
use regex::Regex;
use std::sync::Arc;

const SCHEMES: [&str; 3] = ["http://", "https://", "ftp://"];

/// Result of [`normalize_url`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub value: String,
    /// Whether a scheme had to be added
    pub mutated: bool,
}

/// Prefix `http://` unless the value already starts with `http://`,
/// `https://` or `ftp://` (compared case-insensitively).
///
/// Applying it twice gives the same result as applying it once.
///
/// ```
/// use warden_validation::normalize_url;
///
/// assert_eq!(normalize_url("www.google.com").value, "http://www.google.com");
/// assert!(!normalize_url("HTTPS://example.com").mutated);
/// ```
pub fn normalize_url(value: &str) -> Normalized {
    let has_scheme = SCHEMES.iter().any(|scheme| {
        value
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });

    if has_scheme {
        Normalized {
            value: value.to_string(),
            mutated: false,
        }
    } else {
        Normalized {
            value: format!("http://{value}"),
            mutated: true,
        }
    }
}

/// How a URL declaration decides validity
pub(crate) enum UrlMode {
    /// Match only. The stored value is never touched.
    Pattern(Regex),
    /// Normalize, write back, then fetch once
    Reachability(Arc<dyn Fetch>),
}

pub(crate) struct UrlValidator<R> {
    declaration: FieldDeclaration<R>,
    mode: UrlMode,
}

impl<R> UrlValidator<R> {
    pub(crate) fn new(declaration: FieldDeclaration<R>, mode: UrlMode) -> Self {
        Self { declaration, mode }
    }

    fn check_reachable(&self, record: &mut R, field: &str, value: &str, fetcher: &dyn Fetch)
    where
        R: Record,
    {
        let normalized = normalize_url(value);
        if normalized.mutated {
            tracing::debug!(field, url = %normalized.value, "added missing url scheme");
            record.set_attribute(field, normalized.value.clone());
        }

        match fetcher.fetch(&normalized.value) {
            Ok(()) => tracing::trace!(field, url = %normalized.value, "url reachable"),
            Err(error) => {
                tracing::warn!(field, url = %normalized.value, %error, "url unreachable");
                record.errors_mut().add(
                    ValidationError::new(
                        field,
                        ErrorKind::Unreachable,
                        self.declaration.config().message(),
                    )
                    .with_value(normalized.value),
                );
            }
        }
    }
}

impl<R: Record> FieldValidator<R> for UrlValidator<R> {
    fn fields(&self) -> &[String] {
        self.declaration.fields()
    }

    fn conditions(&self) -> &Conditions<R> {
        self.declaration.config().conditions()
    }

    fn validate_field(&self, record: &mut R, field: &str) {
        let config = self.declaration.config();
        let value = record.attribute(field);

        // blank values are never rewritten or fetched
        if is_blank(value.as_deref()) {
            if config.requires_presence() {
                record.errors_mut().add(ValidationError::new(
                    field,
                    ErrorKind::PresenceMissing,
                    BLANK_MESSAGE,
                ));
            }
            return;
        }
        let value = value.unwrap_or_default();

        match &self.mode {
            UrlMode::Pattern(pattern) => {
                if !pattern.is_match(&value) {
                    record.errors_mut().add(
                        ValidationError::new(field, ErrorKind::FormatMismatch, config.message())
                            .with_value(value),
                    );
                }
            }
            UrlMode::Reachability(fetcher) => {
                self.check_reachable(record, field, &value, fetcher.as_ref())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Account;
    use crate::{Defaults, FetchError, Options, ValidationConfig, fetcher_fn};
    use std::sync::Mutex;

    fn recording_fetcher(
        reachable: &'static [&'static str],
    ) -> (Arc<Mutex<Vec<String>>>, Arc<dyn Fetch>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let fetcher = fetcher_fn(move |url: &str| {
            log.lock().unwrap().push(url.to_string());
            if reachable.iter().any(|r| *r == url) {
                Ok(())
            } else {
                Err(FetchError::Connection(format!("cannot open {url}")))
            }
        });
        (seen, Arc::new(fetcher))
    }

    fn validator(options: Options<Account>, mode: UrlMode) -> UrlValidator<Account> {
        let config = ValidationConfig::resolve(Defaults::url(), options);
        let declaration = FieldDeclaration::new(["home_page"], config).unwrap();
        UrlValidator::new(declaration, mode)
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(
            normalize_url("www.google.com"),
            Normalized {
                value: "http://www.google.com".into(),
                mutated: true,
            }
        );
        assert!(!normalize_url("http://www.google.com").mutated);
        assert!(!normalize_url("ftp://files.example.com").mutated);
        assert!(!normalize_url("HtTpS://example.com").mutated);
        assert_eq!(normalize_url("httpfoo.com").value, "http://httpfoo.com");
        assert_eq!(normalize_url("ftp.example.com").value, "http://ftp.example.com");
        assert_eq!(normalize_url("é").value, "http://é");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["www.google.com", "https://x.org", "ftp:/broken", ""] {
            let once = normalize_url(input).value;
            let twice = normalize_url(&once);
            assert_eq!(twice.value, once);
            assert!(!twice.mutated);
        }
    }

    #[test]
    fn test_reachable_url_is_rewritten() {
        let (seen, fetcher) = recording_fetcher(&["http://www.google.com"]);
        let mut account = Account::with_home_page("www.google.com");

        validator(Options::new(), UrlMode::Reachability(fetcher)).run(&mut account);

        assert!(account.errors.is_empty());
        assert_eq!(account.home_page.as_deref(), Some("http://www.google.com"));
        assert_eq!(*seen.lock().unwrap(), vec!["http://www.google.com"]);
    }

    #[test]
    fn test_unreachable_url_records_message() {
        let (seen, fetcher) = recording_fetcher(&[]);
        let mut account = Account::with_home_page("nonexistent.invalid");

        validator(Options::new().message("cannot be opened"), UrlMode::Reachability(fetcher))
            .run(&mut account);

        let errors = account.errors.for_field("home_page");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Unreachable);
        assert_eq!(errors[0].message, "cannot be opened");
        assert_eq!(account.home_page.as_deref(), Some("http://nonexistent.invalid"));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_pattern_mode_never_fetches_or_rewrites() {
        let pattern = Regex::new(r"(?i)^vnc").unwrap();
        let (seen, _) = recording_fetcher(&[]);
        let check = validator(
            Options::new().pattern(pattern.clone()),
            UrlMode::Pattern(pattern),
        );

        let mut vnc = Account::with_home_page("VNC://example.com:5900");
        check.run(&mut vnc);
        assert!(vnc.errors.is_empty());
        assert_eq!(vnc.home_page.as_deref(), Some("VNC://example.com:5900"));

        let mut web = Account::with_home_page("www.example.com");
        check.run(&mut web);
        assert_eq!(web.errors.of_kind(ErrorKind::FormatMismatch).len(), 1);
        assert_eq!(web.home_page.as_deref(), Some("www.example.com"));

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_blank_value_is_not_fetched() {
        let (seen, fetcher) = recording_fetcher(&[]);
        let check = validator(Options::new(), UrlMode::Reachability(fetcher));

        let mut empty = Account::with_home_page("   ");
        check.run(&mut empty);
        assert_eq!(empty.errors.of_kind(ErrorKind::PresenceMissing).len(), 1);
        assert_eq!(empty.errors.len(), 1);
        assert_eq!(empty.home_page.as_deref(), Some("   "));

        let mut nil = Account::default();
        check.run(&mut nil);
        assert_eq!(nil.errors.of_kind(ErrorKind::PresenceMissing).len(), 1);

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_exempt_blank_value_records_nothing() {
        let (seen, fetcher) = recording_fetcher(&[]);
        let mut account = Account::with_home_page("");

        validator(Options::new().allow_blank(true), UrlMode::Reachability(fetcher))
            .run(&mut account);

        assert!(account.errors.is_empty());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_gate_prevents_rewrite() {
        let (seen, fetcher) = recording_fetcher(&[]);
        let mut account = Account::with_home_page("www.google.com");

        validator(
            Options::new().unless(|a: &Account| a.id.is_none()),
            UrlMode::Reachability(fetcher),
        )
        .run(&mut account);

        assert_eq!(account.home_page.as_deref(), Some("www.google.com"));
        assert!(account.errors.is_empty());
        assert!(seen.lock().unwrap().is_empty());
    }
}
