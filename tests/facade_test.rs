//! Declaring and running validations through the facade crate

use regex::Regex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use warden::prelude::*;

#[derive(Debug, Default)]
struct Contact {
    id: Option<RecordId>,
    email: Option<String>,
    remote_desktop: Option<String>,
    homepage: Option<String>,
    errors: ValidationErrors,
}

impl Record for Contact {
    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn attribute(&self, field: &str) -> Option<String> {
        match field {
            "email" => self.email.clone(),
            "remote_desktop" => self.remote_desktop.clone(),
            "homepage" => self.homepage.clone(),
            _ => None,
        }
    }

    fn set_attribute(&mut self, field: &str, value: String) {
        match field {
            "email" => self.email = Some(value),
            "remote_desktop" => self.remote_desktop = Some(value),
            "homepage" => self.homepage = Some(value),
            _ => {}
        }
    }

    fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    fn errors_mut(&mut self) -> &mut ValidationErrors {
        &mut self.errors
    }
}

fn contact_validations(calls: Arc<AtomicUsize>) -> ValidationSet<Contact> {
    let fetcher = fetcher_fn(move |_: &str| {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(FetchError::Timeout)
    });

    let mut validations = ValidationSet::new()
        .with_store(Arc::new(MemoryStore::new()))
        .with_fetcher(fetcher);
    validations
        .validates_email(["email"], Options::new().uniqueness(true))
        .unwrap()
        .validates_url(
            ["remote_desktop"],
            Options::new()
                .pattern(Regex::new(r"(?i)^vnc").unwrap())
                .message("must be a vnc address"),
        )
        .unwrap()
        .validates_url(["homepage"], Options::new().allow_blank(true))
        .unwrap();
    validations
}

#[test]
fn test_valid_contact() {
    let calls = Arc::new(AtomicUsize::new(0));
    let validations = contact_validations(calls.clone());

    let mut contact = Contact {
        email: Some("ops@example.org".into()),
        remote_desktop: Some("VNC://desk.example.org".into()),
        ..Contact::default()
    };
    assert!(validations.validate(&mut contact));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_every_failure_is_recorded() {
    let calls = Arc::new(AtomicUsize::new(0));
    let validations = contact_validations(calls.clone());

    let mut contact = Contact {
        email: Some("ops".into()),
        remote_desktop: Some("http://desk.example.org".into()),
        homepage: Some("slow.example.org".into()),
        ..Contact::default()
    };
    assert!(!validations.validate(&mut contact));

    assert_eq!(
        contact.errors.full_messages(),
        vec![
            "Email is too short (minimum is 6 characters)",
            "Email should look like an email address.",
            "Remote desktop must be a vnc address",
            "Homepage should be a valid url.",
        ]
    );
    assert_eq!(contact.homepage.as_deref(), Some("http://slow.example.org"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
