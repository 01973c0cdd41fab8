// Email field validator

use crate::messages::{BLANK_MESSAGE, TAKEN_MESSAGE, too_long, too_short};
use crate::record::is_blank;
use crate::{
    Conditions, ErrorKind, FieldDeclaration, FieldValidator, Record, UniquenessStore,
    ValidationError,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Built-in address pattern, case-insensitive and anchored.
///
/// The local part takes the characters seen in practice rather than
/// everything RFC 2822 allows. The top-level segment is a two-letter
/// country code or one of a fixed list of generic domains.
pub static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\A[A-Z0-9_.%+\-]+@(?:[A-Z0-9\-]+\.)+(?:[A-Z]{2}|com|org|net|gov|mil|biz|info|mobi|name|aero|jobs|museum)\z",
    )
    .unwrap()
});

/// Accepted address length in characters. `a@b.co` is the shortest
/// plausible address.
pub const EMAIL_LENGTH: RangeInclusive<usize> = 6..=100;

pub(crate) struct EmailValidator<R> {
    declaration: FieldDeclaration<R>,
    pattern: Regex,
    store: Option<Arc<dyn UniquenessStore>>,
}

impl<R> EmailValidator<R> {
    /// `store` is consulted only when the declaration asks for uniqueness
    pub(crate) fn new(
        declaration: FieldDeclaration<R>,
        store: Option<Arc<dyn UniquenessStore>>,
    ) -> Self {
        let pattern = declaration
            .config()
            .pattern()
            .cloned()
            .unwrap_or_else(|| EMAIL_PATTERN.clone());
        let store = store.filter(|_| declaration.config().uniqueness());

        Self {
            declaration,
            pattern,
            store,
        }
    }
}

impl<R: Record> FieldValidator<R> for EmailValidator<R> {
    fn fields(&self) -> &[String] {
        self.declaration.fields()
    }

    fn conditions(&self) -> &Conditions<R> {
        self.declaration.config().conditions()
    }

    fn validate_field(&self, record: &mut R, field: &str) {
        let config = self.declaration.config();
        let value = record.attribute(field);
        let value = value.as_deref();

        if config.requires_presence() && is_blank(value) {
            record.errors_mut().add(ValidationError::new(
                field,
                ErrorKind::PresenceMissing,
                BLANK_MESSAGE,
            ));
        }

        if config.exempts(value) {
            tracing::trace!(field, "email value exempt");
            return;
        }

        let text = value.unwrap_or_default();
        let length = text.chars().count();

        if length < *EMAIL_LENGTH.start() {
            record.errors_mut().add(
                ValidationError::new(
                    field,
                    ErrorKind::LengthOutOfBounds,
                    too_short(*EMAIL_LENGTH.start()),
                )
                .with_value(text),
            );
        } else if length > *EMAIL_LENGTH.end() {
            record.errors_mut().add(
                ValidationError::new(
                    field,
                    ErrorKind::LengthOutOfBounds,
                    too_long(*EMAIL_LENGTH.end()),
                )
                .with_value(text),
            );
        }

        if let (Some(store), Some(value)) = (&self.store, value) {
            let taken = store.count_where(field, value, true, record.id());
            if taken > 0 {
                tracing::debug!(field, taken, "email already in use");
                record.errors_mut().add(
                    ValidationError::new(field, ErrorKind::NotUnique, TAKEN_MESSAGE)
                        .with_value(value),
                );
            }
        }

        if !self.pattern.is_match(text) {
            record.errors_mut().add(
                ValidationError::new(field, ErrorKind::FormatMismatch, config.message())
                    .with_value(text),
            );
        }
    }
}
