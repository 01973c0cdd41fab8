// Host record boundary

use crate::ValidationErrors;

/// Primary key of a persisted record
pub type RecordId = i64;

/// A record whose fields can be validated.
///
/// Implemented by the host model. Attribute storage and dirty tracking stay
/// with the host; validators only read and write string attributes through
/// this trait and report failures into [`ValidationErrors`].
///
/// # Examples
///
/// ```
/// use warden_validation::{Record, RecordId, ValidationErrors};
///
/// #[derive(Default)]
/// struct User {
///     id: Option<RecordId>,
///     email: Option<String>,
///     errors: ValidationErrors,
/// }
///
/// impl Record for User {
///     fn id(&self) -> Option<RecordId> {
///         self.id
///     }
///
///     fn attribute(&self, field: &str) -> Option<String> {
///         match field {
///             "email" => self.email.clone(),
///             _ => None,
///         }
///     }
///
///     fn set_attribute(&mut self, field: &str, value: String) {
///         if field == "email" {
///             self.email = Some(value);
///         }
///     }
///
///     fn errors(&self) -> &ValidationErrors {
///         &self.errors
///     }
///
///     fn errors_mut(&mut self) -> &mut ValidationErrors {
///         &mut self.errors
///     }
/// }
/// ```
pub trait Record {
    /// Identity of the record, `None` until it has been persisted
    fn id(&self) -> Option<RecordId>;

    /// Current value of a field, `None` when nil or unknown
    fn attribute(&self, field: &str) -> Option<String>;

    /// Overwrite the stored value of a field
    fn set_attribute(&mut self, field: &str, value: String);

    /// The record's error collection
    fn errors(&self) -> &ValidationErrors;

    /// Mutable access to the record's error collection
    fn errors_mut(&mut self) -> &mut ValidationErrors;

    /// Whether the record has not been persisted yet
    fn is_new_record(&self) -> bool {
        self.id().is_none()
    }
}

/// A nil value, or one made only of whitespace
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some(" \t\n")));
        assert!(!is_blank(Some("a")));
    }
}
