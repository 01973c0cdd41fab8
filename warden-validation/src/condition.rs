// Conditional gate

use std::fmt;
use std::sync::Arc;

/// A pure check over a record, evaluated fresh on every validation attempt
pub type Predicate<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// The `when` / `unless` predicates of one declaration.
///
/// A declaration runs only when every `when` predicate holds and no
/// `unless` predicate does. The gate is evaluated once per record, before
/// any of the declaration's fields are looked at.
///
/// # Examples
///
/// ```
/// use warden_validation::Conditions;
///
/// struct Signup {
///     step: u8,
/// }
///
/// let gate = Conditions::new()
///     .when(|s: &Signup| s.step > 2)
///     .unless(|s: &Signup| s.step == 5);
///
/// assert!(!gate.permits(&Signup { step: 1 }));
/// assert!(gate.permits(&Signup { step: 3 }));
/// assert!(!gate.permits(&Signup { step: 5 }));
/// ```
pub struct Conditions<R> {
    when: Vec<Predicate<R>>,
    unless: Vec<Predicate<R>>,
}

impl<R> Conditions<R> {
    /// A gate with no predicates, which always permits
    pub fn new() -> Self {
        Self {
            when: Vec::new(),
            unless: Vec::new(),
        }
    }

    /// Require `predicate` to hold
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.when.push(Arc::new(predicate));
        self
    }

    /// Skip when `predicate` holds
    pub fn unless<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.unless.push(Arc::new(predicate));
        self
    }

    /// Whether validation should run for `record`
    pub fn permits(&self, record: &R) -> bool {
        self.when.iter().all(|p| p(record)) && !self.unless.iter().any(|p| p(record))
    }

    /// True when no predicate has been registered
    pub fn is_empty(&self) -> bool {
        self.when.is_empty() && self.unless.is_empty()
    }
}

impl<R> Default for Conditions<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for Conditions<R> {
    fn clone(&self) -> Self {
        Self {
            when: self.when.clone(),
            unless: self.unless.clone(),
        }
    }
}

impl<R> fmt::Debug for Conditions<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conditions")
            .field("when", &self.when.len())
            .field("unless", &self.unless.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Page {
        url: String,
    }

    #[test]
    fn test_empty_gate_permits() {
        let gate: Conditions<Page> = Conditions::new();
        assert!(gate.is_empty());
        assert!(gate.permits(&Page { url: String::new() }));
    }

    #[test]
    fn test_every_when_must_hold() {
        let gate = Conditions::new()
            .when(|p: &Page| p.url.starts_with("http"))
            .when(|p: &Page| p.url.len() > 10);

        assert!(gate.permits(&Page { url: "http://example.com".into() }));
        assert!(!gate.permits(&Page { url: "http://a".into() }));
        assert!(!gate.permits(&Page { url: "ftp://example.com".into() }));
    }

    #[test]
    fn test_any_unless_skips() {
        let gate = Conditions::new()
            .unless(|p: &Page| p.url.is_empty())
            .unless(|p: &Page| p.url.len() < 20);

        assert!(!gate.permits(&Page { url: String::new() }));
        assert!(!gate.permits(&Page { url: "short.example".into() }));
        assert!(gate.permits(&Page { url: "http://long.example.com/path".into() }));
    }
}
