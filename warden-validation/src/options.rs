// Declaration options and their resolution

use crate::condition::Conditions;
use crate::email::EMAIL_PATTERN;
use crate::messages::{EMAIL_MESSAGE, URL_MESSAGE};
use crate::record::is_blank;
use regex::Regex;
use std::fmt;

/// Lifecycle phase a declaration is active in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Only when the record is first persisted
    Create,
    /// Only when an already persisted record is saved again
    Update,
    /// On every save
    #[default]
    Save,
}

/// The persistence operation a checkpoint belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Update,
}

impl Phase {
    /// Whether a declaration in this phase runs for `operation`
    pub fn applies_to(self, operation: Operation) -> bool {
        match self {
            Phase::Save => true,
            Phase::Create => operation == Operation::Create,
            Phase::Update => operation == Operation::Update,
        }
    }
}

/// Caller-supplied options for one declaration.
///
/// Every setter is optional; anything left unset keeps the default of the
/// validator it is passed to.
///
/// # Examples
///
/// ```
/// use warden_validation::{Options, Phase};
///
/// struct User {
///     admin: bool,
/// }
///
/// let options = Options::new()
///     .allow_blank(true)
///     .on(Phase::Create)
///     .message("is not an address we can use")
///     .unless(|u: &User| u.admin);
/// ```
pub struct Options<R> {
    message: Option<String>,
    phase: Option<Phase>,
    pattern: Option<Regex>,
    allow_blank: Option<bool>,
    allow_nil: Option<bool>,
    uniqueness: Option<bool>,
    conditions: Conditions<R>,
}

impl<R> Options<R> {
    /// Options with nothing overridden
    pub fn new() -> Self {
        Self {
            message: None,
            phase: None,
            pattern: None,
            allow_blank: None,
            allow_nil: None,
            uniqueness: None,
            conditions: Conditions::new(),
        }
    }

    /// Message recorded on format or reachability failures
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Lifecycle phase the declaration is active in
    pub fn on(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Pattern to match against.
    ///
    /// For email declarations this replaces the built-in pattern. For URL
    /// declarations it switches to pattern-only mode: no rewriting and no
    /// network access.
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Skip every check when the value is blank (nil included)
    pub fn allow_blank(mut self, allow: bool) -> Self {
        self.allow_blank = Some(allow);
        self
    }

    /// Skip every check when the value is nil
    pub fn allow_nil(mut self, allow: bool) -> Self {
        self.allow_nil = Some(allow);
        self
    }

    /// Require the value to be unique among records of the same type, ignoring case
    pub fn uniqueness(mut self, unique: bool) -> Self {
        self.uniqueness = Some(unique);
        self
    }

    /// Only validate records for which `predicate` holds
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.conditions = self.conditions.when(predicate);
        self
    }

    /// Skip records for which `predicate` holds
    pub fn unless<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.conditions = self.conditions.unless(predicate);
        self
    }

    pub(crate) fn requests_uniqueness(&self) -> bool {
        self.uniqueness == Some(true)
    }
}

impl<R> Default for Options<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Built-in option values of a validator
#[derive(Debug, Clone)]
pub struct Defaults {
    pub message: &'static str,
    pub phase: Phase,
    pub pattern: Option<Regex>,
    pub allow_blank: bool,
    pub allow_nil: bool,
    pub uniqueness: bool,
}

impl Defaults {
    /// Defaults of email declarations
    pub fn email() -> Self {
        Self {
            message: EMAIL_MESSAGE,
            phase: Phase::Save,
            pattern: Some(EMAIL_PATTERN.clone()),
            allow_blank: false,
            allow_nil: false,
            uniqueness: false,
        }
    }

    /// Defaults of URL declarations. No pattern means reachability mode.
    pub fn url() -> Self {
        Self {
            message: URL_MESSAGE,
            phase: Phase::Save,
            pattern: None,
            allow_blank: false,
            allow_nil: false,
            uniqueness: false,
        }
    }
}

/// Resolved, immutable configuration of one declaration
pub struct ValidationConfig<R> {
    message: String,
    phase: Phase,
    pattern: Option<Regex>,
    allow_blank: bool,
    allow_nil: bool,
    uniqueness: bool,
    conditions: Conditions<R>,
}

impl<R> ValidationConfig<R> {
    /// Merge `options` over `defaults`: each option that was set wins
    pub fn resolve(defaults: Defaults, options: Options<R>) -> Self {
        Self {
            message: options
                .message
                .unwrap_or_else(|| defaults.message.to_string()),
            phase: options.phase.unwrap_or(defaults.phase),
            pattern: options.pattern.or(defaults.pattern),
            allow_blank: options.allow_blank.unwrap_or(defaults.allow_blank),
            allow_nil: options.allow_nil.unwrap_or(defaults.allow_nil),
            uniqueness: options.uniqueness.unwrap_or(defaults.uniqueness),
            conditions: options.conditions,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    pub fn allow_blank(&self) -> bool {
        self.allow_blank
    }

    pub fn allow_nil(&self) -> bool {
        self.allow_nil
    }

    pub fn uniqueness(&self) -> bool {
        self.uniqueness
    }

    pub fn conditions(&self) -> &Conditions<R> {
        &self.conditions
    }

    /// Presence is enforced unless either exemption is enabled
    pub fn requires_presence(&self) -> bool {
        !(self.allow_nil || self.allow_blank)
    }

    /// Whether `value` is exempt from every check after presence
    pub fn exempts(&self, value: Option<&str>) -> bool {
        (self.allow_nil && value.is_none()) || (self.allow_blank && is_blank(value))
    }
}

impl<R> Clone for ValidationConfig<R> {
    fn clone(&self) -> Self {
        Self {
            message: self.message.clone(),
            phase: self.phase,
            pattern: self.pattern.clone(),
            allow_blank: self.allow_blank,
            allow_nil: self.allow_nil,
            uniqueness: self.uniqueness,
            conditions: self.conditions.clone(),
        }
    }
}

impl<R> fmt::Debug for ValidationConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationConfig")
            .field("message", &self.message)
            .field("phase", &self.phase)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("allow_blank", &self.allow_blank)
            .field("allow_nil", &self.allow_nil)
            .field("uniqueness", &self.uniqueness)
            .field("conditions", &self.conditions)
            .finish()
    }
}
