// Declarations and the per-type validation set

use crate::email::EmailValidator;
use crate::url::{UrlMode, UrlValidator};
use crate::{
    DeclarationError, Defaults, Fetch, FieldValidator, Operation, Options, Phase, Record,
    UniquenessStore, ValidationConfig,
};
use std::fmt;
use std::sync::Arc;

/// An ordered, duplicate-free field list paired with its resolved config
pub struct FieldDeclaration<R> {
    fields: Vec<String>,
    config: Arc<ValidationConfig<R>>,
}

impl<R> FieldDeclaration<R> {
    /// Fails with [`DeclarationError::EmptyFieldList`] when `fields` is empty.
    /// Repeated names keep their first position.
    pub fn new<I, S>(fields: I, config: ValidationConfig<R>) -> Result<Self, DeclarationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !names.contains(&field) {
                names.push(field);
            }
        }
        if names.is_empty() {
            return Err(DeclarationError::EmptyFieldList);
        }

        Ok(Self {
            fields: names,
            config: Arc::new(config),
        })
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn config(&self) -> &ValidationConfig<R> {
        &self.config
    }

    fn first_field(&self) -> String {
        self.fields[0].clone()
    }
}

impl<R> Clone for FieldDeclaration<R> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<R> fmt::Debug for FieldDeclaration<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDeclaration")
            .field("fields", &self.fields)
            .field("config", &self.config)
            .finish()
    }
}

/// Kind of validator behind a registered hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorKind {
    Email,
    Url,
}

struct Hook<R> {
    kind: ValidatorKind,
    phase: Phase,
    declaration: FieldDeclaration<R>,
    check: Box<dyn Fn(&mut R) + Send + Sync>,
}

/// Validation hooks registered for one record type.
///
/// Declarations run in registration order. A declaration registered for
/// [`Phase::Create`] or [`Phase::Update`] only runs for that operation.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use warden_validation::{MemoryStore, Options, Record, RecordId, ValidationErrors, ValidationSet};
///
/// #[derive(Default)]
/// struct User {
///     id: Option<RecordId>,
///     email: Option<String>,
///     errors: ValidationErrors,
/// }
///
/// impl Record for User {
///     fn id(&self) -> Option<RecordId> { self.id }
///     fn attribute(&self, field: &str) -> Option<String> {
///         (field == "email").then(|| self.email.clone()).flatten()
///     }
///     fn set_attribute(&mut self, field: &str, value: String) {
///         if field == "email" { self.email = Some(value) }
///     }
///     fn errors(&self) -> &ValidationErrors { &self.errors }
///     fn errors_mut(&mut self) -> &mut ValidationErrors { &mut self.errors }
/// }
///
/// let mut validations = ValidationSet::<User>::new().with_store(Arc::new(MemoryStore::new()));
/// validations
///     .validates_email(["email"], Options::new().uniqueness(true))
///     .unwrap();
///
/// let mut user = User { email: Some("test AT example.com".into()), ..User::default() };
/// assert!(!validations.validate(&mut user));
/// assert_eq!(user.errors.full_messages(), vec!["Email should look like an email address."]);
/// ```
pub struct ValidationSet<R> {
    hooks: Vec<Hook<R>>,
    store: Option<Arc<dyn UniquenessStore>>,
    fetcher: Option<Arc<dyn Fetch>>,
}

impl<R: Record + 'static> ValidationSet<R> {
    /// An empty set with no collaborators
    pub fn new() -> Self {
        Self {
            hooks: Vec::new(),
            store: None,
            fetcher: None,
        }
    }

    /// Store consulted by email declarations that request uniqueness
    pub fn with_store(mut self, store: Arc<dyn UniquenessStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Fetcher used by URL declarations in reachability mode
    pub fn with_fetcher(mut self, fetcher: impl Fetch + 'static) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Shared fetcher used by URL declarations in reachability mode
    pub fn with_shared_fetcher(mut self, fetcher: Arc<dyn Fetch>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Declare email validation on `fields`.
    ///
    /// Each field is checked for presence, length (6 to 100 characters),
    /// format and, when requested, case-insensitive uniqueness.
    pub fn validates_email<I, S>(
        &mut self,
        fields: I,
        options: Options<R>,
    ) -> Result<&mut Self, DeclarationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let config = ValidationConfig::resolve(Defaults::email(), options);
        let declaration = FieldDeclaration::new(fields, config)?;

        let store = if declaration.config().uniqueness() {
            let store = self.store.clone().ok_or_else(|| DeclarationError::MissingStore {
                field: declaration.first_field(),
            })?;
            Some(store)
        } else {
            None
        };

        let validator = EmailValidator::new(declaration.clone(), store);
        self.register(ValidatorKind::Email, declaration, validator);
        Ok(self)
    }

    /// Declare URL validation on `fields`.
    ///
    /// Without a pattern, values lacking a scheme get `http://` prefixed
    /// (written back to the record) and are then fetched once. With a
    /// pattern, values are only matched.
    pub fn validates_url<I, S>(
        &mut self,
        fields: I,
        options: Options<R>,
    ) -> Result<&mut Self, DeclarationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if options.requests_uniqueness() {
            return Err(DeclarationError::UnsupportedOption {
                option: "uniqueness",
                validator: "url",
            });
        }

        let config = ValidationConfig::resolve(Defaults::url(), options);
        let declaration = FieldDeclaration::new(fields, config)?;

        let mode = match declaration.config().pattern() {
            Some(pattern) => UrlMode::Pattern(pattern.clone()),
            None => {
                let fetcher =
                    self.fetcher
                        .clone()
                        .ok_or_else(|| DeclarationError::MissingFetcher {
                            field: declaration.first_field(),
                        })?;
                UrlMode::Reachability(fetcher)
            }
        };

        let validator = UrlValidator::new(declaration.clone(), mode);
        self.register(ValidatorKind::Url, declaration, validator);
        Ok(self)
    }

    fn register<V>(&mut self, kind: ValidatorKind, declaration: FieldDeclaration<R>, validator: V)
    where
        V: FieldValidator<R> + 'static,
    {
        tracing::debug!(
            ?kind,
            fields = ?declaration.fields(),
            phase = ?declaration.config().phase(),
            "registered validation"
        );
        self.hooks.push(Hook {
            kind,
            phase: declaration.config().phase(),
            declaration,
            check: Box::new(move |record: &mut R| validator.run(record)),
        });
    }

    /// Clear previous errors and run every declaration that applies to the
    /// record's next save: create when it has no id, update otherwise.
    /// Returns whether the record is valid.
    pub fn validate(&self, record: &mut R) -> bool {
        let operation = if record.is_new_record() {
            Operation::Create
        } else {
            Operation::Update
        };
        record.errors_mut().clear();
        self.validate_on(record, operation)
    }

    /// Run the declarations active for `operation`, appending to whatever
    /// errors the record already carries
    pub fn validate_on(&self, record: &mut R, operation: Operation) -> bool {
        for hook in self.hooks.iter().filter(|h| h.phase.applies_to(operation)) {
            (hook.check)(record);
        }

        let valid = record.errors().is_empty();
        if !valid {
            tracing::debug!(?operation, errors = record.errors().len(), "record invalid");
        }
        valid
    }

    /// Registered declarations with their validator kind, in run order
    pub fn declarations(&self) -> impl Iterator<Item = (ValidatorKind, &FieldDeclaration<R>)> {
        self.hooks.iter().map(|h| (h.kind, &h.declaration))
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl<R: Record + 'static> Default for ValidationSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for ValidationSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationSet")
            .field("hooks", &self.hooks.len())
            .field("store", &self.store.is_some())
            .field("fetcher", &self.fetcher.is_some())
            .finish()
    }
}
