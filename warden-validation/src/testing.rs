// Records used by unit tests

use crate::{Record, RecordId, ValidationErrors};

#[derive(Debug, Default)]
pub(crate) struct Account {
    pub id: Option<RecordId>,
    pub email: Option<String>,
    pub home_page: Option<String>,
    pub errors: ValidationErrors,
}

impl Account {
    pub fn with_email(email: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            ..Self::default()
        }
    }

    pub fn with_home_page(url: &str) -> Self {
        Self {
            home_page: Some(url.to_string()),
            ..Self::default()
        }
    }
}

impl Record for Account {
    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn attribute(&self, field: &str) -> Option<String> {
        match field {
            "email" => self.email.clone(),
            "home_page" => self.home_page.clone(),
            _ => None,
        }
    }

    fn set_attribute(&mut self, field: &str, value: String) {
        match field {
            "email" => self.email = Some(value),
            "home_page" => self.home_page = Some(value),
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
