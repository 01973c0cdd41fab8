// Default messages

/// Default failure message for email declarations
pub const EMAIL_MESSAGE: &str = "should look like an email address.";

/// Default failure message for URL declarations
pub const URL_MESSAGE: &str = "should be a valid url.";

/// Presence failure, shared by every declaration regardless of its own message
pub const BLANK_MESSAGE: &str = "can't be blank";

/// Uniqueness failure
pub const TAKEN_MESSAGE: &str = "has already been taken";

pub(crate) fn too_short(min: usize) -> String {
    format!("is too short (minimum is {} characters)", min)
}

pub(crate) fn too_long(max: usize) -> String {
    format!("is too long (maximum is {} characters)", max)
}
