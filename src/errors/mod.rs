use core::fmt;
use std::error::Error;
use std::fmt::Display;

/// Error of the view service: transport failures, rejected proposals and invalid configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ViewServiceError {
    text: String,
    cause: String,
}

pub(crate) type Result<T> = std::result::Result<T, ViewServiceError>;

/// Creates the Err variant with the error text and its cause (can be empty).
pub fn new_err<T>(text: String, cause: String) -> std::result::Result<T, ViewServiceError> {
    Err(ViewServiceError { text, cause })
}

impl ViewServiceError {
    /// Error description without the cause.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Display for ViewServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cause_word = {
            if !self.cause.is_empty() {
                " Cause: ".to_string()
            } else {
                String::new()
            }
        };
        write!(f, "{}.{}{}", self.text, cause_word, self.cause)
    }
}

impl Error for ViewServiceError {}
