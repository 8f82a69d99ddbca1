//! Contact Form Payload

use serde::{Deserialize, Serialize};

use crate::domain::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

impl ContactMessage {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: None,
            message: message.into(),
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::required("name", "Name"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ValidationError::required("email", "Email"));
        }
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(ValidationError::new("email", "Please enter a valid email address"));
        }
        if self.message.trim().is_empty() {
            return Err(ValidationError::required("message", "Message"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(ContactMessage::new("A", "a@b.c", "hi").validate().is_ok());
        assert_eq!(
            ContactMessage::new(" ", "a@b.c", "hi").validate().unwrap_err().field,
            "name"
        );
        assert_eq!(
            ContactMessage::new("A", "nope", "hi").validate().unwrap_err().field,
            "email"
        );
        assert_eq!(
            ContactMessage::new("A", "a@b.c", "").validate().unwrap_err().message,
            "Message is required"
        );
    }
}
