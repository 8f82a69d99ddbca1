//! Domain Layer - Core Entity Trait
//!
//! Every record kept in a collection has a backend-assigned identifier
//! and an image that needs resolving before display.

use std::fmt;

/// Core trait for all records held by a collection store
pub trait Entity: Clone + Send + Sync + 'static {
    /// Backend identifier (`_id` on the wire)
    fn id(&self) -> &str;

    /// Stored image path or URL as returned by the backend
    fn image(&self) -> Option<&str>;

    /// Set the derived, fully qualified image URL
    fn set_image_url(&mut self, url: Option<String>);

    /// Section name, used for section filtering
    fn section_name(&self) -> &str;
}

/// Local validation failure. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str, label: &str) -> Self {
        Self::new(field, format!("{} is required", label))
    }

    /// Value outside a fixed enumeration; lists the accepted values
    pub fn not_in(field: &'static str, label: &str, allowed: &[&str]) -> Self {
        Self::new(
            field,
            format!("Invalid {}. Please select one of: {}", label, allowed.join(", ")),
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}
