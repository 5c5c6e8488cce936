/// User domain type
use serde::{Deserialize, Serialize};

/// Listener account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique username
    pub username: String,

    /// Age in years
    #[serde(default)]
    pub age: u32,

    /// City of residence
    #[serde(default)]
    pub city: String,

    /// Premium accounts never receive ad breaks
    #[serde(default)]
    pub premium: bool,
}

impl User {
    /// Create a free account
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            age: 0,
            city: String::new(),
            premium: false,
        }
    }
}
