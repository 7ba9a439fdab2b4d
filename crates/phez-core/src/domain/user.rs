use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The acting user. Accounts live with the identity provider; posts only
/// need the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

impl User {
    /// Create a user with a generated ID.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
        }
    }
}
