use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account holder. The password hash never leaves the process: it is skipped
/// during serialization and defaulted when absent on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub phone: Option<String>,
    pub role: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, phone: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            phone,
            role: "user".to_string(),
            status: "active".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// First token of the display name, used by the member listing.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_name_is_leading_token() {
        let user = User::new("Jane Smith".into(), "jane@example.com".into(), "h".into(), None);
        assert_eq!(user.first_name(), "Jane");

        let single = User::new("precious".into(), "p@example.com".into(), "h".into(), None);
        assert_eq!(single.first_name(), "precious");
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User::new("Jane".into(), "jane@example.com".into(), "sekrit".into(), None);
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["email"], "jane@example.com");
    }
}
