use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Single-use organization invitation. The link embeds the recipient email
/// and a unique token; the invitation is invalid once `now() > expires_at`
/// or after it has been accepted once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub invite_id: Uuid,
    pub token: Uuid,
    pub link: String,
    pub email: String,
    pub org_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    pub const VALIDITY_HOURS: i64 = 24;

    pub fn issue(email: String, org_id: Uuid, public_url: &str) -> Self {
        let token = Uuid::new_v4();
        let now = Utc::now();
        Self {
            invite_id: Uuid::new_v4(),
            token,
            link: format!("{}/api/invite/{}/{}", public_url.trim_end_matches('/'), email, token),
            email,
            org_id,
            expires_at: now + Duration::hours(Self::VALIDITY_HOURS),
            used: false,
            created_at: now,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_embeds_email_and_token() {
        let org_id = Uuid::new_v4();
        let invite = Invitation::issue("jane@example.com".into(), org_id, "http://localhost:3000/");

        assert!(invite.link.starts_with("http://localhost:3000/api/invite/jane@example.com/"));
        assert!(invite.link.ends_with(&invite.token.to_string()));
        assert!(!invite.used);
    }

    #[test]
    fn expiry_window_is_one_day() {
        let invite = Invitation::issue("a@b.co".into(), Uuid::new_v4(), "http://localhost");
        assert!(!invite.is_expired(Utc::now()));
        assert!(invite.is_expired(Utc::now() + Duration::hours(25)));
    }
}
