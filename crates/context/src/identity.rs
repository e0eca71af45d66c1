use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder written into the password slot of every identity. The
/// introspection endpoint never returns credentials, so the field only
/// exists to satisfy downstream consumers that expect one.
pub const PASSWORD_SENTINEL: &str = "unknown password";

/// An authenticated principal, or a service client when the token was
/// obtained through a client-credentials grant.
///
/// Constructed fresh from each successful introspection response and
/// immutable afterwards. Every attribute beyond the username may be absent;
/// a partial identity is a valid identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: Option<i64>,
    pub username: String,
    password: String,
    pub email: Option<String>,
    pub language: Option<String>,
    pub time_zone: Option<String>,
    pub admin: Option<bool>,
    pub organization_id: Option<i64>,
    /// Free-form extra claims forwarded by the identity provider.
    pub addition_info: Option<Map<String, Value>>,
    /// Present only for client-credentials tokens.
    pub client: Option<ClientDetails>,
}

impl UserIdentity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            user_id: None,
            username: username.into(),
            password: PASSWORD_SENTINEL.to_string(),
            email: None,
            language: None,
            time_zone: None,
            admin: None,
            organization_id: None,
            addition_info: None,
            client: None,
        }
    }

    /// Always [`PASSWORD_SENTINEL`], never a real credential.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Whether this identity represents a client-credentials grant rather
    /// than a human user.
    pub fn is_client_only(&self) -> bool {
        self.client.is_some()
    }
}

/// OAuth client registration details carried by client-credentials tokens.
///
/// Absent fields in the introspection response stay absent here; nothing is
/// defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientDetails {
    pub client_id: Option<i64>,
    pub client_name: Option<String>,
    pub access_token_validity_seconds: Option<i64>,
    pub refresh_token_validity_seconds: Option<i64>,
    pub authorized_grant_types: Option<Vec<String>>,
    pub auto_approve_scopes: Option<Vec<String>>,
    pub registered_redirect_uris: Option<Vec<String>>,
    pub resource_ids: Option<Vec<String>>,
    pub scopes: Option<Vec<String>>,
}
