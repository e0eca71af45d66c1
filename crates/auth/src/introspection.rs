//! Typed view of the OAuth server's user-details response.
//!
//! Every field is optional on purpose: the endpoint answers with different
//! shapes depending on the grant, and a partially filled response must never
//! fail decoding. Shape recognition happens afterwards, in
//! [`crate::extract::extract_identity`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IntrospectionResponse {
    #[serde(default)]
    pub oauth2_request: Option<Oauth2Request>,
    /// For password/authorization-code grants the principal fields are
    /// nested one level down.
    #[serde(default)]
    pub principal: Option<PrincipalFields>,
    /// For other shapes the same fields appear at the top level.
    #[serde(flatten)]
    pub root: PrincipalFields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Oauth2Request {
    #[serde(default)]
    pub grant_type: Option<String>,
}

/// The principal attributes, at whichever nesting level they appear.
///
/// `user_id` distinguishes a missing key from an explicit null: a missing
/// key means the response is not a recognizable identity at all, while a
/// null value still yields an identity with absent attributes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PrincipalFields {
    #[serde(default, deserialize_with = "some")]
    pub user_id: Option<Option<i64>>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub admin: Option<bool>,
    #[serde(default)]
    pub organization_id: Option<i64>,
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_access_token_validity_seconds: Option<i64>,
    #[serde(default)]
    pub client_refresh_token_validity_seconds: Option<i64>,
    #[serde(default)]
    pub client_authorized_grant_types: Option<Vec<String>>,
    #[serde(default)]
    pub client_auto_approve_scopes: Option<Vec<String>>,
    #[serde(default)]
    pub client_registered_redirect_uri: Option<Vec<String>>,
    #[serde(default)]
    pub client_resource_ids: Option<Vec<String>>,
    #[serde(default)]
    pub client_scope: Option<Vec<String>>,
    #[serde(default)]
    pub addition_info: Option<Value>,
}

fn some<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}
