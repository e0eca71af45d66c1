use context::{ClientDetails, UserIdentity};
use serde_json::Value;

use crate::introspection::IntrospectionResponse;

/// Builds an identity from a decoded user-details response.
///
/// Returns `None` when the response (after descending into `principal`, if
/// present) has no `userId` key at all — the sentinel for "not a
/// recognizable identity shape". Any other absent field simply stays absent
/// on the identity; partial identities are valid output.
pub(crate) fn extract_identity(response: &IntrospectionResponse) -> Option<UserIdentity> {
    let client_only = response
        .oauth2_request
        .as_ref()
        .and_then(|request| request.grant_type.as_deref())
        == Some("client_credentials");

    let fields = response.principal.as_ref().unwrap_or(&response.root);

    let user_id = fields.user_id?;

    let mut identity = UserIdentity::new(fields.username.clone().unwrap_or_default());

    // An explicit `"userId": null` still yields an identity, but carries
    // none of the user attributes.
    if let Some(user_id) = user_id {
        identity.user_id = Some(user_id);
        identity.language = fields.language.clone();
        identity.admin = fields.admin;
        identity.time_zone = fields.time_zone.clone();
        identity.organization_id = fields.organization_id;
        identity.email = fields.email.clone();
    }

    if client_only {
        identity.client = Some(ClientDetails {
            client_id: fields.client_id,
            client_name: fields.client_name.clone(),
            access_token_validity_seconds: fields.client_access_token_validity_seconds,
            refresh_token_validity_seconds: fields.client_refresh_token_validity_seconds,
            authorized_grant_types: fields.client_authorized_grant_types.clone(),
            auto_approve_scopes: fields.client_auto_approve_scopes.clone(),
            registered_redirect_uris: fields.client_registered_redirect_uri.clone(),
            resource_ids: fields.client_resource_ids.clone(),
            scopes: fields.client_scope.clone(),
        });
    }

    // A malformed additionInfo must never fail the whole extraction.
    match &fields.addition_info {
        Some(Value::Object(map)) => identity.addition_info = Some(map.clone()),
        Some(other) => log::warn!("ignoring non-object additionInfo in user details: {other}"),
        None => {}
    }

    Some(identity)
}
