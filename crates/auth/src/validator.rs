use std::time::Duration;

use context::{ValidationOutcome, ValidationStatus};
use url::Url;

use crate::extract::extract_identity;
use crate::introspection::IntrospectionResponse;

/// The seam between the HTTP-calling validator, the memoization wrapper and
/// the gateway surface.
pub trait ValidateToken: Send + Sync {
    fn validate(&self, token: &str) -> impl Future<Output = ValidationOutcome> + Send;
}

/// Validates bearer tokens against the OAuth server's user-details endpoint.
///
/// Stateless apart from the shared HTTP client; every failure mode is folded
/// into the returned [`ValidationOutcome`], this call never raises.
pub struct TokenValidator {
    client: reqwest::Client,
    userinfo_url: Url,
}

impl TokenValidator {
    pub fn new(userinfo_url: Url, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .tcp_nodelay(true)
            .build()
            .expect("default HTTP client must build");

        Self::with_client(client, userinfo_url)
    }

    pub fn with_client(client: reqwest::Client, userinfo_url: Url) -> Self {
        Self { client, userinfo_url }
    }

    /// One GET to the user-details endpoint. The token goes into the
    /// `Authorization` header verbatim: the caller supplies whatever form
    /// the OAuth server expects, no `Bearer ` prefix is added here.
    pub async fn validate(&self, token: &str) -> ValidationOutcome {
        let response = self
            .client
            .get(self.userinfo_url.clone())
            .header(reqwest::header::AUTHORIZATION, token)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(error) => return Self::transport_failure(token, error),
        };

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return ValidationOutcome::failure(
                ValidationStatus::PermissionFailedDetailFetch,
                format!("failed to get user details from oauth-server, token: {token} response: {status} {body}"),
            );
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(error) => return Self::transport_failure(token, error),
        };

        match serde_json::from_str::<IntrospectionResponse>(&body) {
            Ok(details) => ValidationOutcome::success(extract_identity(&details)),
            Err(error) => ValidationOutcome::failure(
                ValidationStatus::InternalError,
                format!("gateway helper error happened: {error}"),
            ),
        }
    }

    fn transport_failure(token: &str, error: reqwest::Error) -> ValidationOutcome {
        log::warn!("failed to get user details from oauth-server, token: {token}: {error}");

        ValidationOutcome::failure(
            ValidationStatus::TokenExpiredOrInvalid,
            "access token is expired or invalid, re-login and set a correct 'Authorization' header",
        )
    }
}

impl ValidateToken for TokenValidator {
    fn validate(&self, token: &str) -> impl Future<Output = ValidationOutcome> + Send {
        TokenValidator::validate(self, token)
    }
}
