//! Cloud Vision annotation client.
//!
//! `authenticate` trades the service account for a bearer token and
//! `annotate` issues a single `images:annotate` call with it. Neither call is
//! retried; both are bounded by the timeouts in [`VisionSettings`].

use super::error::VisionError;
use super::service_account::{ServiceAccount, TokenResponse, JWT_BEARER_GRANT};
use crate::config::VisionSettings;
use crate::models::annotation::{AnnotateFileRequest, AnnotateFileResponse, ImageSource};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// An HTTP client paired with a bearer token for the annotation service.
pub struct AuthorizedChannel {
    client: Client,
    access_token: Secret<String>,
}

impl AuthorizedChannel {
    pub fn new(client: Client, access_token: Secret<String>) -> Self {
        Self {
            client,
            access_token,
        }
    }
}

pub struct VisionClient {
    client: Client,
    endpoint: String,
    token_url: String,
    scopes: Vec<String>,
    max_results: u32,
}

impl VisionClient {
    pub fn new(settings: &VisionSettings) -> Result<Self, VisionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            token_url: settings.token_url.clone(),
            scopes: settings.scopes.clone(),
            max_results: settings.max_results,
        })
    }

    /// Exchange a signed service-account assertion for an access token.
    pub async fn authenticate(
        &self,
        account: &ServiceAccount,
    ) -> Result<AuthorizedChannel, VisionError> {
        let assertion = account.sign_assertion(&self.scopes, &self.token_url)?;

        let response = self
            .client
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Token endpoint refused service account assertion");
            return Err(VisionError::Auth(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;

        tracing::debug!(
            service_account = %account.client_email,
            expires_in = ?token.expires_in,
            "Obtained access token"
        );

        Ok(AuthorizedChannel::new(
            self.client.clone(),
            Secret::new(token.access_token),
        ))
    }

    /// Request custom and generic labels for one image.
    pub async fn annotate(
        &self,
        channel: &AuthorizedChannel,
        model: &str,
        source: ImageSource,
    ) -> Result<AnnotateFileResponse, VisionError> {
        let request = AnnotateFileRequest::labels(model, source, self.max_results);

        tracing::debug!(
            endpoint = %self.endpoint,
            model = %model,
            "Sending annotate request"
        );

        let response = channel
            .client
            .post(&self.endpoint)
            .bearer_auth(channel.access_token.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(VisionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let annotations: AnnotateFileResponse = serde_json::from_str(&body)?;

        tracing::info!(
            responses = annotations.responses.len(),
            "Annotate request completed"
        );

        Ok(annotations)
    }
}
