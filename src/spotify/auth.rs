use reqwest::Client;

use crate::{config, error::WallError, types::{Credential, TokenResponse}};

/// Anything able to hand out a fresh bearer credential.
///
/// Production code talks to the token broker through [`TokenEndpoint`]; tests
/// plug in counting fakes.
pub trait CredentialSource: Send + Sync {
    fn fetch_credential(&self) -> impl Future<Output = Result<Credential, WallError>> + Send;
}

/// Token broker reached with a plain `GET`.
///
/// The broker sits behind a tunnel that shows a browser warning page unless a
/// bypass header is sent, so every request carries that header.
///
/// # Response Format
///
/// - Success: `{ "access_token": "BQC..." }`
/// - Failure: `{ "error": "reason" }` (with any status code)
#[derive(Debug, Clone)]
pub struct TokenEndpoint {
    client: Client,
    url: String,
    bypass_header: (String, String),
}

impl TokenEndpoint {
    pub fn new(client: Client, url: String, bypass_header: (String, String)) -> Self {
        TokenEndpoint {
            client,
            url,
            bypass_header,
        }
    }

    /// Builds the endpoint from `ALBUMWALL_TOKEN_URL` and the bypass header settings.
    pub fn from_env(client: Client) -> Result<Self, WallError> {
        Ok(Self::new(
            client,
            config::token_url()?,
            config::token_bypass_header(),
        ))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CredentialSource for TokenEndpoint {
    async fn fetch_credential(&self) -> Result<Credential, WallError> {
        let (header, value) = &self.bypass_header;
        let response = self
            .client
            .get(&self.url)
            .header(header.as_str(), value.as_str())
            .send()
            .await
            .map_err(|e| WallError::Auth(e.to_string()))?;

        let status = response.status();
        let body = response.json::<TokenResponse>().await.map_err(|e| {
            WallError::Auth(format!("unreadable token response ({}): {}", status, e))
        })?;

        if let Some(error) = body.error {
            return Err(WallError::Auth(error));
        }
        if !status.is_success() {
            return Err(WallError::Auth(format!(
                "token endpoint answered {}",
                status
            )));
        }

        match body.access_token {
            Some(token) if !token.is_empty() => Ok(Credential::new(token)),
            _ => Err(WallError::Auth(
                "token response carries no access_token".to_string(),
            )),
        }
    }
}
