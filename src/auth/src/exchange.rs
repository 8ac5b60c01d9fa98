// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Exchanges a signed assertion for an access token, as described in
//! [RFC 7523 section 2.1](https://datatracker.ietf.org/doc/html/rfc7523#section-2.1).

use crate::Result;
use crate::assertion::Assertion;
use crate::constants::JWT_BEARER_GRANT_TYPE;
use crate::errors::Error;
use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// The Google OAuth 2.0 token endpoint.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Posts assertions to a token endpoint.
#[derive(Clone, Debug)]
pub struct TokenExchange {
    client: reqwest::Client,
    token_uri: String,
}

impl TokenExchange {
    pub fn new<S: Into<String>>(client: reqwest::Client, token_uri: S) -> Self {
        Self {
            client,
            token_uri: token_uri.into(),
        }
    }

    pub fn token_uri(&self) -> &str {
        &self.token_uri
    }

    /// Sends one `application/x-www-form-urlencoded` request with the
    /// assertion and returns the access token in the response.
    ///
    /// There are no retries, any failure is reported as an
    /// [exchange error][Error::is_exchange].
    #[tracing::instrument(skip_all, fields(token_uri = %self.token_uri))]
    pub async fn exchange(&self, assertion: &Assertion) -> Result<Token> {
        let request = TokenRequest {
            grant_type: JWT_BEARER_GRANT_TYPE,
            assertion: assertion.as_str(),
        };
        let sent_at = Instant::now();
        let response = self
            .client
            .post(&self.token_uri)
            .form(&request)
            .send()
            .await
            .map_err(|e| Error::exchange(format!("failed to request token: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::exchange(format!(
                "error requesting token, failed with status {status}: {body}"
            )));
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::exchange(format!("failed to read token response: {e}")))?;
        let response = serde_json::from_slice::<TokenResponse>(&body)
            .map_err(|e| Error::exchange(format!("cannot parse token response: {e}")))?;
        if response.access_token.is_empty() {
            return Err(Error::exchange("the token response has an empty access_token"));
        }
        tracing::debug!(
            token_type = ?response.token_type,
            expires_in = ?response.expires_in,
            "received access token"
        );

        Ok(Token {
            token: response.access_token,
            token_type: response.token_type.unwrap_or_else(|| "Bearer".to_string()),
            expires_at: response
                .expires_in
                .map(|secs| sent_at + Duration::from_secs(secs)),
        })
    }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    assertion: &'a str,
}

/// The successful response from the token endpoint.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}
