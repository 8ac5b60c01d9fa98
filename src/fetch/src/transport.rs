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

//! The network side of a download.
//!
//! The workflow talks to the token endpoint and to Cloud Storage through the
//! [Transport] trait. [HttpTransport] is the implementation used by the
//! binary, tests can substitute their own.

use crate::Result;
use crate::config::FetchConfig;
use crate::download::object_url;
use crate::errors::Error;
use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use gcs_fetch_auth::assertion::Assertion;
use gcs_fetch_auth::exchange::TokenExchange;
use gcs_fetch_auth::token::Token;
use http::HeaderValue;
use http::header::AUTHORIZATION;
use url::Url;

/// The contents of an object, as a stream of chunks.
pub type ByteStream = BoxStream<'static, Result<Bytes>>;

/// Exchanges assertions for tokens and fetches object contents.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Exchanges a signed assertion for an access token.
    ///
    /// Failures are [auth errors][Error::is_auth].
    async fn exchange_token(&self, assertion: &Assertion) -> Result<Token>;

    /// Starts downloading the contents of `object` in `bucket`.
    ///
    /// Failures, including errors while reading the stream, are
    /// [transfer errors][Error::is_transfer].
    async fn fetch_object(&self, bucket: &str, object: &str, token: &Token) -> Result<ByteStream>;
}

/// A [Transport] over HTTP.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    exchange: TokenExchange,
    storage_endpoint: Url,
}

impl HttpTransport {
    /// Creates a transport for the endpoints in `config`.
    ///
    /// The token exchange and the download share one HTTP client, configured
    /// with the timeout in `config`, if any.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::transfer(format!("cannot create the HTTP client: {e}")))?;
        Ok(Self {
            exchange: TokenExchange::new(client.clone(), config.token_endpoint.as_str()),
            client,
            storage_endpoint: config.storage_endpoint.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn exchange_token(&self, assertion: &Assertion) -> Result<Token> {
        let token = self.exchange.exchange(assertion).await?;
        Ok(token)
    }

    #[tracing::instrument(skip(self, token))]
    async fn fetch_object(&self, bucket: &str, object: &str, token: &Token) -> Result<ByteStream> {
        let url = object_url(&self.storage_endpoint, bucket, object);
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, authorization(token)?)
            .send()
            .await
            .map_err(|e| Error::transfer(format!("failed to send the download request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::transfer(format!(
                "the download failed with status {status}: {body}"
            )));
        }
        tracing::debug!(
            content_length = ?response.content_length(),
            "download started"
        );
        let stream = response
            .bytes_stream()
            .map_err(|e| Error::transfer(format!("error reading the object contents: {e}")));
        Ok(stream.boxed())
    }
}

/// The `Authorization` header value for `token`.
///
/// The value is always `Bearer <token>`, whatever `token_type` the token
/// endpoint reported.
pub fn authorization(token: &Token) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.token))
        .map_err(|e| Error::auth(format!("the access token is not a valid header value: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_endpoint;
    use httptest::{Expectation, Server, matchers::*, responders::*};

    type TestResult = anyhow::Result<()>;

    fn transport(server: &Server) -> anyhow::Result<HttpTransport> {
        let config = FetchConfig::new("unused.json", "my-bucket", "reports/q1.csv")?
            .with_token_endpoint(parse_endpoint(&server.url("/token").to_string())?)
            .with_storage_endpoint(parse_endpoint(&server.url("/").to_string())?);
        Ok(HttpTransport::new(&config)?)
    }

    async fn collect(stream: ByteStream) -> Result<Vec<u8>> {
        let chunks = stream.try_collect::<Vec<_>>().await?;
        Ok(chunks.concat())
    }

    #[test]
    fn authorization_header() -> TestResult {
        let value = authorization(&Token::bearer("abc123"))?;
        assert_eq!(value.to_str()?, "Bearer abc123");
        assert!(value.is_sensitive());
        Ok(())
    }

    #[test]
    fn authorization_ignores_token_type() -> TestResult {
        let token = Token {
            token_type: "bearer".to_string(),
            ..Token::bearer("abc123")
        };
        let value = authorization(&token)?;
        assert_eq!(value.to_str()?, "Bearer abc123");
        Ok(())
    }

    #[test]
    fn authorization_invalid() {
        let err = authorization(&Token::bearer("abc\n123")).unwrap_err();
        assert!(err.is_auth(), "{err:?}");
        assert!(!err.to_string().contains("abc"), "{err}");
    }

    #[tokio::test]
    async fn fetch_object_success() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/storage/v1/b/my-bucket/o/reports%2Fq1.csv"),
                request::query(url_decoded(contains(("alt", "media")))),
                request::headers(contains(("authorization", "Bearer abc123"))),
            ])
            .respond_with(status_code(200).body("a,b\n1,2\n")),
        );

        let transport = transport(&server)?;
        let stream = transport
            .fetch_object("my-bucket", "reports/q1.csv", &Token::bearer("abc123"))
            .await?;
        assert_eq!(collect(stream).await?, b"a,b\n1,2\n");
        Ok(())
    }

    #[tokio::test]
    async fn fetch_object_not_found() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path(
                "GET",
                "/storage/v1/b/my-bucket/o/missing",
            ))
            .respond_with(status_code(404).body("No such object: my-bucket/missing")),
        );

        let transport = transport(&server)?;
        let err = transport
            .fetch_object("my-bucket", "missing", &Token::bearer("abc123"))
            .await
            .err()
            .unwrap();
        assert!(err.is_transfer(), "{err:?}");
        assert!(err.to_string().contains("404"), "{err}");
        assert!(err.to_string().contains("No such object"), "{err}");
        Ok(())
    }

    #[tokio::test]
    async fn exchange_token_success() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/token"))
                .respond_with(json_encoded(serde_json::json!({"access_token": "abc123"}))),
        );

        let transport = transport(&server)?;
        let token = transport.exchange_token(&test_assertion()?).await?;
        assert_eq!(token, Token::bearer("abc123"));
        Ok(())
    }

    #[tokio::test]
    async fn exchange_token_error() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("POST", "/token"))
                .respond_with(status_code(401).body("unauthorized")),
        );

        let transport = transport(&server)?;
        let err = transport
            .exchange_token(&test_assertion()?)
            .await
            .unwrap_err();
        assert!(err.is_auth(), "{err:?}");
        Ok(())
    }

    fn test_assertion() -> anyhow::Result<Assertion> {
        use gcs_fetch_auth::assertion::AssertionBuilder;
        use gcs_fetch_auth::clock::SystemClock;
        use gcs_fetch_auth::credentials::ServiceAccountKey;
        use gcs_fetch_auth::signer::SignerBackend;
        use rsa::pkcs8::{EncodePrivateKey, LineEnding};

        let mut rng = rsa::rand_core::OsRng;
        let private_key = rsa::RsaPrivateKey::new(&mut rng, 2048)?
            .to_pkcs8_pem(LineEnding::LF)?
            .to_string();
        let key = ServiceAccountKey {
            client_email: "svc@example.com".to_string(),
            private_key,
            ..Default::default()
        };
        let signer = SignerBackend::Rustls.signer(&key.private_key)?;
        Ok(AssertionBuilder::new(&key).sign(signer.as_ref(), &SystemClock)?)
    }
}
