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

use crate::Result;
use crate::config::FetchConfig;
use crate::download::write_atomically;
use crate::transport::Transport;
use gcs_fetch_auth::assertion::AssertionBuilder;
use gcs_fetch_auth::clock::Clock;
use gcs_fetch_auth::credentials::ServiceAccountKey;
use std::path::PathBuf;

/// The result of a successful download.
#[derive(Clone, Debug, PartialEq)]
pub struct DownloadSummary {
    /// The file containing the object contents.
    pub path: PathBuf,
    /// The number of bytes written to `path`.
    pub bytes: u64,
}

/// Downloads the object described by `config`.
///
/// The steps run in order, and the first failure stops the download:
/// - load the service account key from `config.credentials`,
/// - sign an assertion, using `clock` for the `iat` and `exp` claims,
/// - exchange the assertion for an access token,
/// - download the object and write it to `config.output`.
///
/// Problems with the configuration, the credentials file, or the private key
/// are reported before `transport` is used.
#[tracing::instrument(skip_all, fields(bucket = %config.bucket, object = %config.object))]
pub async fn run(
    config: &FetchConfig,
    transport: &dyn Transport,
    clock: &dyn Clock,
) -> Result<DownloadSummary> {
    config.validate()?;

    let key = ServiceAccountKey::from_file(&config.credentials).await?;
    tracing::info!(client_email = %key.client_email, "loaded service account key");
    let signer = config.signer.signer(&key.private_key)?;
    let assertion = AssertionBuilder::new(&key)
        .audience(config.token_endpoint.as_str())
        .scope(config.scope.as_deref())
        .sign(signer.as_ref(), clock)?;

    let token = transport.exchange_token(&assertion).await?;
    tracing::info!("obtained access token");

    let stream = transport
        .fetch_object(&config.bucket, &config.object, &token)
        .await?;
    let bytes = write_atomically(stream, &config.output).await?;
    tracing::info!(bytes, output = %config.output.display(), "download complete");

    Ok(DownloadSummary {
        path: config.output.clone(),
        bytes,
    })
}
