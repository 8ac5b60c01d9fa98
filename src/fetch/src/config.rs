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
use crate::errors::Error;
use gcs_fetch_auth::assertion::DEFAULT_SCOPE;
use gcs_fetch_auth::exchange::DEFAULT_TOKEN_URI;
use gcs_fetch_auth::signer::SignerBackend;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// The Cloud Storage JSON API endpoint.
pub const DEFAULT_STORAGE_ENDPOINT: &str = "https://storage.googleapis.com";

/// Everything needed to download one object.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchConfig {
    /// The service account key file.
    pub credentials: PathBuf,
    pub bucket: String,
    pub object: String,
    /// Where to write the object contents. Any existing file is replaced.
    pub output: PathBuf,
    pub signer: SignerBackend,
    /// The `scope` claim in the assertion, `None` omits it.
    pub scope: Option<String>,
    /// The token endpoint. Also used as the assertion audience.
    pub token_endpoint: Url,
    pub storage_endpoint: Url,
    /// The timeout for each HTTP request. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl FetchConfig {
    /// Creates a configuration with the default endpoints and signer.
    ///
    /// The output file is named after the last segment of `object`, in the
    /// current directory.
    pub fn new<P, B, O>(credentials: P, bucket: B, object: O) -> Result<Self>
    where
        P: Into<PathBuf>,
        B: Into<String>,
        O: Into<String>,
    {
        let object = object.into();
        Ok(Self {
            credentials: credentials.into(),
            bucket: bucket.into(),
            output: default_output(&object),
            object,
            signer: SignerBackend::default(),
            scope: Some(DEFAULT_SCOPE.to_string()),
            token_endpoint: parse_endpoint(DEFAULT_TOKEN_URI)?,
            storage_endpoint: parse_endpoint(DEFAULT_STORAGE_ENDPOINT)?,
            timeout: None,
        })
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, output: P) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_signer(mut self, signer: SignerBackend) -> Self {
        self.signer = signer;
        self
    }

    pub fn with_scope<S: Into<String>>(mut self, scope: Option<S>) -> Self {
        self.scope = scope.map(Into::into);
        self
    }

    pub fn with_token_endpoint(mut self, endpoint: Url) -> Self {
        self.token_endpoint = endpoint;
        self
    }

    pub fn with_storage_endpoint(mut self, endpoint: Url) -> Self {
        self.storage_endpoint = endpoint;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Rejects configurations that cannot possibly work, before any I/O.
    pub fn validate(&self) -> Result<()> {
        if self.bucket.is_empty() {
            return Err(Error::config("the bucket name is empty"));
        }
        if self.object.is_empty() {
            return Err(Error::config("the object name is empty"));
        }
        if self.output.file_name().is_none() {
            return Err(Error::config(format!(
                "the output path `{}` does not name a file",
                self.output.display()
            )));
        }
        Ok(())
    }
}

/// Parses an endpoint URL, reporting failures as configuration errors.
pub fn parse_endpoint(value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| Error::config(format!("invalid endpoint `{value}`: {e}")))
}

fn default_output(object: &str) -> PathBuf {
    PathBuf::from(object.rsplit('/').next().unwrap_or_default())
}
