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

//! The errors reported by `gcs-fetch`.
//!
//! Every failure falls in one of a few categories. The categories are
//! terminal, the tool does not retry any of them.

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type for this crate.
///
/// Use the `is_*()` predicates to find out which step failed.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// The credentials file could not be read or is not a valid service
    /// account key, or the downloaded data could not be written locally.
    pub fn is_file(&self) -> bool {
        matches!(self.0, ErrorKind::File(_))
    }

    /// The private key could not be loaded, or signing failed.
    pub fn is_crypto(&self) -> bool {
        matches!(self.0, ErrorKind::Crypto(_))
    }

    /// The token exchange failed.
    pub fn is_auth(&self) -> bool {
        matches!(self.0, ErrorKind::Auth(_))
    }

    /// The object download failed.
    pub fn is_transfer(&self) -> bool {
        matches!(self.0, ErrorKind::Transfer(_))
    }

    /// The request is invalid, for example, the bucket name is empty.
    pub fn is_config(&self) -> bool {
        matches!(self.0, ErrorKind::Config(_))
    }

    /// Creates an error for a local file problem.
    pub fn file<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::File(source.into()))
    }

    /// Creates an error for a key loading or signing problem.
    pub fn crypto<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Crypto(source.into()))
    }

    /// Creates an error for a failed token exchange.
    pub fn auth<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Auth(source.into()))
    }

    /// Creates an error for a failed download.
    pub fn transfer<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Transfer(source.into()))
    }

    /// Creates an error for an invalid configuration.
    pub fn config<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Config(source.into()))
    }
}

impl From<gcs_fetch_auth::errors::Error> for Error {
    fn from(value: gcs_fetch_auth::errors::Error) -> Self {
        if value.is_credentials_file() {
            Self::file(value)
        } else if value.is_crypto() {
            Self::crypto(value)
        } else {
            Self::auth(value)
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("file error: {0}")]
    File(#[source] BoxError),
    #[error("crypto error: {0}")]
    Crypto(#[source] BoxError),
    #[error("authentication error: {0}")]
    Auth(#[source] BoxError),
    #[error("transfer error: {0}")]
    Transfer(#[source] BoxError),
    #[error("invalid configuration: {0}")]
    Config(#[source] BoxError),
}
