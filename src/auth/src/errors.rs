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

//! Errors created while loading credentials, signing assertions, or
//! exchanging them for tokens.

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type for this crate.
///
/// Use the `is_*()` predicates to find out which step failed. The first four
/// predicates describe problems with the credentials file, `is_crypto()`
/// covers key loading and signing, and `is_exchange()` covers the call to the
/// token endpoint.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// A problem finding or opening the credentials file.
    pub fn is_loading(&self) -> bool {
        matches!(self.0, ErrorKind::Loading(_))
    }

    /// A problem parsing the credentials file as JSON.
    pub fn is_parsing(&self) -> bool {
        matches!(self.0, ErrorKind::Parsing(_))
    }

    /// The credentials file is not a service account key.
    pub fn is_unknown_type(&self) -> bool {
        matches!(self.0, ErrorKind::UnknownType(_))
    }

    /// A required field was missing (or empty) in the credentials file.
    pub fn is_missing_field(&self) -> bool {
        matches!(self.0, ErrorKind::MissingField(_))
    }

    /// Any of the credentials file problems.
    pub fn is_credentials_file(&self) -> bool {
        self.is_loading() || self.is_parsing() || self.is_unknown_type() || self.is_missing_field()
    }

    /// The private key could not be loaded, or the signature failed.
    pub fn is_crypto(&self) -> bool {
        matches!(self.0, ErrorKind::Crypto(_))
    }

    /// The token endpoint could not be reached, rejected the assertion, or
    /// returned an unusable response.
    pub fn is_exchange(&self) -> bool {
        matches!(self.0, ErrorKind::Exchange(_))
    }

    pub(crate) fn loading<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Loading(source.into()))
    }

    pub(crate) fn parsing<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Parsing(source.into()))
    }

    pub(crate) fn unknown_type<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::UnknownType(source.into()))
    }

    pub(crate) fn missing_field(field: &'static str) -> Error {
        Error(ErrorKind::MissingField(field))
    }

    pub(crate) fn crypto<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Crypto(source.into()))
    }

    pub(crate) fn exchange<T>(source: T) -> Error
    where
        T: Into<BoxError>,
    {
        Error(ErrorKind::Exchange(source.into()))
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("could not find or open the credentials file: {0}")]
    Loading(#[source] BoxError),
    #[error("cannot parse the credentials file: {0}")]
    Parsing(#[source] BoxError),
    #[error("unsupported credentials type: {0}")]
    UnknownType(#[source] BoxError),
    #[error("missing required field in the credentials file: {0}")]
    MissingField(&'static str),
    #[error("cannot sign the assertion: {0}")]
    Crypto(#[source] BoxError),
    #[error("cannot exchange the assertion for an access token: {0}")]
    Exchange(#[source] BoxError),
}
