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

//! Service account authentication for `gcs-fetch`.
//!
//! This crate turns a [service account key] file into an OAuth 2.0 access
//! token using the [JWT bearer grant]:
//!
//! 1. [credentials::ServiceAccountKey] loads and validates the key file.
//! 2. [assertion::AssertionBuilder] builds the claims and signs them with an
//!    [signer::AssertionSigner]. Two interchangeable signer backends are
//!    available, see [signer::SignerBackend].
//! 3. [exchange::TokenExchange] posts the signed assertion to the token
//!    endpoint and returns a [token::Token].
//!
//! The current time is always read through a [clock::Clock], so assertions
//! can be reproduced exactly in tests.
//!
//! [service account key]: https://google.aip.dev/auth/4112
//! [JWT bearer grant]: https://datatracker.ietf.org/doc/html/rfc7523

pub mod errors;

/// Signed, time-bounded identity assertions.
pub mod assertion;

/// Time sources for assertion timestamps.
pub mod clock;

/// Service account key files.
pub mod credentials;

/// Exchange a signed assertion for an access token.
pub mod exchange;

/// RSA-SHA256 signers for assertions.
pub mod signer;

/// Types to work with access tokens.
pub mod token;

pub(crate) mod constants;
pub(crate) mod jws;

#[cfg(test)]
pub(crate) mod test_keys;

/// A `Result` alias where the `Err` case is `gcs_fetch_auth::errors::Error`.
pub type Result<T> = std::result::Result<T, crate::errors::Error>;
