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

//! An assertion is a JWT in compact serialization:
//!
//! ```text
//! base64url(header) "." base64url(claims) "." base64url(signature)
//! ```
//!
//! The issuer and subject are the service account email, the audience is the
//! token endpoint, and the assertion is valid for one hour.

use crate::Result;
use crate::clock::Clock;
use crate::constants::{JWT, RS256};
use crate::credentials::ServiceAccountKey;
use crate::exchange::DEFAULT_TOKEN_URI;
use crate::jws::{JwsClaims, JwsHeader};
use crate::signer::AssertionSigner;
use base64::prelude::{BASE64_URL_SAFE_NO_PAD, Engine as _};
use std::time::Duration;
use time::OffsetDateTime;

/// Read-only access to Cloud Storage objects.
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/devstorage.read_only";

/// How long an assertion is valid, measured from its `iat` claim.
pub const ASSERTION_LIFETIME: Duration = Duration::from_secs(3600);

// Services reject assertions with `iat` in the future. Unfortunately all
// machines have some amount of clock skew, and it is possible that
// the machine creating this assertion has a clock a few milliseconds
// or seconds ahead of the machines receiving the assertion.
// Create the assertion with a 10 second margin to avoid most clock
// skew problems.
pub const CLOCK_SKEW_FUDGE: Duration = Duration::from_secs(10);

/// Configures and signs an assertion for a service account.
#[derive(Clone, Debug)]
pub struct AssertionBuilder {
    issuer: String,
    key_id: Option<String>,
    audience: String,
    scope: Option<String>,
}

impl AssertionBuilder {
    /// Starts an assertion issued by the service account in `key`.
    ///
    /// The audience defaults to [DEFAULT_TOKEN_URI] and the scope to
    /// [DEFAULT_SCOPE].
    pub fn new(key: &ServiceAccountKey) -> Self {
        Self {
            issuer: key.client_email.clone(),
            key_id: key.key_id().map(str::to_string),
            audience: DEFAULT_TOKEN_URI.to_string(),
            scope: Some(DEFAULT_SCOPE.to_string()),
        }
    }

    /// Sets the `aud` claim. This must be the URL of the token endpoint that
    /// receives the assertion.
    pub fn audience<S: Into<String>>(mut self, audience: S) -> Self {
        self.audience = audience.into();
        self
    }

    /// Sets the `scope` claim, `None` omits the claim.
    ///
    /// Multiple scopes can be specified using a single space (" ") as
    /// delimiter.
    pub fn scope<S: Into<String>>(mut self, scope: Option<S>) -> Self {
        self.scope = scope.map(Into::into);
        self
    }

    /// Builds the claims at the time given by `clock` and signs them.
    ///
    /// The `iat` claim is not the clock reading: it is backdated by
    /// [CLOCK_SKEW_FUDGE], truncated to whole seconds. `exp` is always
    /// `iat` plus [ASSERTION_LIFETIME].
    pub fn sign(&self, signer: &dyn AssertionSigner, clock: &dyn Clock) -> Result<Assertion> {
        let issued_at = truncate_to_seconds(clock.now() - CLOCK_SKEW_FUDGE);
        let expires_at = issued_at + ASSERTION_LIFETIME;

        let header = JwsHeader {
            alg: RS256,
            typ: JWT,
            kid: self.key_id.as_deref(),
        };
        let claims = JwsClaims {
            iss: &self.issuer,
            sub: &self.issuer,
            aud: &self.audience,
            scope: self.scope.as_deref(),
            iat: issued_at,
            exp: expires_at,
        };
        let encoded_header_claims = format!("{}.{}", header.encode()?, claims.encode()?);
        let sig = signer.sign(encoded_header_claims.as_bytes())?;
        let value = format!(
            "{}.{}",
            encoded_header_claims,
            BASE64_URL_SAFE_NO_PAD.encode(sig)
        );
        tracing::debug!(
            issuer = %self.issuer,
            audience = %self.audience,
            iat = issued_at.unix_timestamp(),
            exp = expires_at.unix_timestamp(),
            "signed assertion"
        );

        Ok(Assertion {
            value,
            issued_at,
            expires_at,
        })
    }
}

/// A signed assertion, ready to be exchanged for an access token.
#[derive(Clone, PartialEq)]
pub struct Assertion {
    value: String,
    issued_at: OffsetDateTime,
    expires_at: OffsetDateTime,
}

impl Assertion {
    /// The compact serialization, `header.claims.signature`.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The `iat` claim.
    pub fn issued_at(&self) -> OffsetDateTime {
        self.issued_at
    }

    /// The `exp` claim.
    pub fn expires_at(&self) -> OffsetDateTime {
        self.expires_at
    }
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("value", &"[censored]")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

// The claims are whole seconds, keep the in-memory values consistent.
fn truncate_to_seconds(t: OffsetDateTime) -> OffsetDateTime {
    t.replace_nanosecond(0).unwrap_or(t)
}
