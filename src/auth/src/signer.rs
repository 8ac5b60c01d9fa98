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

//! Assertions are signed with RSASSA-PKCS1-v1_5 using SHA-256 (`RS256`).
//!
//! Two backends implement the signature:
//!
//! * [SignerBackend::Rustls] loads the key through the `rustls` crypto
//!   provider. If the application installed a default
//!   [CryptoProvider][rustls::crypto::CryptoProvider] that provider is used,
//!   otherwise [aws-lc-rs].
//! * [SignerBackend::RustCrypto] uses the pure Rust [rsa] crate.
//!
//! PKCS#1 v1.5 signatures are deterministic, so both backends produce the
//! same bytes for the same key and message.
//!
//! [aws-lc-rs]: https://crates.io/crates/aws-lc-rs
//! [rsa]: https://crates.io/crates/rsa

mod rsa_signer;
mod rustls_signer;

use crate::Result;
use crate::errors::Error;
use rustls::pki_types::PrivateKeyDer;
use rustls_pemfile::Item;

/// Signs the `header.claims` part of an assertion.
pub trait AssertionSigner: std::fmt::Debug + Send + Sync {
    /// Returns the RSASSA-PKCS1-v1_5 SHA-256 signature of `message`.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>>;
}

/// Selects the library used to sign assertions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignerBackend {
    #[default]
    Rustls,
    RustCrypto,
}

impl SignerBackend {
    /// Loads `private_key` (PEM, PKCS#8 or PKCS#1) and returns a signer.
    pub fn signer(&self, private_key: &str) -> Result<Box<dyn AssertionSigner>> {
        let der = parse_private_key(private_key)?;
        let signer: Box<dyn AssertionSigner> = match self {
            Self::Rustls => Box::new(rustls_signer::RustlsSigner::new(der)?),
            Self::RustCrypto => Box::new(rsa_signer::RsaSigner::new(der)?),
        };
        tracing::debug!(backend = %self, "loaded private key");
        Ok(signer)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rustls => "rustls",
            Self::RustCrypto => "rust-crypto",
        }
    }
}

impl std::fmt::Display for SignerBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn parse_private_key(private_key: &str) -> Result<PrivateKeyDer<'static>> {
    let item = rustls_pemfile::read_one(&mut private_key.as_bytes())
        .map_err(Error::crypto)?
        .ok_or_else(|| Error::crypto("missing PEM section in service account key"))?;
    match item {
        Item::Pkcs8Key(key) => Ok(key.into()),
        Item::Pkcs1Key(key) => Ok(key.into()),
        other => Err(unexpected_private_key_error(other)),
    }
}

fn unexpected_private_key_error(item: Item) -> Error {
    Error::crypto(format!(
        "expected key to be in form of PKCS8 or PKCS1, found {}",
        item_name(&item)
    ))
}

fn item_name(item: &Item) -> &'static str {
    match item {
        Item::X509Certificate(_) => "X509Certificate",
        Item::SubjectPublicKeyInfo(_) => "SubjectPublicKeyInfo",
        Item::Sec1Key(_) => "Sec1Key",
        Item::Crl(_) => "Crl",
        Item::Csr(_) => "Csr",
        _ => "unknown PEM section",
    }
}
