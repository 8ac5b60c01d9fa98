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

use super::AssertionSigner;
use crate::Result;
use crate::errors::Error;
use rsa::RsaPrivateKey;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use rustls::pki_types::PrivateKeyDer;
use sha2::Sha256;

// Signs with the RustCrypto `rsa` crate.
pub(crate) struct RsaSigner {
    key: SigningKey<Sha256>,
}

impl RsaSigner {
    pub(crate) fn new(private_key: PrivateKeyDer<'static>) -> Result<Self> {
        let key = match &private_key {
            PrivateKeyDer::Pkcs8(der) => RsaPrivateKey::from_pkcs8_der(der.secret_pkcs8_der())
                .map_err(Error::crypto)?,
            PrivateKeyDer::Pkcs1(der) => RsaPrivateKey::from_pkcs1_der(der.secret_pkcs1_der())
                .map_err(Error::crypto)?,
            _ => return Err(Error::crypto("expected an RSA private key")),
        };
        Ok(Self {
            key: SigningKey::<Sha256>::new(key),
        })
    }
}

// `SigningKey` prints the key material in its `Debug` output.
impl std::fmt::Debug for RsaSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaSigner")
            .field("key", &"[censored]")
            .finish()
    }
}

impl AssertionSigner for RsaSigner {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let signature = self.key.try_sign(message).map_err(Error::crypto)?;
        Ok(signature.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_keys;

    #[test]
    fn debug_censors_key() -> anyhow::Result<()> {
        let der = super::super::parse_private_key(test_keys::pkcs8_pem())?;
        let signer = RsaSigner::new(der)?;
        let fmt = format!("{signer:?}");
        assert!(fmt.contains("[censored]"), "{fmt}");
        Ok(())
    }
}
