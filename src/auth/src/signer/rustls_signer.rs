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
use rustls::SignatureScheme;
use rustls::crypto::CryptoProvider;
use rustls::pki_types::PrivateKeyDer;
use rustls::sign::Signer;

// Signs using the key provider of the process-wide rustls crypto provider.
#[derive(Debug)]
pub(crate) struct RustlsSigner {
    signer: Box<dyn Signer>,
}

impl RustlsSigner {
    pub(crate) fn new(private_key: PrivateKeyDer<'static>) -> Result<Self> {
        let key_provider = CryptoProvider::get_default().map_or_else(
            || rustls::crypto::aws_lc_rs::default_provider().key_provider,
            |p| p.key_provider,
        );
        let key = key_provider
            .load_private_key(private_key)
            .map_err(Error::crypto)?;
        let signer = key
            .choose_scheme(&[SignatureScheme::RSA_PKCS1_SHA256])
            .ok_or_else(|| {
                Error::crypto(
                    "Unable to choose RSA_PKCS1_SHA256 signing scheme as it is not supported by current signer",
                )
            })?;
        Ok(Self { signer })
    }
}

impl AssertionSigner for RustlsSigner {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        self.signer.sign(message).map_err(Error::crypto)
    }
}
