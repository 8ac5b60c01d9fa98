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

//! RSA keys shared by the unit tests.
//!
//! Generating a 2048-bit key takes a while in debug builds, so each test
//! binary generates one key and reuses it.

use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::sync::LazyLock;

struct TestKey {
    private: RsaPrivateKey,
    pkcs8: String,
    pkcs1: String,
}

static KEY: LazyLock<TestKey> = LazyLock::new(|| {
    let mut rng = rsa::rand_core::OsRng;
    let private = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate a key");
    let pkcs8 = private
        .to_pkcs8_pem(LineEnding::LF)
        .expect("Failed to encode key to PKCS#8 PEM")
        .to_string();
    let pkcs1 = private
        .to_pkcs1_pem(LineEnding::LF)
        .expect("Failed to encode key to PKCS#1 PEM")
        .to_string();
    TestKey {
        private,
        pkcs8,
        pkcs1,
    }
});

pub(crate) fn pkcs8_pem() -> &'static str {
    &KEY.pkcs8
}

pub(crate) fn pkcs1_pem() -> &'static str {
    &KEY.pkcs1
}

pub(crate) fn public_key() -> RsaPublicKey {
    KEY.private.to_public_key()
}
