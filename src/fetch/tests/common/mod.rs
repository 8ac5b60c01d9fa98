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

//! Helpers shared by the integration tests.

use gcs_fetch::config::FetchConfig;
use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub type TestResult = anyhow::Result<()>;

#[allow(dead_code)]
pub const CLIENT_EMAIL: &str = "test-sa@test-project.iam.gserviceaccount.com";

static PRIVATE_KEY: LazyLock<String> = LazyLock::new(|| {
    let mut rng = rsa::rand_core::OsRng;
    let key = rsa::RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate a key");
    key.to_pkcs8_pem(LineEnding::LF)
        .expect("Failed to encode key to PKCS#8 PEM")
        .to_string()
});

/// A service account key file, as downloaded from the console.
pub fn service_account_json() -> Value {
    json!({
        "type": "service_account",
        "project_id": "test-project",
        "private_key_id": "test-private-key-id",
        "private_key": PRIVATE_KEY.as_str(),
        "client_email": CLIENT_EMAIL,
        "client_id": "123456789",
        "token_uri": "https://oauth2.googleapis.com/token",
    })
}

/// Writes `contents` as the credentials file in `dir`.
pub fn write_credentials(dir: &Path, contents: &Value) -> anyhow::Result<PathBuf> {
    let path = dir.join("service-account.json");
    std::fs::write(&path, contents.to_string())?;
    Ok(path)
}

/// A configuration that downloads `my-bucket/reports/q1.csv` into `dir`.
#[allow(dead_code)]
pub fn test_config(dir: &Path, credentials: PathBuf) -> anyhow::Result<FetchConfig> {
    let config = FetchConfig::new(credentials, "my-bucket", "reports/q1.csv")?
        .with_output(dir.join("q1.csv"));
    Ok(config)
}

/// Names of the files in `dir`, sorted.
#[allow(dead_code)]
pub fn dir_entries(dir: &Path) -> anyhow::Result<Vec<String>> {
    let mut names = std::fs::read_dir(dir)?
        .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}
