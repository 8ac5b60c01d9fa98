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

//! Command-line arguments for the `gcs-fetch` binary.

use crate::Result;
use crate::config::{DEFAULT_STORAGE_ENDPOINT, FetchConfig};
use clap::Parser;
use gcs_fetch_auth::assertion::DEFAULT_SCOPE;
use gcs_fetch_auth::exchange::DEFAULT_TOKEN_URI;
use gcs_fetch_auth::signer::SignerBackend;
use humantime::parse_duration;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;
use url::Url;

const DESCRIPTION: &str = concat!(
    "Downloads a single object from Cloud Storage.",
    " The tool reads a service account key file, signs a JWT assertion with",
    " the service account private key, exchanges the assertion for an access",
    " token, and then downloads the object contents to a local file.",
    " The local file is only replaced once the download completes."
);

/// Downloads a Cloud Storage object using a service account key.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = DESCRIPTION)]
pub struct Args {
    /// The service account key file.
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    pub credentials: PathBuf,

    /// The name of the bucket containing the object.
    #[arg(long)]
    pub bucket: String,

    /// The name of the object to download.
    #[arg(long)]
    pub object: String,

    /// The destination file.
    ///
    /// Defaults to the last component of the object name, in the current
    /// directory.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// The library used to sign the assertion.
    #[arg(long, value_enum, default_value = "rustls")]
    pub signer: SignerChoice,

    /// The OAuth 2.0 scopes requested in the assertion, separated by spaces.
    ///
    /// Use an empty value to omit the `scope` claim.
    #[arg(long, default_value = DEFAULT_SCOPE)]
    pub scope: String,

    /// The OAuth 2.0 token endpoint.
    #[arg(long, default_value = DEFAULT_TOKEN_URI)]
    pub token_endpoint: Url,

    /// The Cloud Storage endpoint.
    #[arg(long, default_value = DEFAULT_STORAGE_ENDPOINT)]
    pub storage_endpoint: Url,

    /// The timeout for each HTTP request, for example `30s` or `2m`.
    #[arg(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Increase the logging verbosity, repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Converts the arguments into a validated [FetchConfig].
    pub fn into_config(self) -> Result<FetchConfig> {
        let scope = Some(self.scope).filter(|s| !s.is_empty());
        let mut config = FetchConfig::new(self.credentials, self.bucket, self.object)?
            .with_signer(self.signer.into())
            .with_scope(scope)
            .with_token_endpoint(self.token_endpoint)
            .with_storage_endpoint(self.storage_endpoint)
            .with_timeout(self.timeout);
        if let Some(output) = self.output {
            config = config.with_output(output);
        }
        config.validate()?;
        Ok(config)
    }

    /// The maximum level for log messages, `warn` unless `-v` is used.
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// The signer backends available on the command line.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum SignerChoice {
    /// Sign with `rustls` and its default crypto provider.
    Rustls,
    /// Sign with the pure Rust `rsa` crate.
    RustCrypto,
}

impl From<SignerChoice> for SignerBackend {
    fn from(value: SignerChoice) -> Self {
        match value {
            SignerChoice::Rustls => SignerBackend::Rustls,
            SignerChoice::RustCrypto => SignerBackend::RustCrypto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    type TestResult = anyhow::Result<()>;

    const REQUIRED: [&str; 4] = [
        "gcs-fetch",
        "--credentials=key.json",
        "--bucket=my-bucket",
        "--object=reports/q1.csv",
    ];

    #[test]
    fn defaults() -> TestResult {
        let args = Args::try_parse_from(REQUIRED)?;
        assert_eq!(args.signer, SignerChoice::Rustls);
        assert_eq!(args.log_level(), Level::WARN);
        let config = args.into_config()?;
        assert_eq!(config, FetchConfig::new("key.json", "my-bucket", "reports/q1.csv")?);
        Ok(())
    }

    #[test]
    fn all_flags() -> TestResult {
        let args = Args::try_parse_from(REQUIRED.into_iter().chain([
            "--output=/tmp/q1.csv",
            "--signer=rust-crypto",
            "--scope=https://www.googleapis.com/auth/cloud-platform",
            "--token-endpoint=http://127.0.0.1:8080/token",
            "--storage-endpoint=http://127.0.0.1:8081",
            "--timeout=1m 30s",
            "-vv",
        ]))?;
        assert_eq!(args.log_level(), Level::DEBUG);
        let config = args.into_config()?;
        assert_eq!(config.output, PathBuf::from("/tmp/q1.csv"));
        assert_eq!(config.signer, SignerBackend::RustCrypto);
        assert_eq!(
            config.scope.as_deref(),
            Some("https://www.googleapis.com/auth/cloud-platform")
        );
        assert_eq!(config.token_endpoint.as_str(), "http://127.0.0.1:8080/token");
        assert_eq!(config.storage_endpoint.port(), Some(8081));
        assert_eq!(config.timeout, Some(Duration::from_secs(90)));
        Ok(())
    }

    #[test]
    fn empty_scope() -> TestResult {
        let args = Args::try_parse_from(REQUIRED.into_iter().chain(["--scope="]))?;
        let config = args.into_config()?;
        assert_eq!(config.scope, None);
        Ok(())
    }

    #[test_case(0, Level::WARN)]
    #[test_case(1, Level::INFO)]
    #[test_case(2, Level::DEBUG)]
    #[test_case(3, Level::TRACE)]
    #[test_case(7, Level::TRACE)]
    fn log_level(verbose: u8, want: Level) -> TestResult {
        let mut args = Args::try_parse_from(REQUIRED)?;
        args.verbose = verbose;
        assert_eq!(args.log_level(), want);
        Ok(())
    }

    #[test_case(&["--signer=openssl"])]
    #[test_case(&["--timeout=forever"])]
    #[test_case(&["--token-endpoint=not a url"])]
    fn parse_errors(extra: &[&str]) {
        let got = Args::try_parse_from(REQUIRED.into_iter().chain(extra.iter().copied()));
        assert!(got.is_err(), "{got:?}");
    }

    #[test_case(&["gcs-fetch", "--credentials=key.json", "--bucket=", "--object=o"])]
    #[test_case(&["gcs-fetch", "--credentials=key.json", "--bucket=b", "--object="])]
    #[test_case(&["gcs-fetch", "--credentials=key.json", "--bucket=b", "--object=folder/"])]
    fn config_errors(input: &[&str]) -> TestResult {
        let args = Args::try_parse_from(input)?;
        let err = args.into_config().unwrap_err();
        assert!(err.is_config(), "{err:?}");
        Ok(())
    }
}
