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

//! Downloads a single Cloud Storage object using a service account key.
//!
//! This crate contains the library behind the `gcs-fetch` binary. The
//! [workflow::run] function loads the service account key, signs a JWT
//! assertion, exchanges it for an access token, and writes the object
//! contents to a local file.
//!
//! ```no_run
//! # async fn sample() -> gcs_fetch::Result<()> {
//! use gcs_fetch::config::FetchConfig;
//! use gcs_fetch::transport::HttpTransport;
//! use gcs_fetch_auth::clock::SystemClock;
//!
//! let config = FetchConfig::new("service-account.json", "my-bucket", "reports/q1.csv")?;
//! let transport = HttpTransport::new(&config)?;
//! let summary = gcs_fetch::workflow::run(&config, &transport, &SystemClock).await?;
//! println!("{} bytes written to {}", summary.bytes, summary.path.display());
//! # Ok(()) }
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod errors;
pub mod transport;
pub mod workflow;

pub use errors::Error;

/// The result type for this crate.
pub type Result<T> = std::result::Result<T, crate::errors::Error>;
