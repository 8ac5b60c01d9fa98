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

use clap::Parser;
use gcs_fetch::cli::Args;
use gcs_fetch::config::FetchConfig;
use gcs_fetch::transport::HttpTransport;
use gcs_fetch::workflow::{self, DownloadSummary};
use gcs_fetch_auth::clock::SystemClock;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Usage errors exit with 1, like any other failure.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };
    let _guard = enable_tracing(&args);
    tracing::debug!("{args:?}");

    match download(args).await {
        Ok(summary) => {
            println!(
                "downloaded {} bytes to {}",
                summary.bytes,
                summary.path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn download(args: Args) -> gcs_fetch::Result<DownloadSummary> {
    let config: FetchConfig = args.into_config()?;
    let transport = HttpTransport::new(&config)?;
    workflow::run(&config, &transport, &SystemClock).await
}

fn enable_tracing(args: &Args) -> tracing::dispatcher::DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_default(subscriber)
}
