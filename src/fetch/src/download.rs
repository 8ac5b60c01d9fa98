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

//! Request URLs and local writes for object downloads.

use crate::Result;
use crate::errors::Error;
use crate::transport::ByteStream;
use futures::StreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use url::Url;

// Everything except the RFC 3986 unreserved characters. Object names may
// contain `%`, `\` and other characters that a URL parser would otherwise
// reinterpret.
const ENCODED_CHARS: percent_encoding::AsciiSet = percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent encode a string.
///
/// Object names can contain any character, they must be encoded when the
/// name appears in the request path.
pub fn enc(value: &str) -> String {
    percent_encoding::utf8_percent_encode(value, &ENCODED_CHARS).to_string()
}

/// The media download URL for an object.
pub fn object_url(endpoint: &Url, bucket: &str, object: &str) -> String {
    format!(
        "{}/storage/v1/b/{}/o/{}?alt=media",
        endpoint.as_str().trim_end_matches('/'),
        enc(bucket),
        enc(object)
    )
}

/// Writes `stream` to `destination`, returning the number of bytes written.
///
/// The data goes to a temporary file in the same directory, which is renamed
/// to `destination` only after the stream ends and the data is synced. On
/// error the temporary file is removed and `destination` is not modified.
pub async fn write_atomically(mut stream: ByteStream, destination: &Path) -> Result<u64> {
    let dir = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".gcs-fetch-").suffix(".partial");
    // Same mode as `File::create()`, the process umask still applies.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let temp = builder.tempfile_in(dir).map_err(|e| {
        Error::file(format!(
            "cannot create a temporary file in {}: {e}",
            dir.display()
        ))
    })?;
    // A replaced file keeps its permissions.
    if let Ok(metadata) = std::fs::metadata(destination) {
        if metadata.is_file() {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| Error::file(format!("cannot set file permissions: {e}")))?;
        }
    }
    tracing::debug!(temp = %temp.path().display(), "writing to temporary file");

    let file = temp
        .as_file()
        .try_clone()
        .map_err(|e| Error::file(format!("cannot open the temporary file: {e}")))?;
    let mut file = tokio::fs::File::from_std(file);
    let mut written = 0_u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(|e| Error::file(format!("cannot write to the temporary file: {e}")))?;
        written += chunk.len() as u64;
    }
    file.flush()
        .await
        .map_err(|e| Error::file(format!("cannot write to the temporary file: {e}")))?;
    file.sync_all()
        .await
        .map_err(|e| Error::file(format!("cannot sync the temporary file: {e}")))?;
    drop(file);

    temp.persist(destination).map_err(|e| {
        Error::file(format!(
            "cannot rename the temporary file to {}: {}",
            destination.display(),
            e.error
        ))
    })?;
    Ok(written)
}
