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

/// JWT Bearer OAuth Grant Type, see RFC 7523 section 2.1.
pub(crate) const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// The `type` field of a service account key file.
pub(crate) const SERVICE_ACCOUNT_KEY_TYPE: &str = "service_account";
/// RSASSA-PKCS1-v1_5 using SHA-256.
pub(crate) const RS256: &str = "RS256";
pub(crate) const JWT: &str = "JWT";
