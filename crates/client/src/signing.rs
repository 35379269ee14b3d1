// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Request signing
//!
//! The server verifies every private request by recomputing
//! `base64(HMAC-SHA256(base64_decode(secret), timestamp + method + path + body))`.
//! The payload has no separators, and the body is the exact JSON string sent
//! on the wire (empty string when there is no body).

use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Error types for signing operations
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
	#[error("Invalid secret encoding: {0}")]
	InvalidSecretEncoding(#[from] base64::DecodeError),
	#[error("Invalid HMAC key: {0}")]
	InvalidKey(#[from] hmac::digest::InvalidLength),
}

/// Build the string that gets signed
pub fn canonical_payload(timestamp: &str, method: &str, path: &str, body: &str) -> String {
	format!("{timestamp}{method}{path}{body}")
}

/// Sign a request
///
/// `secret` is the base64-encoded API secret exactly as issued. Returns the
/// base64-encoded HMAC-SHA256 of the canonical payload.
pub fn sign(
	secret: &str,
	timestamp: &str,
	method: &str,
	path: &str,
	body: &str,
) -> Result<String, SigningError> {
	let key = STANDARD.decode(secret)?;

	let mut mac = <HmacSha256 as Mac>::new_from_slice(&key)?;
	mac.update(canonical_payload(timestamp, method, path, body).as_bytes());

	Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Current Unix time in whole seconds, as sent in `CB-ACCESS-TIMESTAMP`
pub fn unix_timestamp() -> String {
	chrono::Utc::now().timestamp().to_string()
}
