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

//! Error types for client operations
//!
//! Each stage of the request pipeline has its own error type so callers can
//! branch on where a call failed:
//!
//! - [`ConfigError`]: a credential is missing or configuration failed to load
//! - [`BuildError`]: the request could not be constructed or signed
//! - [`TransportError`]: the request never produced an HTTP response
//! - [`ApiError`]: the server answered with a non-200 status
//! - [`DecodeError`]: the server answered but the body was not the expected JSON
//!
//! Only `429 Too Many Requests` is retried, inside the dispatcher. Everything
//! else is returned to the caller as-is.

use serde::Deserialize;
use thiserror::Error;

use crate::config::CredentialField;
use crate::signing::SigningError;

/// Top-level error returned by [`crate::Client`]
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("Configuration error: {0}")]
	Config(#[from] ConfigError),
	#[error("Build error: {0}")]
	Build(#[from] BuildError),
	#[error("Network error: {0}")]
	Transport(#[from] TransportError),
	#[error("API error: {0}")]
	Api(#[from] ApiError),
	#[error("Invalid response: {0}")]
	Decode(#[from] DecodeError),
}

impl ClientError {
	/// HTTP status reported by the server, if the call got that far
	pub fn status_code(&self) -> Option<u16> {
		match self {
			ClientError::Api(e) => Some(e.status_code),
			ClientError::Decode(DecodeError::ErrorBody { status, .. }) => Some(*status),
			_ => None,
		}
	}

	/// True when every attempt was answered with `429 Too Many Requests`
	pub fn is_rate_limited(&self) -> bool {
		self.status_code() == Some(429)
	}
}

/// Error types for configuration
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("missing {0}")]
	Missing(CredentialField),
	#[error("Failed to load configuration: {0}")]
	Load(#[from] ::config::ConfigError),
}

/// Error types for request construction
#[derive(Debug, Error)]
pub enum BuildError {
	#[error("supplied an unsupported or invalid http method: {0:?}")]
	UnsupportedMethod(String),
	#[error("Failed to encode request body: {0}")]
	EncodingFailed(#[source] serde_json::Error),
	#[error("Signing failed: {0}")]
	Signing(#[from] SigningError),
	#[error("Invalid value for header {0}")]
	InvalidHeader(&'static str),
}

/// Error types for the transport layer
///
/// None of these are retried.
#[derive(Debug, Error)]
pub enum TransportError {
	#[error("Request timed out: {0}")]
	Timeout(#[source] reqwest::Error),
	#[error("Connection failed: {0}")]
	Connect(#[source] reqwest::Error),
	#[error("Request failed: {0}")]
	Request(#[source] reqwest::Error),
	#[error("Failed to read response body: {0}")]
	Body(#[source] reqwest::Error),
	#[error("Failed to create HTTP client: {0}")]
	Init(#[source] reqwest::Error),
	#[error("Failed to create tokio runtime: {0}")]
	Runtime(#[source] std::io::Error),
}

impl TransportError {
	/// Classify a send failure
	pub(crate) fn from_send(err: reqwest::Error) -> Self {
		if err.is_timeout() {
			TransportError::Timeout(err)
		} else if err.is_connect() {
			TransportError::Connect(err)
		} else {
			TransportError::Request(err)
		}
	}
}

/// Structured failure reported by the server
///
/// Built from any non-200 response whose body is `{"message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Deserialize)]
#[error("{status_code} - {message}")]
pub struct ApiError {
	#[serde(skip)]
	pub status_code: u16,
	#[serde(default)]
	pub message: String,
}

/// Error types for response decoding
#[derive(Debug, Error)]
pub enum DecodeError {
	#[error("Failed to parse response: {0}")]
	Success(#[source] serde_json::Error),
	#[error("Failed to parse error response for HTTP {status}: {source}")]
	ErrorBody {
		status: u16,
		#[source]
		source: serde_json::Error,
	},
}
