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

use std::{fmt, str::FromStr, time::Duration};

use crate::config::DEFAULT_RATE_LIMIT_BACKOFF;
use crate::error::BuildError;

/// HTTP methods accepted by the private API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	Get,
	Post,
	Delete,
}

impl HttpMethod {
	/// Wire name, as signed and sent
	pub fn as_str(&self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Delete => "DELETE",
		}
	}

	pub(crate) fn to_reqwest(self) -> reqwest::Method {
		match self {
			HttpMethod::Get => reqwest::Method::GET,
			HttpMethod::Post => reqwest::Method::POST,
			HttpMethod::Delete => reqwest::Method::DELETE,
		}
	}
}

impl FromStr for HttpMethod {
	type Err = BuildError;

	/// Case sensitive: `get` is rejected because the signature covers the
	/// method string verbatim.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"GET" => Ok(HttpMethod::Get),
			"POST" => Ok(HttpMethod::Post),
			"DELETE" => Ok(HttpMethod::Delete),
			other => Err(BuildError::UnsupportedMethod(other.to_string())),
		}
	}
}

impl fmt::Display for HttpMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Retry behaviour for `429 Too Many Requests`
///
/// Fixed delay between attempts, bounded by attempt count. Other statuses and
/// transport failures are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Total attempts including the first one (always >= 1)
	pub max_attempts: u32,
	/// Delay after each rate-limited attempt
	pub backoff: Duration,
}

impl RetryPolicy {
	/// Policy with the default backoff; `max_attempts` below 1 becomes 1
	pub fn new(max_attempts: u32) -> Self {
		Self::with_backoff(max_attempts, DEFAULT_RATE_LIMIT_BACKOFF)
	}

	pub fn with_backoff(max_attempts: u32, backoff: Duration) -> Self {
		Self {
			max_attempts: max_attempts.max(1),
			backoff,
		}
	}

	/// Attempt count with the lower bound applied, for policies built by hand
	pub fn attempts(&self) -> u32 {
		self.max_attempts.max(1)
	}
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self::new(1)
	}
}

/// A fully read HTTP response
///
/// The body is buffered by the dispatcher, so the connection has already been
/// released by the time this value exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
	pub status: u16,
	pub body: Vec<u8>,
}

impl HttpResponse {
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self {
			status,
			body: body.into(),
		}
	}

	pub fn is_rate_limited(&self) -> bool {
		self.status == reqwest::StatusCode::TOO_MANY_REQUESTS.as_u16()
	}
}

/// Successful decode outcome
///
/// A `200 OK` with an empty body is a valid result distinct from a decoded
/// value; callers that expect no payload match on `Empty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
	Value(T),
	Empty,
}

impl<T> Decoded<T> {
	pub fn is_empty(&self) -> bool {
		matches!(self, Decoded::Empty)
	}

	pub fn value(&self) -> Option<&T> {
		match self {
			Decoded::Value(v) => Some(v),
			Decoded::Empty => None,
		}
	}

	pub fn into_option(self) -> Option<T> {
		match self {
			Decoded::Value(v) => Some(v),
			Decoded::Empty => None,
		}
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
		match self {
			Decoded::Value(v) => Decoded::Value(f(v)),
			Decoded::Empty => Decoded::Empty,
		}
	}
}
