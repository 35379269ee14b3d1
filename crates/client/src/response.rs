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

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ApiError, ClientError, DecodeError};
use crate::types::{Decoded, HttpResponse};

const STATUS_OK: u16 = 200;

/// Decode a response into a value, an empty result, or an [`ApiError`]
///
/// - `200` with an empty body is [`Decoded::Empty`]
/// - `200` with a body is decoded into `T`
/// - any other status is decoded as `{"message": ...}` into an [`ApiError`]
///
/// Malformed JSON in either case is a [`DecodeError`], never a synthesized
/// `ApiError`.
pub fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<Decoded<T>, ClientError> {
	let HttpResponse { status, body } = response;

	if status != STATUS_OK {
		let mut api_error: ApiError = serde_json::from_slice(&body)
			.map_err(|source| DecodeError::ErrorBody { status, source })?;
		api_error.status_code = status;
		debug!(status, message = %api_error.message, "API returned an error");
		return Err(api_error.into());
	}

	if body.is_empty() {
		return Ok(Decoded::Empty);
	}

	let value = serde_json::from_slice(&body).map_err(DecodeError::Success)?;
	Ok(Decoded::Value(value))
}
