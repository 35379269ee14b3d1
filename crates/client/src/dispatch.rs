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

//! Request dispatch with rate-limit backoff
//!
//! Only `429 Too Many Requests` is retried, after a fixed delay, up to the
//! policy's attempt bound. Transport failures abort immediately and every
//! other status is handed back for decoding.

use reqwest::Client as ReqwestClient;
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::request::SignedRequest;
use crate::types::{HttpResponse, RetryPolicy};

/// Send a signed request, retrying on `429`
///
/// When every attempt is rate limited the last `429` response is returned.
pub async fn send(
	http: &ReqwestClient,
	request: &SignedRequest,
	policy: &RetryPolicy,
) -> Result<HttpResponse, TransportError> {
	let max_attempts = policy.attempts();
	let mut attempt = 1;

	loop {
		debug!(
			method = %request.method,
			url = %request.url,
			attempt,
			max_attempts,
			"Sending request"
		);

		let response = http
			.request(request.method.to_reqwest(), &request.url)
			.headers(request.headers.clone())
			.body(request.body.clone())
			.send()
			.await
			.map_err(TransportError::from_send)?;

		let status = response.status().as_u16();
		let body = response.bytes().await.map_err(TransportError::Body)?;
		let response = HttpResponse::new(status, body.to_vec());

		if !response.is_rate_limited() || attempt >= max_attempts {
			debug!(status, attempt, "Request finished");
			return Ok(response);
		}

		warn!(
			url = %request.url,
			attempt,
			max_attempts,
			backoff = ?policy.backoff,
			"Rate limited, backing off"
		);
		tokio::time::sleep(policy.backoff).await;
		attempt += 1;
	}
}
