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

//! Request construction
//!
//! A [`SignedRequest`] is built once per call. The timestamp and signature are
//! fixed at build time and the dispatcher resends the same request unchanged
//! on every retry.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::BuildError;
use crate::signing::{sign, unix_timestamp};
use crate::types::HttpMethod;

pub const ACCESS_KEY_HEADER: &str = "CB-ACCESS-KEY";
pub const ACCESS_SIGN_HEADER: &str = "CB-ACCESS-SIGN";
pub const ACCESS_TIMESTAMP_HEADER: &str = "CB-ACCESS-TIMESTAMP";
pub const ACCESS_PASSPHRASE_HEADER: &str = "CB-ACCESS-PASSPHRASE";

const APPLICATION_JSON: &str = "application/json";

/// A fully formed, authenticated request
#[derive(Debug, Clone)]
pub struct SignedRequest {
	pub method: HttpMethod,
	/// `base_url + path`
	pub url: String,
	/// Path as signed
	pub path: String,
	/// Raw JSON body, empty when the call has no body
	pub body: Vec<u8>,
	pub timestamp: String,
	pub signature: String,
	pub headers: HeaderMap,
}

/// Build a signed request stamped with the current time
pub fn build_request<B>(
	config: &ClientConfig,
	method: &str,
	path: &str,
	request_data: Option<&B>,
) -> Result<SignedRequest, BuildError>
where
	B: Serialize + ?Sized,
{
	let method: HttpMethod = method.parse()?;
	build_request_at(config, method, path, request_data, unix_timestamp())
}

/// Build a signed request with an explicit timestamp
pub fn build_request_at<B>(
	config: &ClientConfig,
	method: HttpMethod,
	path: &str,
	request_data: Option<&B>,
	timestamp: String,
) -> Result<SignedRequest, BuildError>
where
	B: Serialize + ?Sized,
{
	let body = match request_data {
		Some(data) => serde_json::to_vec(data).map_err(BuildError::EncodingFailed)?,
		None => Vec::new(),
	};

	// serde_json always produces UTF-8
	let body_json = String::from_utf8_lossy(&body);
	let signature = sign(
		config.secret(),
		&timestamp,
		method.as_str(),
		path,
		&body_json,
	)?;

	let mut headers = HeaderMap::new();
	headers.insert(ACCESS_KEY_HEADER, header_value(ACCESS_KEY_HEADER, config.key())?);
	headers.insert(ACCESS_SIGN_HEADER, header_value(ACCESS_SIGN_HEADER, &signature)?);
	headers.insert(
		ACCESS_TIMESTAMP_HEADER,
		header_value(ACCESS_TIMESTAMP_HEADER, &timestamp)?,
	);
	headers.insert(
		ACCESS_PASSPHRASE_HEADER,
		header_value(ACCESS_PASSPHRASE_HEADER, config.passphrase())?,
	);
	headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
	headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

	Ok(SignedRequest {
		method,
		url: format!("{}{}", config.base_url(), path),
		path: path.to_string(),
		body,
		timestamp,
		signature,
		headers,
	})
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, BuildError> {
	HeaderValue::from_str(value).map_err(|_| BuildError::InvalidHeader(name))
}

#[cfg(test)]
mod tests {
	use serde::Deserialize;

	use super::*;
	use crate::signing::SigningError;

	const SECRET: &str = "YmFzZTY0c2VjcmV0";

	fn config() -> ClientConfig {
		ClientConfig::new("https://testbaseurl.com", "testKey", "testPassphrase", SECRET)
	}

	#[derive(Debug, PartialEq, Serialize, Deserialize)]
	struct TestStruct {
		foo: String,
	}

	#[test]
	fn test_rejects_unsupported_methods() {
		for method in ["get", "post", "PUT", "not a http method"] {
			let err = build_request::<()>(&config(), method, "/test", None).unwrap_err();
			assert!(matches!(err, BuildError::UnsupportedMethod(_)));
		}

		for method in ["GET", "POST", "DELETE"] {
			assert!(build_request::<()>(&config(), method, "/test", None).is_ok());
		}
	}

	#[test]
	fn test_method_is_checked_before_signing() {
		// An undecodable secret would fail signing; the method check must win.
		let config = ClientConfig::new("https://a.com", "k", "p", "not base64!");
		let err = build_request::<()>(&config, "PATCH", "/test", None).unwrap_err();
		assert!(matches!(err, BuildError::UnsupportedMethod(_)));
	}

	#[test]
	fn test_empty_body_without_request_data() {
		let req = build_request::<()>(&config(), "GET", "/test", None).unwrap();
		assert!(req.body.is_empty());
	}

	#[test]
	fn test_body_round_trips() {
		let data = TestStruct {
			foo: "bar".to_string(),
		};
		let req = build_request(&config(), "POST", "/test", Some(&data)).unwrap();

		let decoded: TestStruct = serde_json::from_slice(&req.body).unwrap();
		assert_eq!(decoded, data);
	}

	#[test]
	fn test_url_is_base_url_plus_path() {
		let req = build_request::<()>(&config(), "GET", "/test", None).unwrap();
		assert_eq!(req.url, "https://testbaseurl.com/test");
		assert_eq!(req.path, "/test");

		// No slash normalisation
		let config = ClientConfig::new("https://a.com/", "k", "p", SECRET);
		let req = build_request::<()>(&config, "GET", "/test", None).unwrap();
		assert_eq!(req.url, "https://a.com//test");
	}

	#[test]
	fn test_auth_headers() {
		let req = build_request::<()>(&config(), "GET", "/test", None).unwrap();

		assert_eq!(req.headers[ACCESS_KEY_HEADER], "testKey");
		assert_eq!(req.headers[ACCESS_PASSPHRASE_HEADER], "testPassphrase");
		assert_eq!(req.headers[ACCESS_SIGN_HEADER], req.signature.as_str());
		assert_eq!(req.headers[ACCESS_TIMESTAMP_HEADER], req.timestamp.as_str());

		let ts = req.headers[ACCESS_TIMESTAMP_HEADER].to_str().unwrap();
		assert_eq!(ts.len(), 10);
		assert!(ts.chars().all(|c| c.is_ascii_digit()));
		assert!(req.signature.len() > 10);
	}

	#[test]
	fn test_json_content_headers() {
		let req = build_request::<()>(&config(), "GET", "/test", None).unwrap();
		assert_eq!(req.headers[CONTENT_TYPE], "application/json");
		assert_eq!(req.headers[ACCEPT], "application/json");
	}

	#[test]
	fn test_signature_covers_exact_body() {
		let data = TestStruct {
			foo: "bar".to_string(),
		};
		let req = build_request_at(
			&config(),
			HttpMethod::Get,
			"/test/testing",
			Some(&data),
			"1614191039".to_string(),
		)
		.unwrap();
		assert_eq!(req.signature, "sVmyaEVrIxlhfPQMes8zDl/UCo1EEZpCIYrnFkutxXo=");

		let req = build_request_at::<()>(
			&config(),
			HttpMethod::Get,
			"/test/testing",
			None,
			"1614191039".to_string(),
		)
		.unwrap();
		assert_eq!(req.signature, "6pr0VdNL6jalKIcdAj/Cm0MQlalSDYaAbBgBSX67CZk=");
	}

	#[test]
	fn test_signing_failure_propagates() {
		let config = ClientConfig::new("https://a.com", "k", "p", "not base64!");
		let err = build_request::<()>(&config, "GET", "/test", None).unwrap_err();
		assert!(matches!(
			err,
			BuildError::Signing(SigningError::InvalidSecretEncoding(_))
		));
	}

	#[test]
	fn test_invalid_header_value() {
		let config = ClientConfig::new("https://a.com", "bad\nkey", "p", SECRET);
		let err = build_request::<()>(&config, "GET", "/test", None).unwrap_err();
		assert!(matches!(err, BuildError::InvalidHeader(ACCESS_KEY_HEADER)));
	}

	#[test]
	fn test_encoding_failure() {
		use std::collections::HashMap;

		// JSON object keys must be strings
		let mut data = HashMap::new();
		data.insert(vec![1u8], "value");
		let err = build_request(&config(), "POST", "/test", Some(&data)).unwrap_err();
		assert!(matches!(err, BuildError::EncodingFailed(_)));
	}
}
