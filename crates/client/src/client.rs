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

use std::time::Duration;

use reqwest::Client as ReqwestClient;
use serde::{Serialize, de::DeserializeOwned};

use crate::config::{ClientConfig, DEFAULT_TIMEOUT};
use crate::dispatch;
use crate::error::{ClientError, TransportError};
use crate::request::build_request;
use crate::response;
use crate::types::{Decoded, HttpMethod, RetryPolicy};

/// Client for the Coinbase Pro private REST API
///
/// Holds immutable credentials and a pooled `reqwest` client, so it can be
/// shared across tasks behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Client {
	config: ClientConfig,
	timeout: Duration,
	http: ReqwestClient,
}

impl Client {
	/// Create a client with the default 10 second timeout
	pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
		Self::with_timeout(config, DEFAULT_TIMEOUT)
	}

	/// Create a client with a custom request timeout
	pub fn with_timeout(config: ClientConfig, timeout: Duration) -> Result<Self, ClientError> {
		config.validate()?;

		let http = ReqwestClient::builder()
			.timeout(timeout)
			.build()
			.map_err(TransportError::Init)?;

		Ok(Self {
			config,
			timeout,
			http,
		})
	}

	/// Create a client from `COINBASE_PRO_*` environment variables
	pub fn from_env() -> Result<Self, ClientError> {
		Self::new(ClientConfig::from_env()?)
	}

	pub fn base_url(&self) -> &str {
		self.config.base_url()
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	/// Sign, send and decode one request
	///
	/// `max_retries` bounds the total number of attempts when the server keeps
	/// answering `429`; values below 1 still make one attempt.
	pub async fn execute_request<B, T>(
		&self,
		method: &str,
		path: &str,
		request_body: Option<&B>,
		max_retries: u32,
	) -> Result<Decoded<T>, ClientError>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		self.execute_request_with_policy(method, path, request_body, RetryPolicy::new(max_retries))
			.await
	}

	/// Like [`Client::execute_request`] with an explicit retry policy
	pub async fn execute_request_with_policy<B, T>(
		&self,
		method: &str,
		path: &str,
		request_body: Option<&B>,
		policy: RetryPolicy,
	) -> Result<Decoded<T>, ClientError>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		let request = build_request(&self.config, method, path, request_body)?;
		let response = dispatch::send(&self.http, &request, &policy).await?;
		response::decode(response)
	}

	/// Signed `GET` without a body
	pub async fn get<T: DeserializeOwned>(
		&self,
		path: &str,
		max_retries: u32,
	) -> Result<Decoded<T>, ClientError> {
		self.execute_request::<(), T>(HttpMethod::Get.as_str(), path, None, max_retries)
			.await
	}

	/// Signed `POST` with a JSON body
	pub async fn post<B, T>(
		&self,
		path: &str,
		body: &B,
		max_retries: u32,
	) -> Result<Decoded<T>, ClientError>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		self.execute_request(HttpMethod::Post.as_str(), path, Some(body), max_retries)
			.await
	}

	/// Signed `DELETE` without a body
	pub async fn delete<T: DeserializeOwned>(
		&self,
		path: &str,
		max_retries: u32,
	) -> Result<Decoded<T>, ClientError> {
		self.execute_request::<(), T>(HttpMethod::Delete.as_str(), path, None, max_retries)
			.await
	}
}

/// Blocking client wrapper
///
/// This wraps the async client and runs it on an owned tokio runtime.
/// Must not be called from inside another tokio runtime.
pub struct SyncClient {
	client: Client,
	runtime: tokio::runtime::Runtime,
}

impl SyncClient {
	/// Create a new blocking client
	pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
		Self::from_client(Client::new(config)?)
	}

	pub fn from_client(client: Client) -> Result<Self, ClientError> {
		let runtime = tokio::runtime::Builder::new_current_thread()
			.enable_all()
			.build()
			.map_err(TransportError::Runtime)?;

		Ok(Self { client, runtime })
	}

	pub fn client(&self) -> &Client {
		&self.client
	}

	/// Blocking [`Client::execute_request`]
	pub fn execute_request<B, T>(
		&self,
		method: &str,
		path: &str,
		request_body: Option<&B>,
		max_retries: u32,
	) -> Result<Decoded<T>, ClientError>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		self.runtime
			.block_on(self.client.execute_request(method, path, request_body, max_retries))
	}

	/// Blocking [`Client::get`]
	pub fn get<T: DeserializeOwned>(
		&self,
		path: &str,
		max_retries: u32,
	) -> Result<Decoded<T>, ClientError> {
		self.runtime.block_on(self.client.get(path, max_retries))
	}

	/// Blocking [`Client::post`]
	pub fn post<B, T>(&self, path: &str, body: &B, max_retries: u32) -> Result<Decoded<T>, ClientError>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		self.runtime.block_on(self.client.post(path, body, max_retries))
	}

	/// Blocking [`Client::delete`]
	pub fn delete<T: DeserializeOwned>(
		&self,
		path: &str,
		max_retries: u32,
	) -> Result<Decoded<T>, ClientError> {
		self.runtime.block_on(self.client.delete(path, max_retries))
	}
}
