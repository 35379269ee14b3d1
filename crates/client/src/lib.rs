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

//! Coinbase Pro client - signed REST requests with rate-limit backoff
//!
//! This crate builds authenticated requests for the Coinbase Pro private API,
//! dispatches them with a bounded retry on `429 Too Many Requests`, and
//! decodes responses into a typed value, an empty result, or an [`ApiError`].
//!
//! The request pipeline is:
//!
//! ```text
//! Client::execute_request
//!     -> request::build_request   (canonical payload + HMAC-SHA256 signature)
//!     -> dispatch::send           (fixed backoff on 429, bounded attempts)
//!     -> response::decode         (Value / Empty / ApiError)
//! ```
//!
//! The client is designed to be lightweight and embeddable:
//! - No background threads
//! - No global state; credentials are passed in through [`ClientConfig`]
//! - Environment loading is an opt-in adapter ([`ClientConfig::from_env`])

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod request;
pub mod response;
pub mod signing;
pub mod types;

pub use client::{Client, SyncClient};
pub use crate::config::{ClientConfig, CredentialField};
pub use error::{ApiError, BuildError, ClientError, ConfigError, DecodeError, TransportError};
pub use request::{SignedRequest, build_request};
pub use signing::{SigningError, sign, unix_timestamp};
pub use types::{Decoded, HttpMethod, HttpResponse, RetryPolicy};
