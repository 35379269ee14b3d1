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

use std::{fmt, time::Duration};

use ::config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

use crate::error::ConfigError;

// Transport configuration constants
/// Default HTTP request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fixed delay after a `429 Too Many Requests` before the next attempt
pub const DEFAULT_RATE_LIMIT_BACKOFF: Duration = Duration::from_millis(300);

/// Default attempt bound used by callers that do not pick their own
pub const DEFAULT_MAX_RETRIES: u32 = 3;

// Environment configuration constants
/// Prefix shared by all credential environment variables
pub const ENV_PREFIX: &str = "COINBASE_PRO";

/// Credential fields, in the order they are validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
	BaseUrl,
	Key,
	Passphrase,
	Secret,
}

impl CredentialField {
	/// Environment variable the field is read from
	pub fn env_var(&self) -> &'static str {
		match self {
			CredentialField::BaseUrl => "COINBASE_PRO_BASEURL",
			CredentialField::Key => "COINBASE_PRO_KEY",
			CredentialField::Passphrase => "COINBASE_PRO_PASSPHRASE",
			CredentialField::Secret => "COINBASE_PRO_SECRET",
		}
	}
}

impl fmt::Display for CredentialField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.env_var())
	}
}

/// Credentials and endpoint for the private API
///
/// All four values are required. `secret` is the base64-encoded API secret as
/// issued; it is decoded at signing time.
#[derive(Clone, Default, Deserialize)]
pub struct ClientConfig {
	#[serde(default, rename = "baseurl")]
	base_url: String,
	#[serde(default)]
	key: String,
	#[serde(default)]
	passphrase: String,
	#[serde(default)]
	secret: String,
}

impl ClientConfig {
	pub fn new(
		base_url: impl Into<String>,
		key: impl Into<String>,
		passphrase: impl Into<String>,
		secret: impl Into<String>,
	) -> Self {
		Self {
			base_url: base_url.into(),
			key: key.into(),
			passphrase: passphrase.into(),
			secret: secret.into(),
		}
	}

	/// Load credentials from `COINBASE_PRO_*` environment variables
	///
	/// Only reads the process environment; loading a `.env` file is left to
	/// the binary.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::load(Config::builder().add_source(Environment::with_prefix(ENV_PREFIX)))
	}

	/// Load credentials from a file, with `COINBASE_PRO_*` variables taking precedence
	pub fn from_file(path: &str) -> Result<Self, ConfigError> {
		Self::load(
			Config::builder()
				.add_source(File::with_name(path))
				.add_source(Environment::with_prefix(ENV_PREFIX)),
		)
	}

	fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
		let config: Self = builder.build()?.try_deserialize()?;
		config.validate()?;
		Ok(config)
	}

	/// Check that every credential is present
	///
	/// Fields are checked in order base URL, key, passphrase, secret; the first
	/// empty one is reported.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let fields = [
			(CredentialField::BaseUrl, &self.base_url),
			(CredentialField::Key, &self.key),
			(CredentialField::Passphrase, &self.passphrase),
			(CredentialField::Secret, &self.secret),
		];

		match fields.into_iter().find(|(_, value)| value.is_empty()) {
			Some((field, _)) => Err(ConfigError::Missing(field)),
			None => Ok(()),
		}
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn passphrase(&self) -> &str {
		&self.passphrase
	}

	pub fn secret(&self) -> &str {
		&self.secret
	}
}

impl fmt::Debug for ClientConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClientConfig")
			.field("base_url", &self.base_url)
			.field("key", &self.key)
			.field("passphrase", &"<redacted>")
			.field("secret", &"<redacted>")
			.finish()
	}
}
