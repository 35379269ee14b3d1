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

//! Coinbase Pro playground
//!
//! Loads credentials from `.env` / `COINBASE_PRO_*` (or a config file), sends a
//! single signed request and prints the JSON response.
//!
//! ```text
//! cbpro GET /accounts
//! cbpro POST /orders --body '{"size":"0.01","price":"100","side":"buy","product_id":"BTC-USD"}'
//! ```

mod logging;

use anyhow::{Context, Result};
use cbpro_client::{Client, ClientConfig, Decoded, config::DEFAULT_MAX_RETRIES};
use clap::Parser;
use serde_json::Value;
use tracing::{error, info};

use crate::logging::init_logging;

/// Send one signed request to the Coinbase Pro API
#[derive(Debug, Parser)]
#[command(name = "cbpro")]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// HTTP method (GET, POST or DELETE)
	method: String,

	/// Request path, e.g. /accounts
	path: String,

	/// JSON request body
	#[arg(short, long)]
	body: Option<String>,

	/// Maximum attempts when rate limited
	#[arg(short, long, default_value_t = DEFAULT_MAX_RETRIES)]
	retries: u32,

	/// Credentials file; COINBASE_PRO_* variables override its values
	#[arg(short, long)]
	config: Option<String>,

	/// Also log to stderr
	#[arg(long)]
	log_console: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
	dotenv::dotenv().ok();

	let cli = Cli::parse();
	init_logging(cli.log_console)?;

	let body: Option<Value> = cli
		.body
		.as_deref()
		.map(serde_json::from_str)
		.transpose()
		.context("--body is not valid JSON")?;

	let config = match cli.config.as_deref() {
		Some(path) => ClientConfig::from_file(path),
		None => ClientConfig::from_env(),
	}
	.context("Failed to load credentials")?;

	let client = Client::new(config).context("Failed to create client")?;
	info!(target: "cbpro", method = %cli.method, path = %cli.path, "Sending request");

	let result = client
		.execute_request::<Value, Value>(&cli.method, &cli.path, body.as_ref(), cli.retries)
		.await;

	match result {
		Ok(Decoded::Value(value)) => {
			println!("{}", serde_json::to_string_pretty(&value)?);
		}
		Ok(Decoded::Empty) => {
			println!("(empty response)");
		}
		Err(e) => {
			error!(target: "cbpro", error = %e, "Request failed");
			return Err(e).context(format!("{} {} failed", cli.method, cli.path));
		}
	}

	Ok(())
}
