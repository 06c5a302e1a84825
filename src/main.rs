// Copyright 2026 BadCompany
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

//! Command-line entry point for the StretchFS client.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sfs_client::config::Config;
use sfs_client::core::constants::config as keys;
use sfs_client::{AuthClient, Credentials};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "sfs-client", version, about = "StretchFS API client")]
struct Cli {
    /// Override SFS_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the service is reachable
    Ping,
    /// Log in, confirm the session is accepted, and print the user id
    Login {
        #[arg(short, long)]
        username: String,
        /// Falls back to SFS_PASSWORD when omitted
        #[arg(short, long)]
        password: Option<String>,
        /// Invalidate the session again before exiting
        #[arg(long)]
        logout: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
        config.validate().context("Invalid --base-url")?;
    }

    init_tracing(&config)?;
    info!(base_url = %config.base_url, "Configuration loaded");

    let client = AuthClient::from_config(&config).context("Failed to build client")?;

    let outcome = match cli.command {
        Command::Ping => client.ping().await.map(|_| println!("pong")),
        Command::Login {
            username,
            password,
            logout,
        } => {
            let password = match password {
                Some(password) => password,
                None => std::env::var(keys::ENV_PASSWORD).with_context(|| {
                    format!("--password not given and {} not set", keys::ENV_PASSWORD)
                })?,
            };
            run_login(&client, Credentials::new(username, password), logout).await
        }
    };

    if let Err(e) = outcome {
        error!(error = %e, "Command failed");
        anyhow::bail!(e.user_message());
    }
    Ok(())
}

async fn run_login(
    client: &AuthClient,
    credentials: Credentials,
    logout: bool,
) -> Result<(), sfs_client::ClientError> {
    client.login(&credentials).await?;
    client.validate_session().await?;

    if let Some(session) = client.session() {
        println!("{}", session.user_id);
    }

    if logout {
        client.logout().await?;
    }
    Ok(())
}

/// Initialize tracing subscriber based on configuration
fn init_tracing(config: &Config) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    // RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter);

    if config.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
