// ABOUTME: fitbit-cli - command-line harness for the Fitbit activity API client
// ABOUTME: Runs the OAuth2 flow, manages the token file, and calls activity endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Print the authorization URL, open it, and copy the `code` from the redirect
//! fitbit-cli auth-url
//!
//! # Exchange the code and write the token file
//! fitbit-cli exchange --code 1a2b3c
//!
//! # Today's activity summary
//! fitbit-cli summary
//!
//! # Steps for the seven days ending 2024-03-09
//! fitbit-cli time-series --resource steps --period 7d --date 2024-03-09
//!
//! # Manage favorites
//! fitbit-cli add-favorite 90009
//! fitbit-cli remove-favorite 90009
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fitbit_api_client::{
    config::FitbitConfig,
    errors::AppResult,
    logging::LoggingConfig,
    models::{ApiDate, DetailLevel, Period, TimeSeriesResource},
    Fitbit, FitbitClient,
};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "fitbit-cli",
    about = "Fitbit activity API client",
    long_about = "Command-line harness for the Fitbit Web API: authorize, manage the token file, and query activity endpoints. Credentials come from FITBIT_* environment variables."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Token file override (defaults to FITBIT_TOKEN_FILE or token.json)
    #[arg(long, global = true)]
    token_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Print the authorization URL to open in a browser
    AuthUrl {
        /// Anti-forgery state echoed back on the redirect
        #[arg(long, default_value = "")]
        state: String,
    },

    /// Exchange an authorization code and write the token file
    Exchange {
        /// Code from the redirect URL
        #[arg(long)]
        code: String,

        /// PKCE verifier printed by `auth-url` when FITBIT_USE_PKCE is set
        #[arg(long)]
        code_verifier: Option<String>,
    },

    /// Show the stored token (secrets redacted)
    Token,

    /// Daily activity summary
    Summary {
        /// `today` or yyyy-MM-dd
        #[arg(long, default_value = "today")]
        date: ApiDate,

        /// Fitbit user id (defaults to the token owner)
        #[arg(long)]
        user: Option<String>,
    },

    /// Activity time series over a period ending at a date
    TimeSeries {
        /// Resource such as steps, calories, minutesVeryActive
        #[arg(long)]
        resource: TimeSeriesResource,

        /// 1d, 7d, 30d, 1w, 1m, 3m, 6m, 1y, or max
        #[arg(long, default_value = "7d")]
        period: Period,

        /// End date: `today` or yyyy-MM-dd
        #[arg(long, default_value = "today")]
        date: ApiDate,

        /// Fitbit user id (defaults to the token owner)
        #[arg(long)]
        user: Option<String>,
    },

    /// Intraday time series for one day
    Intraday {
        /// Resource such as steps or calories
        #[arg(long)]
        resource: TimeSeriesResource,

        /// 1min, 5min, or 15min
        #[arg(long, default_value = "15min")]
        detail: DetailLevel,

        /// `today` or yyyy-MM-dd
        #[arg(long, default_value = "today")]
        date: ApiDate,
    },

    /// Browse the activity catalog
    ActivityTypes,

    /// Show one catalog activity
    ActivityType {
        /// Activity id
        id: String,
    },

    /// Activities the user logs most often
    Frequent,

    /// Activities the user logged recently
    Recent,

    /// Favorite activities
    Favorites {
        /// Fitbit user id (defaults to the token owner)
        #[arg(long)]
        user: Option<String>,
    },

    /// Mark an activity as favorite
    AddFavorite {
        /// Activity id
        id: String,
    },

    /// Remove an activity from the favorites
    RemoveFavorite {
        /// Activity id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let mut config = FitbitConfig::from_env()?;
    if let Some(token_file) = cli.token_file {
        config.token_file = token_file;
    }
    debug!(token_file = %config.token_file.display(), "Using token file");

    let mut fitbit = Fitbit::from_config(&config);

    match cli.command {
        Command::AuthUrl { state } => commands::auth::auth_url(&fitbit, &config, &state)?,
        Command::Exchange {
            code,
            code_verifier,
        } => commands::auth::exchange(&mut fitbit, &code, code_verifier).await?,
        Command::Token => commands::auth::show_token(&mut fitbit).await?,
        Command::Summary { date, user } => {
            let client = connect(&mut fitbit).await?;
            commands::activity::summary(client.activity(), date, user.as_deref()).await?;
        }
        Command::TimeSeries {
            resource,
            period,
            date,
            user,
        } => {
            let client = connect(&mut fitbit).await?;
            commands::activity::time_series(
                client.activity(),
                resource,
                period,
                date,
                user.as_deref(),
            )
            .await?;
        }
        Command::Intraday {
            resource,
            detail,
            date,
        } => {
            let client = connect(&mut fitbit).await?;
            commands::activity::intraday(client.activity(), resource, detail, date).await?;
        }
        Command::ActivityTypes => {
            let client = connect(&mut fitbit).await?;
            commands::activity::activity_types(client.activity()).await?;
        }
        Command::ActivityType { id } => {
            let client = connect(&mut fitbit).await?;
            commands::activity::activity_type(client.activity(), &id).await?;
        }
        Command::Frequent => {
            let client = connect(&mut fitbit).await?;
            commands::activity::frequent(client.activity()).await?;
        }
        Command::Recent => {
            let client = connect(&mut fitbit).await?;
            commands::activity::recent(client.activity()).await?;
        }
        Command::Favorites { user } => {
            let client = connect(&mut fitbit).await?;
            commands::activity::favorites(client.activity(), user.as_deref()).await?;
        }
        Command::AddFavorite { id } => {
            let client = connect(&mut fitbit).await?;
            commands::activity::add_favorite(client.activity(), &id).await?;
        }
        Command::RemoveFavorite { id } => {
            let client = connect(&mut fitbit).await?;
            commands::activity::remove_favorite(client.activity(), &id).await?;
        }
    }

    Ok(())
}

/// Load the stored token and build an API client from it
async fn connect(fitbit: &mut Fitbit) -> AppResult<FitbitClient> {
    fitbit.load_token().await?;
    fitbit.client()
}
