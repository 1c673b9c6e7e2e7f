// ABOUTME: Authorization commands for fitbit-cli
// ABOUTME: Authorization URL, code exchange, and token inspection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::print_json;
use chrono::{DateTime, Utc};
use fitbit_api_client::{
    config::FitbitConfig,
    errors::AppResult,
    oauth2_client::{OAuth2Token, PkceParams},
    Fitbit,
};
use serde::Serialize;
use tracing::info;

/// Token details that are safe to print
#[derive(Serialize)]
struct TokenInfo<'a> {
    token_type: &'a str,
    user_id: Option<&'a str>,
    scope: Option<&'a str>,
    expires_at: Option<DateTime<Utc>>,
    expired: bool,
    refreshable: bool,
}

impl<'a> From<&'a OAuth2Token> for TokenInfo<'a> {
    fn from(token: &'a OAuth2Token) -> Self {
        Self {
            token_type: &token.token_type,
            user_id: token.user_id.as_deref(),
            scope: token.scope.as_deref(),
            expires_at: token.expires_at,
            expired: token.is_expired(),
            refreshable: token.can_refresh(),
        }
    }
}

/// Print the authorization URL (and the PKCE verifier when PKCE is enabled)
pub fn auth_url(fitbit: &Fitbit, config: &FitbitConfig, state: &str) -> AppResult<()> {
    if config.oauth.use_pkce {
        let pkce = PkceParams::generate();
        println!("{}", fitbit.auth_url_with_pkce(state, &pkce)?);
        eprintln!(
            "PKCE verifier (pass to `exchange --code-verifier`): {}",
            pkce.code_verifier
        );
    } else {
        println!("{}", fitbit.auth_url_with_state(state)?);
    }
    Ok(())
}

/// Exchange an authorization code; the token is written to the token file
pub async fn exchange(
    fitbit: &mut Fitbit,
    code: &str,
    code_verifier: Option<String>,
) -> AppResult<()> {
    let token = match code_verifier {
        Some(verifier) => {
            let pkce = PkceParams::from_verifier(verifier);
            fitbit.exchange_token_with_pkce(code, &pkce).await?
        }
        None => fitbit.exchange_token(code).await?,
    };
    info!("Token saved");
    print_json(&TokenInfo::from(&token))
}

/// Print the stored token without secrets
pub async fn show_token(fitbit: &mut Fitbit) -> AppResult<()> {
    fitbit.load_token().await?;
    let token = fitbit.token().await?;
    print_json(&TokenInfo::from(&token))
}
