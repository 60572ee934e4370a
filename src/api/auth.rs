// src/api/auth.rs
//! Bearer credentials and the password-grant exchange that produces them.
//!
//! A [`Credential`] is an immutable value: refreshing means asking for a
//! new one, never editing the old one in place.

use super::client::RedditHttpClient;
use super::responses::TokenResponse;
use crate::constants::DEFAULT_TOKEN_LIFETIME_SECS;
use crate::error::AppError;
use crate::types::Secret;
use chrono::{DateTime, Duration, Local};

/// The four out-of-band secrets a script app needs to authenticate.
#[derive(Debug, Clone)]
pub struct ClientSecrets {
    pub client_id: Secret,
    pub client_secret: Secret,
    pub username: Secret,
    pub password: Secret,
}

impl ClientSecrets {
    /// Environment variables holding the secrets, in field order.
    pub const ENV_VARS: [&'static str; 4] = [
        "REDDIT_CLIENT_ID",
        "REDDIT_CLIENT_SECRET",
        "REDDIT_USERNAME",
        "REDDIT_PASSWORD",
    ];

    /// Resolves secrets through `lookup`, reporting every missing one at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut found = Vec::with_capacity(Self::ENV_VARS.len());
        let mut missing = Vec::new();

        for name in Self::ENV_VARS {
            match lookup(name).map(Secret::new) {
                Some(Ok(secret)) => found.push(secret),
                _ => missing.push(name),
            }
        }

        if !missing.is_empty() {
            return Err(AppError::MissingConfiguration(format!(
                "environment variables not set: {}",
                missing.join(", ")
            )));
        }

        let mut found = found.into_iter();
        match (found.next(), found.next(), found.next(), found.next()) {
            (Some(client_id), Some(client_secret), Some(username), Some(password)) => Ok(Self {
                client_id,
                client_secret,
                username,
                password,
            }),
            _ => Err(AppError::InternalError {
                message: "secret resolution lost a value".to_string(),
                source: None,
            }),
        }
    }
}

/// A bearer token and the instant it stops being accepted.
#[derive(Debug, Clone)]
pub struct Credential {
    access_token: Secret,
    expires_at: DateTime<Local>,
}

impl Credential {
    pub fn new(access_token: Secret, expires_at: DateTime<Local>) -> Self {
        Self {
            access_token,
            expires_at,
        }
    }

    pub fn access_token(&self) -> &str {
        self.access_token.expose()
    }

    pub fn expires_at(&self) -> DateTime<Local> {
        self.expires_at
    }

    /// Time left before expiry, or `None` once expired.
    pub fn remaining_at(&self, now: DateTime<Local>) -> Option<Duration> {
        let left = self.expires_at - now;
        (left > Duration::zero()).then_some(left)
    }

    pub fn is_expired_at(&self, now: DateTime<Local>) -> bool {
        self.remaining_at(now).is_none()
    }

    /// Whether the token expires within `margin` of `now`.
    pub fn needs_refresh_at(&self, now: DateTime<Local>, margin: Duration) -> bool {
        self.remaining_at(now).map_or(true, |left| left <= margin)
    }

    /// Human-readable validity, e.g. `valid for 59 min, expires at 14:05`.
    pub fn validity_summary(&self, now: DateTime<Local>) -> String {
        match self.remaining_at(now) {
            Some(left) => format!(
                "valid for {} min, expires at {}",
                left.num_minutes(),
                self.expires_at.format("%H:%M")
            ),
            None => format!("expired at {}", self.expires_at.format("%H:%M")),
        }
    }
}

/// Exchanges the account's password for a bearer credential.
pub async fn authorize(
    client: &RedditHttpClient,
    token_url: &str,
    secrets: &ClientSecrets,
) -> Result<Credential, AppError> {
    log::info!("Requesting access token from {}", token_url);

    let form = [
        ("grant_type", "password"),
        ("username", secrets.username.expose()),
        ("password", secrets.password.expose()),
    ];

    let response = client
        .http()
        .post(token_url)
        .basic_auth(
            secrets.client_id.expose(),
            Some(secrets.client_secret.expose()),
        )
        .form(&form)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    let credential = credential_from_token_response(status, &body, Local::now())?;

    log::info!(
        "Got token successfully ({})",
        credential.validity_summary(Local::now())
    );
    Ok(credential)
}

/// Interprets a token endpoint response received at `now`.
pub fn credential_from_token_response(
    status: reqwest::StatusCode,
    body: &str,
    now: DateTime<Local>,
) -> Result<Credential, AppError> {
    if !status.is_success() {
        return Err(AppError::Authorization(format!(
            "token endpoint returned HTTP {}",
            status
        )));
    }

    let token: TokenResponse = serde_json::from_str(body).map_err(|e| {
        AppError::Authorization(format!("token endpoint returned unreadable JSON: {}", e))
    })?;

    let access_token = match token.access_token.map(Secret::new) {
        Some(Ok(secret)) => secret,
        _ => {
            let reason = token
                .error
                .map(|e| format!(" ({})", e))
                .unwrap_or_default();
            return Err(AppError::Authorization(format!(
                "no access token in response{}; check that credentials are OK",
                reason
            )));
        }
    };

    let lifetime = token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS);
    let expires_at = (lifetime >= 0)
        .then(|| Duration::try_seconds(lifetime))
        .flatten()
        .and_then(|validity| now.checked_add_signed(validity))
        .ok_or_else(|| {
            AppError::Authorization(format!(
                "token endpoint returned an unusable expires_in of {}",
                lifetime
            ))
        })?;

    Ok(Credential::new(access_token, expires_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use reqwest::StatusCode;
    use std::collections::HashMap;

    fn at(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(secs, 0).single().unwrap()
    }

    #[test]
    fn secrets_report_every_missing_variable() {
        let env: HashMap<&str, &str> =
            [("REDDIT_CLIENT_ID", "id"), ("REDDIT_PASSWORD", "pw")].into();

        let err = ClientSecrets::from_lookup(|name| env.get(name).map(|v| v.to_string()))
            .unwrap_err();

        match err {
            AppError::MissingConfiguration(msg) => {
                assert!(msg.contains("REDDIT_CLIENT_SECRET"));
                assert!(msg.contains("REDDIT_USERNAME"));
                assert!(!msg.contains("REDDIT_PASSWORD"));
            }
            other => panic!("Expected MissingConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn blank_secrets_count_as_missing() {
        let err = ClientSecrets::from_lookup(|_| Some("  ".to_string())).unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));
    }

    #[test]
    fn secrets_resolve_in_declared_order() {
        let secrets = ClientSecrets::from_lookup(|name| Some(name.to_lowercase())).unwrap();
        assert_eq!(secrets.client_id.expose(), "reddit_client_id");
        assert_eq!(secrets.password.expose(), "reddit_password");
    }

    #[test]
    fn token_response_uses_expires_in() {
        let body = r#"{"access_token": "abc", "token_type": "bearer", "expires_in": 86400}"#;
        let credential = credential_from_token_response(StatusCode::OK, body, at(1000)).unwrap();

        assert_eq!(credential.access_token(), "abc");
        assert_eq!(credential.expires_at(), at(1000 + 86400));
    }

    #[test]
    fn token_response_defaults_to_one_hour() {
        let credential =
            credential_from_token_response(StatusCode::OK, r#"{"access_token": "abc"}"#, at(0))
                .unwrap();
        assert_eq!(credential.expires_at(), at(3600));
    }

    #[test]
    fn token_response_without_token_is_authorization_error() {
        let err = credential_from_token_response(
            StatusCode::OK,
            r#"{"error": "invalid_grant"}"#,
            at(0),
        )
        .unwrap_err();

        match err {
            AppError::Authorization(msg) => assert!(msg.contains("invalid_grant")),
            other => panic!("Expected Authorization, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_lifetime_is_authorization_error() {
        for lifetime in [i64::MAX, -1] {
            let body = format!(r#"{{"access_token": "abc", "expires_in": {}}}"#, lifetime);
            let err = credential_from_token_response(StatusCode::OK, &body, at(0)).unwrap_err();

            match err {
                AppError::Authorization(msg) => assert!(msg.contains("expires_in")),
                other => panic!("Expected Authorization, got {:?}", other),
            }
        }
    }

    #[test]
    fn rejected_exchange_is_authorization_error() {
        let err = credential_from_token_response(StatusCode::UNAUTHORIZED, "", at(0)).unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
    }

    #[test]
    fn expiry_bookkeeping() {
        let credential = Credential::new(Secret::new("t").unwrap(), at(3600));

        assert_eq!(credential.remaining_at(at(0)), Some(Duration::seconds(3600)));
        assert!(!credential.is_expired_at(at(3599)));
        assert!(credential.is_expired_at(at(3600)));
        assert!(credential.needs_refresh_at(at(3550), Duration::seconds(60)));
        assert!(!credential.needs_refresh_at(at(3000), Duration::seconds(60)));
        assert!(credential
            .validity_summary(at(0))
            .starts_with("valid for 60 min"));
        assert!(credential.validity_summary(at(4000)).starts_with("expired at"));
    }
}
