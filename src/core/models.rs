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

//! Wire models for the StretchFS user API.
//!
//! Field names and casing (`tokenType`, `UserId`, `token`) are part of the
//! service contract and must not change.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::core::errors::ClientError;

/// Outcome of a login exchange. `Ok(())` means the session store already
/// holds the new session.
pub type LoginResult = Result<(), ClientError>;

/// Username/password pair supplied by the caller.
///
/// The password is held as a secret and redacted from `Debug` output.
/// Empty strings are accepted; validation is left to the service.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

/// Lifetime of the token requested at login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Permanent,
}

/// Body of `POST /user/login`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub token_type: TokenType,
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> LoginRequest<'a> {
    pub fn from_credentials(credentials: &'a Credentials) -> Self {
        Self {
            token_type: TokenType::Permanent,
            username: credentials.username(),
            password: credentials.password(),
        }
    }
}

/// Session object returned by a successful login
#[derive(Deserialize)]
pub struct SessionPayload {
    #[serde(rename = "UserId")]
    pub user_id: i64,
    pub token: String,
}

/// Body of a `2xx` login response.
///
/// The service answers rejected logins with `200` and an `error` field, so
/// both shapes are accepted here and told apart by the caller.
#[derive(Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub session: Option<SessionPayload>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /ping`
#[derive(Debug, Deserialize)]
pub struct PongResponse {
    pub pong: String,
}

/// Extract the `error` string from a JSON error body, if there is one.
pub fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(str::to_string)
}
