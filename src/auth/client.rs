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

//! Login exchange and authenticated requests.
//!
//! `AuthClient` owns its collaborators explicitly: a [`Transport`] that
//! executes HTTP and the [`SessionStore`] it writes into. The only state
//! change a login can make is the final `SessionStore::set`, so every
//! failure path leaves the stored session exactly as it was.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::core::constants::{endpoints, headers, wire};
use crate::core::errors::ClientError;
use crate::core::models::{
    error_message, Credentials, LoginRequest, LoginResponse, LoginResult, PongResponse,
};
use crate::session::{Session, SessionStore};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Transport};

/// Session-aware client for the StretchFS API
#[derive(Clone)]
pub struct AuthClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
}

impl AuthClient {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<SessionStore>) -> Self {
        Self { transport, session }
    }

    /// Build a client over [`HttpTransport`] with a fresh, unauthenticated store
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), Arc::new(SessionStore::new())))
    }

    /// Shared handle to the session store
    pub fn session_store(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Snapshot of the current session
    pub fn session(&self) -> Option<Session> {
        self.session.get()
    }

    /// Exchange credentials for a permanent session token.
    ///
    /// On `Ok(())` the session store already holds the returned user id and
    /// token. On any error the store is untouched.
    pub async fn login(&self, credentials: &Credentials) -> LoginResult {
        let request_id = Uuid::new_v4();
        let body = encode(&LoginRequest::from_credentials(credentials))?;

        debug!(
            request_id = %request_id,
            username = credentials.username(),
            "Sending login request"
        );

        let response = self
            .send(HttpRequest::post_json(endpoints::LOGIN, body), request_id)
            .await?;

        if !response.is_success() {
            let err = service_error(&response);
            warn!(
                request_id = %request_id,
                status = response.status,
                "Login rejected by service"
            );
            return Err(err);
        }

        let parsed: LoginResponse = serde_json::from_slice(&response.body).map_err(|e| {
            error!(request_id = %request_id, error = %e, "Failed to parse login response");
            ClientError::MalformedResponse(format!("Failed to parse login response: {}", e))
        })?;

        let payload = match (parsed.session, parsed.error) {
            (Some(payload), _) => payload,
            (None, Some(message)) => {
                warn!(
                    request_id = %request_id,
                    status = response.status,
                    error = %message,
                    "Login rejected by service"
                );
                return Err(ClientError::Service {
                    status: response.status,
                    message: Some(message),
                });
            }
            (None, None) => {
                error!(request_id = %request_id, "Login response missing session field");
                return Err(ClientError::MalformedResponse(
                    "Login response missing session field".to_string(),
                ));
            }
        };

        if payload.token.is_empty() {
            error!(request_id = %request_id, "Login response carried an empty token");
            return Err(ClientError::MalformedResponse(
                "Login response carried an empty session token".to_string(),
            ));
        }

        let user_id = payload.user_id;
        self.session.set(user_id, payload.token)?;

        info!(request_id = %request_id, user_id, "Login succeeded");
        Ok(())
    }

    /// POST `body` to `path` with the current session token attached.
    ///
    /// Returns the decoded JSON body. A `401` answer clears the session if
    /// it is still the one that was sent.
    pub async fn authenticated_post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ClientError> {
        let session = self.session.get().ok_or(ClientError::NotAuthenticated)?;
        self.post_with_session(&session, path, body).await
    }

    /// Invalidate the session on the service, then forget it locally
    pub async fn logout(&self) -> Result<(), ClientError> {
        let session = self.session.get().ok_or(ClientError::NotAuthenticated)?;
        self.post_with_session(&session, endpoints::LOGOUT, &serde_json::json!({}))
            .await?;

        self.session.clear_if_token(&session.token);
        info!(user_id = session.user_id, "Logged out");
        Ok(())
    }

    /// Ask the service whether the current token is still accepted
    pub async fn validate_session(&self) -> Result<(), ClientError> {
        self.authenticated_post(endpoints::SESSION_VALIDATE, &serde_json::json!({}))
            .await
            .map(|_| ())
    }

    /// Unauthenticated health check
    pub async fn ping(&self) -> Result<(), ClientError> {
        let request_id = Uuid::new_v4();
        let response = self
            .send(HttpRequest::post_json(endpoints::PING, "{}"), request_id)
            .await?;

        if !response.is_success() {
            return Err(service_error(&response));
        }

        let pong: PongResponse = serde_json::from_slice(&response.body).map_err(|e| {
            ClientError::MalformedResponse(format!("Failed to parse ping response: {}", e))
        })?;
        if pong.pong != wire::PONG {
            return Err(ClientError::MalformedResponse(format!(
                "Unexpected ping reply: {}",
                pong.pong
            )));
        }

        debug!(request_id = %request_id, "Ping succeeded");
        Ok(())
    }

    async fn post_with_session<B: Serialize + ?Sized>(
        &self,
        session: &Session,
        path: &str,
        body: &B,
    ) -> Result<Value, ClientError> {
        let request_id = Uuid::new_v4();
        let request = HttpRequest::post_json(path, encode(body)?)
            .with_header(headers::SESSION_TOKEN, session.token.clone());

        debug!(
            request_id = %request_id,
            path,
            user_id = session.user_id,
            "Sending authenticated request"
        );

        let response = self.send(request, request_id).await?;

        if response.status == 401 && self.session.clear_if_token(&session.token) {
            warn!(
                request_id = %request_id,
                user_id = session.user_id,
                "Session rejected by service, cleared"
            );
        }

        if !response.is_success() {
            let err = service_error(&response);
            warn!(request_id = %request_id, path, status = response.status, "Request rejected");
            return Err(err);
        }

        let value: Value = serde_json::from_slice(&response.body).map_err(|e| {
            error!(request_id = %request_id, path, error = %e, "Failed to parse response");
            ClientError::MalformedResponse(format!("Failed to parse response: {}", e))
        })?;

        if let Some(message) = value.get("error").and_then(Value::as_str) {
            warn!(request_id = %request_id, path, error = %message, "Request rejected");
            return Err(ClientError::Service {
                status: response.status,
                message: Some(message.to_string()),
            });
        }

        Ok(value)
    }

    async fn send(&self, request: HttpRequest, request_id: Uuid) -> Result<HttpResponse, ClientError> {
        let path = request.path.clone();
        self.transport.execute(request).await.map_err(|e| {
            error!(request_id = %request_id, path = %path, error = %e, "Transport failure");
            ClientError::Transport(e)
        })
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>, ClientError> {
    serde_json::to_vec(body)
        .map_err(|e| ClientError::InvalidRequest(format!("Failed to encode request body: {}", e)))
}

fn service_error(response: &HttpResponse) -> ClientError {
    let message = error_message(&response.body).or_else(|| {
        let preview = response.body_preview();
        (!preview.trim().is_empty()).then_some(preview)
    });
    ClientError::Service {
        status: response.status,
        message,
    }
}
