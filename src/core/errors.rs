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

//! Domain error types for the StretchFS client.
//!
//! Every failure is reported to the caller as a typed value. Nothing here
//! retries, and no failure path mutates the stored session.

use thiserror::Error;

/// Failures raised below HTTP: the request never produced a status line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, DNS failure or TLS handshake failure
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Connect or overall request timeout elapsed
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Any other failure while sending or reading the response
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The request could not be built (bad path, header value, ...)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Main error type for the client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Network or TLS layer failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Remote service explicitly rejected the request
    #[error("Service error: HTTP {status}{}", .message.as_ref().map(|m| format!(" - {}", m)).unwrap_or_default())]
    Service {
        status: u16,
        message: Option<String>,
    },

    /// Success status, but the body violated the response contract
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// An authenticated call was attempted without a live session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The caller's request body could not be encoded; nothing was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A session could not be stored
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// HTTP status reported by the service, when the failure carries one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for failures that happened before any response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// True when the service rejected the session token
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    /// Get user-friendly error message (no sensitive information)
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(TransportError::Timeout(_)) => {
                "The storage service did not respond in time".to_string()
            }
            ClientError::Transport(_) => "Unable to reach the storage service".to_string(),
            ClientError::Service {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Service { status: 401, .. } => "Invalid session".to_string(),
            ClientError::Service { status, .. } => {
                format!("Request rejected by the storage service (HTTP {})", status)
            }
            ClientError::MalformedResponse(_) => {
                "Unexpected response from the storage service".to_string()
            }
            ClientError::NotAuthenticated => "Please log in first".to_string(),
            ClientError::InvalidRequest(_)
            | ClientError::InvalidSession(_)
            | ClientError::Configuration(_) => {
                "Internal error".to_string()
            }
        }
    }
}
