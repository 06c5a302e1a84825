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

//! StretchFS client constants - single source of truth for endpoints,
//! header names and configuration keys.

/// Service endpoints (relative to the configured base URL)
pub mod endpoints {
    /// Exchange credentials for a session
    pub const LOGIN: &str = "/user/login";
    /// Invalidate the current session
    pub const LOGOUT: &str = "/user/logout";
    /// Check that the current session token is still accepted
    pub const SESSION_VALIDATE: &str = "/user/session/validate";
    /// Health check
    pub const PING: &str = "/ping";
}

/// HTTP header names and values
pub mod headers {
    /// Header carrying the session token on authenticated requests
    pub const SESSION_TOKEN: &str = "X-StretchFS-Token";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const ACCEPT: &str = "Accept";
    pub const APPLICATION_JSON: &str = "application/json";
}

/// Wire field values
pub mod wire {
    /// Expected value of the `pong` field returned by `/ping`
    pub const PONG: &str = "pong";
}

/// Configuration Environment Variables
pub mod config {
    pub const ENV_BASE_URL: &str = "SFS_BASE_URL";
    pub const ENV_REQUEST_TIMEOUT_SECS: &str = "SFS_REQUEST_TIMEOUT_SECS";
    pub const ENV_CONNECT_TIMEOUT_SECS: &str = "SFS_CONNECT_TIMEOUT_SECS";
    pub const ENV_ACCEPT_INVALID_CERTS: &str = "SFS_ACCEPT_INVALID_CERTS";
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
    pub const ENV_PASSWORD: &str = "SFS_PASSWORD";

    pub const DEFAULT_BASE_URL: &str = "https://localhost:8161";
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
    pub const DEFAULT_LOG_LEVEL: &str = "info";
    pub const DEFAULT_LOG_FORMAT: &str = "text";
}

/// Transport limits
pub mod limits {
    /// Maximum number of body bytes echoed into error messages and logs
    pub const MAX_ERROR_BODY_CHARS: usize = 256;
    /// Idle pooled connections are dropped after this many seconds
    pub const POOL_IDLE_TIMEOUT_SECS: u64 = 90;
}
