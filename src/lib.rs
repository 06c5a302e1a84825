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

//! sfs-client: a session-aware client for the StretchFS storage API.
//!
//! The crate authenticates against the service with a username and password,
//! keeps the returned session (user id + token) in a shared [`SessionStore`],
//! and attaches that token to later authenticated requests.
//!
//! HTTP execution sits behind the [`Transport`] trait so the client can be
//! driven by [`HttpTransport`] (reqwest) in production or by a scripted
//! transport in tests.

pub mod auth;
pub mod config;
pub mod core;
pub mod session;
pub mod transport;

pub use crate::auth::AuthClient;
pub use crate::core::errors::{ClientError, TransportError};
pub use crate::core::models::{Credentials, LoginResult};
pub use crate::session::{Session, SessionStore};
pub use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Method, Transport};
