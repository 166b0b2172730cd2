// SPDX-License-Identifier: Apache-2.0

//! GitHub authentication status command.

use reposcore_core::github::auth;

use crate::commands::types::AuthStatusResult;

/// Run the status command - show which token source would be used.
pub fn run_status() -> AuthStatusResult {
    match auth::resolve_token() {
        Some((_, source)) => AuthStatusResult {
            authenticated: true,
            method: Some(source),
        },
        None => AuthStatusResult {
            authenticated: false,
            method: None,
        },
    }
}
