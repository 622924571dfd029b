//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use vitrine_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid credentials")
        }
        AuthServiceError::InvalidToken => {
            StatusError::unauthorized().brief("Invalid or expired token")
        }
        AuthServiceError::RateLimited => StatusError::too_many_requests()
            .brief("Too many login attempts, try again later"),
        AuthServiceError::Hash(source) => {
            error!("password verification failed: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to issue session token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
