//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    /// Whether authentication succeeded
    pub success: bool,
    /// Bearer token for subsequent admin requests
    pub token: String,
}

/// Login Handler
///
/// Verifies admin credentials and issues a session token. Failed attempts
/// are throttled per client.
#[endpoint(
    tags("auth"),
    summary = "Admin Login",
    responses(
        (status_code = StatusCode::OK, description = "Authenticated"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::TOO_MANY_REQUESTS, description = "Too many failed attempts"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let client = client_ip(req);
    let request = json.into_inner();

    let token = state
        .app
        .auth
        .login(&client, &request.username, &request.password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(LoginResponse {
        success: true,
        token,
    }))
}

/// Client IP: X-Forwarded-For first (proxy deployments), then the peer
/// address.
fn client_ip(req: &Request) -> String {
    let forwarded = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim);

    if let Some(ip) = forwarded
        && !ip.is_empty()
    {
        return ip.to_owned();
    }

    let addr = req.remote_addr();

    addr.as_ipv4()
        .map(|addr| addr.ip().to_string())
        .or_else(|| addr.as_ipv6().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_owned())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use vitrine_app::auth::{AuthServiceError, MockAuthService};

    use crate::test_helpers::login_service;

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        login_service(auth, Router::with_path("api/login").post(handler))
    }

    #[tokio::test]
    async fn test_login_success_returns_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|_client, username, password| {
                username == "Jessicabat" && password == "Amordaminhavida"
            })
            .return_once(|_client, _username, _password| Ok("signed-token".to_owned()));

        let mut res = TestClient::post("http://example.com/api/login")
            .json(&json!({ "username": "Jessicabat", "password": "Amordaminhavida" }))
            .send(&make_service(auth))
            .await;

        let body: LoginResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success, "expected success flag");
        assert_eq!(body.token, "signed-token");

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_credentials_return_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_client, _username, _password| {
                Err(AuthServiceError::InvalidCredentials)
            });

        let res = TestClient::post("http://example.com/api/login")
            .json(&json!({ "username": "Jessicabat", "password": "senha-errada" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_throttled_login_returns_429() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_client, _username, _password| Err(AuthServiceError::RateLimited));

        let res = TestClient::post("http://example.com/api/login")
            .json(&json!({ "username": "Jessicabat", "password": "Amordaminhavida" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::TOO_MANY_REQUESTS));

        Ok(())
    }

    #[tokio::test]
    async fn test_forwarded_header_identifies_client() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|client, _username, _password| client == "203.0.113.7")
            .return_once(|_client, _username, _password| Ok("signed-token".to_owned()));

        let res = TestClient::post("http://example.com/api/login")
            .add_header("x-forwarded-for", "203.0.113.7, 10.0.0.1", true)
            .json(&json!({ "username": "Jessicabat", "password": "Amordaminhavida" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
