//! Hand-off of validated signups to whatever creates accounts.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use n0_error::{Result, StdResultExt, stack_error};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::signup::Registration;

/// Receives validated signups.
#[async_trait]
pub trait Registrar: Send + Sync + 'static {
    async fn register(&self, registration: Registration) -> Result<Account, RegisterError>;
}

#[stack_error(derive)]
pub enum RegisterError {
    #[error("Username {username} is already taken")]
    UsernameTaken { username: String },
    #[error("Signup rejected: {detail}")]
    Rejected { status: u16, detail: String },
    #[error("Account service responded with status {status}")]
    UnexpectedStatus { status: u16 },
    #[error("Could not reach the account service")]
    Transport {
        #[error(std_err)]
        source: reqwest::Error,
    },
    #[error("Account service sent an unreadable response")]
    InvalidResponse {
        #[error(std_err)]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub id: Option<AccountId>,
    pub username: String,
    pub full_name: String,
}

/// Account ids are whatever the service hands back; numeric and string ids both occur.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountId {
    Number(i64),
    Text(String),
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountId::Number(id) => write!(f, "{id}"),
            AccountId::Text(id) => f.write_str(id),
        }
    }
}

/// Placeholder registrar: records the signup and creates nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRegistrar;

#[async_trait]
impl Registrar for LogRegistrar {
    async fn register(&self, registration: Registration) -> Result<Account, RegisterError> {
        info!(
            full_name = %registration.full_name,
            username = %registration.username,
            password_set = !registration.password.expose_secret().is_empty(),
            "signup submitted"
        );
        Ok(Account {
            id: None,
            username: registration.username,
            full_name: registration.full_name,
        })
    }
}

/// Posts signups as JSON to the account service.
#[derive(derive_more::Debug, Clone)]
pub struct HttpRegistrar {
    endpoint: Url,
    #[debug("reqwest::Client")]
    client: reqwest::Client,
}

impl HttpRegistrar {
    pub fn new(api_url: &Url, register_path: &str, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            n0_error::bail_any!("request timeout must be greater than zero");
        }
        let mut endpoint = api_url.clone();
        endpoint.set_query(None);
        endpoint.set_fragment(None);
        endpoint
            .path_segments_mut()
            .map_err(|_| n0_error::anyerr!("api url {api_url} cannot take a path"))?
            .pop_if_empty()
            .extend(register_path.split('/').filter(|segment| !segment.is_empty()));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .std_context("building http client")?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Registrar for HttpRegistrar {
    async fn register(&self, registration: Registration) -> Result<Account, RegisterError> {
        debug!(endpoint = %self.endpoint, username = %registration.username, "sending signup");
        let res = self
            .client
            .post(self.endpoint.clone())
            .json(&registration.body())
            .send()
            .await
            .map_err(|source| RegisterError::Transport { source })?;

        let status = res.status();
        if status.is_success() {
            let account: Account = res
                .json()
                .await
                .map_err(|source| RegisterError::InvalidResponse { source })?;
            info!(username = %account.username, "account created");
            return Ok(account);
        }

        match status {
            StatusCode::CONFLICT => Err(RegisterError::UsernameTaken {
                username: registration.username,
            }),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let fallback = status.canonical_reason().unwrap_or("invalid request");
                let detail = res
                    .json::<serde_json::Value>()
                    .await
                    .ok()
                    .and_then(|body| body.get("detail")?.as_str().map(str::to_owned))
                    .unwrap_or_else(|| fallback.to_string());
                Err(RegisterError::Rejected {
                    status: status.as_u16(),
                    detail,
                })
            }
            _ => {
                warn!(endpoint = %self.endpoint, %status, "signup request failed");
                Err(RegisterError::UnexpectedStatus {
                    status: status.as_u16(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, Router, http::StatusCode, routing::post};
    use n0_tracing_test::traced_test;
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use super::*;
    use crate::signup::{Field, SignupEvent, SignupForm, SubmitOutcome};

    fn registration(username: &str, password: &str) -> Registration {
        let mut form = SignupForm::default();
        form.apply(SignupEvent::input(Field::FullName, "Ada Lovelace"));
        form.apply(SignupEvent::input(Field::Username, username));
        form.apply(SignupEvent::input(Field::Password, password));
        form.apply(SignupEvent::input(Field::ConfirmPassword, password));
        match form.apply(SignupEvent::Submit) {
            Some(SubmitOutcome::Accepted(submission)) => submission.registration(),
            _ => panic!("form should validate"),
        }
    }

    /// Serves `router` on a random local port and returns its base url.
    async fn serve(router: Router) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        Url::parse(&format!("http://{addr}")).unwrap()
    }

    fn registrar(base: &Url) -> HttpRegistrar {
        HttpRegistrar::new(base, "/auth/register", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    #[traced_test]
    async fn log_registrar_records_without_password() {
        let account = LogRegistrar
            .register(registration("ada", "hunter2"))
            .await
            .unwrap();
        assert_eq!(account.username, "ada");
        assert_eq!(account.full_name, "Ada Lovelace");
        assert_eq!(account.id, None);
        assert!(logs_contain("signup submitted"));
        assert!(logs_contain("ada"));
        assert!(!logs_contain("hunter2"));
    }

    #[tokio::test]
    async fn http_registrar_creates_account() {
        let seen = Arc::new(Mutex::new(None::<Value>));
        let router = Router::new().route(
            "/auth/register",
            post({
                let seen = seen.clone();
                move |Json(body): Json<Value>| async move {
                    let reply = json!({
                        "id": 7,
                        "username": body["username"],
                        "full_name": body["full_name"],
                    });
                    *seen.lock().unwrap() = Some(body);
                    (StatusCode::CREATED, Json(reply))
                }
            }),
        );
        let base = serve(router).await;

        let account = registrar(&base)
            .register(registration("ada", "x1"))
            .await
            .unwrap();
        assert_eq!(account.id, Some(AccountId::Number(7)));
        assert_eq!(account.username, "ada");

        let body = seen.lock().unwrap().take().unwrap();
        assert_eq!(
            body,
            json!({"full_name": "Ada Lovelace", "username": "ada", "password": "x1"})
        );
    }

    #[tokio::test]
    async fn http_registrar_maps_conflict_to_username_taken() {
        let router = Router::new().route(
            "/auth/register",
            post(|| async { (StatusCode::CONFLICT, Json(json!({"detail": "exists"}))) }),
        );
        let base = serve(router).await;

        let err = registrar(&base)
            .register(registration("ada", "x1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegisterError::UsernameTaken { ref username } if username == "ada"));
        assert_eq!(err.to_string(), "Username ada is already taken");
    }

    #[tokio::test]
    async fn http_registrar_surfaces_validation_detail() {
        let router = Router::new().route(
            "/auth/register",
            post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"detail": "password too weak"})),
                )
            }),
        );
        let base = serve(router).await;

        let err = registrar(&base)
            .register(registration("ada", "x1"))
            .await
            .unwrap_err();
        match err {
            RegisterError::Rejected { status, detail } => {
                assert_eq!(status, 422);
                assert_eq!(detail, "password too weak");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn http_registrar_falls_back_when_detail_missing() {
        let router = Router::new().route(
            "/auth/register",
            post(|| async { (StatusCode::BAD_REQUEST, "nope") }),
        );
        let base = serve(router).await;

        let err = registrar(&base)
            .register(registration("ada", "x1"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, RegisterError::Rejected { status: 400, ref detail } if detail == "Bad Request")
        );
    }

    #[tokio::test]
    async fn http_registrar_reports_server_errors() {
        let router = Router::new().route(
            "/auth/register",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = serve(router).await;

        let err = registrar(&base)
            .register(registration("ada", "x1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegisterError::UnexpectedStatus { status: 500 }));
    }

    #[tokio::test]
    async fn http_registrar_reports_unreachable_service() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let base = Url::parse(&format!("http://{addr}")).unwrap();

        let err = registrar(&base)
            .register(registration("ada", "x1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegisterError::Transport { .. }));
    }

    #[test]
    fn endpoint_joins_base_path() {
        let base = Url::parse("https://api.example.test/v1/").unwrap();
        let registrar = HttpRegistrar::new(&base, "/auth/register", Duration::from_secs(1)).unwrap();
        assert_eq!(
            registrar.endpoint().as_str(),
            "https://api.example.test/v1/auth/register"
        );
    }

    #[test]
    fn endpoint_drops_query_and_fragment() {
        let base = Url::parse("https://api.test/v1?k=1#top").unwrap();
        let registrar = HttpRegistrar::new(&base, "/auth/register", Duration::from_secs(1)).unwrap();
        assert_eq!(registrar.endpoint().as_str(), "https://api.test/v1/auth/register");

        let base = Url::parse("https://api.test").unwrap();
        let registrar = HttpRegistrar::new(&base, "auth/register/", Duration::from_secs(1)).unwrap();
        assert_eq!(registrar.endpoint().as_str(), "https://api.test/auth/register");
    }

    #[test]
    fn rejects_unusable_settings() {
        let base = Url::parse("https://api.test").unwrap();
        let err = HttpRegistrar::new(&base, "/auth/register", Duration::ZERO).unwrap_err();
        assert!(err.to_string().contains("timeout"));

        let base = Url::parse("mailto:ops@example.test").unwrap();
        assert!(HttpRegistrar::new(&base, "/auth/register", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn http_registrar_reports_undecodable_success_body() {
        let router = Router::new().route(
            "/auth/register",
            post(|| async { (StatusCode::CREATED, "not json") }),
        );
        let base = serve(router).await;

        let err = registrar(&base)
            .register(registration("ada", "x1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegisterError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn http_registrar_times_out_slow_service() {
        let router = Router::new().route(
            "/auth/register",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                StatusCode::CREATED
            }),
        );
        let base = serve(router).await;
        let registrar =
            HttpRegistrar::new(&base, "/auth/register", Duration::from_millis(200)).unwrap();

        let err = registrar
            .register(registration("ada", "x1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegisterError::Transport { ref source } if source.is_timeout()));
    }

    #[test]
    fn account_ids_accept_numbers_and_strings() {
        let numeric: Account =
            serde_json::from_value(json!({"id": 3, "username": "a", "full_name": "A"})).unwrap();
        assert_eq!(numeric.id.unwrap().to_string(), "3");
        let text: Account =
            serde_json::from_value(json!({"id": "u-1", "username": "a", "full_name": "A"}))
                .unwrap();
        assert_eq!(text.id, Some(AccountId::Text("u-1".into())));
        let missing: Account =
            serde_json::from_value(json!({"username": "a", "full_name": "A"})).unwrap();
        assert_eq!(missing.id, None);
    }
}
