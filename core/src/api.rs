//! Network-facing client: build, send, parse.
//!
//! # Design
//! `ApiClient` composes the stateless `TodoClient` with a `Transport`. Each
//! call issues at most one request and returns a tagged result: `Ok` with
//! entities (possibly an empty list) or `Err` with the reason there is no
//! result. Every failure is logged once here, so callers only decide how
//! to present it.

use tracing::{debug, error};

use crate::client::{TodoClient, DEFAULT_BASE_URL};
use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};
use crate::todo::Task;
use crate::transport::{Transport, UreqTransport};
use crate::user::User;

/// Blocking client for the users and todos endpoints.
#[derive(Debug)]
pub struct ApiClient<T = UreqTransport> {
    client: TodoClient,
    transport: T,
}

impl ApiClient<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(TodoClient::new(base_url), UreqTransport::new())
    }
}

impl Default for ApiClient<UreqTransport> {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        let result = self
            .send(&self.client.build_list_users())
            .and_then(|response| self.client.parse_list_users(response));
        logged("list users", result)
    }

    /// Rejects a non-numeric `id` without sending anything.
    pub fn get_user_by_id(&self, id: &str) -> Result<User> {
        let result = self
            .client
            .build_get_user(id)
            .and_then(|request| self.send(&request))
            .and_then(|response| self.client.parse_get_user(response));
        logged("get user", result)
    }

    pub fn list_todos(&self) -> Result<Vec<Task>> {
        let result = self
            .send(&self.client.build_list_todos())
            .and_then(|response| self.client.parse_list_todos(response));
        logged("list todos", result)
    }

    /// Rejects a non-numeric `user_id` without sending anything.
    pub fn list_todos_for_user(&self, user_id: &str) -> Result<Vec<Task>> {
        let result = self
            .client
            .build_list_todos_for_user(user_id)
            .and_then(|request| self.send(&request))
            .and_then(|response| self.client.parse_list_todos(response));
        logged("list todos for user", result)
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        debug!(url = %request.url, "GET");
        self.transport.execute(request)
    }
}

fn logged<R>(operation: &str, result: Result<R>) -> Result<R> {
    if let Err(e) = &result {
        error!(operation, error = %e, "request failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::ApiError;
    use crate::testing::count_errors;
    use crate::todo::TodoItem;

    /// Replays one canned outcome and records every request it sees.
    struct StubTransport {
        outcome: Result<HttpResponse>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl StubTransport {
        fn responding(status: u16, status_text: &str, body: &str) -> Self {
            Self {
                outcome: Ok(HttpResponse {
                    status,
                    status_text: status_text.to_string(),
                    headers: Vec::new(),
                    body: body.to_string(),
                }),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                outcome: Err(ApiError::Transport(message.to_string())),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn urls(&self) -> Vec<String> {
            self.requests.borrow().iter().map(|r| r.url.clone()).collect()
        }
    }

    impl Transport for StubTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse> {
            self.requests.borrow_mut().push(request.clone());
            self.outcome.clone()
        }
    }

    fn api(transport: StubTransport) -> ApiClient<StubTransport> {
        ApiClient::with_transport(TodoClient::new("http://api.test"), transport)
    }

    #[test]
    fn invalid_user_id_never_reaches_transport() {
        let api = api(StubTransport::responding(200, "OK", "[]"));
        let (result, errors) = count_errors(|| api.list_todos_for_user("abc"));
        assert!(matches!(result, Err(ApiError::InvalidUserId(ref id)) if id == "abc"));
        assert!(api.transport().urls().is_empty());
        assert_eq!(errors, 1);
    }

    #[test]
    fn malformed_user_id_is_rejected_before_lookup() {
        let api = api(StubTransport::responding(200, "OK", "{}"));
        for bad in ["1/todos", ""] {
            let (result, errors) = count_errors(|| api.get_user_by_id(bad));
            assert!(matches!(result, Err(ApiError::InvalidUserId(_))), "{bad:?}");
            assert_eq!(errors, 1);
        }
        assert!(api.transport().urls().is_empty());
    }

    #[test]
    fn numeric_user_id_requests_user_todos_path() {
        let body = r#"[{"userId":1,"id":1,"title":"delectus aut autem","completed":false}]"#;
        let api = api(StubTransport::responding(200, "OK", body));
        let todos = api.list_todos_for_user("1").unwrap();
        assert_eq!(api.transport().urls(), vec!["http://api.test/users/1/todos".to_string()]);
        assert_eq!(todos.len(), 1);
        assert!(todos[0].is_owned_by(&1.into()));
    }

    #[test]
    fn each_call_issues_exactly_one_request() {
        let api = api(StubTransport::responding(200, "OK", "[]"));
        api.list_users().unwrap();
        api.list_todos().unwrap();
        assert_eq!(
            api.transport().urls(),
            vec![
                "http://api.test/users".to_string(),
                "http://api.test/todos".to_string()
            ]
        );
    }

    #[test]
    fn empty_success_is_distinct_from_failure() {
        let empty = api(StubTransport::responding(200, "OK", "[]"));
        assert!(matches!(empty.list_todos(), Ok(ref todos) if todos.is_empty()));

        let down = api(StubTransport::failing("connection refused"));
        assert!(matches!(down.list_todos(), Err(ApiError::Transport(_))));
    }

    #[test]
    fn transport_failure_is_logged_and_returned() {
        let api = api(StubTransport::failing("dns lookup failed"));
        let (result, errors) = count_errors(|| api.list_users());
        assert!(matches!(result, Err(ApiError::Transport(ref m)) if m == "dns lookup failed"));
        assert_eq!(errors, 1);
    }

    #[test]
    fn http_failure_carries_status() {
        let api = api(StubTransport::responding(503, "Service Unavailable", ""));
        let err = api.get_user_by_id("1").unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 503, .. }));
    }

    #[test]
    fn get_user_by_id_reads_single_record() {
        let body = r#"{"id":2,"name":"Ervin Howell","email":"Shanna@melissa.tv"}"#;
        let api = api(StubTransport::responding(200, "OK", body));
        let user = api.get_user_by_id("2").unwrap();
        assert_eq!(api.transport().urls(), vec!["http://api.test/users/2".to_string()]);
        assert_eq!(user.name.as_deref(), Some("Ervin Howell"));
        assert!(user.todos().is_empty());
    }

    #[test]
    fn default_client_uses_public_base_url() {
        assert_eq!(ApiClient::<UreqTransport>::default().base_url(), DEFAULT_BASE_URL);
    }
}
