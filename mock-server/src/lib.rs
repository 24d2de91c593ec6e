use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

/// Records served by the routes. Kept as raw JSON so tests can seed
/// malformed entries next to well-formed ones.
#[derive(Clone, Debug, Default)]
pub struct Fixtures {
    pub users: Vec<Value>,
    pub todos: Vec<Value>,
}

impl Fixtures {
    pub fn new(users: &[User], todos: &[Todo]) -> Self {
        Self {
            users: users.iter().map(to_record).collect(),
            todos: todos.iter().map(to_record).collect(),
        }
    }

    /// A small slice of the public API's data set.
    pub fn sample() -> Self {
        let users = [
            user(1, "Leanne Graham", "Sincere@april.biz"),
            user(2, "Ervin Howell", "Shanna@melissa.tv"),
            user(3, "Clementine Bauch", "Nathan@yesenia.net"),
        ];
        let todos = [
            todo(1, 1, "delectus aut autem", false),
            todo(1, 2, "quis ut nam facilis et officia qui", false),
            todo(1, 3, "fugiat veniam minus", false),
            todo(1, 4, "et porro tempora", true),
            todo(2, 5, "suscipit repellat esse quibusdam voluptatem incidunt", false),
            todo(2, 6, "distinctio vitae autem nihil ut molestias quo", true),
            todo(2, 7, "et itaque necessitatibus maxime molestiae qui quas velit", true),
        ];
        Self::new(&users, &todos)
    }
}

pub type Db = Arc<Fixtures>;

pub fn app() -> Router {
    app_with(Fixtures::sample())
}

pub fn app_with(fixtures: Fixtures) -> Router {
    let db: Db = Arc::new(fixtures);
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/todos", get(list_user_todos))
        .route("/todos", get(list_todos))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Fixtures::sample()).await
}

pub async fn run_with(listener: TcpListener, fixtures: Fixtures) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(fixtures)).await
}

async fn list_users(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(db.users.clone())
}

async fn get_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    db.users
        .iter()
        .find(|u| u["id"] == id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, Json(json!({}))))
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(db.todos.clone())
}

async fn list_user_todos(State(db): State<Db>, Path(id): Path<u64>) -> Json<Vec<Value>> {
    Json(
        db.todos
            .iter()
            .filter(|t| t["userId"] == id)
            .cloned()
            .collect(),
    )
}

fn user(id: u64, name: &str, email: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn todo(user_id: u64, id: u64, title: &str, completed: bool) -> Todo {
    Todo {
        user_id,
        id,
        title: title.to_string(),
        completed,
    }
}

fn to_record<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
