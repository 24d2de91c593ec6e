//! Runs CLI commands against the live mock server and checks their output.

use mock_server::Fixtures;
use serde_json::Value;
use tmac_cli::cli::Commands;
use tmac_cli::commands;
use tmac_core::ApiClient;

fn spawn() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, Fixtures::sample()).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn run(api: &ApiClient, command: Commands) -> String {
    let mut out = Vec::new();
    commands::execute(api, command, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn list(user: Option<&str>, complete: Option<bool>) -> Commands {
    Commands::List {
        user: user.map(str::to_string),
        complete,
        export: None,
    }
}

#[test]
fn list_shows_user_todos_as_table() {
    let api = ApiClient::new(&spawn());
    let text = run(&api, list(Some("1"), None));
    assert!(text.contains("Showing todos for user: 1"));
    assert!(text.contains("PENDING   delectus aut autem"));
    assert!(text.contains("COMPLETE  et porro tempora"));
}

#[test]
fn list_applies_completion_filter() {
    let api = ApiClient::new(&spawn());
    let text = run(&api, list(Some("2"), Some(true)));
    assert!(text.contains("Filtering by complete: true"));
    assert!(!text.contains("PENDING"));
    assert_eq!(text.matches("COMPLETE").count(), 2);
}

#[test]
fn no_todos_is_distinct_from_failed_request() {
    let api = ApiClient::new(&spawn());
    let empty = run(&api, list(Some("3"), None));
    assert!(empty.contains("No todos found for user 3"));
    assert!(!empty.contains("Error"));

    let invalid = run(&api, list(Some("abc"), None));
    assert!(invalid.starts_with("Error fetching todos: invalid user id"));
    assert!(!invalid.contains("No todos found"));
}

#[test]
fn fetch_failure_does_not_fail_the_command() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let api = ApiClient::new(&format!("http://{addr}"));
    let text = run(&api, Commands::Users { export: None });
    assert!(text.starts_with("Error fetching users: transport failure"));
}

#[test]
fn stat_reports_totals() {
    let api = ApiClient::new(&spawn());
    let text = run(&api, Commands::Stat { user: "2".to_string() });
    assert!(text.contains("Statistics for user 2"));
    assert!(text.contains("total       3"));
    assert!(text.contains("completed   2"));
    assert!(text.contains("completion  66.7%"));
    assert!(text.contains("overdue     0"));
}

#[test]
fn list_export_writes_todo_snapshots() {
    let api = ApiClient::new(&spawn());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.json");

    let text = run(
        &api,
        Commands::List {
            user: Some("1".to_string()),
            complete: Some(false),
            export: Some(path.clone()),
        },
    );
    assert!(text.contains("Exported 3 todos to"));

    let exported: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let items = exported.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["userId"], 1);
    assert_eq!(items[0]["completed"], false);
    assert!(items[0].get("priority").is_none());
}

#[test]
fn users_export_writes_user_snapshots() {
    let api = ApiClient::new(&spawn());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");

    let text = run(&api, Commands::Users { export: Some(path.clone()) });
    assert!(text.contains("Leanne Graham"));

    let exported: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(exported.as_array().unwrap().len(), 3);
    assert_eq!(exported[1]["email"], "Shanna@melissa.tv");
    assert_eq!(exported[1]["todos"], serde_json::json!([]));
}

#[test]
fn export_to_missing_directory_is_an_error() {
    let api = ApiClient::new(&spawn());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("todos.json");

    let mut out = Vec::new();
    let result = commands::execute(
        &api,
        Commands::List {
            user: None,
            complete: None,
            export: Some(path),
        },
        &mut out,
    );
    assert!(result.is_err());
}
