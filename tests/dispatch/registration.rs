//! Registering commands one at a time, in bulk, and by convention.

use courier::{register_commands, CommandArg, Config, RegistrationError, Reply, Server, StatusCode};

use crate::handlers::{self, AppState};
use crate::support::{post_json, start};

fn status_arg(status: StatusCode) -> CommandArg<()> {
    CommandArg::handler(move |_req, _ctx| async move { Some(Reply::status(status)) })
}

#[tokio::test]
async fn multiple_commands() {
    let mut server = Server::new(Config::default(), ());
    server
        .commands([
            CommandArg::from("cmd1"),
            status_arg(StatusCode::OK),
            CommandArg::from("cmd2"),
            status_arg(StatusCode::ACCEPTED),
            CommandArg::from("cmd3"),
            status_arg(StatusCode::NON_AUTHORITATIVE_INFORMATION),
        ])
        .unwrap();
    let base = start(server).await;

    for (name, status) in [("cmd1", 200), ("cmd2", 202), ("cmd3", 203)] {
        let resp = post_json(&format!("{base}/"), &format!(r#"{{"name":"{name}"}}"#)).await;
        assert_eq!(resp.status(), status, "{name}");
    }
}

#[tokio::test]
async fn unpaired_name_keeps_earlier_pairs() {
    let mut server = Server::new(Config::default(), ());
    let err = server
        .commands([
            CommandArg::from("cmd1"),
            status_arg(StatusCode::OK),
            CommandArg::from("cmd2"),
        ])
        .unwrap_err();
    assert_eq!(err, RegistrationError::Unpaired { position: 2 });
    assert!(err.to_string().contains("pairs of command names and handlers"));

    let base = start(server).await;
    let resp = post_json(&format!("{base}/"), r#"{"name":"cmd1"}"#).await;
    assert_eq!(resp.status(), 200);
    let resp = post_json(&format!("{base}/"), r#"{"name":"cmd2"}"#).await;
    assert_eq!(resp.status(), 404);
}

#[test]
fn empty_argument_list() {
    let mut server = Server::new(Config::default(), ());
    let err = server.commands(Vec::<CommandArg<()>>::new()).unwrap_err();
    assert_eq!(err, RegistrationError::Empty);
    assert!(server.registered_commands().is_empty());
}

#[test]
fn handler_in_name_position() {
    let mut server = Server::new(Config::default(), ());
    let err = server
        .commands([status_arg(StatusCode::OK), CommandArg::from("cmd1")])
        .unwrap_err();
    assert_eq!(err, RegistrationError::ExpectedName { position: 0 });
    assert!(server.registered_commands().is_empty());
}

#[test]
fn name_in_handler_position() {
    let mut server = Server::new(Config::default(), ());
    let err = server
        .commands([
            CommandArg::from("cmd1"),
            status_arg(StatusCode::OK),
            CommandArg::from("cmd2"),
            CommandArg::from("cmd3"),
        ])
        .unwrap_err();
    assert_eq!(err, RegistrationError::ExpectedHandler { position: 3 });
    assert_eq!(server.registered_commands(), vec!["cmd1"]);
}

#[tokio::test]
async fn later_registration_wins() {
    let mut server = Server::new(Config::default(), ());
    server
        .command("cmd", |_req, _ctx| async { Some(Reply::status(StatusCode::OK)) })
        .command("cmd", |_req, _ctx| async { Some(Reply::status(StatusCode::ACCEPTED)) });
    let base = start(server).await;

    let resp = post_json(&format!("{base}/"), r#"{"name":"cmd"}"#).await;
    assert_eq!(resp.status(), 202);
}

#[tokio::test]
async fn convention_modules() {
    let mut server = Server::new(
        Config::default(),
        AppState {
            greeting: "hello there".into(),
        },
    );
    register_commands!(server, handlers::echo, handlers::greet);

    let mut names = server.registered_commands();
    names.sort();
    assert_eq!(names, vec!["echo", "greet"]);

    let base = start(server).await;

    let resp = post_json(&format!("{base}/"), r#"{"name":"greet"}"#).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "hello there");

    let resp = post_json(&format!("{base}/"), r#"{"name":"echo","data":{"text":"t"}}"#).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["echo"], "t t t");

    let resp = post_json(&format!("{base}/"), r#"{"name":"echo","data":{}}"#).await;
    assert_eq!(resp.status(), 400);
}
