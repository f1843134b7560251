//! Envelopes carried in the `command` field of a multipart form.

use courier::{Config, Reply, Request, Server, StatusCode};

use crate::support::{post_form, start};

fn multipart_server() -> Server<()> {
    let mut server = Server::new(Config::default(), ());
    server.command("multipart", |req: Request, _ctx| async move {
        let data = req.raw_data().map(|raw| raw.get().to_string()).unwrap_or_default();
        Some(Reply::text(data))
    });
    server
}

#[tokio::test]
async fn valid_multipart() {
    let base = start(multipart_server()).await;
    let resp = post_form(&format!("{base}/"), &[("command", r#"{"name":"multipart"}"#)]).await;
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn multipart_data_is_forwarded() {
    let base = start(multipart_server()).await;
    let resp = post_form(
        &format!("{base}/"),
        &[
            ("title", "ignored"),
            ("command", r#"{"name":"multipart","data":{"n":1}}"#),
        ],
    )
    .await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), r#"{"n":1}"#);
}

#[tokio::test]
async fn invalid_multipart() {
    let base = start(multipart_server()).await;
    let resp = post_form(&format!("{base}/"), &[("command", "invalid")]).await;
    assert_eq!(resp.status(), 422);
}

#[tokio::test]
async fn empty_multipart() {
    let base = start(multipart_server()).await;
    let resp = post_form(&format!("{base}/"), &[("command", "")]).await;
    assert_eq!(resp.status(), 422);
}

#[tokio::test]
async fn missing_command_field() {
    let base = start(multipart_server()).await;
    let resp = post_form(&format!("{base}/"), &[("other", r#"{"name":"multipart"}"#)]).await;
    assert_eq!(resp.status(), 422);
}

#[tokio::test]
async fn multipart_without_boundary() {
    let base = start(multipart_server()).await;
    let resp = crate::support::send(
        reqwest::Method::POST,
        &format!("{base}/"),
        "multipart/form-data",
        "command=whatever",
    )
    .await;
    assert_eq!(resp.status(), 422);
}

#[tokio::test]
async fn multipart_unknown_command() {
    let base = start(multipart_server()).await;
    let resp = post_form(&format!("{base}/"), &[("command", r#"{"name":"nope"}"#)]).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND.as_u16());
}

#[tokio::test]
async fn multipart_honors_configured_body_limit() {
    let mut server = Server::new(Config::default().with_body_limit(8 * 1024 * 1024), ());
    server.command("big", |req: Request, _ctx| async move {
        let len = req.raw_data().map(|raw| raw.get().len()).unwrap_or_default();
        Some(Reply::text(len.to_string()))
    });
    let base = start(server).await;

    let text = "x".repeat(3 * 1024 * 1024);
    let envelope = format!(r#"{{"name":"big","data":"{text}"}}"#);
    let resp = post_form(&format!("{base}/"), &[("command", envelope.as_str())]).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), (text.len() + 2).to_string());
}

#[tokio::test]
async fn multipart_over_limit_returns_422() {
    let mut server = Server::new(Config::default().with_body_limit(64), ());
    server.command("multipart", |_req, _ctx| async { None });
    let base = start(server).await;

    let envelope = format!(r#"{{"name":"multipart","data":"{}"}}"#, "x".repeat(128));
    let resp = post_form(&format!("{base}/"), &[("command", envelope.as_str())]).await;
    assert_eq!(resp.status(), 422);
}
