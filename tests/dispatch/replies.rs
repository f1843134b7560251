//! Reply directives as seen on the wire.

use courier::{Config, Reply, Server, StatusCode};
use serde::Serialize;

use crate::support::{post_json, start};

async fn reply_with(reply: fn() -> Option<Reply>) -> reqwest::Response {
    let mut server = Server::new(Config::default(), ());
    server.command("cmd", move |_req, _ctx| async move { reply() });
    let base = start(server).await;
    post_json(&format!("{base}/"), r#"{"name":"cmd"}"#).await
}

#[tokio::test]
async fn json_response() {
    #[derive(Serialize)]
    struct Response {
        field: &'static str,
    }

    let resp = reply_with(|| Some(Reply::json(&Response { field: "value" }))).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "application/json; charset=utf-8");
    assert_eq!(resp.text().await.unwrap().trim(), r#"{"field":"value"}"#);
}

#[tokio::test]
async fn error_response() {
    let resp = reply_with(|| Some(Reply::error(StatusCode::INTERNAL_SERVER_ERROR, "oops"))).await;
    assert_eq!(resp.status(), 500);
    assert_eq!(resp.headers()["content-type"], "application/json; charset=utf-8");
    assert_eq!(resp.text().await.unwrap().trim(), r#"{"error":"oops"}"#);
}

#[tokio::test]
async fn text_response() {
    let resp = reply_with(|| Some(Reply::text("text"))).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "text/plain; charset=utf-8");
    assert_eq!(resp.text().await.unwrap().trim(), "text");
}

#[tokio::test]
async fn status_response() {
    let resp = reply_with(|| Some(Reply::status(StatusCode::NON_AUTHORITATIVE_INFORMATION))).await;
    assert_eq!(resp.status(), 203);
    assert_eq!(resp.text().await.unwrap(), "");
}

#[tokio::test]
async fn no_response() {
    let resp = reply_with(|| None).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "");
}

#[tokio::test]
async fn raw_response() {
    use axum::response::IntoResponse;

    let resp = reply_with(|| {
        Some(Reply::Raw(
            (StatusCode::CREATED, [("x-custom", "yes")], "made").into_response(),
        ))
    })
    .await;
    assert_eq!(resp.status(), 201);
    assert_eq!(resp.headers()["x-custom"], "yes");
    assert_eq!(resp.text().await.unwrap(), "made");
}
