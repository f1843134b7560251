//! Test harness: boot servers on an ephemeral port and talk to them over HTTP.

use axum::Router;
use courier::Server;
use reqwest::Method;

/// Serve `server` standalone on `127.0.0.1:0` and return its base URL.
pub async fn start<C: Send + Sync + 'static>(server: Server<C>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        server.serve(listener).await.unwrap();
    });
    format!("http://{addr}")
}

/// Serve an arbitrary router on `127.0.0.1:0` and return its base URL.
pub async fn start_router(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Send `body` with an explicit content type.
pub async fn send(method: Method, url: &str, content_type: &str, body: &str) -> reqwest::Response {
    reqwest::Client::new()
        .request(method, url)
        .header("content-type", content_type)
        .body(body.to_string())
        .send()
        .await
        .unwrap()
}

/// POST `body` as `application/json`.
pub async fn post_json(url: &str, body: &str) -> reqwest::Response {
    send(Method::POST, url, "application/json", body).await
}

/// POST a multipart form built from `fields`.
pub async fn post_form(url: &str, fields: &[(&str, &str)]) -> reqwest::Response {
    let mut form = reqwest::multipart::Form::new();
    for (name, value) in fields {
        form = form.text(name.to_string(), value.to_string());
    }
    reqwest::Client::new()
        .post(url)
        .multipart(form)
        .send()
        .await
        .unwrap()
}
