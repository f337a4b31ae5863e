//! Server wiring: layers, fallback and a real listener.

use std::sync::Arc;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::runtime::Handle;
use tokio::sync::oneshot;

use docc_proxy::{DoccMiddleware, HttpServer, ServerConfig};

mod common;
use common::{body_bytes, get, sample_archive};

fn server_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.docc.uri_root = "/archives".into();
    config
}

#[tokio::test]
async fn test_router_serves_archive_and_propagates_request_id() {
    let config = server_config();
    let docc = Arc::new(DoccMiddleware::new(&config.docc, sample_archive()).unwrap());
    let router = HttpServer::build_router(&config, docc);

    let response = get(&router, "/archives/SomeDocument/css/file.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "integration");
    assert_eq!(
        &body_bytes(response).await[..],
        b"contents of /SomeDocument.doccarchive/css/file.css"
    );

    let response = get(&router, "/archives/SomeDocument").await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()[LOCATION], "/archives/SomeDocument/");
}

#[tokio::test]
async fn test_router_falls_back_to_not_found() {
    let config = server_config();
    let docc = Arc::new(DoccMiddleware::new(&config.docc, sample_archive()).unwrap());
    let router = HttpServer::build_router(&config, docc);

    let response = get(&router, "/elsewhere").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_server_with_blocking_pool_serves_from_disk() {
    let root = std::env::temp_dir().join(format!("docc-server-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(root.join("SomeDocument.doccarchive/js")).unwrap();
    std::fs::write(root.join("SomeDocument.doccarchive/js/app.js"), "run()").unwrap();

    let mut config = server_config();
    config.docc.archive_root = root.display().to_string();
    let server = HttpServer::with_blocking_pool(config, Handle::current()).unwrap();

    let response = get(&server.router(), "/archives/SomeDocument/js/app.js").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(&body_bytes(response).await[..], b"run()");

    std::fs::remove_dir_all(&root).unwrap();
}

#[tokio::test]
async fn test_server_answers_over_tcp_and_shuts_down() {
    let server = HttpServer::new(server_config()).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.run_until(listener, async {
        let _ = stopped.await;
    }));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(
            b"GET /archives/SomeDocument HTTP/1.1\r\n\
              Host: localhost\r\n\
              Connection: close\r\n\r\n",
        )
        .await
        .unwrap();
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8_lossy(&raw).to_lowercase();

    assert!(raw.starts_with("http/1.1 301"), "unexpected response: {}", raw);
    assert!(raw.contains("location: /archives/somedocument/"));
    assert!(raw.contains("x-request-id: "));

    stop.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
