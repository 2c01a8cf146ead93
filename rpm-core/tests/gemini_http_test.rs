//! Gemini backend against a local HTTP server speaking the
//! `streamGenerateContent?alt=sse` wire format.

use futures::StreamExt;
use rpm_core::config::GenerationConfig;
use rpm_core::gemini::GenerateContentRequest;
use rpm_core::llm::{GeminiBackend, GenerationBackend, GenerationError};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;

const STREAM_PATH: &str = "/v1beta/models/gemini-2.5-flash:streamGenerateContent?alt=sse";

fn sse_event(text: &str) -> String {
    let payload = serde_json::json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    });
    format!("data: {payload}\r\n\r\n")
}

fn backend(addr: SocketAddr) -> GeminiBackend {
    GeminiBackend::new(&GenerationConfig {
        base_url: format!("http://{addr}/v1beta"),
        ..GenerationConfig::default()
    })
    .unwrap()
}

fn request() -> GenerateContentRequest {
    GenerateContentRequest::single_turn("persona", "buat RPM")
}

/// Read one HTTP request: head plus a `content-length` body
async fn read_request(socket: &mut TcpStream) -> String {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let read = socket.read(&mut chunk).await.unwrap();
        assert!(read > 0, "client closed before sending a full request");
        raw.extend_from_slice(&chunk[..read]);

        let Some(head_end) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&raw[..head_end]).to_lowercase();
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if raw.len() >= head_end + 4 + length {
            return String::from_utf8_lossy(&raw).into_owned();
        }
    }
}

async fn serve_once<F, Fut>(handler: F) -> (SocketAddr, JoinHandle<String>)
where
    F: FnOnce(TcpStream, String) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let task = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let raw = read_request(&mut socket).await;
        handler(socket, raw.clone()).await;
        raw
    });
    (addr, task)
}

#[tokio::test]
async fn streams_fragments_from_sse_body() {
    let (addr, server) = serve_once(|mut socket, _| async move {
        let body = [sse_event("<div>"), sse_event("Halo</div>")].concat();
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n{body}"
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    })
    .await;

    let stream = backend(addr).stream("kunci-rahasia", request()).await.unwrap();
    let fragments: Vec<String> = stream.map(|f| f.unwrap()).collect().await;
    assert_eq!(fragments, vec!["<div>", "Halo</div>"]);

    let raw = server.await.unwrap();
    let request_line = raw.lines().next().unwrap_or_default();
    assert_eq!(request_line, format!("POST {STREAM_PATH} HTTP/1.1"));
    assert!(raw.to_lowercase().contains("x-goog-api-key: kunci-rahasia"));
    assert!(!request_line.contains("kunci-rahasia"));
    assert!(raw.contains(r#""text":"buat RPM""#));
    assert!(raw.contains(r#""systemInstruction""#));
}

#[tokio::test]
async fn rejected_key_surfaces_service_detail() {
    let (addr, server) = serve_once(|mut socket, _| async move {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        let response = format!(
            "HTTP/1.1 400 Bad Request\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    })
    .await;

    match backend(addr).stream("salah", request()).await {
        Err(GenerationError::Service { detail }) => {
            assert!(detail.contains("API key not valid"), "detail: {detail}");
            assert!(detail.contains("400"), "detail: {detail}");
        }
        Err(other) => panic!("expected service error, got {other:?}"),
        Ok(_) => panic!("expected service error, got a stream"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn dropping_the_stream_closes_the_connection() {
    let (closed_tx, closed_rx) = tokio::sync::oneshot::channel();
    let (addr, _server) = serve_once(|mut socket, _| async move {
        let head = "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n";
        socket.write_all(head.as_bytes()).await.unwrap();
        socket
            .write_all(sse_event("<p>awal</p>").as_bytes())
            .await
            .unwrap();
        socket.flush().await.unwrap();

        // Keep the body open; the client must hang up on its own
        let mut rest = [0u8; 64];
        let closed = matches!(
            timeout(Duration::from_secs(5), socket.read(&mut rest)).await,
            Ok(Ok(0) | Err(_))
        );
        let _ = closed_tx.send(closed);
    })
    .await;

    let mut stream = backend(addr).stream("kunci", request()).await.unwrap();
    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first, "<p>awal</p>");
    drop(stream);

    assert!(closed_rx.await.unwrap(), "connection stayed open after the stream was dropped");
}
