//! Integration tests for `HttpBackend` against a one-shot local server.

use std::io::{ErrorKind, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use prep_client::{Backend, ClientConfig, HttpBackend, RequestError};
use prep_model::{ProcessingStep, SelectedFile};

/// Serve exactly one canned response and hand back the raw request text.
fn serve_once(status: &str, body: &str) -> (ClientConfig, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream
            .set_read_timeout(Some(Duration::from_millis(300)))
            .unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            match stream.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    request.extend_from_slice(&buf[..n]);
                    if request_complete(&request) {
                        break;
                    }
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {
                    break;
                }
                Err(_) => break,
            }
        }
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        tx.send(String::from_utf8_lossy(&request).into_owned())
            .unwrap();
    });
    let config = ClientConfig::new(&format!("http://{addr}"))
        .unwrap()
        .with_timeout(Duration::from_secs(5));
    (config, rx)
}

fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    request.len() >= header_end + 4 + content_length
}

#[test]
fn upload_sends_multipart_file_field() {
    let (config, requests) = serve_once(
        "200 OK",
        r#"{"message": "File uploaded successfully", "filename": "data.csv",
            "preview": {"shape": [2, 2], "columns": ["a", "b"],
                        "missing_values": {"a": 0, "b": 1},
                        "sample_data": [{"a": 1, "b": null}]}}"#,
    );
    let backend = HttpBackend::new(config).unwrap();
    let file = SelectedFile::new("data.csv", b"a,b\n1,\n".to_vec());

    let response = backend.upload(&file).unwrap();

    assert_eq!(response.message, "File uploaded successfully");
    assert_eq!(response.filename, "data.csv");
    assert_eq!(response.preview.unwrap().columns_with_missing(), 1);

    let request = requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(request.starts_with("POST /upload HTTP/1.1"));
    assert!(request.contains("multipart/form-data"));
    assert!(request.contains(r#"name="file""#));
    assert!(request.contains(r#"filename="data.csv""#));
}

#[test]
fn process_posts_step_as_json_string() {
    let (config, requests) = serve_once(
        "200 OK",
        r#"{"success": true, "step": "2", "result": {"message": "done", "output_file": "output/2_scaled_data.csv"}}"#,
    );
    let backend = HttpBackend::new(config).unwrap();

    let response = backend.process(ProcessingStep::Scaling).unwrap();

    assert_eq!(response.step.as_deref(), Some("2"));
    let request = requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(request.starts_with("POST /process HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
    assert!(request.ends_with(r#"{"step":"2"}"#));
}

#[test]
fn error_status_surfaces_server_message() {
    let (config, _requests) = serve_once("400 BAD REQUEST", r#"{"error": "No file uploaded"}"#);
    let backend = HttpBackend::new(config).unwrap();

    let err = backend.process(ProcessingStep::MissingValues).unwrap_err();

    assert!(matches!(err, RequestError::Status { status: 400, .. }));
    assert_eq!(err.to_string(), "No file uploaded");
}

#[test]
fn download_returns_raw_bytes() {
    let (config, requests) = serve_once("200 OK", "a,b\n0.0,1.0\n");
    let backend = HttpBackend::new(config).unwrap();

    let bytes = backend.download("2_scaled_data.csv").unwrap();

    assert_eq!(bytes, b"a,b\n0.0,1.0\n");
    let request = requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(request.starts_with("GET /download/2_scaled_data.csv HTTP/1.1"));
}

#[test]
fn missing_download_is_an_error() {
    let (config, _requests) = serve_once("404 NOT FOUND", r#"{"error": "File not found"}"#);
    let backend = HttpBackend::new(config).unwrap();

    let err = backend.download("nope.csv").unwrap_err();

    assert_eq!(err.to_string(), "File not found");
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = ClientConfig::new(&format!("http://127.0.0.1:{port}"))
        .unwrap()
        .with_timeout(Duration::from_secs(2));
    let backend = HttpBackend::new(config).unwrap();

    let err = backend.status().unwrap_err();

    assert!(matches!(err, RequestError::Transport(_)));
    assert!(err.is_retryable());
}
