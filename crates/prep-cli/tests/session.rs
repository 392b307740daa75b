//! Drives a full page session over HTTP against a scripted local server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde_json::json;

use prep_cli::render::Renderer;
use prep_cli::session::{connect, save_download, succeeded};
use prep_model::{ProcessingStep, SelectedFile};
use prep_ui::{AlertPresenter, Page, Severity};

/// Answer one connection per canned response, in order. Each request line
/// (`POST /upload`, ...) is sent back over the channel.
fn scripted_server(responses: Vec<(&'static str, String)>) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for (status, body) in responses {
            let (stream, _) = listener.accept().unwrap();
            stream
                .set_read_timeout(Some(Duration::from_secs(2)))
                .unwrap();
            let mut reader = BufReader::new(stream);
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut content_length = 0usize;
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header.trim().is_empty() {
                    break;
                }
                if let Some((name, value)) = header.split_once(':')
                    && name.eq_ignore_ascii_case("content-length")
                {
                    content_length = value.trim().parse().unwrap();
                }
            }
            let mut body_in = vec![0u8; content_length];
            reader.read_exact(&mut body_in).unwrap();

            let mut stream = reader.into_inner();
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            stream.flush().unwrap();
            tx.send(request_line.trim().to_string()).unwrap();
        }
    });
    (url, rx)
}

fn upload_body() -> String {
    json!({
        "message": "Uploaded",
        "filename": "data.csv",
        "preview": {
            "shape": [10, 3],
            "columns": ["a", "b", "c"],
            "missing_values": {"a": 0, "b": 2, "c": 0},
            "sample_data": [{"a": 1, "b": null, "c": "x"}],
            "dtypes": {"a": "int64", "b": "float64", "c": "object"}
        }
    })
    .to_string()
}

#[test]
fn upload_then_feature_selection() {
    let process_body = json!({
        "success": true,
        "step": "3",
        "result": {
            "message": "Feature selection completed",
            "output_file": "output/3_feature_selected.csv",
            "feature_analysis_table": [
                {"feature": "a", "f_score": 12.5, "p_value": 0.0003, "selected": true, "significance": "Significant"}
            ],
            "selected_features_summary": [{"rank": 1, "feature": "a"}],
            "summary_stats": {
                "total_features_analyzed": 2,
                "features_selected": 1,
                "selection_rate": "50.0%",
                "target_column": "c"
            }
        }
    })
    .to_string();
    let (url, requests) = scripted_server(vec![
        ("200 OK", upload_body()),
        ("200 OK", process_body),
        ("200 OK", "a,c\n1,x\n".to_string()),
    ]);
    let backend = connect(&url, Duration::from_secs(5)).unwrap();
    let mut page = Page::with_alerts(backend, AlertPresenter::new());
    let renderer = Renderer::new(120).plain();

    let upload = page
        .drop_files(vec![SelectedFile::new("data.csv", b"a,b,c\n1,,x\n".to_vec())])
        .unwrap();
    let preview_text = renderer.preview(upload.preview.as_ref().unwrap());
    assert!(preview_text.contains("10 × 3"));
    assert!(preview_text.contains("Columns: a (int64), b (float64), c (object)"));

    page.select_step(ProcessingStep::FeatureSelection);
    let outcome = page.process().cloned().unwrap();
    let results_text = renderer.results(&outcome.view);
    assert!(results_text.contains("3.00e-4"));
    assert!(results_text.contains("3_feature_selected.csv"));
    assert_eq!(
        page.alerts().latest().unwrap().message,
        "Feature selection completed"
    );

    let (name, bytes) = page.download_last().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let saved = save_download(dir.path(), &name, &bytes).unwrap();
    assert_eq!(std::fs::read_to_string(saved).unwrap(), "a,c\n1,x\n");
    assert!(succeeded(&page));

    let lines: Vec<String> = requests.iter().take(3).collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    POST /upload HTTP/1.1
    POST /process HTTP/1.1
    GET /download/3_feature_selected.csv HTTP/1.1
    ");
}

#[test]
fn server_error_becomes_error_alert() {
    let (url, _requests) = scripted_server(vec![
        ("200 OK", upload_body()),
        (
            "400 BAD REQUEST",
            json!({"error": "Please complete previous steps first"}).to_string(),
        ),
    ]);
    let backend = connect(&url, Duration::from_secs(5)).unwrap();
    let mut page = Page::new(backend);

    page.choose_file(SelectedFile::new("data.csv", b"a\n1\n".to_vec()));
    page.select_step(ProcessingStep::Smote);
    assert!(page.process().is_none());

    let alert = page.alerts().latest().unwrap();
    assert_eq!(alert.severity, Severity::Error);
    assert_eq!(alert.message, "Please complete previous steps first");
    assert!(!succeeded(&page));
    assert!(page.steps().button().enabled);
}
