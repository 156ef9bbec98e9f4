use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use denning_agent::{GenerationError, Generator, HuggingFaceClient};
use denning_core::config::GenerationSettings;

/// Serve a single canned HTTP response and hand back the raw request.
fn serve_once(status: &str, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/models/test", listener.local_addr().unwrap());
    let status = status.to_string();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).unwrap();
            raw.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&raw).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|l| l.to_ascii_lowercase().strip_prefix("content-length:").map(|v| v.trim().parse::<usize>().unwrap()))
                    .unwrap_or(0);
                if raw.len() >= end + 4 + length || n == 0 {
                    break;
                }
            }
            if n == 0 {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        tx.send(String::from_utf8_lossy(&raw).to_string()).unwrap();
    });
    (url, rx)
}

#[test]
fn posts_prompt_with_bearer_token_and_strips_echo() {
    let (url, rx) = serve_once("200 OK", r#"[{"generated_text": "Q: what is theft? Theft is dishonest appropriation."}]"#);
    let client = HuggingFaceClient::new(url, "hf_test", &GenerationSettings::default()).unwrap();
    let answer = client.generate("Q: what is theft?").unwrap();
    assert_eq!(answer, "Theft is dishonest appropriation.");

    let request = rx.recv().unwrap().to_ascii_lowercase();
    assert!(request.starts_with("post /models/test"));
    assert!(request.contains("authorization: bearer hf_test"));
    assert!(request.contains(r#""inputs":"q: what is theft?""#));
    assert!(request.contains(r#""max_new_tokens":512"#));
}

#[test]
fn error_status_is_a_transport_failure() {
    let (url, _rx) = serve_once("503 Service Unavailable", r#"{"error": "Model is currently loading"}"#);
    let client = HuggingFaceClient::new(url, "hf_test", &GenerationSettings::default()).unwrap();
    let err = client.generate("prompt").unwrap_err();
    assert!(matches!(err, GenerationError::Status { status: 503, .. }));
    assert!(err.is_transport());
}

#[test]
fn unexpected_body_is_malformed() {
    let (url, _rx) = serve_once("200 OK", "[]");
    let client = HuggingFaceClient::new(url, "hf_test", &GenerationSettings::default()).unwrap();
    let err = client.generate("prompt").unwrap_err();
    assert!(matches!(err, GenerationError::MalformedResponse(_)));
}

#[test]
fn unreachable_service_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/models/test", listener.local_addr().unwrap());
    drop(listener);
    let settings = GenerationSettings { timeout_secs: 2, ..GenerationSettings::default() };
    let client = HuggingFaceClient::new(url, "hf_test", &settings).unwrap();
    let err = client.generate("prompt").unwrap_err();
    assert!(matches!(err, GenerationError::Request(_)));
    assert!(err.is_transport());
}

#[test]
fn echo_of_a_newline_terminated_prompt_leaves_no_answer() {
    let (url, _rx) = serve_once("200 OK", r#"[{"generated_text": "Question: what is theft?\nAnswer:"}]"#);
    let client = HuggingFaceClient::new(url, "hf_test", &GenerationSettings::default()).unwrap();
    assert_eq!(client.generate("Question: what is theft?\nAnswer:\n").unwrap(), "");
}
