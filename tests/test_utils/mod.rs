// Shared by every integration binary; each one uses its own subset.
#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use tempfile::TempDir;

/// One captured HTTP request: start line, header lines, raw body bytes.
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<String>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A mock analysis service bound to a random local port.
///
/// Answers exactly one request with the canned response, then shuts down.
/// `join` hands back the request it saw so tests can assert on the upload.
pub struct MockService {
    pub base_url: String,
    handle: JoinHandle<CapturedRequest>,
}

impl MockService {
    pub fn respond(status_line: &'static str, body: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock service");
        let addr = listener.local_addr().expect("mock service address");

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept connection");
            let request = read_request(&mut stream);
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).expect("write response");
            request
        });

        Self {
            base_url: format!("http://{}", addr),
            handle,
        }
    }

    pub fn ok(body: String) -> Self {
        Self::respond("HTTP/1.1 200 OK", body)
    }

    pub fn join(self) -> CapturedRequest {
        self.handle.join().expect("mock service thread")
    }
}

fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).expect("read request headers");
        assert!(n > 0, "connection closed before headers were complete");
        buffer.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_subsequence(&buffer, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let header_text = String::from_utf8_lossy(&buffer[..header_end]).into_owned();
    let mut lines = header_text.split("\r\n").map(str::to_string);
    let request_line = lines.next().unwrap_or_default();
    let headers: Vec<String> = lines.filter(|line| !line.is_empty()).collect();

    let content_length = headers
        .iter()
        .find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);

    let mut body = buffer[header_end..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).expect("read request body");
        assert!(n > 0, "connection closed before body was complete");
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    CapturedRequest {
        request_line,
        headers,
        body,
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Writes a small scratch file with the given name into `dir`.
pub fn write_fixture(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"ID3\x03\x00\x00\x00\x00\x00\x00fake mp3 frames").expect("write fixture");
    path
}

pub fn success_envelope() -> String {
    r#"{
        "success": true,
        "metrics": {
            "file": "uploads/track.mp3",
            "duration_sec": 215.37,
            "bitrate_kbps": 320,
            "sample_rate_kHz": 44.1,
            "loudness_LUFS": -9.23,
            "true_quality_estimation": 19500.0,
            "summaryCutOff": {"cutoff_range": [19400.0, 19600.0], "confidence": 0.8}
        },
        "quality": {
            "bitrate_kbps": "golden",
            "sample_rate_kHz": "green",
            "loudness_LUFS": "yellow"
        },
        "lyrics": "first line\nsecond line",
        "song_info": {"song_name": "Track", "artist_name": "Artist"}
    }"#
    .to_string()
}

pub fn success_envelope_legacy_pair() -> String {
    r#"{
        "success": true,
        "metrics": {
            "file": "uploads/track.mp3",
            "duration_sec": 187.0,
            "bitrate_kbps": 160,
            "sample_rate_kHz": 44.1,
            "loudness_LUFS": -11.5,
            "true_quality_estimation": 17200.0,
            "summaryCutOff": [[17000.0, 17400.0], 0.55]
        },
        "quality": {
            "bitrate_kbps": "yellow",
            "sample_rate_kHz": "green",
            "loudness_LUFS": "green"
        }
    }"#
    .to_string()
}

pub fn failure_envelope(message: &str) -> String {
    format!(r#"{{"success": false, "error": "{}"}}"#, message)
}
