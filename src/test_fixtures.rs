//! Test fixtures shared by unit tests.
//!
//! - Temporary directories
//! - ZIP archives built in memory or on disk
//! - A canned HTTP server on `127.0.0.1` that answers fixed responses per path
//!   and records every request it receives
//!
//! # Usage
//!
//! ```ignore
//! let server = TestServer::start(vec![
//!     ("/a.zip".to_string(), CannedResponse::redirect(302, "/b.zip")),
//!     ("/b.zip".to_string(), CannedResponse::ok(zip_bytes(&[("README.md", "hi")]))),
//! ]);
//! let url = server.url("/a.zip");
//! ```

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Cursor, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Build a ZIP archive in memory.
///
/// Names ending in `/` become directory entries.
///
/// # Panics
///
/// Panics if the archive cannot be written.
#[must_use]
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, content) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, options)
                .expect("Failed to add directory entry");
        } else {
            writer
                .start_file(*name, options)
                .expect("Failed to start file entry");
            writer
                .write_all(content.as_bytes())
                .expect("Failed to write file entry");
        }
    }

    writer
        .finish()
        .expect("Failed to finish archive")
        .into_inner()
}

/// Write a ZIP archive to `path`.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    std::fs::write(path, zip_bytes(entries)).expect("Failed to write archive");
}

/// URL on a local port nothing listens on.
///
/// # Panics
///
/// Panics if no local port can be reserved.
#[must_use]
pub fn unused_local_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to reserve port");
    let port = listener.local_addr().expect("Failed to read address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}{path}")
}

/// Fixed HTTP response
#[derive(Debug, Clone)]
pub struct CannedResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    /// Advertised `Content-Length` when it differs from the body
    declared_length: Option<usize>,
}

impl CannedResponse {
    /// 200 with `body`
    #[must_use]
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body,
            declared_length: None,
        }
    }

    /// Redirect to `location`
    #[must_use]
    pub fn redirect(status: u16, location: &str) -> Self {
        Self {
            status,
            headers: vec![("Location".to_string(), location.to_string())],
            body: Vec::new(),
            declared_length: None,
        }
    }

    /// Empty response with `status`
    #[must_use]
    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
            declared_length: None,
        }
    }

    /// 200 advertising `declared_length` bytes but closing after `body`
    #[must_use]
    pub fn truncated(body: Vec<u8>, declared_length: usize) -> Self {
        Self {
            declared_length: Some(declared_length),
            ..Self::ok(body)
        }
    }

    fn to_http(&self) -> Vec<u8> {
        let mut head = format!(
            "HTTP/1.1 {} Canned\r\nContent-Length: {}\r\nConnection: close\r\n",
            self.status,
            self.declared_length.unwrap_or(self.body.len())
        );
        for (name, value) in &self.headers {
            head.push_str(&format!("{name}: {value}\r\n"));
        }
        head.push_str("\r\n");

        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

#[derive(Debug, Clone)]
struct RecordedRequest {
    path: String,
    user_agent: Option<String>,
}

/// Local HTTP server answering canned responses; unknown paths get 404
pub struct TestServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TestServer {
    /// Start serving `routes` on an ephemeral port
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    #[must_use]
    pub fn start(routes: Vec<(String, CannedResponse)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
        let base_url = format!(
            "http://{}",
            listener.local_addr().expect("Failed to read address")
        );
        let routes: HashMap<String, CannedResponse> = routes.into_iter().collect();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                serve(stream, &routes, &log);
            }
        });

        Self { base_url, requests }
    }

    /// Absolute URL for `path` on this server
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Paths requested so far, in order
    ///
    /// # Panics
    ///
    /// Panics if the request log is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .iter()
            .map(|r| r.path.clone())
            .collect()
    }

    /// User-Agent header of each request so far
    ///
    /// # Panics
    ///
    /// Panics if the request log is poisoned.
    #[must_use]
    pub fn user_agents(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .iter()
            .map(|r| r.user_agent.clone().unwrap_or_default())
            .collect()
    }
}

fn serve(
    mut stream: TcpStream,
    routes: &HashMap<String, CannedResponse>,
    log: &Mutex<Vec<RecordedRequest>>,
) {
    let Ok(read_half) = stream.try_clone() else {
        return;
    };
    let mut reader = BufReader::new(read_half);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let path = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();

    let mut user_agent = None;
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("user-agent") {
                user_agent = Some(value.trim().to_string());
            }
        }
    }

    if let Ok(mut entries) = log.lock() {
        entries.push(RecordedRequest {
            path: path.clone(),
            user_agent,
        });
    }

    let not_found = CannedResponse::status(404);
    let response = routes.get(&path).unwrap_or(&not_found);
    let _ = stream.write_all(&response.to_http());
    let _ = stream.flush();
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_create_temp_dir() {
        let temp = create_temp_dir();
        assert!(temp.path().exists());
    }

    #[test]
    fn test_zip_bytes_round_trip() {
        let bytes = zip_bytes(&[("dir/", ""), ("dir/a.txt", "alpha")]);
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid archive");
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        archive
            .by_name("dir/a.txt")
            .expect("entry present")
            .read_to_string(&mut content)
            .expect("readable entry");
        assert_eq!(content, "alpha");
    }

    #[test]
    fn test_canned_response_head() {
        let http = String::from_utf8(CannedResponse::redirect(302, "/next").to_http())
            .expect("ascii response");
        assert!(http.starts_with("HTTP/1.1 302 Canned\r\n"));
        assert!(http.contains("Location: /next\r\n"));
        assert!(http.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_truncated_response_overstates_length() {
        let http = String::from_utf8(CannedResponse::truncated(b"short".to_vec(), 100).to_http())
            .expect("ascii response");
        assert!(http.contains("Content-Length: 100\r\n"));
        assert!(http.ends_with("\r\n\r\nshort"));
    }
}
