//! Just enough HTTP/1.1 for a JSON API
//!
//! One request per connection. Bodies need a `Content-Length`; chunked
//! uploads are refused.

use crate::error::{RackError, RackResult};
use serde::Serialize;
use std::collections::HashMap;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

const MAX_HEADER_BYTES: usize = 8 * 1024;
const MAX_BODY_BYTES: usize = 64 * 1024;

/// A parsed request line, headers, and body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Request {
    pub fn new(method: &str, target: &str) -> Self {
        let (path, query) = split_target(target);
        Self {
            method: method.to_string(),
            path,
            query,
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Read one request from `reader`
    pub async fn read_from<R>(reader: &mut R) -> RackResult<Self>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut consumed = 0;
        let request_line = read_line(reader, &mut consumed).await?;
        let mut parts = request_line.split_whitespace();
        let (Some(method), Some(target), Some(_version)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(RackError::Http(format!("bad request line: {}", request_line)));
        };
        let mut request = Self::new(method, target);

        loop {
            let line = read_line(reader, &mut consumed).await?;
            if line.is_empty() {
                break;
            }
            let Some((name, value)) = line.split_once(':') else {
                return Err(RackError::Http(format!("bad header: {}", line)));
            };
            request
                .headers
                .insert(name.trim().to_lowercase(), value.trim().to_string());
        }

        if request.headers.contains_key("transfer-encoding") {
            return Err(RackError::Http("chunked bodies are not supported".to_string()));
        }

        let length = match request.headers.get("content-length") {
            Some(value) => value
                .parse::<usize>()
                .map_err(|_| RackError::Http(format!("bad content-length: {}", value)))?,
            None => 0,
        };
        if length > MAX_BODY_BYTES {
            return Err(RackError::Http(format!("body of {} bytes is too large", length)));
        }

        request.body = vec![0; length];
        reader
            .read_exact(&mut request.body)
            .await
            .map_err(|e| RackError::io("reading request body", e))?;

        Ok(request)
    }
}

async fn read_line<R>(reader: &mut R, consumed: &mut usize) -> RackResult<String>
where
    R: AsyncBufRead + Unpin,
{
    let budget = MAX_HEADER_BYTES.saturating_sub(*consumed);
    if budget == 0 {
        return Err(RackError::Http("request head too large".to_string()));
    }

    // Never buffer more of one line than the remaining head allowance
    let mut line = String::new();
    let n = (&mut *reader)
        .take(budget as u64)
        .read_line(&mut line)
        .await
        .map_err(|e| RackError::io("reading request head", e))?;
    *consumed += n;

    if !line.ends_with('\n') {
        return Err(RackError::Http(if n == budget {
            "request head too large".to_string()
        } else {
            "connection closed mid-request".to_string()
        }));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Split `/path?a=1&b=2`, dropping trailing slashes from the path
fn split_target(target: &str) -> (String, HashMap<String, String>) {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));

    let path = match path.trim_end_matches('/') {
        "" => "/".to_string(),
        trimmed => trimmed.to_string(),
    };

    let query = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (decode_component(k), decode_component(v)),
            None => (decode_component(pair), String::new()),
        })
        .collect();

    (path, query)
}

/// Undo `%XX` escapes and `+` for space; malformed escapes pass through
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => decoded.push(b' '),
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .filter(|h| h.iter().all(u8::is_ascii_hexdigit))
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                match hex {
                    Some(byte) => {
                        decoded.push(byte);
                        i += 2;
                    }
                    None => decoded.push(b'%'),
                }
            }
            b => decoded.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

/// Status plus an optional JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Option<serde_json::Value>,
}

impl Response {
    pub fn json(status: u16, body: &impl Serialize) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => Self {
                status,
                body: Some(value),
            },
            Err(_) => Self::internal_error(),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
        }
    }

    pub fn bad_request(reason: &str) -> Self {
        Self::json(
            400,
            &serde_json::json!({"status": "Invalid request.", "error": reason}),
        )
    }

    pub fn internal_error() -> Self {
        Self {
            status: 500,
            body: Some(serde_json::json!({
                "status": "Internal Server Error.",
                "error": "An unexpected error occurred. Please try again later.",
            })),
        }
    }

    pub fn not_found() -> Self {
        Self::json(404, &serde_json::json!({"status": "Resource not found."}))
    }

    pub fn method_not_allowed() -> Self {
        Self::json(405, &serde_json::json!({"status": "Method not allowed."}))
    }

    /// Serialize with CORS headers and `Connection: close`
    pub async fn write_to<W>(&self, writer: &mut W) -> RackResult<()>
    where
        W: AsyncWrite + Unpin,
    {
        let body = match &self.body {
            Some(value) => serde_json::to_vec(value)?,
            None => Vec::new(),
        };

        let mut head = format!("HTTP/1.1 {} {}\r\n", self.status, reason_phrase(self.status));
        if self.body.is_some() {
            head.push_str("Content-Type: application/json\r\n");
        }
        head.push_str(&format!("Content-Length: {}\r\n", body.len()));
        head.push_str("Access-Control-Allow-Origin: *\r\n");
        head.push_str("Access-Control-Allow-Methods: GET, POST, OPTIONS\r\n");
        head.push_str(
            "Access-Control-Allow-Headers: Accept, Authorization, Content-Type, X-CSRF-Token\r\n",
        );
        head.push_str("Access-Control-Expose-Headers: Link\r\n");
        head.push_str("Access-Control-Max-Age: 300\r\n");
        head.push_str("Connection: close\r\n\r\n");

        async {
            writer.write_all(head.as_bytes()).await?;
            writer.write_all(&body).await?;
            writer.flush().await
        }
        .await
        .map_err(|e| RackError::io("writing response", e))
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
