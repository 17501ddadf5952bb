// src/core/net.rs
// Very minimal HTTP over plain TCP, no TLS.
// Uses HTTP/1.0 so the server closes the connection at the end (no chunked transfer).

use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = "acad_margin/0.3";

/// Perform a plain HTTP GET request and return the response body as a String.
///
/// * `host` – hostname (no protocol, no port)
/// * `port` – usually 80 for HTTP
/// * `path` – path + query string starting with `/`
pub fn http_get(host: &str, port: u16, path: &str) -> Result<String, Box<dyn std::error::Error>> {
    let req = format!(
        "GET {path} HTTP/1.0\r\nHost: {host}\r\nUser-Agent: {USER_AGENT}\r\nConnection: close\r\n\r\n"
    );
    exchange(host, port, &req)
}

/// POST a form-encoded body (used by telemetry). Same HTTP/1.0 read-to-EOF
/// handling as `http_get`.
pub fn http_post_form(
    host: &str,
    port: u16,
    path: &str,
    body: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let req = format!(
        "POST {path} HTTP/1.0\r\nHost: {host}\r\nUser-Agent: {USER_AGENT}\r\n\
         Content-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    );
    exchange(host, port, &req)
}

/// 1. Connect via TCP with reasonable timeouts.
/// 2. Send the request verbatim.
/// 3. Read until EOF, check for a 200 status line.
/// 4. Return the body after the header section.
fn exchange(host: &str, port: u16, req: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut stream = TcpStream::connect((host, port))?;
    stream.set_read_timeout(Some(TIMEOUT))?;
    stream.set_write_timeout(Some(TIMEOUT))?;

    stream.write_all(req.as_bytes())?;
    stream.flush()?;

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf)?;
    let resp = String::from_utf8_lossy(&buf);

    // Basic status check
    let status_line_end = resp.find("\r\n").unwrap_or(0);
    let status = &resp[..status_line_end];
    if !status.contains("200") {
        return Err(format!("HTTP error: {}", status).into());
    }

    // Split off the body
    let body_idx = resp.find("\r\n\r\n").ok_or("Malformed HTTP response")? + 4;
    Ok(resp[body_idx..].to_string())
}
