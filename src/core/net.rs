// src/core/net.rs

// HTTP/1.0 over TCP (std-only). The timetable host serves plain HTTP.

use std::{io::{Read, Write}, net::TcpStream, time::Duration};
use crate::config::consts::{HOST, PREFIX};

const AGENT: &str = "scout_scrape/0.4";

pub fn http_get(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    let full = format!("{}{}", PREFIX, path);
    let req = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: {}\r\nConnection: close\r\n\r\n",
        full, HOST, AGENT
    );
    request(&req, &full)
}

pub fn http_post_form(
    path: &str,
    fields: &[(&str, &str)],
) -> Result<String, Box<dyn std::error::Error>> {
    let full = format!("{}{}", PREFIX, path);
    let body = form_encode(fields);
    let req = format!(
        "POST {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: {}\r\n\
         Content-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\
         Connection: close\r\n\r\n{}",
        full, HOST, AGENT, body.len(), body
    );
    request(&req, &full)
}

fn request(req: &str, full: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut s = TcpStream::connect((HOST, 80))?;
    s.set_read_timeout(Some(Duration::from_secs(15)))?;
    s.set_write_timeout(Some(Duration::from_secs(15)))?;

    s.write_all(req.as_bytes())?;
    s.flush()?;

    let mut buf = Vec::new();
    s.read_to_end(&mut buf)?;
    let resp = String::from_utf8_lossy(&buf);

    let status = resp.split("\r\n").next().unwrap_or("");
    if !status.contains("200") {
        return Err(format!("HTTP error: {} {}{}", status, HOST, full).into());
    }
    let body_idx = resp.find("\r\n\r\n").ok_or("Malformed HTTP response")? + 4;
    Ok(resp[body_idx..].to_string())
}

/* ---------------- form encoding ---------------- */

pub fn form_encode(fields: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (i, (k, v)) in fields.iter().enumerate() {
        if i > 0 {
            out.push('&');
        }
        out.push_str(&url_encode(k));
        out.push('=');
        out.push_str(&url_encode(v));
    }
    out
}

pub fn url_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
