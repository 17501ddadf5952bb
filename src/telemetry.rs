// src/telemetry.rs
//! Fire-and-forget usage event. One POST per successful augmentation run,
//! carrying only an anonymous id and the client tag. Failures are logged
//! and swallowed; telemetry must never break the run.

use std::thread::{self, JoinHandle};

use serde::Serialize;

use crate::config::{TRACK_EVENT, TRACK_HOST, TRACK_PATH, TRACK_PORT, TRACK_TOKEN};
use crate::core::net;
use crate::store;

const VENDOR: &str = "acad_margin-cli";

#[derive(Serialize)]
struct Payload<'a> {
    event: &'a str,
    properties: Properties<'a>,
}

#[derive(Serialize)]
struct Properties<'a> {
    token: &'a str,
    distinct_id: &'a str,
    vendor: &'a str,
}

/// Spawn the tracking POST on its own thread and return the handle.
/// Callers may join it before exiting or just drop it.
pub fn track_usage() -> JoinHandle<()> {
    thread::spawn(|| {
        if let Err(e) = send() {
            loge!("Telemetry send failed: {e}");
        }
    })
}

fn send() -> Result<(), Box<dyn std::error::Error>> {
    let id = store::distinct_id()?;
    let payload = Payload {
        event: TRACK_EVENT,
        properties: Properties {
            token: TRACK_TOKEN,
            distinct_id: &id,
            vendor: VENDOR,
        },
    };
    let body = join!("data=", &form_encode(&serde_json::to_string(&payload)?));
    let resp = net::http_post_form(TRACK_HOST, TRACK_PORT, TRACK_PATH, &body)?;
    logd!("Telemetry response: {}", resp.trim());
    Ok(())
}

/// Percent-encode for an application/x-www-form-urlencoded value.
fn form_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
