use serde::Serialize;
use tracing::debug;

use portal_api::status::StatusCode;

use crate::proto::http_like::Response;

pub fn json_response(code: StatusCode, body: Vec<u8>) -> Response {
    if code == StatusCode::Ok
        && std::env::var("PORTAL_DEBUG_RESULTS").ok().filter(|v| v != "0").is_some()
    {
        if let Ok(txt) = std::str::from_utf8(&body) {
            debug!("[results] {}", txt);
        }
    }
    Response { code, headers: vec![("content-type".into(), "application/json".into())], body }
}

pub fn json_body<T: Serialize>(code: StatusCode, value: &T) -> Response {
    let body = serde_json::to_vec(value).unwrap_or_else(|_| b"{}".to_vec());
    json_response(code, body)
}
