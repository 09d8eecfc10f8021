use anyhow::Result;
use tracing::warn;

use portal_api::request::parse_search_params;
use portal_api::response::ErrorBody;
use portal_api::status::StatusCode;

use crate::proto::http_like::{Request, Response};
use crate::search::ResultNormalizer;
use crate::services;

use super::util::json_body;

pub const ORGANIZATION_HEADER: &str = "x-organization";
pub const USERNAME_HEADER: &str = "x-username";
pub const ANONYMOUS_USER: &str = "anonymous";

pub fn handle_search(req: Request) -> Result<Response> {
    let params = match parse_search_params(req.query()) {
        Ok(p) => p,
        Err(e) => return Ok(bad_request(e.to_string())),
    };
    let organization = match req.header(ORGANIZATION_HEADER).map(str::trim) {
        Some(org) if !org.is_empty() => org,
        _ => return Ok(bad_request(format!("missing {} header", ORGANIZATION_HEADER))),
    };
    let username = req
        .header(USERNAME_HEADER)
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or(ANONYMOUS_USER);

    let settings = &services::config().search;
    let normalizer = ResultNormalizer::new(services::consumer(), services::analytics(), settings, username);
    match normalizer.search(params.limit, params.offset, params.query.as_deref(), organization) {
        Ok(list) => Ok(json_body(StatusCode::Ok, &list)),
        Err(err) => {
            let handler = err.error_handler();
            warn!(
                "[api] search failed for organization={}: {} ({})",
                organization, err, handler.description
            );
            let body = ErrorBody {
                code: handler.error_code,
                message: err.to_string(),
                description: handler.description.clone(),
            };
            Ok(json_body(StatusCode::from_hint(handler.http_status), &body))
        }
    }
}

fn bad_request(description: String) -> Response {
    let code = StatusCode::BadRequest;
    let body = ErrorBody {
        code: code.as_u16() as u32,
        message: code.reason().to_string(),
        description,
    };
    json_body(code, &body)
}
