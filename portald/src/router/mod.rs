use anyhow::Result;

use crate::proto::http_like::{Request, Response};
use crate::services;
use portal_api::status::StatusCode;

mod api;
mod util;

pub const SEARCH_ROUTE: &str = "/api/search";

pub fn handle(req: Request) -> Result<Response> {
    let path = req.path.split('?').next().unwrap_or("");
    // pagination links point at the configured search path
    let is_search = path == SEARCH_ROUTE || path == services::config().search.search_path;
    match (req.method.as_str(), path) {
        ("GET", "/health/ready") => Ok(util::json_response(
            StatusCode::Ok,
            b"{\"status\":\"ready\"}".to_vec(),
        )),
        ("GET", _) if is_search => api::handle_search(req),
        _ => Ok(Response::empty(StatusCode::NotFound)),
    }
}
