use percent_encoding::percent_decode_str;
use thiserror::Error;

pub const MAX_MESSAGE_BYTES: usize = 10 * 1024 * 1024; // 10 MB

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("message too large: {actual} bytes (max {max})")]
    TooLarge { max: usize, actual: usize },
    #[error("invalid value for '{name}': {value:?}")]
    InvalidParam { name: &'static str, value: String },
}

pub type RequestResult<T> = Result<T, RequestError>;

pub fn enforce_max_message_size(len: usize) -> RequestResult<()> {
    if len > MAX_MESSAGE_BYTES {
        return Err(RequestError::TooLarge { max: MAX_MESSAGE_BYTES, actual: len });
    }
    Ok(())
}

/// Search parameters as received on the query string. Absent values stay
/// `None`; defaulting happens in the search service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub query: Option<String>,
}

/// Parse `limit`, `offset` and `query` out of a raw query string.
/// - Values are percent-decoded; `+` is read as a space.
/// - Empty values count as absent.
/// - `limit` must be a positive integer, `offset` a non-negative one.
/// - Unknown keys are ignored; the last occurrence of a key wins.
pub fn parse_search_params(query_string: Option<&str>) -> RequestResult<SearchParams> {
    let mut params = SearchParams::default();
    let Some(qs) = query_string else {
        return Ok(params);
    };
    for pair in qs.split('&') {
        let Some((k, v)) = pair.split_once('=') else {
            continue;
        };
        let v = decode_component(v);
        if v.is_empty() {
            continue;
        }
        match k {
            "limit" => {
                let n = parse_u32("limit", &v)?;
                if n == 0 {
                    return Err(RequestError::InvalidParam { name: "limit", value: v });
                }
                params.limit = Some(n);
            }
            "offset" => params.offset = Some(parse_u32("offset", &v)?),
            "query" => params.query = Some(v),
            _ => {}
        }
    }
    Ok(params)
}

pub fn decode_component(s: &str) -> String {
    let spaced = s.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().to_string()
}

fn parse_u32(name: &'static str, value: &str) -> RequestResult<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| RequestError::InvalidParam { name, value: value.to_string() })
}
