use portal_api::{request::{enforce_max_message_size, MAX_MESSAGE_BYTES}, status::StatusCode};
use memchr::{memmem::Finder, memchr};
use tokio::io::AsyncReadExt;

pub const SERVER_NAME: &str = concat!("portald/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    pub fn query(&self) -> Option<&str> {
        self.path.split_once('?').map(|(_, q)| q)
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub async fn read_request<S>(stream: &mut S) -> Result<Request, StatusCode>
where
    S: AsyncReadExt + Unpin,
{
    let mut buf = Vec::with_capacity(4096);
    let mut tmp = [0u8; 2048];
    // resume scanning where the previous read ended
    let mut search_from: usize = 0;
    let finder = Finder::new(b"\r\n\r\n");
    let header_end = loop {
        let n = stream.read(&mut tmp).await.map_err(|_| StatusCode::InternalServerError)?;
        if n == 0 { return Err(StatusCode::BadRequest); }
        let before_len = buf.len();
        buf.extend_from_slice(&tmp[..n]);
        if buf.len() > MAX_MESSAGE_BYTES { return Err(StatusCode::RequestEntityTooLarge); }
        let start = search_from.saturating_sub(3);
        if let Some(rel) = finder.find(&buf[start..]) {
            break start + rel;
        }
        search_from = before_len + n;
    };
    let (head, rest) = buf.split_at(header_end + 4);
    let head_str = std::str::from_utf8(head).map_err(|_| StatusCode::BadRequest)?;
    let mut lines = head_str.split("\r\n");
    let start = lines.next().unwrap_or("");
    let mut sp = start.split_whitespace();
    let method = sp.next().unwrap_or("").to_string();
    let path = sp.next().unwrap_or("").to_string();
    if method.is_empty() || path.is_empty() { return Err(StatusCode::BadRequest); }

    let mut headers = Vec::new();
    let mut content_length: usize = 0;
    for line in lines {
        if line.is_empty() { continue; }
        if let Some(idx) = memchr(b':', line.as_bytes()) {
            let (name_raw, value_raw) = line.split_at(idx);
            let name = name_raw.trim().to_ascii_lowercase();
            let value = value_raw[1..].trim().to_string();
            if name == "content-length" {
                if let Ok(n) = value.parse::<usize>() { content_length = n; }
            }
            headers.push((name, value));
        }
    }

    let mut body = Vec::new();
    if content_length > 0 {
        if header_end + 4 + content_length > MAX_MESSAGE_BYTES { return Err(StatusCode::RequestEntityTooLarge); }
        body.extend_from_slice(rest);
        while body.len() < content_length {
            let mut chunk = [0u8; 4096];
            let n = stream.read(&mut chunk).await.map_err(|_| StatusCode::InternalServerError)?;
            if n == 0 { break; }
            body.extend_from_slice(&chunk[..n]);
            enforce_max_message_size(header_end + 4 + body.len()).map_err(|_| StatusCode::RequestEntityTooLarge)?;
        }
        body.truncate(content_length);
    }

    Ok(Request { method, path, headers, body })
}

#[derive(Debug)]
pub struct Response {
    pub code: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn empty(code: StatusCode) -> Self {
        Self { code, headers: vec![], body: vec![] }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        make_response(self.code, &self.headers, &self.body)
    }
}

pub fn make_response(code: StatusCode, headers: &[(String, String)], body: &[u8]) -> Vec<u8> {
    let date = httpdate::fmt_http_date(std::time::SystemTime::now());
    let mut out = format!(
        "HTTP/1.1 {} {}\r\nserver: {}\r\ndate: {}\r\nconnection: close\r\n",
        code.as_u16(), code.reason(), SERVER_NAME, date
    ).into_bytes();
    let mut had_ct = false;
    let mut had_cl = false;
    for (k, v) in headers {
        if k.eq_ignore_ascii_case("content-type") { had_ct = true; }
        if k.eq_ignore_ascii_case("content-length") { had_cl = true; }
        out.extend_from_slice(k.as_bytes());
        out.extend_from_slice(b": ");
        out.extend_from_slice(v.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    if !had_ct { out.extend_from_slice(b"content-type: application/json\r\n"); }
    if !had_cl { out.extend_from_slice(format!("content-length: {}\r\n", body.len()).as_bytes()); }
    out.extend_from_slice(b"\r\n");
    out.extend_from_slice(body);
    out
}

pub fn make_empty_response(code: StatusCode) -> String {
    let bytes = make_response(code, &[], &[]);
    String::from_utf8(bytes).unwrap_or_default()
}
