use memchr::{memchr, memmem::Finder};
use nc_api::limits::{enforce_max_message_size, MAX_MESSAGE_BYTES};
use nc_api::status::StatusCode;
use tokio::io::AsyncReadExt;

#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    /// Raw request-target, query string included.
    pub path: String,
    /// Header names lowercased at parse time.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    pub fn query(&self) -> Option<&str> {
        self.path.split_once('?').map(|(_, q)| q)
    }

    pub fn path_only(&self) -> &str {
        self.path.split('?').next().unwrap_or("")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Read one HTTP/1.1 request from the stream. Headers are capped together
/// with the body by the shared message-size limit; violations map to a
/// status code the caller turns into an error response.
pub async fn read_request<S>(stream: &mut S) -> Result<Request, StatusCode>
where
    S: AsyncReadExt + Unpin,
{
    let finder = Finder::new(b"\r\n\r\n");
    let mut buf = Vec::with_capacity(4096);
    let mut chunk = [0u8; 2048];
    // resume CRLFCRLF scanning at the previous tail to avoid rescans
    let mut scanned = 0usize;
    let head_len = loop {
        let n = stream
            .read(&mut chunk)
            .await
            .map_err(|_| StatusCode::InternalServerError)?;
        if n == 0 {
            return Err(StatusCode::BadRequest);
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.len() > MAX_MESSAGE_BYTES {
            return Err(StatusCode::RequestEntityTooLarge);
        }
        let from = scanned.saturating_sub(3);
        if let Some(rel) = finder.find(&buf[from..]) {
            break from + rel;
        }
        scanned = buf.len();
    };

    let (head, tail) = buf.split_at(head_len + 4);
    let head = std::str::from_utf8(head).map_err(|_| StatusCode::BadRequest)?;
    let (method, path, headers) = parse_head(head)?;

    let content_length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = Vec::new();
    if content_length > 0 {
        enforce_max_message_size(head_len + 4 + content_length)
            .map_err(|_| StatusCode::RequestEntityTooLarge)?;
        body.extend_from_slice(tail);
        while body.len() < content_length {
            let n = stream
                .read(&mut chunk)
                .await
                .map_err(|_| StatusCode::InternalServerError)?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..n]);
            enforce_max_message_size(head_len + 4 + body.len())
                .map_err(|_| StatusCode::RequestEntityTooLarge)?;
        }
        body.truncate(content_length);
    }

    Ok(Request { method, path, headers, body })
}

type Head = (String, String, Vec<(String, String)>);

fn parse_head(head: &str) -> Result<Head, StatusCode> {
    let mut lines = head.split("\r\n");
    let start_line = lines.next().unwrap_or("");
    let mut parts = start_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();
    if method.is_empty() || path.is_empty() {
        return Err(StatusCode::BadRequest);
    }

    let mut headers = Vec::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let Some(colon) = memchr(b':', line.as_bytes()) else {
            continue;
        };
        let name = line[..colon].trim().to_ascii_lowercase();
        let value = line[colon + 1..].trim().to_string();
        headers.push((name, value));
    }
    Ok((method, path, headers))
}

pub struct Response {
    pub code: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn into_bytes(self) -> Vec<u8> {
        make_response(self.code, &self.headers, &self.body)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub fn make_response(code: StatusCode, headers: &[(String, String)], body: &[u8]) -> Vec<u8> {
    let date = httpdate::fmt_http_date(std::time::SystemTime::now());
    let mut out = format!(
        "HTTP/1.1 {} {}\r\nserver: ncd\r\ndate: {}\r\n",
        code.as_u16(),
        code.reason(),
        date
    )
    .into_bytes();
    let mut had_ct = false;
    let mut had_cl = false;
    for (k, v) in headers {
        if k.eq_ignore_ascii_case("content-type") {
            had_ct = true;
        }
        if k.eq_ignore_ascii_case("content-length") {
            had_cl = true;
        }
        out.extend_from_slice(k.as_bytes());
        out.extend_from_slice(b": ");
        out.extend_from_slice(v.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    if !had_ct {
        out.extend_from_slice(b"content-type: text/html; charset=utf-8\r\n");
    }
    if !had_cl {
        out.extend_from_slice(format!("content-length: {}\r\n", body.len()).as_bytes());
    }
    out.extend_from_slice(b"connection: close\r\n\r\n");
    out.extend_from_slice(body);
    out
}

pub fn make_empty_response(code: StatusCode) -> Vec<u8> {
    make_response(code, &[], &[])
}
