use nc_api::status::StatusCode;

use crate::proto::http::Response;

pub fn percent_decode(s: &str) -> String {
    percent_encoding::percent_decode_str(s).decode_utf8_lossy().to_string()
}

fn with_content_type(code: StatusCode, content_type: &str, body: Vec<u8>) -> Response {
    Response {
        code,
        headers: vec![("content-type".to_string(), content_type.to_string())],
        body,
    }
}

pub fn html_response(code: StatusCode, body: Vec<u8>) -> Response {
    with_content_type(code, "text/html; charset=utf-8", body)
}

pub fn xml_response(code: StatusCode, body: Vec<u8>) -> Response {
    with_content_type(code, "application/xml; charset=utf-8", body)
}

pub fn text_response(code: StatusCode, body: Vec<u8>) -> Response {
    with_content_type(code, "text/plain; charset=utf-8", body)
}

pub fn json_response(code: StatusCode, body: Vec<u8>) -> Response {
    with_content_type(code, "application/json", body)
}

pub fn escape_xml(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect::<String>()
}
