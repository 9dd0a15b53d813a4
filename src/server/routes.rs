//! Pure request routing: (method, path, dataset) in, response out. No I/O
//! here, which keeps every route unit-testable without a socket.

use crate::data::dataset::{render_dataset, AmbitionDataset};
use crate::server::api;
use crate::viewer::page;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

fn ok_json(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body,
    }
}

pub fn route_request(method: &str, path: &str, dataset: &AmbitionDataset) -> HttpResponse {
    if method != "GET" {
        return error_response(404, "Not Found", "Route not found");
    }
    let route = path.split('?').next().unwrap_or(path);
    match route {
        "/" | "/index.html" => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: page::viewer_page(),
        },
        "/data/ambitions.json" => ok_json(render_dataset(dataset)),
        "/api/health" => match api::health_payload(dataset) {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        "/api/ambitions" => match api::ambitions_payload(path, dataset) {
            Ok(payload) => ok_json(payload),
            Err(err @ api::ApiError::Query(_)) => {
                error_response(400, "Bad Request", &err.to_string())
            }
            Err(err @ api::ApiError::Serialize(_)) => {
                error_response(500, "Internal Server Error", &err.to_string())
            }
        },
        "/api/nations" => match api::nations_payload(dataset) {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
