use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::ErrorReport;

/// Wire shape of every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: u16,
    pub message: String,
    pub client_ip: String,
    pub server_time: DateTime<Utc>,
}

/// Path segment that marks requests sent from the interactive API docs
const DOCS_REFERER_MARKER: &str = "/swagger/";

/// Completes error responses with the caller's address and the server clock.
///
/// Requests coming from the API docs page get HTTP 200 when
/// `api.docs_status_override` is on; the body's `code` keeps the real status.
pub async fn error_envelope(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client_ip = client_ip(request.headers(), peer);
    let from_docs = is_docs_referer(request.headers());

    let response = next.run(request).await;

    // Framework-generated errors (e.g. 405) arrive without a report
    let report = match response.extensions().get::<ErrorReport>().cloned() {
        Some(report) => report,
        None if is_error_status(response.status()) => ErrorReport::from_status(response.status()),
        None => return response,
    };
    let allow = response.headers().get(header::ALLOW).cloned();

    let status = if from_docs && state.config.api.docs_status_override {
        StatusCode::OK
    } else {
        report.status
    };

    let envelope = ErrorEnvelope {
        code: report.status.as_u16(),
        message: report.message,
        client_ip,
        server_time: Utc::now(),
    };

    let mut response = (status, Json(envelope)).into_response();
    if let Some(allow) = allow {
        response.headers_mut().insert(header::ALLOW, allow);
    }
    response
}

fn is_error_status(status: StatusCode) -> bool {
    status.is_client_error() || status.is_server_error()
}

/// Caller address: first `X-Forwarded-For` hop, then `X-Real-IP`, then the
/// socket peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = real_ip {
        return ip.to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn is_docs_referer(headers: &HeaderMap) -> bool {
    headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains(DOCS_REFERER_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(v));
        }
        map
    }

    #[test]
    fn prefers_forwarded_for_first_hop() {
        let h = headers(&[("x-forwarded-for", "10.0.0.1, 10.0.0.2"), ("x-real-ip", "10.0.0.9")]);
        assert_eq!(client_ip(&h, None), "10.0.0.1");
    }

    #[test]
    fn falls_back_to_real_ip_then_peer() {
        let h = headers(&[("x-real-ip", "192.168.1.5")]);
        assert_eq!(client_ip(&h, None), "192.168.1.5");

        let peer: SocketAddr = "127.0.0.1:54321".parse().unwrap();
        assert_eq!(client_ip(&HeaderMap::new(), Some(peer)), "127.0.0.1");
        assert_eq!(client_ip(&HeaderMap::new(), None), "unknown");
    }

    #[test]
    fn detects_docs_referer() {
        assert!(is_docs_referer(&headers(&[("referer", "http://localhost:3000/swagger/index.html")])));
        assert!(!is_docs_referer(&headers(&[("referer", "http://localhost:3000/app")])));
        assert!(!is_docs_referer(&HeaderMap::new()));
    }
}
