//! Shared test utilities for integration tests.

#![allow(dead_code)]

use ptero_api::PteroClient;
use ptero_core::AuthDetails;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

pub const API_KEY: &str = "ptlc_test_key";
pub const SERVER: &str = "1a7ce997";

/// Start a mock panel.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock panel.
pub fn client_for(server: &MockServer) -> PteroClient {
    PteroClient::new(AuthDetails::new(server.uri(), API_KEY)).expect("failed to build client")
}

/// Mock expecting the fixed header set on `verb path`.
pub fn authed(verb: &str, route: &str) -> MockBuilder {
    Mock::given(method(verb))
        .and(path(route))
        .and(header("Authorization", format!("Bearer {API_KEY}").as_str()))
        .and(header("Accept", "application/json"))
}

/// `/api/client/servers/{SERVER}{rest}`
pub fn server_route(rest: &str) -> String {
    format!("/api/client/servers/{SERVER}{rest}")
}

pub fn success_response(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub fn no_content() -> ResponseTemplate {
    ResponseTemplate::new(204)
}

/// Panel error envelope with a single entry.
pub fn panel_error(status: u16, code: &str, detail: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "errors": [{ "code": code, "status": status.to_string(), "detail": detail }]
    }))
}

pub fn resource(object: &str, attributes: Value) -> Value {
    json!({ "object": object, "attributes": attributes })
}

pub fn list(object: &str, items: Vec<Value>) -> Value {
    let data: Vec<Value> = items.into_iter().map(|a| resource(object, a)).collect();
    let count = data.len();
    json!({
        "object": "list",
        "data": data,
        "meta": { "pagination": {
            "total": count, "count": count, "per_page": 50,
            "current_page": 1, "total_pages": 1, "links": {}
        }}
    })
}

pub fn server_attributes(identifier: &str, name: &str) -> Value {
    json!({
        "server_owner": true,
        "identifier": identifier,
        "internal_id": 5,
        "uuid": format!("{identifier}-259b-452e-8b4e-cecc464142ca"),
        "name": name,
        "node": "Test",
        "sftp_details": { "ip": "pterodactyl.file.properties", "port": 2022 },
        "description": "",
        "limits": { "memory": 512, "swap": 0, "disk": 200, "io": 500, "cpu": 0 },
        "feature_limits": { "databases": 5, "allocations": 5, "backups": 2 },
        "is_suspended": false,
        "is_installing": false,
        "is_transferring": false
    })
}

pub fn backup_attributes(uuid: &str, locked: bool) -> Value {
    json!({
        "uuid": uuid,
        "name": "Quick Backup",
        "ignored_files": [],
        "checksum": "sha1:ed34884c5b73d2ee1e1d2bb2bd1b4c9e0ff1b1d1",
        "bytes": 8066,
        "created_at": "2020-12-26T21:07:07+00:00",
        "completed_at": "2020-12-26T21:07:10+00:00",
        "is_successful": true,
        "is_locked": locked
    })
}
