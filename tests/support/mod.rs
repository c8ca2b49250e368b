//! Shared helpers for integration tests.

use fmpd_core::resolver::DEFAULT_HOME_SENTINEL;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Date every mocked picture reports as its modification time.
pub const LAST_MODIFIED: &str = "Thu, 19 May 2016 12:00:00 GMT";

/// Starts the mock photo host, or returns `None` where localhost sockets
/// cannot be bound (sandboxed CI). Set `FMPD_REQUIRE_SOCKET_TESTS=1` to fail
/// instead of skipping.
pub async fn start_photo_host() -> Option<MockServer> {
    if std::net::TcpListener::bind("127.0.0.1:0").is_ok() {
        return Some(MockServer::start().await);
    }
    let strict = std::env::var_os("FMPD_REQUIRE_SOCKET_TESTS").is_some_and(|value| value == "1");
    assert!(!strict, "cannot bind a localhost socket for the mock photo host");
    eprintln!("skipping: cannot bind a localhost socket for the mock photo host");
    None
}

/// Photo page prefix pointing at the mock server.
#[must_use]
pub fn photo_page_prefix(server: &MockServer) -> String {
    format!("{}/photo/view_full_size/?fbid=", server.uri())
}

/// Mounts a photo page for `identifier` that links to an image with `body`.
pub async fn mount_picture(server: &MockServer, identifier: &str, body: &[u8]) {
    let image_path = format!("/img/{identifier}.jpg");
    let page = format!(
        r#"<html><head><meta http-equiv="refresh" content="0;url={}{image_path}?size=full&amp;dl=1" /></head></html>"#,
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/photo/view_full_size/"))
        .and(query_param("fbid", identifier))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(image_path))
        .and(query_param("dl", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Last-Modified", LAST_MODIFIED)
                .set_body_bytes(body.to_vec()),
        )
        .mount(server)
        .await;
}

/// Mounts the page the photo host serves for identifiers it does not know.
#[allow(dead_code)]
pub async fn mount_unknown(server: &MockServer, identifier: &str) {
    let page = format!(r#"<meta http-equiv="refresh" content="0;url={DEFAULT_HOME_SENTINEL}" />"#);
    Mock::given(method("GET"))
        .and(path("/photo/view_full_size/"))
        .and(query_param("fbid", identifier))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(server)
        .await;
}
