//! Integration tests for net crate

use httpmock::prelude::*;
use pkgprobe_net::{retry_after_secs, NetClient};

#[tokio::test]
async fn get_returns_response_without_interpreting_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/missing");
        then.status(404).body("Not Found");
    });

    let client = NetClient::with_defaults().unwrap();
    let response = client.get(&server.url("/missing")).await.unwrap();
    // Non-2xx is an answer, not a transport failure
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn extra_headers_are_sent() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/snap")
            .header("Snap-Device-Series", "16");
        then.status(200);
    });

    let client = NetClient::with_defaults().unwrap();
    let response = client
        .get_with_headers(&server.url("/snap"), &[("Snap-Device-Series", "16")])
        .await
        .unwrap();

    mock.assert();
    assert!(response.status().is_success());
}

#[tokio::test]
async fn retry_after_header_parses_whole_seconds() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/limited");
        then.status(429).header("Retry-After", "5");
    });
    server.mock(|when, then| {
        when.method(GET).path("/limited-date");
        then.status(429)
            .header("Retry-After", "Wed, 21 Oct 2015 07:28:00 GMT");
    });

    let client = NetClient::with_defaults().unwrap();

    let response = client.get(&server.url("/limited")).await.unwrap();
    assert_eq!(retry_after_secs(&response), Some(5));

    let response = client.get(&server.url("/limited-date")).await.unwrap();
    assert_eq!(retry_after_secs(&response), None);
}
