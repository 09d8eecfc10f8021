use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt};
use portal_api::request::MAX_MESSAGE_BYTES;
use portal_api::status::StatusCode;
use portald::proto::http_like::{make_empty_response, read_request};

// Feed a >10MB header block and assert the emitted response is a 413 frame.
#[tokio::test]
async fn oversized_request_emits_413_response() {
    let (mut client, mut server) = duplex(8192);

    // mirrors the error path of portald's connection handler
    let srv = tokio::spawn(async move {
        match read_request(&mut server).await {
            Ok(_req) => {
                let ok = make_empty_response(StatusCode::Ok);
                let _ = server.write_all(ok.as_bytes()).await;
            }
            Err(code) => {
                let resp = make_empty_response(code);
                let _ = server.write_all(resp.as_bytes()).await;
            }
        }
    });

    let mut req = Vec::with_capacity(MAX_MESSAGE_BYTES + 1024);
    req.extend_from_slice(b"GET /api/search HTTP/1.1\r\n");
    req.extend_from_slice(b"x-fill: ");
    req.extend(std::iter::repeat(b'a').take(MAX_MESSAGE_BYTES + 1));
    req.extend_from_slice(b"\r\n\r\n");

    // the server stops reading once the cap is hit, so ignore write errors
    let _ = client.write_all(&req).await;
    let _ = client.flush().await;

    let mut buf = vec![0u8; 1024];
    let n = client.read(&mut buf).await.unwrap();
    let resp = String::from_utf8_lossy(&buf[..n]);
    assert!(resp.starts_with("HTTP/1.1 413 Payload Too Large"), "response was: {}", resp);

    srv.await.unwrap();
}

#[tokio::test]
async fn parses_headers_and_body() {
    let (mut client, mut server) = duplex(8192);
    client
        .write_all(b"GET /api/search?query=pizza HTTP/1.1\r\nX-Organization: acme\r\ncontent-length: 4\r\n\r\nping")
        .await
        .unwrap();
    let req = read_request(&mut server).await.expect("request parses");
    assert_eq!(req.method, "GET");
    assert_eq!(req.query(), Some("query=pizza"));
    assert_eq!(req.header("x-organization"), Some("acme"));
    assert_eq!(req.body, b"ping");
}

#[tokio::test]
async fn closed_stream_before_headers_is_400() {
    let (client, mut server) = duplex(64);
    drop(client);
    let err = read_request(&mut server).await.expect_err("no request");
    assert_eq!(err, StatusCode::BadRequest);
}
