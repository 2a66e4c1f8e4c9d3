use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use serde_json::json;

use crate::model::{BandRegistry, Bounds, VizParams};

use super::{
    CompositeHandle, HistogramRequest, HistogramResult, HttpImageryService, HttpServiceConfig,
    ImageryService, ServiceError, TileUrl,
};

/// Answers a single HTTP request with `status` and `body`, returning the
/// request line, headers and body it received.
fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let endpoint = format!("http://{}", listener.local_addr().expect("addr"));
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream);
        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read line");
            if line == "\r\n" || line.is_empty() {
                break;
            }
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().expect("content length");
            }
            head.push_str(&line);
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).expect("body");
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        reader
            .get_mut()
            .write_all(response.as_bytes())
            .expect("write");
        format!("{head}\n{}", String::from_utf8_lossy(&request_body))
    });
    (endpoint, handle)
}

fn client(endpoint: String, token: Option<&str>) -> HttpImageryService {
    HttpImageryService::new(&HttpServiceConfig {
        endpoint,
        api_token: token.map(str::to_string),
        timeout_secs: 5,
    })
}

fn gray_viz() -> VizParams {
    let mut registry = BandRegistry::new();
    registry.register("B4", 0.0, 10000.0).expect("register");
    VizParams::from_registry(&["B4".to_string()], &registry).expect("viz")
}

#[test]
fn tile_url_requires_all_placeholders() {
    let url = TileUrl::new("https://tiles.test/map/{z}/{x}/{y}").expect("url");
    assert_eq!(url.tile(9, 102, 201), "https://tiles.test/map/9/102/201");
    assert!(matches!(
        TileUrl::new("https://tiles.test/map/{z}/{x}"),
        Err(ServiceError::InvalidTileUrl(_))
    ));
    assert!(serde_json::from_value::<TileUrl>(json!("https://no/placeholders")).is_err());
}

#[test]
fn histogram_wire_format_uses_bucket_means() {
    let result: HistogramResult = serde_json::from_value(json!({
        "histograms": {
            "B4": {"bucketMeans": [100.0, 300.0, 500.0], "histogram": [4.0, 10.0, 2.0]}
        }
    }))
    .expect("decode");
    let band = result.band("B4").expect("band");
    assert_eq!(band.pairs().collect::<Vec<_>>(), [(100.0, 4.0), (300.0, 10.0), (500.0, 2.0)]);
    assert_eq!(band.total(), 16.0);
    assert!(matches!(
        result.validate(&["B4".to_string(), "B3".to_string()]),
        Err(ServiceError::MissingBand(name)) if name == "B3"
    ));
}

#[test]
fn mismatched_histogram_lengths_are_malformed() {
    let result: HistogramResult = serde_json::from_value(json!({
        "histograms": {"B4": {"bucketMeans": [1.0, 2.0], "histogram": [3.0]}}
    }))
    .expect("decode");
    assert!(matches!(
        result.validate(&["B4".to_string()]),
        Err(ServiceError::MalformedHistogram { .. })
    ));
}

#[test]
fn http_tile_request_posts_visualization() {
    let (endpoint, server) = serve_once(
        "200 OK",
        json!({"tile_url": "https://tiles.test/abc/{z}/{x}/{y}"}).to_string(),
    );
    let service = client(endpoint, Some("secret"));
    let composite = CompositeHandle {
        id: "composite-1".to_string(),
        scene_count: 3,
    };
    let url = service.tile_url(&composite, &gray_viz()).expect("tile url");
    assert_eq!(url.as_str(), "https://tiles.test/abc/{z}/{x}/{y}");

    let request = server.join().expect("server");
    assert!(request.starts_with("POST /v1/maps"));
    assert!(request.contains("Bearer secret"));
    assert!(request.contains("\"composite_id\":\"composite-1\""));
    assert!(request.contains("\"bands\":[\"B4\"]"));
}

#[test]
fn http_rejection_surfaces_status() {
    let (endpoint, server) = serve_once(
        "400 Bad Request",
        json!({"error": "unknown collection"}).to_string(),
    );
    let service = client(endpoint, None);
    let request = HistogramRequest {
        composite_id: "composite-1".to_string(),
        bands: vec!["B4".to_string()],
        region: Bounds::new(0.0, 0.0, 1.0, 1.0).expect("bounds").to_geometry(),
        scale: 305.0,
        best_effort: true,
    };
    let error = service.histogram(&request).expect_err("rejected");
    match error {
        ServiceError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("unknown collection"));
        }
        other => panic!("unexpected error {other:?}"),
    }
    server.join().expect("server");
}

#[test]
fn unreachable_service_is_reported() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let endpoint = format!("http://{}", listener.local_addr().expect("addr"));
    drop(listener);
    let service = client(endpoint, None);
    let composite = CompositeHandle {
        id: "composite-1".to_string(),
        scene_count: 1,
    };
    assert!(matches!(
        service.tile_url(&composite, &gray_viz()),
        Err(ServiceError::Unreachable(_))
    ));
}
