//! Loopback HTTP stub for backend tests

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const SAMPLE_RESPONSE: &str = r#"{
    "startDate": "2024-01-01",
    "endDate": "2024-01-08",
    "count": 2,
    "items": [
        {
            "id": "3542519",
            "name": "(2010 PK9)",
            "sizeMeters": 120.5,
            "closenessKm": 1500000.0,
            "relativeVelocityKmH": 54000.0,
            "hazardous": true
        },
        {
            "id": "2465633",
            "name": "465633 (2009 JR5)",
            "sizeMeters": 480.0,
            "sizeFeet": 1574.8,
            "closenessKm": 45000000.0,
            "closenessMiles": 27961695.0,
            "relativeVelocityKmH": 65000.0,
            "relativeVelocityMiH": 40389.1,
            "hazardous": false
        }
    ]
}"#;

/// Answer exactly one request with the given status line and body.
///
/// Returns the base URL and a handle resolving to the raw request head.
pub async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&request).into_owned()
    });

    (base, handle)
}
