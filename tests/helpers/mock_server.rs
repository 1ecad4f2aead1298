use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::UnboundedSender;

/// A minimal HTTP/1.1 fixture server returning one canned response.
pub struct MockHttpServer {
    listener: TcpListener,
    port: u16,
}

impl MockHttpServer {
    /// Create a new mock server bound to a random port.
    pub async fn new() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        Ok(Self { listener, port })
    }

    /// Get the base URL for this server.
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Serve `status` + `body` to every request, closing each connection.
    #[allow(dead_code)]
    pub fn start(self, status: u16, body: &'static [u8]) -> tokio::task::JoinHandle<()> {
        self.serve(status, body, Duration::ZERO, None)
    }

    /// Like `start`, but forwards the raw text of each request to `tx`.
    #[allow(dead_code)]
    pub fn start_capturing(
        self,
        status: u16,
        body: &'static [u8],
        tx: UnboundedSender<String>,
    ) -> tokio::task::JoinHandle<()> {
        self.serve(status, body, Duration::ZERO, Some(tx))
    }

    /// Like `start`, but sleeps before answering. For deadline tests.
    #[allow(dead_code)]
    pub fn start_delayed(
        self,
        status: u16,
        body: &'static [u8],
        delay: Duration,
    ) -> tokio::task::JoinHandle<()> {
        self.serve(status, body, delay, None)
    }

    fn serve(
        self,
        status: u16,
        body: &'static [u8],
        delay: Duration,
        capture: Option<UnboundedSender<String>>,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let (stream, _) = match self.listener.accept().await {
                    Ok(accepted) => accepted,
                    Err(_) => break,
                };
                let capture = capture.clone();
                tokio::spawn(async move {
                    handle_request(stream, status, body, delay, capture).await;
                });
            }
        })
    }
}

/// Read one full request (headers plus Content-Length body), then answer
/// with the canned response and close the connection.
async fn handle_request(
    mut stream: TcpStream,
    status: u16,
    body: &'static [u8],
    delay: Duration,
    capture: Option<UnboundedSender<String>>,
) {
    let mut request = Vec::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = match stream.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        request.extend_from_slice(&buf[..n]);
        if request_complete(&request) {
            break;
        }
    }
    if request.is_empty() {
        return;
    }
    if let Some(tx) = capture {
        let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
    }

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Mock",
    };
    let head = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let _ = stream.write_all(head.as_bytes()).await;
    let _ = stream.write_all(body).await;
    let _ = stream.flush().await;
}

/// Whether `data` holds a complete request head and, per its
/// Content-Length header (absent means zero), a complete body.
fn request_complete(data: &[u8]) -> bool {
    let Some(head_end) = data.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&data[..head_end]);
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);
    data.len() >= head_end + 4 + content_length
}
