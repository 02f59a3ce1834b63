use readyr_common::network::endpoint::Endpoint;
use tokio::net::TcpListener;

/// A loopback listener kept open for the lifetime of the value.
///
/// Connects complete through the accept backlog, nothing needs to accept them.
pub struct OpenPort {
    _listener: TcpListener,
    pub endpoint: Endpoint,
}

pub async fn open_port() -> OpenPort {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port: u16 = listener.local_addr().unwrap().port();
    OpenPort {
        _listener: listener,
        endpoint: Endpoint::new("127.0.0.1", port).unwrap(),
    }
}

/// A loopback port that was just released, so nothing listens on it.
pub async fn closed_port() -> Endpoint {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port: u16 = listener.local_addr().unwrap().port();
    drop(listener);
    Endpoint::new("127.0.0.1", port).unwrap()
}
