use std::time::Duration;

use async_trait::async_trait;
use readyr_common::network::endpoint::Endpoint;
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::{ConnectError, Connector};

/// Checks endpoints with a plain TCP handshake. Nothing is written or read.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, endpoint: &Endpoint, connect_timeout: Duration) -> Result<(), ConnectError> {
        let handshake = TcpStream::connect((endpoint.host(), endpoint.port()));

        match timeout(connect_timeout, handshake).await {
            Ok(Ok(stream)) => {
                drop(stream);
                Ok(())
            }
            Ok(Err(err)) => Err(ConnectError::Io(err)),
            Err(_elapsed) => Err(ConnectError::Timeout(connect_timeout)),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
