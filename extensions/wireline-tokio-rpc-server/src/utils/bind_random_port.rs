use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Binds a listener to an ephemeral loopback port and reports the address
/// the OS picked.
///
/// Tests and demos use this to start a server without coordinating port
/// numbers; pass the listener to
/// [`crate::RpcServer::serve_with_listener`] and the address to the client.
pub async fn bind_random_port() -> std::io::Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    Ok((listener, address))
}
