use listenfd::ListenFd;
use std::io;
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;

/// Binds the server socket. When neither host nor port are given, a socket
/// passed in by the environment (systemd socket activation, `systemfd` during
/// development) takes precedence over the defaults.
pub async fn create_listener(
    host: Option<IpAddr>,
    port: Option<u16>,
    (default_host, default_port): (IpAddr, u16),
) -> io::Result<TcpListener> {
    if host.is_none() && port.is_none() {
        if let Some(listener) = ListenFd::from_env().take_tcp_listener(0)? {
            listener.set_nonblocking(true)?;
            tracing::trace!("using inherited listenfd socket");
            return TcpListener::from_std(listener);
        }
    }

    let address = SocketAddr::from((host.unwrap_or(default_host), port.unwrap_or(default_port)));
    tracing::trace!(%address, "binding listener");
    TcpListener::bind(address).await
}
