use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use veil_dns_domain::DnsListenConfig;
use veil_dns_infrastructure::dns::DnsQueryHandler;

const MAX_UDP_QUERY_SIZE: usize = 4096;

/// Bind the configured transports and serve until the shutdown token fires.
pub async fn start_dns_server(
    config: &DnsListenConfig,
    handler: Arc<DnsQueryHandler>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = config.bind_address().parse()?;
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let mut listeners: JoinSet<()> = JoinSet::new();

    if config.protocol.udp() {
        let socket = Arc::new(create_udp_socket(domain, socket_addr)?);
        info!(bind_address = %socket_addr, "Starting UDP DNS listener");
        listeners.spawn(run_udp_listener(
            socket,
            handler.clone(),
            shutdown.clone(),
        ));
    }

    if config.protocol.tcp() {
        let listener = create_tcp_listener(domain, socket_addr)?;
        info!(bind_address = %socket_addr, "Starting TCP DNS listener");
        listeners.spawn(run_tcp_listener(
            listener,
            handler.clone(),
            shutdown.clone(),
        ));
    }

    info!(bind_address = %socket_addr, "DNS server ready");

    while listeners.join_next().await.is_some() {}
    Ok(())
}

/// Each inbound message is handled on its own task so the recv loop never
/// blocks on resolution.
async fn run_udp_listener(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsQueryHandler>,
    shutdown: CancellationToken,
) {
    let mut recv_buf = [0u8; MAX_UDP_QUERY_SIZE];

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("UDP listener: shutting down");
                return;
            }
            received = socket.recv_from(&mut recv_buf) => {
                let (n, from) = match received {
                    Ok(received) => received,
                    Err(e) => {
                        error!(error = %e, "UDP recv error");
                        continue;
                    }
                };

                let query = recv_buf[..n].to_vec();
                let handler = handler.clone();
                let socket = socket.clone();
                tokio::spawn(async move {
                    if let Some(response) = handler.handle(&query).await {
                        let _ = socket.send_to(&response, from).await;
                    }
                });
            }
        }
    }
}

async fn run_tcp_listener(
    listener: TcpListener,
    handler: Arc<DnsQueryHandler>,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("TCP listener: shutting down");
                return;
            }
            accepted = listener.accept() => {
                let (stream, _) = match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        error!(error = %e, "TCP accept error");
                        continue;
                    }
                };
                tokio::spawn(serve_tcp_connection(stream, handler.clone()));
            }
        }
    }
}

/// RFC 1035 §4.2.2: each message is preceded by a two-byte length prefix.
async fn serve_tcp_connection(mut stream: TcpStream, handler: Arc<DnsQueryHandler>) {
    loop {
        let mut len_buf = [0u8; 2];
        if stream.read_exact(&mut len_buf).await.is_err() {
            return;
        }
        let len = u16::from_be_bytes(len_buf) as usize;
        if len == 0 {
            return;
        }

        let mut query = vec![0u8; len];
        if stream.read_exact(&mut query).await.is_err() {
            return;
        }

        let Some(response) = handler.handle(&query).await else {
            continue;
        };

        let prefix = (response.len() as u16).to_be_bytes();
        if stream.write_all(&prefix).await.is_err() || stream.write_all(&response).await.is_err() {
            return;
        }
    }
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(8 * 1024 * 1024)?;
    socket.set_send_buffer_size(4 * 1024 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
