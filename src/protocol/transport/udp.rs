//! UDP transport.
//!
//! The socket is bound to an ephemeral local port and associated with the
//! remote endpoint. UDP has no handshake, so the association succeeds as soon
//! as the OS accepts the peer address; the transport is reported as connected
//! right away. Each send is one datagram.

use anyhow::{Context, Result};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};

use super::{Transport, TransportKind};

#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    peer: SocketAddrV4,
    local_addr: SocketAddr,
}

impl UdpTransport {
    /// Bind `0.0.0.0:0` and associate the socket with `ip:port`.
    pub fn connect(ip: Ipv4Addr, port: u16) -> Result<Self> {
        let peer = SocketAddrV4::new(ip, port);
        log::debug!("Binding UDP socket for {peer}");

        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
            .context("Failed to bind UDP socket")?;
        socket
            .connect(peer)
            .with_context(|| format!("Failed to associate UDP socket with {peer}"))?;
        let local_addr = socket
            .local_addr()
            .context("Failed to read UDP local address")?;

        log::info!("Attempting to connect via UDP to {peer} (local {local_addr})");
        Ok(Self {
            socket,
            peer,
            local_addr,
        })
    }

    /// The local address the socket is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl Transport for UdpTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Udp
    }

    fn peer(&self) -> String {
        self.peer.to_string()
    }

    fn send(&mut self, data: &[u8]) -> Result<usize> {
        log::trace!("UDP {} -> {}: {} bytes", self.local_addr, self.peer, data.len());
        self.socket
            .send(data)
            .with_context(|| format!("Failed to send datagram to {}", self.peer))
    }
}
