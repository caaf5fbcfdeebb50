//! Online/offline detection.
//!
//! A [`ConnectivityProbe`] answers "are we online right now"; the
//! [`ConnectivityMonitor`] runs the probe on an interval and publishes the
//! current state through a watch channel. The state only ever drives the
//! offline indicator — dispatch behavior never branches on it.

use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// A cheap reachability check standing in for the platform's
/// online/offline events.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Probe once. `true` means online.
    async fn check(&self) -> bool;
}

/// Probe that attempts a TCP connection to a well-known endpoint.
#[derive(Debug, Clone, Copy)]
pub struct TcpProbe {
    addr: SocketAddr,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(addr: SocketAddr, timeout: Duration) -> Self {
        Self { addr, timeout }
    }
}

#[async_trait]
impl ConnectivityProbe for TcpProbe {
    async fn check(&self) -> bool {
        match tokio::time::timeout(self.timeout, tokio::net::TcpStream::connect(self.addr)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                debug!("Connectivity probe failed: {}", e);
                false
            }
            Err(_) => {
                debug!("Connectivity probe timed out after {:?}", self.timeout);
                false
            }
        }
    }
}

/// Background monitor publishing the current online state.
pub struct ConnectivityMonitor {
    online: watch::Receiver<bool>,
    task: JoinHandle<()>,
}

impl ConnectivityMonitor {
    /// Probe immediately, then keep probing every `interval`, publishing
    /// the result. Transitions are logged; steady states are not.
    pub fn start(probe: Box<dyn ConnectivityProbe>, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(true);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            let mut last: Option<bool> = None;
            loop {
                ticker.tick().await;
                let online = probe.check().await;
                if last != Some(online) {
                    info!("Connectivity changed: {}", if online { "online" } else { "offline" });
                    last = Some(online);
                }
                if tx.send(online).is_err() {
                    break;
                }
            }
        });
        Self { online: rx, task }
    }

    /// Subscribe to state updates.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.online.clone()
    }

    /// Most recently published state.
    pub fn is_online(&self) -> bool {
        *self.online.borrow()
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}
