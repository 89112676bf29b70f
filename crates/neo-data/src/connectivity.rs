//! Backend reachability tracking
//!
//! A transport failure marks the backend offline and starts probing its
//! address; the first successful probe raises a one-shot "reconnected"
//! flag that the UI turns into a refetch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

type ReconnectCallback = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct ConnectivityMonitor {
    address: String,
    online: Arc<AtomicBool>,
    reconnected: Arc<AtomicBool>,
}

impl ConnectivityMonitor {
    /// Create a new monitor for a `host:port` address, assumed online
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            online: Arc::new(AtomicBool::new(true)),
            reconnected: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    /// Record a transport failure
    pub fn mark_offline(&self) {
        if self.online.swap(false, Ordering::AcqRel) {
            warn!(address = %self.address, "backend unreachable");
        }
    }

    /// Record that the backend answered again, raising the reconnect flag
    pub fn mark_online(&self) {
        if !self.online.swap(true, Ordering::AcqRel) {
            info!(address = %self.address, "backend reachable again");
            self.reconnected.store(true, Ordering::Release);
        }
    }

    /// Record a successful request without raising the reconnect flag
    pub fn note_success(&self) {
        self.online.store(true, Ordering::Release);
    }

    /// Consume the reconnect flag
    pub fn take_reconnected(&self) -> bool {
        self.reconnected.swap(false, Ordering::AcqRel)
    }

    /// Probe the backend every `interval` while it is marked offline
    pub fn spawn_probe(
        &self,
        runtime: &Handle,
        interval: Duration,
        on_reconnect: Option<ReconnectCallback>,
    ) -> JoinHandle<()> {
        let monitor = self.clone();
        runtime.spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                if monitor.is_online() {
                    continue;
                }

                match tokio::time::timeout(interval, TcpStream::connect(&monitor.address)).await {
                    Ok(Ok(_)) => {
                        monitor.mark_online();
                        if let Some(callback) = &on_reconnect {
                            callback();
                        }
                    }
                    Ok(Err(e)) => debug!(address = %monitor.address, error = %e, "probe failed"),
                    Err(_) => debug!(address = %monitor.address, "probe timed out"),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconnect_flag_is_one_shot() {
        let monitor = ConnectivityMonitor::new("127.0.0.1:1");
        assert!(monitor.is_online());
        assert!(!monitor.take_reconnected());

        monitor.mark_offline();
        assert!(!monitor.is_online());

        monitor.mark_online();
        assert!(monitor.is_online());
        assert!(monitor.take_reconnected());
        assert!(!monitor.take_reconnected());
    }

    #[test]
    fn test_success_does_not_raise_flag() {
        let monitor = ConnectivityMonitor::new("127.0.0.1:1");
        monitor.mark_offline();
        monitor.note_success();
        assert!(monitor.is_online());
        assert!(!monitor.take_reconnected());
    }

    #[tokio::test]
    async fn test_probe_detects_listener() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let monitor = ConnectivityMonitor::new(listener.local_addr().unwrap().to_string());
        monitor.mark_offline();

        let probe = monitor.spawn_probe(&Handle::current(), Duration::from_millis(20), None);

        let mut reconnected = false;
        for _ in 0..100 {
            if monitor.take_reconnected() {
                reconnected = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        probe.abort();

        assert!(reconnected);
        assert!(monitor.is_online());
    }
}
