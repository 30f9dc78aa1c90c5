//! TTL Sweep Task
//!
//! Background task running the proactive expiry sweep at a fixed interval.
//! Lazy expiry on access already keeps reads correct; the sweep exists so
//! stale entries stop occupying capacity and storage between reads.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SemanticCache;

/// Spawns the periodic TTL sweep over a shared cache.
///
/// The returned handle can be aborted during graceful shutdown. The first
/// tick fires after one full interval; construction already swept once.
pub fn spawn_sweep_task(
    cache: Arc<RwLock<SemanticCache>>,
    interval_secs: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs, "starting TTL sweep task");
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        // Consume the immediate first tick.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = {
                let mut cache = cache.write().await;
                cache.cleanup_expired()
            };

            if removed > 0 {
                info!(removed, "TTL sweep removed expired entries");
            } else {
                debug!("TTL sweep found nothing expired");
            }
        }
    })
}
