//! Per-address request throttling.
//!
//! Bounds two things at once: how often a single address may submit (fixed
//! window, counter resets once the window elapses) and how much memory the
//! tracking table may use (least-recently-seen eviction once it is full).
//! State lives in this process only and is lost on restart.
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

struct Entry {
    count: u32,
    window_start: Instant,
    last_seen: Instant,
}

pub struct RateLimiter {
    entries: Mutex<HashMap<String, Entry>>,
    capacity: usize,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(capacity: usize, max_requests: u32, window: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity,
            max_requests,
            window,
        }
    }

    /// Records a request from `key` and reports whether it fits the window's
    /// budget. Rejected requests still refresh the entry, so an address that
    /// keeps hammering is not evicted before quiet ones.
    pub async fn try_acquire(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        if let Some(entry) = entries.get_mut(key) {
            if now.duration_since(entry.window_start) >= self.window {
                entry.count = 0;
                entry.window_start = now;
            }

            entry.last_seen = now;

            if entry.count >= self.max_requests {
                #[cfg(feature = "verbose")]
                tracing::info!("Rate limit hit for {key}");

                return false;
            }

            entry.count += 1;
            return true;
        }

        if entries.len() >= self.capacity {
            evict_oldest(&mut entries);
        }

        entries.insert(
            key.to_string(),
            Entry {
                count: 1,
                window_start: now,
                last_seen: now,
            },
        );

        true
    }
}

fn evict_oldest(entries: &mut HashMap<String, Entry>) {
    let victim = entries
        .iter()
        .min_by_key(|(_, entry)| entry.last_seen)
        .map(|(key, _)| key.clone());

    if let Some(key) = victim {
        entries.remove(&key);
    }
}
