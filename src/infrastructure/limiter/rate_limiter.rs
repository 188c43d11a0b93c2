use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::time::sleep;

/// Outcome of a single hit against a keyed limiter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateDecision {
    pub allowed: bool,
    pub remaining: u64,
    pub retry_after_secs: Option<u64>,
}

/// Sliding window counter: the previous window's count is weighted by how
/// much of it still overlaps the trailing window.
#[derive(Debug)]
struct SlidingWindow {
    window_size: Duration,
    limit: u64,
    current_window_start: Instant,
    current_count: u64,
    prev_count: u64,
    last_seen: Instant,
}

impl SlidingWindow {
    fn new(window_size: Duration, limit: u64, now: Instant) -> Self {
        Self {
            window_size,
            limit,
            current_window_start: now,
            current_count: 0,
            prev_count: 0,
            last_seen: now,
        }
    }

    fn hit(&mut self, now: Instant) -> RateDecision {
        self.last_seen = now;
        let mut elapsed = now.saturating_duration_since(self.current_window_start);

        if elapsed >= self.window_size * 2 {
            self.prev_count = 0;
            self.current_count = 0;
            self.current_window_start = now;
            elapsed = Duration::ZERO;
        } else if elapsed >= self.window_size {
            self.prev_count = self.current_count;
            self.current_count = 0;
            self.current_window_start += self.window_size;
            elapsed -= self.window_size;
        }

        let weight = elapsed.as_secs_f64() / self.window_size.as_secs_f64();
        let effective = (self.prev_count as f64) * (1.0 - weight) + (self.current_count as f64);

        if effective < self.limit as f64 {
            self.current_count += 1;
            let remaining = (self.limit as f64 - effective - 1.0).max(0.0).floor() as u64;
            RateDecision { allowed: true, remaining, retry_after_secs: None }
        } else {
            let until_next_window = self.window_size.saturating_sub(elapsed);
            let retry_after = until_next_window.as_secs_f64().ceil().max(1.0) as u64;
            RateDecision { allowed: false, remaining: 0, retry_after_secs: Some(retry_after) }
        }
    }
}

type Key = String;

/// Keyed sliding-window limiter shared across workers.
#[derive(Clone)]
pub struct RateLimiterStore {
    map: Arc<DashMap<Key, Arc<Mutex<SlidingWindow>>>>,
    window_size: Duration,
    limit: u64,
}

impl RateLimiterStore {
    pub fn new(limit: u64, window_size: Duration) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            window_size,
            limit,
        }
    }

    fn get_window(&self, key: &str, now: Instant) -> Arc<Mutex<SlidingWindow>> {
        if let Some(existing) = self.map.get(key) {
            return existing.clone();
        }
        self.map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(SlidingWindow::new(self.window_size, self.limit, now))))
            .clone()
    }

    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        let window = self.get_window(key, now);
        let mut w = window.lock();
        w.hit(now)
    }

    /// Drops keys idle for longer than `ttl`; returns how many were removed.
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let before = self.map.len();
        self.map.retain(|_, window| now.saturating_duration_since(window.lock().last_seen) <= ttl);
        before - self.map.len()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Throttles contact submissions per client IP and per sender address.
#[derive(Clone)]
pub struct SubmissionLimiter {
    pub per_ip: RateLimiterStore,
    pub per_email: RateLimiterStore,
}

impl SubmissionLimiter {
    pub fn new(ip_limit: u64, ip_window: Duration, email_limit: u64, email_window: Duration) -> Self {
        Self {
            per_ip: RateLimiterStore::new(ip_limit, ip_window),
            per_email: RateLimiterStore::new(email_limit, email_window),
        }
    }

    /// Spawns the periodic eviction task. Must be called inside a Tokio runtime.
    pub fn spawn_eviction(&self, interval: Duration) {
        let limiter = self.clone();
        let ip_ttl = limiter.per_ip.window_size * 2;
        let email_ttl = limiter.per_email.window_size * 2;

        tokio::spawn(async move {
            loop {
                sleep(interval).await;
                let removed = limiter.per_ip.evict_idle(ip_ttl) + limiter.per_email.evict_idle(email_ttl);
                if removed > 0 {
                    tracing::debug!("Evicted {} idle rate limiter entries", removed);
                }
            }
        });
    }
}
