//! Fixed-window rate limiting for the HTTP layer.
//!
//! One window per client key. The first request in a window starts it;
//! requests past the configured maximum are rejected until the window
//! rolls over. Constructed once and shared through the application state.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Window {
    started_at: Instant,
    count: u32,
}

/// Mutex-guarded fixed-window limiter keyed by client identifier.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            window,
            max_requests,
        }
    }

    /// Record a request for `client` and report whether it is allowed.
    pub fn check(&self, client: &str) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        let window = windows.entry(client.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now.duration_since(window.started_at) >= self.window {
            window.started_at = now;
            window.count = 0;
        }

        window.count += 1;
        window.count <= self.max_requests
    }
}
