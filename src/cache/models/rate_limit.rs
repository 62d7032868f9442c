use std::time::Duration;

use tokio::time::Instant;

/// 固定窗口限流计数
#[derive(Debug, Clone)]
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_at: Instant,
}

impl RateLimitEntry {
    pub fn new(now: Instant, window: Duration) -> Self {
        Self {
            count: 1,
            reset_at: now + window,
        }
    }

    /// 记录一次请求，返回是否放行；拒绝时不计数
    pub fn hit(&mut self, now: Instant, max_requests: u32, window: Duration) -> bool {
        if now >= self.reset_at {
            *self = Self::new(now, window);
            return true;
        }
        if self.count >= max_requests {
            return false;
        }
        self.count += 1;
        true
    }
}
