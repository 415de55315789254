//! Sliding window admission control

mod limiter;

#[cfg(test)]
mod tests;

pub use limiter::{RateLimitStatus, SlidingWindowLimiter};
