use std::sync::atomic::{AtomicU64, Ordering};

/// Call-scoped correlation token. Created by a dispatch hub immediately
/// before it applies an inbound change, threaded explicitly through the
/// write call, and read back by the interception callback. Never derived
/// from OS thread identity, so correlation survives executor hopping.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ApplyToken(u64);

impl ApplyToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Monotonic token source shared by all hubs on one side.
#[derive(Debug, Default)]
pub struct ApplyTokenGenerator {
    next: AtomicU64,
}

impl ApplyTokenGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_token(&self) -> ApplyToken {
        ApplyToken(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
