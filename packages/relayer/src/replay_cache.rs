//! Replay cache for consumed request tags
//!
//! A tag stays consumed for `ttl`. The cache never holds more than
//! `max_size` tags: expired tags are dropped first, then the oldest.

use std::collections::HashMap;
use std::time::{Duration, Instant};

pub struct ReplayCache {
    /// Tag digest -> time it was consumed
    consumed: HashMap<[u8; 32], Instant>,
    max_size: usize,
    ttl: Duration,
}

impl ReplayCache {
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            consumed: HashMap::new(),
            max_size: max_size.max(1),
            ttl,
        }
    }

    /// Marks `tag` consumed. Returns false if it already was within the TTL.
    pub fn consume(&mut self, tag: [u8; 32]) -> bool {
        self.consume_at(tag, Instant::now())
    }

    fn contains_at(&self, tag: &[u8; 32], now: Instant) -> bool {
        self.consumed
            .get(tag)
            .is_some_and(|&at| now.saturating_duration_since(at) < self.ttl)
    }

    fn consume_at(&mut self, tag: [u8; 32], now: Instant) -> bool {
        if self.contains_at(&tag, now) {
            return false;
        }

        let ttl = self.ttl;
        self.consumed
            .retain(|_, &mut at| now.saturating_duration_since(at) < ttl);

        while self.consumed.len() >= self.max_size {
            let oldest = self
                .consumed
                .iter()
                .min_by_key(|(_, at)| **at)
                .map(|(tag, _)| *tag);
            match oldest {
                Some(oldest) => {
                    self.consumed.remove(&oldest);
                }
                None => break,
            }
        }

        self.consumed.insert(tag, now);
        true
    }

    pub fn len(&self) -> usize {
        self.consumed.len()
    }
}
