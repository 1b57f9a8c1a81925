// src/engine/registry.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::models::answer::ActiveQuestion;

struct Slot {
    question: ActiveQuestion,
    issued_at: Instant,
}

/// In-flight questions keyed by the chat platform's question id.
///
/// Bounded by `capacity` and `ttl`. Cloning yields another handle to the
/// same map.
#[derive(Clone)]
pub struct QuestionRegistry {
    inner: Arc<Mutex<HashMap<String, Slot>>>,
    ttl: Duration,
    capacity: usize,
}

impl QuestionRegistry {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        // A panic while holding the lock cannot leave the map half-updated,
        // so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_expired(&self, slot: &Slot, now: Instant) -> bool {
        now.saturating_duration_since(slot.issued_at) >= self.ttl
    }

    /// Inserts or overwrites the entry for `question_id`.
    pub fn register(&self, question_id: impl Into<String>, question: ActiveQuestion) {
        let question_id = question_id.into();
        let now = Instant::now();
        let mut map = self.lock();

        if !map.contains_key(&question_id) && map.len() >= self.capacity {
            map.retain(|_, slot| !self.is_expired(slot, now));
            if map.len() >= self.capacity {
                let oldest = map
                    .iter()
                    .min_by_key(|(_, slot)| slot.issued_at)
                    .map(|(id, _)| id.clone());
                if let Some(oldest) = oldest {
                    tracing::warn!(question_id = %oldest, "registry full, evicting oldest question");
                    map.remove(&oldest);
                }
            }
        }

        map.insert(
            question_id,
            Slot {
                question,
                issued_at: now,
            },
        );
    }

    /// Removes and returns the entry, so each question is scored at most once.
    pub fn resolve_and_retire(&self, question_id: &str) -> Option<ActiveQuestion> {
        let slot = self.lock().remove(question_id)?;
        if self.is_expired(&slot, Instant::now()) {
            tracing::debug!(question_id, "answer arrived after question expired");
            return None;
        }
        Some(slot.question)
    }

    /// Drops expired entries and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut map = self.lock();
        let before = map.len();
        map.retain(|_, slot| !self.is_expired(slot, now));
        before - map.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
