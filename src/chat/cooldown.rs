use std::{collections::HashMap, hash::Hash, time::Duration};

use serenity::all::UserId;
use tokio::{sync::RwLock, time::Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Admission {
    Allowed,
    RetryAfter(Duration),
}

impl Admission {
    pub fn retry_after_secs(&self) -> Option<f64> {
        match self {
            Self::Allowed => None,
            Self::RetryAfter(wait) => Some(wait.as_secs_f64()),
        }
    }
}

/// One admission per caller per window, for the lifetime of the process.
pub struct CooldownGate<K = UserId> {
    window: Duration,
    next_eligible: RwLock<HashMap<K, Instant>>,
}

impl<K: Eq + Hash> CooldownGate<K> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            next_eligible: RwLock::new(HashMap::new()),
        }
    }

    /// A denied call leaves the caller's window untouched.
    pub async fn admit(&self, caller: K, now: Instant) -> Admission {
        let mut next_eligible = self.next_eligible.write().await;

        match next_eligible.get(&caller) {
            Some(&eligible) if eligible > now => Admission::RetryAfter(eligible - now),
            _ => {
                next_eligible.insert(caller, now + self.window);
                Admission::Allowed
            }
        }
    }
}
