//! Per-tier rate limiting for the Slack Web API
//!
//! Implements reactive rate limiting that only activates after receiving a 429
//! (or a `ratelimited` error). Slack assigns every Web API method to a tier,
//! and each tier has its own per-minute budget.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, Ordering};

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use tokio::sync::RwLock;

/// Slack Web API rate limit tiers.
///
/// Budgets follow the Slack documentation:
/// - Tier 2: 20+ per minute
/// - Tier 3: 50+ per minute
/// - Tier 4: 100+ per minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodTier {
    /// Listings and user group writes
    Tier2,
    /// `team.info`, `users.profile.set`
    Tier3,
    /// `auth.test`, `users.profile.get`
    Tier4,
}

impl MethodTier {
    /// All tiers for initialization.
    pub const ALL: [MethodTier; 3] = [
        MethodTier::Tier2,
        MethodTier::Tier3,
        MethodTier::Tier4,
    ];

    /// Categorize a Web API method name (e.g. `conversations.list`).
    pub fn for_method(method: &str) -> Self {
        match method {
            "auth.test" | "users.profile.get" => MethodTier::Tier4,
            "team.info" | "users.profile.set" => MethodTier::Tier3,
            // conversations.list, users.list and usergroups.*
            _ => MethodTier::Tier2,
        }
    }

    /// Requests per minute for this tier.
    pub fn per_minute(&self) -> u32 {
        match self {
            MethodTier::Tier2 => 20,
            MethodTier::Tier3 => 50,
            MethodTier::Tier4 => 100,
        }
    }
}

/// Rate limiter state for a single tier.
pub struct TierRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    active: AtomicBool,
    tier: MethodTier,
}

impl TierRateLimiter {
    /// Create a new (inactive) rate limiter for a tier.
    pub fn new(tier: MethodTier) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(tier.per_minute()).unwrap_or(NonZeroU32::MIN));

        Self {
            limiter: RateLimiter::direct(quota),
            active: AtomicBool::new(false),
            tier,
        }
    }

    /// Activate rate limiting for this tier.
    pub fn activate(&self) {
        let was_active = self.active.swap(true, Ordering::SeqCst);
        if !was_active {
            debug!("Rate limiting activated for {:?}", self.tier);
        }
    }

    /// Check if rate limiting is active.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Wait for permission if rate limiting is active.
    pub async fn wait_if_active(&self) {
        if self.is_active() {
            debug!("Waiting for rate limiter {:?}", self.tier);
            self.limiter.until_ready().await;
        }
    }
}

/// Collection of rate limiters for all tiers.
pub struct RateLimiterSet {
    limiters: RwLock<HashMap<MethodTier, TierRateLimiter>>,
}

impl Default for RateLimiterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiterSet {
    /// Create a new set of rate limiters, one per tier.
    pub fn new() -> Self {
        let map = MethodTier::ALL
            .into_iter()
            .map(|tier| (tier, TierRateLimiter::new(tier)))
            .collect();

        Self {
            limiters: RwLock::new(map),
        }
    }

    /// Wait for rate limit permission for a tier (if active).
    pub async fn wait_for(&self, tier: MethodTier) {
        let limiters = self.limiters.read().await;
        if let Some(limiter) = limiters.get(&tier) {
            limiter.wait_if_active().await;
        }
    }

    /// Activate rate limiting for a tier (called on 429).
    pub async fn activate(&self, tier: MethodTier) {
        let limiters = self.limiters.read().await;
        if let Some(limiter) = limiters.get(&tier) {
            limiter.activate();
        }
    }

    /// Check whether a tier is currently paced.
    pub async fn is_active(&self, tier: MethodTier) -> bool {
        let limiters = self.limiters.read().await;
        limiters.get(&tier).is_some_and(|l| l.is_active())
    }
}
