//! Identifier and link registry.
//!
//! The registry owns every identifier minted during one batch, in mint
//! order. It is the only source of link targets, which is what guarantees
//! that a `[[target]]` written into a document always names a document of
//! the same batch.
//!
//! # Lifecycle
//!
//! A registry only grows. Identifiers are never removed, even when the
//! document that owns one fails to reach disk, so later documents can never
//! be handed a duplicate.
//!
//! # Example
//!
//! ```
//! use mockdown_core::registry::IdentifierRegistry;
//! use mockdown_core::rng::seeded;
//!
//! let mut rng = seeded(Some(1));
//! let mut registry = IdentifierRegistry::new();
//!
//! let first = registry.mint("alpha", &mut rng).unwrap();
//! let second = registry.mint("alpha", &mut rng).unwrap();
//! assert_eq!(first, "alpha");
//! assert!(second.starts_with("alpha-"));
//!
//! // The only eligible target for `second` is `first`.
//! assert_eq!(registry.pick_link_target(&second, &mut rng), Some("alpha"));
//! ```

use crate::rng::ChoiceSource;
use crate::{Error, Result};
use std::collections::HashMap;

/// Default width of the random numeric suffix (1000–9999).
pub const DEFAULT_SUFFIX_DIGITS: u32 = 4;

/// Default number of suffixed attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 64;

/// Widest suffix supported; keeps `10^digits` inside a `u64`.
const MAX_SUFFIX_DIGITS: u32 = 18;

// ============================================================================
// SuffixPolicy
// ============================================================================

/// How colliding candidates are disambiguated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixPolicy {
    digits: u32,
    max_attempts: u32,
}

impl Default for SuffixPolicy {
    fn default() -> Self {
        Self {
            digits: DEFAULT_SUFFIX_DIGITS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl SuffixPolicy {
    /// Policy whose suffix space is at least 100 times `expected` documents.
    pub fn for_batch(expected: usize) -> Self {
        let target = (expected as u128).saturating_mul(100).max(1);
        let mut digits = DEFAULT_SUFFIX_DIGITS;
        while digits < MAX_SUFFIX_DIGITS && suffix_span(digits) < target {
            digits += 1;
        }
        Self {
            digits,
            ..Self::default()
        }
    }

    /// Number of digits in the random suffix, always within `1..=18`.
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// Suffixed attempts allowed before `IdentifierSpaceExhausted`.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Override the suffix width.
    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits.clamp(1, MAX_SUFFIX_DIGITS);
        self
    }

    /// Override the retry budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Smallest suffix value, e.g. 1000 for four digits.
    fn low(&self) -> u64 {
        10u64.pow(self.digits.saturating_sub(1))
    }

    /// Largest suffix value, e.g. 9999 for four digits.
    fn high(&self) -> u64 {
        10u64.pow(self.digits) - 1
    }
}

/// Number of distinct suffixes of the given width.
fn suffix_span(digits: u32) -> u128 {
    let high = 10u128.pow(digits) - 1;
    let low = 10u128.pow(digits.saturating_sub(1));
    high - low + 1
}

// ============================================================================
// IdentifierRegistry
// ============================================================================

/// Ordered, append-only set of identifiers minted in one batch.
#[derive(Debug, Clone, Default)]
pub struct IdentifierRegistry {
    ids: Vec<String>,
    positions: HashMap<String, usize>,
    policy: SuffixPolicy,
}

impl IdentifierRegistry {
    /// Create an empty registry with the default suffix policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with a custom suffix policy.
    pub fn with_policy(policy: SuffixPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// The suffix policy in effect.
    pub fn policy(&self) -> SuffixPolicy {
        self.policy
    }

    /// Mint a unique identifier derived from `candidate`.
    ///
    /// Returns `candidate` unchanged when it is free. Otherwise appends
    /// `-<n>` with a random `n` of the policy's width to the base
    /// candidate until a free identifier is found.
    ///
    /// # Errors
    ///
    /// - `InvalidData` if `candidate` is empty.
    /// - `IdentifierSpaceExhausted` after `max_attempts` colliding suffixes.
    pub fn mint<R: ChoiceSource>(&mut self, candidate: &str, rng: &mut R) -> Result<String> {
        if candidate.is_empty() {
            return Err(Error::invalid_data("cannot mint an empty identifier"));
        }

        if !self.contains(candidate) {
            self.register(candidate.to_string());
            return Ok(candidate.to_string());
        }

        let low = self.policy.low();
        let span = (self.policy.high() - low + 1) as usize;
        for attempt in 1..=self.policy.max_attempts {
            let suffix = low + rng.below(span) as u64;
            let id = format!("{candidate}-{suffix}");
            if !self.contains(&id) {
                log::debug!("'{candidate}' collided, minted '{id}' on attempt {attempt}");
                self.register(id.clone());
                return Ok(id);
            }
        }

        Err(Error::IdentifierSpaceExhausted {
            candidate: candidate.to_string(),
            attempts: self.policy.max_attempts,
        })
    }

    /// Register `id` verbatim, failing if it is already present.
    pub fn insert_exact(&mut self, id: impl Into<String>) -> Result<()> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::invalid_data("cannot register an empty identifier"));
        }
        if self.contains(&id) {
            return Err(Error::DuplicateIdentifier(id));
        }
        self.register(id);
        Ok(())
    }

    /// Pre-mint `PREFIX-0001 .. PREFIX-<count>` with zero padding to `width`.
    ///
    /// Returns the identifiers in order. Fails fast on the first identifier
    /// that is already registered; identifiers inserted before the failure
    /// stay registered.
    pub fn mint_sequence(&mut self, prefix: &str, count: usize, width: usize) -> Result<Vec<String>> {
        let mut minted = Vec::with_capacity(count);
        for n in 1..=count {
            let id = crate::util::ids::sequence_id(prefix, n, width);
            self.insert_exact(id.clone())?;
            minted.push(id);
        }
        Ok(minted)
    }

    /// Pick a uniformly random registered identifier other than `exclude`.
    ///
    /// Returns `None` when nothing is eligible; callers omit the link.
    pub fn pick_link_target<R: ChoiceSource>(&self, exclude: &str, rng: &mut R) -> Option<&str> {
        let eligible = self.eligible_count(exclude);
        if eligible == 0 {
            return None;
        }
        let slot = rng.below(eligible);
        Some(self.ids[self.skip_excluded(slot, exclude)].as_str())
    }

    /// Pick up to `count` distinct identifiers other than `exclude`.
    ///
    /// When fewer than `count` are eligible, every eligible identifier is
    /// returned.
    pub fn pick_link_targets<R: ChoiceSource>(
        &self,
        exclude: &str,
        count: usize,
        rng: &mut R,
    ) -> Vec<String> {
        let eligible = self.eligible_count(exclude);
        rng.sample_indices(eligible, count)
            .into_iter()
            .map(|slot| self.ids[self.skip_excluded(slot, exclude)].clone())
            .collect()
    }

    /// Whether `id` has been minted.
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Zero-based mint order of `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Number of minted identifiers.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing has been minted yet.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifiers in mint order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Identifiers in mint order, as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    fn register(&mut self, id: String) {
        self.positions.insert(id.clone(), self.ids.len());
        self.ids.push(id);
    }

    fn eligible_count(&self, exclude: &str) -> usize {
        if self.contains(exclude) {
            self.ids.len() - 1
        } else {
            self.ids.len()
        }
    }

    /// Map a slot in the "registry minus `exclude`" view to a real index.
    fn skip_excluded(&self, slot: usize, exclude: &str) -> usize {
        match self.position(exclude) {
            Some(pos) if slot >= pos => slot + 1,
            _ => slot,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
