//! Configurable business rules.
//!
//! Deployments of the service disagree about a few rules, e.g.
//! whether ratings are bounded. Each of these choices is explicit
//! here instead of being hardcoded in the repositories.

use crate::entities::{Principal, RatingValue, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingPolicy {
    /// Accept only ratings within `min..=max`
    Bounded { min: RatingValue, max: RatingValue },
    /// Accept any rating
    Unbounded,
}

impl RatingPolicy {
    pub const fn bounded(min: i32, max: i32) -> Self {
        Self::Bounded {
            min: RatingValue::new(min),
            max: RatingValue::new(max),
        }
    }

    pub fn accepts(self, value: RatingValue) -> bool {
        match self {
            Self::Bounded { min, max } => value.is_within(min, max),
            Self::Unbounded => true,
        }
    }
}

impl Default for RatingPolicy {
    fn default() -> Self {
        Self::Bounded {
            min: RatingValue::min(),
            max: RatingValue::max(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadValidation {
    /// Reject blank text fields and empty tag lists
    #[default]
    Strict,
    /// Accept any well-formed payload
    Permissive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallerTracking {
    #[default]
    Record,
    Omit,
}

impl CallerTracking {
    pub fn created_by(self, caller: Option<&Principal>) -> Option<Principal> {
        match self {
            Self::Record => caller.cloned(),
            Self::Omit => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateTracking {
    #[default]
    Record,
    Omit,
}

impl UpdateTracking {
    pub fn updated_at(self, now: Timestamp) -> Option<Timestamp> {
        match self {
            Self::Record => Some(now),
            Self::Omit => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Policy {
    pub rating: RatingPolicy,
    pub payload: PayloadValidation,
    pub caller: CallerTracking,
    pub updates: UpdateTracking,
}
