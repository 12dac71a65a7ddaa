use std::fmt;

use crate::{id::*, principal::*, time::*};

/// The numeric score of a feedback.
///
/// Any value is representable. Whether a value is acceptable
/// is decided by the rating policy of the repository.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct RatingValue(i32);

impl RatingValue {
    pub const fn new(val: i32) -> Self {
        Self(val)
    }

    pub const fn min() -> Self {
        Self(0)
    }

    pub const fn max() -> Self {
        Self(5)
    }

    pub fn is_within(self, min: Self, max: Self) -> bool {
        self >= min && self <= max
    }
}

impl From<i32> for RatingValue {
    fn from(from: i32) -> Self {
        Self(from)
    }
}

impl From<RatingValue> for i32 {
    fn from(from: RatingValue) -> Self {
        from.0
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vote {
    Up,
    Down,
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
        })
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub id             : Id,
    pub course_id      : Id,
    pub rating         : RatingValue,
    pub message        : String,
    pub attachment_url : Option<String>,
    pub upvotes        : u64,
    pub downvotes      : u64,
    pub created_at     : Timestamp,
    pub updated_at     : Option<Timestamp>,
    pub created_by     : Option<Principal>,
}

impl Feedback {
    /// Returns a copy with the counter of the given vote incremented
    /// by exactly one, or `None` if the counter would overflow.
    pub fn voted(&self, vote: Vote) -> Option<Self> {
        let mut voted = self.clone();
        match vote {
            Vote::Up => voted.upvotes = self.upvotes.checked_add(1)?,
            Vote::Down => voted.downvotes = self.downvotes.checked_add(1)?,
        }
        Some(voted)
    }
}
