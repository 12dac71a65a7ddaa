// Repositories on top of the record stores.
// Each repository is responsible for a single entity type.
// Related entities are only referenced by their id and
// never modified by another repository.

use thiserror::Error;

use crate::{entities::*, store, util::validate::ValidationError};

mod course;
mod feedback;

pub use self::{course::*, feedback::*};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error(transparent)]
    Storage(#[from] store::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotFound {
    #[error("Course with id={0} not found")]
    Course(Id),
    /// The course referenced by a new feedback does not exist.
    #[error("Course not found.")]
    ParentCourse(Id),
    #[error("Feedback with id={0} not found")]
    Feedback(Id),
    /// The feedback that should receive a vote does not exist.
    #[error("Feedback not found.")]
    VotedFeedback(Id),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub course_id: String,
    pub rating: RatingValue,
    pub message: String,
}
