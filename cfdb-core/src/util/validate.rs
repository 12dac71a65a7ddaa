use thiserror::Error;

use crate::{
    entities::RatingValue,
    policy::{PayloadValidation, RatingPolicy},
    repositories::{NewCourse, NewFeedback},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The title must not be empty")]
    Title,
    #[error("The description must not be empty")]
    Description,
    #[error("At least one tag is required")]
    Tags,
    #[error("Tags must not be empty")]
    EmptyTag,
    #[error("The course id must not be empty")]
    CourseId,
    #[error("The message must not be empty")]
    Message,
    #[error("Rating value {value} out of range [{min}, {max}]")]
    RatingValue {
        value: RatingValue,
        min: RatingValue,
        max: RatingValue,
    },
}

pub trait Validate {
    fn validate(&self, mode: PayloadValidation) -> Result<(), ValidationError>;
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl Validate for NewCourse {
    fn validate(&self, mode: PayloadValidation) -> Result<(), ValidationError> {
        if mode == PayloadValidation::Permissive {
            return Ok(());
        }
        if is_blank(&self.title) {
            return Err(ValidationError::Title);
        }
        if is_blank(&self.description) {
            return Err(ValidationError::Description);
        }
        if self.tags.is_empty() {
            return Err(ValidationError::Tags);
        }
        if self.tags.iter().any(|t| is_blank(t)) {
            return Err(ValidationError::EmptyTag);
        }
        Ok(())
    }
}

impl Validate for NewFeedback {
    fn validate(&self, mode: PayloadValidation) -> Result<(), ValidationError> {
        if mode == PayloadValidation::Permissive {
            return Ok(());
        }
        if is_blank(&self.course_id) {
            return Err(ValidationError::CourseId);
        }
        if is_blank(&self.message) {
            return Err(ValidationError::Message);
        }
        Ok(())
    }
}

pub fn rating(value: RatingValue, policy: RatingPolicy) -> Result<(), ValidationError> {
    match policy {
        RatingPolicy::Bounded { min, max } if !policy.accepts(value) => {
            Err(ValidationError::RatingValue { value, min, max })
        }
        _ => Ok(()),
    }
}
