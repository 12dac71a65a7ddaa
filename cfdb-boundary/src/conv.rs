use super::*;
use cfdb_entities as e;

impl From<e::course::Course> for Course {
    fn from(from: e::course::Course) -> Self {
        let e::course::Course {
            id,
            title,
            description,
            tags,
            date_added,
            created_by,
        } = from;
        Self {
            id: id.into(),
            title,
            description,
            tags,
            date_added: date_added.as_millis(),
            created_by: created_by.map(Into::into),
        }
    }
}

impl From<Course> for e::course::Course {
    fn from(from: Course) -> Self {
        let Course {
            id,
            title,
            description,
            tags,
            date_added,
            created_by,
        } = from;
        Self {
            id: id.into(),
            title,
            description,
            tags,
            date_added: e::time::Timestamp::from_millis(date_added),
            created_by: created_by.map(Into::into),
        }
    }
}

impl From<e::feedback::Feedback> for Feedback {
    fn from(from: e::feedback::Feedback) -> Self {
        let e::feedback::Feedback {
            id,
            course_id,
            rating,
            message,
            attachment_url,
            upvotes,
            downvotes,
            created_at,
            updated_at,
            created_by,
        } = from;
        Self {
            id: id.into(),
            course_id: course_id.into(),
            rating: rating.into(),
            message,
            attachment_url,
            upvotes,
            downvotes,
            created_at: created_at.as_millis(),
            updated_at: updated_at.map(e::time::Timestamp::as_millis),
            created_by: created_by.map(Into::into),
        }
    }
}

impl From<Feedback> for e::feedback::Feedback {
    fn from(from: Feedback) -> Self {
        let Feedback {
            id,
            course_id,
            rating,
            message,
            attachment_url,
            upvotes,
            downvotes,
            created_at,
            updated_at,
            created_by,
        } = from;
        Self {
            id: id.into(),
            course_id: course_id.into(),
            rating: rating.into(),
            message,
            attachment_url,
            upvotes,
            downvotes,
            created_at: e::time::Timestamp::from_millis(created_at),
            updated_at: updated_at.map(e::time::Timestamp::from_millis),
            created_by: created_by.map(Into::into),
        }
    }
}

impl From<e::course::Course> for Payload {
    fn from(from: e::course::Course) -> Self {
        Self::Course(from.into())
    }
}

impl From<Vec<e::course::Course>> for Payload {
    fn from(from: Vec<e::course::Course>) -> Self {
        Self::Courses(from.into_iter().map(Into::into).collect())
    }
}

impl From<e::feedback::Feedback> for Payload {
    fn from(from: e::feedback::Feedback) -> Self {
        Self::Feedback(from.into())
    }
}

impl From<Vec<e::feedback::Feedback>> for Payload {
    fn from(from: Vec<e::feedback::Feedback>) -> Self {
        Self::FeedbackList(from.into_iter().map(Into::into).collect())
    }
}
