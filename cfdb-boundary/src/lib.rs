use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id          : String,
    pub title       : String,
    pub description : String,
    pub tags        : Vec<String>,
    pub date_added  : i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by  : Option<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id             : String,
    pub course_id      : String,
    pub rating         : i32,
    pub message        : String,
    #[serde(rename = "attachmentURL", default, skip_serializing_if = "Option::is_none")]
    pub attachment_url : Option<String>,
    pub upvotes        : u64,
    pub downvotes      : u64,
    pub created_at     : i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at     : Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by     : Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    pub course_id: String,
    pub rating: i32,
    pub message: String,
}

/// A single call of the service.
///
/// Serialized as `{"method": "<name>", "args": <arguments>}`.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(
    tag = "method",
    content = "args",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Request {
    AddCourse(NewCourse),
    GetAllCourses,
    GetCourse { course_id: String },
    AddFeedback(NewFeedback),
    GetFeedbackForCourse { course_id: String },
    GetFeedback { feedback_id: String },
    UpvoteFeedback { feedback_id: String },
    DownvoteFeedback { feedback_id: String },
}

impl Request {
    /// The name of the called method.
    pub fn method(&self) -> &'static str {
        match self {
            Self::AddCourse(_) => "addCourse",
            Self::GetAllCourses => "getAllCourses",
            Self::GetCourse { .. } => "getCourse",
            Self::AddFeedback(_) => "addFeedback",
            Self::GetFeedbackForCourse { .. } => "getFeedbackForCourse",
            Self::GetFeedback { .. } => "getFeedback",
            Self::UpvoteFeedback { .. } => "upvoteFeedback",
            Self::DownvoteFeedback { .. } => "downvoteFeedback",
        }
    }
}

/// The result value of a successful call.
///
/// Serialized as `{"type": "<kind>", "value": <result>}`. The tag
/// keeps results apart that have the same shape, e.g. empty lists.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Payload {
    Course(Course),
    Courses(Vec<Course>),
    Feedback(Feedback),
    FeedbackList(Vec<Feedback>),
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub enum Response {
    Ok(Payload),
    Err(Error),
}

impl Response {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

impl From<Result<Payload, Error>> for Response {
    fn from(from: Result<Payload, Error>) -> Self {
        match from {
            Ok(payload) => Self::Ok(payload),
            Err(err) => Self::Err(err),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[serde(rename = "ValidationError")]
    Validation,
    NotFound,
    #[serde(rename = "StorageError")]
    Storage,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}
