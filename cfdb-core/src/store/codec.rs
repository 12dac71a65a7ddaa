// NOTE:
// All timestamps are stored as unix timestamps in **milli**seconds.
// Field names follow the public wire format (camelCase).

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::entities::*;

/// An entity that can be stored in a [`StableMap`](super::StableMap).
pub trait Record: Sized {
    /// Human readable name of the entity type, used for logging.
    const KIND: &'static str;

    fn encode(&self) -> serde_json::Result<Vec<u8>>;

    fn decode(bytes: &[u8]) -> serde_json::Result<Self>;
}

fn encode_as<M: Serialize>(model: M) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&model)
}

fn decode_as<M: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<M> {
    serde_json::from_slice(bytes)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CourseRef<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    tags: &'a [String],
    date_added: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_by: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseModel {
    id: String,
    title: String,
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    date_added: i64,
    #[serde(default)]
    created_by: Option<String>,
}

impl Record for Course {
    const KIND: &'static str = "course";

    fn encode(&self) -> serde_json::Result<Vec<u8>> {
        encode_as(CourseRef {
            id: self.id.as_str(),
            title: &self.title,
            description: &self.description,
            tags: &self.tags,
            date_added: self.date_added.as_millis(),
            created_by: self.created_by.as_ref().map(Principal::as_str),
        })
    }

    fn decode(bytes: &[u8]) -> serde_json::Result<Self> {
        let CourseModel {
            id,
            title,
            description,
            tags,
            date_added,
            created_by,
        } = decode_as(bytes)?;
        Ok(Self {
            id: id.into(),
            title,
            description,
            tags,
            date_added: Timestamp::from_millis(date_added),
            created_by: created_by.map(Into::into),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackRef<'a> {
    id: &'a str,
    course_id: &'a str,
    rating: i32,
    message: &'a str,
    #[serde(rename = "attachmentURL", skip_serializing_if = "Option::is_none")]
    attachment_url: Option<&'a str>,
    upvotes: u64,
    downvotes: u64,
    created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_by: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackModel {
    id: String,
    course_id: String,
    rating: i32,
    message: String,
    #[serde(rename = "attachmentURL", default)]
    attachment_url: Option<String>,
    upvotes: u64,
    downvotes: u64,
    created_at: i64,
    #[serde(default)]
    updated_at: Option<i64>,
    #[serde(default)]
    created_by: Option<String>,
}

impl Record for Feedback {
    const KIND: &'static str = "feedback";

    fn encode(&self) -> serde_json::Result<Vec<u8>> {
        encode_as(FeedbackRef {
            id: self.id.as_str(),
            course_id: self.course_id.as_str(),
            rating: self.rating.into(),
            message: &self.message,
            attachment_url: self.attachment_url.as_deref(),
            upvotes: self.upvotes,
            downvotes: self.downvotes,
            created_at: self.created_at.as_millis(),
            updated_at: self.updated_at.map(Timestamp::as_millis),
            created_by: self.created_by.as_ref().map(Principal::as_str),
        })
    }

    fn decode(bytes: &[u8]) -> serde_json::Result<Self> {
        let FeedbackModel {
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
        } = decode_as(bytes)?;
        Ok(Self {
            id: id.into(),
            course_id: course_id.into(),
            rating: rating.into(),
            message,
            attachment_url,
            upvotes,
            downvotes,
            created_at: Timestamp::from_millis(created_at),
            updated_at: updated_at.map(Timestamp::from_millis),
            created_by: created_by.map(Into::into),
        })
    }
}
