use super::*;
use crate::{
    ids::{IdGenerator, RandomIds},
    policy::Policy,
    store::RecordStore,
    util::validate::{self, Validate},
};

#[derive(Debug)]
pub struct FeedbackRepository<S, C, G = RandomIds> {
    store: S,
    courses: C,
    ids: G,
    policy: Policy,
}

impl<S, C> FeedbackRepository<S, C, RandomIds>
where
    S: RecordStore<Feedback>,
    C: RecordStore<Course>,
{
    pub fn new(store: S, courses: C, policy: Policy) -> Self {
        Self::with_ids(store, courses, RandomIds, policy)
    }
}

impl<S, C, G> FeedbackRepository<S, C, G>
where
    S: RecordStore<Feedback>,
    C: RecordStore<Course>,
    G: IdGenerator,
{
    pub fn with_ids(store: S, courses: C, ids: G, policy: Policy) -> Self {
        Self {
            store,
            courses,
            ids,
            policy,
        }
    }

    pub fn add_feedback(
        &self,
        new_feedback: NewFeedback,
        caller: Option<&Principal>,
    ) -> Result<Feedback> {
        new_feedback.validate(self.policy.payload)?;
        let NewFeedback {
            course_id,
            rating,
            message,
        } = new_feedback;
        if load_course(&self.courses, &course_id)?.is_none() {
            log::debug!("Rejected feedback for unknown course {course_id}");
            return Err(NotFound::ParentCourse(course_id.into()).into());
        }
        validate::rating(rating, self.policy.rating)?;
        let feedback = Feedback {
            id: fresh_id::<Feedback, _, _>(&self.store, &self.ids)?,
            course_id: course_id.into(),
            rating,
            message,
            attachment_url: None,
            upvotes: 0,
            downvotes: 0,
            created_at: Timestamp::now(),
            updated_at: None,
            created_by: self.policy.caller.created_by(caller),
        };
        self.store.insert(feedback.id.as_str(), &feedback)?;
        log::debug!(
            "Added feedback {} for course {}",
            feedback.id,
            feedback.course_id
        );
        Ok(feedback)
    }

    /// All feedback of a course in ascending order of the feedback ids.
    pub fn get_feedback_for_course(&self, course_id: &str) -> Result<Vec<Feedback>> {
        // TODO: Maintain an index course id -> feedback ids instead of
        // scanning all records once the number of records grows.
        Ok(self
            .store
            .values()?
            .into_iter()
            .filter(|f| f.course_id.as_str() == course_id)
            .collect())
    }

    pub fn get_feedback(&self, id: &str) -> Result<Feedback> {
        self.store
            .get(id)?
            .ok_or_else(|| NotFound::Feedback(id.into()).into())
    }

    pub fn upvote_feedback(&self, id: &str) -> Result<Feedback> {
        self.vote(id, Vote::Up)
    }

    pub fn downvote_feedback(&self, id: &str) -> Result<Feedback> {
        self.vote(id, Vote::Down)
    }

    /// Counts a vote in a single atomic read-modify-write step
    /// of the underlying store.
    pub fn vote(&self, id: &str, vote: Vote) -> Result<Feedback> {
        let updated_at = self.policy.updates.updated_at(Timestamp::now());
        let voted = self
            .store
            .modify(id, |feedback| {
                let mut voted = feedback.voted(vote).ok_or_else(|| {
                    store::Error::Other(anyhow::anyhow!("The {vote}vote counter of {id} overflows"))
                })?;
                voted.updated_at = updated_at.or(feedback.updated_at);
                Ok(voted)
            })?
            .ok_or_else(|| NotFound::VotedFeedback(id.into()))?;
        log::debug!(
            "Feedback {} has {} upvotes and {} downvotes",
            voted.id,
            voted.upvotes,
            voted.downvotes
        );
        Ok(voted)
    }
}
