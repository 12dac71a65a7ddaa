use std::sync::Arc;

use cfdb_boundary::{self as json, Payload, Request, Response};
use cfdb_core::{
    policy::Policy,
    store::{Backend, StableMap, StoreConfig, Stores},
};

use super::*;
use crate::error::{AppError, BError};

type CourseStore<B> = StableMap<Course, Arc<B>>;
type FeedbackStore<B> = StableMap<Feedback, Arc<B>>;

/// Entry point for all calls of the service.
///
/// Owns the record stores and the repositories on top of them.
/// A service is safe to share between threads.
#[derive(Debug)]
pub struct Service<B> {
    courses: CourseRepository<Arc<CourseStore<B>>>,
    feedback: FeedbackRepository<FeedbackStore<B>, Arc<CourseStore<B>>>,
}

impl<B: Backend> Service<B> {
    pub fn open(
        backend: B,
        courses: StoreConfig,
        feedback: StoreConfig,
        policy: Policy,
    ) -> Result<Self> {
        let Stores { courses, feedback } = Stores::open(Arc::new(backend), courses, feedback)?;
        let courses = Arc::new(courses);
        info!(
            "Opened course store in region {} and feedback store in region {}",
            courses.config().region,
            feedback.config().region
        );
        Ok(Self {
            courses: CourseRepository::new(Arc::clone(&courses), policy),
            feedback: FeedbackRepository::new(feedback, courses, policy),
        })
    }

    pub fn with_defaults(backend: B) -> Result<Self> {
        Self::open(
            backend,
            StoreConfig::COURSES,
            StoreConfig::FEEDBACK,
            Policy::default(),
        )
    }

    pub fn add_course(
        &self,
        new_course: json::NewCourse,
        caller: Option<&Principal>,
    ) -> Result<Course> {
        let json::NewCourse {
            title,
            description,
            tags,
        } = new_course;
        let new_course = NewCourse {
            title,
            description,
            tags,
        };
        Ok(self.courses.add_course(new_course, caller)?)
    }

    pub fn get_all_courses(&self) -> Result<Vec<Course>> {
        Ok(self.courses.get_all_courses()?)
    }

    pub fn get_course(&self, id: &str) -> Result<Course> {
        Ok(self.courses.get_course(id)?)
    }

    pub fn add_feedback(
        &self,
        new_feedback: json::NewFeedback,
        caller: Option<&Principal>,
    ) -> Result<Feedback> {
        let json::NewFeedback {
            course_id,
            rating,
            message,
        } = new_feedback;
        let new_feedback = NewFeedback {
            course_id,
            rating: rating.into(),
            message,
        };
        Ok(self.feedback.add_feedback(new_feedback, caller)?)
    }

    pub fn get_feedback_for_course(&self, course_id: &str) -> Result<Vec<Feedback>> {
        Ok(self.feedback.get_feedback_for_course(course_id)?)
    }

    pub fn get_feedback(&self, id: &str) -> Result<Feedback> {
        Ok(self.feedback.get_feedback(id)?)
    }

    pub fn upvote_feedback(&self, id: &str) -> Result<Feedback> {
        Ok(self.feedback.upvote_feedback(id)?)
    }

    pub fn downvote_feedback(&self, id: &str) -> Result<Feedback> {
        Ok(self.feedback.downvote_feedback(id)?)
    }

    /// Executes a single request.
    ///
    /// Failures are returned as an error response and never
    /// escape as a panic.
    pub fn handle(&self, request: Request, caller: Option<&Principal>) -> Response {
        let method = request.method();
        debug!("Handling request {method}");
        self.dispatch(request, caller)
            .map_err(|err| {
                warn!("Request {method} failed: {err}");
                json::Error::from(err)
            })
            .into()
    }

    /// Parses and executes a single request.
    pub fn handle_json(&self, request: &str, caller: Option<&Principal>) -> Response {
        match serde_json::from_str(request) {
            Ok(request) => self.handle(request, caller),
            Err(err) => {
                warn!("Rejected malformed request: {err}");
                Response::Err(AppError::from(BError::Request(err)).into())
            }
        }
    }

    fn dispatch(&self, request: Request, caller: Option<&Principal>) -> Result<Payload> {
        let payload: Payload = match request {
            Request::AddCourse(new_course) => self.add_course(new_course, caller)?.into(),
            Request::GetAllCourses => self.get_all_courses()?.into(),
            Request::GetCourse { course_id } => self.get_course(&course_id)?.into(),
            Request::AddFeedback(new_feedback) => {
                self.add_feedback(new_feedback, caller)?.into()
            }
            Request::GetFeedbackForCourse { course_id } => {
                self.get_feedback_for_course(&course_id)?.into()
            }
            Request::GetFeedback { feedback_id } => self.get_feedback(&feedback_id)?.into(),
            Request::UpvoteFeedback { feedback_id } => {
                self.upvote_feedback(&feedback_id)?.into()
            }
            Request::DownvoteFeedback { feedback_id } => {
                self.downvote_feedback(&feedback_id)?.into()
            }
        };
        Ok(payload)
    }
}
