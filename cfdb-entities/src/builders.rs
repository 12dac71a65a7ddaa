pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{course_builder::*, feedback_builder::*};

pub mod course_builder {

    use super::*;
    use crate::{course::*, id::*, time::*};

    #[derive(Debug)]
    pub struct CourseBuild {
        course: Course,
    }

    impl CourseBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.course.id = id.into();
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.course.title = title.into();
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.course.description = desc.into();
            self
        }
        pub fn tags(mut self, tags: Vec<impl Into<String>>) -> Self {
            self.course.tags = tags.into_iter().map(|x| x.into()).collect();
            self
        }
        pub fn date_added(mut self, ts: Timestamp) -> Self {
            self.course.date_added = ts;
            self
        }
        pub fn created_by(mut self, principal: Option<&str>) -> Self {
            self.course.created_by = principal.map(Into::into);
            self
        }
        pub fn finish(self) -> Course {
            self.course
        }
    }

    impl Builder for Course {
        type Build = CourseBuild;
        fn build() -> CourseBuild {
            CourseBuild {
                course: Course {
                    id: Id::new(),
                    title: "".into(),
                    description: "".into(),
                    tags: vec![],
                    date_added: Timestamp::now(),
                    created_by: None,
                },
            }
        }
    }
}

pub mod feedback_builder {

    use super::*;
    use crate::{feedback::*, id::*, time::*};

    #[derive(Debug)]
    pub struct FeedbackBuild {
        feedback: Feedback,
    }

    impl FeedbackBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.feedback.id = id.into();
            self
        }
        pub fn course_id(mut self, id: &str) -> Self {
            self.feedback.course_id = id.into();
            self
        }
        pub fn rating(mut self, rating: i32) -> Self {
            self.feedback.rating = rating.into();
            self
        }
        pub fn message(mut self, message: &str) -> Self {
            self.feedback.message = message.into();
            self
        }
        pub fn attachment_url(mut self, url: Option<&str>) -> Self {
            self.feedback.attachment_url = url.map(Into::into);
            self
        }
        pub fn upvotes(mut self, upvotes: u64) -> Self {
            self.feedback.upvotes = upvotes;
            self
        }
        pub fn downvotes(mut self, downvotes: u64) -> Self {
            self.feedback.downvotes = downvotes;
            self
        }
        pub fn created_at(mut self, ts: Timestamp) -> Self {
            self.feedback.created_at = ts;
            self
        }
        pub fn updated_at(mut self, ts: Option<Timestamp>) -> Self {
            self.feedback.updated_at = ts;
            self
        }
        pub fn created_by(mut self, principal: Option<&str>) -> Self {
            self.feedback.created_by = principal.map(Into::into);
            self
        }
        pub fn finish(self) -> Feedback {
            self.feedback
        }
    }

    impl Builder for Feedback {
        type Build = FeedbackBuild;
        fn build() -> FeedbackBuild {
            FeedbackBuild {
                feedback: Feedback {
                    id: Id::new(),
                    course_id: Id::new(),
                    rating: RatingValue::default(),
                    message: "".into(),
                    attachment_url: None,
                    upvotes: 0,
                    downvotes: 0,
                    created_at: Timestamp::now(),
                    updated_at: None,
                    created_by: None,
                },
            }
        }
    }
}
