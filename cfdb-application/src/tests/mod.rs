use std::sync::Arc;

use cfdb_boundary::{self as json, ErrorKind, Payload, Request, Response};
use cfdb_core::{
    policy::{Policy, RatingPolicy},
    store::{MemoryBackend, StoreConfig},
};
use cfdb_db_sqlite::SqliteBackend;
use serde_json::json;

use super::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub struct BackendFixture {
    pub service: Service<MemoryBackend>,
}

impl BackendFixture {
    pub fn new() -> Self {
        Self::with_policy(Policy::default())
    }

    pub fn with_policy(policy: Policy) -> Self {
        init_logging();
        let service = Service::open(
            MemoryBackend::default(),
            StoreConfig::COURSES,
            StoreConfig::FEEDBACK,
            policy,
        )
        .unwrap();
        Self { service }
    }

    pub fn call(&self, request: serde_json::Value) -> Response {
        self.service.handle_json(&request.to_string(), None)
    }

    pub fn create_course(&self, title: &str) -> String {
        let new_course = json::NewCourse {
            title: title.into(),
            description: "Basics".into(),
            tags: vec!["101".into()],
        };
        self.service.add_course(new_course, None).unwrap().id.into()
    }

    pub fn create_feedback(&self, course_id: &str, rating: i32) -> String {
        let new_feedback = json::NewFeedback {
            course_id: course_id.into(),
            rating,
            message: "good".into(),
        };
        self.service
            .add_feedback(new_feedback, None)
            .unwrap()
            .id
            .into()
    }
}

fn expect_feedback(res: Response) -> json::Feedback {
    match res {
        Response::Ok(Payload::Feedback(feedback)) => feedback,
        res => panic!("Unexpected response: {res:?}"),
    }
}

fn expect_error(res: Response) -> json::Error {
    match res {
        Response::Err(err) => err,
        res => panic!("Unexpected response: {res:?}"),
    }
}

#[test]
fn course_and_feedback_scenario() {
    let fixture = BackendFixture::new();
    let res = fixture.call(json!({
        "method": "addCourse",
        "args": { "title": "Intro", "description": "Basics", "tags": ["101"] }
    }));
    let Response::Ok(Payload::Course(course)) = res else {
        panic!("Unexpected response");
    };
    let res = fixture.call(json!({
        "method": "addFeedback",
        "args": { "courseId": course.id, "rating": 4, "message": "good" }
    }));
    let feedback = expect_feedback(res);
    assert_eq!(0, feedback.upvotes);
    assert_eq!(0, feedback.downvotes);
    for _ in 0..2 {
        fixture.call(json!({
            "method": "upvoteFeedback",
            "args": { "feedbackId": feedback.id }
        }));
    }
    let res = fixture.call(json!({
        "method": "getFeedback",
        "args": { "feedbackId": feedback.id }
    }));
    let feedback = expect_feedback(res);
    assert_eq!(2, feedback.upvotes);
    assert_eq!(0, feedback.downvotes);
}

#[test]
fn get_course_returns_the_created_course() {
    let fixture = BackendFixture::new();
    let new_course = json::NewCourse {
        title: "Intro".into(),
        description: "Basics".into(),
        tags: vec!["101".into(), "beginner".into()],
    };
    let alice = Principal::from("alice");
    let created = fixture.service.add_course(new_course, Some(&alice)).unwrap();
    let res = fixture
        .service
        .handle(Request::GetCourse { course_id: created.id.to_string() }, None);
    let expected = Response::Ok(Payload::Course(created.into()));
    assert_eq!(expected, res);
}

#[test]
fn get_all_courses() {
    let fixture = BackendFixture::new();
    let ids: Vec<_> = (0..3).map(|i| fixture.create_course(&format!("c{i}"))).collect();
    let res = fixture.call(json!({ "method": "getAllCourses" }));
    let Response::Ok(Payload::Courses(courses)) = res else {
        panic!("Unexpected response");
    };
    let mut expected = ids.clone();
    expected.sort();
    let ids: Vec<_> = courses.into_iter().map(|c| c.id).collect();
    assert_eq!(expected, ids);
}

#[test]
fn feedback_for_course() {
    let fixture = BackendFixture::new();
    let a = fixture.create_course("a");
    let b = fixture.create_course("b");
    let mut expected = vec![fixture.create_feedback(&a, 1), fixture.create_feedback(&a, 2)];
    fixture.create_feedback(&b, 3);
    expected.sort();
    let res = fixture.call(json!({
        "method": "getFeedbackForCourse",
        "args": { "courseId": a }
    }));
    let Response::Ok(Payload::FeedbackList(feedback)) = res else {
        panic!("Unexpected response");
    };
    let ids: Vec<_> = feedback.into_iter().map(|f| f.id).collect();
    assert_eq!(expected, ids);
}

#[test]
fn feedback_for_unknown_course() {
    let fixture = BackendFixture::new();
    let res = fixture.call(json!({
        "method": "addFeedback",
        "args": { "courseId": "unknown", "rating": 4, "message": "good" }
    }));
    let err = expect_error(res);
    assert_eq!(ErrorKind::NotFound, err.kind);
    assert_eq!("Course not found.", err.message);
    assert!(fixture.service.get_feedback_for_course("unknown").unwrap().is_empty());
}

#[test]
fn rating_out_of_range() {
    let fixture = BackendFixture::new();
    let course_id = fixture.create_course("a");
    let res = fixture.call(json!({
        "method": "addFeedback",
        "args": { "courseId": course_id, "rating": 6, "message": "good" }
    }));
    assert_eq!(ErrorKind::Validation, expect_error(res).kind);
}

#[test]
fn unbounded_ratings() {
    let fixture = BackendFixture::with_policy(Policy {
        rating: RatingPolicy::Unbounded,
        ..Default::default()
    });
    let course_id = fixture.create_course("a");
    let res = fixture.call(json!({
        "method": "addFeedback",
        "args": { "courseId": course_id, "rating": 6, "message": "good" }
    }));
    assert_eq!(6, expect_feedback(res).rating);
}

#[test]
fn unknown_feedback() {
    let fixture = BackendFixture::new();
    for (method, message) in [
        ("getFeedback", "Feedback with id=unknown not found"),
        ("upvoteFeedback", "Feedback not found."),
        ("downvoteFeedback", "Feedback not found."),
    ] {
        let res = fixture.call(json!({
            "method": method,
            "args": { "feedbackId": "unknown" }
        }));
        let err = expect_error(res);
        assert_eq!(ErrorKind::NotFound, err.kind);
        assert_eq!(message, err.message);
    }
}

#[test]
fn malformed_requests() {
    let fixture = BackendFixture::new();
    let res = fixture.service.handle_json("not json", None);
    assert_eq!(ErrorKind::Validation, expect_error(res).kind);
    let res = fixture.call(json!({
        "method": "addCourse",
        "args": { "title": "Intro" }
    }));
    assert_eq!(ErrorKind::Validation, expect_error(res).kind);
    let res = fixture.call(json!({
        "method": "addCourse",
        "args": { "title": " ", "description": "Basics", "tags": ["101"] }
    }));
    assert_eq!(ErrorKind::Validation, expect_error(res).kind);
    assert!(fixture.service.get_all_courses().unwrap().is_empty());
}

#[test]
fn oversized_records() {
    let fixture = BackendFixture::new();
    let res = fixture.call(json!({
        "method": "addCourse",
        "args": { "title": "Intro", "description": "x".repeat(2000), "tags": ["101"] }
    }));
    assert_eq!(ErrorKind::Storage, expect_error(res).kind);
    assert!(fixture.service.get_all_courses().unwrap().is_empty());
}

#[test]
fn caller_is_recorded() {
    let fixture = BackendFixture::new();
    let course_id = fixture.create_course("a");
    let bob = Principal::from("bob");
    let request = Request::AddFeedback(json::NewFeedback {
        course_id,
        rating: 5,
        message: "great".into(),
    });
    let feedback = expect_feedback(fixture.service.handle(request, Some(&bob)));
    assert_eq!(Some("bob".to_string()), feedback.created_by);
}

#[test]
fn concurrent_votes() {
    let fixture = BackendFixture::new();
    let course_id = fixture.create_course("a");
    let feedback_id = fixture.create_feedback(&course_id, 3);
    let service = Arc::new(fixture.service);
    let threads: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            let feedback_id = feedback_id.clone();
            std::thread::spawn(move || {
                for _ in 0..10 {
                    service.upvote_feedback(&feedback_id).unwrap();
                    service.downvote_feedback(&feedback_id).unwrap();
                }
            })
        })
        .collect();
    for thread in threads {
        thread.join().unwrap();
    }
    let feedback = service.get_feedback(&feedback_id).unwrap();
    assert_eq!(40, feedback.upvotes);
    assert_eq!(40, feedback.downvotes);
}

#[test]
fn scenario_on_sqlite() {
    init_logging();
    let backend = SqliteBackend::open(":memory:", 1).unwrap();
    let service = Service::with_defaults(backend).unwrap();
    let course = service
        .add_course(
            json::NewCourse {
                title: "Intro".into(),
                description: "Basics".into(),
                tags: vec!["101".into()],
            },
            None,
        )
        .unwrap();
    let feedback = service
        .add_feedback(
            json::NewFeedback {
                course_id: course.id.to_string(),
                rating: 4,
                message: "good".into(),
            },
            None,
        )
        .unwrap();
    service.upvote_feedback(feedback.id.as_str()).unwrap();
    service.upvote_feedback(feedback.id.as_str()).unwrap();
    let feedback = service.get_feedback(feedback.id.as_str()).unwrap();
    assert_eq!(2, feedback.upvotes);
    assert_eq!(0, feedback.downvotes);
    assert_eq!(course, service.get_course(course.id.as_str()).unwrap());
    assert_eq!(vec![feedback], service.get_feedback_for_course(course.id.as_str()).unwrap());
}
