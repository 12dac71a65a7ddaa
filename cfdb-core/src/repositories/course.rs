use super::*;
use crate::{
    ids::{IdGenerator, RandomIds},
    policy::Policy,
    store::RecordStore,
    util::validate::Validate,
};

/// Number of attempts to obtain an unused identifier.
const MAX_ID_ATTEMPTS: usize = 3;

pub(crate) fn fresh_id<T, S, G>(store: &S, ids: &G) -> Result<Id>
where
    S: RecordStore<T>,
    G: IdGenerator,
{
    for _ in 0..MAX_ID_ATTEMPTS {
        let id = ids.generate();
        if !store.contains_key(id.as_str())? {
            return Ok(id);
        }
        log::warn!("Generated identifier {id} is already in use");
    }
    Err(store::Error::Other(anyhow::anyhow!(
        "No unused identifier after {MAX_ID_ATTEMPTS} attempts"
    ))
    .into())
}

pub(crate) fn load_course<S>(courses: &S, id: &str) -> Result<Option<Course>>
where
    S: RecordStore<Course>,
{
    Ok(courses.get(id)?)
}

#[derive(Debug)]
pub struct CourseRepository<S, G = RandomIds> {
    store: S,
    ids: G,
    policy: Policy,
}

impl<S> CourseRepository<S, RandomIds>
where
    S: RecordStore<Course>,
{
    pub fn new(store: S, policy: Policy) -> Self {
        Self::with_ids(store, RandomIds, policy)
    }
}

impl<S, G> CourseRepository<S, G>
where
    S: RecordStore<Course>,
    G: IdGenerator,
{
    pub fn with_ids(store: S, ids: G, policy: Policy) -> Self {
        Self { store, ids, policy }
    }

    pub fn add_course(&self, new_course: NewCourse, caller: Option<&Principal>) -> Result<Course> {
        new_course.validate(self.policy.payload)?;
        let NewCourse {
            title,
            description,
            tags,
        } = new_course;
        let course = Course {
            id: fresh_id::<Course, _, _>(&self.store, &self.ids)?,
            title,
            description,
            tags,
            date_added: Timestamp::now(),
            created_by: self.policy.caller.created_by(caller),
        };
        self.store.insert(course.id.as_str(), &course)?;
        log::debug!("Added course {}", course.id);
        Ok(course)
    }

    pub fn get_all_courses(&self) -> Result<Vec<Course>> {
        Ok(self.store.values()?)
    }

    pub fn get_course(&self, id: &str) -> Result<Course> {
        load_course(&self.store, id)?.ok_or_else(|| NotFound::Course(id.into()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        policy::{CallerTracking, PayloadValidation},
        store::{MemoryBackend, StableMap, StoreConfig},
    };
    use std::cell::Cell;

    fn new_store(backend: &MemoryBackend) -> StableMap<Course, &MemoryBackend> {
        StableMap::open(backend, StoreConfig::COURSES).unwrap()
    }

    fn intro() -> NewCourse {
        NewCourse {
            title: "Intro".into(),
            description: "Basics".into(),
            tags: vec!["101".into()],
        }
    }

    #[test]
    fn add_and_get_course() {
        let backend = MemoryBackend::default();
        let store = new_store(&backend);
        let repo = CourseRepository::new(&store, Policy::default());
        let alice = Principal::from("alice");
        let before = Timestamp::now();
        let course = repo.add_course(intro(), Some(&alice)).unwrap();
        assert_eq!(36, course.id.as_str().len());
        assert_eq!("Intro", course.title);
        assert_eq!("Basics", course.description);
        assert_eq!(vec!["101".to_string()], course.tags);
        assert!(course.date_added >= before);
        assert_eq!(Some(alice), course.created_by);
        assert_eq!(course, repo.get_course(course.id.as_str()).unwrap());
    }

    #[test]
    fn get_all_courses_counts_every_add() {
        let backend = MemoryBackend::default();
        let store = new_store(&backend);
        let repo = CourseRepository::new(&store, Policy::default());
        assert!(repo.get_all_courses().unwrap().is_empty());
        for _ in 0..5 {
            repo.add_course(intro(), None).unwrap();
        }
        assert_eq!(5, repo.get_all_courses().unwrap().len());
    }

    #[test]
    fn get_unknown_course() {
        let backend = MemoryBackend::default();
        let store = new_store(&backend);
        let repo = CourseRepository::new(&store, Policy::default());
        let err = repo.get_course("unknown").unwrap_err();
        assert!(matches!(err, Error::NotFound(NotFound::Course(ref id)) if id.as_str() == "unknown"));
        assert_eq!("Course with id=unknown not found", err.to_string());
    }

    #[test]
    fn reject_invalid_payload() {
        let backend = MemoryBackend::default();
        let store = new_store(&backend);
        let repo = CourseRepository::new(&store, Policy::default());
        let mut new_course = intro();
        new_course.title = "".into();
        let err = repo.add_course(new_course, None).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::Title)));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn permissive_payload() {
        let backend = MemoryBackend::default();
        let store = new_store(&backend);
        let policy = Policy {
            payload: PayloadValidation::Permissive,
            ..Default::default()
        };
        let repo = CourseRepository::new(&store, policy);
        let new_course = NewCourse {
            title: "".into(),
            description: "".into(),
            tags: vec![],
        };
        assert!(repo.add_course(new_course, None).is_ok());
    }

    #[test]
    fn omit_caller() {
        let backend = MemoryBackend::default();
        let store = new_store(&backend);
        let policy = Policy {
            caller: CallerTracking::Omit,
            ..Default::default()
        };
        let repo = CourseRepository::new(&store, policy);
        let course = repo
            .add_course(intro(), Some(&Principal::from("alice")))
            .unwrap();
        assert!(course.created_by.is_none());
    }

    #[test]
    fn oversized_course_is_a_storage_error() {
        let backend = MemoryBackend::default();
        let store = new_store(&backend);
        let repo = CourseRepository::new(&store, Policy::default());
        let mut new_course = intro();
        new_course.description = "x".repeat(1024);
        let err = repo.add_course(new_course, None).unwrap_err();
        assert!(matches!(
            err,
            Error::Storage(store::Error::ValueTooLarge { .. })
        ));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn regenerate_colliding_ids() {
        let backend = MemoryBackend::default();
        let store = new_store(&backend);
        let calls = Cell::new(0);
        let ids = || {
            calls.set(calls.get() + 1);
            if calls.get() <= 2 {
                Id::from("taken")
            } else {
                Id::from("fresh")
            }
        };
        let repo = CourseRepository::with_ids(&store, ids, Policy::default());
        assert_eq!("taken", repo.add_course(intro(), None).unwrap().id.as_str());
        assert_eq!("fresh", repo.add_course(intro(), None).unwrap().id.as_str());
        assert_eq!(2, repo.get_all_courses().unwrap().len());
    }

    #[test]
    fn give_up_on_exhausted_ids() {
        let backend = MemoryBackend::default();
        let store = new_store(&backend);
        let repo = CourseRepository::with_ids(&store, || Id::from("same"), Policy::default());
        repo.add_course(intro(), None).unwrap();
        let err = repo.add_course(intro(), None).unwrap_err();
        assert!(matches!(err, Error::Storage(store::Error::Other(_))));
        assert_eq!(1, repo.get_all_courses().unwrap().len());
    }
}
