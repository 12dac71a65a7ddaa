//! # cfdb-core
//!
//! Record stores, repositories and the business rules that govern
//! record identity, the feedback → course reference and voting.

pub mod ids;
pub mod policy;
pub mod repositories;
pub mod store;
pub mod util;

pub mod entities {
    pub use cfdb_entities::{course::*, feedback::*, id::*, principal::*, time::*};
}

pub use repositories::Error as RepoError;
