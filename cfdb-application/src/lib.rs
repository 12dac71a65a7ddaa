#[macro_use]
extern crate log;

mod service;

pub mod error;

pub use self::service::Service;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use cfdb_core::{entities::*, repositories::*};

#[cfg(test)]
pub(crate) mod tests;
