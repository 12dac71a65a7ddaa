use cfdb_boundary as json;
use cfdb_core::{repositories::Error as RepoError, store};
use thiserror::Error;

pub use cfdb_boundary::ErrorKind;
pub use cfdb_core::repositories;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<store::Error> for AppError {
    fn from(err: store::Error) -> AppError {
        RepoError::from(err).into()
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Repo(#[from] repositories::Error),
    #[error("Malformed request: {0}")]
    Request(serde_json::Error),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Business(BError::Repo(err)) => match err {
                RepoError::Validation(_) => ErrorKind::Validation,
                RepoError::NotFound(_) => ErrorKind::NotFound,
                RepoError::Storage(_) => ErrorKind::Storage,
            },
            Self::Business(BError::Request(_)) => ErrorKind::Validation,
            Self::Serialize(_) | Self::Other(_) => ErrorKind::Storage,
        }
    }
}

impl From<AppError> for json::Error {
    fn from(err: AppError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfdb_core::{entities::Id, repositories::NotFound, util::validate::ValidationError};

    #[test]
    fn classify_errors() {
        let err = AppError::from(RepoError::from(ValidationError::Title));
        assert_eq!(ErrorKind::Validation, err.kind());
        let err = AppError::from(RepoError::from(NotFound::ParentCourse(Id::from("x"))));
        assert_eq!(ErrorKind::NotFound, err.kind());
        let err = AppError::from(store::Error::ValueTooLarge { len: 2000, max: 1024 });
        assert_eq!(ErrorKind::Storage, err.kind());
        let err = serde_json::from_str::<json::Request>("{}").unwrap_err();
        assert_eq!(
            ErrorKind::Validation,
            AppError::from(BError::Request(err)).kind()
        );
    }

    #[test]
    fn error_messages() {
        let err: json::Error =
            AppError::from(RepoError::from(NotFound::ParentCourse(Id::from("x")))).into();
        assert_eq!(ErrorKind::NotFound, err.kind);
        assert_eq!("Course not found.", err.message);
    }
}
