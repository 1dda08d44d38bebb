use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// True for errors caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::Validation(_)
                | ServiceError::NotFound(_)
                | ServiceError::Model(models::errors::ModelError::Validation(_))
        )
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match e {
            DbErr::RecordNotFound(msg) => ServiceError::NotFound(msg),
            DbErr::RecordNotUpdated => ServiceError::NotFound("record not updated".into()),
            other => ServiceError::Db(other.to_string()),
        }
    }
}
