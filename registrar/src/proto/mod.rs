pub mod http;

pub use roster::{Activities, ActivityRecord};

use actix::MailboxError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use failure::Fail;
use roster::RegistryError;
use serde::{Deserialize, Serialize};

/// Error payload. `detail` carries the human readable text shown by clients.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody<E> {
    #[serde(flatten)]
    pub error: E,
    pub detail: String,
}

impl<E: std::fmt::Display> ErrorBody<E> {
    pub fn new(error: E) -> Self {
        let detail = format!("{}", error);
        ErrorBody { error, detail }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Fail)]
#[serde(rename_all = "camelCase")]
#[serde(tag = "type")]
pub enum Error {
    #[fail(display = "Activity not found")]
    ActivityNotFound { activity: String },
    #[fail(display = "Student is already signed up for this activity")]
    AlreadySignedUp { activity: String, email: String },
    #[fail(display = "Student is not signed up for this activity")]
    NotSignedUp { activity: String, email: String },
    #[fail(display = "participant email must not be empty")]
    InvalidEmail,
    #[fail(display = "invalid query: {}", error)]
    InvalidQuery { error: String },
    #[fail(display = "internal error: {}", error)]
    Internal { error: String },
}

impl From<RegistryError> for Error {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound { activity } => Error::ActivityNotFound { activity },
            RegistryError::DuplicateRegistration { activity, email } => {
                Error::AlreadySignedUp { activity, email }
            }
            RegistryError::NotRegistered { activity, email } => {
                Error::NotSignedUp { activity, email }
            }
            RegistryError::InvalidEmail => Error::InvalidEmail,
        }
    }
}

impl From<MailboxError> for Error {
    fn from(err: MailboxError) -> Self {
        Error::Internal {
            error: format!("registry is unavailable: {}", err),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        use self::Error::*;
        // Unknown activities are reported as 400, not 404, like every other caller error
        match self {
            ActivityNotFound { .. } => StatusCode::BAD_REQUEST,
            AlreadySignedUp { .. } => StatusCode::BAD_REQUEST,
            NotSignedUp { .. } => StatusCode::BAD_REQUEST,
            InvalidEmail => StatusCode::BAD_REQUEST,
            InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.clone()))
    }
}
