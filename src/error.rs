use std::env;
use std::fmt::Debug;
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("{message} (code {code})")]
pub struct Error {
    pub code: i32,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    Structural,
    Config,
    Domain,
    Validation,
    NotFound,
    Unexpected,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self.code {
            1 => ErrorKind::Io,
            2 => ErrorKind::Parse,
            3 => ErrorKind::Structural,
            4 => ErrorKind::Config,
            100 => ErrorKind::Domain,
            101 => ErrorKind::Validation,
            102 => ErrorKind::NotFound,
            _ => ErrorKind::Unexpected,
        }
    }

    /// Errors the caller caused and can fix by changing its input.
    pub fn is_caller_facing(&self) -> bool {
        self.code >= 100
    }

    /// Parse and structural failures are skipped when listing a directory.
    pub fn is_unreadable_record(&self) -> bool {
        matches!(self.kind(), ErrorKind::Parse | ErrorKind::Structural)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        io_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Io => io_error(err),
            serde_json::error::Category::Data => structural_error(err),
            _ => parse_error(err),
        }
    }
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

pub fn io_error<T: Debug>(err: T) -> Error {
    Error {
        code: 1,
        message: format!("io error: {:?}", err),
    }
}

pub fn parse_error<T: Debug>(err: T) -> Error {
    Error {
        code: 2,
        message: format!("malformed trip record: {:?}", err),
    }
}

pub fn structural_error(detail: impl std::fmt::Display) -> Error {
    Error {
        code: 3,
        message: format!("incomplete trip record: {}", detail),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 4,
        message: "environment variable error".into(),
    }
}

pub fn domain_error(detail: impl Into<String>) -> Error {
    Error {
        code: 100,
        message: detail.into(),
    }
}

pub fn validation_error(detail: impl Into<String>) -> Error {
    Error {
        code: 101,
        message: detail.into(),
    }
}

pub fn not_found_error(id: &str) -> Error {
    Error {
        code: 102,
        message: format!("no trip with id {}", id),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}
