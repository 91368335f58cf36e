use std::fmt;

use num_enum::TryFromPrimitiveError;

use super::{Error, ErrorKind};
use crate::format::Architecture;

pub trait ToErrorKind: fmt::Display + fmt::Debug {
    fn kind(&self) -> ErrorKind;
}

impl ToErrorKind for ErrorKind {
    fn kind(&self) -> ErrorKind {
        *self
    }
}

impl<T> From<T> for Error
where
    T: ToErrorKind + Send + Sync + 'static,
{
    fn from(t: T) -> Error {
        Error::boxed(t, None)
    }
}

impl ToErrorKind for scroll::Error {
    fn kind(&self) -> ErrorKind {
        match self {
            scroll::Error::TooBig { .. } | scroll::Error::BadOffset(_) => {
                ErrorKind::TruncatedBuffer
            }
            _ => ErrorKind::InvalidData,
        }
    }
}

impl ToErrorKind for TryFromPrimitiveError<Architecture> {
    fn kind(&self) -> ErrorKind {
        ErrorKind::UnknownArchitecture
    }
}

impl ToErrorKind for serde_json::Error {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidConfig
    }
}

impl ToErrorKind for log::SetLoggerError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidConfig
    }
}

impl ToErrorKind for log::ParseLevelError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidConfig
    }
}
