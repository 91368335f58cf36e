use std::fmt;

use super::{ErrorKind, ToErrorKind};

#[derive(Debug)]
pub struct Error {
    inner: Error__,
    location: Option<ErrorLocation>,
    cause: Option<Box<Error>>,
}

#[derive(Debug)]
enum Error__ {
    Embedded((ErrorKind, &'static str)),
    Boxed(Box<dyn ToErrorKind + Send + Sync + 'static>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorLocation {
    line: u32,
    file: &'static str,
}

impl Error {
    pub fn embedded(inner: (ErrorKind, &'static str), location: Option<ErrorLocation>) -> Error {
        Error {
            inner: Error__::Embedded(inner),
            location,
            cause: None,
        }
    }

    pub fn boxed<T>(inner: T, location: Option<ErrorLocation>) -> Error
    where
        T: ToErrorKind + Send + Sync + 'static,
    {
        Error {
            inner: Error__::Boxed(Box::new(inner)),
            location,
            cause: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.inner {
            Error__::Embedded((kind, _)) => *kind,
            Error__::Boxed(inner_error) => inner_error.kind(),
        }
    }

    pub fn get_cause_mut(&mut self) -> &mut Option<Box<Error>> {
        &mut self.cause
    }

    pub fn get_cause(&self) -> &Option<Box<Error>> {
        &self.cause
    }
}

impl ErrorLocation {
    pub fn new(file: &'static str, line: u32) -> ErrorLocation {
        ErrorLocation { file, line }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.inner)?;
        if let Some(location) = self.location {
            write!(f, " {}", location)?;
        }
        Ok(())
    }
}

impl fmt::Display for Error__ {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error__::Embedded((kind, msg)) => write!(f, "{}: {}", kind, msg),
            Error__::Boxed(inner_error) => write!(f, "{}: {}", inner_error.kind(), inner_error),
        }
    }
}

impl fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[line = {}, file = {}]", self.line, self.file)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
