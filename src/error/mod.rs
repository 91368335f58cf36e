//! Error handling with error locations, cause chains and a closed set of
//! error kinds.
//!
//! Every error carries an `ErrorKind`. Errors raised inside this crate also
//! record the file and line that raised them:
//! ```text
//! TruncatedBuffer: buffer is shorter than the context structure [line = 42, file = src/format/mod.rs]
//! ```
//! Errors can be chained with `ResultExt::cause_err` and printed as a whole
//! with `Error::backtrace`.
//!
//! Embedded errors (a kind plus a static message) never allocate, so they are
//! safe to create on the crash-capture path.

mod backtrace;
mod error;
mod kind;
mod to_kind;

pub use self::backtrace::{ErrorBacktrace, ResultExt};
pub use self::error::{Error, ErrorLocation};
pub use self::kind::ErrorKind;
pub use self::kind::ErrorKind::*;
pub use self::to_kind::ToErrorKind;

pub type Result<T> = std::result::Result<T, Error>;

macro_rules! err {
    ($kind_expr: expr, $error_msg: expr) => {{
        let inner_error = {
            let kind: $crate::error::ErrorKind = $kind_expr;
            let msg: &'static str = $error_msg;
            (kind, msg)
        };
        let error = $crate::error::Error::embedded(
            inner_error,
            Some($crate::error::ErrorLocation::new(file!(), line!())),
        );
        error
    }};
    ($error_expr: expr) => {{
        let inner_error = $error_expr;
        let error = $crate::error::Error::boxed(
            inner_error,
            Some($crate::error::ErrorLocation::new(file!(), line!())),
        );
        error
    }};
}

macro_rules! return_err {
    ($kind_expr: expr, $error_msg: expr) => {{
        return Err(err!($kind_expr, $error_msg));
    }};
    ($error_expr: expr) => {{
        return Err(err!($error_expr));
    }};
}
