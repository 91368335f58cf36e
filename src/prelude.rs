pub use crate::error::*;
pub use crate::format::*;
