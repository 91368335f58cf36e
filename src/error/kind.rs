use std::fmt;

/// The kinds of failures reported by this crate.
///
/// None of them is fatal to reading a whole dump: a consumer that hits one
/// skips or flags the context block and carries on with the rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The architecture tag bits of a flags word match no registered tag.
    UnknownArchitecture,
    /// The tag is registered but no codec exists for its layout.
    UnsupportedArchitecture,
    /// The input is shorter than the structure being decoded.
    TruncatedBuffer,
    /// The architecture has no conventional register for the requested role.
    UnsupportedRole,
    /// The output buffer cannot hold the encoded structure.
    BufferTooSmall,
    /// The flags word carries feature bits not defined for its architecture.
    InvalidFlags,
    InvalidConfig,
    InvalidData,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        use self::ErrorKind::*;
        match *self {
            UnknownArchitecture => "UnknownArchitecture",
            UnsupportedArchitecture => "UnsupportedArchitecture",
            TruncatedBuffer => "TruncatedBuffer",
            UnsupportedRole => "UnsupportedRole",
            BufferTooSmall => "BufferTooSmall",
            InvalidFlags => "InvalidFlags",
            InvalidConfig => "InvalidConfig",
            InvalidData => "InvalidData",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
