//! Per-architecture CPU context records of the minidump crash-dump format.
//!
//! A minidump stores the saved register state of every thread as a fixed
//! binary structure whose leading `context_flags` word names the CPU
//! architecture and the register groups that were captured. This crate
//! provides
//!
//! * the flags registry (`format::classify`, `format::ContextFlags`),
//! * one `#[repr(C)]` structure per architecture with a codec that reads and
//!   writes it byte for byte (`format::RawContextFormat`),
//! * a tagged `context::RawContext` that dispatches on the flags word,
//! * the conventional register roles of each architecture (`register`).
//!
//! RISC-V 64 is the reference layout:
//! ```no_run
//! use minidump_context::format::{ContextFlagsRiscv64, RawContextFormat, RawContextRiscv64};
//! use minidump_context::RawContext;
//!
//! let mut context = RawContextRiscv64::new(ContextFlagsRiscv64::INTEGER);
//! context.iregs[2] = 0x7fff_0000;
//! let bytes = context.to_bytes();
//! let decoded = RawContext::decode(&bytes).unwrap();
//! assert_eq!(decoded.stack_pointer().unwrap(), 0x7fff_0000);
//! ```

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate derive_builder;
#[macro_use]
extern crate log;
extern crate num_enum;
extern crate scroll;
extern crate serde;
extern crate serde_json;

#[macro_use]
pub mod error;

mod prelude;

pub mod config;
pub mod context;
pub mod format;
pub mod register;
pub mod util;

pub use self::config::{parse_config, CodecConfig, CodecConfigBuilder};
pub use self::context::{decode_or_raw, ContextBlock, RawContext};
pub use self::error::{Error, ErrorKind, Result, ResultExt};
pub use self::format::{
    classify, classify_with, Architecture, ContextFeatures, ContextFlags, RawContextFormat,
    CONTEXT_CPU_MASK, CONTEXT_FLAGS_SIZE,
};
pub use self::register::{role_index, Role};
