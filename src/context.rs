//! Architecture-tagged CPU contexts.
//!
//! A context stream in a dump starts with the flags word, whose high bits
//! name the architecture. `RawContext` reads the word, picks the layout for
//! that architecture and decodes the whole structure.

use scroll::{Endian, Pread};

use crate::config::CodecConfig;
use crate::prelude::*;
use crate::register::{role_index, Role};

/// A decoded context of any architecture with a codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawContext {
    X86(RawContextX86),
    Arm(RawContextArm),
    /// Both MIPS tags.
    Mips(RawContextMips),
    Sparc(RawContextSparc),
    Riscv(RawContextRiscv),
    Riscv64(RawContextRiscv64),
}

macro_rules! dispatch {
    ($self: expr, $context: ident => $body: expr) => {
        match $self {
            RawContext::X86($context) => $body,
            RawContext::Arm($context) => $body,
            RawContext::Mips($context) => $body,
            RawContext::Sparc($context) => $body,
            RawContext::Riscv($context) => $body,
            RawContext::Riscv64($context) => $body,
        }
    };
}

impl RawContext {
    /// Decodes a context in the byte order of the running machine.
    pub fn decode(bytes: &[u8]) -> Result<RawContext> {
        RawContext::decode_with(bytes, &CodecConfig::default())
    }

    pub fn decode_with(bytes: &[u8], config: &CodecConfig) -> Result<RawContext> {
        let flags = read_context_flags(bytes, config.endian)?;
        let (arch, features) = classify_with(flags, config.strict_feature_bits)?;
        trace!(
            "decoding {} context: flags = {:#010x}, features = {:?}",
            arch,
            flags,
            features
        );

        let endian = config.endian;
        let context = match arch {
            Architecture::X86 => RawContext::X86(RawContextX86::decode_with(bytes, endian)?),
            Architecture::Arm => RawContext::Arm(RawContextArm::decode_with(bytes, endian)?),
            Architecture::Mips | Architecture::Mips64 => {
                RawContext::Mips(RawContextMips::decode_with(bytes, endian)?)
            }
            Architecture::Sparc => RawContext::Sparc(RawContextSparc::decode_with(bytes, endian)?),
            Architecture::Riscv => RawContext::Riscv(RawContextRiscv::decode_with(bytes, endian)?),
            Architecture::Riscv64 => {
                RawContext::Riscv64(RawContextRiscv64::decode_with(bytes, endian)?)
            }
            Architecture::Amd64
            | Architecture::Arm64Old
            | Architecture::Ppc
            | Architecture::Ppc64 => {
                debug!("no codec for {} contexts", arch);
                return_err!(
                    UnsupportedArchitecture,
                    "the architecture has no context codec"
                );
            }
        };
        Ok(context)
    }

    /// Encodes into the start of `buf`. See `RawContextFormat::encode_into`.
    pub fn encode_into(&self, buf: &mut [u8], endian: Endian) -> Result<usize> {
        dispatch!(self, context => context.encode_into(buf, endian))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        dispatch!(self, context => context.to_bytes())
    }

    pub fn context_flags(&self) -> u32 {
        dispatch!(self, context => context.context_flags())
    }

    pub fn features(&self) -> ContextFeatures {
        dispatch!(self, context => context.features())
    }

    /// The architecture named by the flags word. A `Mips` context reports
    /// either MIPS tag.
    pub fn architecture(&self) -> Architecture {
        match self {
            RawContext::X86(_) => Architecture::X86,
            RawContext::Arm(_) => Architecture::Arm,
            RawContext::Mips(context) if context.is_mips64() => Architecture::Mips64,
            RawContext::Mips(_) => Architecture::Mips,
            RawContext::Sparc(_) => Architecture::Sparc,
            RawContext::Riscv(_) => Architecture::Riscv,
            RawContext::Riscv64(_) => Architecture::Riscv64,
        }
    }

    /// The encoded size in bytes, independent of the feature bits.
    pub fn size(&self) -> usize {
        match self {
            RawContext::X86(_) => RawContextX86::SIZE,
            RawContext::Arm(_) => RawContextArm::SIZE,
            RawContext::Mips(_) => RawContextMips::SIZE,
            RawContext::Sparc(_) => RawContextSparc::SIZE,
            RawContext::Riscv(_) => RawContextRiscv::SIZE,
            RawContext::Riscv64(_) => RawContextRiscv64::SIZE,
        }
    }

    /// Reads the value of the register with the given role, zero-extended.
    ///
    /// The value is returned whether or not the flags word marks its group
    /// as present.
    pub fn register(&self, role: Role) -> Result<u64> {
        let value = match (self, role) {
            (RawContext::X86(context), Role::ProgramCounter) => context.eip as u64,
            (RawContext::X86(context), Role::StackPointer) => context.esp as u64,
            (RawContext::X86(context), Role::FramePointer) => context.ebp as u64,
            (RawContext::Mips(context), Role::ProgramCounter) => context.epc,
            (RawContext::Sparc(context), Role::ProgramCounter) => context.pc,
            (RawContext::X86(_), _) => {
                return_err!(UnsupportedRole, "x86 has no return address register");
            }
            (RawContext::Arm(context), _) => {
                context.iregs[role_index(Architecture::Arm, role)?] as u64
            }
            (RawContext::Mips(context), _) => context.iregs[role_index(Architecture::Mips, role)?],
            (RawContext::Sparc(context), _) => {
                context.g_r[role_index(Architecture::Sparc, role)?]
            }
            (RawContext::Riscv(context), _) => {
                context.iregs[role_index(Architecture::Riscv, role)?] as u64
            }
            (RawContext::Riscv64(context), _) => {
                context.iregs[role_index(Architecture::Riscv64, role)?]
            }
        };
        Ok(value)
    }

    pub fn instruction_pointer(&self) -> Result<u64> {
        self.register(Role::ProgramCounter)
    }

    pub fn stack_pointer(&self) -> Result<u64> {
        self.register(Role::StackPointer)
    }
}

/// Reads the leading flags word.
pub fn read_context_flags(bytes: &[u8], endian: Endian) -> Result<u32> {
    if bytes.len() < CONTEXT_FLAGS_SIZE {
        return_err!(TruncatedBuffer, "buffer cannot hold the context flags");
    }
    let flags: u32 = bytes.pread_with(0, endian).map_err(|e| err!(e))?;
    Ok(flags)
}

/// A context stream that was either decoded or kept as raw bytes.
#[derive(Debug)]
pub enum ContextBlock<'a> {
    Decoded(RawContext),
    Uninterpreted {
        /// The flags word, when the stream was long enough to hold one.
        flags: Option<u32>,
        bytes: &'a [u8],
        error: Error,
    },
}

impl<'a> ContextBlock<'a> {
    pub fn as_decoded(&self) -> Option<&RawContext> {
        match self {
            ContextBlock::Decoded(context) => Some(context),
            ContextBlock::Uninterpreted { .. } => None,
        }
    }

    pub fn is_decoded(&self) -> bool {
        self.as_decoded().is_some()
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            ContextBlock::Decoded(_) => None,
            ContextBlock::Uninterpreted { error, .. } => Some(error),
        }
    }
}

/// Decodes `bytes`, falling back to keeping them uninterpreted when they
/// cannot be decoded.
pub fn decode_or_raw<'a>(bytes: &'a [u8], config: &CodecConfig) -> ContextBlock<'a> {
    match RawContext::decode_with(bytes, config) {
        Ok(context) => ContextBlock::Decoded(context),
        Err(error) => {
            warn!("keeping context stream uninterpreted: {}", error.backtrace());
            ContextBlock::Uninterpreted {
                flags: read_context_flags(bytes, config.endian).ok(),
                bytes,
                error,
            }
        }
    }
}
