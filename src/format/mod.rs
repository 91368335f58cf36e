//! Binary layouts of the raw CPU context structures.
//!
//! Every structure here is `#[repr(C)]`, keeps all of its members on their
//! natural boundaries and spells out every padding word as a field, so that
//! `size_of` equals the on-wire size and no compiler or ABI can introduce
//! padding of its own. Padding and the regions of absent register groups are
//! copied verbatim by the codecs; they are never zeroed or validated.

use scroll::Endian;

use crate::prelude::*;

macro_rules! impl_raw_context_format {
    ($type: ty, $size: expr) => {
        const _: () = assert!(core::mem::size_of::<$type>() == $size);

        impl $crate::format::RawContextFormat for $type {
            const SIZE: usize = $size;

            fn context_flags(&self) -> u32 {
                self.context_flags
            }

            fn decode_with(bytes: &[u8], endian: scroll::Endian) -> Result<Self> {
                use scroll::Pread;

                if bytes.len() < Self::SIZE {
                    return_err!(
                        TruncatedBuffer,
                        "buffer is shorter than the context structure"
                    );
                }
                let context: $type = bytes.pread_with(0, endian).map_err(|e| err!(e))?;
                Ok(context)
            }

            fn encode_into(&self, buf: &mut [u8], endian: scroll::Endian) -> Result<usize> {
                use scroll::Pwrite;

                if buf.len() < Self::SIZE {
                    return_err!(BufferTooSmall, "buffer cannot hold the context structure");
                }
                buf.pwrite_with(*self, 0, endian)
                    .map_err(|_| err!(InvalidData, "failed to write the context structure"))
            }
        }
    };
}

mod arm;
mod arm64;
mod flags;
mod mips;
mod riscv;
mod riscv64;
mod sparc;
mod x86;

pub use self::arm::*;
pub use self::arm64::*;
pub use self::flags::*;
pub use self::mips::*;
pub use self::riscv::*;
pub use self::riscv64::*;
pub use self::sparc::*;
pub use self::x86::*;

/// The number of bytes a consumer needs to read the flags word, i.e. the
/// minimum input for dispatching to an architecture.
pub const CONTEXT_FLAGS_SIZE: usize = 4;

/// A fixed-layout raw context structure.
pub trait RawContextFormat: Sized {
    /// The fixed size of the structure in bytes.
    const SIZE: usize;

    /// Returns the raw flags word.
    fn context_flags(&self) -> u32;

    /// Decodes the structure from the start of `bytes`.
    ///
    /// Fails with `TruncatedBuffer` when `bytes` is shorter than `SIZE`.
    /// Extra trailing bytes are ignored.
    fn decode_with(bytes: &[u8], endian: Endian) -> Result<Self>;

    /// Encodes the structure into the start of `buf` and returns the number
    /// of bytes written, which is always `SIZE`.
    ///
    /// This neither allocates nor logs and is safe to use while capturing a
    /// crash.
    fn encode_into(&self, buf: &mut [u8], endian: Endian) -> Result<usize>;

    /// Decodes using the byte order of the running machine.
    fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with(bytes, scroll::NATIVE)
    }

    /// Encodes into a new vector using the byte order of the running machine.
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0; Self::SIZE];
        // The buffer is exactly `SIZE` bytes long.
        let _ = self.encode_into(&mut buf, scroll::NATIVE);
        buf
    }

    /// Returns the register groups the flags word claims to be present.
    fn features(&self) -> ContextFeatures {
        classify(self.context_flags())
            .map(|(_, features)| features)
            .unwrap_or_else(|_| ContextFeatures::empty())
    }

    fn has_features(&self, features: ContextFeatures) -> bool {
        self.features().contains(features)
    }
}
