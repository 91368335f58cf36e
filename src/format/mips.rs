//! MIPS context, shared by the 32-bit and 64-bit tags. Registers are stored
//! 64 bits wide in both cases.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use scroll::{Pread, Pwrite, SizeWith};

use crate::prelude::*;

pub const CONTEXT_MIPS_GPR_COUNT: usize = 32;
pub const CONTEXT_MIPS_DSP_COUNT: usize = 3;
pub const FLOATING_SAVE_AREA_MIPS_FPR_COUNT: usize = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pread, Pwrite, SizeWith)]
#[repr(C)]
pub struct FloatSaveAreaMips {
    pub regs: [u64; 32],
    pub fpcsr: u32,
    /// FPU implementation register; only filled by O32 producers.
    pub fir: u32,
}

bitflags! {
    pub struct ContextFlagsMips: u32 {
        const MIPS           = 0x0004_0000;
        const INTEGER        = Self::MIPS.bits | 0x0000_0002;
        const FLOATING_POINT = Self::MIPS.bits | 0x0000_0004;
        const DSP            = Self::MIPS.bits | 0x0000_0008;
        const FULL           = Self::INTEGER.bits | Self::FLOATING_POINT.bits | Self::DSP.bits;
        const ALL            = Self::FULL.bits;
    }
}

bitflags! {
    pub struct ContextFlagsMips64: u32 {
        const MIPS64         = 0x0008_0000;
        const INTEGER        = Self::MIPS64.bits | 0x0000_0002;
        const FLOATING_POINT = Self::MIPS64.bits | 0x0000_0004;
        const DSP            = Self::MIPS64.bits | 0x0000_0008;
        const FULL           = Self::INTEGER.bits | Self::FLOATING_POINT.bits | Self::DSP.bits;
        const ALL            = Self::FULL.bits;
    }
}

/// The register state of one MIPS thread.
///
/// The program counter is not part of `iregs`; it lives in `epc`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pread, Pwrite, SizeWith)]
#[repr(C)]
pub struct RawContextMips {
    pub context_flags: u32,
    pub _pad0: u32,
    pub iregs: [u64; 32],
    pub mdhi: u64,
    pub mdlo: u64,
    /// DSP accumulators 1 .. 3; meaningful with `DSP`.
    pub hi: [u32; 3],
    pub lo: [u32; 3],
    pub dsp_control: u32,
    pub _pad1: u32,
    pub epc: u64,
    pub badvaddr: u64,
    pub status: u32,
    pub cause: u32,
    pub float_save: FloatSaveAreaMips,
}

impl_raw_context_format!(RawContextMips, 600);

// Array lengths in the derived structures are literals; keep the counts in step.
const _: () = assert!(CONTEXT_MIPS_GPR_COUNT == 32);
const _: () = assert!(CONTEXT_MIPS_DSP_COUNT == 3);
const _: () = assert!(FLOATING_SAVE_AREA_MIPS_FPR_COUNT == 32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum MipsRegisterNumbers {
    S0 = 16,
    S1 = 17,
    S2 = 18,
    S3 = 19,
    S4 = 20,
    S5 = 21,
    S6 = 22,
    S7 = 23,
    Gp = 28,
    Sp = 29,
    Fp = 30,
    Ra = 31,
}

impl MipsRegisterNumbers {
    pub fn index(self) -> usize {
        u32::from(self) as usize
    }
}

impl RawContextMips {
    pub fn new(flags: u32) -> Self {
        Self {
            context_flags: flags,
            ..Default::default()
        }
    }

    /// Whether the context was produced under the 64-bit tag.
    pub fn is_mips64(&self) -> bool {
        self.context_flags & CONTEXT_CPU_MASK == Architecture::Mips64.tag()
    }

    pub fn float_save(&self) -> Option<&FloatSaveAreaMips> {
        if self.has_features(ContextFeatures::FLOATING_POINT) {
            Some(&self.float_save)
        } else {
            None
        }
    }

    pub fn get_register(&self, reg: MipsRegisterNumbers) -> u64 {
        self.iregs[reg.index()]
    }
}

#[cfg(test)]
mod tests {
    use memoffset::offset_of;

    use super::*;

    #[test]
    fn layout() {
        assert_eq!(offset_of!(RawContextMips, iregs), 8);
        assert_eq!(offset_of!(RawContextMips, mdhi), 264);
        assert_eq!(offset_of!(RawContextMips, hi), 280);
        assert_eq!(offset_of!(RawContextMips, dsp_control), 304);
        assert_eq!(offset_of!(RawContextMips, epc), 312);
        assert_eq!(offset_of!(RawContextMips, status), 328);
        assert_eq!(offset_of!(RawContextMips, float_save), 336);
    }

    #[test]
    fn both_tags_share_the_layout() {
        let mips = RawContextMips::new(ContextFlagsMips::FULL.bits());
        let mips64 = RawContextMips::new(ContextFlagsMips64::INTEGER.bits());
        assert!(!mips.is_mips64());
        assert!(mips64.is_mips64());
        assert!(mips.float_save().is_some());
        assert!(mips64.float_save().is_none());
    }

    #[test]
    fn array_lengths_match_counts() {
        let context = RawContextMips::new(ContextFlagsMips::FULL.bits());
        assert_eq!(context.iregs.len(), CONTEXT_MIPS_GPR_COUNT);
        assert_eq!(context.hi.len(), CONTEXT_MIPS_DSP_COUNT);
        assert_eq!(context.lo.len(), CONTEXT_MIPS_DSP_COUNT);
        assert_eq!(context.float_save.regs.len(), FLOATING_SAVE_AREA_MIPS_FPR_COUNT);
        let decoded = RawContextMips::decode(&context.to_bytes()).unwrap();
        assert_eq!(decoded, context);
    }
}
