use num_enum::{IntoPrimitive, TryFromPrimitive};
use scroll::{Pread, Pwrite, SizeWith};

use crate::prelude::*;

pub const CONTEXT_SPARC_GPR_COUNT: usize = 32;
pub const FLOATING_SAVE_AREA_SPARC_FPR_COUNT: usize = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pread, Pwrite, SizeWith)]
#[repr(C)]
pub struct FloatSaveAreaSparc {
    pub regs: [u64; 32],
    pub filler: u64,
    pub fsr: u64,
}

bitflags! {
    pub struct ContextFlagsSparc: u32 {
        const SPARC          = 0x1000_0000;
        const CONTROL        = Self::SPARC.bits | 0x0000_0001;
        const INTEGER        = Self::SPARC.bits | 0x0000_0002;
        const FLOATING_POINT = Self::SPARC.bits | 0x0000_0004;
        const EXTRA          = Self::SPARC.bits | 0x0000_0008;
        const FULL           = Self::CONTROL.bits | Self::INTEGER.bits;
        const ALL            = Self::FULL.bits | Self::FLOATING_POINT.bits | Self::EXTRA.bits;
    }
}

/// The register state of one SPARC thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pread, Pwrite, SizeWith)]
#[repr(C)]
pub struct RawContextSparc {
    pub context_flags: u32,
    pub flag_pad: u32,
    /// g0 .. g7, o0 .. o7, l0 .. l7, i0 .. i7.
    pub g_r: [u64; 32],
    pub ccr: u64,
    pub pc: u64,
    pub npc: u64,
    pub y: u64,
    pub asi: u64,
    pub fprs: u64,
    pub float_save: FloatSaveAreaSparc,
}

impl_raw_context_format!(RawContextSparc, 584);

// Array lengths in the derived structures are literals; keep the counts in step.
const _: () = assert!(CONTEXT_SPARC_GPR_COUNT == 32);
const _: () = assert!(FLOATING_SAVE_AREA_SPARC_FPR_COUNT == 32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum SparcRegisterNumbers {
    /// o6.
    Sp = 14,
}

impl SparcRegisterNumbers {
    pub fn index(self) -> usize {
        u32::from(self) as usize
    }
}

impl RawContextSparc {
    pub fn new(flags: ContextFlagsSparc) -> Self {
        Self {
            context_flags: flags.bits(),
            ..Default::default()
        }
    }

    pub fn flags(&self) -> ContextFlagsSparc {
        ContextFlagsSparc::from_bits_truncate(self.context_flags)
    }

    pub fn float_save(&self) -> Option<&FloatSaveAreaSparc> {
        if self.flags().contains(ContextFlagsSparc::FLOATING_POINT) {
            Some(&self.float_save)
        } else {
            None
        }
    }
}
