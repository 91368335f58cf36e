use num_enum::{IntoPrimitive, TryFromPrimitive};
use scroll::{Pread, Pwrite, SizeWith};

use crate::prelude::*;

pub const CONTEXT_ARM_GPR_COUNT: usize = 16;
pub const FLOATING_SAVE_AREA_ARM_FPR_COUNT: usize = 32;
pub const FLOATING_SAVE_AREA_ARM_FPEXTRA_COUNT: usize = 8;

/// VFP state of a 32-bit ARM context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pread, Pwrite, SizeWith)]
#[repr(C)]
pub struct FloatSaveAreaArm {
    /// FPU status register.
    pub fpscr: u64,
    /// d0 .. d31.
    pub regs: [u64; 32],
    /// Miscellaneous control words.
    pub extra: [u32; 8],
}

bitflags! {
    pub struct ContextFlagsArm: u32 {
        /// Chosen to stay clear of the tags of other CPUs.
        const ARM            = 0x4000_0000;
        const INTEGER        = Self::ARM.bits | 0x0000_0002;
        const FLOATING_POINT = Self::ARM.bits | 0x0000_0004;
        const FULL           = Self::INTEGER.bits | Self::FLOATING_POINT.bits;
        const ALL            = Self::INTEGER.bits | Self::FLOATING_POINT.bits;
    }
}

/// The register state of one 32-bit ARM thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pread, Pwrite, SizeWith)]
#[repr(C)]
pub struct RawContextArm {
    pub context_flags: u32,
    /// r0 .. r15. r13 is the stack pointer, r14 the link register and r15
    /// the program counter.
    pub iregs: [u32; 16],
    /// N, Z, C, V and Q live in bits 31 .. 27; ignore the rest.
    pub cpsr: u32,
    /// Meaningful with `FLOATING_POINT`.
    pub float_save: FloatSaveAreaArm,
}

impl_raw_context_format!(RawContextArm, 368);

// Array lengths in the derived structures are literals; keep the counts in step.
const _: () = assert!(CONTEXT_ARM_GPR_COUNT == 16);
const _: () = assert!(FLOATING_SAVE_AREA_ARM_FPR_COUNT == 32);
const _: () = assert!(FLOATING_SAVE_AREA_ARM_FPEXTRA_COUNT == 8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum ArmRegisterNumbers {
    /// Frame pointer used by iOS.
    IosFp = 7,
    Fp = 11,
    Sp = 13,
    Lr = 14,
    Pc = 15,
}

impl ArmRegisterNumbers {
    pub fn index(self) -> usize {
        u32::from(self) as usize
    }
}

impl RawContextArm {
    pub fn new(flags: ContextFlagsArm) -> Self {
        Self {
            context_flags: flags.bits(),
            ..Default::default()
        }
    }

    pub fn flags(&self) -> ContextFlagsArm {
        ContextFlagsArm::from_bits_truncate(self.context_flags)
    }

    pub fn float_save(&self) -> Option<&FloatSaveAreaArm> {
        if self.flags().contains(ContextFlagsArm::FLOATING_POINT) {
            Some(&self.float_save)
        } else {
            None
        }
    }

    pub fn get_register(&self, reg: ArmRegisterNumbers) -> u32 {
        self.iregs[reg.index()]
    }
}
