//! 64-bit ARM, registered for classification and register lookup only.
//!
//! Producers of this layout store the flags in a 64-bit word, so the
//! structure cannot be dispatched through the 32-bit flags word shared by the
//! other codecs.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// x0 .. x28, fp, lr, sp and pc.
pub const CONTEXT_ARM64_GPR_COUNT: usize = 33;

bitflags! {
    pub struct ContextFlagsArm64Old: u32 {
        const ARM64_OLD      = 0x8000_0000;
        const CONTROL        = Self::ARM64_OLD.bits | 0x0000_0001;
        const INTEGER        = Self::ARM64_OLD.bits | 0x0000_0002;
        const FLOATING_POINT = Self::ARM64_OLD.bits | 0x0000_0004;
        const DEBUG          = Self::ARM64_OLD.bits | 0x0000_0008;
        const FULL           = Self::CONTROL.bits | Self::INTEGER.bits | Self::FLOATING_POINT.bits;
        const ALL            = Self::FULL.bits | Self::DEBUG.bits;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum Arm64RegisterNumbers {
    Fp = 29,
    Lr = 30,
    Sp = 31,
    Pc = 32,
}

impl Arm64RegisterNumbers {
    pub fn index(self) -> usize {
        u32::from(self) as usize
    }
}
