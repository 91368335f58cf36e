//! 32-bit RISC-V context. Same scheme as RISCV64 with 32-bit integer
//! registers; the floating point registers stay 64 bits wide so that D
//! extension state fits.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use scroll::{Pread, Pwrite, SizeWith};

use crate::prelude::*;

pub const FLOATING_SAVE_AREA_RISCV_FPR_COUNT: usize = 32;
pub const CONTEXT_RISCV_GPR_COUNT: usize = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pread, Pwrite, SizeWith)]
#[repr(C)]
pub struct FloatSaveAreaRiscv {
    /// f0 .. f31.
    pub regs: [u64; 32],
    pub fcsr: u32,
    pub _padding: u32,
}

bitflags! {
    pub struct ContextFlagsRiscv: u32 {
        const RISCV          = 0x0080_0000;
        const CONTROL        = Self::RISCV.bits | 0x0000_0001;
        const INTEGER        = Self::RISCV.bits | 0x0000_0002;
        const FLOATING_POINT = Self::RISCV.bits | 0x0000_0004;
        const DEBUG          = Self::RISCV.bits | 0x0000_0008;
        const FULL           = Self::CONTROL.bits | Self::INTEGER.bits | Self::FLOATING_POINT.bits;
        const ALL            = Self::FULL.bits | Self::DEBUG.bits;
    }
}

/// The register state of one 32-bit RISC-V thread.
///
/// As with RISCV64, slot 0 of `iregs` holds the PC. The padding after
/// `iregs` puts `float_save` on an 8-byte boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pread, Pwrite, SizeWith)]
#[repr(C)]
pub struct RawContextRiscv {
    pub context_flags: u32,
    pub iregs: [u32; 32],
    pub _padding: u32,
    pub float_save: FloatSaveAreaRiscv,
}

impl_raw_context_format!(RawContextRiscv, 400);

// Array lengths in the derived structures are literals; keep the counts in step.
const _: () = assert!(CONTEXT_RISCV_GPR_COUNT == 32);
const _: () = assert!(FLOATING_SAVE_AREA_RISCV_FPR_COUNT == 32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum RiscvRegisterNumbers {
    Pc = 0,
    Ra = 1,
    Sp = 2,
    Fp = 8,
}

impl RiscvRegisterNumbers {
    pub fn index(self) -> usize {
        u32::from(self) as usize
    }
}

impl RawContextRiscv {
    pub fn new(flags: ContextFlagsRiscv) -> Self {
        Self {
            context_flags: flags.bits(),
            ..Default::default()
        }
    }

    pub fn flags(&self) -> ContextFlagsRiscv {
        ContextFlagsRiscv::from_bits_truncate(self.context_flags)
    }

    pub fn float_save(&self) -> Option<&FloatSaveAreaRiscv> {
        if self.flags().contains(ContextFlagsRiscv::FLOATING_POINT) {
            Some(&self.float_save)
        } else {
            None
        }
    }

    pub fn get_register(&self, reg: RiscvRegisterNumbers) -> u32 {
        self.iregs[reg.index()]
    }
}

#[cfg(test)]
mod tests {
    use memoffset::offset_of;

    use super::*;

    #[test]
    fn layout() {
        assert_eq!(offset_of!(RawContextRiscv, iregs), 4);
        assert_eq!(offset_of!(RawContextRiscv, float_save), 136);
        assert_eq!(RawContextRiscv::SIZE, 400);
        assert_eq!(ContextFlagsRiscv::FULL.bits(), 0x0080_0007);
    }

    #[test]
    fn array_lengths_match_counts() {
        let context = RawContextRiscv::new(ContextFlagsRiscv::ALL);
        assert_eq!(context.iregs.len(), CONTEXT_RISCV_GPR_COUNT);
        assert_eq!(context.float_save.regs.len(), FLOATING_SAVE_AREA_RISCV_FPR_COUNT);
        let decoded = RawContextRiscv::decode(&context.to_bytes()).unwrap();
        assert_eq!(decoded, context);
    }
}
