//! RISCV64 context.
//!
//! Layout, all members on their natural boundaries:
//!
//! | offset | size | member                       |
//! |--------|------|------------------------------|
//! | 0      | 4    | `context_flags`              |
//! | 4      | 4    | padding                      |
//! | 8      | 256  | `iregs` (PC, x1 .. x31)      |
//! | 264    | 256  | `float_save.regs` (f0 .. f31)|
//! | 520    | 4    | `float_save.fcsr`            |
//! | 524    | 4    | padding                      |

use num_enum::{IntoPrimitive, TryFromPrimitive};
use scroll::{Pread, Pwrite, SizeWith};

use crate::prelude::*;

pub const FLOATING_SAVE_AREA_RISCV64_FPR_COUNT: usize = 32;
pub const CONTEXT_RISCV64_GPR_COUNT: usize = 32;

/// The floating point registers of a RISCV64 context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pread, Pwrite, SizeWith)]
#[repr(C)]
pub struct FloatSaveAreaRiscv64 {
    /// f0 .. f31.
    pub regs: [u64; 32],
    /// FPU control and status register.
    pub fcsr: u32,
    /// Tail padding of the save area; copied verbatim.
    pub _padding: u32,
}

bitflags! {
    /// Flags word values of a RISCV64 context.
    pub struct ContextFlagsRiscv64: u32 {
        const RISCV64        = 0x0040_0000;
        const CONTROL        = Self::RISCV64.bits | 0x0000_0001;
        const INTEGER        = Self::RISCV64.bits | 0x0000_0002;
        const FLOATING_POINT = Self::RISCV64.bits | 0x0000_0004;
        const DEBUG          = Self::RISCV64.bits | 0x0000_0008;
        const FULL           = Self::CONTROL.bits | Self::INTEGER.bits | Self::FLOATING_POINT.bits;
        const ALL            = Self::FULL.bits | Self::DEBUG.bits;
    }
}

/// The register state of one RISCV64 thread.
///
/// `context_flags` decides which parts of the structure hold meaningful data:
/// `iregs` with `INTEGER`, `float_save` with `FLOATING_POINT`. The contents of
/// a part whose flag is clear are whatever the producer left there. They are
/// kept byte for byte but must not be trusted; use `integer_registers` and
/// `float_save` to read only what the flags vouch for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pread, Pwrite, SizeWith)]
#[repr(C)]
pub struct RawContextRiscv64 {
    pub context_flags: u32,
    /// Alignment padding before `iregs`; copied verbatim.
    pub _padding: u32,
    /// The PC followed by x1 .. x31. See `Riscv64RegisterNumbers`.
    pub iregs: [u64; 32],
    pub float_save: FloatSaveAreaRiscv64,
}

impl_raw_context_format!(RawContextRiscv64, 528);

// Array lengths in the derived structures are literals; keep the counts in step.
const _: () = assert!(CONTEXT_RISCV64_GPR_COUNT == 32);
const _: () = assert!(FLOATING_SAVE_AREA_RISCV64_FPR_COUNT == 32);

/// Indices into `RawContextRiscv64::iregs` of the registers with a dedicated
/// or conventional purpose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum Riscv64RegisterNumbers {
    /// x0 is hardwired to zero, so its slot holds the program counter instead.
    /// Writing slot 0 means writing the PC and nothing else.
    Pc = 0,
    Ra = 1,
    Sp = 2,
    Fp = 8,
}

impl Riscv64RegisterNumbers {
    pub fn index(self) -> usize {
        u32::from(self) as usize
    }
}

impl RawContextRiscv64 {
    pub fn new(flags: ContextFlagsRiscv64) -> Self {
        Self {
            context_flags: flags.bits(),
            ..Default::default()
        }
    }

    /// Returns the flags word, with bits unknown to RISCV64 dropped.
    pub fn flags(&self) -> ContextFlagsRiscv64 {
        ContextFlagsRiscv64::from_bits_truncate(self.context_flags)
    }

    pub fn integer_registers(&self) -> Option<&[u64; CONTEXT_RISCV64_GPR_COUNT]> {
        if self.flags().contains(ContextFlagsRiscv64::INTEGER) {
            Some(&self.iregs)
        } else {
            None
        }
    }

    pub fn float_save(&self) -> Option<&FloatSaveAreaRiscv64> {
        if self.flags().contains(ContextFlagsRiscv64::FLOATING_POINT) {
            Some(&self.float_save)
        } else {
            None
        }
    }

    pub fn get_register(&self, reg: Riscv64RegisterNumbers) -> u64 {
        self.iregs[reg.index()]
    }

    pub fn set_register(&mut self, reg: Riscv64RegisterNumbers, value: u64) {
        self.iregs[reg.index()] = value;
    }
}
