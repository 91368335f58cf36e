use scroll::{Pread, Pwrite, SizeWith};

use crate::prelude::*;

pub const FLOATING_SAVE_AREA_X86_REGISTERAREA_SIZE: usize = 80;
/// MAXIMUM_SUPPORTED_EXTENSION
pub const CONTEXT_X86_EXTENDED_REGISTERS_SIZE: usize = 512;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Pread, Pwrite, SizeWith)]
#[repr(C)]
pub struct FloatSaveAreaX86 {
    pub control_word: u32,
    pub status_word: u32,
    pub tag_word: u32,
    pub error_offset: u32,
    pub error_selector: u32,
    pub data_offset: u32,
    pub data_selector: u32,
    /// Eight 80-bit x87 values, %st0 (%mm0) through %st7 (%mm7).
    pub register_area: [u8; 80],
    pub cr0_npx_state: u32,
}

// `Default` is only derived for arrays of up to 32 elements.
impl Default for FloatSaveAreaX86 {
    fn default() -> Self {
        Self {
            control_word: 0,
            status_word: 0,
            tag_word: 0,
            error_offset: 0,
            error_selector: 0,
            data_offset: 0,
            data_selector: 0,
            register_area: [0; FLOATING_SAVE_AREA_X86_REGISTERAREA_SIZE],
            cr0_npx_state: 0,
        }
    }
}

bitflags! {
    /// The high 24 bits identify the CPU, the low 8 bits the saved groups.
    pub struct ContextFlagsX86: u32 {
        const X86                = 0x0001_0000;
        const CONTROL            = Self::X86.bits | 0x0000_0001;
        const INTEGER            = Self::X86.bits | 0x0000_0002;
        const SEGMENTS           = Self::X86.bits | 0x0000_0004;
        const FLOATING_POINT     = Self::X86.bits | 0x0000_0008;
        const DEBUG_REGISTERS    = Self::X86.bits | 0x0000_0010;
        const EXTENDED_REGISTERS = Self::X86.bits | 0x0000_0020;
        const XSTATE             = Self::X86.bits | 0x0000_0040;
        const FULL               = Self::CONTROL.bits | Self::INTEGER.bits | Self::SEGMENTS.bits;
        const ALL                = Self::FULL.bits
                                 | Self::FLOATING_POINT.bits
                                 | Self::DEBUG_REGISTERS.bits
                                 | Self::EXTENDED_REGISTERS.bits;
    }
}

/// The register state of one x86 thread. Every register is a named field,
/// grouped by the flag that makes it meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pread, Pwrite, SizeWith)]
#[repr(C)]
pub struct RawContextX86 {
    pub context_flags: u32,

    // DEBUG_REGISTERS
    pub dr0: u32,
    pub dr1: u32,
    pub dr2: u32,
    pub dr3: u32,
    pub dr6: u32,
    pub dr7: u32,

    // FLOATING_POINT
    pub float_save: FloatSaveAreaX86,

    // SEGMENTS
    pub gs: u32,
    pub fs: u32,
    pub es: u32,
    pub ds: u32,

    // INTEGER
    pub edi: u32,
    pub esi: u32,
    pub ebx: u32,
    pub edx: u32,
    pub ecx: u32,
    pub eax: u32,

    // CONTROL
    pub ebp: u32,
    pub eip: u32,
    pub cs: u32,
    pub eflags: u32,
    pub esp: u32,
    pub ss: u32,

    /// EXTENDED_REGISTERS: MMX/SSE state in FXSAVE format, which includes
    /// another copy of the x87 registers.
    pub extended_registers: [u8; 512],
}

impl_raw_context_format!(RawContextX86, 716);

// Array lengths in the derived structures are literals; keep the counts in step.
const _: () = assert!(FLOATING_SAVE_AREA_X86_REGISTERAREA_SIZE == 80);
const _: () = assert!(CONTEXT_X86_EXTENDED_REGISTERS_SIZE == 512);

impl Default for RawContextX86 {
    fn default() -> Self {
        Self {
            context_flags: 0,
            dr0: 0,
            dr1: 0,
            dr2: 0,
            dr3: 0,
            dr6: 0,
            dr7: 0,
            float_save: Default::default(),
            gs: 0,
            fs: 0,
            es: 0,
            ds: 0,
            edi: 0,
            esi: 0,
            ebx: 0,
            edx: 0,
            ecx: 0,
            eax: 0,
            ebp: 0,
            eip: 0,
            cs: 0,
            eflags: 0,
            esp: 0,
            ss: 0,
            extended_registers: [0; CONTEXT_X86_EXTENDED_REGISTERS_SIZE],
        }
    }
}

impl RawContextX86 {
    pub fn new(flags: ContextFlagsX86) -> Self {
        Self {
            context_flags: flags.bits(),
            ..Default::default()
        }
    }

    pub fn flags(&self) -> ContextFlagsX86 {
        ContextFlagsX86::from_bits_truncate(self.context_flags)
    }

    pub fn float_save(&self) -> Option<&FloatSaveAreaX86> {
        if self.flags().contains(ContextFlagsX86::FLOATING_POINT) {
            Some(&self.float_save)
        } else {
            None
        }
    }

    pub fn extended_registers(&self) -> Option<&[u8; CONTEXT_X86_EXTENDED_REGISTERS_SIZE]> {
        if self.flags().contains(ContextFlagsX86::EXTENDED_REGISTERS) {
            Some(&self.extended_registers)
        } else {
            None
        }
    }
}
