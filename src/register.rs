//! Conventional register roles and where each architecture keeps them.

use std::fmt;

use crate::prelude::*;

/// A register with a dedicated or conventional purpose, as a stack unwinder
/// or debugger needs it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    ProgramCounter,
    /// The link register, or the return-address register.
    ReturnAddress,
    StackPointer,
    FramePointer,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::ProgramCounter,
        Role::ReturnAddress,
        Role::StackPointer,
        Role::FramePointer,
    ];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Role::ProgramCounter => "pc",
            Role::ReturnAddress => "ra",
            Role::StackPointer => "sp",
            Role::FramePointer => "fp",
        };
        f.write_str(name)
    }
}

/// Returns the index of `role` in the general-purpose register array of
/// `arch`.
///
/// Fails with `UnsupportedRole` when the architecture keeps no such register
/// in its array, either because it has no conventional register for the
/// role or because the register is a separate named field.
pub fn role_index(arch: Architecture, role: Role) -> Result<usize> {
    let index = match (arch, role) {
        (Architecture::Riscv64, Role::ProgramCounter) => Riscv64RegisterNumbers::Pc.index(),
        (Architecture::Riscv64, Role::ReturnAddress) => Riscv64RegisterNumbers::Ra.index(),
        (Architecture::Riscv64, Role::StackPointer) => Riscv64RegisterNumbers::Sp.index(),
        (Architecture::Riscv64, Role::FramePointer) => Riscv64RegisterNumbers::Fp.index(),

        (Architecture::Riscv, Role::ProgramCounter) => RiscvRegisterNumbers::Pc.index(),
        (Architecture::Riscv, Role::ReturnAddress) => RiscvRegisterNumbers::Ra.index(),
        (Architecture::Riscv, Role::StackPointer) => RiscvRegisterNumbers::Sp.index(),
        (Architecture::Riscv, Role::FramePointer) => RiscvRegisterNumbers::Fp.index(),

        (Architecture::Arm, Role::ProgramCounter) => ArmRegisterNumbers::Pc.index(),
        (Architecture::Arm, Role::ReturnAddress) => ArmRegisterNumbers::Lr.index(),
        (Architecture::Arm, Role::StackPointer) => ArmRegisterNumbers::Sp.index(),
        (Architecture::Arm, Role::FramePointer) => ArmRegisterNumbers::Fp.index(),

        (Architecture::Arm64Old, Role::ProgramCounter) => Arm64RegisterNumbers::Pc.index(),
        (Architecture::Arm64Old, Role::ReturnAddress) => Arm64RegisterNumbers::Lr.index(),
        (Architecture::Arm64Old, Role::StackPointer) => Arm64RegisterNumbers::Sp.index(),
        (Architecture::Arm64Old, Role::FramePointer) => Arm64RegisterNumbers::Fp.index(),

        // The PC of MIPS lives in `epc`.
        (Architecture::Mips | Architecture::Mips64, Role::ReturnAddress) => {
            MipsRegisterNumbers::Ra.index()
        }
        (Architecture::Mips | Architecture::Mips64, Role::StackPointer) => {
            MipsRegisterNumbers::Sp.index()
        }
        (Architecture::Mips | Architecture::Mips64, Role::FramePointer) => {
            MipsRegisterNumbers::Fp.index()
        }

        (Architecture::Sparc, Role::StackPointer) => SparcRegisterNumbers::Sp.index(),

        _ => return_err!(UnsupportedRole, "no register array slot for this role"),
    };
    Ok(index)
}
