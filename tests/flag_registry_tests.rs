//! Flag registry tests
use minidump_context::format::*;
use minidump_context::*;

#[test]
fn tag_values_are_stable() {
    let expected = [
        (Architecture::X86, 0x0001_0000),
        (Architecture::Mips, 0x0004_0000),
        (Architecture::Mips64, 0x0008_0000),
        (Architecture::Amd64, 0x0010_0000),
        (Architecture::Riscv64, 0x0040_0000),
        (Architecture::Riscv, 0x0080_0000),
        (Architecture::Ppc64, 0x0100_0000),
        (Architecture::Sparc, 0x1000_0000),
        (Architecture::Ppc, 0x2000_0000),
        (Architecture::Arm, 0x4000_0000),
        (Architecture::Arm64Old, 0x8000_0000),
    ];
    for (arch, tag) in expected.iter().copied() {
        assert_eq!(arch.tag(), tag, "[Registry] tag of {}", arch);
        assert_eq!(classify(tag).unwrap(), (arch, ContextFeatures::empty()));
    }
    assert_eq!(CONTEXT_CPU_MASK, 0xffff_ff00);
    assert_eq!(CONTEXT_FLAGS_SIZE, 4);
}

#[test]
fn per_arch_flag_sets_agree_with_registry() {
    let flag_sets = [
        (ContextFlagsX86::ALL.bits(), Architecture::X86),
        (ContextFlagsArm::ALL.bits(), Architecture::Arm),
        (ContextFlagsArm64Old::ALL.bits(), Architecture::Arm64Old),
        (ContextFlagsMips::ALL.bits(), Architecture::Mips),
        (ContextFlagsMips64::ALL.bits(), Architecture::Mips64),
        (ContextFlagsSparc::ALL.bits(), Architecture::Sparc),
        (ContextFlagsRiscv::ALL.bits(), Architecture::Riscv),
        (ContextFlagsRiscv64::ALL.bits(), Architecture::Riscv64),
    ];
    for (flags, arch) in flag_sets.iter().copied() {
        // Strict classification proves every bit of the set is defined.
        let (got, features) = classify_with(flags, true).unwrap();
        assert_eq!(got, arch);
        assert_eq!(ContextFlags::new(arch, features).bits(), flags, "[Registry] {}", arch);
    }
}

#[test]
fn riscv64_flag_values() {
    assert_eq!(ContextFlagsRiscv64::RISCV64.bits(), 0x0040_0000);
    assert_eq!(ContextFlagsRiscv64::CONTROL.bits(), 0x0040_0001);
    assert_eq!(ContextFlagsRiscv64::INTEGER.bits(), 0x0040_0002);
    assert_eq!(ContextFlagsRiscv64::FLOATING_POINT.bits(), 0x0040_0004);
    assert_eq!(ContextFlagsRiscv64::DEBUG.bits(), 0x0040_0008);

    let (arch, features) = classify(0x0040_0006).unwrap();
    assert_eq!(arch, Architecture::Riscv64);
    assert_eq!(features, ContextFeatures::INTEGER | ContextFeatures::FLOATING_POINT);
    // A context without floating point is a normal state.
    let (_, features) = classify(0x0040_0002).unwrap();
    assert!(!features.contains(ContextFeatures::FLOATING_POINT));
}

#[test]
fn unknown_tags() {
    for flags in [0u32, 0x0000_00ff, 0x0002_0002, 0x0050_0000, 0xffff_ffff].iter().copied() {
        let result = classify(flags);
        assert!(
            result.has_kind(ErrorKind::UnknownArchitecture),
            "[Registry] classified {:#x}",
            flags
        );
        let backtrace = format!("{}", result.unwrap_err().backtrace());
        assert!(backtrace.contains("Caused by"), "{}", backtrace);
    }
}

#[test]
fn role_table() {
    let table = [
        (Architecture::Riscv, [Some(0), Some(1), Some(2), Some(8)]),
        (Architecture::Riscv64, [Some(0), Some(1), Some(2), Some(8)]),
        (Architecture::Arm, [Some(15), Some(14), Some(13), Some(11)]),
        (Architecture::Arm64Old, [Some(32), Some(30), Some(31), Some(29)]),
        (Architecture::Mips, [None, Some(31), Some(29), Some(30)]),
        (Architecture::Mips64, [None, Some(31), Some(29), Some(30)]),
        (Architecture::Sparc, [None, None, Some(14), None]),
        (Architecture::X86, [None; 4]),
        (Architecture::Amd64, [None; 4]),
        (Architecture::Ppc, [None; 4]),
        (Architecture::Ppc64, [None; 4]),
    ];
    for (arch, indices) in table.iter() {
        for (role, index) in Role::ALL.iter().zip(indices.iter()) {
            let result = role_index(*arch, *role);
            match index {
                Some(index) => assert_eq!(result.unwrap(), *index, "[Roles] {} {}", arch, role),
                None => assert!(result.has_kind(ErrorKind::UnsupportedRole), "[Roles] {} {}", arch, role),
            }
        }
    }
}
