//! The context flag registry.
//!
//! The first word of every raw context is a 32-bit flags word. Its high 24
//! bits carry exactly one architecture tag; its low 8 bits say which register
//! groups of the structure hold meaningful data. The numeric values are stable
//! ABI shared by every producer and consumer of minidump files and must never
//! be renumbered.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::prelude::*;

/// Selects the architecture tag bits of a flags word.
pub const CONTEXT_CPU_MASK: u32 = 0xffff_ff00;

/// Selects the feature-group bits of a flags word.
pub const CONTEXT_FEATURE_MASK: u32 = !CONTEXT_CPU_MASK;

/// The architecture tags known to the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u32)]
pub enum Architecture {
    X86 = 0x0001_0000,
    Mips = 0x0004_0000,
    Mips64 = 0x0008_0000,
    Amd64 = 0x0010_0000,
    Riscv64 = 0x0040_0000,
    Riscv = 0x0080_0000,
    Ppc64 = 0x0100_0000,
    Sparc = 0x1000_0000,
    Ppc = 0x2000_0000,
    Arm = 0x4000_0000,
    /// The tag used by Breakpad-style producers for 64-bit ARM before an
    /// official value existed.
    Arm64Old = 0x8000_0000,
}

bitflags! {
    /// Register groups a context may claim to be present.
    ///
    /// This is an architecture-neutral view. Each architecture numbers its
    /// groups differently on the wire (see `Architecture::feature_bits`).
    pub struct ContextFeatures: u32 {
        const CONTROL            = 1 << 0;
        const INTEGER            = 1 << 1;
        const SEGMENTS           = 1 << 2;
        const FLOATING_POINT     = 1 << 3;
        const DEBUG              = 1 << 4;
        const EXTENDED_REGISTERS = 1 << 5;
        const XSTATE             = 1 << 6;
        const VECTOR             = 1 << 7;
        const DSP                = 1 << 8;
        const EXTRA              = 1 << 9;
        const BASE               = 1 << 10;
    }
}

use self::ContextFeatures as F;

const X86_FEATURE_BITS: &[(u32, ContextFeatures)] = &[
    (0x01, F::CONTROL),
    (0x02, F::INTEGER),
    (0x04, F::SEGMENTS),
    (0x08, F::FLOATING_POINT),
    (0x10, F::DEBUG),
    (0x20, F::EXTENDED_REGISTERS),
    (0x40, F::XSTATE),
];

const AMD64_FEATURE_BITS: &[(u32, ContextFeatures)] = &[
    (0x01, F::CONTROL),
    (0x02, F::INTEGER),
    (0x04, F::SEGMENTS),
    (0x08, F::FLOATING_POINT),
    (0x10, F::DEBUG),
    (0x40, F::XSTATE),
];

const PPC_FEATURE_BITS: &[(u32, ContextFeatures)] = &[
    (0x01, F::BASE),
    (0x08, F::FLOATING_POINT),
    (0x20, F::VECTOR),
];

const SPARC_FEATURE_BITS: &[(u32, ContextFeatures)] = &[
    (0x01, F::CONTROL),
    (0x02, F::INTEGER),
    (0x04, F::FLOATING_POINT),
    (0x08, F::EXTRA),
];

const ARM_FEATURE_BITS: &[(u32, ContextFeatures)] =
    &[(0x02, F::INTEGER), (0x04, F::FLOATING_POINT)];

const MIPS_FEATURE_BITS: &[(u32, ContextFeatures)] = &[
    (0x02, F::INTEGER),
    (0x04, F::FLOATING_POINT),
    (0x08, F::DSP),
];

// ARM64 (old) and both RISC-V flavours share this numbering.
const GENERIC_FEATURE_BITS: &[(u32, ContextFeatures)] = &[
    (0x01, F::CONTROL),
    (0x02, F::INTEGER),
    (0x04, F::FLOATING_POINT),
    (0x08, F::DEBUG),
];

impl Architecture {
    pub const ALL: [Architecture; 11] = [
        Architecture::X86,
        Architecture::Mips,
        Architecture::Mips64,
        Architecture::Amd64,
        Architecture::Riscv64,
        Architecture::Riscv,
        Architecture::Ppc64,
        Architecture::Sparc,
        Architecture::Ppc,
        Architecture::Arm,
        Architecture::Arm64Old,
    ];

    /// Returns the architecture tag bits.
    pub fn tag(self) -> u32 {
        self.into()
    }

    pub fn name(self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::Mips => "mips",
            Architecture::Mips64 => "mips64",
            Architecture::Amd64 => "amd64",
            Architecture::Riscv64 => "riscv64",
            Architecture::Riscv => "riscv",
            Architecture::Ppc64 => "ppc64",
            Architecture::Sparc => "sparc",
            Architecture::Ppc => "ppc",
            Architecture::Arm => "arm",
            Architecture::Arm64Old => "arm64",
        }
    }

    /// Maps the raw feature bits of this architecture to register groups.
    pub fn feature_bits(self) -> &'static [(u32, ContextFeatures)] {
        match self {
            Architecture::X86 => X86_FEATURE_BITS,
            Architecture::Amd64 => AMD64_FEATURE_BITS,
            Architecture::Ppc | Architecture::Ppc64 => PPC_FEATURE_BITS,
            Architecture::Sparc => SPARC_FEATURE_BITS,
            Architecture::Arm => ARM_FEATURE_BITS,
            Architecture::Mips | Architecture::Mips64 => MIPS_FEATURE_BITS,
            Architecture::Arm64Old | Architecture::Riscv | Architecture::Riscv64 => {
                GENERIC_FEATURE_BITS
            }
        }
    }

    /// Returns the fixed size of the raw context structure, or `None` when
    /// the architecture is registered for classification only.
    pub fn context_size(self) -> Option<usize> {
        let size = match self {
            Architecture::X86 => RawContextX86::SIZE,
            Architecture::Arm => RawContextArm::SIZE,
            Architecture::Mips | Architecture::Mips64 => RawContextMips::SIZE,
            Architecture::Sparc => RawContextSparc::SIZE,
            Architecture::Riscv => RawContextRiscv::SIZE,
            Architecture::Riscv64 => RawContextRiscv64::SIZE,
            Architecture::Amd64
            | Architecture::Arm64Old
            | Architecture::Ppc
            | Architecture::Ppc64 => return None,
        };
        Some(size)
    }

    pub fn has_codec(self) -> bool {
        self.context_size().is_some()
    }

    /// Translates the raw low bits of a flags word into register groups.
    ///
    /// Returns the groups together with the bits this architecture does not
    /// define.
    fn split_features(self, raw: u32) -> (ContextFeatures, u32) {
        let mut features = ContextFeatures::empty();
        let mut unknown = raw & CONTEXT_FEATURE_MASK;
        for &(bit, feature) in self.feature_bits() {
            if raw & bit != 0 {
                features |= feature;
                unknown &= !bit;
            }
        }
        (features, unknown)
    }

    /// Translates register groups into the raw feature bits of this
    /// architecture. Groups the architecture does not define are ignored.
    pub fn raw_features(self, features: ContextFeatures) -> u32 {
        self.feature_bits()
            .iter()
            .filter(|(_, feature)| features.contains(*feature))
            .fold(0, |raw, (bit, _)| raw | bit)
    }

    /// Returns every register group this architecture defines.
    pub fn all_features(self) -> ContextFeatures {
        self.feature_bits()
            .iter()
            .fold(ContextFeatures::empty(), |all, (_, feature)| all | *feature)
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Determines the architecture and the claimed register groups of a flags word.
///
/// Feature bits the architecture does not define are dropped. A claimed group
/// being absent (e.g. no floating point) is a normal state, not an error.
pub fn classify(flags: u32) -> Result<(Architecture, ContextFeatures)> {
    classify_with(flags, false)
}

/// Like `classify`, but with `strict_features` set, undefined feature bits
/// fail with `InvalidFlags` instead of being dropped.
pub fn classify_with(flags: u32, strict_features: bool) -> Result<(Architecture, ContextFeatures)> {
    let arch = Architecture::try_from_primitive(flags & CONTEXT_CPU_MASK)
        .map_err(|e| err!(e))
        .cause_err(|_| err!(UnknownArchitecture, "no registered architecture tag matches"))?;
    let (features, unknown) = arch.split_features(flags);
    if unknown != 0 {
        if strict_features {
            return_err!(InvalidFlags, "feature bits not defined for the architecture");
        }
        debug!(
            "dropping undefined feature bits {:#04x} of {} context flags {:#010x}",
            unknown, arch, flags
        );
    }
    Ok((arch, features))
}

/// A classified flags word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContextFlags {
    arch: Architecture,
    features: ContextFeatures,
}

impl ContextFlags {
    pub fn new(arch: Architecture, features: ContextFeatures) -> Self {
        Self {
            arch,
            features: features & arch.all_features(),
        }
    }

    pub fn from_raw(flags: u32) -> Result<Self> {
        let (arch, features) = classify(flags)?;
        Ok(Self { arch, features })
    }

    pub fn architecture(&self) -> Architecture {
        self.arch
    }

    pub fn features(&self) -> ContextFeatures {
        self.features
    }

    pub fn contains(&self, features: ContextFeatures) -> bool {
        self.features.contains(features)
    }

    /// Returns the wire representation.
    pub fn bits(&self) -> u32 {
        self.arch.tag() | self.arch.raw_features(self.features)
    }
}

impl From<ContextFlags> for u32 {
    fn from(flags: ContextFlags) -> u32 {
        flags.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_do_not_overlap() {
        for (i, a) in Architecture::ALL.iter().enumerate() {
            assert_eq!(a.tag() & CONTEXT_FEATURE_MASK, 0, "{} tag", a);
            for b in &Architecture::ALL[i + 1..] {
                assert_ne!(a.tag(), b.tag());
            }
        }
    }

    #[test]
    fn classify_every_feature_subset() {
        for arch in Architecture::ALL.iter().copied() {
            let bits = arch.feature_bits();
            for mask in 0..(1u32 << bits.len()) {
                let mut raw = 0;
                let mut expected = ContextFeatures::empty();
                for (i, (bit, feature)) in bits.iter().enumerate() {
                    if mask & (1 << i) != 0 {
                        raw |= bit;
                        expected |= *feature;
                    }
                }
                let (got_arch, got_features) = classify(arch.tag() | raw).unwrap();
                assert_eq!(got_arch, arch);
                assert_eq!(got_features, expected);
            }
        }
    }

    #[test]
    fn classify_rejects_unknown_tags() {
        assert!(classify(0).has_kind(UnknownArchitecture));
        assert!(classify(0x0000_0007).has_kind(UnknownArchitecture));
        // Two tags at once are not a tag.
        let both = Architecture::Riscv64.tag() | Architecture::Arm.tag();
        assert!(classify(both).has_kind(UnknownArchitecture));
        assert!(classify(0x0200_0002).has_kind(UnknownArchitecture));
    }

    #[test]
    fn undefined_feature_bits() {
        let flags = Architecture::Arm.tag() | 0x01 | 0x02;
        let (arch, features) = classify(flags).unwrap();
        assert_eq!(arch, Architecture::Arm);
        assert_eq!(features, ContextFeatures::INTEGER);
        assert!(classify_with(flags, true).has_kind(InvalidFlags));
        assert!(classify_with(Architecture::Arm.tag() | 0x02, true).is_ok());
    }

    #[test]
    fn context_flags_compose() {
        let flags = ContextFlags::new(
            Architecture::Riscv64,
            ContextFeatures::INTEGER | ContextFeatures::FLOATING_POINT | ContextFeatures::XSTATE,
        );
        // XSTATE is not a RISC-V group.
        assert_eq!(flags.bits(), 0x0040_0006);
        assert_eq!(ContextFlags::from_raw(0x0040_0006).unwrap(), flags);
        assert!(flags.contains(ContextFeatures::FLOATING_POINT));
        assert!(!flags.contains(ContextFeatures::DEBUG));

        let x86 = ContextFlags::new(Architecture::X86, ContextFeatures::FLOATING_POINT);
        assert_eq!(u32::from(x86), 0x0001_0008);
    }
}
