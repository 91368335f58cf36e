//! Context codec tests
use byteorder::{BigEndian, ByteOrder};
use minidump_context::format::*;
use minidump_context::*;
use scroll::Endian;

fn filled<T: RawContextFormat>(flags: u32) -> T {
    // A distinct non-zero byte everywhere, padding included.
    let mut bytes: Vec<u8> = (0..T::SIZE).map(|i| (i % 251) as u8 + 1).collect();
    bytes[..4].copy_from_slice(&flags.to_ne_bytes());
    T::decode(&bytes).unwrap()
}

fn check_codec<T>(name: &str, flags: &[u32])
where
    T: RawContextFormat + PartialEq + std::fmt::Debug,
{
    for &flags in flags {
        let context: T = filled(flags);
        let bytes = context.to_bytes();
        assert_eq!(bytes.len(), T::SIZE, "[{}] length for flags {:#x}", name, flags);
        assert_eq!(T::decode(&bytes).unwrap(), context, "[{}] round trip", name);
        assert!(
            T::decode(&bytes[..T::SIZE - 1]).has_kind(ErrorKind::TruncatedBuffer),
            "[{}] decoded a truncated buffer",
            name
        );

        let dispatched = RawContext::decode(&bytes).unwrap();
        assert_eq!(dispatched.size(), T::SIZE);
        assert_eq!(dispatched.to_bytes(), bytes, "[{}] dispatched round trip", name);
    }
}

#[test]
fn every_codec_round_trips() {
    check_codec::<RawContextX86>(
        "x86",
        &[
            ContextFlagsX86::X86.bits(),
            ContextFlagsX86::FULL.bits(),
            ContextFlagsX86::ALL.bits(),
        ],
    );
    check_codec::<RawContextArm>(
        "arm",
        &[ContextFlagsArm::ARM.bits(), ContextFlagsArm::ALL.bits()],
    );
    check_codec::<RawContextMips>(
        "mips",
        &[
            ContextFlagsMips::INTEGER.bits(),
            ContextFlagsMips::FULL.bits(),
            ContextFlagsMips64::FULL.bits(),
        ],
    );
    check_codec::<RawContextSparc>(
        "sparc",
        &[ContextFlagsSparc::SPARC.bits(), ContextFlagsSparc::ALL.bits()],
    );
    check_codec::<RawContextRiscv>(
        "riscv",
        &[ContextFlagsRiscv::INTEGER.bits(), ContextFlagsRiscv::ALL.bits()],
    );
    check_codec::<RawContextRiscv64>(
        "riscv64",
        &[
            ContextFlagsRiscv64::RISCV64.bits(),
            ContextFlagsRiscv64::ALL.bits(),
        ],
    );
}

#[test]
fn encode_into_small_buffer() {
    let context = RawContext::Arm(RawContextArm::new(ContextFlagsArm::FULL));
    let mut buf = [0u8; 367];
    assert!(context
        .encode_into(&mut buf, scroll::NATIVE)
        .has_kind(ErrorKind::BufferTooSmall));
    assert!(buf.iter().all(|&b| b == 0), "partial write");

    let mut buf = [0u8; 400];
    assert_eq!(context.encode_into(&mut buf, scroll::NATIVE).unwrap(), 368);
}

#[test]
fn big_endian_container() -> Result<()> {
    let mut bytes = vec![0u8; RawContextArm::SIZE];
    BigEndian::write_u32(&mut bytes[0..4], ContextFlagsArm::INTEGER.bits());
    // pc is iregs[15].
    BigEndian::write_u32(&mut bytes[4 + 15 * 4..4 + 16 * 4], 0x0001_0400);

    let config = parse_config(r#"{ "byte_order": "big" }"#)?;
    let context = RawContext::decode_with(&bytes, &config)?;
    assert_eq!(context.architecture(), Architecture::Arm);
    assert_eq!(context.instruction_pointer()?, 0x0001_0400);

    let mut buf = vec![0u8; RawContextArm::SIZE];
    context.encode_into(&mut buf, Endian::Big)?;
    assert_eq!(buf, bytes);
    Ok(())
}

#[test]
fn strict_feature_bits() -> Result<()> {
    // 0x40 is not a RISC-V feature bit.
    let mut context = RawContextRiscv64::new(ContextFlagsRiscv64::INTEGER);
    context.context_flags |= 0x40;
    let bytes = context.to_bytes();

    let lenient = RawContext::decode(&bytes)?;
    assert_eq!(lenient.features(), ContextFeatures::INTEGER);
    assert_eq!(lenient.context_flags(), 0x0040_0042, "flags word must be kept");

    let strict = CodecConfig::builder().strict_feature_bits(true).build();
    assert!(RawContext::decode_with(&bytes, &strict).has_kind(ErrorKind::InvalidFlags));
    Ok(())
}

#[test]
fn uninterpreted_streams() {
    let config = CodecConfig::default();

    let amd64 = {
        let mut bytes = vec![0u8; 1232];
        bytes[..4].copy_from_slice(&0x0010_000bu32.to_ne_bytes());
        bytes
    };
    match decode_or_raw(&amd64, &config) {
        ContextBlock::Uninterpreted { flags, bytes, error } => {
            assert_eq!(flags, Some(0x0010_000b));
            assert_eq!(bytes.len(), 1232);
            assert_eq!(error.kind(), ErrorKind::UnsupportedArchitecture);
        }
        ContextBlock::Decoded(_) => panic!("amd64 has no codec"),
    }

    let short = [0u8; 2];
    match decode_or_raw(&short, &config) {
        ContextBlock::Uninterpreted { flags, error, .. } => {
            assert_eq!(flags, None);
            assert_eq!(error.kind(), ErrorKind::TruncatedBuffer);
        }
        ContextBlock::Decoded(_) => panic!("decoded two bytes"),
    }
}
