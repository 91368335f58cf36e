//! Codec configuration.
//!
//! The configuration is normally assembled by the minidump container reader,
//! which knows the byte order of the dump it is reading. It can also be
//! loaded from JSON:
//! ```text
//! {
//!     "byte_order": "big",
//!     "strict_feature_bits": true,
//!     "log_level": "debug"
//! }
//! ```
//! Every key is optional.

use log::LevelFilter;
use scroll::Endian;
use serde::{Deserialize, Serialize};

use crate::prelude::*;

#[derive(Builder, Clone, Copy, Debug, PartialEq)]
#[builder(pattern = "owned", build_fn(skip))]
pub struct CodecConfig {
    /// Byte order of the context bytes.
    pub endian: Endian,
    /// Reject feature bits not defined for the architecture instead of
    /// dropping them.
    pub strict_feature_bits: bool,
    /// Log level installed by `init_logging`.
    pub log_level: LevelFilter,
}

impl Default for CodecConfig {
    fn default() -> CodecConfig {
        CodecConfig {
            endian: scroll::NATIVE,
            strict_feature_bits: false,
            log_level: LevelFilter::Warn,
        }
    }
}

impl CodecConfigBuilder {
    /// Builds the configuration; unset fields take their default values.
    pub fn build(self) -> CodecConfig {
        let default = CodecConfig::default();
        CodecConfig {
            endian: self.endian.unwrap_or(default.endian),
            strict_feature_bits: self
                .strict_feature_bits
                .unwrap_or(default.strict_feature_bits),
            log_level: self.log_level.unwrap_or(default.log_level),
        }
    }
}

impl CodecConfig {
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }

    /// Installs the crate's logger at the configured level.
    ///
    /// Fails with `InvalidConfig` if a logger is already installed.
    pub fn init_logging(&self) -> Result<()> {
        crate::util::log::init(self.log_level)
    }

    fn from_input(input: &InputConfig) -> Result<CodecConfig> {
        let endian = ConfigByteOrder::from_input(&input.byte_order)?.into();
        let log_level = input
            .log_level
            .parse::<LevelFilter>()
            .map_err(|e| err!(e))
            .cause_err(|_| err!(InvalidConfig, "unknown log level"))?;
        Ok(CodecConfig {
            endian,
            strict_feature_bits: input.strict_feature_bits,
            log_level,
        })
    }
}

/// Parses a JSON configuration.
pub fn parse_config(config_json: &str) -> Result<CodecConfig> {
    let config_input: InputConfig = serde_json::from_str(config_json).map_err(|e| err!(e))?;
    debug!("codec config input: {:?}", config_input);
    CodecConfig::from_input(&config_input)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigByteOrder {
    Native,
    Little,
    Big,
}

impl ConfigByteOrder {
    pub fn from_input(input: &str) -> Result<ConfigByteOrder> {
        let byte_order = match input {
            "native" => ConfigByteOrder::Native,
            "little" => ConfigByteOrder::Little,
            "big" => ConfigByteOrder::Big,
            _ => {
                return_err!(InvalidConfig, "unsupported byte order");
            }
        };
        Ok(byte_order)
    }
}

impl From<ConfigByteOrder> for Endian {
    fn from(byte_order: ConfigByteOrder) -> Endian {
        match byte_order {
            ConfigByteOrder::Native => scroll::NATIVE,
            ConfigByteOrder::Little => Endian::Little,
            ConfigByteOrder::Big => Endian::Big,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputConfig {
    #[serde(default = "InputConfig::get_byte_order")]
    pub byte_order: String,
    #[serde(default)]
    pub strict_feature_bits: bool,
    #[serde(default = "InputConfig::get_log_level")]
    pub log_level: String,
}

impl InputConfig {
    fn get_byte_order() -> String {
        "native".to_string()
    }

    fn get_log_level() -> String {
        "warn".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, CodecConfig::default());
    }

    #[test]
    fn full_config() {
        let config = parse_config(
            r#"{ "byte_order": "big", "strict_feature_bits": true, "log_level": "trace" }"#,
        )
        .unwrap();
        assert_eq!(config.endian, Endian::Big);
        assert!(config.strict_feature_bits);
        assert_eq!(config.log_level, LevelFilter::Trace);
    }

    #[test]
    fn invalid_configs() {
        let inputs = [
            r#"{ "byte_order": "middle" }"#,
            r#"{ "log_level": "loud" }"#,
            r#"{ "endianness": "big" }"#,
            r#"{ "strict_feature_bits": "yes" }"#,
            "not json",
        ];
        for input in inputs.iter() {
            assert!(
                parse_config(input).has_kind(InvalidConfig),
                "accepted {}",
                input
            );
        }
    }

    #[test]
    fn builder_fills_defaults() {
        let config = CodecConfig::builder().endian(Endian::Little).build();
        assert_eq!(config.endian, Endian::Little);
        assert!(!config.strict_feature_bits);
        assert_eq!(config.log_level, LevelFilter::Warn);
    }
}
