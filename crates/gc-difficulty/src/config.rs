//! Network parameters consumed by the difficulty engine
//!
//! Parameters are passed explicitly into every verification; there is no
//! process-wide "current network".

use crate::domain::compact::{decode_compact, Target};
use crate::error::{CompactError, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable selecting the network preset
pub const ENV_NETWORK: &str = "GC_NETWORK";

/// Environment variable pointing at a JSON parameter file
pub const ENV_PARAMS_FILE: &str = "GC_PARAMS_FILE";

/// Network identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network
    Mainnet,
    /// Public test network
    Testnet,
    /// Local regression testing
    Regtest,
    /// Signed test network
    Signet,
}

impl std::str::FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" | "testnet3" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            "signet" => Ok(Network::Signet),
            other => Err(ConfigError::UnknownNetwork(other.to_string())),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
            Network::Signet => "signet",
        };
        f.write_str(name)
    }
}

/// Ancestor window of one Dark Gravity Wave variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowParams {
    /// Blocks mixed into the difficulty average; also the minimum history
    pub past_blocks_min: u64,
    /// Maximum blocks visited
    pub past_blocks_max: u64,
}

/// Retargeting rule applied to a network
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetargetRule {
    /// Per-block Dark Gravity Wave, v1 below the threshold and v3 from it
    DarkGravityWave,
    /// Bitcoin-style retarget every `target_timespan / target_spacing` blocks
    Interval,
}

/// Per-network consensus constants
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkParams {
    /// Network identifier
    pub network: Network,
    /// Target seconds between blocks
    pub target_spacing: u64,
    /// Target seconds per interval retarget period
    pub target_timespan: u64,
    /// Compact form of the easiest allowed target
    pub max_target_bits: u32,
    /// First height validated with DGW v3 (the v3 rule applies once the
    /// previous block is at `threshold_height - 1`)
    pub threshold_height: u64,
    /// Window for DGW v1
    pub dgw_v1: WindowParams,
    /// Window for DGW v3
    pub dgw_v3: WindowParams,
    /// Retarget rule
    pub retarget: RetargetRule,
    /// Testnet rule: slow blocks may carry any target up to the maximum
    pub allow_min_difficulty_blocks: bool,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl NetworkParams {
    /// Production network
    pub fn mainnet() -> Self {
        Self {
            network: Network::Mainnet,
            target_spacing: 60,
            target_timespan: 86_400,
            max_target_bits: 0x1e0f_ffff,
            threshold_height: 100_000,
            dgw_v1: WindowParams {
                past_blocks_min: 12,
                past_blocks_max: 120,
            },
            dgw_v3: WindowParams {
                past_blocks_min: 24,
                past_blocks_max: 24,
            },
            retarget: RetargetRule::DarkGravityWave,
            allow_min_difficulty_blocks: false,
        }
    }

    /// Public test network
    pub fn testnet() -> Self {
        Self {
            network: Network::Testnet,
            max_target_bits: 0x1e00_ffff,
            allow_min_difficulty_blocks: true,
            ..Self::mainnet()
        }
    }

    /// Local regression testing
    pub fn regtest() -> Self {
        Self {
            network: Network::Regtest,
            max_target_bits: 0x207f_ffff,
            ..Self::mainnet()
        }
    }

    /// Signed test network
    pub fn signet() -> Self {
        Self {
            network: Network::Signet,
            max_target_bits: 0x207f_ffff,
            ..Self::mainnet()
        }
    }

    /// Preset for a network
    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Mainnet => Self::mainnet(),
            Network::Testnet => Self::testnet(),
            Network::Regtest => Self::regtest(),
            Network::Signet => Self::signet(),
        }
    }

    /// Load from environment.
    ///
    /// `GC_NETWORK` picks the preset (mainnet when unset). When
    /// `GC_PARAMS_FILE` is set, that JSON file is loaded instead; fields it
    /// omits take mainnet defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(ENV_PARAMS_FILE) {
            return Self::from_json_file(path);
        }

        let params = match std::env::var(ENV_NETWORK) {
            Ok(name) => Self::for_network(name.parse()?),
            Err(_) => Self::mainnet(),
        };
        params.validate()?;
        Ok(params)
    }

    /// Load and validate a JSON parameter file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let params: Self = serde_json::from_str(&raw)?;
        params.validate()?;
        Ok(params)
    }

    /// Check the parameters can drive the engine
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_spacing == 0 {
            return Err(ConfigError::Invalid("target_spacing must be non-zero".into()));
        }
        if self.target_timespan < self.target_spacing {
            return Err(ConfigError::Invalid(
                "target_timespan must be at least target_spacing".into(),
            ));
        }
        for (name, window) in [("dgw_v1", self.dgw_v1), ("dgw_v3", self.dgw_v3)] {
            if window.past_blocks_min == 0 || window.past_blocks_max < window.past_blocks_min {
                return Err(ConfigError::Invalid(format!(
                    "{name}: need 0 < past_blocks_min <= past_blocks_max"
                )));
            }
        }
        decode_compact(self.max_target_bits)
            .map_err(|e| ConfigError::Invalid(format!("max_target_bits: {e}")))?;
        Ok(())
    }

    /// Decoded easiest target
    pub fn max_target(&self) -> Result<Target, CompactError> {
        decode_compact(self.max_target_bits)
    }

    /// Blocks per interval retarget period
    pub fn interval(&self) -> u64 {
        self.target_timespan / self.target_spacing
    }
}
