use crate::error::{Result, ScytaleError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One stage of a pipeline, by kind and parameter.
///
/// Compact text form: `shift:3`, `mask:0x5a` (or `mask:90`), `reverse`,
/// `remap:26`. JSON form tags each entry with a `stage` field:
/// `{"stage": "shift", "shift": 3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "lowercase")]
pub enum StageDescriptor {
    Shift { shift: i64 },
    Mask { mask: u8 },
    Reverse,
    Remap { modulus: u32 },
}

impl StageDescriptor {
    /// The wire name of this stage kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Shift { .. } => "shift",
            Self::Mask { .. } => "mask",
            Self::Reverse => "reverse",
            Self::Remap { .. } => "remap",
        }
    }

    /// True for the source transforms a pipeline must open with.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Shift { .. } | Self::Mask { .. })
    }
}

impl std::str::FromStr for StageDescriptor {
    type Err = ScytaleError;
    fn from_str(s: &str) -> Result<Self> {
        let (kind, param) = match s.split_once(':') {
            Some((kind, param)) => (kind.trim(), Some(param.trim())),
            None => (s.trim(), None),
        };
        match kind.to_lowercase().as_str() {
            "shift" => {
                let param = required(param, "shift", "an amount, e.g. shift:3")?;
                let shift = param.parse::<i64>().map_err(|_| {
                    ScytaleError::InvalidStageParam(format!(
                        "shift amount '{}' is not an integer",
                        param
                    ))
                })?;
                Ok(Self::Shift { shift })
            }
            "mask" => {
                let param = required(param, "mask", "a byte, e.g. mask:0x5a")?;
                Ok(Self::Mask {
                    mask: parse_mask(param)?,
                })
            }
            "reverse" => match param {
                None => Ok(Self::Reverse),
                Some(param) => Err(ScytaleError::InvalidStageParam(format!(
                    "reverse takes no parameter, got '{}'",
                    param
                ))),
            },
            "remap" => {
                let param = required(param, "remap", "a modulus, e.g. remap:26")?;
                let modulus = param.parse::<u32>().map_err(|_| {
                    ScytaleError::InvalidStageParam(format!(
                        "remap modulus '{}' is not a number",
                        param
                    ))
                })?;
                if modulus == 0 {
                    return Err(ScytaleError::InvalidModulus(modulus));
                }
                Ok(Self::Remap { modulus })
            }
            "" => Err(ScytaleError::InvalidStageParam(
                "empty stage entry".to_string(),
            )),
            other => Err(ScytaleError::UnknownStage(other.to_string())),
        }
    }
}

fn required<'a>(param: Option<&'a str>, kind: &str, expected: &str) -> Result<&'a str> {
    match param {
        Some(param) if !param.is_empty() => Ok(param),
        _ => Err(ScytaleError::InvalidStageParam(format!(
            "{} requires {}",
            kind, expected
        ))),
    }
}

/// Parse a mask byte from decimal or 0x-prefixed hex form.
pub fn parse_mask(s: &str) -> Result<u8> {
    let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => s.parse::<i64>(),
    }
    .map_err(|_| ScytaleError::InvalidStageParam(format!("mask '{}' is not a number", s)))?;
    if !(0..=255).contains(&value) {
        return Err(ScytaleError::InvalidMask(value));
    }
    Ok(value as u8)
}

impl std::fmt::Display for StageDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shift { shift } => write!(f, "shift:{}", shift),
            Self::Mask { mask } => write!(f, "mask:0x{:02x}", mask),
            Self::Reverse => write!(f, "reverse"),
            Self::Remap { modulus } => write!(f, "remap:{}", modulus),
        }
    }
}

/// An ordered list of stage descriptors, leaf first.
///
/// Serializes as a bare JSON array so pipeline files read as
/// `[{"stage": "shift", "shift": 3}, {"stage": "reverse"}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineDescriptor {
    stages: Vec<StageDescriptor>,
}

impl PipelineDescriptor {
    pub fn new(stages: Vec<StageDescriptor>) -> Self {
        PipelineDescriptor { stages }
    }

    pub fn stages(&self) -> &[StageDescriptor] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Load a descriptor list from a JSON pipeline file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Write the descriptor list as a JSON pipeline file.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl std::str::FromStr for PipelineDescriptor {
    type Err = ScytaleError;
    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(ScytaleError::EmptyPipeline);
        }
        let stages = s
            .split(',')
            .map(|entry| entry.parse::<StageDescriptor>())
            .collect::<Result<Vec<_>>>()?;
        Ok(PipelineDescriptor { stages })
    }
}

impl std::fmt::Display for PipelineDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.stages.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}
