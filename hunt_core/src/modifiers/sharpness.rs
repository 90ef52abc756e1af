//! Sharpness gauges and their damage modifiers

use crate::error::HuntError;
use crate::types::SharpnessColor;
use serde::{Deserialize, Serialize};

/// Number of color buckets in a gauge
pub const BUCKETS: usize = 7;

/// Raw and element multipliers per sharpness color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharpnessTable {
    /// (raw, element) per color, `None` where the color does not exist
    modifiers: [Option<(f64, f64)>; BUCKETS],
}

impl SharpnessTable {
    pub const CLASSIC: SharpnessTable = SharpnessTable {
        modifiers: [
            Some((0.50, 0.25)),
            Some((0.75, 0.50)),
            Some((1.00, 0.75)),
            Some((1.125, 1.00)),
            Some((1.25, 1.0625)),
            Some((1.32, 1.125)),
            Some((1.44, 1.20)),
        ],
    };

    pub const ALT: SharpnessTable = SharpnessTable {
        modifiers: [
            Some((0.50, 0.25)),
            Some((0.75, 0.50)),
            Some((1.00, 0.75)),
            Some((1.05, 1.00)),
            Some((1.20, 1.0625)),
            Some((1.32, 1.125)),
            None,
        ],
    };

    pub fn get(&self, color: SharpnessColor) -> Option<(f64, f64)> {
        self.modifiers[color.index()]
    }

    pub fn raw_modifier(&self, color: SharpnessColor) -> Result<f64, HuntError> {
        self.get(color)
            .map(|(raw, _)| raw)
            .ok_or_else(|| HuntError::BadSharpness(format!("{} not available", color)))
    }

    pub fn element_modifier(&self, color: SharpnessColor) -> Result<f64, HuntError> {
        self.get(color)
            .map(|(_, element)| element)
            .ok_or_else(|| HuntError::BadSharpness(format!("{} not available", color)))
    }

    /// Colors present in this table, lowest first
    pub fn colors(&self) -> impl Iterator<Item = SharpnessColor> + '_ {
        SharpnessColor::all()
            .iter()
            .copied()
            .filter(move |c| self.get(*c).is_some())
    }
}

/// Sharpness as stored on a weapon record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SharpnessDescriptor {
    /// `"<normal> <plus1> <plus2>"`, each `a.b.c.d.e.f[.g]`
    Text(String),
    /// Seven color buckets, shared by every sharpness-plus level
    Buckets(Vec<i64>),
}

/// Parsed gauge for normal, +1 and +2 sharpness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponSharpness {
    pub gauges: [[u32; BUCKETS]; 3],
}

impl WeaponSharpness {
    pub fn parse(descriptor: &SharpnessDescriptor) -> Result<Self, HuntError> {
        match descriptor {
            SharpnessDescriptor::Buckets(values) => {
                let gauge = parse_buckets(values, &format!("{:?}", values))?;
                Ok(WeaponSharpness { gauges: [gauge; 3] })
            }
            SharpnessDescriptor::Text(text) => {
                let parts: Vec<&str> = text.split_whitespace().collect();
                if parts.is_empty() || parts.len() > 3 {
                    return Err(HuntError::BadSharpness(text.clone()));
                }
                let mut gauges = Vec::with_capacity(3);
                for part in &parts {
                    let values = part
                        .split('.')
                        .map(|v| v.parse::<i64>())
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(|_| HuntError::BadSharpness(text.clone()))?;
                    gauges.push(parse_buckets(&values, text)?);
                }
                // Weapons listed without plus gauges keep their last gauge
                while gauges.len() < 3 {
                    let last = gauges[gauges.len() - 1];
                    gauges.push(last);
                }
                Ok(WeaponSharpness {
                    gauges: [gauges[0], gauges[1], gauges[2]],
                })
            }
        }
    }

    /// Highest non-empty color at the given sharpness-plus level (0..=2)
    pub fn level(&self, plus: u8) -> Result<SharpnessColor, HuntError> {
        let gauge = self
            .gauges
            .get(plus as usize)
            .ok_or_else(|| HuntError::InvalidConfig(format!("sharpness plus {} out of range", plus)))?;
        gauge
            .iter()
            .rposition(|&v| v > 0)
            .and_then(SharpnessColor::from_index)
            .ok_or_else(|| HuntError::BadSharpness("empty sharpness gauge".to_string()))
    }
}

fn parse_buckets(values: &[i64], source: &str) -> Result<[u32; BUCKETS], HuntError> {
    if values.len() != BUCKETS - 1 && values.len() != BUCKETS {
        return Err(HuntError::BadSharpness(source.to_string()));
    }
    let mut gauge = [0u32; BUCKETS];
    for (slot, &value) in gauge.iter_mut().zip(values) {
        *slot = u32::try_from(value).map_err(|_| HuntError::BadSharpness(source.to_string()))?;
    }
    Ok(gauge)
}
