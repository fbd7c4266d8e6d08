use crate::layout::{BarId, Note};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const ROOT: &str = "/euphoria";

pub fn encode_hex(note: Note, value: f64) -> String {
    format!("{ROOT}/hex/{note} {value:.2}")
}

pub fn encode_trill(bar: BarId, zone: usize, position: f64) -> String {
    format!("{} {position:.3}", zone_path(bar, zone))
}

pub fn zone_path(bar: BarId, zone: usize) -> String {
    format!("{ROOT}/trill/{bar}/{zone}")
}

/// Outbound control message. `Display` renders the wire form.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Hex { note: Note, value: f64 },
    Trill { bar: BarId, zone: usize, position: f64 },
    Record(ControlRecord),
}

impl Message {
    pub fn hex_on(note: Note) -> Self {
        Self::Hex { note, value: 1.0 }
    }

    pub fn hex_off(note: Note) -> Self {
        Self::Hex { note, value: 0.0 }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex { note, value } => f.write_str(&encode_hex(*note, *value)),
            Self::Trill {
                bar,
                zone,
                position,
            } => f.write_str(&encode_trill(*bar, *zone, *position)),
            Self::Record(record) => write!(f, "{record}"),
        }
    }
}

impl From<ControlRecord> for Message {
    fn from(record: ControlRecord) -> Self {
        Self::Record(record)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RecordError {
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// One synth parameter, serialized as a single-key object like `{"tone":0.5}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlRecord {
    Key(u8),
    Tone(f64),
    Decay(u32),
    Mod(u32),
    Adsr(u32),
    VibFreq(u8),
    VibDepth(u8),
}

impl ControlRecord {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Key(_) => "key",
            Self::Tone(_) => "tone",
            Self::Decay(_) => "decay",
            Self::Mod(_) => "mod",
            Self::Adsr(_) => "adsr",
            Self::VibFreq(_) => "vibFreq",
            Self::VibDepth(_) => "vibDepth",
        }
    }

    fn value(&self) -> f64 {
        match *self {
            Self::Key(v) | Self::VibFreq(v) | Self::VibDepth(v) => v as f64,
            Self::Tone(v) => v,
            Self::Decay(v) | Self::Mod(v) | Self::Adsr(v) => v as f64,
        }
    }

    fn range(&self) -> (f64, f64) {
        match self {
            Self::Key(_) => (0.0, 11.0),
            Self::Tone(_) => (0.0, 1.0),
            Self::Decay(_) => (0.0, 2000.0),
            Self::Mod(_) => (0.0, 32.0),
            Self::Adsr(_) => (0.0, 50.0),
            Self::VibFreq(_) | Self::VibDepth(_) => (0.0, 127.0),
        }
    }

    pub fn validated(self) -> Result<Self, RecordError> {
        let value = self.value();
        let (min, max) = self.range();
        if (min..=max).contains(&value) {
            Ok(self)
        } else {
            Err(RecordError::OutOfRange {
                field: self.field(),
                value,
                min,
                max,
            })
        }
    }
}

impl fmt::Display for ControlRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
