use crate::geometry::{Point, Rect};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

pub const CANVAS_WIDTH: f64 = 844.0;
pub const CANVAS_HEIGHT: f64 = 390.0;
pub const HEX_RADIUS: f64 = 30.0;
pub const HEX_HIT_RADIUS: f64 = 30.0;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct HexId(u8);

crate::impl_id_newtype!(HexId, u8);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct Note(u8);

crate::impl_id_newtype!(Note, u8);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct BarId(u8);

crate::impl_id_newtype!(BarId, u8);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexPad {
    pub id: HexId,
    pub note: Note,
    pub center: Point,
    pub radius: f64,
    pub label: Label,
}

impl HexPad {
    pub fn new(id: u8, note: u8, center: Point, label: impl Into<String>) -> Self {
        Self {
            id: HexId(id),
            note: Note(note),
            center,
            radius: HEX_RADIUS,
            label: Label::new(label),
        }
    }
}

/// A vertical band of a trill bar, as fractions of the bar height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl Zone {
    pub fn new(index: usize, start: f64, end: f64) -> Self {
        Self { index, start, end }
    }

    pub fn rect(&self, bounds: &Rect) -> Rect {
        bounds.vertical_slice(self.start, self.end)
    }

    /// Top and bottom pixel edges inside `bounds`.
    pub fn edges(&self, bounds: &Rect) -> (f64, f64) {
        bounds.vertical_edges(self.start, self.end)
    }

    /// Whether `point` lies in this zone of `bounds`, edges included.
    pub fn contains(&self, bounds: &Rect, point: Point) -> bool {
        let (top, bottom) = self.edges(bounds);
        point.x >= bounds.x && point.x <= bounds.right() && point.y >= top && point.y <= bottom
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrillBar {
    pub id: BarId,
    pub bounds: Rect,
    pub zones: Vec<Zone>,
    pub label: Label,
}

impl TrillBar {
    /// A bar split into a top and a bottom half.
    pub fn halves(id: u8, bounds: Rect, label: impl Into<String>) -> Self {
        Self {
            id: BarId(id),
            bounds,
            zones: vec![Zone::new(0, 0.0, 0.5), Zone::new(1, 0.5, 1.0)],
            label: Label::new(label),
        }
    }

    pub fn zone(&self, index: usize) -> Option<&Zone> {
        self.zones.iter().find(|z| z.index == index)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum LayoutError {
    #[error("Duplicate hex pad id {0}")]
    DuplicateHex(HexId),
    #[error("Duplicate trill bar id {0}")]
    DuplicateBar(BarId),
    #[error("Hex pad {0} has a non-positive radius")]
    BadRadius(HexId),
    #[error("Hit radius must be positive, got {0}")]
    BadHitRadius(f64),
    #[error("Trill bar {0} has empty bounds")]
    EmptyBar(BarId),
    #[error("Trill bar {0} has no zones")]
    NoZones(BarId),
    #[error("Trill bar {bar} has zone {zone} twice")]
    DuplicateZone { bar: BarId, zone: usize },
    #[error("Zone {zone} of trill bar {bar} has invalid range {start}..{end}")]
    BadZone {
        bar: BarId,
        zone: usize,
        start: f64,
        end: f64,
    },
}

/// Static description of the controls on the canvas. Built once and never
/// mutated afterwards; toggle flags live in [`crate::state::ControlState`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    hexes: Vec<HexPad>,
    bars: Vec<TrillBar>,
    hit_radius: f64,
}

impl Layout {
    pub fn new(
        hexes: Vec<HexPad>,
        bars: Vec<TrillBar>,
        hit_radius: f64,
    ) -> Result<Self, LayoutError> {
        if !(hit_radius > 0.0) {
            return Err(LayoutError::BadHitRadius(hit_radius));
        }

        let mut seen = HashSet::new();
        for hex in &hexes {
            if !seen.insert(hex.id) {
                return Err(LayoutError::DuplicateHex(hex.id));
            }
            if !(hex.radius > 0.0) {
                return Err(LayoutError::BadRadius(hex.id));
            }
        }

        let mut seen = HashSet::new();
        for bar in &bars {
            if !seen.insert(bar.id) {
                return Err(LayoutError::DuplicateBar(bar.id));
            }
            Self::validate_bar(bar)?;
        }

        Ok(Self {
            hexes,
            bars,
            hit_radius,
        })
    }

    fn validate_bar(bar: &TrillBar) -> Result<(), LayoutError> {
        if !(bar.bounds.width > 0.0 && bar.bounds.height > 0.0) {
            return Err(LayoutError::EmptyBar(bar.id));
        }
        if bar.zones.is_empty() {
            return Err(LayoutError::NoZones(bar.id));
        }
        let mut seen = HashSet::new();
        if let Some(z) = bar.zones.iter().find(|z| !seen.insert(z.index)) {
            return Err(LayoutError::DuplicateZone {
                bar: bar.id,
                zone: z.index,
            });
        }
        bar.zones
            .iter()
            .find(|z| !(0.0 <= z.start && z.start < z.end && z.end <= 1.0))
            .map_or(Ok(()), |z| {
                Err(LayoutError::BadZone {
                    bar: bar.id,
                    zone: z.index,
                    start: z.start,
                    end: z.end,
                })
            })
    }

    /// Left hand hex pads for the root note, right hand trill bars for
    /// the chord quality, sized for a phone held horizontally.
    pub fn euphoria() -> Self {
        let (hexes, bars) = Self::euphoria_controls();
        Self {
            hexes,
            bars,
            hit_radius: HEX_HIT_RADIUS,
        }
    }

    pub fn euphoria_with_hit_radius(hit_radius: f64) -> Result<Self, LayoutError> {
        let (hexes, bars) = Self::euphoria_controls();
        Self::new(hexes, bars, hit_radius)
    }

    fn euphoria_controls() -> (Vec<HexPad>, Vec<TrillBar>) {
        let hexes = vec![
            HexPad::new(7, 7, Point::new(140.0, 80.0), "7"),
            HexPad::new(6, 6, Point::new(200.0, 80.0), "6"),
            HexPad::new(3, 3, Point::new(110.0, 145.0), "3"),
            HexPad::new(4, 4, Point::new(170.0, 145.0), "4"),
            HexPad::new(2, 2, Point::new(140.0, 210.0), "2"),
            HexPad::new(5, 5, Point::new(110.0, 275.0), "5"),
            HexPad::new(1, 1, Point::new(140.0, 340.0), "1"),
        ];

        let bars = ["1st", "2nd", "3rd", "4th"]
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let bounds = Rect::new(520.0 + i as f64 * 70.0, 100.0, 50.0, 240.0);
                TrillBar::halves(i as u8 + 1, bounds, *label)
            })
            .collect();

        (hexes, bars)
    }

    pub fn hexes(&self) -> &[HexPad] {
        &self.hexes
    }

    pub fn bars(&self) -> &[TrillBar] {
        &self.bars
    }

    pub fn hit_radius(&self) -> f64 {
        self.hit_radius
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::euphoria()
    }
}
