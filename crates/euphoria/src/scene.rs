use crate::geometry::{Point, Rect, hexagon_vertices};
use crate::layout::{BarId, Label, Layout, Note};
use crate::message::{encode_hex, zone_path};
use crate::state::ControlState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    Idle,
    Hovered,
    Active,
}

impl Visual {
    /// Active wins over hovered.
    fn resolve(active: bool, hovered: bool) -> Self {
        if active {
            Self::Active
        } else if hovered {
            Self::Hovered
        } else {
            Self::Idle
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HexElement {
    pub note: Note,
    pub center: Point,
    pub radius: f64,
    pub vertices: [Point; 6],
    pub label: Label,
    pub visual: Visual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneElement {
    pub index: usize,
    pub rect: Rect,
    pub glyph: &'static str,
    pub visual: Visual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarElement {
    pub id: BarId,
    pub label: Label,
    pub label_anchor: Point,
    pub zones: Vec<ZoneElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusLines {
    pub hex: Option<String>,
    pub trill: Option<String>,
}

/// Everything the window draws for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub hexes: Vec<HexElement>,
    pub bars: Vec<BarElement>,
    pub status: StatusLines,
}

const BAR_LABEL_OFFSET: f64 = 15.0;

impl Scene {
    pub fn build(layout: &Layout, state: &ControlState, pointer: Option<Point>) -> Self {
        let hexes = layout
            .hexes()
            .iter()
            .map(|pad| {
                let hovered = pointer.is_some_and(|p| p.distance(pad.center) < pad.radius);
                HexElement {
                    note: pad.note,
                    center: pad.center,
                    radius: pad.radius,
                    vertices: hexagon_vertices(pad.center, pad.radius),
                    label: pad.label.clone(),
                    visual: Visual::resolve(state.active_hex() == Some(pad.note), hovered),
                }
            })
            .collect();

        let bars = layout
            .bars()
            .iter()
            .map(|bar| BarElement {
                id: bar.id,
                label: bar.label.clone(),
                label_anchor: Point::new(bar.bounds.center().x, bar.bounds.y - BAR_LABEL_OFFSET),
                zones: bar
                    .zones
                    .iter()
                    .enumerate()
                    .map(|(i, zone)| {
                        let rect = zone.rect(&bar.bounds);
                        let hovered = pointer.is_some_and(|p| zone.contains(&bar.bounds, p));
                        ZoneElement {
                            index: zone.index,
                            rect,
                            glyph: if i == 0 { "♪" } else { "♫" },
                            visual: Visual::resolve(
                                state.is_zone_active(bar.id, zone.index),
                                hovered,
                            ),
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            hexes,
            bars,
            status: StatusLines::build(state),
        }
    }
}

impl StatusLines {
    fn build(state: &ControlState) -> Self {
        let trill = (!state.active_zones().is_empty()).then(|| {
            state
                .active_zones()
                .iter()
                .map(|k| zone_path(k.bar, k.zone))
                .collect::<Vec<_>>()
                .join(", ")
        });

        Self {
            hex: state.active_hex().map(|note| encode_hex(note, 1.0)),
            trill,
        }
    }

    pub fn hex_line(&self) -> String {
        match &self.hex {
            Some(m) => format!("Hex: {m}"),
            None => "Hex: (touch a hex pad)".to_string(),
        }
    }

    pub fn trill_line(&self) -> String {
        match &self.trill {
            Some(m) => format!("Trill: {m}"),
            None => "Trill: (touch a bar)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visuals(scene: &Scene) -> Vec<Visual> {
        scene.hexes.iter().map(|h| h.visual).collect()
    }

    #[test]
    fn test_idle_scene() {
        let layout = Layout::euphoria();
        let scene = Scene::build(&layout, &ControlState::new(&layout), None);

        assert!(visuals(&scene).iter().all(|v| *v == Visual::Idle));
        assert_eq!(scene.bars.len(), 4);
        assert_eq!(scene.bars[0].label_anchor, Point::new(545.0, 85.0));
        assert_eq!(scene.bars[0].zones[0].glyph, "♪");
        assert_eq!(scene.bars[0].zones[1].glyph, "♫");
        assert_eq!(scene.status.hex_line(), "Hex: (touch a hex pad)");
        assert_eq!(scene.status.trill_line(), "Trill: (touch a bar)");
    }

    #[test]
    fn test_active_beats_hover() {
        let layout = Layout::euphoria();
        let mut state = ControlState::new(&layout);
        state.touch_hex(Note::new(7));

        let scene = Scene::build(&layout, &state, Some(Point::new(140.0, 80.0)));
        assert_eq!(scene.hexes[0].visual, Visual::Active);

        let scene = Scene::build(&layout, &state, Some(Point::new(200.0, 85.0)));
        assert_eq!(scene.hexes[0].visual, Visual::Active);
        assert_eq!(scene.hexes[1].visual, Visual::Hovered);
        assert_eq!(scene.hexes[2].visual, Visual::Idle);
    }

    #[test]
    fn test_zone_visuals_and_status() {
        let layout = Layout::euphoria();
        let mut state = ControlState::new(&layout);
        state.toggle_zone(BarId::new(1), 1, 0.3);
        state.toggle_zone(BarId::new(4), 0, 0.3);
        state.touch_hex(Note::new(4));

        let scene = Scene::build(&layout, &state, Some(Point::new(545.0, 150.0)));
        assert_eq!(scene.bars[0].zones[0].visual, Visual::Hovered);
        assert_eq!(scene.bars[0].zones[1].visual, Visual::Active);
        assert_eq!(scene.bars[3].zones[0].visual, Visual::Active);
        assert_eq!(scene.bars[3].zones[1].visual, Visual::Idle);

        assert_eq!(scene.status.hex_line(), "Hex: /euphoria/hex/4 1.00");
        assert_eq!(
            scene.status.trill_line(),
            "Trill: /euphoria/trill/1/1, /euphoria/trill/4/0"
        );
    }
}
