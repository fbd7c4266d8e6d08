use crate::geometry::Point;
use crate::layout::{HexPad, Layout, TrillBar};

/// What a pointer coordinate landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target<'a> {
    Hex(&'a HexPad),
    TrillZone {
        bar: &'a TrillBar,
        zone: usize,
        /// Offset from the top of the zone, 0.0 at the top edge.
        fraction: f64,
    },
}

/// Resolves a point to at most one control. Hex pads are tried before trill
/// bars, each in declaration order, and the first hit wins.
pub fn resolve(layout: &Layout, point: Point) -> Option<Target<'_>> {
    resolve_hex(layout, point).or_else(|| resolve_trill(layout, point))
}

fn resolve_hex(layout: &Layout, point: Point) -> Option<Target<'_>> {
    layout
        .hexes()
        .iter()
        .find(|pad| point.distance(pad.center) < layout.hit_radius())
        .map(Target::Hex)
}

fn resolve_trill(layout: &Layout, point: Point) -> Option<Target<'_>> {
    layout
        .bars()
        .iter()
        .filter(|bar| bar.bounds.contains(point))
        .find_map(|bar| {
            bar.zones.iter().find_map(|zone| {
                let (top, bottom) = zone.edges(&bar.bounds);
                zone.contains(&bar.bounds, point).then(|| Target::TrillZone {
                    bar,
                    zone: zone.index,
                    fraction: ((point.y - top) / (bottom - top)).clamp(0.0, 1.0),
                })
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::layout::{BarId, HexPad, Label, Note, TrillBar, Zone};

    fn hex_note(target: Option<Target<'_>>) -> Option<Note> {
        match target {
            Some(Target::Hex(pad)) => Some(pad.note),
            _ => None,
        }
    }

    fn zone_hit(target: Option<Target<'_>>) -> Option<(BarId, usize, f64)> {
        match target {
            Some(Target::TrillZone {
                bar,
                zone,
                fraction,
            }) => Some((bar.id, zone, fraction)),
            _ => None,
        }
    }

    #[test]
    fn test_hex_inside_radius() {
        let layout = Layout::euphoria();
        for pad in layout.hexes() {
            let inside = Point::new(pad.center.x + 10.0, pad.center.y - 12.0);
            assert_eq!(hex_note(resolve(&layout, inside)), Some(pad.note));
            assert_eq!(hex_note(resolve(&layout, pad.center)), Some(pad.note));
        }
    }

    #[test]
    fn test_hex_radius_is_exclusive() {
        let layout = Layout::euphoria();
        // (140, 340) is hex 1; 30px straight below is on the circle.
        assert_eq!(resolve(&layout, Point::new(140.0, 370.0)), None);
        assert_eq!(
            hex_note(resolve(&layout, Point::new(140.0, 369.9))),
            Some(Note::new(1))
        );
    }

    #[test]
    fn test_adjacent_hexes_split_at_midpoint() {
        let layout = Layout::euphoria();
        // hex 7 at (140,80), hex 6 at (200,80)
        assert_eq!(resolve(&layout, Point::new(170.0, 80.0)), None);
        assert_eq!(
            hex_note(resolve(&layout, Point::new(169.0, 80.0))),
            Some(Note::new(7))
        );
        assert_eq!(
            hex_note(resolve(&layout, Point::new(171.0, 80.0))),
            Some(Note::new(6))
        );
    }

    #[test]
    fn test_overlapping_hexes_use_declaration_order() {
        let hexes = vec![
            HexPad::new(1, 1, Point::new(0.0, 0.0), "1"),
            HexPad::new(2, 2, Point::new(10.0, 0.0), "2"),
        ];
        let layout = Layout::new(hexes, Vec::new(), 30.0).unwrap();
        assert_eq!(
            hex_note(resolve(&layout, Point::new(9.0, 0.0))),
            Some(Note::new(1))
        );
    }

    #[test]
    fn test_hex_wins_over_overlapping_bar() {
        let hexes = vec![HexPad::new(9, 9, Point::new(25.0, 25.0), "9")];
        let bars = vec![TrillBar::halves(1, Rect::new(0.0, 0.0, 50.0, 100.0), "x")];
        let layout = Layout::new(hexes, bars, 30.0).unwrap();

        assert_eq!(
            hex_note(resolve(&layout, Point::new(25.0, 30.0))),
            Some(Note::new(9))
        );
        assert_eq!(
            zone_hit(resolve(&layout, Point::new(25.0, 75.0))),
            Some((BarId::new(1), 1, 0.5))
        );
    }

    #[test]
    fn test_top_zone_fraction_is_linear() {
        let layout = Layout::euphoria();
        // Bar 2 spans x 590..640, y 100..340; top zone is 100..220.
        for offset in [0.0, 30.0, 60.0, 90.0, 120.0] {
            let (bar, zone, fraction) =
                zone_hit(resolve(&layout, Point::new(600.0, 100.0 + offset))).unwrap();
            assert_eq!(bar, BarId::new(2));
            assert_eq!(zone, 0);
            assert!((fraction - offset / 120.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bottom_zone_fraction_is_linear() {
        let layout = Layout::euphoria();
        for offset in [1.0, 30.0, 60.0, 120.0] {
            let (bar, zone, fraction) =
                zone_hit(resolve(&layout, Point::new(545.0, 220.0 + offset))).unwrap();
            assert_eq!(bar, BarId::new(1));
            assert_eq!(zone, 1);
            assert!((fraction - offset / 120.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zone_boundary_goes_to_first_zone() {
        let layout = Layout::euphoria();
        let (_, zone, fraction) = zone_hit(resolve(&layout, Point::new(545.0, 220.0))).unwrap();
        assert_eq!(zone, 0);
        assert_eq!(fraction, 1.0);
    }

    #[test]
    fn test_uneven_zones_leave_no_gap() {
        let bounds = Rect::new(0.0, 90.0, 50.0, 17.7);
        let splits = [0.0, 0.1, 0.3, 0.7, 1.0];
        let bar = TrillBar {
            id: BarId::new(1),
            bounds,
            zones: splits
                .windows(2)
                .enumerate()
                .map(|(i, w)| Zone::new(i, w[0], w[1]))
                .collect(),
            label: Label::new("uneven"),
        };
        let layout = Layout::new(Vec::new(), vec![bar], 30.0).unwrap();

        let mut edges: Vec<f64> = splits
            .iter()
            .map(|s| bounds.y + s * bounds.height)
            .collect();
        edges.push(bounds.bottom());
        for y in edges {
            assert!(
                zone_hit(resolve(&layout, Point::new(25.0, y))).is_some(),
                "y = {y} fell between zones"
            );
        }

        let corner = Point::new(0.0, bounds.bottom());
        let (_, zone, fraction) = zone_hit(resolve(&layout, corner)).unwrap();
        assert_eq!(zone, 3);
        assert_eq!(fraction, 1.0);
    }

    #[test]
    fn test_miss() {
        let layout = Layout::euphoria();
        assert_eq!(resolve(&layout, Point::new(400.0, 200.0)), None);
        // gap between bar 1 and bar 2
        assert_eq!(resolve(&layout, Point::new(580.0, 200.0)), None);
        assert_eq!(resolve(&layout, Point::new(545.0, 99.0)), None);
    }
}
