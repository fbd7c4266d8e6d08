use crate::layout::{BarId, Layout, Note};
use crate::message::Message;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneKey {
    pub bar: BarId,
    pub zone: usize,
}

impl ZoneKey {
    pub fn new(bar: BarId, zone: usize) -> Self {
        Self { bar, zone }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct BarFlags {
    bar: BarId,
    zones: Vec<(usize, bool)>,
}

/// Mutable selections on top of a [`Layout`].
///
/// The active hex is single-select and stays set after release, so the
/// pad stays highlighted and each release re-sends its off message.
/// `active_zones` is rebuilt from the per-zone flags after every flip.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    active_hex: Option<Note>,
    flags: Vec<BarFlags>,
    active_zones: BTreeSet<ZoneKey>,
}

impl ControlState {
    pub fn new(layout: &Layout) -> Self {
        let flags = layout
            .bars()
            .iter()
            .map(|bar| BarFlags {
                bar: bar.id,
                zones: bar.zones.iter().map(|z| (z.index, false)).collect(),
            })
            .collect();

        Self {
            active_hex: None,
            flags,
            active_zones: BTreeSet::new(),
        }
    }

    pub fn active_hex(&self) -> Option<Note> {
        self.active_hex
    }

    pub fn active_zones(&self) -> &BTreeSet<ZoneKey> {
        &self.active_zones
    }

    pub fn is_zone_active(&self, bar: BarId, zone: usize) -> bool {
        self.flag(bar, zone).unwrap_or(false)
    }

    fn flag(&self, bar: BarId, zone: usize) -> Option<bool> {
        self.flags
            .iter()
            .find(|f| f.bar == bar)?
            .zones
            .iter()
            .find(|(index, _)| *index == zone)
            .map(|(_, active)| *active)
    }

    pub fn touch_hex(&mut self, note: Note) -> Message {
        self.active_hex = Some(note);
        Message::hex_on(note)
    }

    pub fn release(&self) -> Option<Message> {
        self.active_hex.map(Message::hex_off)
    }

    /// Flips one zone. Activating reports `position`, deactivating reports
    /// 0.0. Unknown bars or zones leave the state untouched.
    pub fn toggle_zone(&mut self, bar: BarId, zone: usize, position: f64) -> Option<Message> {
        let active = self
            .flags
            .iter_mut()
            .find(|f| f.bar == bar)?
            .zones
            .iter_mut()
            .find(|(index, _)| *index == zone)
            .map(|(_, active)| {
                *active = !*active;
                *active
            })?;

        self.recompute_active_zones();

        Some(Message::Trill {
            bar,
            zone,
            position: if active { position } else { 0.0 },
        })
    }

    fn recompute_active_zones(&mut self) {
        self.active_zones = self
            .flags
            .iter()
            .flat_map(|f| {
                f.zones
                    .iter()
                    .filter(|(_, active)| *active)
                    .map(move |(zone, _)| ZoneKey::new(f.bar, *zone))
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = ControlState::new(&Layout::euphoria());
        assert_eq!(state.active_hex(), None);
        assert!(state.active_zones().is_empty());
        assert_eq!(state.release(), None);
    }

    #[test]
    fn test_last_hex_wins() {
        let mut state = ControlState::new(&Layout::euphoria());
        state.touch_hex(Note::new(3));
        let msg = state.touch_hex(Note::new(6));
        assert_eq!(state.active_hex(), Some(Note::new(6)));
        assert_eq!(msg.to_string(), "/euphoria/hex/6 1.00");
    }

    #[test]
    fn test_release_keeps_hex_and_sends_off() {
        let mut state = ControlState::new(&Layout::euphoria());
        state.touch_hex(Note::new(2));
        assert_eq!(state.release(), Some(Message::hex_off(Note::new(2))));
        assert_eq!(state.active_hex(), Some(Note::new(2)));
        assert_eq!(state.release(), Some(Message::hex_off(Note::new(2))));
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut state = ControlState::new(&Layout::euphoria());
        let bar = BarId::new(2);

        let first = state.toggle_zone(bar, 1, 0.4).unwrap();
        assert!(state.is_zone_active(bar, 1));
        assert_eq!(first.to_string(), "/euphoria/trill/2/1 0.400");

        let second = state.toggle_zone(bar, 1, 0.9).unwrap();
        assert!(!state.is_zone_active(bar, 1));
        assert_eq!(
            second,
            Message::Trill {
                bar,
                zone: 1,
                position: 0.0
            }
        );
        assert!(state.active_zones().is_empty());
    }

    #[test]
    fn test_active_zones_projection() {
        let mut state = ControlState::new(&Layout::euphoria());
        state.toggle_zone(BarId::new(3), 0, 0.5);
        state.toggle_zone(BarId::new(1), 1, 0.5);
        state.toggle_zone(BarId::new(1), 0, 0.5);
        state.toggle_zone(BarId::new(1), 0, 0.5);

        let zones: Vec<_> = state.active_zones().iter().copied().collect();
        assert_eq!(
            zones,
            vec![ZoneKey::new(BarId::new(1), 1), ZoneKey::new(BarId::new(3), 0)]
        );
    }

    #[test]
    fn test_toggle_unknown_zone_is_ignored() {
        let mut state = ControlState::new(&Layout::euphoria());
        let before = state.clone();
        assert_eq!(state.toggle_zone(BarId::new(9), 0, 0.5), None);
        assert_eq!(state.toggle_zone(BarId::new(1), 2, 0.5), None);
        assert_eq!(state, before);
    }
}
