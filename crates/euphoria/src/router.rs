use crate::geometry::Point;
use crate::hit::{self, Target};
use crate::layout::{Layout, Note};
use crate::message::Message;
use crate::scene::Scene;
use crate::sink::Transport;
use crate::state::ControlState;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Position reported when a zone is toggled from the keyboard.
pub const KEY_ZONE_POSITION: f64 = 0.5;
pub const TOP_ZONE_KEYS: [char; 4] = ['q', 'w', 'e', 'r'];
pub const BOTTOM_ZONE_KEYS: [char; 4] = ['a', 's', 'd', 'f'];

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Press(Point),
    Release,
    Touches(Vec<Point>),
    Key(char),
    Hover(Point),
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseEventError {
    #[error("Empty event")]
    Empty,
    #[error("Unknown event '{0}'")]
    UnknownEvent(String),
    #[error("Expected {expected} coordinates, got {got}")]
    Arity { expected: &'static str, got: usize },
    #[error("Invalid coordinate '{0}'")]
    BadNumber(String),
    #[error("Expected a single key, got '{0}'")]
    BadKey(String),
}

fn parse_points(args: &[&str]) -> Result<Vec<Point>, ParseEventError> {
    let coords = args
        .iter()
        .map(|s| {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ParseEventError::BadNumber(s.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if coords.is_empty() || coords.len() % 2 != 0 {
        return Err(ParseEventError::Arity {
            expected: "an even, non-zero number of",
            got: coords.len(),
        });
    }

    Ok(coords
        .chunks_exact(2)
        .map(|c| Point::new(c[0], c[1]))
        .collect())
}

fn parse_point(args: &[&str]) -> Result<Point, ParseEventError> {
    match args.len() {
        2 => Ok(parse_points(args)?[0]),
        got => Err(ParseEventError::Arity {
            expected: "2",
            got,
        }),
    }
}

/// Line format used by the control socket: `press X Y`, `release`,
/// `touch X Y [X Y ...]`, `key C`, `hover X Y`.
impl FromStr for InputEvent {
    type Err = ParseEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let (cmd, args) = words.split_first().ok_or(ParseEventError::Empty)?;

        match cmd.to_ascii_lowercase().as_str() {
            "press" => Ok(Self::Press(parse_point(args)?)),
            "hover" => Ok(Self::Hover(parse_point(args)?)),
            "touch" => Ok(Self::Touches(parse_points(args)?)),
            "release" if args.is_empty() => Ok(Self::Release),
            "release" => Err(ParseEventError::Arity {
                expected: "0",
                got: args.len(),
            }),
            "key" => {
                let mut chars = args.first().map(|a| a.chars()).into_iter().flatten();
                match (args.len(), chars.next(), chars.next()) {
                    (1, Some(c), None) => Ok(Self::Key(c)),
                    _ => Err(ParseEventError::BadKey(args.join(" "))),
                }
            }
            other => Err(ParseEventError::UnknownEvent(other.to_string())),
        }
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Press(p) => write!(f, "press {} {}", p.x, p.y),
            Self::Hover(p) => write!(f, "hover {} {}", p.x, p.y),
            Self::Release => f.write_str("release"),
            Self::Key(c) => write!(f, "key {}", c),
            Self::Touches(points) => {
                f.write_str("touch")?;
                points
                    .iter()
                    .try_for_each(|p| write!(f, " {} {}", p.x, p.y))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Hex(Note),
    /// Toggle a zone of the bar at this position in the layout.
    Zone { bar_index: usize, zone: usize },
}

/// Digits 1-7 pick a hex, `qwer` toggle top zones and `asdf` bottom zones
/// of bars 1-4.
pub fn key_action(key: char) -> Option<KeyAction> {
    let key = key.to_ascii_lowercase();
    if ('1'..='7').contains(&key) {
        return key
            .to_digit(10)
            .map(|d| KeyAction::Hex(Note::new(d as u8)));
    }

    [(TOP_ZONE_KEYS, 0), (BOTTOM_ZONE_KEYS, 1)]
        .iter()
        .find_map(|(keys, zone)| {
            keys.iter().position(|k| *k == key).map(|bar_index| KeyAction::Zone {
                bar_index,
                zone: *zone,
            })
        })
}

/// Dispatches raw input to the hit tester and control state, and hands
/// the resulting messages to the transport.
#[derive(Debug)]
pub struct InputRouter {
    layout: Layout,
    state: ControlState,
    pointer: Option<Point>,
    transport: Transport,
}

impl InputRouter {
    pub fn new(layout: Layout, transport: Transport) -> Self {
        let state = ControlState::new(&layout);
        Self {
            layout,
            state,
            pointer: None,
            transport,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    pub fn set_transport(&mut self, transport: Transport) {
        self.transport = transport;
    }

    pub fn scene(&self) -> Scene {
        Scene::build(&self.layout, &self.state, self.pointer)
    }

    pub fn handle(&mut self, event: InputEvent) -> Vec<Message> {
        match event {
            InputEvent::Press(p) => self.press(p).into_iter().collect(),
            InputEvent::Touches(points) => self.touches(&points),
            InputEvent::Release => self.release().into_iter().collect(),
            InputEvent::Key(c) => self.key(c).into_iter().collect(),
            InputEvent::Hover(p) => {
                self.pointer = Some(p);
                Vec::new()
            }
        }
    }

    pub fn press(&mut self, point: Point) -> Option<Message> {
        self.pointer = Some(point);
        let message = match hit::resolve(&self.layout, point)? {
            Target::Hex(pad) => self.state.touch_hex(pad.note),
            Target::TrillZone {
                bar,
                zone,
                fraction,
            } => self.state.toggle_zone(bar.id, zone, fraction)?,
        };
        self.emit(message)
    }

    /// Each touch goes through the same path as a press, in host order.
    pub fn touches(&mut self, points: &[Point]) -> Vec<Message> {
        points.iter().filter_map(|p| self.press(*p)).collect()
    }

    pub fn release(&mut self) -> Option<Message> {
        let message = self.state.release()?;
        self.emit(message)
    }

    pub fn key(&mut self, key: char) -> Option<Message> {
        let message = match key_action(key)? {
            KeyAction::Hex(note) => self.state.touch_hex(note),
            KeyAction::Zone { bar_index, zone } => {
                let bar = self.layout.bars().get(bar_index)?.id;
                self.state.toggle_zone(bar, zone, KEY_ZONE_POSITION)?
            }
        };
        self.emit(message)
    }

    fn emit(&mut self, message: Message) -> Option<Message> {
        self.transport.send(&message);
        Some(message)
    }
}
