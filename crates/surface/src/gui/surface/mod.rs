pub mod view;

pub use view::draw;

pub const TITLE: &str = "EUPHORIA CONTROL";
pub const LEFT_CAPTION: &str = "LEFT HAND - Root Note";
pub const RIGHT_CAPTION: &str = "RIGHT HAND - Chord Quality";
pub const HINT: &str = "Touch hex pads (left) and trill bars (right) to send control messages";
pub const FONT: &str = "Sans";
pub const HEX_STROKE_WIDTH: f64 = 3.0;
pub const ZONE_STROKE_WIDTH: f64 = 2.0;
pub const ZONE_CORNER_RADIUS: f64 = 5.0;
pub const STATUS_HEIGHT: f64 = 80.0; // status box height from the bottom edge
