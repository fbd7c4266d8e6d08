pub mod geometry;
pub mod hit;
pub mod layout;
pub mod macros;
pub mod message;
pub mod panel;
pub mod router;
pub mod scene;
pub mod sink;
pub mod state;
pub mod voicing;

pub const SOCKET_PATH: &str = "/tmp/euphoria.sock";
