pub mod app;
pub mod panel;
pub mod surface;
pub mod theme;
pub mod window;
