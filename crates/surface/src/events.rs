use crate::config::Config;
use euphoria::router::InputEvent;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Input(InputEvent),
    /// A changed config file, already loaded and validated.
    ConfigReload(Config),
}
