use euphoria::layout::Layout;
use euphoria::router::InputRouter;
use euphoria_surface::config;
use euphoria_surface::gui::app::AppModel;
use euphoria_surface::sys::runtime::BackgroundServices;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let layout = Layout::euphoria_with_hit_radius(config.hit_radius).unwrap_or_else(|e| {
        log::error!("{}, using the default hit radius", e);
        Layout::euphoria()
    });
    let router = InputRouter::new(layout, config.transport.build());

    let (tx, rx) = async_channel::bounded(32);

    if let Err(e) = BackgroundServices::new().and_then(|services| services.start(tx)) {
        log::error!("Remote input and config reload are unavailable: {}", e);
    }

    let app = RelmApp::new("org.euphoria.surface");

    app.run::<AppModel>((router, config, rx));
}
