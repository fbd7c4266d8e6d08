use crate::config::Config;
use crate::events::AppEvent;
use crate::gui::panel;
use crate::gui::surface;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use euphoria::geometry::Point;
use euphoria::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};
use euphoria::panel::Panel;
use euphoria::router::{InputEvent, InputRouter};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

pub struct AppModel {
    pub router: Rc<RefCell<InputRouter>>,
    pub panel: Rc<RefCell<Panel>>,
    pub show_panel: bool,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Input(InputEvent),
    Tick,
    ConfigReload(Config),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Input(e) => AppMsg::Input(e),
            AppEvent::ConfigReload(config) => AppMsg::ConfigReload(config),
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (InputRouter, Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Euphoria"),
            set_resizable: false,
            add_css_class: "euphoria-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key.to_unicode() {
                        Some(c) => {
                            sender.input(AppMsg::Input(InputEvent::Key(c)));
                            glib::Propagation::Stop
                        }
                        None => glib::Propagation::Proceed,
                    }
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_content_width: CANVAS_WIDTH as i32,
                    set_content_height: CANVAS_HEIGHT as i32,

                    add_controller = gtk::EventControllerMotion {
                        connect_motion[sender] => move |_, x, y| {
                            sender.input(AppMsg::Input(InputEvent::Hover(Point::new(x, y))));
                        }
                    },

                    add_controller = gtk::GestureClick {
                        set_button: 0, // Listen to all buttons
                        connect_pressed[sender] => move |gesture, _, x, y| {
                            if !window::from_touchscreen(gesture) {
                                sender.input(AppMsg::Input(InputEvent::Press(Point::new(x, y))));
                            }
                        },
                        connect_released[sender] => move |gesture, _, _, _| {
                            if !window::from_touchscreen(gesture) {
                                sender.input(AppMsg::Input(InputEvent::Release));
                            }
                        }
                    }
                },

                #[name = "panel_box"]
                gtk::Box {
                    #[watch]
                    set_visible: model.show_panel,
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (router, config, rx) = init;

        theme::load_css();

        let model = AppModel {
            router: Rc::new(RefCell::new(router)),
            panel: Rc::new(RefCell::new(Panel::default())),
            show_panel: config.panel,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        widgets.panel_box.append(&panel::build(&model.panel));

        let router_draw = model.router.clone();
        let colors = ThemeColors::default();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, _, _| {
                let scene = router_draw.borrow().scene();
                if let Err(e) = surface::draw(cr, &scene, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let touches = gtk::EventControllerLegacy::new();
        touches.set_propagation_phase(gtk::PropagationPhase::Capture);
        let area = widgets.drawing_area.clone();
        let touch_sender = sender.clone();
        touches.connect_event(move |_, event| {
            if let Some(e) = window::touch_event(&area, event) {
                touch_sender.input(AppMsg::Input(e));
            }
            glib::Propagation::Proceed
        });
        widgets.drawing_area.add_controller(touches);

        let tick_sender = sender.input_sender().clone();
        glib::timeout_add_local(
            Duration::from_millis(config.frame_interval_ms.max(1)),
            move || {
                if tick_sender.send(AppMsg::Tick).is_err() {
                    return glib::ControlFlow::Break;
                }
                glib::ControlFlow::Continue
            },
        );

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Input(event) => {
                let mut router = self.router.borrow_mut();
                let before = router.scene();
                router.handle(event);
                if router.scene() != before {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::Tick => {
                if !self.show_panel {
                    return;
                }
                match self.panel.borrow().messages() {
                    Ok(messages) => self.router.borrow_mut().transport_mut().send_all(&messages),
                    Err(e) => log::error!("Invalid panel values: {}", e),
                }
            }
            AppMsg::ConfigReload(config) => {
                self.router
                    .borrow_mut()
                    .set_transport(config.transport.build());
                self.show_panel = config.panel;
                log::info!("Configuration reloaded (transport: {})", config.transport);
            }
        }
    }
}
