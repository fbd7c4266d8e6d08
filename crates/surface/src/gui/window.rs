use euphoria::geometry::Point;
use euphoria::router::InputEvent;
use gtk::prelude::*;
use gtk::{gdk, graphene};
use gtk4 as gtk;

/// Mouse presses only; touch sequences come through [`touch_event`].
pub fn from_touchscreen(controller: &impl IsA<gtk::EventController>) -> bool {
    controller
        .current_event_device()
        .is_some_and(|d| d.source() == gdk::InputSource::Touchscreen)
}

/// Each touch begin is reported on its own, in the order the compositor
/// delivers them.
pub fn touch_event(widget: &impl IsA<gtk::Widget>, event: &gdk::Event) -> Option<InputEvent> {
    match event.event_type() {
        gdk::EventType::TouchBegin => {
            let (x, y) = event.position()?;
            Some(InputEvent::Touches(vec![to_widget_coords(widget, x, y)?]))
        }
        gdk::EventType::TouchEnd => Some(InputEvent::Release),
        _ => None,
    }
}

// Legacy events carry surface coordinates.
fn to_widget_coords(widget: &impl IsA<gtk::Widget>, x: f64, y: f64) -> Option<Point> {
    let native = widget.native()?;
    let (sx, sy) = native.surface_transform();
    let origin = widget.compute_point(&native, &graphene::Point::new(0.0, 0.0))?;
    Some(Point::new(
        x - sx - origin.x() as f64,
        y - sy - origin.y() as f64,
    ))
}
