use euphoria::panel::{Panel, PitchClass, SliderKind};
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;
use strum::IntoEnumIterator;

const SLIDER_WIDTH: i32 = 300;

fn caption(text: &str) -> gtk::Label {
    let label = gtk::Label::new(Some(text.to_uppercase().as_str()));
    label.set_xalign(0.0);
    label
}

fn key_selector(panel: &Rc<RefCell<Panel>>) -> gtk::DropDown {
    let labels = PitchClass::labels();
    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
    let dropdown = gtk::DropDown::from_strings(&labels);
    dropdown.set_selected(panel.borrow().key.as_index() as u32);

    let panel = panel.clone();
    dropdown.connect_selected_notify(move |dd| {
        if let Some(key) = PitchClass::from_index(dd.selected() as usize) {
            panel.borrow_mut().key = key;
        }
    });
    dropdown
}

fn slider(panel: &Rc<RefCell<Panel>>, kind: SliderKind) -> gtk::Scale {
    let s = *panel.borrow().slider(kind);
    let scale =
        gtk::Scale::with_range(gtk::Orientation::Horizontal, s.min as f64, s.max as f64, 1.0);
    scale.set_value(s.value() as f64);
    scale.set_draw_value(true);
    scale.set_digits(0);
    scale.set_width_request(SLIDER_WIDTH);

    let panel = panel.clone();
    scale.connect_value_changed(move |scale| panel.borrow_mut().set(kind, scale.value()));
    scale
}

/// Key selector followed by one captioned slider per synth parameter.
pub fn build(panel: &Rc<RefCell<Panel>>) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 8);
    root.add_css_class("euphoria-panel");

    root.append(&caption("Key"));
    root.append(&key_selector(panel));

    for kind in SliderKind::iter() {
        root.append(&caption(&kind.to_string()));
        root.append(&slider(panel, kind));
    }
    root
}
