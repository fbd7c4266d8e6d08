use euphoria::scene::Visual;
use gtk::gdk;
use gtk4 as gtk;
use palette::Srgba;

#[derive(Debug, Clone, Copy)]
pub struct Paint {
    pub fill: Srgba<f64>,
    pub stroke: Srgba<f64>,
}

impl Paint {
    const fn new(fill: Srgba<f64>, stroke: Srgba<f64>) -> Self {
        Self { fill, stroke }
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Srgba<f64> {
    rgba(r, g, b, 255)
}

fn rgba(r: u8, g: u8, b: u8, a: u8) -> Srgba<f64> {
    Srgba::new(
        r as f64 / 255.0,
        g as f64 / 255.0,
        b as f64 / 255.0,
        a as f64 / 255.0,
    )
}

pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub title: Srgba<f64>,
    pub caption: Srgba<f64>,
    pub hex_active: Paint,
    pub hex_hovered: Paint,
    pub hex_idle: Paint,
    pub hex_label: Srgba<f64>,
    pub hex_label_active: Srgba<f64>,
    pub zone_active: Paint,
    pub zone_hovered: Paint,
    /// Idle colors for the first zone and for the rest.
    pub zone_top: Paint,
    pub zone_bottom: Paint,
    pub glyph: Srgba<f64>,
    pub status: Srgba<f64>,
    pub status_hex: Srgba<f64>,
    pub status_trill: Srgba<f64>,
    pub status_empty: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        let grey = rgb(150, 150, 150);
        Self {
            background: rgb(240, 240, 240),
            title: rgb(0, 0, 0),
            caption: rgb(100, 100, 100),
            hex_active: Paint::new(rgb(255, 165, 0), rgb(255, 140, 0)),
            hex_hovered: Paint::new(rgb(255, 200, 100), rgb(200, 150, 50)),
            hex_idle: Paint::new(rgb(255, 255, 255), grey),
            hex_label: rgb(50, 50, 50),
            hex_label_active: rgb(255, 255, 255),
            zone_active: Paint::new(rgb(138, 43, 226), rgb(100, 20, 180)),
            zone_hovered: Paint::new(rgb(200, 150, 255), rgb(150, 100, 200)),
            zone_top: Paint::new(rgb(100, 200, 255), grey),
            zone_bottom: Paint::new(rgb(255, 150, 200), grey),
            glyph: rgba(255, 255, 255, 200),
            status: rgb(50, 50, 50),
            status_hex: rgb(0, 150, 0),
            status_trill: rgb(138, 43, 226),
            status_empty: grey,
        }
    }
}

impl ThemeColors {
    pub fn hex(&self, visual: Visual) -> Paint {
        match visual {
            Visual::Active => self.hex_active,
            Visual::Hovered => self.hex_hovered,
            Visual::Idle => self.hex_idle,
        }
    }

    pub fn zone(&self, visual: Visual, first: bool) -> Paint {
        match visual {
            Visual::Active => self.zone_active,
            Visual::Hovered => self.zone_hovered,
            Visual::Idle if first => self.zone_top,
            Visual::Idle => self.zone_bottom,
        }
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.euphoria-window {
    background-color: rgb(10, 10, 46);
}
.euphoria-panel {
    padding: 24px;
}
.euphoria-panel label {
    color: #e0e0ff;
    font-weight: 600;
    letter-spacing: 1px;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
