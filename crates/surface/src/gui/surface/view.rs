use super::{
    FONT, HEX_STROKE_WIDTH, HINT, LEFT_CAPTION, RIGHT_CAPTION, STATUS_HEIGHT, TITLE,
    ZONE_CORNER_RADIUS, ZONE_STROKE_WIDTH,
};
use crate::gui::theme::{Paint, ThemeColors};
use cairo::{Context, FontSlant, FontWeight};
use euphoria::geometry::{Point, Rect};
use euphoria::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};
use euphoria::scene::{BarElement, HexElement, Scene, StatusLines, Visual, ZoneElement};
use palette::Srgba;
use std::f64::consts::{FRAC_PI_2, PI};

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn fill_and_stroke(cr: &Context, paint: Paint, width: f64) -> Result<(), cairo::Error> {
    set_color(cr, paint.fill);
    cr.fill_preserve()?;
    set_color(cr, paint.stroke);
    cr.set_line_width(width);
    cr.stroke()
}

enum Align {
    Left,
    Center,
    Right,
}

struct Text<'a> {
    text: &'a str,
    size: f64,
    weight: FontWeight,
}

impl<'a> Text<'a> {
    fn new(text: &'a str, size: f64) -> Self {
        Self {
            text,
            size,
            weight: FontWeight::Normal,
        }
    }

    fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    /// `at` is the vertical middle of the text; `align` picks which
    /// horizontal edge sits on `at.x`.
    fn draw(&self, cr: &Context, at: Point, align: Align) -> Result<(), cairo::Error> {
        cr.select_font_face(FONT, FontSlant::Normal, self.weight);
        cr.set_font_size(self.size);
        let ext = cr.text_extents(self.text)?;
        let x = match align {
            Align::Left => at.x,
            Align::Center => at.x - ext.width() / 2.0 - ext.x_bearing(),
            Align::Right => at.x - ext.width() - ext.x_bearing(),
        };
        cr.move_to(x, at.y - ext.height() / 2.0 - ext.y_bearing());
        cr.show_text(self.text)
    }
}

struct HexRenderer<'a> {
    hex: &'a HexElement,
}

impl HexRenderer<'_> {
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let [first, rest @ ..] = &self.hex.vertices;
        cr.move_to(first.x, first.y);
        for v in rest {
            cr.line_to(v.x, v.y);
        }
        cr.close_path();
        fill_and_stroke(cr, colors.hex(self.hex.visual), HEX_STROKE_WIDTH)?;

        set_color(
            cr,
            if self.hex.visual == Visual::Active {
                colors.hex_label_active
            } else {
                colors.hex_label
            },
        );
        Text::new(&self.hex.label, 18.0)
            .bold()
            .draw(cr, self.hex.center, Align::Center)
    }
}

struct BarRenderer<'a> {
    bar: &'a BarElement,
}

impl BarRenderer<'_> {
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        set_color(cr, colors.caption);
        Text::new(&self.bar.label, 12.0).draw(cr, self.bar.label_anchor, Align::Center)?;

        for (i, zone) in self.bar.zones.iter().enumerate() {
            self.draw_zone(cr, colors, zone, i == 0)?;
        }
        Ok(())
    }

    fn draw_zone(
        &self,
        cr: &Context,
        colors: &ThemeColors,
        zone: &ZoneElement,
        first: bool,
    ) -> Result<(), cairo::Error> {
        rounded_rect(cr, &zone.rect, ZONE_CORNER_RADIUS);
        fill_and_stroke(cr, colors.zone(zone.visual, first), ZONE_STROKE_WIDTH)?;

        set_color(cr, colors.glyph);
        Text::new(zone.glyph, 10.0).draw(cr, zone.rect.center(), Align::Center)
    }
}

fn rounded_rect(cr: &Context, rect: &Rect, radius: f64) {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
    let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
    cr.new_sub_path();
    cr.arc(right - r, top + r, r, -FRAC_PI_2, 0.0);
    cr.arc(right - r, bottom - r, r, 0.0, FRAC_PI_2);
    cr.arc(left + r, bottom - r, r, FRAC_PI_2, PI);
    cr.arc(left + r, top + r, r, PI, 3.0 * FRAC_PI_2);
    cr.close_path();
}

fn draw_headings(cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.title);
    Text::new(TITLE, 20.0)
        .bold()
        .draw(cr, Point::new(CANVAS_WIDTH / 2.0, 30.0), Align::Center)?;

    set_color(cr, colors.caption);
    Text::new(LEFT_CAPTION, 14.0).draw(cr, Point::new(140.0, 60.0), Align::Center)?;
    Text::new(RIGHT_CAPTION, 14.0).draw(cr, Point::new(650.0, 60.0), Align::Center)
}

fn draw_status(
    cr: &Context,
    status: &StatusLines,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let top = CANVAS_HEIGHT - STATUS_HEIGHT;
    let line_color = |sent: bool, color: Srgba<f64>| {
        if sent {
            color
        } else {
            colors.status_empty
        }
    };

    set_color(cr, colors.status);
    Text::new("Last Messages:", 11.0).draw(cr, Point::new(20.0, top + 6.0), Align::Left)?;

    set_color(cr, line_color(status.hex.is_some(), colors.status_hex));
    Text::new(&status.hex_line(), 10.0).draw(cr, Point::new(20.0, top + 25.0), Align::Left)?;

    set_color(cr, line_color(status.trill.is_some(), colors.status_trill));
    Text::new(&status.trill_line(), 10.0).draw(cr, Point::new(20.0, top + 40.0), Align::Left)?;

    set_color(cr, colors.caption);
    Text::new(HINT, 9.0).draw(cr, Point::new(CANVAS_WIDTH - 20.0, top + 5.0), Align::Right)
}

pub fn draw(cr: &Context, scene: &Scene, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.background);
    cr.paint()?;

    draw_headings(cr, colors)?;

    for hex in &scene.hexes {
        HexRenderer { hex }.draw(cr, colors)?;
    }
    for bar in &scene.bars {
        BarRenderer { bar }.draw(cr, colors)?;
    }

    draw_status(cr, &scene.status, colors)
}
