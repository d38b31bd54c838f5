use crate::surface::ImageSurface;
use crate::ui::Notice;
use egui::{Align2, Color32, FontId, Pos2, Rect, Response, Stroke, Ui, Vec2};

/// Magnifier diameter in pixels.
pub const MAGNIFIER_SIZE: f32 = 120.0;
/// Side length of one magnified cell in pixels.
pub const PIXEL_SIZE: f32 = 10.0;
/// How long the overlay's "Color copied!" notice stays up.
const COPY_NOTICE_SECS: f64 = 2.0;

/// A color read from the drawing surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    pub color: Color32,
    pub hex: String,
}

impl Sample {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: Color32::from_rgb(r, g, b),
            hex: hex_color(r, g, b),
        }
    }
}

/// Convert an RGB triple to a `#rrggbb` string.
///
/// The packing mirrors the classic `(1 << 24) + (r << 16) + (g << 8) + b`
/// trick: the leading 1 guarantees six hex digits, then gets sliced off.
pub fn hex_color(r: u8, g: u8, b: u8) -> String {
    let packed = (1u32 << 24) + (u32::from(r) << 16) + (u32::from(g) << 8) + u32::from(b);
    let digits = format!("{packed:x}");
    format!("#{}", &digits[1..])
}

/// Cells per magnifier side.
fn grid_cells() -> i64 {
    (MAGNIFIER_SIZE / PIXEL_SIZE) as i64
}

/// Top-left corner of the sampled neighborhood. Clamped to zero near the
/// origin; the far edge is left unclamped, so cells past it read back as
/// transparent.
fn neighborhood_start(coord: i64, cells: i64) -> i64 {
    (coord - cells / 2).max(0)
}

/// The color-picking overlay: samples the pixel under the pointer, paints a
/// magnified preview of its neighborhood, and reports the sample on click.
///
/// Holds no state beyond the current hover sample and its notice; every
/// hover frame recomputes the sample and the grid from scratch.
pub struct ColorDropper {
    sample: Option<Sample>,
    notice: Notice,
}

impl ColorDropper {
    pub fn new() -> Self {
        Self {
            sample: None,
            notice: Notice::new(),
        }
    }

    pub fn has_notice(&self, now: f64) -> bool {
        self.notice.is_visible(now)
    }

    /// Run the overlay for one frame over the displayed image. `image_rect`
    /// is where the surface is drawn on screen, at 1:1 pixel scale. Returns
    /// the sampled color when the user picks it with a click.
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        surface: &ImageSurface,
        image_rect: Rect,
        response: &Response,
    ) -> Option<Sample> {
        let now = ui.input(|i| i.time);
        let mut picked = None;

        match response.hover_pos() {
            Some(pointer) => {
                // Pointer position relative to the surface's on-screen origin.
                let local = pointer - image_rect.min;
                let x = local.x.floor() as i64;
                let y = local.y.floor() as i64;

                let [r, g, b, _] = surface.pixel(x, y);
                let sample = Sample::from_rgb(r, g, b);
                self.sample = Some(sample.clone());

                // Only pick when a color is currently sampled.
                if response.clicked() {
                    picked = self.sample.clone();
                    if picked.is_some() {
                        self.notice.show("Color copied!", now, COPY_NOTICE_SECS);
                    }
                }

                self.paint_magnifier(ui, surface, pointer, x, y, &sample);
                if let Some(text) = self.notice.current(now).map(str::to_owned) {
                    paint_notice(ui, pointer, &text);
                }
            }
            None => self.sample = None,
        }

        picked
    }

    // Paint the square N x N grid of neighborhood pixels centered on the
    // pointer, with the current hex value over it.
    fn paint_magnifier(
        &self,
        ui: &Ui,
        surface: &ImageSurface,
        pointer: Pos2,
        x: i64,
        y: i64,
        sample: &Sample,
    ) {
        let painter = ui.painter();
        let cells = grid_cells();
        let start_x = neighborhood_start(x, cells);
        let start_y = neighborhood_start(y, cells);

        let mag_rect = Rect::from_center_size(pointer, Vec2::splat(MAGNIFIER_SIZE));
        let cell_border = Stroke::new(1.0, Color32::from_black_alpha(76));

        for i in 0..cells {
            for j in 0..cells {
                let [r, g, b, a] = surface.pixel(start_x + i, start_y + j);
                let cell = Rect::from_min_size(
                    mag_rect.min + egui::vec2(i as f32 * PIXEL_SIZE, j as f32 * PIXEL_SIZE),
                    Vec2::splat(PIXEL_SIZE),
                );
                painter.rect_filled(cell, 0.0, Color32::from_rgba_unmultiplied(r, g, b, a));
                painter.rect_stroke(cell, 0.0, cell_border);
            }
        }

        painter.rect_stroke(mag_rect, 0.0, Stroke::new(2.0, sample.color));

        // Hex readout over the grid center.
        let label_rect = Rect::from_center_size(mag_rect.center(), egui::vec2(64.0, 16.0));
        painter.rect_filled(label_rect, 3.0, Color32::from_white_alpha(190));
        painter.text(
            label_rect.center(),
            Align2::CENTER_CENTER,
            &sample.hex,
            FontId::monospace(11.0),
            Color32::BLACK,
        );
    }
}

// "Color copied!" bubble to the right of the magnifier.
fn paint_notice(ui: &Ui, pointer: Pos2, text: &str) {
    let painter = ui.painter();
    let anchor = pointer + egui::vec2(MAGNIFIER_SIZE / 2.0 + 10.0, 0.0);
    let galley = painter.layout_no_wrap(
        text.to_owned(),
        FontId::proportional(12.0),
        Color32::WHITE,
    );
    let rect = Align2::LEFT_CENTER.anchor_rect(Rect::from_min_size(anchor, galley.size()));
    painter.rect_filled(rect.expand(4.0), 4.0, Color32::from_black_alpha(200));
    painter.galley(rect.min, galley);
}
