use crate::dropper::{ColorDropper, Sample};
use crate::loader::ImageLoader;
use crate::surface::ImageSurface;
use crate::ui::Notice;
use clipboard::ClipboardContext;
use clipboard::ClipboardProvider;
use egui::{Color32, Context, CursorIcon, Rect, Sense, Stroke, Ui};
use egui_extras::RetainedImage;

/// How long the page-level clipboard notice stays up.
const CLIPBOARD_NOTICE_SECS: f64 = 3.0;

pub struct DropperApp {
    surface: Option<ImageSurface>,
    display: Option<RetainedImage>,
    picker_active: bool,
    selected: Option<Sample>,
    dropper: ColorDropper,
    notice: Notice,
    load_error: Option<String>,
    loader: ImageLoader,
    clipboard: Option<ClipboardContext>,
}

impl Default for DropperApp {
    fn default() -> Self {
        Self {
            surface: None,
            display: None,
            picker_active: false,
            selected: None,
            dropper: ColorDropper::new(),
            notice: Notice::new(),
            load_error: None,
            loader: ImageLoader::new(),
            clipboard: None,
        }
    }
}

// Main implementation of the color dropper app
impl DropperApp {
    // Initialize the app with default settings
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        cc.egui_ctx.set_style(style);

        Self {
            clipboard: ClipboardProvider::new().ok(),
            ..Self::default()
        }
    }

    pub fn copy_to_clipboard(&mut self, text: String) -> bool {
        if let Some(clipboard) = &mut self.clipboard {
            clipboard.set_contents(text).is_ok()
        } else {
            false
        }
    }

    // Swap in a freshly decoded image, dropping the old surface and texture
    // together so nothing of the previous image can remain visible.
    fn install_surface(&mut self, surface: ImageSurface) {
        self.display = Some(
            RetainedImage::from_color_image("uploaded image", surface.color_image())
                .with_options(egui::TextureOptions::NEAREST),
        );
        self.surface = Some(surface);
        self.load_error = None;
    }

    fn pick_color(&mut self, sample: Sample, now: f64) {
        if !self.picker_active {
            return;
        }

        if self.copy_to_clipboard(sample.hex.clone()) {
            self.notice
                .show("Color copied to clipboard!", now, CLIPBOARD_NOTICE_SECS);
        } else {
            tracing::warn!(color = %sample.hex, "could not copy color to clipboard");
        }
        self.selected = Some(sample);
    }

    fn open_image_dialog(&mut self) {
        let file = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg"])
            .pick_file();

        if let Some(path) = file {
            tracing::info!(path = %path.display(), "loading image");
            self.loader.begin_load(path);
        }
    }

    fn draw_top_panel(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Color Dropper");
                ui.separator();

                if ui.button("Open Image…").clicked() {
                    self.open_image_dialog();
                }
                if self.loader.is_pending() {
                    ui.spinner();
                }

                if self.surface.is_some() {
                    let toggle_label = if self.picker_active {
                        "Deactivate Color Picker"
                    } else {
                        "Activate Color Picker"
                    };
                    if ui.button(toggle_label).clicked() {
                        self.picker_active = !self.picker_active;
                    }
                }

                if let Some(selected) = &self.selected {
                    ui.separator();
                    let (swatch, _) = ui.allocate_exact_size(egui::vec2(18.0, 18.0), Sense::hover());
                    ui.painter().rect_filled(swatch, 4.0, selected.color);
                    ui.painter().rect_stroke(swatch, 4.0, Stroke::new(1.0, Color32::GRAY));
                    ui.monospace(&selected.hex);
                }

                let now = ui.input(|i| i.time);
                if let Some(text) = self.notice.current(now).map(str::to_owned) {
                    ui.separator();
                    ui.label(text);
                }

                if let Some(error) = &self.load_error {
                    ui.separator();
                    ui.colored_label(ui.visuals().error_fg_color, error);
                }
            });
        });
    }

    // Draw the image at its natural 1:1 pixel size and run the overlay on
    // top of it while the picker is active.
    fn draw_image(&mut self, ui: &mut Ui) {
        if self.surface.is_none() {
            ui.centered_and_justified(|ui| {
                ui.label("Open an image to start picking colors");
            });
            return;
        }

        egui::ScrollArea::both().show(ui, |ui| {
            let (display, surface) = match (&self.display, &self.surface) {
                (Some(display), Some(surface)) => (display, surface),
                _ => return,
            };

            let size = display.size_vec2();
            let (image_rect, response) = ui.allocate_exact_size(size, Sense::click());
            ui.painter().image(
                display.texture_id(ui.ctx()),
                image_rect,
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );

            if self.picker_active {
                let response = response.on_hover_cursor(CursorIcon::Crosshair);
                if let Some(sample) = self.dropper.ui(ui, surface, image_rect, &response) {
                    let now = ui.input(|i| i.time);
                    self.pick_color(sample, now);
                }
            }
        });
    }
}

// Implement the main update loop for the app
impl eframe::App for DropperApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if let Some(outcome) = self.loader.poll() {
            match outcome {
                Ok(surface) => self.install_surface(surface),
                Err(error) => {
                    tracing::warn!("image decode failed: {error:#}");
                    self.load_error = Some(format!("Could not load image: {error}"));
                }
            }
        }

        self.draw_top_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_image(ui);
        });

        // Keep frames coming while a decode is in flight or a notice still
        // has to expire.
        let now = ctx.input(|i| i.time);
        if self.loader.is_pending() || self.notice.is_visible(now) || self.dropper.has_notice(now)
        {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
