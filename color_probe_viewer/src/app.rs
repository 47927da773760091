// The window owns the decoded image and the last `Report`. Every frame it renders
// the report's message and swatch; clicks and buttons only ever replace the report.

use std::path::{Path, PathBuf};

use color_probe::{ClickPoint, Color, ColorProbe, DisplayGeometry, ProbeConfig, RasterImage, Report};
use egui::{Color32, ColorImage, Context, Pos2, Rect, Sense, Stroke, TextureHandle, TextureOptions, Vec2};

const SWATCH_SIZE: f32 = 100.0;

pub struct ColorProbeApp {
    probe: ColorProbe,
    image: Option<RasterImage>,
    texture: Option<TextureHandle>,
    path_input: String,
    report: Report,
    /// Last successful color; misses and failures leave it untouched.
    swatch: Color,
}

impl ColorProbeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ProbeConfig, initial_path: Option<PathBuf>) -> Self {
        let mut app = Self {
            probe: ColorProbe::new(config),
            image: None,
            texture: None,
            path_input: String::new(),
            report: Report::Idle,
            swatch: Color::WHITE,
        };
        if let Some(path) = initial_path {
            app.path_input = path.display().to_string();
            app.load_path(&path);
        }
        app
    }

    fn load_path(&mut self, path: &Path) {
        let loaded = std::fs::read(path)
            .map_err(color_probe::ProbeError::from)
            .and_then(|bytes| self.probe.load(&bytes));

        match loaded {
            Ok(image) => {
                log::info!(
                    "Image loaded. You can now click it. ({}, {}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                );
                self.image = Some(image);
                self.texture = None;
                self.report = Report::Idle;
            }
            Err(err) => {
                log::warn!("could not load {}: {}", path.display(), err);
                self.report = Report::from(&err);
            }
        }
    }

    fn apply(&mut self, report: Report) {
        if let Some(color) = report.swatch() {
            self.swatch = color;
        }
        self.report = report;
    }

    fn ensure_texture(&mut self, ctx: &Context) {
        if self.texture.is_some() {
            return;
        }
        if let Some(ref image) = self.image {
            let color_image = ColorImage::from_rgba_unmultiplied(
                [image.width() as usize, image.height() as usize],
                image.as_raw(),
            );
            self.texture = Some(ctx.load_texture("color_probe_image", color_image, TextureOptions::LINEAR));
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.label(self.report.message());
        ui.horizontal(|ui| {
            let field = ui.text_edit_singleline(&mut self.path_input);
            let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Load image").clicked() || submitted {
                let path = PathBuf::from(self.path_input.trim());
                self.load_path(&path);
            }
            let has_image = self.image.is_some();
            if ui.add_enabled(has_image, egui::Button::new("Dominant color")).clicked() {
                if let Some(ref image) = self.image {
                    let report = self.probe.dominant(image);
                    self.apply(report);
                }
            }
        });
    }

    fn render_image(&mut self, ui: &mut egui::Ui) {
        let (area, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let Some(ref texture) = self.texture else {
            return;
        };
        let image_rect = contain(area, texture.size_vec2());

        let painter = ui.painter_at(area);
        painter.image(
            texture.id(),
            image_rect,
            Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
        painter.rect_stroke(image_rect, 0.0, Stroke::new(1.0, Color32::GRAY));

        if response.clicked() {
            if let (Some(pos), Some(image)) = (response.interact_pointer_pos(), self.image.as_ref()) {
                let (display, click) = to_display_space(image_rect, pos);
                let report = self.probe.click(image, display, click);
                self.apply(report);
            }
        }
    }

    fn render_swatch(&self, ui: &mut egui::Ui) {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(SWATCH_SIZE), Sense::hover());
        let Color { red, green, blue, .. } = self.swatch;
        ui.painter().rect_filled(rect, 0.0, Color32::from_rgb(red, green, blue));
        ui.painter().rect_stroke(rect, 0.0, Stroke::new(1.0, Color32::DARK_GRAY));
    }
}

impl eframe::App for ColorProbeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let dropped: Option<PathBuf> = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
        if let Some(path) = dropped {
            self.path_input = path.display().to_string();
            self.load_path(&path);
        }

        self.ensure_texture(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.render_controls(ui);
        });
        egui::TopBottomPanel::bottom("swatch").show(ctx, |ui| {
            self.render_swatch(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_image(ui);
        });
    }
}

/// Largest rect with the texture's aspect ratio that fits inside `area`, centered.
fn contain(area: Rect, texture_size: Vec2) -> Rect {
    if texture_size.x <= 0.0 || texture_size.y <= 0.0 {
        return Rect::from_center_size(area.center(), Vec2::ZERO);
    }
    let scale = (area.width() / texture_size.x).min(area.height() / texture_size.y);
    Rect::from_center_size(area.center(), texture_size * scale)
}

/// The rendered size of the image and a pointer position relative to its top-left corner.
fn to_display_space(image_rect: Rect, pointer: Pos2) -> (DisplayGeometry, ClickPoint) {
    let local = pointer - image_rect.min;
    (
        DisplayGeometry::new(image_rect.width(), image_rect.height()),
        ClickPoint::new(local.x, local.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contain_letterboxes_wide_images() {
        let area = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(400.0, 400.0));
        let fitted = contain(area, Vec2::new(800.0, 400.0));
        assert_eq!(fitted.size(), Vec2::new(400.0, 200.0));
        assert_eq!(fitted.min, Pos2::new(0.0, 100.0));
    }

    #[test]
    fn contain_scales_small_images_up() {
        let area = Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::new(300.0, 600.0));
        let fitted = contain(area, Vec2::new(50.0, 50.0));
        assert_eq!(fitted.size(), Vec2::new(300.0, 300.0));
    }

    #[test]
    fn pointer_is_made_relative_to_the_image() {
        let image_rect = Rect::from_min_size(Pos2::new(0.0, 100.0), Vec2::new(400.0, 200.0));
        let (display, click) = to_display_space(image_rect, Pos2::new(20.0, 110.0));
        assert_eq!(display, DisplayGeometry::new(400.0, 200.0));
        assert_eq!(click, ClickPoint::new(20.0, 10.0));
    }

    #[test]
    fn letterbox_clicks_become_misses() {
        let image = RasterImage::new(800, 400);
        let image_rect = Rect::from_min_size(Pos2::new(0.0, 100.0), Vec2::new(400.0, 200.0));
        let (display, click) = to_display_space(image_rect, Pos2::new(20.0, 50.0));
        let report = ColorProbe::default().click(&image, display, click);
        assert_eq!(report, Report::OutsideImage);
    }
}
