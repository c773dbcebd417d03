use std::time::{Duration, Instant};

use eframe::egui::{
    self, Align2, Color32, FontId, Painter, PointerButton, Sense, Shape, Ui, Vec2, vec2,
};
use word_cloud::{CloudEvent, LayoutStyle};
use word_cloud::render::{DrawCommand, TextMeasure, outline_points, render_word};

use super::ViewModel;

const ACTIVATION_HISTORY: usize = 8;
const DASH_LENGTH: f32 = 6.0;
const DASH_GAP: f32 = 3.0;

struct PainterMeasure {
    painter: Painter,
}

impl TextMeasure for PainterMeasure {
    fn measure(&self, text: &str, font_size: u32) -> Vec2 {
        self.painter
            .layout_no_wrap(
                text.to_owned(),
                FontId::proportional(font_size as f32),
                Color32::BLACK,
            )
            .size()
    }
}

fn paint(painter: &Painter, command: DrawCommand) {
    match command {
        DrawCommand::FillRect { rect, color } => {
            painter.rect_filled(rect, 0.0, color);
        }
        DrawCommand::StrokeRect {
            rect,
            stroke,
            dashed: true,
        } => {
            painter.extend(Shape::dashed_line(
                &outline_points(rect),
                stroke,
                DASH_LENGTH,
                DASH_GAP,
            ));
        }
        DrawCommand::StrokeRect {
            rect,
            stroke,
            dashed: false,
        } => {
            painter.add(Shape::closed_line(outline_points(rect).to_vec(), stroke));
        }
        DrawCommand::Text {
            origin,
            text,
            font_size,
            color,
        } => {
            painter.text(
                origin,
                Align2::LEFT_TOP,
                text,
                FontId::proportional(font_size as f32),
                color,
            );
        }
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_cloud(&mut self, ui: &mut Ui) {
        self.cloud.tick(Instant::now());

        egui::ScrollArea::vertical()
            .id_salt("cloud_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let width = ui.available_width();
                if !self.measure_installed {
                    self.cloud.set_measure(Box::new(PainterMeasure {
                        painter: ui.painter().clone(),
                    }));
                    self.measure_installed = true;
                }
                let spacing = ui.spacing().item_spacing;
                self.cloud.set_layout_style(LayoutStyle {
                    horizontal_spacing: spacing.x,
                    vertical_spacing: spacing.y,
                });
                let height = self
                    .cloud
                    .height_for_width(width)
                    .max(ui.available_height());

                let (rect, response) = ui.allocate_exact_size(vec2(width, height), Sense::click());
                self.cloud.set_geometry(rect);

                let painter = ui.painter_at(rect);
                painter.rect_filled(rect, 0.0, Color32::WHITE);

                let hovered = response
                    .hover_pos()
                    .and_then(|pos| self.cloud.word_at(pos));
                if hovered.is_some() {
                    ui.output_mut(|output| {
                        output.cursor_icon = egui::CursorIcon::PointingHand;
                    });
                }

                if let Some(pos) = response.interact_pointer_pos() {
                    let modifiers = ui.input(|input| input.modifiers);
                    if response.double_clicked() {
                        self.cloud.double_click(pos);
                    } else if response.clicked_by(PointerButton::Primary) {
                        self.cloud.press(pos, PointerButton::Primary, modifiers);
                        self.cloud.release();
                    } else if response.clicked_by(PointerButton::Secondary) {
                        self.cloud.press(pos, PointerButton::Secondary, modifiers);
                        self.cloud.release();
                    }
                }

                for word in self.cloud.words() {
                    let Some(word_rect) = self.cloud.word_rect(word.id()) else {
                        continue;
                    };
                    for command in render_word(word, word_rect, &self.palette) {
                        paint(&painter, command);
                    }
                }
            });

        for event in self.cloud.take_events() {
            match event {
                CloudEvent::WordActivated(text) => {
                    tracing::info!(?text, "word activated");
                    self.activations.push_front(text);
                    self.activations.truncate(ACTIVATION_HISTORY);
                }
            }
        }

        if self.cloud.has_pending_request() {
            ui.ctx().request_repaint_after(Duration::from_millis(50));
        }
    }
}
