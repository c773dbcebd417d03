use eframe::egui::{self, Ui};
use tracing::debug;
use word_cloud::WordId;

use super::super::ViewModel;

const FONT_SLIDER_MIN: u32 = 6;
const FONT_SLIDER_MAX: u32 = 96;

fn parse_highlight_list(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .collect()
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Cloud Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search")
            .on_hover_text("Select every word containing this text, ignoring case.");
        if ui.text_edit_singleline(&mut self.search).changed() {
            self.cloud.search(&self.search);
        }

        ui.add_space(6.0);
        ui.label("Highlight (comma separated)")
            .on_hover_text("Shadow exactly the listed words.");
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.highlight_input);
            if ui.button("Apply").clicked() {
                self.cloud
                    .highlight(parse_highlight_list(&self.highlight_input));
            }
        });

        ui.separator();

        let min_changed = ui
            .add(
                egui::Slider::new(&mut self.min_font, FONT_SLIDER_MIN..=FONT_SLIDER_MAX)
                    .text("Min font"),
            )
            .changed();
        let max_changed = ui
            .add(
                egui::Slider::new(&mut self.max_font, FONT_SLIDER_MIN..=FONT_SLIDER_MAX)
                    .text("Max font"),
            )
            .changed();
        if min_changed || max_changed {
            self.cloud.set_size_range(self.min_font, self.max_font);
        }
        if ui
            .button("Normalize sizes")
            .on_hover_text("Spread the current sizes over the font range.")
            .clicked()
        {
            let changed = self.cloud.normalize_sizes();
            self.status = Some(format!("{changed} word(s) resized"));
        }

        ui.separator();

        ui.label("New word");
        ui.text_edit_singleline(&mut self.new_word);
        ui.add(
            egui::Slider::new(&mut self.new_word_size, FONT_SLIDER_MIN..=FONT_SLIDER_MAX)
                .text("Size"),
        );
        let can_add = !self.new_word.trim().is_empty();
        if ui.add_enabled(can_add, egui::Button::new("Add")).clicked() {
            let text = self.new_word.trim().to_owned();
            match self.cloud.add_word(text, Some(self.new_word_size)) {
                Ok(_) => {
                    self.new_word.clear();
                    self.status = None;
                }
                Err(error) => self.status = Some(error.to_string()),
            }
        }

        ui.separator();

        let selected = self
            .cloud
            .selected()
            .into_iter()
            .map(|word| word.id())
            .collect::<Vec<WordId>>();

        ui.label(format!("Selection ({})", selected.len()));
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.rename_input);
            let can_rename = selected.len() == 1 && !self.rename_input.trim().is_empty();
            if ui
                .add_enabled(can_rename, egui::Button::new("Rename"))
                .on_hover_text("Rename the single selected word.")
                .clicked()
                && let [id] = selected.as_slice()
            {
                let new_text = self.rename_input.trim().to_owned();
                match self.cloud.rename_word(*id, new_text) {
                    Ok(()) => {
                        self.rename_input.clear();
                        self.status = None;
                    }
                    Err(error) => self.status = Some(error.to_string()),
                }
            }
        });

        if let [id] = selected.as_slice()
            && let Some(mut size) = self.cloud.word(*id).map(|word| word.font_size())
        {
            let slider =
                egui::Slider::new(&mut size, FONT_SLIDER_MIN..=FONT_SLIDER_MAX).text("Word size");
            if ui.add(slider).changed()
                && let Err(error) = self.cloud.set_word_size(*id, size)
            {
                debug!(%error, "resize skipped");
            }
        }

        if ui
            .add_enabled(!selected.is_empty(), egui::Button::new("Remove selected"))
            .clicked()
        {
            for id in &selected {
                if let Err(error) = self.cloud.remove_word(*id) {
                    debug!(%error, "remove skipped");
                }
            }
        }

        if let Some(status) = &self.status {
            ui.add_space(6.0);
            ui.label(status.as_str());
        }
    }
}
