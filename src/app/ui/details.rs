use eframe::egui::{self, RichText, Ui};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let selected = self.cloud.selected();
        if selected.is_empty() {
            ui.label("Click a word to select it, ctrl-click to add to the selection.");
        } else {
            egui::ScrollArea::vertical()
                .id_salt("selected_words_scroll")
                .max_height(180.0)
                .show(ui, |ui| {
                    for word in &selected {
                        ui.label(format!("{}  ({}px)", word.text(), word.font_size()));
                    }
                });
            if self.cloud.control_pressed() {
                ui.small("last pick used ctrl");
            }
        }

        ui.separator();
        ui.label(RichText::new("Related words").strong());
        let related = self
            .cloud
            .words()
            .filter(|word| word.is_related())
            .map(|word| word.text().to_owned())
            .collect::<Vec<_>>();
        if self.cloud.has_pending_request() {
            ui.label("Waiting for the thesaurus...");
        } else if related.is_empty() {
            ui.label("No related words in the cloud.");
        } else {
            for text in related {
                ui.label(text);
            }
        }

        ui.separator();
        ui.label(RichText::new("Highlighted").strong());
        let highlighted = self
            .cloud
            .words()
            .filter(|word| word.is_highlighted())
            .map(|word| word.text())
            .collect::<Vec<_>>()
            .join(", ");
        ui.label(if highlighted.is_empty() {
            "none".to_owned()
        } else {
            highlighted
        });

        ui.separator();
        ui.label(RichText::new("Activated (double click)").strong());
        if self.activations.is_empty() {
            ui.label("Nothing activated yet.");
        }
        for activation in &self.activations {
            match activation {
                Some(text) => ui.label(text.as_str()),
                None => ui.weak("empty area"),
            };
        }
    }
}
