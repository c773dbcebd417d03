use std::collections::VecDeque;

use anyhow::Result;
use eframe::egui::{self, Align, Context, Layout};
use tracing::debug;
use word_cloud::data::CloudSeed;
use word_cloud::render::Palette;
use word_cloud::thesaurus::ThesaurusWorker;
use word_cloud::{CloudConfig, WordCloud};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(seed: CloudSeed, config: CloudConfig) -> Result<Self> {
        let worker = ThesaurusWorker::spawn(seed.thesaurus)?;
        let mut cloud = WordCloud::new(config).with_lookup(Box::new(worker));

        for entry in seed.words {
            if let Err(error) = cloud.add_word(entry.text, entry.size) {
                debug!(%error, "skipping word from seed");
            }
        }
        cloud.highlight(&seed.highlighted);

        let range = cloud.size_range();
        Ok(Self {
            palette: Palette::default(),
            search: String::new(),
            highlight_input: seed.highlighted.join(", "),
            new_word: String::new(),
            new_word_size: range.min,
            rename_input: String::new(),
            min_font: range.min,
            max_font: range.max,
            activations: VecDeque::new(),
            status: None,
            measure_installed: false,
            cloud,
        })
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("word cloud");
                    ui.separator();
                    ui.label(format!("words: {}", self.cloud.len()));
                    ui.label(format!("selected: {}", self.cloud.selected().len()));
                    ui.label(format!(
                        "font range: {}..{}",
                        self.cloud.size_range().min,
                        self.cloud.size_range().max
                    ));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload words"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.cloud.has_pending_request() {
                            ui.spinner();
                            ui.label("looking up related words");
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading words...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_cloud(ui);
            }
        });
    }
}
