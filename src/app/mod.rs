use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use word_cloud::data::{CloudSeed, SeedSource, load_seed};
use word_cloud::render::Palette;
use word_cloud::{CloudConfig, WordCloud};

mod canvas;
mod ui;

pub struct WordCloudApp {
    source: SeedSource,
    config: CloudConfig,
    state: AppState,
    reload_rx: Option<Receiver<Result<CloudSeed, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<CloudSeed, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    cloud: WordCloud,
    palette: Palette,
    search: String,
    highlight_input: String,
    new_word: String,
    new_word_size: u32,
    rename_input: String,
    min_font: u32,
    max_font: u32,
    activations: VecDeque<Option<String>>,
    status: Option<String>,
    measure_installed: bool,
}

impl WordCloudApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, source: SeedSource, config: CloudConfig) -> Self {
        let state = Self::start_load(source.clone());
        Self {
            source,
            config,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(source: SeedSource) -> Receiver<Result<CloudSeed, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_seed(&source).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: SeedSource) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }

    fn ready_state(&self, seed: CloudSeed) -> AppState {
        match ViewModel::new(seed, self.config.clone()) {
            Ok(model) => AppState::Ready(Box::new(model)),
            Err(error) => AppState::Error(format!("{error:#}")),
        }
    }
}

impl eframe::App for WordCloudApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => transition = Some(result),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading words...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the word cloud");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Retry").clicked();
                });
                if retry {
                    self.state = Self::start_load(self.source.clone());
                    return;
                }
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.source.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = match result {
                Ok(seed) => self.ready_state(seed),
                Err(error) => AppState::Error(error),
            };
        }
    }
}
