mod app;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use word_cloud::CloudConfig;
use word_cloud::data::SeedSource;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON word list: `[{"text": .., "size": ..}]` or `{"text": size}`.
    #[arg(long)]
    words: Option<PathBuf>,
    /// JSON table of related words: `{"word": ["related", ..]}`.
    #[arg(long)]
    thesaurus: Option<PathBuf>,
    #[arg(long, default_value_t = 12)]
    min_font: u32,
    #[arg(long, default_value_t = 24)]
    max_font: u32,
    #[arg(long, default_value_t = 10)]
    related_timeout_secs: u64,
}

impl Args {
    fn cloud_config(&self) -> CloudConfig {
        CloudConfig {
            min_font: self.min_font,
            max_font: self.max_font,
            default_size: self.min_font,
            related_timeout: Duration::from_secs(self.related_timeout_secs),
            ..CloudConfig::default()
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = args.cloud_config();
    let source = SeedSource {
        words: args.words,
        thesaurus: args.thesaurus,
    };
    tracing::info!(?source, "starting word cloud");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1180.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "word-cloud",
        options,
        Box::new(move |cc| Ok(Box::new(app::WordCloudApp::new(cc, source, config)))),
    )
}
