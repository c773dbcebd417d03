use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use super::parse::{WordEntry, parse_thesaurus, parse_word_list};
use crate::thesaurus::Thesaurus;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedSource {
    pub words: Option<PathBuf>,
    pub thesaurus: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CloudSeed {
    pub words: Vec<WordEntry>,
    pub highlighted: Vec<String>,
    pub thesaurus: Thesaurus,
}

pub fn load_seed(source: &SeedSource) -> Result<CloudSeed> {
    let demo = demo_seed();

    let (words, highlighted) = match &source.words {
        Some(path) => (parse_word_list(&read(path)?)?, Vec::new()),
        None => (demo.words, demo.highlighted),
    };
    let thesaurus = match &source.thesaurus {
        Some(path) => parse_thesaurus(&read(path)?)
            .with_context(|| format!("invalid thesaurus file {}", path.display()))?,
        None => demo.thesaurus,
    };

    info!(
        words = words.len(),
        thesaurus_entries = thesaurus.len(),
        "cloud seed loaded"
    );
    Ok(CloudSeed {
        words,
        highlighted,
        thesaurus,
    })
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn demo_seed() -> CloudSeed {
    let words = [
        ("Hello", 30),
        ("world", 24),
        ("UTD", 16),
        ("Cong", 22),
        ("Computer Science", 14),
        ("Software", 18),
        ("Visualization", 26),
    ]
    .into_iter()
    .map(|(text, size)| WordEntry {
        text: text.to_owned(),
        size: Some(size),
    })
    .collect();

    let mut thesaurus = Thesaurus::new();
    thesaurus.insert("hello", ["world", "greeting"]);
    thesaurus.insert("world", ["Hello", "globe"]);
    thesaurus.insert("software", ["Computer Science", "program"]);
    thesaurus.insert("computer science", ["Software", "Visualization"]);
    thesaurus.insert("visualization", ["Computer Science", "picture"]);
    thesaurus.insert("utd", ["Cong"]);
    thesaurus.insert("cong", ["UTD"]);

    CloudSeed {
        words,
        highlighted: vec!["UTD".to_owned(), "Hello".to_owned()],
        thesaurus,
    }
}
