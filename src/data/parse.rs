use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::thesaurus::Thesaurus;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordEntry {
    pub text: String,
    pub size: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawWord {
    text: String,
    #[serde(default)]
    size: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawWordList {
    Entries(Vec<RawWord>),
    Sizes(BTreeMap<String, u32>),
}

/// Accepts `[{"text": "...", "size": 14}, ...]` or `{"word": 14, ...}`.
pub fn parse_word_list(raw: &str) -> Result<Vec<WordEntry>> {
    let parsed: RawWordList =
        serde_json::from_str(raw).context("word list must be an array of words or a text-to-size map")?;

    let entries = match parsed {
        RawWordList::Entries(words) => words
            .into_iter()
            .map(|word| WordEntry {
                text: word.text.trim().to_owned(),
                size: word.size,
            })
            .collect::<Vec<_>>(),
        RawWordList::Sizes(sizes) => sizes
            .into_iter()
            .map(|(text, size)| WordEntry {
                text: text.trim().to_owned(),
                size: Some(size),
            })
            .collect(),
    };

    if let Some(blank) = entries.iter().position(|entry| entry.text.is_empty()) {
        return Err(anyhow!("word list entry {blank} has no text"));
    }

    Ok(entries)
}

/// Accepts `{"word": ["related", ...], ...}`.
pub fn parse_thesaurus(raw: &str) -> Result<Thesaurus> {
    let parsed: BTreeMap<String, Vec<String>> =
        serde_json::from_str(raw).context("thesaurus must map words to arrays of related words")?;

    let mut thesaurus = Thesaurus::new();
    for (word, related) in parsed {
        thesaurus.insert(&word, related);
    }
    Ok(thesaurus)
}
