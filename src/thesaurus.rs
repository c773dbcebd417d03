use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::cloud::RequestToken;

/// Related-words collaborator of a [`crate::WordCloud`].
///
/// `request` must not block; answers are handed back from `poll`, which the
/// cloud calls once per tick.
pub trait RelatedLookup {
    fn request(&mut self, token: RequestToken, word: &str);

    fn poll(&mut self) -> Vec<RelatedResponse> {
        Vec::new()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedResponse {
    pub token: RequestToken,
    pub words: HashSet<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Thesaurus {
    // lowercased keys
    entries: HashMap<String, Vec<String>>,
}

impl Thesaurus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<I, S>(&mut self, word: &str, related: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(word.to_lowercase())
            .or_default()
            .extend(related.into_iter().map(Into::into));
    }

    pub fn related(&self, word: &str) -> HashSet<String> {
        self.entries
            .get(&word.to_lowercase())
            .map(|related| related.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct ThesaurusWorker {
    requests: Sender<(RequestToken, String)>,
    responses: Receiver<RelatedResponse>,
}

impl ThesaurusWorker {
    pub fn spawn(thesaurus: Thesaurus) -> Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<(RequestToken, String)>();
        let (response_tx, response_rx) = mpsc::channel();

        thread::Builder::new()
            .name("thesaurus".to_owned())
            .spawn(move || {
                for (token, word) in request_rx {
                    let words = thesaurus.related(&word);
                    debug!(token = token.0, %word, found = words.len(), "thesaurus lookup");
                    if response_tx.send(RelatedResponse { token, words }).is_err() {
                        break;
                    }
                }
            })
            .context("failed to spawn thesaurus worker thread")?;

        Ok(Self {
            requests: request_tx,
            responses: response_rx,
        })
    }
}

impl RelatedLookup for ThesaurusWorker {
    fn request(&mut self, token: RequestToken, word: &str) {
        if self.requests.send((token, word.to_owned())).is_err() {
            warn!(token = token.0, "thesaurus worker is gone, request dropped");
        }
    }

    fn poll(&mut self) -> Vec<RelatedResponse> {
        let mut responses = Vec::new();
        loop {
            match self.responses.try_recv() {
                Ok(response) => responses.push(response),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("thesaurus worker disconnected");
                    break;
                }
            }
        }
        responses
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    fn animals() -> Thesaurus {
        let mut thesaurus = Thesaurus::new();
        thesaurus.insert("Cat", ["kitten", "feline"]);
        thesaurus.insert("dog", ["puppy"]);
        thesaurus
    }

    #[test]
    fn lookup_ignores_case_of_key() {
        let thesaurus = animals();
        assert_eq!(
            thesaurus.related("CAT"),
            HashSet::from(["kitten".to_owned(), "feline".to_owned()])
        );
        assert!(thesaurus.related("bird").is_empty());
        assert_eq!(thesaurus.len(), 2);
    }

    #[test]
    fn worker_answers_in_background() {
        let mut worker = ThesaurusWorker::spawn(animals()).expect("spawn worker");
        worker.request(RequestToken(1), "dog");
        worker.request(RequestToken(2), "cat");

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut responses = Vec::new();
        while responses.len() < 2 && Instant::now() < deadline {
            responses.extend(worker.poll());
            thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].token, RequestToken(1));
        assert_eq!(responses[0].words, HashSet::from(["puppy".to_owned()]));
        assert_eq!(responses[1].token, RequestToken(2));
    }
}
