use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, warn};

use crate::error::CloudError;

use super::WordCloud;

/// Sequence number attached to each related-words request. Only the most
/// recent token issued by a cloud is honoured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

#[derive(Clone, Debug)]
pub(super) struct InFlight {
    token: RequestToken,
    word: String,
    issued_at: Instant,
}

impl WordCloud {
    pub(super) fn request_related(&mut self, word: &str) -> RequestToken {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.in_flight = Some(InFlight {
            token,
            word: word.to_owned(),
            issued_at: Instant::now(),
        });

        if let Some(lookup) = self.lookup.as_mut() {
            lookup.request(token, word);
        }
        debug!(token = token.0, %word, "related words requested");
        token
    }

    pub fn latest_request(&self) -> Option<RequestToken> {
        (self.next_token > 0).then_some(RequestToken(self.next_token))
    }

    pub fn has_pending_request(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Applies a lookup response if `token` is the outstanding request.
    /// Anything else is stale and leaves the cloud untouched.
    pub fn on_related_response<I, S>(&mut self, token: RequestToken, words: I) -> Result<(), CloudError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let current = self.in_flight.as_ref().map(|pending| pending.token);
        if current != Some(token) {
            warn!(token = token.0, ?current, "discarding stale related-words response");
            return Err(CloudError::StaleResponse {
                token,
                latest: self.latest_request(),
            });
        }

        if let Some(pending) = self.in_flight.take() {
            debug!(token = token.0, word = %pending.word, "related words received");
        }
        self.set_related(words);
        Ok(())
    }

    pub fn set_related<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.unrelate_all();

        let wanted = words
            .into_iter()
            .map(|word| word.as_ref().to_owned())
            .collect::<HashSet<_>>();
        for word in self.words.values_mut() {
            if wanted.contains(&word.text) {
                word.related = true;
            }
        }
    }

    pub(super) fn expire_related(&mut self, now: Instant) {
        let Some(pending) = &self.in_flight else {
            return;
        };
        if now.saturating_duration_since(pending.issued_at) < self.config.related_timeout {
            return;
        }

        warn!(
            token = pending.token.0,
            word = %pending.word,
            "related-words lookup timed out"
        );
        self.in_flight = None;
        self.unrelate_all();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use eframe::egui::{Modifiers, PointerButton, Pos2, Rect, vec2};

    use super::*;
    use crate::cloud::{CloudConfig, Word};
    use crate::thesaurus::{RelatedLookup, RelatedResponse};

    #[derive(Clone, Default)]
    struct Recorder {
        requests: Rc<RefCell<Vec<(RequestToken, String)>>>,
        replies: Rc<RefCell<Vec<RelatedResponse>>>,
    }

    impl RelatedLookup for Recorder {
        fn request(&mut self, token: RequestToken, word: &str) {
            self.requests.borrow_mut().push((token, word.to_owned()));
        }

        fn poll(&mut self) -> Vec<RelatedResponse> {
            std::mem::take(&mut *self.replies.borrow_mut())
        }
    }

    fn cloud_with(words: &[&str], recorder: &Recorder) -> WordCloud {
        let mut cloud =
            WordCloud::new(CloudConfig::default()).with_lookup(Box::new(recorder.clone()));
        for word in words {
            cloud.add_word(*word, None).expect("unique word");
        }
        cloud.set_geometry(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0)));
        cloud
    }

    fn click(cloud: &mut WordCloud, text: &str) {
        let id = cloud.find_word(text).map(Word::id).expect("word exists");
        let pos = cloud.word_rect(id).expect("laid out").center();
        cloud.press(pos, PointerButton::Primary, Modifiers::NONE);
    }

    fn related(cloud: &WordCloud) -> Vec<&str> {
        cloud
            .words()
            .filter(|word| word.is_related())
            .map(Word::text)
            .collect()
    }

    #[test]
    fn click_issues_request_for_clicked_word() {
        let recorder = Recorder::default();
        let mut cloud = cloud_with(&["cat", "dog"], &recorder);

        click(&mut cloud, "dog");
        assert_eq!(
            *recorder.requests.borrow(),
            vec![(RequestToken(1), "dog".to_owned())]
        );
        assert!(cloud.has_pending_request());
    }

    #[test]
    fn fresh_response_replaces_related_set() {
        let recorder = Recorder::default();
        let mut cloud = cloud_with(&["cat", "dog", "kitten", "puppy"], &recorder);

        click(&mut cloud, "cat");
        let token = cloud.latest_request().expect("issued");
        cloud
            .on_related_response(token, ["kitten", "feline"])
            .expect("fresh");
        assert_eq!(related(&cloud), vec!["kitten"]);
        assert!(!cloud.has_pending_request());

        click(&mut cloud, "dog");
        let token = cloud.latest_request().expect("issued");
        cloud.on_related_response(token, ["puppy"]).expect("fresh");
        assert_eq!(related(&cloud), vec!["puppy"]);
    }

    #[test]
    fn superseded_response_is_discarded() {
        let recorder = Recorder::default();
        let mut cloud = cloud_with(&["x", "y", "near-x", "near-y"], &recorder);

        click(&mut cloud, "x");
        let older = cloud.latest_request().expect("issued");
        click(&mut cloud, "y");
        let newer = cloud.latest_request().expect("issued");
        assert!(newer > older);

        let stale = cloud.on_related_response(older, ["near-x"]);
        assert_eq!(
            stale,
            Err(CloudError::StaleResponse {
                token: older,
                latest: Some(newer),
            })
        );
        assert!(related(&cloud).is_empty());

        cloud.on_related_response(newer, ["near-y"]).expect("fresh");
        assert_eq!(related(&cloud), vec!["near-y"]);

        // a repeated delivery of an applied response is also stale
        assert!(cloud.on_related_response(newer, ["x"]).is_err());
        assert_eq!(related(&cloud), vec!["near-y"]);
    }

    #[test]
    fn tick_applies_polled_responses() {
        let recorder = Recorder::default();
        let mut cloud = cloud_with(&["sun", "star", "moon"], &recorder);

        click(&mut cloud, "sun");
        click(&mut cloud, "moon");
        recorder.replies.borrow_mut().extend([
            RelatedResponse {
                token: RequestToken(1),
                words: HashSet::from(["star".to_owned()]),
            },
            RelatedResponse {
                token: RequestToken(2),
                words: HashSet::from(["sun".to_owned()]),
            },
        ]);

        cloud.tick(Instant::now());
        assert_eq!(related(&cloud), vec!["sun"]);
    }

    #[test]
    fn timeout_clears_related_and_retires_token() {
        let recorder = Recorder::default();
        let mut cloud = cloud_with(&["a", "b"], &recorder);
        cloud.set_related(["b"]);

        click(&mut cloud, "a");
        let token = cloud.latest_request().expect("issued");

        cloud.tick(Instant::now());
        assert!(cloud.has_pending_request());

        let timeout = cloud.config().related_timeout;
        cloud.tick(Instant::now() + timeout + Duration::from_millis(1));
        assert!(!cloud.has_pending_request());
        assert!(related(&cloud).is_empty());

        assert!(cloud.on_related_response(token, ["b"]).is_err());
        assert!(related(&cloud).is_empty());
    }
}
