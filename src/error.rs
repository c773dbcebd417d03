use thiserror::Error;

use crate::cloud::{RequestToken, WordId};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CloudError {
    #[error("a word with text {0:?} already exists")]
    DuplicateWord(String),

    #[error("word {0:?} is not part of the cloud")]
    NotFound(WordId),

    #[error("no word with text {0:?}")]
    TextNotFound(String),

    #[error("related-words response {token:?} superseded by {latest:?}")]
    StaleResponse {
        token: RequestToken,
        latest: Option<RequestToken>,
    },

    #[error("all words share the same size")]
    DegenerateRange,
}
