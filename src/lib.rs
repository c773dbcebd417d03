pub mod cloud;
pub mod data;
pub mod error;
pub mod layout;
pub mod render;
pub mod thesaurus;

pub use cloud::{CloudConfig, CloudEvent, RequestToken, Word, WordCloud, WordId};
pub use error::CloudError;
pub use layout::{FlowLayout, LayoutStyle};
