use tracing::debug;

use crate::error::CloudError;
use crate::render::TextMeasure;

use super::{WordCloud, WordId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeRange {
    pub min: u32,
    pub max: u32,
}

impl SizeRange {
    pub fn new(min: u32, max: u32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn remap(self, size: u32, observed_min: u32, observed_max: u32) -> Result<u32, CloudError> {
        if observed_max <= observed_min {
            return Err(CloudError::DegenerateRange);
        }

        let span = u64::from(self.max - self.min);
        let offset = u64::from(size.clamp(observed_min, observed_max) - observed_min);
        let observed_span = u64::from(observed_max - observed_min);
        Ok(self.min + (span * offset / observed_span) as u32)
    }
}

impl WordCloud {
    pub fn size_range(&self) -> SizeRange {
        SizeRange::new(self.config.min_font, self.config.max_font)
    }

    /// Takes effect on the next `normalize_sizes` call.
    pub fn set_size_range(&mut self, min: u32, max: u32) {
        let range = SizeRange::new(min, max);
        self.config.min_font = range.min;
        self.config.max_font = range.max;
    }

    /// Returns the number of words whose size changed.
    pub fn normalize_sizes(&mut self) -> usize {
        let sizes = self.words.values().map(|word| word.font_size);
        let (Some(observed_min), Some(observed_max)) = (sizes.clone().min(), sizes.max()) else {
            return 0;
        };

        let range = self.size_range();
        if observed_min == observed_max {
            debug!(size = observed_min, "all words share one size, using range maximum");
        }

        let mut changed = 0;
        for word in self.words.values_mut() {
            let size = range
                .remap(word.font_size, observed_min, observed_max)
                .unwrap_or(range.max);
            if size != word.font_size {
                word.font_size = size;
                self.layout
                    .set_size_hint(word.id, self.measure.measure(&word.text, size));
                changed += 1;
            }
        }

        if changed > 0 {
            self.relayout();
        }
        debug!(changed, ?range, "sizes normalized");
        changed
    }

    pub fn set_word_size(&mut self, id: WordId, size: u32) -> Result<(), CloudError> {
        let word = self.words.get_mut(&id).ok_or(CloudError::NotFound(id))?;
        word.font_size = size;
        self.layout
            .set_size_hint(id, self.measure.measure(&word.text, size));
        self.relayout();
        Ok(())
    }
}
