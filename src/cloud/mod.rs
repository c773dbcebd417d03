use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use eframe::egui::Rect;
use tracing::debug;

use crate::error::CloudError;
use crate::layout::{FlowLayout, LayoutItem, LayoutStyle};
use crate::render::{ApproxMeasure, TextMeasure};
use crate::thesaurus::RelatedLookup;

mod interaction;
mod related;
mod sizing;

pub use interaction::Interaction;
pub use related::RequestToken;
pub use sizing::SizeRange;

use related::InFlight;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordId(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
    id: WordId,
    text: String,
    font_size: u32,
    selected: bool,
    highlighted: bool,
    related: bool,
}

impl Word {
    fn new(id: WordId, text: String, font_size: u32) -> Self {
        Self {
            id,
            text,
            font_size,
            selected: false,
            highlighted: false,
            related: false,
        }
    }

    pub fn id(&self) -> WordId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn is_related(&self) -> bool {
        self.related
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CloudConfig {
    pub min_font: u32,
    pub max_font: u32,
    pub default_size: u32,
    pub margin: f32,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    pub related_timeout: Duration,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            min_font: 12,
            max_font: 24,
            default_size: 12,
            margin: 10.0,
            horizontal_spacing: 5.0,
            vertical_spacing: 8.0,
            related_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CloudEvent {
    /// Double click on the cloud; `None` when it landed on empty space.
    WordActivated(Option<String>),
}

pub struct WordCloud {
    config: CloudConfig,
    words: HashMap<WordId, Word>,
    index: BTreeMap<String, WordId>,
    layout: FlowLayout<WordId>,
    measure: Box<dyn TextMeasure>,
    next_id: u64,
    interaction: Interaction,
    control_pressed: bool,
    lookup: Option<Box<dyn RelatedLookup>>,
    next_token: u64,
    in_flight: Option<InFlight>,
    events: Vec<CloudEvent>,
    pending_removal: Vec<Word>,
}

impl WordCloud {
    pub fn new(config: CloudConfig) -> Self {
        let range = SizeRange::new(config.min_font, config.max_font);
        let layout = FlowLayout::new(
            config.margin,
            config.horizontal_spacing,
            config.vertical_spacing,
        );

        Self {
            config: CloudConfig {
                min_font: range.min,
                max_font: range.max,
                ..config
            },
            words: HashMap::new(),
            index: BTreeMap::new(),
            layout,
            measure: Box::new(ApproxMeasure::default()),
            next_id: 0,
            interaction: Interaction::Idle,
            control_pressed: false,
            lookup: None,
            next_token: 0,
            in_flight: None,
            events: Vec::new(),
            pending_removal: Vec::new(),
        }
    }

    pub fn with_lookup(mut self, lookup: Box<dyn RelatedLookup>) -> Self {
        self.set_lookup(lookup);
        self
    }

    pub fn set_lookup(&mut self, lookup: Box<dyn RelatedLookup>) {
        self.lookup = Some(lookup);
    }

    pub fn set_measure(&mut self, measure: Box<dyn TextMeasure>) {
        self.measure = measure;
        for word in self.words.values() {
            self.layout
                .set_size_hint(word.id, self.measure.measure(&word.text, word.font_size));
        }
        self.relayout();
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &Word> + '_ {
        self.index.values().filter_map(|id| self.words.get(id))
    }

    pub fn word(&self, id: WordId) -> Option<&Word> {
        self.words.get(&id)
    }

    pub fn find_word(&self, text: &str) -> Option<&Word> {
        self.index.get(text).and_then(|id| self.words.get(id))
    }

    pub fn selected(&self) -> Vec<&Word> {
        self.words().filter(|word| word.selected).collect()
    }

    pub fn add_word(&mut self, text: impl Into<String>, size: Option<u32>) -> Result<WordId, CloudError> {
        let text = text.into();
        if self.index.contains_key(&text) {
            debug!(%text, "ignoring duplicate word");
            return Err(CloudError::DuplicateWord(text));
        }

        let id = WordId(self.next_id);
        self.next_id += 1;

        let font_size = size.unwrap_or(self.config.default_size);
        self.layout.push(id, self.measure.measure(&text, font_size));
        self.index.insert(text.clone(), id);
        self.words.insert(id, Word::new(id, text, font_size));
        self.sort();

        debug!(id = id.0, font_size, "word added");
        Ok(id)
    }

    /// Detaches the word and parks it until the next [`WordCloud::tick`].
    pub fn remove_word(&mut self, id: WordId) -> Result<(), CloudError> {
        let Some(word) = self.words.remove(&id) else {
            return Err(CloudError::NotFound(id));
        };

        self.index.remove(&word.text);
        self.layout.remove_item(id);
        if self.interaction == Interaction::Selecting(id) {
            self.interaction = Interaction::Idle;
        }
        self.relayout();

        debug!(text = %word.text, "word removed");
        self.pending_removal.push(word);
        Ok(())
    }

    pub fn remove_word_by_text(&mut self, text: &str) -> Result<(), CloudError> {
        let id = self
            .index
            .get(text)
            .copied()
            .ok_or_else(|| CloudError::TextNotFound(text.to_owned()))?;
        self.remove_word(id)
    }

    pub fn rename_word(&mut self, id: WordId, new_text: impl Into<String>) -> Result<(), CloudError> {
        let new_text = new_text.into();
        let Some(word) = self.words.get_mut(&id) else {
            return Err(CloudError::NotFound(id));
        };

        if word.text == new_text {
            return Ok(());
        }
        if self.index.contains_key(&new_text) {
            debug!(%new_text, "rename rejected, text already taken");
            return Err(CloudError::DuplicateWord(new_text));
        }

        self.index.remove(&word.text);
        self.index.insert(new_text.clone(), id);
        let old_text = std::mem::replace(&mut word.text, new_text);
        self.layout
            .set_size_hint(id, self.measure.measure(&word.text, word.font_size));

        debug!(%old_text, new_text = %word.text, "word renamed");
        self.sort();
        Ok(())
    }

    pub fn sort(&mut self) {
        let mut items = self
            .layout
            .clear()
            .into_iter()
            .map(|item| (item.key(), item))
            .collect::<HashMap<WordId, LayoutItem<WordId>>>();

        for id in self.index.values() {
            if let Some(item) = items.remove(id) {
                self.layout.add_item(item);
            }
        }
        self.relayout();
    }

    // Re-places the words inside the last rectangle the host gave us. Before
    // the first `set_geometry` there is nothing to re-place.
    pub(crate) fn relayout(&mut self) {
        let rect = self.layout.geometry();
        if rect.is_finite() && rect.width() > 0.0 {
            self.layout.set_geometry(rect);
        }
    }

    pub fn highlight<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in self.words.values_mut() {
            word.highlighted = false;
        }

        for text in words {
            if let Some(word) = self
                .index
                .get(text.as_ref())
                .and_then(|id| self.words.get_mut(id))
            {
                word.highlighted = true;
            }
        }
    }

    /// An empty target clears the selection.
    pub fn search(&mut self, target: &str) {
        if target.is_empty() {
            self.unselect_all();
            return;
        }

        let needle = target.to_lowercase();
        for word in self.words.values_mut() {
            word.selected = word.text.to_lowercase().contains(&needle);
        }
    }

    pub fn unselect_all(&mut self) {
        for word in self.words.values_mut() {
            word.selected = false;
        }
    }

    pub fn unrelate_all(&mut self) {
        for word in self.words.values_mut() {
            word.related = false;
        }
    }

    pub fn layout(&self) -> &FlowLayout<WordId> {
        &self.layout
    }

    pub fn set_layout_style(&mut self, style: LayoutStyle) {
        if self.layout.style() != style {
            self.layout.set_style(style);
            self.relayout();
        }
    }

    pub fn set_geometry(&mut self, rect: Rect) -> f32 {
        self.layout.set_geometry(rect)
    }

    pub fn height_for_width(&self, width: f32) -> f32 {
        self.layout.height_for_width(width)
    }

    pub fn word_rect(&self, id: WordId) -> Option<Rect> {
        self.layout.find(id).map(LayoutItem::geometry)
    }

    pub fn take_events(&mut self) -> Vec<CloudEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_removal_count(&self) -> usize {
        self.pending_removal.len()
    }

    /// End of an event-handling cycle. Removed words are freed here.
    pub fn tick(&mut self, now: Instant) {
        let responses = self
            .lookup
            .as_mut()
            .map(|lookup| lookup.poll())
            .unwrap_or_default();
        for response in responses {
            // stale responses are logged and dropped inside
            let _ = self.on_related_response(response.token, &response.words);
        }

        self.expire_related(now);

        if !self.pending_removal.is_empty() {
            debug!(count = self.pending_removal.len(), "releasing removed words");
            self.pending_removal.clear();
        }
    }
}
