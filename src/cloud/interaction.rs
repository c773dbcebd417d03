use eframe::egui::{Modifiers, PointerButton, Pos2};
use tracing::debug;

use super::{CloudEvent, WordCloud, WordId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interaction {
    #[default]
    Idle,
    Selecting(WordId),
}

impl WordCloud {
    pub fn word_at(&self, pos: Pos2) -> Option<WordId> {
        self.layout.key_at(pos)
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Whether ctrl (or cmd) was held on the last press that hit a word.
    pub fn control_pressed(&self) -> bool {
        self.control_pressed
    }

    pub fn press(&mut self, pos: Pos2, button: PointerButton, modifiers: Modifiers) {
        let Some(word) = self.word_at(pos).and_then(|id| self.words.get(&id)) else {
            self.unselect_all();
            self.interaction = Interaction::Idle;
            return;
        };

        // context gesture on the current selection
        if button == PointerButton::Secondary && word.selected {
            return;
        }

        let id = word.id;
        let text = word.text.clone();

        if modifiers.is_none() {
            self.unselect_all();
        }
        self.control_pressed = modifiers.ctrl || modifiers.command;

        if let Some(word) = self.words.get_mut(&id) {
            word.selected = true;
        }
        self.interaction = Interaction::Selecting(id);
        debug!(%text, additive = !modifiers.is_none(), "word pressed");

        self.request_related(&text);
    }

    pub fn release(&mut self) {
        self.interaction = Interaction::Idle;
    }

    /// Emits [`CloudEvent::WordActivated`]; selection is left alone.
    pub fn double_click(&mut self, pos: Pos2) {
        let text = self
            .word_at(pos)
            .and_then(|id| self.words.get(&id))
            .map(|word| word.text.clone());
        debug!(?text, "word activated");
        self.events.push(CloudEvent::WordActivated(text));
    }
}
