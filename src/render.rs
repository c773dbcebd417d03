use eframe::egui::{Color32, Pos2, Rect, Stroke, Vec2, vec2};

use crate::cloud::Word;

pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: u32) -> Vec2;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproxMeasure {
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for ApproxMeasure {
    fn default() -> Self {
        Self {
            char_width: 0.6,
            line_height: 1.25,
        }
    }
}

impl TextMeasure for ApproxMeasure {
    fn measure(&self, text: &str, font_size: u32) -> Vec2 {
        let size = font_size as f32;
        vec2(
            (text.chars().count() as f32 * size * self.char_width).ceil(),
            (size * self.line_height).ceil(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub shadow: Color32,
    pub accent: Color32,
    pub selection: Stroke,
    pub text: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            shadow: Color32::LIGHT_GRAY,
            accent: Color32::YELLOW,
            selection: Stroke::new(2.0, Color32::RED),
            text: Color32::BLACK,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color32,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
        dashed: bool,
    },
    Text {
        origin: Pos2,
        text: String,
        font_size: u32,
        color: Color32,
    },
}

/// Draw commands for one label, in paint order: background fill, selection
/// outline, then the text.
pub fn render_word(word: &Word, rect: Rect, palette: &Palette) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(3);

    let fill = if word.is_highlighted() {
        Some(palette.shadow)
    } else if word.is_related() {
        Some(palette.accent)
    } else {
        None
    };
    if let Some(color) = fill {
        commands.push(DrawCommand::FillRect { rect, color });
    }

    if word.is_selected() {
        commands.push(DrawCommand::StrokeRect {
            rect,
            stroke: palette.selection,
            dashed: true,
        });
    }

    commands.push(DrawCommand::Text {
        origin: rect.left_top(),
        text: word.text().to_owned(),
        font_size: word.font_size(),
        color: palette.text,
    });

    commands
}

pub fn outline_points(rect: Rect) -> [Pos2; 5] {
    [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::{CloudConfig, WordCloud};
    use eframe::egui::pos2;

    fn rect() -> Rect {
        Rect::from_min_size(pos2(4.0, 4.0), vec2(40.0, 20.0))
    }

    fn fills(commands: &[DrawCommand]) -> Vec<Color32> {
        commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn plain_word_only_draws_text() {
        let mut cloud = WordCloud::new(CloudConfig::default());
        let id = cloud.add_word("plain", None).expect("added");
        let word = cloud.word(id).expect("present");

        let commands = render_word(word, rect(), &Palette::default());
        assert_eq!(commands.len(), 1);
        assert!(matches!(
            &commands[0],
            DrawCommand::Text { text, font_size: 12, .. } if text == "plain"
        ));
    }

    #[test]
    fn highlight_fill_wins_over_related() {
        let mut cloud = WordCloud::new(CloudConfig::default());
        let id = cloud.add_word("both", None).expect("added");
        cloud.highlight(["both"]);
        cloud.set_related(["both"]);
        let palette = Palette::default();

        let word = cloud.word(id).expect("present");
        assert_eq!(fills(&render_word(word, rect(), &palette)), vec![palette.shadow]);

        cloud.highlight(Vec::<String>::new());
        let word = cloud.word(id).expect("present");
        assert_eq!(fills(&render_word(word, rect(), &palette)), vec![palette.accent]);
    }

    #[test]
    fn selection_outline_is_drawn_over_fill() {
        let mut cloud = WordCloud::new(CloudConfig::default());
        let id = cloud.add_word("picked", None).expect("added");
        cloud.highlight(["picked"]);
        cloud.search("PICK");

        let word = cloud.word(id).expect("present");
        let commands = render_word(word, rect(), &Palette::default());
        assert!(matches!(commands[0], DrawCommand::FillRect { .. }));
        assert!(matches!(commands[1], DrawCommand::StrokeRect { dashed: true, .. }));
        assert!(matches!(commands[2], DrawCommand::Text { .. }));
    }

    #[test]
    fn approx_measure_scales_with_font() {
        let measure = ApproxMeasure::default();
        let small = measure.measure("word", 10);
        let large = measure.measure("word", 20);
        assert!(large.x > small.x);
        assert!(large.y > small.y);
        assert_eq!(measure.measure("", 10).x, 0.0);
    }
}
