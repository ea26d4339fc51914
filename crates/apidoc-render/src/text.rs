use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            bold: false,
        }
    }
}

impl TextStyle {
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-independent estimate: display columns times a per-column factor.
///
/// Used for the first-paint diagram layout, before the browser reports real boxes.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn lines(text: &str) -> Vec<&str> {
        let out: Vec<&str> = text.split('\n').collect();
        if out.is_empty() { vec![""] } else { out }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };
        let weight = if style.bold { 1.1 } else { 1.0 };

        let lines = Self::lines(text);
        let font_size = style.font_size.max(1.0);
        let max_cols = lines.iter().map(|l| l.width()).max().unwrap_or(0);

        TextMetrics {
            width: max_cols as f64 * font_size * char_width_factor * weight,
            height: lines.len() as f64 * font_size * line_height_factor,
            line_count: lines.len(),
        }
    }
}
