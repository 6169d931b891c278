//! Text content and its measurement.

use std::collections::HashMap;

use tcss::NodeMeta;
use tcss_layout::{Axis, Measure};
use unicode_display_width::width as display_width;

/// Text shown by leaf nodes, looked up by element id first and node type
/// second. Measures as the widest line by display width, one row per line.
#[derive(Clone, Debug, Default)]
pub struct ContentMeasure {
    by_id: HashMap<String, String>,
    by_type: HashMap<&'static str, String>,
}

impl ContentMeasure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, element_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.by_id.insert(element_id.into(), text.into());
        self
    }

    pub fn with_type_text(mut self, type_name: &'static str, text: impl Into<String>) -> Self {
        self.by_type.insert(type_name, text.into());
        self
    }

    pub fn set_text(&mut self, element_id: &str, text: impl Into<String>) {
        self.by_id.insert(element_id.to_string(), text.into());
    }

    pub fn text(&self, node: &NodeMeta) -> Option<&str> {
        node.id
            .as_deref()
            .and_then(|id| self.by_id.get(id))
            .or_else(|| self.by_type.get(node.type_name))
            .map(String::as_str)
    }
}

impl Measure for ContentMeasure {
    fn measure(&self, node: &NodeMeta, axis: Axis) -> Option<i32> {
        let text = self.text(node)?;
        match axis {
            Axis::Horizontal => text.lines().map(|line| display_width(line) as i32).max(),
            Axis::Vertical => Some(text.lines().count() as i32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_wide_glyphs_by_display_width() {
        let content = ContentMeasure::new().with_text("title", "* 过滤");
        let node = NodeMeta::new("Label").with_id("title");
        assert_eq!(content.measure(&node, Axis::Horizontal), Some(6));
        assert_eq!(content.measure(&node, Axis::Vertical), Some(1));
    }

    #[test]
    fn id_text_wins_over_type_text() {
        let content = ContentMeasure::new()
            .with_type_text("Footer", "q Quit")
            .with_text("footer", "q Quit  x Help\nf Filter");
        let by_id = NodeMeta::new("Footer").with_id("footer");
        let by_type = NodeMeta::new("Footer");

        assert_eq!(content.measure(&by_id, Axis::Horizontal), Some(14));
        assert_eq!(content.measure(&by_id, Axis::Vertical), Some(2));
        assert_eq!(content.measure(&by_type, Axis::Horizontal), Some(6));
        assert_eq!(content.measure(&NodeMeta::new("DataTable"), Axis::Vertical), None);
    }
}
