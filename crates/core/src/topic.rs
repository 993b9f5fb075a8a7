use thiserror::Error;

/// Errors from topic selection.
#[derive(Debug, Error)]
pub enum TopicError {
    #[error("unknown topic: {0:?}")]
    UnknownTopic(String),
    #[error("topic index {0} is out of range")]
    IndexOutOfRange(usize),
}

/// The list of playable topics and the learner's current selection.
#[derive(Debug, Clone, Default)]
pub struct TopicPicker {
    topics: Vec<String>,
    selected: Option<usize>,
}

impl TopicPicker {
    /// Creates a picker with nothing selected yet.
    pub fn new(topics: Vec<String>) -> Self {
        Self {
            topics,
            selected: None,
        }
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// The currently selected topic, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|i| self.topics[i].as_str())
    }

    pub fn select_by_index(&mut self, index: usize) -> Result<&str, TopicError> {
        if index >= self.topics.len() {
            return Err(TopicError::IndexOutOfRange(index));
        }
        self.selected = Some(index);
        Ok(&self.topics[index])
    }

    /// Selects a topic by value, case-insensitively, returning its canonical
    /// spelling from the list.
    pub fn select_by_value(&mut self, topic: &str) -> Result<&str, TopicError> {
        let index = self
            .topics
            .iter()
            .position(|t| t.eq_ignore_ascii_case(topic))
            .ok_or_else(|| TopicError::UnknownTopic(topic.to_string()))?;
        self.select_by_index(index)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker() -> TopicPicker {
        TopicPicker::new(vec![
            "Ordering food at a restaurant".to_string(),
            "Talking about the weather".to_string(),
        ])
    }

    #[test]
    fn test_nothing_selected_initially() {
        assert_eq!(picker().selected(), None);
    }

    #[test]
    fn test_select_by_index() {
        let mut picker = picker();
        assert_eq!(
            picker.select_by_index(1).unwrap(),
            "Talking about the weather"
        );
        assert_eq!(picker.selected(), Some("Talking about the weather"));
    }

    #[test]
    fn test_select_by_index_out_of_range() {
        let mut picker = picker();
        assert!(matches!(
            picker.select_by_index(5),
            Err(TopicError::IndexOutOfRange(5))
        ));
        assert_eq!(picker.selected(), None);
    }

    #[test]
    fn test_select_by_value_returns_canonical_spelling() {
        let mut picker = picker();
        let canonical = picker
            .select_by_value("talking ABOUT the weather")
            .unwrap()
            .to_string();
        assert_eq!(canonical, "Talking about the weather");
    }

    #[test]
    fn test_select_by_unknown_value() {
        let mut picker = picker();
        assert!(matches!(
            picker.select_by_value("Going to the doctor"),
            Err(TopicError::UnknownTopic(_))
        ));
    }

    #[test]
    fn test_clear_resets_the_selection() {
        let mut picker = picker();
        picker.select_by_index(0).unwrap();
        picker.clear();
        assert_eq!(picker.selected(), None);
    }
}
