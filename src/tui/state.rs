use crate::keywords::KeywordPair;
use crate::lookup::UNABLE_TO_GENERATE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Primary,
    Secondary,
}

impl Field {
    fn other(self) -> Self {
        match self {
            Field::Primary => Field::Secondary,
            Field::Secondary => Field::Primary,
        }
    }
}

/// Contents of the output area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Display {
    Empty,
    Text(String),
    Error(String),
}

/// Everything the form shows: both inputs, the output area and a status line.
#[derive(Debug, Clone)]
pub struct FormState {
    pub primary: String,
    pub secondary: String,
    pub focus: Field,
    pub display: Display,
    pub status: String,
    pub busy: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            primary: String::new(),
            secondary: String::new(),
            focus: Field::Primary,
            display: Display::Empty,
            status: String::new(),
            busy: false,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Primary => &mut self.primary,
            Field::Secondary => &mut self.secondary,
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        self.focused_mut().push(ch);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn switch_focus(&mut self) {
        self.focus = self.focus.other();
    }

    pub fn keywords(&self) -> KeywordPair {
        KeywordPair::new(self.primary.trim(), self.secondary.trim())
    }

    pub fn set_keywords(&mut self, keywords: &KeywordPair) {
        self.primary = keywords.primary.clone();
        self.secondary = keywords.secondary.clone();
    }

    pub fn show_text(&mut self, text: impl Into<String>) {
        self.display = Display::Text(text.into());
    }

    pub fn show_error(&mut self) {
        self.display = Display::Error(UNABLE_TO_GENERATE.to_string());
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Empties both inputs and the output area regardless of the current state.
    pub fn clear(&mut self) {
        self.primary.clear();
        self.secondary.clear();
        self.focus = Field::Primary;
        self.display = Display::Empty;
        self.status.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_goes_to_the_focused_field() {
        let mut state = FormState::new();
        "Cat".chars().for_each(|c| state.insert_char(c));
        state.switch_focus();
        "fur".chars().for_each(|c| state.insert_char(c));
        state.backspace();

        assert_eq!(state.primary, "Cat");
        assert_eq!(state.secondary, "fu");
        assert_eq!(state.focus, Field::Secondary);
    }

    #[test]
    fn keywords_are_trimmed() {
        let mut state = FormState::new();
        state.primary = "  Cat ".into();
        state.secondary = "mammal\t".into();
        assert_eq!(state.keywords(), KeywordPair::new("Cat", "mammal"));
    }

    #[test]
    fn clear_resets_from_error_state() {
        let mut state = FormState::new();
        state.set_keywords(&KeywordPair::new("a", "b"));
        state.show_error();
        state.switch_focus();
        state.clear();

        assert!(state.primary.is_empty());
        assert!(state.secondary.is_empty());
        assert_eq!(state.display, Display::Empty);
        assert_eq!(state.focus, Field::Primary);
    }

    #[test]
    fn error_display_uses_fixed_message() {
        let mut state = FormState::new();
        state.show_text("something");
        state.show_error();
        assert_eq!(state.display, Display::Error(UNABLE_TO_GENERATE.to_string()));
    }
}
