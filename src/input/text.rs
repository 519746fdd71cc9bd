/// Turns the text field's contents into a command.
///
/// Only `ON` and `OFF` mean anything, ignoring case and surrounding whitespace.
/// Everything else yields `None`, which is not an error.
pub fn parse_command(text: &str) -> Option<bool> {
    match text.trim().to_uppercase().as_str() {
        "ON" => Some(true),
        "OFF" => Some(false),
        _ => None,
    }
}

/// The free-text command field.
///
/// Every mutator reports whether the text changed, since only a change counts as an edit.
#[derive(Debug, Default, Clone)]
pub struct TextField {
    buffer: String,
}

impl TextField {
    pub fn as_str(&self) -> &str {&self.buffer}

    pub fn insert(&mut self, text: &str) -> bool {
        let before = self.buffer.len();
        self.buffer.extend(text.chars().filter(|c| !c.is_control()));
        self.buffer.len() != before
    }

    pub fn backspace(&mut self) -> bool {
        self.buffer.pop().is_some()
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.buffer.is_empty();
        self.buffer.clear();
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_ignore_case_and_padding() {
        assert_eq!(parse_command("  on  "), Some(true));
        assert_eq!(parse_command("Off"), Some(false));
        assert_eq!(parse_command("ON\n"), Some(true));
    }

    #[test]
    fn anything_else_is_no_command() {
        assert_eq!(parse_command("xyz"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("o n"), None);
        assert_eq!(parse_command("onn"), None);
    }

    #[test]
    fn edits_report_changes() {
        let mut field = TextField::default();
        assert!(field.insert("o"));
        assert!(field.insert("n"));
        assert_eq!(field.as_str(), "on");
        assert!(!field.insert("\u{8}"));
        assert!(field.backspace());
        assert_eq!(field.as_str(), "o");
        assert!(field.clear());
        assert!(!field.clear());
        assert!(!field.backspace());
    }
}
