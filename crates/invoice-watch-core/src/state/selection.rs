/// Encapsulates row expansion state.
///
/// At most one invoice is expanded at a time. The selected id is not checked
/// against the current snapshot: if the record disappears upstream the
/// selection stays, and the detail panel simply has nothing to show.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// ID of the currently expanded invoice, or None if every row is closed.
    selected_id: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle an invoice row.
    ///
    /// Clicking the open row closes it; clicking any other row moves the
    /// expansion there directly without passing through "none".
    pub fn toggle(&mut self, id: &str) -> Option<&str> {
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        } else {
            self.selected_id = Some(id.to_string());
        }
        self.selected_id.as_deref()
    }

    /// Get the expanded invoice ID, if any.
    pub fn id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_none() {
        let selection = SelectionState::new();
        assert_eq!(selection.id(), None);
    }

    #[test]
    fn test_toggle_same_row_closes() {
        let mut selection = SelectionState::new();
        assert_eq!(selection.toggle("x"), Some("x"));
        assert_eq!(selection.toggle("x"), None);
        assert_eq!(selection.id(), None);
    }

    #[test]
    fn test_toggle_other_row_moves_directly() {
        let mut selection = SelectionState::new();
        selection.toggle("x");
        assert_eq!(selection.toggle("y"), Some("y"));
        assert_eq!(selection.id(), Some("y"));
    }

    #[test]
    fn test_toggle_back_and_forth() {
        let mut selection = SelectionState::new();
        selection.toggle("x");
        selection.toggle("y");
        assert_eq!(selection.toggle("x"), Some("x"));
        assert_eq!(selection.toggle("x"), None);
    }
}
