//! Core traits for the admin TUI
//!
//! Shared behavior for list-like and form-like panels so key handling can be
//! written once in `handlers.rs`.

/// Trait for panels with navigable lists
pub trait Navigable {
    /// Move selection up
    fn navigate_up(&mut self);

    /// Move selection down
    fn navigate_down(&mut self);

    /// Get currently selected index
    fn get_selected_index(&self) -> Option<usize>;

    /// Set selected index
    fn set_selected_index(&mut self, index: Option<usize>);

    /// Get total number of items
    fn get_item_count(&self) -> usize;

    /// Navigate to first item
    fn navigate_to_first(&mut self) {
        if self.get_item_count() > 0 {
            self.set_selected_index(Some(0));
        }
    }

    /// Navigate to last item
    fn navigate_to_last(&mut self) {
        let count = self.get_item_count();
        if count > 0 {
            self.set_selected_index(Some(count - 1));
        }
    }
}

/// Trait for form handling
pub trait FormHandler {
    /// Get current field index
    fn get_current_field(&self) -> usize;

    /// Set current field
    fn set_current_field(&mut self, field: usize);

    /// Get total number of fields
    fn get_field_count(&self) -> usize;

    /// Move to next field
    fn next_field(&mut self) {
        let total = self.get_field_count();
        if total == 0 {
            return;
        }
        let current = self.get_current_field();
        self.set_current_field((current + 1) % total);
    }

    /// Move to previous field
    fn previous_field(&mut self) {
        let total = self.get_field_count();
        if total == 0 {
            return;
        }
        let current = self.get_current_field();
        self.set_current_field(if current == 0 { total - 1 } else { current - 1 });
    }

    /// Handle character input for current field
    fn handle_char_input(&mut self, c: char);

    /// Handle backspace for current field
    fn handle_backspace(&mut self);

    /// Handle delete for current field
    fn handle_delete(&mut self);

    /// Left arrow: cursor for text, previous option for selects
    fn handle_left(&mut self);

    /// Right arrow: cursor for text, next option for selects
    fn handle_right(&mut self);

    /// Home: cursor to the start of a text field
    fn handle_home(&mut self);

    /// End: cursor to the end of a text field
    fn handle_end(&mut self);

    /// Validate every field, recording per-field messages
    fn validate(&mut self) -> bool;
}
