//! Form field component for user input

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::admin_tui::{traits::FormHandler, ui::Styles};
use crate::models::SelectOption;
use crate::validation::FieldRules;

/// Type of form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormFieldType {
    Text,
    Select,
    Checkbox,
}

/// Individual form field
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub checked: bool,
    pub placeholder: String,
    pub field_type: FormFieldType,
    pub is_focused: bool,
    /// Cursor position in characters, not bytes
    pub cursor_position: usize,
    pub options: &'static [SelectOption],
    pub rules: FieldRules,
    pub validation_error: Option<String>,
}

impl FormField {
    pub fn new(label: &str, field_type: FormFieldType) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            checked: false,
            placeholder: String::new(),
            field_type,
            is_focused: false,
            cursor_position: 0,
            options: &[],
            rules: FieldRules::none(),
            validation_error: None,
        }
    }

    pub fn text(label: &str, rules: FieldRules) -> Self {
        Self::new(label, FormFieldType::Text).with_rules(rules)
    }

    pub fn select(label: &str, options: &'static [SelectOption], rules: FieldRules) -> Self {
        let mut field = Self::new(label, FormFieldType::Select).with_rules(rules);
        field.options = options;
        field.placeholder = "Choose...".to_string();
        field
    }

    pub fn checkbox(label: &str) -> Self {
        Self::new(label, FormFieldType::Checkbox)
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_rules(mut self, rules: FieldRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    /// Replace the value and move the cursor to the end
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor_position = self.value.chars().count();
        self.validation_error = None;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        if self.field_type != FormFieldType::Text {
            return;
        }
        let index = self.byte_index(self.cursor_position);
        self.value.insert(index, c);
        self.cursor_position += 1;
        self.validation_error = None;
    }

    pub fn delete_char(&mut self) {
        if self.field_type != FormFieldType::Text {
            return;
        }
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let index = self.byte_index(self.cursor_position);
            self.value.remove(index);
            self.validation_error = None;
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.field_type != FormFieldType::Text {
            return;
        }
        if self.cursor_position < self.char_len() {
            let index = self.byte_index(self.cursor_position);
            self.value.remove(index);
            self.validation_error = None;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.char_len();
    }

    /// Back to the default value: empty text, no selection, unchecked
    pub fn clear(&mut self) {
        self.value.clear();
        self.checked = false;
        self.cursor_position = 0;
        self.validation_error = None;
    }

    /// Select the next option; an empty selection moves to the first option
    pub fn select_next_option(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let next = match self.selected_option_index() {
            Some(i) => (i + 1) % self.options.len(),
            None => 0,
        };
        self.set_value(self.options[next].value);
    }

    /// Select the previous option; an empty selection moves to the last option
    pub fn select_previous_option(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let previous = match self.selected_option_index() {
            Some(0) | None => self.options.len() - 1,
            Some(i) => i - 1,
        };
        self.set_value(self.options[previous].value);
    }

    pub fn selected_option_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.value == self.value)
    }

    pub fn toggle(&mut self) {
        if self.field_type == FormFieldType::Checkbox {
            self.checked = !self.checked;
        }
    }

    /// Validate field value against its rules
    pub fn validate(&mut self) -> bool {
        self.validation_error = match self.field_type {
            FormFieldType::Checkbox => None,
            FormFieldType::Text | FormFieldType::Select => self.rules.check(&self.value),
        };
        self.validation_error.is_none()
    }

    /// Text shown inside the field box
    pub fn display_value(&self) -> String {
        match self.field_type {
            FormFieldType::Text => self.value.clone(),
            FormFieldType::Select => match self.selected_option_index() {
                Some(i) => format!("◀ {} ▶", self.options[i].label),
                None => self.value.clone(),
            },
            FormFieldType::Checkbox => {
                let mark = if self.checked { "x" } else { " " };
                format!("[{}] {}", mark, self.label)
            }
        }
    }

    /// Render the form field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let display_text = self.display_value();
        let show_placeholder = display_text.is_empty() && !self.placeholder.is_empty();

        let border_style = if self.is_focused {
            Styles::active_border()
        } else if self.validation_error.is_some() {
            Styles::error()
        } else {
            Styles::inactive_border()
        };

        let title = match (&self.validation_error, self.field_type) {
            (Some(error), _) => format!("{} - {}", self.label, error),
            (None, FormFieldType::Checkbox) => "Billing".to_string(),
            (None, _) => self.label.clone(),
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);

        let (text, text_style) = if show_placeholder {
            (self.placeholder.clone(), Styles::inactive())
        } else {
            (display_text, Styles::default())
        };

        let paragraph = Paragraph::new(text)
            .style(text_style)
            .block(block);

        f.render_widget(paragraph, area);

        // Render cursor if focused text field
        if self.is_focused && self.field_type == FormFieldType::Text {
            let before_cursor: String = self.value.chars().take(self.cursor_position).collect();
            let cursor_x = area.x + 1 + before_cursor.width() as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

/// Form container that manages multiple fields
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub current_field: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self {
            fields,
            current_field: 0,
        };
        form.update_focus();
        form
    }

    fn update_focus(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(i == self.current_field);
        }
    }

    pub fn get_current_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current_field)
    }

    /// Show or hide the focus marker without moving it
    pub fn set_active(&mut self, active: bool) {
        let current = self.current_field;
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(active && i == current);
        }
    }

    /// Validate all fields; every failing field keeps its own message
    pub fn validate_all(&mut self) -> bool {
        let mut all_valid = true;
        for field in &mut self.fields {
            if !field.validate() {
                all_valid = false;
            }
        }
        all_valid
    }

    /// Messages of every field that failed its last validation
    pub fn errors(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter_map(|f| {
                f.validation_error
                    .as_ref()
                    .map(|e| (f.label.clone(), e.clone()))
            })
            .collect()
    }

    pub fn clear_all(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
    }
}

impl FormHandler for Form {
    fn get_current_field(&self) -> usize {
        self.current_field
    }

    fn set_current_field(&mut self, field: usize) {
        if field < self.fields.len() {
            self.current_field = field;
            self.update_focus();
        }
    }

    fn get_field_count(&self) -> usize {
        self.fields.len()
    }

    fn handle_char_input(&mut self, c: char) {
        if let Some(field) = self.get_current_field_mut() {
            match field.field_type {
                FormFieldType::Text => field.insert_char(c),
                FormFieldType::Select if c == ' ' => field.select_next_option(),
                FormFieldType::Checkbox if c == ' ' => field.toggle(),
                _ => {}
            }
        }
    }

    fn handle_backspace(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char();
        }
    }

    fn handle_delete(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.delete_char_forward();
        }
    }

    fn handle_left(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            match field.field_type {
                FormFieldType::Text => field.move_cursor_left(),
                FormFieldType::Select => field.select_previous_option(),
                FormFieldType::Checkbox => field.toggle(),
            }
        }
    }

    fn handle_right(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            match field.field_type {
                FormFieldType::Text => field.move_cursor_right(),
                FormFieldType::Select => field.select_next_option(),
                FormFieldType::Checkbox => field.toggle(),
            }
        }
    }

    fn handle_home(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.move_cursor_to_start();
        }
    }

    fn handle_end(&mut self) {
        if let Some(field) = self.get_current_field_mut() {
            field.move_cursor_to_end();
        }
    }

    fn validate(&mut self) -> bool {
        self.validate_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ROLE_OPTIONS;
    use crate::validation::{NAME_RULES, SELECT_RULES};

    #[test]
    fn test_text_editing_handles_multibyte() {
        let mut field = FormField::text("City", NAME_RULES);
        for c in "Đà Nẵng".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.value, "Đà Nẵng");

        field.move_cursor_to_start();
        field.move_cursor_right();
        field.delete_char();
        assert_eq!(field.value, "à Nẵng");

        field.move_cursor_to_end();
        field.delete_char();
        assert_eq!(field.value, "à Nẵn");
    }

    #[test]
    fn test_select_cycles_options() {
        let mut field = FormField::select("Role", ROLE_OPTIONS, SELECT_RULES);
        assert!(!field.validate());
        assert_eq!(field.validation_error.as_deref(), Some("This field is required."));

        field.select_next_option();
        assert_eq!(field.value, "admin");
        assert!(field.validation_error.is_none());
        field.select_previous_option();
        assert_eq!(field.value, "member");
        field.select_next_option();
        assert_eq!(field.value, "admin");

        field.insert_char('x');
        assert_eq!(field.value, "admin");
        assert_eq!(field.display_value(), "◀ Admin ▶");
    }

    #[test]
    fn test_checkbox_toggle_and_clear() {
        let mut field = FormField::checkbox("My billing address is different than above.");
        field.toggle();
        assert!(field.checked);
        assert!(field.validate());
        field.clear();
        assert!(!field.checked);
    }

    #[test]
    fn test_form_reports_every_failing_field() {
        let mut form = Form::new(vec![
            FormField::text("First name", NAME_RULES),
            FormField::text("Last name", NAME_RULES),
            FormField::select("Role", ROLE_OPTIONS, SELECT_RULES),
        ]);
        form.handle_char_input('A');

        assert!(!form.validate());
        let errors = form.errors();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].1, "Must be at least 6 characters.");
        assert_eq!(errors[1].1, "This field is required.");
    }

    #[test]
    fn test_form_focus_navigation_wraps() {
        let mut form = Form::new(vec![
            FormField::text("First name", NAME_RULES),
            FormField::checkbox("Billing"),
        ]);
        assert!(form.fields[0].is_focused);
        form.next_field();
        assert!(form.fields[1].is_focused);
        form.next_field();
        assert_eq!(form.get_current_field(), 0);
        form.previous_field();
        assert_eq!(form.get_current_field(), 1);
        form.handle_char_input(' ');
        assert!(form.fields[1].checked);
    }
}
