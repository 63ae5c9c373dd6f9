//! User form: field state, validation, and create/edit mode

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
    Frame,
};

use crate::admin_tui::{
    components::form_field::{Form, FormField},
    ui::Styles,
};
use crate::models::{UserDraft, UserRecord, COUNTRY_OPTIONS, ROLE_OPTIONS, STATE_OPTIONS};
use crate::validation::{ADDRESS_RULES, CITY_RULES, EMAIL_RULES, NAME_RULES, SELECT_RULES};

pub const BILLING_LABEL: &str = "My billing address is different than above.";

/// Named fields of the user form, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    FirstName,
    LastName,
    Email,
    Address,
    City,
    Country,
    State,
    Role,
    Billing,
}

impl UserField {
    pub const ALL: [UserField; 9] = [
        UserField::FirstName,
        UserField::LastName,
        UserField::Email,
        UserField::Address,
        UserField::City,
        UserField::Country,
        UserField::State,
        UserField::Role,
        UserField::Billing,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &str {
        match self {
            UserField::FirstName => "First name",
            UserField::LastName => "Last name",
            UserField::Email => "Email",
            UserField::Address => "Address / Street",
            UserField::City => "City",
            UserField::Country => "Country / region",
            UserField::State => "State / Province",
            UserField::Role => "Role",
            UserField::Billing => BILLING_LABEL,
        }
    }

    fn build(self) -> FormField {
        match self {
            UserField::FirstName | UserField::LastName => FormField::text(self.as_str(), NAME_RULES),
            UserField::Email => FormField::text(self.as_str(), EMAIL_RULES)
                .with_placeholder("email@domain.com"),
            UserField::Address => FormField::text(self.as_str(), ADDRESS_RULES),
            UserField::City => FormField::text(self.as_str(), CITY_RULES),
            UserField::Country => FormField::select(self.as_str(), COUNTRY_OPTIONS, SELECT_RULES),
            UserField::State => FormField::select(self.as_str(), STATE_OPTIONS, SELECT_RULES),
            UserField::Role => FormField::select(self.as_str(), ROLE_OPTIONS, SELECT_RULES),
            UserField::Billing => FormField::checkbox(self.as_str()),
        }
    }
}

/// Form controller for creating and editing users.
///
/// `editing_id` of `None` means create-mode; `Some(id)` means the next
/// successful submit updates the user with that id.
pub struct UserForm {
    pub form: Form,
    editing_id: Option<String>,
}

impl Default for UserForm {
    fn default() -> Self {
        Self::new()
    }
}

impl UserForm {
    pub fn new() -> Self {
        Self {
            form: Form::new(UserField::ALL.iter().map(|f| f.build()).collect()),
            editing_id: None,
        }
    }

    pub fn field(&self, field: UserField) -> &FormField {
        &self.form.fields[field.index()]
    }

    pub fn field_mut(&mut self, field: UserField) -> &mut FormField {
        &mut self.form.fields[field.index()]
    }

    /// Set a text or select value directly
    pub fn set_value(&mut self, field: UserField, value: &str) {
        self.field_mut(field).set_value(value);
    }

    pub fn set_billing(&mut self, checked: bool) {
        self.field_mut(UserField::Billing).checked = checked;
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Current field values
    pub fn values(&self) -> UserDraft {
        let text = |field: UserField| self.field(field).value.clone();
        UserDraft {
            first_name: text(UserField::FirstName),
            last_name: text(UserField::LastName),
            email: text(UserField::Email),
            address: text(UserField::Address),
            city: text(UserField::City),
            country: text(UserField::Country),
            state: text(UserField::State),
            role: text(UserField::Role),
            billing: self.field(UserField::Billing).checked,
        }
    }

    /// Validate every field. Returns the values when all pass; otherwise
    /// each failing field keeps its message and submission is blocked.
    pub fn submit(&mut self) -> Option<UserDraft> {
        if self.form.validate_all() {
            Some(self.values())
        } else {
            None
        }
    }

    /// Messages of the fields that failed the last submit
    pub fn errors(&self) -> Vec<(String, String)> {
        self.form.errors()
    }

    /// Clear every field and return to create-mode
    pub fn reset(&mut self) {
        self.form.clear_all();
        self.editing_id = None;
    }

    /// Fill every field from `record` and switch to edit-mode for its id
    pub fn load_record(&mut self, record: &UserRecord) {
        let draft = UserDraft::from(record);
        self.set_value(UserField::FirstName, &draft.first_name);
        self.set_value(UserField::LastName, &draft.last_name);
        self.set_value(UserField::Email, &draft.email);
        self.set_value(UserField::Address, &draft.address);
        self.set_value(UserField::City, &draft.city);
        self.set_value(UserField::Country, &draft.country);
        self.set_value(UserField::State, &draft.state);
        self.set_value(UserField::Role, &draft.role);
        self.set_billing(draft.billing);
        self.editing_id = Some(record.key().to_string());
    }

    fn title(&self) -> String {
        match &self.editing_id {
            Some(id) => format!("Personal Details - editing {}", id),
            None => "Personal Details - new user".to_string(),
        }
    }

    /// Draw the form; `active` marks the focused field
    pub fn draw(&mut self, f: &mut Frame, area: Rect, active: bool) {
        self.form.set_active(active);

        let block = Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_style(if active {
                Styles::active_border()
            } else {
                Styles::inactive_border()
            });
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        let layout_rows: [&[(UserField, u16)]; 3] = [
            &[
                (UserField::FirstName, 30),
                (UserField::LastName, 30),
                (UserField::Email, 40),
            ],
            &[(UserField::Address, 70), (UserField::City, 30)],
            &[
                (UserField::Country, 22),
                (UserField::State, 22),
                (UserField::Role, 22),
                (UserField::Billing, 34),
            ],
        ];

        for (row_area, fields) in rows.iter().zip(layout_rows) {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(
                    fields
                        .iter()
                        .map(|(_, pct)| Constraint::Percentage(*pct))
                        .collect::<Vec<_>>(),
                )
                .split(*row_area);

            for ((field, _), cell) in fields.iter().zip(cells.iter()) {
                self.field(*field).render(f, *cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin_tui::traits::FormHandler;

    fn fill_valid(form: &mut UserForm) {
        form.set_value(UserField::FirstName, "Alice1");
        form.set_value(UserField::LastName, "Smith1");
        form.set_value(UserField::Email, "a@b.com");
        form.set_value(UserField::Address, "12 Main St");
        form.set_value(UserField::City, "Hanoi");
        form.set_value(UserField::Country, "VN");
        form.set_value(UserField::State, "Q1");
        form.set_value(UserField::Role, "admin");
    }

    #[test]
    fn test_defaults_are_empty_create_mode() {
        let form = UserForm::new();
        assert_eq!(form.values(), UserDraft::default());
        assert!(!form.is_edit_mode());
    }

    #[test]
    fn test_submit_blocks_on_short_name() {
        let mut form = UserForm::new();
        fill_valid(&mut form);
        form.set_value(UserField::FirstName, "Al");

        assert!(form.submit().is_none());
        assert_eq!(
            form.field(UserField::FirstName).validation_error.as_deref(),
            Some("Must be at least 6 characters.")
        );
        assert!(form.field(UserField::LastName).validation_error.is_none());
    }

    #[test]
    fn test_submit_blocks_on_long_name() {
        let mut form = UserForm::new();
        fill_valid(&mut form);
        form.set_value(UserField::LastName, &"x".repeat(21));

        assert!(form.submit().is_none());
        assert_eq!(
            form.field(UserField::LastName).validation_error.as_deref(),
            Some("Must be 20 characters or less.")
        );
    }

    #[test]
    fn test_empty_form_reports_required_on_every_required_field() {
        let mut form = UserForm::new();
        assert!(form.submit().is_none());

        let errors = form.errors();
        assert_eq!(errors.len(), 8);
        assert!(errors.iter().all(|(_, m)| m == "This field is required."));
        assert!(form.field(UserField::Billing).validation_error.is_none());
    }

    #[test]
    fn test_submit_returns_values() {
        let mut form = UserForm::new();
        fill_valid(&mut form);
        form.set_billing(true);

        let draft = form.submit().unwrap();
        assert_eq!(draft.first_name, "Alice1");
        assert_eq!(draft.country, "VN");
        assert!(draft.billing);
    }

    #[test]
    fn test_load_record_enters_edit_mode_and_reset_leaves_it() {
        let record = UserRecord {
            server_id: Some("u42".to_string()),
            first_name: "Carol1".to_string(),
            last_name: "Nguyen".to_string(),
            email: "carol@example.com".to_string(),
            address: "1 Le Loi".to_string(),
            city: "Hue".to_string(),
            country: "VN".to_string(),
            state: "Q2".to_string(),
            role: "member".to_string(),
            billing: true,
            ..Default::default()
        };

        let mut form = UserForm::new();
        form.load_record(&record);
        assert_eq!(form.editing_id(), Some("u42"));
        assert_eq!(form.values(), UserDraft::from(&record));

        form.reset();
        assert!(!form.is_edit_mode());
        assert_eq!(form.values(), UserDraft::default());
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = UserForm::new();
        form.form.set_current_field(UserField::City.index());
        for c in "Hue".chars() {
            form.form.handle_char_input(c);
        }
        assert_eq!(form.field(UserField::City).value, "Hue");
    }
}
