//! User list screen: the table of records plus the pagination footer

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use crate::admin_tui::{
    components::data_table::{Column, DataTable},
    traits::Navigable,
    ui::Styles,
};
use crate::models::{option_label, PageMetadata, UserRecord, COUNTRY_OPTIONS, ROLE_OPTIONS, STATE_OPTIONS};

/// Cells of one user row, in column order
pub fn user_row(user: &UserRecord) -> Vec<String> {
    vec![
        user.key().to_string(),
        user.display_name(),
        user.email.clone(),
        user.address.clone(),
        user.city.clone(),
        option_label(COUNTRY_OPTIONS, &user.country).to_string(),
        option_label(STATE_OPTIONS, &user.state).to_string(),
        option_label(ROLE_OPTIONS, &user.role).to_string(),
        if user.billing { "yes" } else { "no" }.to_string(),
    ]
}

pub fn user_columns() -> Vec<Column> {
    vec![
        Column::new("ID", 14),
        Column::new("Name", 22),
        Column::new("Email", 26),
        Column::new("Address", 24),
        Column::new("City", 12),
        Column::new("Country", 14),
        Column::new("State", 10),
        Column::new("Role", 9),
        Column::new("Billing", 7),
    ]
}

/// Footer text with the current page counters
pub fn pagination_text(metadata: &PageMetadata) -> String {
    format!(
        "Page {} | Limit {} | Total {}    ←/p previous  →/n next",
        metadata.page, metadata.limit, metadata.total
    )
}

/// User list state
pub struct UserListScreen {
    pub table: DataTable,
    item_count: usize,
}

impl Default for UserListScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl UserListScreen {
    pub fn new() -> Self {
        Self {
            table: DataTable::new(user_columns()),
            item_count: 0,
        }
    }

    /// Keep the selection inside a collection of `count` records
    pub fn sync_selection(&mut self, count: usize) {
        self.item_count = count;
        let selected = match (self.table.state.selected(), count) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), n) if i >= n => Some(n - 1),
            (Some(i), _) => Some(i),
        };
        self.table.state.select(selected);
    }

    /// Record under the cursor
    pub fn selected_user<'a>(&self, users: &'a [UserRecord]) -> Option<&'a UserRecord> {
        self.table.state.selected().and_then(|i| users.get(i))
    }

    pub fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        users: &[UserRecord],
        metadata: &PageMetadata,
        focused: bool,
    ) {
        self.sync_selection(users.len());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let title = format!("Users ({})", users.len());
        self.table
            .render(f, chunks[0], users, user_row, &title, focused);

        let footer = Paragraph::new(pagination_text(metadata)).style(Styles::inactive());
        f.render_widget(footer, chunks[1]);
    }
}

impl Navigable for UserListScreen {
    fn navigate_up(&mut self) {
        if self.item_count == 0 {
            return;
        }
        let selected = self.table.state.selected().unwrap_or(0);
        let next = if selected == 0 {
            self.item_count - 1
        } else {
            selected - 1
        };
        self.table.state.select(Some(next));
    }

    fn navigate_down(&mut self) {
        if self.item_count == 0 {
            return;
        }
        let selected = self.table.state.selected().unwrap_or(0);
        self.table.state.select(Some((selected + 1) % self.item_count));
    }

    fn get_selected_index(&self) -> Option<usize> {
        self.table.state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.table.state.select(index);
    }

    fn get_item_count(&self) -> usize {
        self.item_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn user(id: &str, first: &str) -> UserRecord {
        UserRecord {
            server_id: Some(id.to_string()),
            first_name: first.to_string(),
            last_name: "Tran".to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            country: "VN".to_string(),
            state: "Phu nhuan".to_string(),
            role: "admin".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_row_uses_option_labels() {
        let row = user_row(&user("u1", "Minh"));
        assert_eq!(row[0], "u1");
        assert_eq!(row[1], "Minh Tran");
        assert_eq!(row[5], "Viet Nam");
        assert_eq!(row[6], "Phu Nhuan");
        assert_eq!(row[7], "Admin");
        assert_eq!(row.len(), user_columns().len());
    }

    #[test]
    fn test_navigation_wraps() {
        let mut screen = UserListScreen::new();
        screen.sync_selection(3);
        assert_eq!(screen.get_selected_index(), Some(0));

        screen.navigate_up();
        assert_eq!(screen.get_selected_index(), Some(2));
        screen.navigate_down();
        assert_eq!(screen.get_selected_index(), Some(0));
    }

    #[test]
    fn test_selection_clamps_after_removal() {
        let users = vec![user("u1", "Minh"), user("u2", "Lan")];
        let mut screen = UserListScreen::new();
        screen.sync_selection(2);
        screen.navigate_to_last();
        assert_eq!(screen.selected_user(&users).map(|u| u.key()), Some("u2"));

        screen.sync_selection(1);
        assert_eq!(screen.selected_user(&users[..1]).map(|u| u.key()), Some("u1"));

        screen.sync_selection(0);
        assert!(screen.selected_user(&[]).is_none());
    }

    #[test]
    fn test_draw_shows_rows_and_footer() {
        let backend = TestBackend::new(160, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let users = vec![user("u1", "Minh"), user("u2", "Lan")];
        let metadata = PageMetadata {
            limit: 1000,
            page: 2,
            total: 2,
        };
        let mut screen = UserListScreen::new();

        terminal
            .draw(|f| {
                let area = f.size();
                screen.draw(f, area, &users, &metadata, true)
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Minh Tran"));
        assert!(text.contains("Lan Tran"));
        assert!(text.contains("Page 2 | Limit 1000 | Total 2"));
    }
}
