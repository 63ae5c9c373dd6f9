//! Main TUI application state and logic

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::{debug, warn};

use super::{
    events::AppEvent,
    handlers::CommonKeyHandler,
    operations::{SubmitOutcome, UserSync},
    screens::{UserForm, UserListScreen},
    ui::centered_rect,
};
use crate::api::UserApi;
use crate::config::Config;

/// How long to wait for a key before applying finished remote calls
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Which panel receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    List,
}

/// Main TUI application state
pub struct App {
    pub sync: UserSync,
    pub form: UserForm,
    pub list: UserListScreen,
    pub focus: Focus,

    pub should_quit: bool,
    pub show_help_popup: bool,
}

impl App {
    pub fn new(api: Arc<dyn UserApi>, config: &Config) -> Self {
        Self {
            sync: UserSync::new(api, config),
            form: UserForm::new(),
            list: UserListScreen::new(),
            focus: Focus::Form,
            should_quit: false,
            show_help_popup: false,
        }
    }

    /// Run the main application loop. Remote calls complete in the
    /// background and are applied between key events.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.sync.start_load();

        loop {
            terminal.draw(|f| self.draw(f))?;

            if crossterm::event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = crossterm::event::read()? {
                    self.handle_key_event(key)?;
                }
            }

            self.apply_completed();

            if self.should_quit {
                break;
            }

            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Apply every remote call that has finished since the last tick
    pub fn apply_completed(&mut self) {
        if self.sync.drain(&mut self.form) > 0 {
            self.list.sync_selection(self.sync.users().len());
        }
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if let Some(event) = CommonKeyHandler::handle_global_keys(key) {
            self.dispatch(event);
            return Ok(());
        }

        // Any key closes the help popup
        if self.show_help_popup {
            self.show_help_popup = false;
            return Ok(());
        }

        let event = match self.focus {
            Focus::Form => CommonKeyHandler::handle_form_keys(&mut self.form.form, key),
            Focus::List => CommonKeyHandler::handle_navigation_keys(&mut self.list, key)
                .or_else(|| CommonKeyHandler::handle_list_keys(key)),
        };

        if let Some(event) = event {
            self.dispatch(event);
        }

        Ok(())
    }

    /// Apply an event to the application state
    pub fn dispatch(&mut self, event: AppEvent) {
        debug!(?event, "Dispatching event");

        match event {
            AppEvent::Quit => self.should_quit = true,
            AppEvent::ToggleHelp => self.show_help_popup = !self.show_help_popup,
            AppEvent::FocusForm => self.focus = Focus::Form,
            AppEvent::FocusList => self.focus = Focus::List,
            AppEvent::NewUser => {
                self.form.reset();
                self.focus = Focus::Form;
                self.sync.notices.info("New user");
            }
            AppEvent::SubmitForm => self.submit_form(),
            AppEvent::ResetForm => {
                self.form.reset();
                self.sync.notices.info("Form cleared");
            }
            AppEvent::EditSelected => {
                if let Some(id) = self.selected_id() {
                    if self.sync.begin_edit(&mut self.form, &id) {
                        self.focus = Focus::Form;
                        self.sync.notices.info(format!("Editing user {}", id));
                    }
                }
            }
            AppEvent::DeleteSelected => {
                if let Some(id) = self.selected_id() {
                    if self.sync.start_delete(&id) {
                        self.sync.notices.info(format!("Deleting user {}...", id));
                    }
                }
            }
            AppEvent::NextPage => {
                let page = self.sync.next_page();
                self.sync.notices.info(format!("Page {}", page));
            }
            AppEvent::PreviousPage => {
                let page = self.sync.prev_page();
                self.sync.notices.info(format!("Page {}", page));
            }
            AppEvent::SetStatus(message) => self.sync.notices.info(message),
            AppEvent::None => {}
        }
    }

    fn submit_form(&mut self) {
        match self.sync.submit(&mut self.form) {
            SubmitOutcome::Invalid => {
                let count = self.form.errors().len();
                self.sync
                    .notices
                    .error(format!("{} field(s) need attention", count));
            }
            SubmitOutcome::Sent => self.sync.notices.info("Saving user..."),
            SubmitOutcome::Updated => self.list.sync_selection(self.sync.users().len()),
            SubmitOutcome::UpdateSkipped => {}
        }
    }

    /// Key of the highlighted user. Records without an id cannot be
    /// edited or deleted.
    fn selected_id(&mut self) -> Option<String> {
        let id = self
            .list
            .selected_user(self.sync.users())
            .map(|u| u.key().to_string())?;
        if id.is_empty() {
            warn!("Selected user has no id");
            self.sync.notices.error("Selected user has no id");
            return None;
        }
        Some(id)
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(11),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(size);

        self.form.draw(f, chunks[0], self.focus == Focus::Form);
        self.list.draw(
            f,
            chunks[1],
            self.sync.users(),
            self.sync.store().metadata(),
            self.focus == Focus::List,
        );
        self.sync.notices.render(f, chunks[2], &self.idle_text());

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    /// Status line shown when there is no notification
    fn idle_text(&self) -> String {
        if !self.sync.is_loaded() {
            return "Loading users...".to_string();
        }
        if self.sync.pending() > 0 {
            return "Waiting for the server...".to_string();
        }
        match self.focus {
            Focus::Form => {
                "Form | Tab/↑↓: Fields | ←→/Space: Options | Enter: Submit | F5: Reset | Esc: List | F1: Help"
                    .to_string()
            }
            Focus::List => {
                "List | ↑↓: Select | Enter: Edit | d: Delete | ←→: Page | a: New | Tab: Form | q: Quit"
                    .to_string()
            }
        }
    }

    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 70, area);

        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.help_text())
            .block(
                Block::default()
                    .title("Help - Shortcuts")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        f.render_widget(help_popup, popup_area);
    }

    fn help_text(&self) -> String {
        let global_help = "Global:\n\
            Ctrl+C - Quit\n\
            F1 - Toggle this help\n\n";

        let panel_help = match self.focus {
            Focus::Form => {
                "Form:\n\
                Tab / ↓ - Next field\n\
                Shift+Tab / ↑ - Previous field\n\
                ←/→ - Move cursor or change option\n\
                Home/End - Start/end of text\n\
                Space - Change option or toggle billing\n\
                Enter - Submit\n\
                F5 - Clear form\n\
                Esc - Go to user list"
            }
            Focus::List => {
                "User list:\n\
                ↑/↓ - Select user\n\
                Home/End - First/last user\n\
                Enter / e - Edit user\n\
                d / Delete - Delete user\n\
                →/n/PgDn - Next page\n\
                ←/p/PgUp - Previous page\n\
                a - New user\n\
                Tab / f - Go to form\n\
                q - Quit"
            }
        };

        format!("{}{}", global_help, panel_help)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin_tui::screens::UserField;
    use crate::admin_tui::traits::Navigable;
    use crate::api::{ApiError, LocalUserApi, SignupRequest, UserPage};
    use crate::models::{PageMetadata, UserRecord};
    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use tokio::sync::Semaphore;

    impl App {
        async fn settle(&mut self) {
            self.sync.settle(&mut self.form).await;
            self.list.sync_selection(self.sync.users().len());
        }
    }

    /// Backend whose signups block until a permit is released
    struct SlowSignupApi {
        release: Semaphore,
    }

    impl SlowSignupApi {
        fn new() -> Self {
            Self {
                release: Semaphore::new(0),
            }
        }
    }

    #[async_trait]
    impl UserApi for SlowSignupApi {
        async fn list_users(&self, page: i64, limit: u32) -> Result<UserPage, ApiError> {
            Ok(UserPage {
                users: Vec::new(),
                metadata: PageMetadata {
                    limit,
                    page,
                    total: 0,
                },
            })
        }

        async fn create_user(&self, request: &SignupRequest) -> Result<UserRecord, ApiError> {
            let _permit = self.release.acquire().await;
            Ok(UserRecord {
                server_id: Some("slow-1".to_string()),
                first_name: request.data.first_name.clone(),
                ..Default::default()
            })
        }

        async fn delete_user(&self, _id: &str) -> Result<(), ApiError> {
            Ok(())
        }
    }

    fn fill_form(app: &mut App) {
        let form = &mut app.form;
        form.set_value(UserField::FirstName, "Minh12");
        form.set_value(UserField::LastName, "Vo1234");
        form.set_value(UserField::Email, "minh@example.com");
        form.set_value(UserField::Address, "3 Tran Phu");
        form.set_value(UserField::City, "Hue");
        form.set_value(UserField::Country, "VN");
        form.set_value(UserField::State, "Q1");
        form.set_value(UserField::Role, "admin");
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn user(id: &str, city: &str) -> UserRecord {
        UserRecord {
            id: Some(id.to_string()),
            first_name: "Thanh1".to_string(),
            last_name: "Pham11".to_string(),
            email: "thanh@example.com".to_string(),
            address: "9 Nguyen Hue".to_string(),
            city: city.to_string(),
            country: "VN".to_string(),
            state: "Q1".to_string(),
            role: "operator".to_string(),
            ..Default::default()
        }
    }

    async fn loaded_app(users: Vec<UserRecord>) -> App {
        let api = Arc::new(LocalUserApi::with_users(users));
        let mut app = App::new(api, &Config::default());
        app.sync.start_load();
        app.settle().await;
        app
    }

    #[tokio::test]
    async fn test_q_types_in_form_and_quits_from_list() {
        let mut app = loaded_app(Vec::new()).await;

        app.handle_key_event(key(KeyCode::Char('q'))).unwrap();
        assert!(!app.should_quit);
        assert_eq!(app.form.values().first_name, "q");

        app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.focus, Focus::List);
        app.handle_key_event(key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_edit_selected_then_submit_updates_in_place() {
        let mut app = loaded_app(vec![user("1", "Hanoi"), user("2", "Hue")]).await;
        app.focus = Focus::List;
        app.list.navigate_down();

        app.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.focus, Focus::Form);
        assert_eq!(app.form.editing_id(), Some("2"));

        app.form.set_value(UserField::City, "Da Lat");
        app.dispatch(AppEvent::SubmitForm);

        assert_eq!(app.sync.users()[1].city, "Da Lat");
        assert_eq!(app.sync.users()[0].city, "Hanoi");
        assert!(!app.form.is_edit_mode());
    }

    #[tokio::test]
    async fn test_delete_selected_removes_row() {
        let mut app = loaded_app(vec![user("1", "Hanoi"), user("2", "Hue")]).await;
        app.focus = Focus::List;

        app.handle_key_event(key(KeyCode::Char('d'))).unwrap();
        assert_eq!(app.sync.users().len(), 2);
        app.settle().await;

        assert_eq!(app.sync.users().len(), 1);
        assert_eq!(app.sync.users()[0].key(), "2");
        assert_eq!(app.list.get_selected_index(), Some(0));
    }

    #[tokio::test]
    async fn test_keys_handled_while_signup_is_outstanding() {
        let api = Arc::new(SlowSignupApi::new());
        let mut app = App::new(api.clone(), &Config::default());
        app.sync.start_load();
        app.settle().await;

        fill_form(&mut app);
        app.handle_key_event(key(KeyCode::Enter)).unwrap();
        tokio::task::yield_now().await;
        app.apply_completed();
        assert_eq!(app.sync.pending(), 1);
        assert!(app.sync.users().is_empty());

        // A second submit is not blocked
        app.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.sync.pending(), 2);

        app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.focus, Focus::List);
        app.handle_key_event(key(KeyCode::Right)).unwrap();
        assert_eq!(app.sync.store().metadata().page, 2);

        api.release.add_permits(2);
        app.settle().await;

        assert_eq!(app.sync.pending(), 0);
        assert_eq!(app.sync.users().len(), 1);
        assert_eq!(app.sync.users()[0].first_name, "Minh12");
        assert_eq!(app.form.values().first_name, "");
    }

    #[tokio::test]
    async fn test_quit_while_call_is_outstanding() {
        let api = Arc::new(SlowSignupApi::new());
        let mut app = App::new(api, &Config::default());
        fill_form(&mut app);
        app.dispatch(AppEvent::SubmitForm);

        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.should_quit);
        assert_eq!(app.sync.pending(), 1);
    }

    #[tokio::test]
    async fn test_record_without_id_cannot_be_edited_or_deleted() {
        let mut app = loaded_app(vec![UserRecord::default(), user("2", "Hue")]).await;
        app.focus = Focus::List;

        app.handle_key_event(key(KeyCode::Char('d'))).unwrap();
        assert_eq!(app.sync.pending(), 0);
        app.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.focus, Focus::List);
        assert!(!app.form.is_edit_mode());

        let notice = app.sync.notices.current().map(|n| n.message.clone());
        assert_eq!(notice.as_deref(), Some("Selected user has no id"));
        assert_eq!(app.sync.users().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_submit_reports_field_count() {
        let mut app = loaded_app(Vec::new()).await;
        app.dispatch(AppEvent::SubmitForm);

        let notice = app.sync.notices.current().map(|n| n.message.clone());
        assert_eq!(notice.as_deref(), Some("8 field(s) need attention"));
        assert!(app.sync.users().is_empty());
    }

    #[tokio::test]
    async fn test_help_popup_closes_on_any_key() {
        let mut app = loaded_app(Vec::new()).await;
        app.handle_key_event(key(KeyCode::F(1))).unwrap();
        assert!(app.show_help_popup);

        app.handle_key_event(key(KeyCode::Char('x'))).unwrap();
        assert!(!app.show_help_popup);
        assert_eq!(app.form.values().first_name, "");
    }

    #[tokio::test]
    async fn test_draw_renders_all_panels() {
        let mut app = loaded_app(vec![user("1", "Hanoi")]).await;
        let mut terminal = Terminal::new(TestBackend::new(160, 30)).unwrap();

        terminal.draw(|f| app.draw(f)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Personal Details - new user"));
        assert!(text.contains("Thanh1 Pham11"));
        assert!(text.contains("Page 1 | Limit 1000 | Total 1"));
    }
}
