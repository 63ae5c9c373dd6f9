//! Common event handlers for the admin TUI
//!
//! Key handling for the form and the user list, shared so both the app loop
//! and the tests drive the same mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::events::AppEvent;
use super::traits::{FormHandler, Navigable};

/// Common keyboard event handling utilities
pub struct CommonKeyHandler;

impl CommonKeyHandler {
    /// Handle navigation keys for list-based panels
    pub fn handle_navigation_keys<T: Navigable>(
        navigable: &mut T,
        key: KeyEvent,
    ) -> Option<AppEvent> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                navigable.navigate_up();
                Some(AppEvent::None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                navigable.navigate_down();
                Some(AppEvent::None)
            }
            KeyCode::Home => {
                navigable.navigate_to_first();
                Some(AppEvent::SetStatus("First user".to_string()))
            }
            KeyCode::End => {
                navigable.navigate_to_last();
                Some(AppEvent::SetStatus("Last user".to_string()))
            }
            _ => None,
        }
    }

    /// Handle user list actions (edit, delete, pagination)
    pub fn handle_list_keys(key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('e') => Some(AppEvent::EditSelected),
            KeyCode::Delete | KeyCode::Char('d') => Some(AppEvent::DeleteSelected),
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => Some(AppEvent::NextPage),
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => Some(AppEvent::PreviousPage),
            KeyCode::Char('a') => Some(AppEvent::NewUser),
            KeyCode::Tab | KeyCode::Char('f') => Some(AppEvent::FocusForm),
            KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
            KeyCode::Char('q') => Some(AppEvent::Quit),
            _ => None,
        }
    }

    /// Handle form navigation and input
    pub fn handle_form_keys<T: FormHandler>(
        form: &mut T,
        key: KeyEvent,
    ) -> Option<AppEvent> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                form.next_field();
                Some(AppEvent::SetStatus(format!(
                    "Field {}/{}",
                    form.get_current_field() + 1,
                    form.get_field_count()
                )))
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.previous_field();
                Some(AppEvent::SetStatus(format!(
                    "Field {}/{}",
                    form.get_current_field() + 1,
                    form.get_field_count()
                )))
            }
            KeyCode::Enter => Some(AppEvent::SubmitForm),
            KeyCode::F(5) => Some(AppEvent::ResetForm),
            KeyCode::Esc => Some(AppEvent::FocusList),
            KeyCode::Left => {
                form.handle_left();
                Some(AppEvent::None)
            }
            KeyCode::Right => {
                form.handle_right();
                Some(AppEvent::None)
            }
            KeyCode::Home => {
                form.handle_home();
                Some(AppEvent::None)
            }
            KeyCode::End => {
                form.handle_end();
                Some(AppEvent::None)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.handle_char_input(c);
                Some(AppEvent::None)
            }
            KeyCode::Backspace => {
                form.handle_backspace();
                Some(AppEvent::None)
            }
            KeyCode::Delete => {
                form.handle_delete();
                Some(AppEvent::None)
            }
            _ => None,
        }
    }

    /// Handle keys that work regardless of focus
    pub fn handle_global_keys(key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(AppEvent::Quit)
            }
            KeyCode::F(1) => Some(AppEvent::ToggleHelp),
            _ => None,
        }
    }
}
