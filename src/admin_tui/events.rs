//! Events produced by key handling and consumed by the application shell

/// Application events that can be triggered from the form or the user list
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Quit the application
    Quit,
    /// Toggle the help popup
    ToggleHelp,
    /// Move keyboard focus to the form
    FocusForm,
    /// Move keyboard focus to the user list
    FocusList,
    /// Start a blank create-mode form
    NewUser,
    /// Validate and submit the form
    SubmitForm,
    /// Clear the form back to create-mode defaults
    ResetForm,
    /// Load the selected user into the form
    EditSelected,
    /// Delete the selected user
    DeleteSelected,
    /// Advance the page counter
    NextPage,
    /// Step the page counter back
    PreviousPage,
    /// Show a status message
    SetStatus(String),
    /// Key consumed, nothing else to do
    None,
}
