use std::path::PathBuf;

use crate::core::{
    selection::Anchor,
    Action,
    View,
};

// Widgets push actions here instead of mutating app state while it is borrowed for drawing
#[derive(Debug, Clone)]
pub enum UiAction {
    // Store
    Apply(Action),

    // Sessions
    SubmitText(String),
    SubmitImage(PathBuf),

    // Popup
    SelectText { text: String, anchor: Anchor },
    ClosePopup,
    ToggleColorPicker,

    // Page
    DismissError,
    OpenSettings,
}

impl UiAction {
    pub fn navigate(view: View) -> Self {
        UiAction::Apply(Action::Navigate(view))
    }
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn apply(&mut self, action: Action) {
        self.actions.push(UiAction::Apply(action));
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}
