//! Input handling abstractions.
//!
//! Key events are translated into [`Action`]s by small mode-specific
//! handlers, so keybindings can be tested without an `App` or a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::AppMode;

/// Something the user asked the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the application.
    Quit,
    /// Show or hide the keybinding help.
    ToggleHelp,
    /// Hide the error banner.
    DismissBanner,
    /// Select the slide to the right in the timeline.
    SelectNext,
    /// Select the slide to the left in the timeline.
    SelectPrevious,
    /// Append a blank slide.
    AddSlide,
    /// Delete the active slide.
    DeleteSlide,
    /// Move editor focus down.
    FocusNext,
    /// Move editor focus up.
    FocusPrevious,
    /// Start typing into the focused text field.
    BeginEdit,
    /// Step the focused value field forward.
    Increase,
    /// Step the focused value field backward.
    Decrease,
    /// Give the active slide a random background.
    RandomizeBackground,
    /// Ask for a local image path.
    BeginImport,
    /// Start typing a generation topic.
    BeginPrompt,
    /// Start autoplay.
    Play,
    /// Leave autoplay.
    ClosePlayer,
    /// Type a character.
    Insert(char),
    /// Delete the last typed character.
    Backspace,
    /// Paste from the clipboard.
    Paste,
    /// Confirm the text being typed.
    Submit,
    /// Abandon the text being typed.
    Cancel,
}

/// Result of processing an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// The key maps to an action.
    Action(Action),
    /// The input was ignored (not applicable to this handler).
    Ignored,
}

/// Context passed to input handlers.
#[derive(Debug, Clone, Copy)]
pub struct InputContext {
    /// Current application mode.
    pub mode: AppMode,
    /// Whether help is currently shown.
    pub show_help: bool,
    /// Whether the error banner is visible.
    pub has_banner: bool,
}

/// Trait for handling keyboard input.
///
/// Implementations of this trait handle input for specific modes
/// or input contexts.
pub trait InputHandler {
    /// Handle a key event.
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult;

    /// Get the name of this handler (for debugging).
    fn name(&self) -> &'static str;
}

/// Handler for global shortcuts (help, quit).
#[derive(Debug, Default)]
pub struct GlobalHandler;

impl InputHandler for GlobalHandler {
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputResult::Action(Action::Quit);
        }

        if key.code == KeyCode::F(1) {
            return InputResult::Action(Action::ToggleHelp);
        }

        // ? is a literal character while typing
        let typing = matches!(ctx.mode, AppMode::Prompt | AppMode::Editing(_) | AppMode::ImportPath);
        if key.code == KeyCode::Char('?') && !typing {
            return InputResult::Action(Action::ToggleHelp);
        }

        if ctx.show_help && key.code == KeyCode::Esc {
            return InputResult::Action(Action::ToggleHelp);
        }

        InputResult::Ignored
    }

    fn name(&self) -> &'static str {
        "GlobalHandler"
    }
}

/// Handler for the deck view: timeline, canvas and editor sidebar.
#[derive(Debug, Default)]
pub struct DeckHandler;

impl InputHandler for DeckHandler {
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        let action = match key.code {
            KeyCode::Esc if ctx.has_banner => Action::DismissBanner,
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Left | KeyCode::Char('h') => Action::SelectPrevious,
            KeyCode::Right | KeyCode::Char('l') => Action::SelectNext,
            KeyCode::Up | KeyCode::Char('k') => Action::FocusPrevious,
            KeyCode::Down | KeyCode::Char('j') => Action::FocusNext,
            KeyCode::Enter | KeyCode::Char('e') => Action::BeginEdit,
            KeyCode::Char('+' | '=' | ']') => Action::Increase,
            KeyCode::Char('-' | '[') => Action::Decrease,
            KeyCode::Char('a') => Action::AddSlide,
            KeyCode::Char('d') | KeyCode::Delete => Action::DeleteSlide,
            KeyCode::Char('r') => Action::RandomizeBackground,
            KeyCode::Char('i') => Action::BeginImport,
            KeyCode::Char('g' | '/') => Action::BeginPrompt,
            KeyCode::Char('p') | KeyCode::F(5) => Action::Play,
            _ => return InputResult::Ignored,
        };
        InputResult::Action(action)
    }

    fn name(&self) -> &'static str {
        "DeckHandler"
    }
}

/// Handler for any single-line text entry (topic, field text, file path).
#[derive(Debug, Default)]
pub struct TextEntryHandler;

impl InputHandler for TextEntryHandler {
    fn handle(&mut self, key: KeyEvent, _ctx: &InputContext) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Char('v') if ctrl => Action::Paste,
            KeyCode::Char(_) if ctrl => return InputResult::Ignored,
            KeyCode::Char(c) => Action::Insert(c),
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Enter => Action::Submit,
            KeyCode::Esc => Action::Cancel,
            _ => return InputResult::Ignored,
        };
        InputResult::Action(action)
    }

    fn name(&self) -> &'static str {
        "TextEntryHandler"
    }
}

/// Handler for full-screen autoplay.
#[derive(Debug, Default)]
pub struct PlayerHandler;

impl InputHandler for PlayerHandler {
    fn handle(&mut self, key: KeyEvent, _ctx: &InputContext) -> InputResult {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | 'x') => InputResult::Action(Action::ClosePlayer),
            _ => InputResult::Ignored,
        }
    }

    fn name(&self) -> &'static str {
        "PlayerHandler"
    }
}

/// Route a key through the global handler, then the handler for the current mode.
pub fn dispatch(key: KeyEvent, ctx: &InputContext) -> Option<Action> {
    if let InputResult::Action(action) = GlobalHandler.handle(key, ctx) {
        return Some(action);
    }
    if ctx.show_help {
        return None;
    }

    let result = match ctx.mode {
        AppMode::Deck => DeckHandler.handle(key, ctx),
        AppMode::Prompt | AppMode::Editing(_) | AppMode::ImportPath => {
            TextEntryHandler.handle(key, ctx)
        }
        AppMode::Player => PlayerHandler.handle(key, ctx),
    };
    match result {
        InputResult::Action(action) => {
            tracing::trace!(?action, "key dispatched");
            Some(action)
        }
        InputResult::Ignored => None,
    }
}
