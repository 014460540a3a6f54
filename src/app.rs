use arboard::Clipboard;
use crossterm::event::KeyEvent;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use crate::deck::{Deck, PartialSlide, Slide};
use crate::error::{Error, Result};
use crate::generation::{GeminiClient, SlideGenerator};
use crate::input::{self, Action, InputContext};
use crate::player::{PlayOutcome, Player, TokioScheduler};
use crate::services::editor::{apply_edit, import_image, Edit, EditField, EditorAction};

/// Banner text shown when generation fails for any reason other than a missing key.
pub const GENERATION_FAILED: &str = "Failed to generate slides. Ensure API Key is valid.";

/// Messages from background tasks back to the UI loop.
#[derive(Debug)]
pub enum AppUpdate {
    /// A generation request finished.
    SlidesGenerated(Result<Vec<PartialSlide>>),
}

/// Which view owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Timeline, canvas and editor sidebar.
    Deck,
    /// Typing a generation topic.
    Prompt,
    /// Typing into a text field of the active slide.
    Editing(EditField),
    /// Typing a local image path.
    ImportPath,
    /// Full-screen autoplay.
    Player,
}

/// Application state: the deck plus everything around it.
pub struct App {
    pub mode: AppMode,
    pub deck: Deck,
    pub player: Player,
    pub scheduler: TokioScheduler,
    pub focused_field: EditField,
    pub prompt: String,
    pub import_path: String,
    pub is_generating: bool,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
    pub show_help: bool,
    pub config: Config,
    should_quit: bool,
    generator: Option<Arc<dyn SlideGenerator>>,
    async_task_tx: mpsc::Sender<AppUpdate>,
    async_task_rx: mpsc::Receiver<AppUpdate>,
}

impl App {
    /// Build the app from the environment. Must run inside a tokio runtime.
    pub fn new() -> Self {
        // Bad optional values fall back per field inside load()
        let config = Config::load();

        // Initialize the generator if a key is available
        let generator = match GeminiClient::new(&config) {
            Ok(client) => Some(Arc::new(client) as Arc<dyn SlideGenerator>),
            Err(e) => {
                tracing::warn!("Slide generation disabled: {}", e);
                None
            }
        };

        Self::with_generator(config, generator)
    }

    /// Build the app around a given generator (or none).
    pub fn with_generator(config: Config, generator: Option<Arc<dyn SlideGenerator>>) -> Self {
        let (async_task_tx, async_task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            mode: AppMode::Deck,
            deck: Deck::new(),
            player: Player::new(),
            scheduler: TokioScheduler::new(),
            focused_field: EditField::default(),
            prompt: String::new(),
            import_path: String::new(),
            is_generating: false,
            error_message: None,
            status_message: None,
            show_help: false,
            config,
            should_quit: false,
            generator,
            async_task_tx,
            async_task_rx,
        }
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.player.close(&mut self.scheduler);
        self.should_quit = true;
    }

    /// Whether a generator is configured.
    pub fn can_generate(&self) -> bool {
        self.generator.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctx = InputContext {
            mode: self.mode,
            show_help: self.show_help,
            has_banner: self.error_message.is_some(),
        };
        if let Some(action) = input::dispatch(key, &ctx) {
            self.perform(action);
        }
    }

    /// Bracketed paste from the terminal; only applies while typing.
    pub fn handle_paste(&mut self, text: &str) {
        self.type_text(Edit::InsertStr(text.to_string()));
    }

    /// Execute one user action.
    pub fn perform(&mut self, action: Action) {
        self.status_message = None;
        match action {
            Action::Quit => self.quit(),
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::DismissBanner => self.error_message = None,
            Action::SelectNext => self.deck.select_next(),
            Action::SelectPrevious => self.deck.select_previous(),
            Action::AddSlide => self.deck.add(Slide::blank()),
            Action::DeleteSlide => {
                let id = self.deck.active_id().clone();
                // the last slide cannot go; this is silent
                self.deck.delete(&id);
            }
            Action::FocusNext => self.focused_field = self.focused_field.next(),
            Action::FocusPrevious => self.focused_field = self.focused_field.previous(),
            Action::BeginEdit => {
                if self.focused_field.is_text() {
                    self.mode = AppMode::Editing(self.focused_field);
                } else {
                    self.edit_active(self.focused_field, Edit::Increase);
                }
            }
            Action::Increase => self.edit_active(self.focused_field, Edit::Increase),
            Action::Decrease => self.edit_active(self.focused_field, Edit::Decrease),
            Action::RandomizeBackground => {
                self.edit_active(EditField::Background, Edit::RandomizeBackground);
            }
            Action::BeginImport => {
                self.import_path.clear();
                self.mode = AppMode::ImportPath;
            }
            Action::BeginPrompt => self.mode = AppMode::Prompt,
            Action::Play => self.start_playback(),
            Action::ClosePlayer => self.close_playback(),
            Action::Insert(c) => self.type_text(Edit::Insert(c)),
            Action::Backspace => self.type_text(Edit::Backspace),
            Action::Paste => {
                if let Some(text) = clipboard_read() {
                    self.type_text(Edit::InsertStr(text));
                }
            }
            Action::Submit => self.submit_text(),
            Action::Cancel => self.mode = AppMode::Deck,
        }
    }

    fn edit_active(&mut self, field: EditField, edit: Edit) {
        let active = self.deck.active();
        if let EditorAction::Modified(updated) = apply_edit(active, field, edit) {
            let id = active.id.clone();
            self.deck.update(&id, updated);
        }
    }

    fn type_text(&mut self, edit: Edit) {
        match self.mode {
            AppMode::Editing(field) => self.edit_active(field, edit),
            AppMode::Prompt => apply_to_buffer(&mut self.prompt, edit),
            AppMode::ImportPath => apply_to_buffer(&mut self.import_path, edit),
            AppMode::Deck | AppMode::Player => {}
        }
    }

    fn submit_text(&mut self) {
        match self.mode {
            AppMode::Prompt => {
                self.mode = AppMode::Deck;
                self.request_generation();
            }
            AppMode::ImportPath => {
                self.mode = AppMode::Deck;
                match import_image(&self.import_path) {
                    Ok(uri) => self.edit_active(EditField::Background, Edit::SetBackground(uri)),
                    Err(e) => self.error_message = Some(format!("Could not import image: {e}")),
                }
            }
            AppMode::Editing(_) | AppMode::Deck | AppMode::Player => self.mode = AppMode::Deck,
        }
    }

    /// Start autoplay over the current deck.
    pub fn start_playback(&mut self) {
        match self.player.play(self.deck.slides(), &mut self.scheduler) {
            PlayOutcome::Started => self.mode = AppMode::Player,
            PlayOutcome::NothingToPlay => {
                self.status_message = Some("No slides to play.".to_string());
            }
        }
    }

    /// Leave autoplay; the deck is left as it was.
    pub fn close_playback(&mut self) {
        self.player.close(&mut self.scheduler);
        self.mode = AppMode::Deck;
    }

    /// Send the prompt to the generator in the background.
    ///
    /// Blank topics and requests made while one is pending are ignored.
    pub fn request_generation(&mut self) {
        let topic = self.prompt.trim().to_string();
        if topic.is_empty() || self.is_generating {
            return;
        }

        self.error_message = None;
        let Some(generator) = self.generator.as_ref().map(Arc::clone) else {
            self.error_message = Some(Error::missing_credential().to_string());
            return;
        };

        self.is_generating = true;
        let tx_clone = self.async_task_tx.clone();

        tokio::spawn(async move {
            let result = generator.generate(&topic).await;
            if let Err(e) = tx_clone.send(AppUpdate::SlidesGenerated(result)).await {
                tracing::warn!("Dropping generation result: {}", e);
            }
        });
    }

    /// Drain fired player timers and finished background tasks. Called every tick.
    pub fn handle_updates(&mut self) {
        while let Some(id) = self.scheduler.poll_fired() {
            self.player.on_timer(id, &mut self.scheduler);
        }

        match self.async_task_rx.try_recv() {
            Ok(update) => self.apply_update(update),
            Err(mpsc::error::TryRecvError::Empty) => {}
            Err(mpsc::error::TryRecvError::Disconnected) => {
                tracing::warn!("Background task channel closed");
            }
        }
    }

    /// Wait for the next background update and apply it.
    pub async fn next_update(&mut self) -> bool {
        match self.async_task_rx.recv().await {
            Some(update) => {
                self.apply_update(update);
                true
            }
            None => false,
        }
    }

    fn apply_update(&mut self, update: AppUpdate) {
        match update {
            AppUpdate::SlidesGenerated(result) => {
                self.is_generating = false;
                match result {
                    Ok(partials) => {
                        let slides: Vec<Slide> =
                            partials.into_iter().map(Slide::from_partial).collect();
                        tracing::info!(count = slides.len(), "adding generated slides");
                        self.deck.add_many(slides);
                        self.prompt.clear();
                    }
                    Err(e) => {
                        tracing::warn!(
                            status = ?e.status(),
                            hint = e.hint().unwrap_or_default(),
                            "Slide generation failed: {}",
                            e
                        );
                        self.error_message = Some(GENERATION_FAILED.to_string());
                    }
                }
            }
        }
    }
}

fn apply_to_buffer(buffer: &mut String, edit: Edit) {
    match edit {
        Edit::Insert(c) => buffer.push(c),
        Edit::InsertStr(s) => buffer.push_str(&s.split_whitespace().collect::<Vec<_>>().join(" ")),
        Edit::Backspace => {
            buffer.pop();
        }
        _ => {}
    }
}

fn clipboard_read() -> Option<String> {
    Clipboard::new().ok()?.get_text().ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::types::{Layout, SlideId, Theme};

    /// Generator double that counts calls and returns a canned result.
    struct StubGenerator {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubGenerator {
        fn ok() -> Arc<Self> {
            Arc::new(Self { calls: AtomicUsize::new(0), fail: false })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self { calls: AtomicUsize::new(0), fail: true })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SlideGenerator for StubGenerator {
        async fn generate(&self, topic: &str) -> Result<Vec<PartialSlide>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Network("connection refused".into()));
            }
            Ok((1..=3)
                .map(|n| PartialSlide {
                    title: Some(format!("{topic} #{n}")),
                    content: Some("Generated".into()),
                    background_image: Some(format!("https://img/{n}")),
                    duration: Some(10),
                    theme: Some(Theme::Blue),
                    layout: Some(Layout::SplitRight),
                })
                .collect())
        }
    }

    fn app_with(stub: &Arc<StubGenerator>) -> App {
        let generator: Arc<dyn SlideGenerator> = Arc::clone(stub) as Arc<dyn SlideGenerator>;
        App::with_generator(Config::default(), Some(generator))
    }

    #[tokio::test]
    async fn generated_slides_are_appended_with_fresh_ids() {
        let stub = StubGenerator::ok();
        let mut app = app_with(&stub);
        app.perform(Action::AddSlide);
        let before: HashSet<SlideId> = app.deck.ids().cloned().collect();

        app.prompt = "Italian lunch".into();
        app.request_generation();
        assert!(app.is_generating);
        assert!(app.next_update().await);

        assert!(!app.is_generating);
        assert_eq!(app.deck.len(), before.len() + 3);
        let new_ids: HashSet<SlideId> = app.deck.slides()[before.len()..]
            .iter()
            .map(|s| s.id.clone())
            .collect();
        assert_eq!(new_ids.len(), 3);
        assert!(new_ids.is_disjoint(&before));

        let first_new = &app.deck.slides()[before.len()];
        assert_eq!(app.deck.active_id(), &first_new.id);
        assert_eq!(first_new.title, "Italian lunch #1");
        assert_eq!(first_new.layout, Layout::SplitRight);
        assert!(app.prompt.is_empty());
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn failed_generation_leaves_deck_and_shows_banner() {
        let stub = StubGenerator::failing();
        let mut app = app_with(&stub);
        app.prompt = "Weekend sale".into();
        app.request_generation();
        assert!(app.next_update().await);

        assert_eq!(app.deck.len(), 1);
        assert_eq!(app.error_message.as_deref(), Some(GENERATION_FAILED));
        assert!(!app.is_generating);
        assert_eq!(app.prompt, "Weekend sale");

        // still interactive
        app.perform(Action::AddSlide);
        assert_eq!(app.deck.len(), 2);
        app.perform(Action::DismissBanner);
        assert!(app.error_message.is_none());
    }

    #[tokio::test]
    async fn blank_topic_makes_no_call() {
        let stub = StubGenerator::ok();
        let mut app = app_with(&stub);
        app.prompt = "   \t ".into();
        app.request_generation();
        assert!(!app.is_generating);
        tokio::task::yield_now().await;
        app.handle_updates();
        assert_eq!(stub.calls(), 0);
        assert_eq!(app.deck.len(), 1);
    }

    #[tokio::test]
    async fn second_request_while_pending_is_ignored() {
        let stub = StubGenerator::ok();
        let mut app = app_with(&stub);
        app.prompt = "Coffee".into();
        app.request_generation();
        app.request_generation();
        assert!(app.next_update().await);
        assert_eq!(stub.calls(), 1);
        assert_eq!(app.deck.len(), 4);
    }

    #[tokio::test]
    async fn missing_key_is_reported_before_any_call() {
        let mut app = App::with_generator(Config::default(), None);
        assert!(!app.can_generate());
        app.prompt = "Coffee".into();
        app.request_generation();
        assert!(!app.is_generating);
        assert!(app.error_message.as_deref().unwrap().starts_with("API key is missing"));
        assert_eq!(app.deck.len(), 1);
    }

    #[tokio::test]
    async fn bad_generation_count_keeps_api_key() {
        std::env::set_var("API_KEY", "real-key");
        std::env::set_var("GENERATION_COUNT", "0");
        let app = App::new();
        std::env::remove_var("API_KEY");
        std::env::remove_var("GENERATION_COUNT");

        assert_eq!(app.config.api_key, "real-key");
        assert_eq!(app.config.slide_count, 3);
        assert!(app.can_generate());
    }

    #[tokio::test]
    async fn delete_refuses_last_slide_silently() {
        let mut app = App::with_generator(Config::default(), None);
        app.perform(Action::DeleteSlide);
        assert_eq!(app.deck.len(), 1);
        assert!(app.error_message.is_none());
    }

    #[tokio::test]
    async fn editing_routes_through_deck() {
        let mut app = App::with_generator(Config::default(), None);
        let id = app.deck.active_id().clone();
        app.perform(Action::BeginEdit);
        assert_eq!(app.mode, AppMode::Editing(EditField::Title));
        app.perform(Action::Insert('!'));
        app.perform(Action::Submit);
        assert_eq!(app.mode, AppMode::Deck);
        assert_eq!(app.deck.get(&id).unwrap().title, "Welcome to GenSignage!");

        app.perform(Action::FocusNext);
        app.perform(Action::FocusNext);
        app.perform(Action::FocusNext);
        app.perform(Action::FocusNext);
        assert_eq!(app.focused_field, EditField::Theme);
        app.perform(Action::Increase);
        assert_eq!(app.deck.active().theme, Theme::Light);
    }

    #[tokio::test]
    async fn playback_uses_snapshot_and_close_returns_to_deck() {
        let mut app = App::with_generator(Config::default(), None);
        app.perform(Action::AddSlide);
        app.perform(Action::Play);
        assert_eq!(app.mode, AppMode::Player);
        assert_eq!(app.player.snapshot_len(), 2);
        assert_eq!(app.scheduler.live_count(), 1);

        app.perform(Action::ClosePlayer);
        assert_eq!(app.mode, AppMode::Deck);
        assert!(!app.player.is_playing());
        assert_eq!(app.scheduler.live_count(), 0);
        assert_eq!(app.deck.len(), 2);
    }

    #[tokio::test]
    async fn import_failure_shows_banner() {
        let mut app = App::with_generator(Config::default(), None);
        app.perform(Action::BeginImport);
        for c in "/no/such/file.png".chars() {
            app.perform(Action::Insert(c));
        }
        app.perform(Action::Submit);
        assert_eq!(app.mode, AppMode::Deck);
        assert!(app.error_message.as_deref().unwrap().contains("Could not import image"));
    }
}
