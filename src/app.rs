use crate::events::AppEvent;
use crate::models::default_categories;

pub const UNKNOWN_ERROR_MESSAGE: &str = "未知のエラーが発生しました。";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded(Vec<String>),
    Failed(String),
}

#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub exit_pending: bool,
    pub request: RequestState,
    pub spinner_tick: usize,
    categories: Vec<String>,
    selected: usize,
}

impl App {
    /// `categories` must be non-empty; `config::load_config_from` rejects an empty list.
    ///
    /// # Panics
    ///
    /// Panics when `categories` is empty.
    pub fn new(categories: Vec<String>) -> Self {
        assert!(!categories.is_empty(), "App needs at least one category");

        Self {
            should_quit: false,
            show_help: false,
            exit_pending: false,
            request: RequestState::Idle,
            spinner_tick: 0,
            categories,
            selected: 0,
        }
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }

    pub const fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn selected_category(&self) -> &str {
        &self.categories[self.selected]
    }

    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.request, RequestState::Loading)
    }

    /// The trigger and the selector are both disabled while a request is in flight.
    pub const fn can_generate(&self) -> bool {
        !self.is_loading()
    }

    pub fn select_next(&mut self) {
        if self.can_generate() {
            self.selected = (self.selected + 1) % self.categories.len();
        }
    }

    pub fn select_previous(&mut self) {
        if self.can_generate() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.categories.len() - 1);
        }
    }

    /// Clear the previous outcome and enter the loading state.
    ///
    /// Returns the category to request, or `None` when a request is already in flight.
    pub fn begin_generation(&mut self) -> Option<String> {
        if !self.can_generate() {
            return None;
        }
        self.request = RequestState::Loading;
        self.spinner_tick = 0;
        Some(self.selected_category().to_string())
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        if !self.is_loading() {
            return;
        }
        self.request = match event {
            AppEvent::NamesGenerated(names) => RequestState::Succeeded(names),
            AppEvent::GenerationFailed(message) => RequestState::Failed(message),
            AppEvent::GenerationAborted => RequestState::Failed(UNKNOWN_ERROR_MESSAGE.to_string()),
        };
    }

    pub fn names(&self) -> &[String] {
        match &self.request {
            RequestState::Succeeded(names) => names.as_slice(),
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.request {
            RequestState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub const fn tick(&mut self) {
        if self.is_loading() {
            self.spinner_tick = self.spinner_tick.wrapping_add(1);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(default_categories())
    }
}
