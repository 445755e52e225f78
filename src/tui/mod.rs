//! Terminal form front end.

pub mod state;
pub mod view;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crate::api;
use crate::config::Config;
use crate::error::Result;
use crate::lookup::{lookup, UNABLE_TO_GENERATE};
use crate::sink;
use crate::wiki::ArticleSource;
use state::FormState;

type Term = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Generate,
    FetchKeywords,
    Clear,
    Quit,
}

/// Owns the form state and runs the operations behind its commands.
pub struct App {
    config: Config,
    source: Arc<dyn ArticleSource>,
    pub state: FormState,
}

impl App {
    pub fn new(config: Config, source: Arc<dyn ArticleSource>) -> Self {
        Self {
            config,
            source,
            state: FormState::new(),
        }
    }

    /// Applies editing keys directly and maps command keys to an [`Action`].
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => Some(Action::Quit),
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => Some(Action::Clear),
            (KeyCode::Char('k'), KeyModifiers::CONTROL) => Some(Action::FetchKeywords),
            (KeyCode::Enter, _) => Some(Action::Generate),
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) | (KeyCode::Up, _) | (KeyCode::Down, _) => {
                self.state.switch_focus();
                None
            }
            (KeyCode::Backspace, _) => {
                self.state.backspace();
                None
            }
            (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.insert_char(ch);
                None
            }
            _ => None,
        }
    }

    pub async fn generate(&mut self) {
        let keywords = self.state.keywords();
        match lookup(self.source.as_ref(), &keywords.primary, &keywords.secondary).await {
            Some(text) => {
                self.state.show_text(text.as_str());
                match sink::record(&self.config.output_path, &keywords, &text) {
                    Ok(()) => self
                        .state
                        .set_status(format!("Saved to {}", self.config.output_path.display())),
                    Err(err) => {
                        tracing::warn!(error = %err, "could not record result");
                        self.state.set_status(format!("Could not save result: {}", err));
                    }
                }
            }
            None => {
                tracing::warn!(keywords = %keywords, "{}", UNABLE_TO_GENERATE);
                self.state.show_error();
                self.state.set_status("");
            }
        }
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Serves one exchange and shows what it produced.
    pub async fn fetch_keywords(&mut self) {
        match api::serve_once(&self.config, self.source.clone()).await {
            Ok(Some(outcome)) => {
                self.state.set_keywords(&outcome.keywords);
                if outcome.found() {
                    self.state.show_text(outcome.reply.as_str());
                } else {
                    self.state.show_error();
                }
                self.state.set_status(format!(
                    "Replied to exchange at {}",
                    outcome.received_at.format("%H:%M:%S")
                ));
            }
            Ok(None) => {
                self.state.set_status(format!(
                    "No request received within {}s",
                    self.config.exchange_timeout.as_secs()
                ));
            }
            Err(err) => {
                tracing::warn!(error = %err, "exchange failed");
                self.state.set_status(format!("Exchange failed: {}", err));
            }
        }
    }

    /// Marks the form busy and repaints it before a blocking command runs.
    fn begin_busy(&mut self, term: &mut Term) -> Result<()> {
        self.state.busy = true;
        term.draw(|frame| view::draw(frame, &self.state))?;
        Ok(())
    }

    async fn generate_blocking(&mut self, term: &mut Term) -> Result<()> {
        self.begin_busy(term)?;
        self.generate().await;
        self.state.busy = false;
        Ok(())
    }

    async fn fetch_keywords_blocking(&mut self, term: &mut Term) -> Result<()> {
        self.state
            .set_status(format!("waiting for a request on {}", self.config.exchange_addr));
        self.begin_busy(term)?;
        self.fetch_keywords().await;
        self.state.busy = false;
        Ok(())
    }
}

fn setup_terminal() -> Result<Term> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    let mut term = Terminal::new(CrosstermBackend::new(stdout))?;
    term.clear()?;
    Ok(term)
}

fn restore_terminal(term: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(term.backend_mut(), LeaveAlternateScreen)?;
    term.show_cursor()?;
    Ok(())
}

/// Runs the form until the user quits. Commands block input until they finish.
pub async fn run(config: Config, source: Arc<dyn ArticleSource>) -> Result<()> {
    let mut app = App::new(config, source);
    let mut term = setup_terminal()?;

    let result = event_loop(&mut app, &mut term).await;
    restore_terminal(&mut term)?;
    result
}

async fn event_loop(app: &mut App, term: &mut Term) -> Result<()> {
    loop {
        term.draw(|frame| view::draw(frame, &app.state))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue,
        };

        match app.handle_key(key) {
            Some(Action::Quit) => return Ok(()),
            Some(Action::Clear) => app.clear(),
            Some(Action::Generate) => app.generate_blocking(term).await?,
            Some(Action::FetchKeywords) => app.fetch_keywords_blocking(term).await?,
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::tui::state::Display;
    use async_trait::async_trait;

    struct OneArticle;

    #[async_trait]
    impl ArticleSource for OneArticle {
        async fn fetch_article(&self, title: &str) -> Result<Option<String>> {
            if title.eq_ignore_ascii_case("cat") {
                Ok(Some("<p>The cat is a small mammal.</p>".to_string()))
            } else {
                Ok(None)
            }
        }
    }

    fn app_in(dir: &std::path::Path) -> App {
        let mut config = Config::from_vars(|_| None).unwrap();
        config.output_path = dir.join("output.csv");
        App::new(config, Arc::new(OneArticle))
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn keys_map_to_actions() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());

        assert_eq!(app.handle_key(press(KeyCode::Enter, KeyModifiers::NONE)), Some(Action::Generate));
        assert_eq!(app.handle_key(press(KeyCode::Char('l'), KeyModifiers::CONTROL)), Some(Action::Clear));
        assert_eq!(app.handle_key(press(KeyCode::Char('k'), KeyModifiers::CONTROL)), Some(Action::FetchKeywords));
        assert_eq!(app.handle_key(press(KeyCode::Esc, KeyModifiers::NONE)), Some(Action::Quit));

        assert_eq!(app.handle_key(press(KeyCode::Char('C'), KeyModifiers::SHIFT)), None);
        app.handle_key(press(KeyCode::Tab, KeyModifiers::NONE));
        app.handle_key(press(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(app.state.primary, "C");
        assert_eq!(app.state.secondary, "x");
    }

    #[tokio::test]
    async fn generate_shows_and_records_the_paragraph() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.state.primary = "cat".into();
        app.state.secondary = "mammal".into();

        app.generate().await;

        assert_eq!(app.state.display, Display::Text("The cat is a small mammal.".into()));
        let written = std::fs::read_to_string(dir.path().join("output.csv")).unwrap();
        assert_eq!(written, "input_keywords,output_content\ncat;mammal,The cat is a small mammal.\n");
    }

    #[tokio::test]
    async fn generate_without_match_shows_error_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.state.primary = "dog".into();
        app.state.secondary = "wolf".into();

        app.generate().await;

        assert_eq!(app.state.display, Display::Error(UNABLE_TO_GENERATE.into()));
        assert!(!dir.path().join("output.csv").exists());
    }
}
