//! Application state machine and event dispatcher.

use std::sync::Arc;

use campus_core::service::DataService;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::{Display, EnumIter};

use crate::views::{courses::CoursesView, statistics::StatisticsView, students::StudentsView};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
pub enum Screen {
  #[default]
  Students,
  Courses,
  Statistics,
}

impl Screen {
  /// The digit key that switches to this screen.
  pub fn hotkey(self) -> char {
    match self {
      Self::Students => '1',
      Self::Courses => '2',
      Self::Statistics => '3',
    }
  }

  fn from_hotkey(c: char) -> Option<Self> {
    match c {
      '1' => Some(Self::Students),
      '2' => Some(Self::Courses),
      '3' => Some(Self::Statistics),
      _ => None,
    }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S> {
  /// Screen with keyboard focus.
  pub screen:      Screen,
  pub students:    StudentsView,
  pub courses:     CoursesView,
  pub statistics:  StatisticsView,
  /// Whether this process drives a real terminal. Nothing is fetched
  /// otherwise.
  pub interactive: bool,
  /// Shared data service.
  pub api:         Arc<S>,
}

impl<S> App<S> {
  /// The current screen's error message, if any.
  pub fn error(&self) -> &str {
    match self.screen {
      Screen::Students => &self.students.error,
      Screen::Courses => &self.courses.error,
      Screen::Statistics => &self.statistics.error,
    }
  }

  pub fn loading(&self) -> bool {
    match self.screen {
      Screen::Students => self.students.loading,
      Screen::Courses => self.courses.loading,
      Screen::Statistics => self.statistics.loading,
    }
  }

  fn captures_input(&self) -> bool {
    self.screen == Screen::Students && self.students.captures_input()
  }
}

impl<S: DataService> App<S> {
  pub fn new(api: S, interactive: bool) -> Self {
    Self {
      screen: Screen::default(),
      students: StudentsView::default(),
      courses: CoursesView::default(),
      statistics: StatisticsView::default(),
      interactive,
      api: Arc::new(api),
    }
  }

  /// Load the initial screen.
  pub async fn start(&mut self) {
    if !self.interactive {
      tracing::debug!("not interactive; skipping initial load");
      return;
    }
    self.reload().await;
  }

  /// Re-fetch the data behind the current screen.
  pub async fn reload(&mut self) {
    let api = Arc::clone(&self.api);
    match self.screen {
      Screen::Students => self.students.load(api.as_ref()).await,
      Screen::Courses => self.courses.load(api.as_ref()).await,
      Screen::Statistics => self.statistics.load(api.as_ref()).await,
    }
  }

  /// Show `screen` with fresh state. Views keep nothing between visits.
  pub async fn switch(&mut self, screen: Screen) {
    if screen == self.screen {
      return;
    }
    tracing::debug!(%screen, "switching screen");
    self.screen = screen;
    match screen {
      Screen::Students => self.students = StudentsView::default(),
      Screen::Courses => self.courses = CoursesView::default(),
      Screen::Statistics => self.statistics = StatisticsView::default(),
    }
    if self.interactive {
      self.reload().await;
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    if !self.captures_input() {
      match key.code {
        KeyCode::Char('q') => return false,
        KeyCode::Char('r') => {
          self.reload().await;
          return true;
        }
        KeyCode::Char(c) => {
          if let Some(screen) = Screen::from_hotkey(c) {
            self.switch(screen).await;
            return true;
          }
        }
        _ => {}
      }
    }

    let api = Arc::clone(&self.api);
    match self.screen {
      Screen::Students => self.students.handle_key(key, api.as_ref()).await,
      Screen::Courses => self.courses.handle_key(key),
      Screen::Statistics => {}
    }
    true
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;
  use crate::views::fake::FakeService;

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  #[tokio::test]
  async fn non_interactive_start_fetches_nothing() {
    let mut app = App::new(FakeService::seeded(), false);
    app.start().await;
    app.switch(Screen::Statistics).await;
    assert_eq!(app.api.calls(), 0);
    assert!(app.students.store.raw().is_empty());
  }

  #[tokio::test]
  async fn interactive_start_loads_students() {
    let mut app = App::new(FakeService::seeded(), true);
    app.start().await;
    assert_eq!(app.students.store.raw().len(), 5);
    assert_eq!(app.api.calls(), 1);
  }

  #[tokio::test]
  async fn hotkeys_switch_and_load() {
    let mut app = App::new(FakeService::seeded(), true);
    app.start().await;

    assert!(app.handle_key(key(KeyCode::Char('2'))).await);
    assert_eq!(app.screen, Screen::Courses);
    assert_eq!(app.courses.store.raw().len(), 5);

    assert!(app.handle_key(key(KeyCode::Char('3'))).await);
    assert_eq!(app.screen, Screen::Statistics);
    assert!(app.statistics.stats.is_some());
  }

  #[tokio::test]
  async fn switching_back_starts_from_fresh_state() {
    let mut app = App::new(FakeService::seeded(), true);
    app.start().await;
    app.handle_key(key(KeyCode::Char('m'))).await;
    assert!(app.students.store.has_active_filters());

    app.switch(Screen::Courses).await;
    app.switch(Screen::Students).await;
    assert!(!app.students.store.has_active_filters());
    assert_eq!(app.students.store.filtered().len(), 5);
  }

  #[tokio::test]
  async fn typing_in_search_does_not_trigger_globals() {
    let mut app = App::new(FakeService::seeded(), true);
    app.start().await;
    app.handle_key(key(KeyCode::Char('/'))).await;

    assert!(app.handle_key(key(KeyCode::Char('q'))).await);
    assert!(app.handle_key(key(KeyCode::Char('2'))).await);
    assert_eq!(app.screen, Screen::Students);
    assert_eq!(app.students.store.criteria().search, "q2");
  }

  #[tokio::test]
  async fn quit_keys() {
    let mut app = App::new(FakeService::seeded(), false);
    assert!(!app.handle_key(key(KeyCode::Char('q'))).await);
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(!app.handle_key(ctrl_c).await);
  }

  #[test]
  fn hotkeys_round_trip() {
    for screen in Screen::iter() {
      assert_eq!(Screen::from_hotkey(screen.hotkey()), Some(screen));
    }
  }
}
