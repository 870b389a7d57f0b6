//! Courses screen: read-only list with credit and instructor filters.

use campus_core::{
  course::{Course, credit_options, unique_instructors},
  filter::{CourseCriteria, cycle_option},
  record::RecordStore,
  service::DataService,
};
use crossterm::event::{KeyCode, KeyEvent};

use super::{clamp_cursor, failure_message};

#[derive(Debug, Clone, Default)]
pub struct CoursesView {
  pub store:    RecordStore<Course, CourseCriteria>,
  pub loading:  bool,
  pub error:    String,
  pub cursor:   usize,
  /// Course whose detail panel is expanded.
  pub selected: Option<u32>,
}

impl CoursesView {
  pub fn cursor_course(&self) -> Option<&Course> {
    self.store.filtered().get(self.cursor)
  }

  pub fn selected_course(&self) -> Option<&Course> {
    self.selected.and_then(|id| self.store.get(id))
  }

  fn clamp(&mut self) {
    self.cursor = clamp_cursor(self.cursor, self.store.filtered().len());
  }

  pub async fn load<S: DataService>(&mut self, api: &S) {
    self.loading = true;
    self.error.clear();
    match api.list_courses().await {
      Ok(courses) => {
        tracing::info!(count = courses.len(), "loaded courses");
        self.store.replace_all(courses);
        self.clamp();
      }
      Err(e) => {
        tracing::error!(error = %e, "error loading courses");
        self.error = failure_message("load", "courses");
      }
    }
    self.loading = false;
  }

  /// Expand the detail panel for `id`, or collapse it if already expanded.
  pub fn toggle_details(&mut self, id: u32) {
    self.selected = if self.selected == Some(id) { None } else { Some(id) };
  }

  pub fn cycle_credits_filter(&mut self) {
    let options: Vec<String> = credit_options(self.store.raw())
      .iter()
      .map(u32::to_string)
      .collect();
    let next = cycle_option(&self.store.criteria().credits, &options);
    self.store.update_criteria(|c| c.credits = next);
    self.clamp();
  }

  pub fn cycle_instructor_filter(&mut self) {
    let options: Vec<String> = unique_instructors(self.store.raw())
      .into_iter()
      .map(str::to_owned)
      .collect();
    let next = cycle_option(&self.store.criteria().instructor, &options);
    self.store.update_criteria(|c| c.instructor = next);
    self.clamp();
  }

  pub fn clear_filters(&mut self) {
    self.store.clear_filters();
    self.cursor = 0;
  }

  pub fn handle_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.store.filtered().len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }
      KeyCode::Enter => {
        if let Some(id) = self.cursor_course().map(|c| c.id) {
          self.toggle_details(id);
        }
      }
      KeyCode::Char('n') => self.cycle_credits_filter(),
      KeyCode::Char('i') => self.cycle_instructor_filter(),
      KeyCode::Char('c') => self.clear_filters(),
      _ => {}
    }
  }
}
