//! Students screen: list, filters, add/edit form, confirmed delete.

use campus_core::{
  filter::{StudentCriteria, cycle_option},
  record::RecordStore,
  service::DataService,
  student::{NewStudent, Student, YEARS, available_majors},
  validate::validate_student_form,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{clamp_cursor, failure_message};

// ─── Form ─────────────────────────────────────────────────────────────────────

/// Which form input has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
  #[default]
  Name,
  Email,
  Major,
  Year,
}

impl FormField {
  fn next(self) -> Self {
    match self {
      Self::Name => Self::Email,
      Self::Email => Self::Major,
      Self::Major => Self::Year,
      Self::Year => Self::Name,
    }
  }

  fn prev(self) -> Self {
    match self {
      Self::Name => Self::Year,
      Self::Email => Self::Name,
      Self::Major => Self::Email,
      Self::Year => Self::Major,
    }
  }
}

/// The open add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
  pub fields:  NewStudent,
  /// Id of the student being edited; `None` when adding.
  pub editing: Option<u32>,
  pub focus:   FormField,
}

// ─── Controller ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct StudentsView {
  pub store:          RecordStore<Student, StudentCriteria>,
  /// Options for the major dropdown.
  pub majors:         Vec<String>,
  pub loading:        bool,
  /// Last validation or request failure; empty when there is none.
  pub error:          String,
  /// Cursor within the filtered list.
  pub cursor:         usize,
  pub form:           Option<StudentForm>,
  /// Student awaiting delete confirmation.
  pub pending_delete: Option<u32>,
  /// Whether keystrokes are going into the search box.
  pub search_active:  bool,
}

impl Default for StudentsView {
  fn default() -> Self {
    Self {
      store:          RecordStore::new(),
      majors:         available_majors(&[]),
      loading:        false,
      error:          String::new(),
      cursor:         0,
      form:           None,
      pending_delete: None,
      search_active:  false,
    }
  }
}

impl StudentsView {
  pub fn cursor_student(&self) -> Option<&Student> {
    self.store.filtered().get(self.cursor)
  }

  fn refresh_majors(&mut self) {
    self.majors = available_majors(self.store.raw());
  }

  fn clamp(&mut self) {
    self.cursor = clamp_cursor(self.cursor, self.store.filtered().len());
  }

  // ── Requests ──────────────────────────────────────────────────────────────

  /// Fetch every student, replacing the list on success.
  pub async fn load<S: DataService>(&mut self, api: &S) {
    self.loading = true;
    self.error.clear();
    match api.list_students().await {
      Ok(students) => {
        tracing::info!(count = students.len(), "loaded students");
        self.store.replace_all(students);
        self.refresh_majors();
        self.clamp();
      }
      Err(e) => {
        tracing::error!(error = %e, "error loading students");
        self.error = failure_message("load", "students");
      }
    }
    self.loading = false;
  }

  /// Validate the open form, recording the first problem in `error`.
  pub fn validate(&mut self) -> bool {
    let Some(form) = &self.form else { return false };
    match validate_student_form(&form.fields, self.store.raw(), form.editing) {
      Ok(()) => {
        self.error.clear();
        true
      }
      Err(e) => {
        self.error = e.to_string();
        false
      }
    }
  }

  /// Submit the open form as a create or an update.
  pub async fn submit<S: DataService>(&mut self, api: &S) {
    match self.form.as_ref().map(|f| f.editing) {
      Some(None) => self.add(api).await,
      Some(Some(_)) => self.update(api).await,
      None => {}
    }
  }

  pub async fn add<S: DataService>(&mut self, api: &S) {
    if !self.validate() {
      return;
    }
    let Some(fields) = self.form.as_ref().map(|f| f.fields.clone()) else { return };
    self.loading = true;
    match api.create_student(&fields).await {
      Ok(student) => {
        tracing::info!(id = student.id, "added student");
        self.store.push(student);
        self.reset_form();
        self.refresh_majors();
      }
      Err(e) => {
        tracing::error!(error = %e, "error adding student");
        self.error = failure_message("add", "student");
      }
    }
    self.loading = false;
  }

  pub async fn update<S: DataService>(&mut self, api: &S) {
    let Some(id) = self.form.as_ref().and_then(|f| f.editing) else { return };
    if !self.validate() {
      return;
    }
    let Some(fields) = self.form.as_ref().map(|f| f.fields.clone()) else { return };
    self.loading = true;
    match api.update_student(id, &fields).await {
      Ok(student) => {
        tracing::info!(id, "updated student");
        self.store.replace(student);
        self.reset_form();
        self.refresh_majors();
        self.clamp();
      }
      Err(e) => {
        tracing::error!(id, error = %e, "error updating student");
        self.error = failure_message("update", "student");
      }
    }
    self.loading = false;
  }

  /// Ask for confirmation before deleting `id`.
  pub fn request_delete(&mut self, id: u32) {
    if self.store.get(id).is_some() {
      self.pending_delete = Some(id);
    }
  }

  /// Answer the pending confirmation. Declining does nothing else.
  pub async fn confirm_delete<S: DataService>(&mut self, api: &S, confirmed: bool) {
    let Some(id) = self.pending_delete.take() else { return };
    if confirmed {
      self.delete(api, id).await;
    }
  }

  async fn delete<S: DataService>(&mut self, api: &S, id: u32) {
    self.loading = true;
    match api.delete_student(id).await {
      Ok(_) => {
        tracing::info!(id, "deleted student");
        self.store.remove(id);
        self.clamp();
      }
      Err(e) => {
        tracing::error!(id, error = %e, "error deleting student");
        self.error = failure_message("delete", "student");
      }
    }
    self.loading = false;
  }

  // ── Form management ───────────────────────────────────────────────────────

  pub fn open_add_form(&mut self) {
    self.form = Some(StudentForm::default());
    self.error.clear();
  }

  pub fn open_edit_form(&mut self, id: u32) {
    if let Some(student) = self.store.get(id) {
      self.form = Some(StudentForm {
        fields:  student.to_form(),
        editing: Some(id),
        focus:   FormField::Name,
      });
      self.error.clear();
    }
  }

  /// Close the form and forget its contents.
  pub fn reset_form(&mut self) {
    self.form = None;
    self.error.clear();
  }

  // ── Filters ───────────────────────────────────────────────────────────────

  pub fn cycle_major_filter(&mut self) {
    let next = cycle_option(&self.store.criteria().major, &self.majors);
    self.store.update_criteria(|c| c.major = next);
    self.clamp();
  }

  pub fn cycle_year_filter(&mut self) {
    let years: Vec<String> = YEARS.iter().map(u8::to_string).collect();
    let next = cycle_option(&self.store.criteria().year, &years);
    self.store.update_criteria(|c| c.year = next);
    self.clamp();
  }

  pub fn set_search(&mut self, search: String) {
    self.store.update_criteria(|c| c.search = search);
    self.cursor = 0;
  }

  pub fn clear_filters(&mut self) {
    self.store.clear_filters();
    self.search_active = false;
    self.cursor = 0;
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Whether this screen is capturing text input, so global shortcuts
  /// must not fire.
  pub fn captures_input(&self) -> bool {
    self.form.is_some() || self.search_active || self.pending_delete.is_some()
  }

  pub async fn handle_key<S: DataService>(&mut self, key: KeyEvent, api: &S) {
    if self.pending_delete.is_some() {
      match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm_delete(api, true).await,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
          self.confirm_delete(api, false).await
        }
        _ => {}
      }
      return;
    }
    if self.form.is_some() {
      self.handle_form_key(key, api).await;
      return;
    }
    if self.search_active {
      self.handle_search_key(key);
      return;
    }

    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.store.filtered().len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }
      KeyCode::Char('/') => self.search_active = true,
      KeyCode::Char('m') => self.cycle_major_filter(),
      KeyCode::Char('y') => self.cycle_year_filter(),
      KeyCode::Char('c') => self.clear_filters(),
      KeyCode::Char('a') => self.open_add_form(),
      KeyCode::Char('e') | KeyCode::Enter => {
        if let Some(id) = self.cursor_student().map(|s| s.id) {
          self.open_edit_form(id);
        }
      }
      KeyCode::Char('d') | KeyCode::Delete => {
        if let Some(id) = self.cursor_student().map(|s| s.id) {
          self.request_delete(id);
        }
      }
      _ => {}
    }
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    let mut search = self.store.criteria().search.clone();
    match key.code {
      KeyCode::Esc => {
        self.search_active = false;
        search.clear();
      }
      KeyCode::Enter => {
        self.search_active = false;
        return;
      }
      KeyCode::Backspace => {
        search.pop();
      }
      KeyCode::Char(c) => search.push(c),
      _ => return,
    }
    self.set_search(search);
  }

  async fn handle_form_key<S: DataService>(&mut self, key: KeyEvent, api: &S) {
    let Some(form) = self.form.as_mut() else { return };
    match key.code {
      KeyCode::Esc => self.reset_form(),
      KeyCode::Enter => self.submit(api).await,
      KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
      KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),
      _ if form.focus == FormField::Year => match key.code {
        KeyCode::Left => form.fields.year = form.fields.year.saturating_sub(1).max(1),
        KeyCode::Right => form.fields.year = (form.fields.year + 1).min(4),
        KeyCode::Char(c @ '1'..='4') => form.fields.year = c as u8 - b'0',
        _ => {}
      },
      // Ctrl-N steps through the known majors.
      KeyCode::Char('n')
        if form.focus == FormField::Major && key.modifiers.contains(KeyModifiers::CONTROL) =>
      {
        form.fields.major = cycle_option(&form.fields.major, &self.majors);
      }
      KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {}
      KeyCode::Backspace => {
        focused_text(form).pop();
      }
      KeyCode::Char(c) => focused_text(form).push(c),
      _ => {}
    }
  }
}

/// The text buffer behind the focused field. The year field has none and
/// falls back to the name.
fn focused_text(form: &mut StudentForm) -> &mut String {
  match form.focus {
    FormField::Name | FormField::Year => &mut form.fields.name,
    FormField::Email => &mut form.fields.email,
    FormField::Major => &mut form.fields.major,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::views::fake::{FakeService, student};

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  async fn loaded() -> (StudentsView, FakeService) {
    let api = FakeService::seeded();
    let mut view = StudentsView::default();
    view.load(&api).await;
    (view, api)
  }

  fn fill(view: &mut StudentsView, name: &str, email: &str, major: &str, year: u8) {
    let form = view.form.as_mut().unwrap();
    form.fields = NewStudent {
      name:  name.into(),
      email: email.into(),
      major: major.into(),
      year,
    };
  }

  #[tokio::test]
  async fn load_populates_store_and_majors() {
    let (view, _) = loaded().await;
    assert_eq!(view.store.raw().len(), 5);
    assert_eq!(view.store.filtered().len(), 5);
    assert!(view.majors.contains(&"Engineering".to_string()));
    assert!(!view.loading);
    assert!(view.error.is_empty());
  }

  #[tokio::test]
  async fn failed_load_keeps_previous_records() {
    let (mut view, api) = loaded().await;
    api.set_failing(true);
    view.load(&api).await;
    assert_eq!(view.error, "Failed to load students. Please try again.");
    assert_eq!(view.store.raw().len(), 5);
    assert!(!view.loading);
  }

  #[tokio::test]
  async fn add_appends_and_closes_form() {
    let (mut view, api) = loaded().await;
    view.open_add_form();
    fill(&mut view, "Frank Ocean", "frank@university.edu", "Chemistry", 1);
    view.add(&api).await;

    assert!(view.form.is_none());
    assert_eq!(view.store.raw().len(), 6);
    assert_eq!(view.store.raw().last().unwrap().id, 6);
    assert!(view.majors.contains(&"Chemistry".to_string()));
  }

  #[tokio::test]
  async fn invalid_form_makes_no_request() {
    let (mut view, api) = loaded().await;
    let before = api.calls();
    view.open_add_form();
    fill(&mut view, "", "bad", "", 1);
    view.add(&api).await;

    assert_eq!(view.error, "Name is required.");
    assert_eq!(api.calls(), before);
    assert!(view.form.is_some());
  }

  #[tokio::test]
  async fn duplicate_email_rejected_unless_editing_same_record() {
    let (mut view, api) = loaded().await;
    view.open_add_form();
    fill(&mut view, "Other Bob", "BOB.SMITH@university.edu", "Physics", 1);
    view.add(&api).await;
    assert_eq!(view.error, "A student with this email already exists.");

    view.open_edit_form(2);
    view.form.as_mut().unwrap().fields.major = "Physics".into();
    view.update(&api).await;
    assert!(view.error.is_empty(), "{}", view.error);
    assert_eq!(view.store.get(2).unwrap().major, "Physics");
  }

  #[tokio::test]
  async fn failed_add_leaves_records_untouched() {
    let (mut view, api) = loaded().await;
    api.set_failing(true);
    view.open_add_form();
    fill(&mut view, "Gina", "gina@university.edu", "Biology", 2);
    view.add(&api).await;

    assert_eq!(view.error, "Failed to add student. Please try again.");
    assert_eq!(view.store.raw().len(), 5);
    assert!(view.form.is_some());
    assert!(!view.loading);
  }

  #[tokio::test]
  async fn update_refilters() {
    let (mut view, api) = loaded().await;
    view.store.update_criteria(|c| c.major = "Computer Science".into());
    assert_eq!(view.store.filtered().len(), 2);

    view.open_edit_form(5);
    view.form.as_mut().unwrap().fields.major = "Biology".into();
    view.update(&api).await;

    assert_eq!(view.store.filtered().len(), 1);
    assert_eq!(view.store.raw().len(), 5);
  }

  #[tokio::test]
  async fn failed_update_reports_and_keeps_record() {
    let (mut view, api) = loaded().await;
    view.open_edit_form(1);
    view.form.as_mut().unwrap().fields.name = "Changed".into();
    api.set_failing(true);
    view.update(&api).await;

    assert_eq!(view.error, "Failed to update student. Please try again.");
    assert_eq!(view.store.get(1).unwrap().name, "Alice Johnson");
  }

  #[tokio::test]
  async fn delete_requires_confirmation() {
    let (mut view, api) = loaded().await;
    let before = api.calls();

    view.request_delete(3);
    view.confirm_delete(&api, false).await;
    assert_eq!(view.store.raw().len(), 5);
    assert_eq!(api.calls(), before);
    assert!(view.error.is_empty());

    view.request_delete(3);
    view.confirm_delete(&api, true).await;
    assert_eq!(view.store.raw().len(), 4);
    assert!(view.store.get(3).is_none());
    assert!(view.store.filtered().iter().all(|s| s.id != 3));
  }

  #[tokio::test]
  async fn failed_delete_keeps_record() {
    let (mut view, api) = loaded().await;
    api.set_failing(true);
    view.request_delete(1);
    view.confirm_delete(&api, true).await;
    assert_eq!(view.error, "Failed to delete student. Please try again.");
    assert_eq!(view.store.raw().len(), 5);
  }

  #[tokio::test]
  async fn keys_drive_search_and_delete_prompt() {
    let (mut view, api) = loaded().await;

    view.handle_key(key(KeyCode::Char('/')), &api).await;
    assert!(view.captures_input());
    for c in "EVA".chars() {
      view.handle_key(key(KeyCode::Char(c)), &api).await;
    }
    assert_eq!(view.store.filtered().len(), 1);
    view.handle_key(key(KeyCode::Enter), &api).await;
    assert!(!view.search_active);

    view.handle_key(key(KeyCode::Char('d')), &api).await;
    assert_eq!(view.pending_delete, Some(5));
    view.handle_key(key(KeyCode::Esc), &api).await;
    assert_eq!(view.pending_delete, None);
    assert_eq!(view.store.raw().len(), 5);

    view.handle_key(key(KeyCode::Char('c')), &api).await;
    assert_eq!(view.store.filtered(), view.store.raw());
  }

  #[tokio::test]
  async fn keys_fill_and_submit_form() {
    let api = FakeService::seeded();
    let mut view = StudentsView::default();
    view.load(&api).await;

    view.handle_key(key(KeyCode::Char('a')), &api).await;
    for c in "Hana".chars() {
      view.handle_key(key(KeyCode::Char(c)), &api).await;
    }
    view.handle_key(key(KeyCode::Tab), &api).await;
    for c in "hana@university.edu".chars() {
      view.handle_key(key(KeyCode::Char(c)), &api).await;
    }
    view.handle_key(key(KeyCode::Tab), &api).await;
    for c in "Biology".chars() {
      view.handle_key(key(KeyCode::Char(c)), &api).await;
    }
    view.handle_key(key(KeyCode::Tab), &api).await;
    view.handle_key(key(KeyCode::Char('3')), &api).await;
    view.handle_key(key(KeyCode::Enter), &api).await;

    assert!(view.form.is_none(), "error: {}", view.error);
    let added = view.store.raw().last().unwrap();
    assert_eq!(added, &student(6, "Hana", "hana@university.edu", "Biology", 3));
  }

  #[tokio::test]
  async fn filter_cycles_use_known_options() {
    let (mut view, _) = loaded().await;
    view.cycle_major_filter();
    assert_eq!(view.store.criteria().major, "Computer Science");
    assert_eq!(view.store.filtered().len(), 2);

    view.cycle_year_filter();
    assert_eq!(view.store.criteria().year, "1");
    assert!(view.store.filtered().is_empty());
    assert_eq!(view.cursor, 0);

    view.clear_filters();
    assert!(!view.store.has_active_filters());
  }
}
