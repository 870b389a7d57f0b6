//! TUI rendering: orchestrates all panes.

pub mod courses;
pub mod statistics;
pub mod students;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use strum::IntoEnumIterator;

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<S>(f: &mut Frame, app: &App<S>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::Students => students::draw(f, rows[1], &app.students),
    Screen::Courses => courses::draw(f, rows[1], &app.courses),
    Screen::Statistics => statistics::draw(f, rows[1], &app.statistics),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let mut spans = vec![Span::styled(
    " campus ",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  )];
  for screen in Screen::iter() {
    let style = if screen == app.screen {
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::raw(" "));
    spans.push(Span::styled(format!("[{}] {screen}", screen.hotkey()), style));
  }

  let right = Span::styled(format!("{date} "), Style::default().fg(Color::DarkGray));

  // Simple left-right header: pad the middle.
  let left_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
  let pad = (area.width as usize)
    .saturating_sub(left_width)
    .saturating_sub(right.content.len());
  spans.push(Span::raw(" ".repeat(pad)));
  spans.push(right);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let students = &app.students;
  let (mode_label, hints) = match app.screen {
    Screen::Students if students.pending_delete.is_some() => ("CONFIRM", String::new()),
    Screen::Students if students.form.is_some() => (
      "FORM",
      "Tab next field  ←→ year  ^N next major  Enter save  Esc cancel".to_string(),
    ),
    Screen::Students if students.search_active => {
      ("SEARCH", "Type to filter  Enter keep  Esc clear".to_string())
    }
    Screen::Students => (
      "STUDENTS",
      "jk move  / search  m major  y year  c clear  a add  e edit  d delete  r reload  q quit"
        .to_string(),
    ),
    Screen::Courses => (
      "COURSES",
      "jk move  Enter detail  n credits  i instructor  c clear  r reload  q quit".to_string(),
    ),
    Screen::Statistics => ("STATS", "1-3 switch screen  r reload  q quit".to_string()),
  };

  let (message, style) = if let Some(id) = students.pending_delete {
    let name = students
      .store
      .get(id)
      .map(|s| s.name.as_str())
      .unwrap_or("this student");
    (
      format!("Delete {name}? [y/n]"),
      Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )
  } else if !app.error().is_empty() {
    (app.error().to_string(), Style::default().fg(Color::Red))
  } else if app.loading() {
    ("Loading…".to_string(), Style::default().fg(Color::DarkGray))
  } else {
    (hints, Style::default().fg(Color::DarkGray))
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let line = Line::from(vec![mode_span, Span::styled(format!("  {message}"), style)]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

/// Style for the row under the cursor.
pub(crate) fn cursor_style() -> Style {
  Style::default()
    .bg(Color::Blue)
    .fg(Color::White)
    .add_modifier(Modifier::BOLD)
}

/// A `label: value` line with the label highlighted.
pub(crate) fn field_line(label: &str, value: String) -> Line<'static> {
  Line::from(vec![
    Span::styled(
      format!("{label:<14}"),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::raw(value),
  ])
}

/// Show `value` or "All" for an empty filter.
pub(crate) fn filter_value(value: &str) -> &str {
  if value.is_empty() { "All" } else { value }
}
