//! Students pane: filter bar, list, and the add/edit form.

use campus_core::student::{unique_email_domains, year_label};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::{cursor_style, field_line, filter_value};
use crate::views::students::{FormField, StudentForm, StudentsView};

/// Render the students screen into `area`.
pub fn draw(f: &mut Frame, area: Rect, view: &StudentsView) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(1), Constraint::Min(0)])
    .split(area);
  draw_filters(f, rows[0], view);

  match &view.form {
    Some(form) => {
      let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);
      draw_list(f, cols[0], view);
      draw_form(f, cols[1], form, &view.error);
    }
    None => draw_list(f, rows[1], view),
  }
}

fn draw_filters(f: &mut Frame, area: Rect, view: &StudentsView) {
  let criteria = view.store.criteria();
  let year = if criteria.year.is_empty() {
    "All".to_string()
  } else {
    criteria
      .year
      .parse()
      .map(year_label)
      .unwrap_or_else(|_| criteria.year.clone())
  };
  let search = if view.search_active {
    format!("/{}_", criteria.search)
  } else if criteria.search.is_empty() {
    "-".to_string()
  } else {
    format!("/{}", criteria.search)
  };

  let dim = Style::default().fg(Color::DarkGray);
  let value = Style::default().fg(Color::Yellow);
  let line = Line::from(vec![
    Span::styled(" major ", dim),
    Span::styled(filter_value(&criteria.major).to_string(), value),
    Span::styled("  year ", dim),
    Span::styled(year, value),
    Span::styled("  search ", dim),
    Span::styled(search, value),
    Span::styled(
      format!("  {} email domains", unique_email_domains(view.store.filtered()).len()),
      dim,
    ),
  ]);
  f.render_widget(Paragraph::new(line), area);
}

fn draw_list(f: &mut Frame, area: Rect, view: &StudentsView) {
  let filtered = view.store.filtered();
  let total = view.store.raw().len();

  let title = if view.store.has_active_filters() {
    format!(" Students ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Students ({total}) ")
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if filtered.is_empty() {
    let message = if view.loading {
      "Loading…"
    } else if total == 0 {
      "No students yet. Press a to add one."
    } else {
      "No students match the current filters."
    };
    f.render_widget(
      Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .block(block),
      area,
    );
    return;
  }

  let items: Vec<ListItem> = filtered
    .iter()
    .map(|student| {
      ListItem::new(Line::from(vec![
        Span::styled(
          format!("{:<22}", student.name),
          Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{:<34}", student.email)),
        Span::styled(format!("{:<20}", student.major), Style::default().fg(Color::Cyan)),
        Span::styled(
          format!("{} year", student.year_label()),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(view.cursor));
  f.render_stateful_widget(
    List::new(items).block(block).highlight_style(cursor_style()),
    area,
    &mut state,
  );
}

fn draw_form(f: &mut Frame, area: Rect, form: &StudentForm, error: &str) {
  let title = if form.editing.is_some() { " Edit Student " } else { " Add Student " };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let input = |field: FormField, value: String| {
    if form.focus == field {
      format!("{value}_")
    } else {
      value
    }
  };
  let fields = &form.fields;
  let mut lines = vec![
    field_line("Name", input(FormField::Name, fields.name.clone())),
    field_line("Email", input(FormField::Email, fields.email.clone())),
    field_line("Major", input(FormField::Major, fields.major.clone())),
    field_line(
      "Year",
      input(FormField::Year, format!("‹ {} year ›", year_label(fields.year))),
    ),
  ];
  if !error.is_empty() {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      error.to_string(),
      Style::default().fg(Color::Red),
    )));
  }
  f.render_widget(Paragraph::new(lines), inner);
}
