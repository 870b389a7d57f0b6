//! Courses pane: filter bar, list, and the expanded course detail.

use campus_core::{
  aggregate::total_credits_offered,
  course::{Course, courses_by_instructor},
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::{cursor_style, field_line, filter_value};
use crate::views::courses::CoursesView;

/// Render the courses screen into `area`.
pub fn draw(f: &mut Frame, area: Rect, view: &CoursesView) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(1), Constraint::Min(0)])
    .split(area);

  let criteria = view.store.criteria();
  let dim = Style::default().fg(Color::DarkGray);
  let value = Style::default().fg(Color::Yellow);
  let filters = Line::from(vec![
    Span::styled(" credits ", dim),
    Span::styled(filter_value(&criteria.credits).to_string(), value),
    Span::styled("  instructor ", dim),
    Span::styled(filter_value(&criteria.instructor).to_string(), value),
    Span::styled(
      format!("  {} credits listed", total_credits_offered(view.store.filtered())),
      dim,
    ),
  ]);
  f.render_widget(Paragraph::new(filters), rows[0]);

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
    .split(rows[1]);
  draw_list(f, cols[0], view);
  draw_detail(f, cols[1], view);
}

fn draw_list(f: &mut Frame, area: Rect, view: &CoursesView) {
  let filtered = view.store.filtered();
  let total = view.store.raw().len();

  let title = if view.store.has_active_filters() {
    format!(" Courses ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Courses ({total}) ")
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if filtered.is_empty() {
    let message = if view.loading {
      "Loading…"
    } else {
      "No courses match the current filters."
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
    .map(|course| {
      let marker = if view.selected == Some(course.id) { "▾ " } else { "  " };
      ListItem::new(Line::from(vec![
        Span::raw(marker),
        Span::styled(
          format!("{:<9}", course.code),
          Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{:<30}", course.name)),
        Span::styled(format!("{} cr", course.credits), Style::default().fg(Color::DarkGray)),
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

fn draw_detail(f: &mut Frame, area: Rect, view: &CoursesView) {
  let block = Block::default()
    .title(" Detail ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(course) = view.selected_course() else {
    f.render_widget(
      Paragraph::new("Select a course and press Enter.")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };
  f.render_widget(Paragraph::new(detail_lines(course, view.store.raw())), inner);
}

fn detail_lines(course: &Course, all: &[Course]) -> Vec<Line<'static>> {
  let mut lines = vec![
    Line::from(Span::styled(
      course.name.clone(),
      Style::default().add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    field_line("Code", course.code.clone()),
    field_line("Credits", course.credits.to_string()),
    field_line("Instructor", course.instructor.clone()),
    field_line("Difficulty", course.difficulty().to_string()),
    field_line("Category", course.category().to_string()),
  ];

  let others: Vec<String> = courses_by_instructor(all, &course.instructor)
    .into_iter()
    .filter(|c| c.id != course.id)
    .map(|c| c.code.clone())
    .collect();
  if !others.is_empty() {
    lines.push(field_line("Also teaches", others.join(", ")));
  }
  lines
}
