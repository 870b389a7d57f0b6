//! Statistics pane: overview metrics, breakdowns, and instructor load.
//!
//! Every figure is recomputed from the view's collections on each frame.

use campus_core::aggregate::{self, Trend};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use super::field_line;
use crate::views::statistics::StatisticsView;

const BAR_WIDTH: usize = 20;

/// Render the statistics screen into `area`.
pub fn draw(f: &mut Frame, area: Rect, view: &StatisticsView) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(area);
  let top = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
    .split(rows[0]);
  let bottom = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
    .split(rows[1]);

  panel(f, top[0], " Overview ", overview_lines(view));
  panel(f, top[1], " Enrollment by Major ", major_lines(view));
  panel(f, bottom[0], " Enrollment by Year ", year_lines(view));
  panel(f, bottom[1], " Instructor Load ", instructor_lines(view));
}

fn panel(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
  let block = Block::default()
    .title(title.to_string())
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  f.render_widget(Paragraph::new(lines).block(block), area);
}

fn dim(text: &str) -> Line<'static> {
  Line::from(Span::styled(text.to_string(), Style::default().fg(Color::DarkGray)))
}

/// A horizontal bar `percentage` percent of [`BAR_WIDTH`] long.
fn bar(percentage: u32) -> String {
  let filled = (percentage.min(100) as usize * BAR_WIDTH).div_ceil(100);
  format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

// ─── Panels ───────────────────────────────────────────────────────────────────

fn overview_lines(view: &StatisticsView) -> Vec<Line<'static>> {
  let Some(stats) = view.stats.as_ref() else {
    return vec![dim(if view.loading { "Loading…" } else { "No statistics loaded." })];
  };
  let top_major = aggregate::top_major(Some(stats)).unwrap_or("-").to_string();
  let active_year = aggregate::most_active_year(Some(stats))
    .map_or_else(|| "-".to_string(), |y| format!("Year {y}"));

  vec![
    field_line("Students", stats.total_students.to_string()),
    field_line("Courses", stats.total_courses.to_string()),
    field_line("Top major", top_major),
    field_line("Busiest year", active_year),
    field_line(
      "Diversity",
      format!("{:.2}", aggregate::diversity_index(Some(stats))),
    ),
    field_line(
      "Capacity",
      format!(
        "{}% of {} seats/course",
        aggregate::capacity_utilization(Some(stats), &view.courses),
        aggregate::SEATS_PER_COURSE
      ),
    ),
    field_line(
      "Avg credits",
      format!("{:.1}", aggregate::average_credits_per_course(&view.courses)),
    ),
    field_line(
      "Credits",
      aggregate::total_credits_offered(&view.courses).to_string(),
    ),
    field_line(
      "Instructors",
      aggregate::unique_instructor_count(&view.courses).to_string(),
    ),
  ]
}

fn major_lines(view: &StatisticsView) -> Vec<Line<'static>> {
  let shares = aggregate::major_breakdown(view.stats.as_ref());
  if shares.is_empty() {
    return vec![dim("No majors.")];
  }
  let mut lines: Vec<Line<'static>> = shares
    .into_iter()
    .map(|share| {
      Line::from(vec![
        Span::raw(format!("{:<20}", share.major)),
        Span::styled(bar(share.percentage), Style::default().fg(Color::Cyan)),
        Span::raw(format!(" {:>3}% ({})", share.percentage, share.count)),
      ])
    })
    .collect();

  let groups = aggregate::students_per_major(&view.students);
  if let Some(largest) = groups.first() {
    let names: Vec<&str> = largest.students.iter().map(|s| s.name.as_str()).collect();
    lines.push(Line::from(""));
    lines.push(field_line("Largest group", format!("{}: {}", largest.major, names.join(", "))));
  }
  lines
}

fn year_lines(view: &StatisticsView) -> Vec<Line<'static>> {
  let trend = aggregate::enrollment_trend(view.stats.as_ref());
  if trend.is_empty() {
    return vec![dim("No enrollment data.")];
  }
  let breakdown = aggregate::year_breakdown(view.stats.as_ref());
  trend
    .into_iter()
    .zip(breakdown)
    .map(|(year, share)| {
      let (arrow, color) = match year.trend {
        Trend::Up => ("↑", Color::Green),
        Trend::Down => ("↓", Color::Red),
        Trend::Stable => ("→", Color::DarkGray),
      };
      Line::from(vec![
        Span::raw(format!("Year {:<3}", year.year)),
        Span::styled(bar(share.percentage), Style::default().fg(Color::Cyan)),
        Span::raw(format!(" {:>3}% ({}) ", share.percentage, year.count)),
        Span::styled(
          format!("{arrow} {}", year.trend),
          Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
      ])
    })
    .collect()
}

fn instructor_lines(view: &StatisticsView) -> Vec<Line<'static>> {
  let loads = aggregate::instructor_course_load(&view.courses);
  if loads.is_empty() {
    return vec![dim("No courses.")];
  }
  loads
    .into_iter()
    .map(|load| {
      let codes: Vec<&str> = load.courses.iter().map(|c| c.code.as_str()).collect();
      Line::from(vec![
        Span::raw(format!("{:<16}", load.instructor)),
        Span::styled(
          format!("{:>2} cr  ", load.total_credits),
          Style::default().fg(Color::Cyan),
        ),
        Span::styled(codes.join(", "), Style::default().fg(Color::DarkGray)),
      ])
    })
    .collect()
}
