//! Statistics aggregator.
//!
//! Stateless functions deriving dashboard metrics from the three fetched
//! collections: the server's [`StatsSummary`], the students and the courses.
//! Nothing is cached; callers recompute on every render. Every function
//! returns an empty, zero or `None` value when its input is missing and
//! never panics.

use serde::Serialize;
use strum::Display;

use crate::{course::Course, stats::StatsSummary, student::Student};

/// Seats assumed per course when estimating capacity.
pub const SEATS_PER_COURSE: u32 = 30;

// ─── Result types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MajorShare {
  pub major:      String,
  pub count:      u32,
  /// Whole percent of all students.
  pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearShare {
  pub year:       u32,
  pub count:      u32,
  pub percentage: u32,
}

/// Direction of enrollment relative to the previous year of study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Trend {
  Up,
  Down,
  Stable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearTrend {
  pub year:  u32,
  pub count: u32,
  pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MajorGroup<'a> {
  pub major:    &'a str,
  pub students: Vec<&'a Student>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructorLoad<'a> {
  pub instructor:    &'a str,
  pub courses:       Vec<&'a Course>,
  pub total_credits: u32,
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// `count` as a whole percentage of `total`; 0 when `total` is 0.
fn percentage(count: u32, total: u32) -> u32 {
  if total == 0 {
    return 0;
  }
  (f64::from(count) / f64::from(total) * 100.0).round() as u32
}

fn round_to(value: f64, decimals: i32) -> f64 {
  let factor = 10f64.powi(decimals);
  (value * factor).round() / factor
}

/// The first entry with the strictly greatest count.
fn first_max<K, I>(entries: I) -> Option<K>
where
  I: IntoIterator<Item = (K, u32)>,
{
  let mut best: Option<(K, u32)> = None;
  for (key, count) in entries {
    if best.as_ref().is_none_or(|(_, top)| count > *top) {
      best = Some((key, count));
    }
  }
  best.map(|(key, _)| key)
}

// ─── Summary-based metrics ───────────────────────────────────────────────────

/// Share of students per major, in the order the service listed the majors.
pub fn major_breakdown(stats: Option<&StatsSummary>) -> Vec<MajorShare> {
  let Some(stats) = stats else { return Vec::new() };
  stats
    .students_by_major
    .iter()
    .map(|(major, &count)| MajorShare {
      major: major.clone(),
      count,
      percentage: percentage(count, stats.total_students),
    })
    .collect()
}

/// Share of students per year of study, ascending by year. Labels that are
/// not integers are skipped.
pub fn year_breakdown(stats: Option<&StatsSummary>) -> Vec<YearShare> {
  let Some(stats) = stats else { return Vec::new() };
  let mut years: Vec<YearShare> = stats
    .students_by_year
    .iter()
    .filter_map(|(label, &count)| {
      let year = label.trim().parse().ok()?;
      Some(YearShare {
        year,
        count,
        percentage: percentage(count, stats.total_students),
      })
    })
    .collect();
  years.sort_by_key(|y| y.year);
  years
}

/// The major with the most students. Ties go to the major listed first.
pub fn top_major(stats: Option<&StatsSummary>) -> Option<&str> {
  first_max(
    stats?
      .students_by_major
      .iter()
      .map(|(major, &count)| (major.as_str(), count)),
  )
}

/// The year of study with the most students. Years are scanned in
/// ascending order, so ties go to the earliest year.
pub fn most_active_year(stats: Option<&StatsSummary>) -> Option<u32> {
  first_max(year_breakdown(stats).into_iter().map(|y| (y.year, y.count)))
}

/// Each year's count labelled against the year before it. The first year has
/// no predecessor and is always [`Trend::Stable`].
pub fn enrollment_trend(stats: Option<&StatsSummary>) -> Vec<YearTrend> {
  let years = year_breakdown(stats);
  let mut previous: Option<u32> = None;
  years
    .into_iter()
    .map(|y| {
      let trend = match previous {
        Some(prev) if y.count > prev => Trend::Up,
        Some(prev) if y.count < prev => Trend::Down,
        _ => Trend::Stable,
      };
      previous = Some(y.count);
      YearTrend {
        year: y.year,
        count: y.count,
        trend,
      }
    })
    .collect()
}

/// Shannon entropy (base 2) of the major distribution, rounded to two
/// decimals. Majors with no students contribute nothing.
pub fn diversity_index(stats: Option<&StatsSummary>) -> f64 {
  let Some(stats) = stats else { return 0.0 };
  if stats.total_students == 0 {
    return 0.0;
  }
  let total = f64::from(stats.total_students);
  let entropy: f64 = stats
    .students_by_major
    .values()
    .filter(|&&count| count > 0)
    .map(|&count| {
      let p = f64::from(count) / total;
      -p * p.log2()
    })
    .sum();
  // Adding 0.0 turns -0.0 into 0.0 and keeps the sign of anything else.
  round_to(entropy, 2) + 0.0
}

/// Enrolled students as a whole percentage of the assumed seat capacity
/// ([`SEATS_PER_COURSE`] per course). 0 when there are no courses.
pub fn capacity_utilization(stats: Option<&StatsSummary>, courses: &[Course]) -> u32 {
  let enrolled = stats.map_or(0, |s| s.total_students);
  percentage(enrolled, seat_capacity(courses.len()))
}

/// Seats across `course_count` courses, saturating at `u32::MAX`.
fn seat_capacity(course_count: usize) -> u32 {
  u32::try_from(course_count)
    .unwrap_or(u32::MAX)
    .saturating_mul(SEATS_PER_COURSE)
}

// ─── Course-based metrics ────────────────────────────────────────────────────

/// Mean credits per course to one decimal place; 0 with no courses.
pub fn average_credits(courses: &[Course]) -> f64 {
  if courses.is_empty() {
    return 0.0;
  }
  let total: u32 = courses.iter().map(|c| c.credits).sum();
  round_to(f64::from(total) / courses.len() as f64, 1)
}

/// Same metric as [`average_credits`], under the name the statistics
/// screen uses.
pub fn average_credits_per_course(courses: &[Course]) -> f64 {
  average_credits(courses)
}

pub fn total_credits_offered(courses: &[Course]) -> u32 {
  courses.iter().map(|c| c.credits).sum()
}

pub fn unique_instructor_count(courses: &[Course]) -> usize {
  crate::course::unique_instructors(courses).len()
}

/// Courses grouped by instructor with their summed credits, heaviest load
/// first. Equal loads keep the order instructors were first seen in.
pub fn instructor_course_load(courses: &[Course]) -> Vec<InstructorLoad<'_>> {
  let mut loads: Vec<InstructorLoad<'_>> = Vec::new();
  for course in courses {
    match loads.iter_mut().find(|l| l.instructor == course.instructor) {
      Some(load) => {
        load.courses.push(course);
        load.total_credits += course.credits;
      }
      None => loads.push(InstructorLoad {
        instructor:    &course.instructor,
        courses:       vec![course],
        total_credits: course.credits,
      }),
    }
  }
  loads.sort_by(|a, b| b.total_credits.cmp(&a.total_credits));
  loads
}

// ─── Student-based metrics ───────────────────────────────────────────────────

/// Students grouped by major, largest group first. Equal sizes keep the
/// order majors were first seen in.
pub fn students_per_major(students: &[Student]) -> Vec<MajorGroup<'_>> {
  let mut groups: Vec<MajorGroup<'_>> = Vec::new();
  for student in students {
    match groups.iter_mut().find(|g| g.major == student.major) {
      Some(group) => group.students.push(student),
      None => groups.push(MajorGroup {
        major:    &student.major,
        students: vec![student],
      }),
    }
  }
  groups.sort_by(|a, b| b.students.len().cmp(&a.students.len()));
  groups
}

#[cfg(test)]
mod tests {
  use indexmap::IndexMap;

  use super::*;
  use crate::{course::course, student::student};

  fn summary(total: u32, majors: &[(&str, u32)], years: &[(&str, u32)]) -> StatsSummary {
    StatsSummary {
      total_students:    total,
      total_courses:     0,
      students_by_major: majors.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect(),
      students_by_year:  years.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect(),
    }
  }

  fn sample() -> StatsSummary {
    summary(
      5,
      &[("Computer Science", 2), ("Mathematics", 1), ("Physics", 1), ("Engineering", 1)],
      &[("3", 1), ("2", 2), ("4", 1), ("1", 1)],
    )
  }

  fn credits(values: &[u32]) -> Vec<Course> {
    values
      .iter()
      .enumerate()
      .map(|(i, &c)| course(i as u32 + 1, "Course", "X100", c, "Dr. X"))
      .collect()
  }

  // ── Absent input ───────────────────────────────────────────────────────

  #[test]
  fn absent_stats_yield_empty_values() {
    assert!(major_breakdown(None).is_empty());
    assert!(year_breakdown(None).is_empty());
    assert!(enrollment_trend(None).is_empty());
    assert_eq!(top_major(None), None);
    assert_eq!(most_active_year(None), None);
    assert_eq!(diversity_index(None), 0.0);
    assert_eq!(capacity_utilization(None, &credits(&[3])), 0);
  }

  #[test]
  fn empty_maps_have_no_top_entries() {
    let empty = StatsSummary::default();
    assert_eq!(top_major(Some(&empty)), None);
    assert_eq!(most_active_year(Some(&empty)), None);
    assert_eq!(diversity_index(Some(&empty)), 0.0);
  }

  // ── Breakdowns ─────────────────────────────────────────────────────────

  #[test]
  fn major_breakdown_keeps_map_order_and_rounds() {
    let stats = sample();
    let shares = major_breakdown(Some(&stats));
    let majors: Vec<&str> = shares.iter().map(|s| s.major.as_str()).collect();
    assert_eq!(majors, vec!["Computer Science", "Mathematics", "Physics", "Engineering"]);
    assert_eq!(shares[0].percentage, 40);
    assert_eq!(shares[1].percentage, 20);
  }

  #[test]
  fn major_percentages_sum_to_about_100() {
    let stats = summary(7, &[("A", 3), ("B", 2), ("C", 2)], &[]);
    let sum: u32 = major_breakdown(Some(&stats)).iter().map(|s| s.percentage).sum();
    // 43 + 29 + 29
    assert!((99..=101).contains(&sum), "sum = {sum}");
  }

  #[test]
  fn zero_total_gives_zero_percent() {
    let stats = summary(0, &[("A", 0)], &[("1", 0)]);
    assert_eq!(major_breakdown(Some(&stats))[0].percentage, 0);
    assert_eq!(year_breakdown(Some(&stats))[0].percentage, 0);
  }

  #[test]
  fn year_breakdown_sorts_and_skips_bad_labels() {
    let stats = summary(5, &[], &[("3", 1), ("senior", 9), ("2", 2), ("1", 2)]);
    let years: Vec<(u32, u32)> = year_breakdown(Some(&stats))
      .iter()
      .map(|y| (y.year, y.count))
      .collect();
    assert_eq!(years, vec![(1, 2), (2, 2), (3, 1)]);
  }

  // ── Top selections ─────────────────────────────────────────────────────

  #[test]
  fn top_major_prefers_first_on_tie() {
    let stats = summary(4, &[("Physics", 2), ("Biology", 2)], &[]);
    assert_eq!(top_major(Some(&stats)), Some("Physics"));
    assert_eq!(top_major(Some(&sample())), Some("Computer Science"));
  }

  #[test]
  fn most_active_year_prefers_earliest_on_tie() {
    let stats = summary(4, &[], &[("4", 2), ("2", 2)]);
    assert_eq!(most_active_year(Some(&stats)), Some(2));
    assert_eq!(most_active_year(Some(&sample())), Some(2));
  }

  // ── Trend ──────────────────────────────────────────────────────────────

  #[test]
  fn enrollment_trend_against_previous_year() {
    let stats = summary(5, &[], &[("1", 1), ("2", 2), ("3", 1), ("4", 1)]);
    let trend: Vec<Trend> = enrollment_trend(Some(&stats)).iter().map(|t| t.trend).collect();
    assert_eq!(trend, vec![Trend::Stable, Trend::Up, Trend::Down, Trend::Stable]);
    assert_eq!(Trend::Up.to_string(), "up");
  }

  // ── Credits ────────────────────────────────────────────────────────────

  #[test]
  fn average_credits_rounds_to_one_decimal() {
    assert_eq!(average_credits(&credits(&[3, 4, 3])), 3.3);
    assert_eq!(average_credits(&[]), 0.0);
    assert_eq!(average_credits_per_course(&credits(&[3, 4])), 3.5);
    assert_eq!(total_credits_offered(&credits(&[3, 4, 3])), 10);
  }

  #[test]
  fn unique_instructors_counted_once() {
    let courses = vec![
      course(1, "A", "A1", 3, "Dr. Smith"),
      course(2, "B", "B1", 3, "Dr. Smith"),
      course(3, "C", "C1", 3, "Dr. Brown"),
    ];
    assert_eq!(unique_instructor_count(&courses), 2);
    assert_eq!(unique_instructor_count(&[]), 0);
  }

  #[test]
  fn instructor_load_sorted_by_total_credits() {
    let courses = vec![
      course(1, "A", "A1", 3, "Dr. Smith"),
      course(2, "B", "B1", 4, "Dr. Johnson"),
      course(3, "C", "C1", 4, "Dr. Williams"),
      course(4, "D", "D1", 3, "Dr. Smith"),
    ];
    let loads = instructor_course_load(&courses);
    let summary: Vec<(&str, u32, usize)> = loads
      .iter()
      .map(|l| (l.instructor, l.total_credits, l.courses.len()))
      .collect();
    assert_eq!(
      summary,
      vec![("Dr. Smith", 6, 2), ("Dr. Johnson", 4, 1), ("Dr. Williams", 4, 1)]
    );
  }

  // ── Students ───────────────────────────────────────────────────────────

  #[test]
  fn students_per_major_largest_first_stable() {
    let students = vec![
      student(1, "A", "a@x.io", "Physics", 1),
      student(2, "B", "b@x.io", "Biology", 1),
      student(3, "C", "c@x.io", "Math", 1),
      student(4, "D", "d@x.io", "Math", 1),
      student(5, "E", "e@x.io", "Biology", 1),
      student(6, "F", "f@x.io", "Chemistry", 1),
    ];
    let groups = students_per_major(&students);
    let order: Vec<(&str, usize)> =
      groups.iter().map(|g| (g.major, g.students.len())).collect();
    assert_eq!(
      order,
      vec![("Biology", 2), ("Math", 2), ("Physics", 1), ("Chemistry", 1)]
    );
    assert!(students_per_major(&[]).is_empty());
  }

  // ── Capacity ───────────────────────────────────────────────────────────

  #[test]
  fn capacity_utilization_rounds_percentage() {
    let stats = summary(5, &[], &[]);
    assert_eq!(capacity_utilization(Some(&stats), &credits(&[3, 3, 4])), 6);
    assert_eq!(capacity_utilization(Some(&stats), &[]), 0);
  }

  #[test]
  fn seat_capacity_saturates_instead_of_wrapping() {
    assert_eq!(seat_capacity(3), 3 * SEATS_PER_COURSE);
    assert_eq!(seat_capacity(usize::MAX), u32::MAX);
    let per_course = usize::try_from(u32::MAX / SEATS_PER_COURSE).unwrap();
    assert_eq!(seat_capacity(per_course + 1), u32::MAX);
  }

  // ── Diversity ──────────────────────────────────────────────────────────

  #[test]
  fn diversity_is_zero_for_a_single_major() {
    let stats = summary(4, &[("Physics", 4)], &[]);
    let index = diversity_index(Some(&stats));
    assert_eq!(index, 0.0);
    assert!(index.is_sign_positive());
  }

  #[test]
  fn diversity_is_positive_with_several_majors() {
    let even = summary(4, &[("A", 2), ("B", 2)], &[]);
    assert_eq!(diversity_index(Some(&even)), 1.0);

    let sample = sample();
    // 0.4·log2(2.5) + 3·0.2·log2(5) ≈ 1.92
    assert_eq!(diversity_index(Some(&sample)), 1.92);
  }

  #[test]
  fn diversity_ignores_empty_majors() {
    let mut majors = IndexMap::new();
    majors.insert("A".to_owned(), 2);
    majors.insert("B".to_owned(), 0);
    let stats = StatsSummary {
      total_students: 2,
      students_by_major: majors,
      ..Default::default()
    };
    assert_eq!(diversity_index(Some(&stats)), 0.0);
  }

  #[test]
  fn diversity_keeps_the_sign_of_inconsistent_counts() {
    // More students in a major than in total: p = 2, so -2·log2(2) = -2.
    let stats = summary(2, &[("A", 4)], &[]);
    assert_eq!(diversity_index(Some(&stats)), -2.0);
  }
}
