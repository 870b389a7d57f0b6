//! `campus report`: the statistics screen's figures as plain text or JSON.

use std::fmt;

use campus_core::{
  aggregate::{self, InstructorLoad, MajorGroup, MajorShare, YearShare, YearTrend},
  course::{self, Course},
  service::DataService,
  stats::StatsSummary,
  student::{self, Student},
};
use serde::Serialize;

/// The three collections a report is computed from.
#[derive(Debug, Clone)]
pub struct Snapshot {
  pub stats:    StatsSummary,
  pub students: Vec<Student>,
  pub courses:  Vec<Course>,
}

impl Snapshot {
  /// Fetch all three collections concurrently; fails on the first error.
  pub async fn fetch<S: DataService>(api: &S) -> Result<Self, S::Error> {
    let (stats, students, courses) =
      tokio::try_join!(api.get_stats(), api.list_students(), api.list_courses())?;
    Ok(Self {
      stats,
      students,
      courses,
    })
  }

  pub fn report(&self) -> Report<'_> {
    let stats = Some(&self.stats);
    Report {
      total_students:        self.stats.total_students,
      total_courses:         self.stats.total_courses,
      top_major:             aggregate::top_major(stats),
      most_active_year:      aggregate::most_active_year(stats),
      diversity_index:       aggregate::diversity_index(stats),
      capacity_utilization:  aggregate::capacity_utilization(stats, &self.courses),
      average_credits:       aggregate::average_credits(&self.courses),
      total_credits_offered: aggregate::total_credits_offered(&self.courses),
      unique_instructors:    aggregate::unique_instructor_count(&self.courses),
      majors:                aggregate::major_breakdown(stats),
      years:                 aggregate::year_breakdown(stats),
      trend:                 aggregate::enrollment_trend(stats),
      instructor_load:       aggregate::instructor_course_load(&self.courses),
      students_per_major:    aggregate::students_per_major(&self.students),
      credit_counts:         course::credit_options(&self.courses)
        .into_iter()
        .map(|credits| CreditCount {
          credits,
          courses: course::courses_by_credits(&self.courses, credits).len(),
        })
        .collect(),
      email_domains:         student::unique_email_domains(&self.students),
    }
  }
}

/// Every aggregate the dashboard shows, computed once.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
  pub total_students:        u32,
  pub total_courses:         u32,
  pub top_major:             Option<&'a str>,
  pub most_active_year:      Option<u32>,
  pub diversity_index:       f64,
  pub capacity_utilization:  u32,
  pub average_credits:       f64,
  pub total_credits_offered: u32,
  pub unique_instructors:    usize,
  pub majors:                Vec<MajorShare>,
  pub years:                 Vec<YearShare>,
  pub trend:                 Vec<YearTrend>,
  pub instructor_load:       Vec<InstructorLoad<'a>>,
  pub students_per_major:    Vec<MajorGroup<'a>>,
  pub credit_counts:         Vec<CreditCount>,
  pub email_domains:         Vec<&'a str>,
}

/// How many courses carry a given credit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreditCount {
  pub credits: u32,
  pub courses: usize,
}

impl Report<'_> {
  pub fn to_json(&self) -> serde_json::Result<String> { serde_json::to_string_pretty(self) }
}

impl fmt::Display for Report<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Students:        {}", self.total_students)?;
    writeln!(f, "Courses:         {}", self.total_courses)?;
    writeln!(f, "Top major:       {}", self.top_major.unwrap_or("-"))?;
    match self.most_active_year {
      Some(year) => writeln!(f, "Busiest year:    {year}")?,
      None => writeln!(f, "Busiest year:    -")?,
    }
    writeln!(f, "Diversity index: {:.2}", self.diversity_index)?;
    writeln!(
      f,
      "Capacity:        {}% ({} seats per course)",
      self.capacity_utilization,
      aggregate::SEATS_PER_COURSE
    )?;
    writeln!(f, "Average credits: {:.1}", self.average_credits)?;
    writeln!(f, "Total credits:   {}", self.total_credits_offered)?;
    writeln!(f, "Instructors:     {}", self.unique_instructors)?;
    if self.email_domains.is_empty() {
      writeln!(f, "Email domains:   -")?;
    } else {
      writeln!(f, "Email domains:   {}", self.email_domains.join(", "))?;
    }

    if !self.majors.is_empty() {
      writeln!(f, "\nBy major:")?;
      for share in &self.majors {
        writeln!(f, "  {:<20} {:>4} {:>4}%", share.major, share.count, share.percentage)?;
      }
    }

    if !self.trend.is_empty() {
      writeln!(f, "\nBy year:")?;
      for (year, share) in self.trend.iter().zip(&self.years) {
        writeln!(
          f,
          "  {:<20} {:>4} {:>4}%  {}",
          year.year, year.count, share.percentage, year.trend
        )?;
      }
    }

    if !self.credit_counts.is_empty() {
      writeln!(f, "\nBy credits:")?;
      for count in &self.credit_counts {
        writeln!(f, "  {:<20} {:>4}", format!("{} cr", count.credits), count.courses)?;
      }
    }

    if !self.instructor_load.is_empty() {
      writeln!(f, "\nInstructor load:")?;
      for load in &self.instructor_load {
        let codes: Vec<&str> = load.courses.iter().map(|c| c.code.as_str()).collect();
        writeln!(
          f,
          "  {:<20} {:>4} cr  {}",
          load.instructor,
          load.total_credits,
          codes.join(", ")
        )?;
      }
    }
    Ok(())
  }
}
