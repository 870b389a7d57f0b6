//! Filter criteria for the student and course lists.
//!
//! Criteria values are kept as strings, the way a dropdown or a text box
//! holds them. An empty string means "no filter".

use crate::{course::Course, record::Criteria, student::Student};

/// Filters for the students list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentCriteria {
  /// Exact major.
  pub major:  String,
  /// Exact year, compared against the year's decimal form.
  pub year:   String,
  /// Case-insensitive substring of the name or the email.
  pub search: String,
}

impl Criteria<Student> for StudentCriteria {
  fn matches(&self, s: &Student) -> bool {
    let major_match = self.major.is_empty() || s.major == self.major;
    let year_match = self.year.is_empty() || s.year.to_string() == self.year;
    let search_match = self.search.is_empty() || {
      let needle = self.search.to_lowercase();
      s.name.to_lowercase().contains(&needle)
        || s.email.to_lowercase().contains(&needle)
    };
    major_match && year_match && search_match
  }

  fn is_active(&self) -> bool {
    !(self.major.is_empty() && self.year.is_empty() && self.search.is_empty())
  }
}

/// Filters for the courses list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseCriteria {
  /// Exact credit count, compared against the credits' decimal form.
  pub credits:    String,
  /// Exact instructor name.
  pub instructor: String,
}

impl Criteria<Course> for CourseCriteria {
  fn matches(&self, c: &Course) -> bool {
    let credit_match =
      self.credits.is_empty() || c.credits.to_string() == self.credits;
    let instructor_match =
      self.instructor.is_empty() || c.instructor == self.instructor;
    credit_match && instructor_match
  }

  fn is_active(&self) -> bool {
    !(self.credits.is_empty() && self.instructor.is_empty())
  }
}

/// Step a dropdown-style filter value through `options`.
///
/// The empty value ("all") comes before the first option and after the
/// last, so repeated calls cycle `"" → a → b → "" → …`. A value that is no
/// longer among the options resets to the first option.
pub fn cycle_option(current: &str, options: &[String]) -> String {
  if current.is_empty() {
    return options.first().cloned().unwrap_or_default();
  }
  match options.iter().position(|o| o == current) {
    Some(i) => options.get(i + 1).cloned().unwrap_or_default(),
    None => options.first().cloned().unwrap_or_default(),
  }
}
