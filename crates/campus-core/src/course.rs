//! Course records. Courses are read-only from the dashboard's point of view.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::record::Record;

/// A course as returned by the data service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
  pub id:         u32,
  pub name:       String,
  /// Catalogue code, e.g. `"CS201"`.
  pub code:       String,
  pub credits:    u32,
  pub instructor: String,
}

impl Record for Course {
  fn id(&self) -> u32 { self.id }
}

/// Difficulty inferred from the course code's level number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Difficulty {
  Beginner,
  Intermediate,
  Advanced,
}

/// Broad category inferred from the course name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Category {
  Foundation,
  Advanced,
  Practical,
  Core,
}

impl Course {
  pub fn difficulty(&self) -> Difficulty {
    if self.code.contains("101") {
      Difficulty::Beginner
    } else if self.code.contains("201") {
      Difficulty::Intermediate
    } else if self.code.contains("301") {
      Difficulty::Advanced
    } else {
      Difficulty::Intermediate
    }
  }

  pub fn category(&self) -> Category {
    let name = self.name.to_lowercase();
    // "introduction" contains "intro".
    if name.contains("intro") {
      Category::Foundation
    } else if name.contains("advanced") || name.contains("senior") {
      Category::Advanced
    } else if name.contains("lab") || name.contains("practical") {
      Category::Practical
    } else {
      Category::Core
    }
  }
}

/// Distinct instructor names, in first-seen order.
pub fn unique_instructors(courses: &[Course]) -> Vec<&str> {
  let mut names: Vec<&str> = Vec::new();
  for course in courses {
    if !names.contains(&course.instructor.as_str()) {
      names.push(&course.instructor);
    }
  }
  names
}

/// Distinct credit values, ascending.
pub fn credit_options(courses: &[Course]) -> Vec<u32> {
  let mut credits: Vec<u32> = courses.iter().map(|c| c.credits).collect();
  credits.sort_unstable();
  credits.dedup();
  credits
}

pub fn courses_by_instructor<'a>(
  courses: &'a [Course],
  instructor: &str,
) -> Vec<&'a Course> {
  courses.iter().filter(|c| c.instructor == instructor).collect()
}

pub fn courses_by_credits(courses: &[Course], credits: u32) -> Vec<&Course> {
  courses.iter().filter(|c| c.credits == credits).collect()
}

#[cfg(test)]
pub(crate) fn course(id: u32, name: &str, code: &str, credits: u32, instructor: &str) -> Course {
  Course {
    id,
    name: name.into(),
    code: code.into(),
    credits,
    instructor: instructor.into(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn catalogue() -> Vec<Course> {
    vec![
      course(1, "Introduction to Programming", "CS101", 3, "Dr. Smith"),
      course(2, "Data Structures", "CS201", 4, "Dr. Johnson"),
      course(3, "Calculus I", "MATH101", 4, "Dr. Williams"),
      course(4, "Physics Lab", "PHYS150", 3, "Dr. Smith"),
      course(5, "Senior Project", "CS301", 3, "Dr. Davis"),
    ]
  }

  #[test]
  fn difficulty_follows_code_level() {
    let c = catalogue();
    assert_eq!(c[0].difficulty(), Difficulty::Beginner);
    assert_eq!(c[1].difficulty(), Difficulty::Intermediate);
    assert_eq!(c[3].difficulty(), Difficulty::Intermediate);
    assert_eq!(c[4].difficulty(), Difficulty::Advanced);
  }

  #[test]
  fn category_follows_name_keywords() {
    let c = catalogue();
    assert_eq!(c[0].category(), Category::Foundation);
    assert_eq!(c[1].category(), Category::Core);
    assert_eq!(c[3].category(), Category::Practical);
    assert_eq!(c[4].category(), Category::Advanced);
    assert_eq!(c[4].category().to_string(), "Advanced");
  }

  #[test]
  fn collection_helpers() {
    let c = catalogue();
    assert_eq!(
      unique_instructors(&c),
      vec!["Dr. Smith", "Dr. Johnson", "Dr. Williams", "Dr. Davis"]
    );
    assert_eq!(credit_options(&c), vec![3, 4]);
    assert_eq!(courses_by_instructor(&c, "Dr. Smith").len(), 2);
    assert_eq!(courses_by_credits(&c, 4).len(), 2);
    assert!(courses_by_credits(&c, 5).is_empty());
  }
}
