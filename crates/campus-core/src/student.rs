//! Student records and client-side helpers over student collections.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Majors offered in the form's dropdown before any data has been loaded.
pub const DEFAULT_MAJORS: [&str; 6] = [
  "Computer Science",
  "Mathematics",
  "Physics",
  "Engineering",
  "Business",
  "Biology",
];

/// Years of study a student can be in.
pub const YEARS: [u8; 4] = [1, 2, 3, 4];

/// A student as returned by the data service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
  /// Server-assigned identifier.
  pub id:    u32,
  pub name:  String,
  pub email: String,
  pub major: String,
  /// Year of study, 1 through 4.
  pub year:  u8,
}

impl Student {
  /// Ordinal label for the student's year, e.g. `"2nd"`.
  pub fn year_label(&self) -> String { year_label(self.year) }

  /// The part of the email address after `@`, if there is one.
  pub fn email_domain(&self) -> Option<&str> {
    self
      .email
      .split_once('@')
      .map(|(_, domain)| domain)
      .filter(|domain| !domain.is_empty())
  }

  /// The editable fields of this student, as used to pre-fill the edit form.
  pub fn to_form(&self) -> NewStudent {
    NewStudent {
      name:  self.name.clone(),
      email: self.email.clone(),
      major: self.major.clone(),
      year:  self.year,
    }
  }
}

impl Record for Student {
  fn id(&self) -> u32 { self.id }
}

/// A student without an id: the body of `POST /students` and
/// `PUT /students/{id}`, and the state of the add/edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
  pub name:  String,
  pub email: String,
  pub major: String,
  pub year:  u8,
}

impl Default for NewStudent {
  fn default() -> Self {
    Self {
      name:  String::new(),
      email: String::new(),
      major: String::new(),
      year:  1,
    }
  }
}

/// Ordinal label for a year of study.
pub fn year_label(year: u8) -> String {
  let suffix = match year {
    1 => "st",
    2 => "nd",
    3 => "rd",
    _ => "th",
  };
  format!("{year}{suffix}")
}

/// The default major catalogue extended with every major present in
/// `students`. First-seen order, no duplicates.
pub fn available_majors(students: &[Student]) -> Vec<String> {
  let mut majors: Vec<String> =
    DEFAULT_MAJORS.iter().map(|m| (*m).to_owned()).collect();
  for student in students {
    if !majors.contains(&student.major) {
      majors.push(student.major.clone());
    }
  }
  majors
}

/// Number of students per major, in first-seen order.
pub fn count_by_major(students: &[Student]) -> IndexMap<String, u32> {
  let mut counts = IndexMap::new();
  for student in students {
    *counts.entry(student.major.clone()).or_insert(0) += 1;
  }
  counts
}

/// Number of students per year, in first-seen order.
pub fn count_by_year(students: &[Student]) -> IndexMap<u8, u32> {
  let mut counts = IndexMap::new();
  for student in students {
    *counts.entry(student.year).or_insert(0) += 1;
  }
  counts
}

/// Distinct email domains across `students`, in first-seen order.
pub fn unique_email_domains(students: &[Student]) -> Vec<&str> {
  let mut domains: Vec<&str> = Vec::new();
  for domain in students.iter().filter_map(Student::email_domain) {
    if !domains.contains(&domain) {
      domains.push(domain);
    }
  }
  domains
}

#[cfg(test)]
pub(crate) fn student(id: u32, name: &str, email: &str, major: &str, year: u8) -> Student {
  Student {
    id,
    name: name.into(),
    email: email.into(),
    major: major.into(),
    year,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn year_labels_use_english_ordinals() {
    assert_eq!(year_label(1), "1st");
    assert_eq!(year_label(2), "2nd");
    assert_eq!(year_label(3), "3rd");
    assert_eq!(year_label(4), "4th");
  }

  #[test]
  fn email_domain_requires_text_after_at() {
    let s = student(1, "A", "a@uni.edu", "Physics", 1);
    assert_eq!(s.email_domain(), Some("uni.edu"));

    let bare = student(2, "B", "nobody", "Physics", 1);
    assert_eq!(bare.email_domain(), None);

    let trailing = student(3, "C", "c@", "Physics", 1);
    assert_eq!(trailing.email_domain(), None);
  }

  #[test]
  fn available_majors_appends_unknown_majors_once() {
    let students = vec![
      student(1, "A", "a@x.io", "Chemistry", 1),
      student(2, "B", "b@x.io", "Physics", 2),
      student(3, "C", "c@x.io", "Chemistry", 3),
    ];
    let majors = available_majors(&students);
    assert_eq!(majors.len(), DEFAULT_MAJORS.len() + 1);
    assert_eq!(majors.last().map(String::as_str), Some("Chemistry"));
  }

  #[test]
  fn counts_keep_first_seen_order() {
    let students = vec![
      student(1, "A", "a@x.io", "Physics", 3),
      student(2, "B", "b@x.io", "Biology", 1),
      student(3, "C", "c@x.io", "Physics", 3),
    ];
    let majors: Vec<_> = count_by_major(&students).into_iter().collect();
    assert_eq!(majors, vec![("Physics".to_owned(), 2), ("Biology".to_owned(), 1)]);

    let years: Vec<_> = count_by_year(&students).into_iter().collect();
    assert_eq!(years, vec![(3, 2), (1, 1)]);
  }

  #[test]
  fn unique_domains_are_deduplicated() {
    let students = vec![
      student(1, "A", "a@uni.edu", "Physics", 1),
      student(2, "B", "b@mail.com", "Physics", 1),
      student(3, "C", "c@uni.edu", "Physics", 1),
    ];
    assert_eq!(unique_email_domains(&students), vec!["uni.edu", "mail.com"]);
  }

  #[test]
  fn deserialises_service_payload() {
    let json = r#"{"id":7,"name":"Eva Davis","email":"eva@university.edu","major":"Computer Science","year":2}"#;
    let s: Student = serde_json::from_str(json).unwrap();
    assert_eq!(s.id, 7);
    assert_eq!(s.year_label(), "2nd");
    assert_eq!(s.to_form().email, "eva@university.edu");
  }
}
