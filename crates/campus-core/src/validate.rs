//! Student form validation, run before every create and update.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
  error::ValidationError,
  student::{NewStudent, Student},
};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(email: &str) -> bool { EMAIL.is_match(email) }

/// Check `form` against the rules below, in order, stopping at the first
/// failure:
///
/// 1. the name is not blank;
/// 2. the email is not blank;
/// 3. the email looks like an address;
/// 4. the major is not blank;
/// 5. no student in `existing` other than `editing_id` already uses the
///    email, compared case-insensitively.
pub fn validate_student_form(
  form: &NewStudent,
  existing: &[Student],
  editing_id: Option<u32>,
) -> Result<(), ValidationError> {
  if form.name.trim().is_empty() {
    return Err(ValidationError::NameRequired);
  }
  if form.email.trim().is_empty() {
    return Err(ValidationError::EmailRequired);
  }
  if !is_valid_email(&form.email) {
    return Err(ValidationError::InvalidEmail);
  }
  if form.major.trim().is_empty() {
    return Err(ValidationError::MajorRequired);
  }

  let email = form.email.to_lowercase();
  let taken = existing
    .iter()
    .any(|s| s.email.to_lowercase() == email && Some(s.id) != editing_id);
  if taken {
    return Err(ValidationError::DuplicateEmail);
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::student::student;

  fn form(name: &str, email: &str, major: &str) -> NewStudent {
    NewStudent {
      name:  name.into(),
      email: email.into(),
      major: major.into(),
      year:  1,
    }
  }

  fn existing() -> Vec<Student> {
    vec![
      student(1, "Alice", "alice@university.edu", "Physics", 1),
      student(2, "Bob", "bob@university.edu", "Physics", 2),
    ]
  }

  #[test]
  fn email_pattern() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email("first.last@sub.uni.edu"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a b@c.de"));
    assert!(!is_valid_email("a@@c.de"));
    assert!(!is_valid_email("@c.de"));
    assert!(!is_valid_email("a@.de"));
    assert!(!is_valid_email("a@c."));
  }

  #[test]
  fn blank_name_is_reported_before_bad_email() {
    let err = validate_student_form(&form("   ", "not-an-email", ""), &[], None);
    assert_eq!(err, Err(ValidationError::NameRequired));
    assert_eq!(err.unwrap_err().to_string(), "Name is required.");
  }

  #[test]
  fn rules_apply_in_order() {
    assert_eq!(
      validate_student_form(&form("A", " ", ""), &[], None),
      Err(ValidationError::EmailRequired)
    );
    assert_eq!(
      validate_student_form(&form("A", "nope", ""), &[], None),
      Err(ValidationError::InvalidEmail)
    );
    assert_eq!(
      validate_student_form(&form("A", "a@x.io", "  "), &[], None),
      Err(ValidationError::MajorRequired)
    );
  }

  #[test]
  fn duplicate_email_is_case_insensitive() {
    let err = validate_student_form(
      &form("Other", "ALICE@University.edu", "Math"),
      &existing(),
      None,
    );
    assert_eq!(err, Err(ValidationError::DuplicateEmail));
    assert_eq!(
      err.unwrap_err().to_string(),
      "A student with this email already exists."
    );
  }

  #[test]
  fn editing_record_may_keep_its_own_email() {
    let ok = validate_student_form(
      &form("Alice J.", "alice@university.edu", "Math"),
      &existing(),
      Some(1),
    );
    assert_eq!(ok, Ok(()));

    let clash = validate_student_form(
      &form("Alice J.", "bob@university.edu", "Math"),
      &existing(),
      Some(1),
    );
    assert_eq!(clash, Err(ValidationError::DuplicateEmail));
  }
}
