//! Error types for `campus-core`.

use thiserror::Error;

/// A user-correctable problem with the student form.
///
/// The `Display` output of each variant is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Name is required.")]
  NameRequired,

  #[error("Email is required.")]
  EmailRequired,

  #[error("Please enter a valid email address.")]
  InvalidEmail,

  #[error("Major is required.")]
  MajorRequired,

  #[error("A student with this email already exists.")]
  DuplicateEmail,
}
