//! The `DataService` trait: the dashboard's view of the upstream service.
//!
//! The HTTP client in `campus-cli` implements it against the real REST
//! endpoints. View controllers depend on this abstraction, not on the
//! transport, so they can be driven by an in-memory fake in tests.

use std::future::Future;

use crate::{
  course::Course,
  stats::{Health, StatsSummary},
  student::{NewStudent, Student},
};

/// One operation per (entity, verb) pair the service exposes.
///
/// Every call performs exactly one round trip and resolves with exactly one
/// value or one error. Implementations do not retry and do not cache.
pub trait DataService: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Students ──────────────────────────────────────────────────────────

  /// `GET /students`
  fn list_students(
    &self,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  /// `GET /students/{id}`
  fn get_student(
    &self,
    id: u32,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  /// `POST /students`; the service assigns the id.
  fn create_student<'a>(
    &'a self,
    student: &'a NewStudent,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + 'a;

  /// `PUT /students/{id}`
  fn update_student<'a>(
    &'a self,
    id: u32,
    student: &'a NewStudent,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + 'a;

  /// `DELETE /students/{id}`; resolves with the service's acknowledgement,
  /// whose shape is not specified.
  fn delete_student(
    &self,
    id: u32,
  ) -> impl Future<Output = Result<serde_json::Value, Self::Error>> + Send + '_;

  // ── Courses ───────────────────────────────────────────────────────────

  /// `GET /courses`
  fn list_courses(
    &self,
  ) -> impl Future<Output = Result<Vec<Course>, Self::Error>> + Send + '_;

  /// `GET /courses/{id}`
  fn get_course(
    &self,
    id: u32,
  ) -> impl Future<Output = Result<Course, Self::Error>> + Send + '_;

  // ── Statistics ────────────────────────────────────────────────────────

  /// `GET /stats`
  fn get_stats(
    &self,
  ) -> impl Future<Output = Result<StatsSummary, Self::Error>> + Send + '_;

  /// `GET /health`
  fn health(&self) -> impl Future<Output = Result<Health, Self::Error>> + Send + '_;
}
