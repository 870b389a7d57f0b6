//! Server-computed summaries consumed read-only by the dashboard.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Payload of `GET /stats`.
///
/// Both maps keep the key order of the JSON object the service sent. That
/// order is what the aggregator means by "map order".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
  pub total_students:    u32,
  pub total_courses:     u32,
  /// Major → number of students.
  #[serde(default)]
  pub students_by_major: IndexMap<String, u32>,
  /// Year label (`"1"`..`"4"`) → number of students.
  #[serde(default)]
  pub students_by_year:  IndexMap<String, u32>,
}

/// Payload of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
  pub status:  String,
  pub service: String,
}

impl Health {
  pub fn is_healthy(&self) -> bool { self.status == "healthy" }
}
