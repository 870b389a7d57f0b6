//! Statistics screen: the three collections the aggregator works from.

use campus_core::{
  course::Course,
  service::DataService,
  stats::StatsSummary,
  student::Student,
};

use super::failure_message;

#[derive(Debug, Clone, Default)]
pub struct StatisticsView {
  pub stats:    Option<StatsSummary>,
  pub students: Vec<Student>,
  pub courses:  Vec<Course>,
  pub loading:  bool,
  pub error:    String,
}

impl StatisticsView {
  /// Fetch the summary, the students and the courses concurrently.
  ///
  /// The load completes only when all three succeed. The first failure
  /// abandons the other requests and nothing is applied, so the previous
  /// statistics stay on screen.
  pub async fn load<S: DataService>(&mut self, api: &S) {
    self.loading = true;
    self.error.clear();
    let result = tokio::try_join!(api.get_stats(), api.list_students(), api.list_courses());
    match result {
      Ok((stats, students, courses)) => {
        tracing::info!(
          students = students.len(),
          courses = courses.len(),
          "loaded statistics"
        );
        self.stats = Some(stats);
        self.students = students;
        self.courses = courses;
      }
      Err(e) => {
        tracing::error!(error = %e, "error loading statistics");
        self.error = failure_message("load", "statistics");
      }
    }
    self.loading = false;
  }
}
