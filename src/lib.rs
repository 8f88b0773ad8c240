pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};
pub use config::Settings;

pub use adapters::http::HttpCourseService;
pub use adapters::navigation::HistoryNavigator;
pub use adapters::notification::{NotificationLog, TracingNotifier};
pub use crate::core::course_form::{CourseFormController, FormSettings, SubmitOutcome};
pub use crate::core::course_list::{CourseListView, ListState};
pub use crate::core::form::{FieldId, FieldStatus, LessonField};
pub use crate::core::resolver::CourseResolver;
pub use domain::model::{Course, CourseSummary, Lesson};
pub use utils::error::{CourseError, Result};
