pub mod course_form;
pub mod course_list;
pub mod form;
pub mod resolver;
pub mod validators;

pub use crate::domain::model::{Course, CourseSummary, Lesson};
pub use crate::domain::ports::{ConfigProvider, CourseService, Navigator, Notifier};
pub use crate::utils::error::Result;
