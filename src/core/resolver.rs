use crate::domain::model::Course;
use crate::domain::ports::CourseService;
use crate::utils::error::Result;

/// Supplies the course a form route is opened with: an empty template for
/// "create", the stored course for "edit".
pub struct CourseResolver<S: CourseService> {
    service: S,
}

impl<S: CourseService> CourseResolver<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub async fn resolve(&self, id: Option<&str>) -> Result<Course> {
        match id.filter(|id| !id.is_empty()) {
            Some(id) => {
                tracing::debug!("Resolving course {}", id);
                self.service.load_by_id(id).await
            }
            None => Ok(Course::empty()),
        }
    }
}
