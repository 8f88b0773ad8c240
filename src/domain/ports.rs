use crate::domain::model::Course;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Remote course service.
#[async_trait]
pub trait CourseService: Send + Sync {
    /// Single-shot fetch of the whole collection.
    async fn list(&self) -> Result<Vec<Course>>;
    async fn load_by_id(&self, id: &str) -> Result<Course>;
    /// Creates the course when its id is empty, updates it otherwise.
    async fn save(&self, course: &Course) -> Result<Course>;
}

#[async_trait]
impl<T: CourseService + ?Sized> CourseService for Arc<T> {
    async fn list(&self) -> Result<Vec<Course>> {
        (**self).list().await
    }

    async fn load_by_id(&self, id: &str) -> Result<Course> {
        (**self).load_by_id(id).await
    }

    async fn save(&self, course: &Course) -> Result<Course> {
        (**self).save(course).await
    }
}

/// Transient user feedback (snack-bar style). Fire and forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, duration: Duration);

    /// Blocking acknowledgement; defaults to a notification with no timeout.
    fn alert(&self, message: &str) {
        self.notify(message, Duration::ZERO);
    }
}

pub trait Navigator: Send + Sync {
    fn go_back(&self);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, message: &str, duration: Duration) {
        (**self).notify(message, duration)
    }

    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}

impl<T: Navigator + ?Sized> Navigator for Arc<T> {
    fn go_back(&self) {
        (**self).go_back()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn notification_duration(&self) -> Duration;
}
