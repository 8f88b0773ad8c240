use crate::core::form::{CourseForm, FieldId, FieldStatus, LessonRow};
use crate::domain::model::Course;
use crate::domain::ports::{ConfigProvider, CourseService, Navigator, Notifier};
use crate::utils::error::{CourseError, Result};
use std::time::Duration;

pub const SAVED_MESSAGE: &str = "Course saved successfully";
pub const SAVE_FAILED_MESSAGE: &str = "Error saving course";
pub const INVALID_FORM_MESSAGE: &str = "Invalid form";

pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone)]
pub struct FormSettings {
    pub notification_duration: Duration,
}

impl FormSettings {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            notification_duration: config.notification_duration(),
        }
    }
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved; carries what the service returned.
    Saved(Course),
    /// The service rejected the save; the form is left as it was.
    Failed(String),
    /// Nothing was sent. Every invalid field with its message.
    Invalid(Vec<(FieldId, String)>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Editing,
    Closed,
}

/// Create/edit controller for a single course.
///
/// The collaborators are supplied by the caller so a UI shell (or a test) can
/// decide how notifications and navigation surface. `submit` borrows the
/// controller mutably, so a second submission cannot start while a save is
/// in flight.
pub struct CourseFormController<S: CourseService, N: Notifier, V: Navigator> {
    service: S,
    notifier: N,
    navigator: V,
    settings: FormSettings,
    form: Option<CourseForm>,
    phase: Phase,
}

impl<S: CourseService, N: Notifier, V: Navigator> CourseFormController<S, N, V> {
    pub fn new(service: S, notifier: N, navigator: V) -> Self {
        Self::with_settings(service, notifier, navigator, FormSettings::default())
    }

    pub fn with_settings(service: S, notifier: N, navigator: V, settings: FormSettings) -> Self {
        Self {
            service,
            notifier,
            navigator,
            settings,
            form: None,
            phase: Phase::Uninitialized,
        }
    }

    /// Builds the editable tree from the course the route resolved. Replaces
    /// any previous tree and reopens a closed controller.
    pub fn initialize(&mut self, route_course: Option<Course>) -> Result<()> {
        let course = route_course.ok_or(CourseError::MissingRouteData)?;
        let form = CourseForm::from_course(&course);
        tracing::debug!(
            "Initialized course form (id: {:?}, lessons: {})",
            course.id,
            form.lessons().len()
        );
        self.form = Some(form);
        self.phase = Phase::Editing;
        Ok(())
    }

    pub fn form(&self) -> Result<&CourseForm> {
        match self.phase {
            Phase::Uninitialized => Err(CourseError::NotInitialized),
            Phase::Closed => Err(CourseError::FormClosed),
            Phase::Editing => self.form.as_ref().ok_or(CourseError::NotInitialized),
        }
    }

    fn form_mut(&mut self) -> Result<&mut CourseForm> {
        match self.phase {
            Phase::Uninitialized => Err(CourseError::NotInitialized),
            Phase::Closed => Err(CourseError::FormClosed),
            Phase::Editing => self.form.as_mut().ok_or(CourseError::NotInitialized),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    pub fn lesson_rows(&self) -> Result<&[LessonRow]> {
        Ok(self.form()?.lessons().rows())
    }

    /// Appends a blank lesson and returns its index.
    pub fn add_lesson(&mut self) -> Result<usize> {
        Ok(self.form_mut()?.add_lesson())
    }

    pub fn remove_lesson(&mut self, index: usize) -> Result<()> {
        self.form_mut()?.remove_lesson(index)?;
        Ok(())
    }

    pub fn set_value(&mut self, field: FieldId, value: impl Into<String>) -> Result<()> {
        self.form_mut()?.set_value(field, value)
    }

    pub fn touch(&mut self, field: FieldId) -> Result<()> {
        self.form_mut()?.touch(field)
    }

    pub fn field_status(&self, field: FieldId) -> Result<FieldStatus> {
        self.form()?.status(field)
    }

    /// Message for the first violation of `field`, or `None` when valid.
    pub fn validate_field(&self, field: FieldId) -> Result<Option<String>> {
        self.form()?.error_message(field)
    }

    /// Inline errors the user can currently see (touched and invalid).
    pub fn visible_errors(&self) -> Result<Vec<(FieldId, String)>> {
        let form = self.form()?;
        Ok(form
            .invalid_fields()
            .into_iter()
            .filter(|(id, _)| matches!(form.status(*id), Ok(FieldStatus::TouchedInvalid)))
            .collect())
    }

    pub fn is_lesson_collection_invalid(&self) -> Result<bool> {
        Ok(self.form()?.is_lessons_required_error())
    }

    /// True when the open form differs from the course it was opened with.
    pub fn has_unsaved_changes(&self) -> Result<bool> {
        Ok(self.form()?.is_dirty())
    }

    /// Current value of the tree in the course shape.
    pub fn value(&self) -> Result<Course> {
        Ok(self.form()?.to_course())
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let form = self.form_mut()?;

        if !form.is_valid() {
            form.touch_all();
            let invalid = form.invalid_fields();
            tracing::warn!("Submission blocked: {} invalid field(s)", invalid.len());
            self.notifier.alert(INVALID_FORM_MESSAGE);
            return Ok(SubmitOutcome::Invalid(invalid));
        }

        let course = form.to_course();
        tracing::info!(
            "Saving course '{}' with {} lesson(s)",
            course.name,
            course.lessons.len()
        );

        match self.service.save(&course).await {
            Ok(saved) => {
                tracing::info!("Course '{}' saved (id: {})", saved.name, saved.id);
                self.notifier
                    .notify(SAVED_MESSAGE, self.settings.notification_duration);
                self.close();
                Ok(SubmitOutcome::Saved(saved))
            }
            Err(e) => {
                tracing::error!("Saving course failed: {}", e);
                self.notifier
                    .notify(SAVE_FAILED_MESSAGE, self.settings.notification_duration);
                Ok(SubmitOutcome::Failed(e.user_friendly_message()))
            }
        }
    }

    /// Discards edits and returns to the previous view. A form that is not
    /// open fails with `NotInitialized` / `FormClosed` and leaves navigation
    /// alone.
    pub fn cancel(&mut self) -> Result<()> {
        if self.form()?.is_dirty() {
            tracing::info!("Course form cancelled; discarding unsaved changes");
        } else {
            tracing::debug!("Course form cancelled");
        }
        self.close();
        Ok(())
    }

    fn close(&mut self) {
        self.form = None;
        self.phase = Phase::Closed;
        self.navigator.go_back();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::LessonField;
    use crate::domain::model::Lesson;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MockService {
        saved: Mutex<Vec<Course>>,
        fail: bool,
    }

    impl MockService {
        fn failing() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn saved(&self) -> Vec<Course> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl CourseService for MockService {
        async fn list(&self) -> Result<Vec<Course>> {
            Ok(self.saved())
        }

        async fn load_by_id(&self, id: &str) -> Result<Course> {
            self.saved()
                .into_iter()
                .find(|c| c.id == id)
                .ok_or(CourseError::ServiceError {
                    status: 404,
                    message: format!("no course {}", id),
                })
        }

        async fn save(&self, course: &Course) -> Result<Course> {
            self.saved.lock().unwrap().push(course.clone());
            if self.fail {
                return Err(CourseError::ServiceError {
                    status: 500,
                    message: "database unavailable".to_string(),
                });
            }
            let mut saved = course.clone();
            if saved.id.is_empty() {
                saved.id = "1".to_string();
            }
            Ok(saved)
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<(String, Duration)>>,
    }

    impl RecordingNotifier {
        fn messages(&self) -> Vec<(String, Duration)> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str, duration: Duration) {
            self.messages
                .lock()
                .unwrap()
                .push((message.to_string(), duration));
        }
    }

    #[derive(Default)]
    struct CountingNavigator {
        back: Mutex<usize>,
    }

    impl CountingNavigator {
        fn count(&self) -> usize {
            *self.back.lock().unwrap()
        }
    }

    impl Navigator for CountingNavigator {
        fn go_back(&self) {
            *self.back.lock().unwrap() += 1;
        }
    }

    type Controller =
        CourseFormController<Arc<MockService>, Arc<RecordingNotifier>, Arc<CountingNavigator>>;

    struct Fixture {
        service: Arc<MockService>,
        notifier: Arc<RecordingNotifier>,
        navigator: Arc<CountingNavigator>,
        controller: Controller,
    }

    fn fixture(service: MockService) -> Fixture {
        let service = Arc::new(service);
        let notifier = Arc::new(RecordingNotifier::default());
        let navigator = Arc::new(CountingNavigator::default());
        let controller =
            CourseFormController::new(service.clone(), notifier.clone(), navigator.clone());
        Fixture {
            service,
            notifier,
            navigator,
            controller,
        }
    }

    fn lesson(name: &str, url: &str) -> Lesson {
        Lesson {
            id: String::new(),
            name: name.to_string(),
            youtube_url: url.to_string(),
        }
    }

    fn valid_course() -> Course {
        Course {
            id: String::new(),
            name: "Angular with Spring".to_string(),
            category: "full-stack".to_string(),
            lessons: vec![
                lesson("Getting started", "aaaaaaaaaaa"),
                lesson("Reactive forms", "bbbbbbbbbb"),
            ],
        }
    }

    #[test]
    fn test_initialize_without_route_data_fails_fast() {
        let mut f = fixture(MockService::default());
        assert!(matches!(
            f.controller.initialize(None),
            Err(CourseError::MissingRouteData)
        ));
        assert!(matches!(f.controller.form(), Err(CourseError::NotInitialized)));
    }

    #[test]
    fn test_intro_course_gets_blank_row_and_passes_min_length() {
        let mut f = fixture(MockService::default());
        f.controller
            .initialize(Some(Course {
                id: String::new(),
                name: "Intro".to_string(),
                category: "Tech".to_string(),
                lessons: vec![],
            }))
            .unwrap();

        let rows = f.controller.lesson_rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].to_lesson(), Lesson::default());
        assert_eq!(f.controller.validate_field(FieldId::Name).unwrap(), None);
    }

    #[test]
    fn test_initialize_replaces_previous_tree() {
        let mut f = fixture(MockService::default());
        f.controller.initialize(Some(valid_course())).unwrap();
        f.controller.add_lesson().unwrap();
        assert_eq!(f.controller.lesson_rows().unwrap().len(), 3);

        f.controller.initialize(Some(valid_course())).unwrap();
        assert_eq!(f.controller.lesson_rows().unwrap().len(), 2);
    }

    #[test]
    fn test_lesson_collection_error_is_interaction_gated() {
        let mut f = fixture(MockService::default());
        f.controller.initialize(Some(Course::empty())).unwrap();
        assert!(!f.controller.is_lesson_collection_invalid().unwrap());

        f.controller.remove_lesson(0).unwrap();
        assert!(f.controller.is_lesson_collection_invalid().unwrap());

        f.controller.add_lesson().unwrap();
        assert!(!f.controller.is_lesson_collection_invalid().unwrap());
    }

    #[test]
    fn test_video_reference_messages() {
        let mut f = fixture(MockService::default());
        f.controller.initialize(Some(valid_course())).unwrap();
        let url = FieldId::Lesson {
            index: 0,
            field: LessonField::YoutubeUrl,
        };

        f.controller.set_value(url, "123456789").unwrap();
        assert_eq!(
            f.controller.validate_field(url).unwrap().as_deref(),
            Some("Minimum length is 10 characters")
        );

        f.controller.set_value(url, "123456789012").unwrap();
        assert_eq!(
            f.controller.validate_field(url).unwrap().as_deref(),
            Some("Maximum length of 11 characters exceeded")
        );

        f.controller.set_value(url, "").unwrap();
        assert_eq!(
            f.controller.validate_field(url).unwrap().as_deref(),
            Some("Field is required")
        );
    }

    #[test]
    fn test_visible_errors_only_after_touch() {
        let mut f = fixture(MockService::default());
        f.controller.initialize(Some(Course::empty())).unwrap();
        assert!(f.controller.visible_errors().unwrap().is_empty());

        f.controller.touch(FieldId::Name).unwrap();
        let visible = f.controller.visible_errors().unwrap();
        assert_eq!(visible, vec![(FieldId::Name, "Field is required".to_string())]);
    }

    #[tokio::test]
    async fn test_submit_valid_course_saves_once_and_navigates_back() {
        let mut f = fixture(MockService::default());
        f.controller.initialize(Some(valid_course())).unwrap();

        let outcome = f.controller.submit().await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Saved(ref c) if c.id == "1"));
        let saved = f.service.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].lessons, valid_course().lessons);
        assert_eq!(
            f.notifier.messages(),
            vec![(SAVED_MESSAGE.to_string(), Duration::from_millis(5000))]
        );
        assert_eq!(f.navigator.count(), 1);
        assert!(f.controller.is_closed());
    }

    #[tokio::test]
    async fn test_submit_after_save_is_rejected() {
        let mut f = fixture(MockService::default());
        f.controller.initialize(Some(valid_course())).unwrap();
        f.controller.submit().await.unwrap();

        assert!(matches!(
            f.controller.submit().await,
            Err(CourseError::FormClosed)
        ));
        assert!(matches!(
            f.controller.add_lesson(),
            Err(CourseError::FormClosed)
        ));
        assert_eq!(f.service.saved().len(), 1);
        assert_eq!(f.navigator.count(), 1);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_form_editable() {
        let mut f = fixture(MockService::failing());
        f.controller.initialize(Some(valid_course())).unwrap();

        let outcome = f.controller.submit().await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Failed("The course service rejected the request (500)".to_string())
        );
        assert_eq!(f.notifier.messages()[0].0, SAVE_FAILED_MESSAGE);
        assert_eq!(f.navigator.count(), 0);
        assert!(!f.controller.is_closed());
        assert_eq!(f.controller.value().unwrap(), valid_course());
    }

    #[tokio::test]
    async fn test_name_out_of_range_never_reaches_service() {
        for len in (0..5).chain(101..106) {
            let mut f = fixture(MockService::default());
            let mut course = valid_course();
            course.name = "n".repeat(len);
            f.controller.initialize(Some(course)).unwrap();

            let outcome = f.controller.submit().await.unwrap();

            assert!(matches!(outcome, SubmitOutcome::Invalid(_)), "len {}", len);
            assert!(f.service.saved().is_empty(), "len {}", len);
        }
    }

    #[tokio::test]
    async fn test_invalid_submit_shows_every_inline_error() {
        let mut f = fixture(MockService::default());
        f.controller
            .initialize(Some(Course {
                id: String::new(),
                name: "abc".to_string(),
                category: String::new(),
                lessons: vec![lesson("Intro lesson", "short")],
            }))
            .unwrap();

        let outcome = f.controller.submit().await.unwrap();

        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("expected invalid outcome");
        };
        assert_eq!(errors.len(), 4);
        assert_eq!(f.controller.visible_errors().unwrap(), errors);
        for (id, _) in &errors {
            assert_eq!(
                f.controller.field_status(*id).unwrap(),
                FieldStatus::TouchedInvalid
            );
        }
        assert!(f.service.saved().is_empty());
        assert_eq!(
            f.notifier.messages(),
            vec![(INVALID_FORM_MESSAGE.to_string(), Duration::ZERO)]
        );
        assert_eq!(f.navigator.count(), 0);
    }

    #[tokio::test]
    async fn test_submit_with_all_lessons_removed_is_blocked() {
        let mut f = fixture(MockService::default());
        f.controller.initialize(Some(valid_course())).unwrap();
        f.controller.remove_lesson(1).unwrap();
        f.controller.remove_lesson(0).unwrap();

        let outcome = f.controller.submit().await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Invalid(vec![(FieldId::Lessons, "Field is required".to_string())])
        );
        assert!(f.service.saved().is_empty());
    }

    #[test]
    fn test_cancel_navigates_back_without_saving() {
        let mut f = fixture(MockService::default());
        f.controller.initialize(Some(valid_course())).unwrap();
        f.controller.set_value(FieldId::Name, "Something else").unwrap();

        f.controller.cancel().unwrap();

        assert_eq!(f.navigator.count(), 1);
        assert!(f.service.saved().is_empty());
        assert!(matches!(f.controller.value(), Err(CourseError::FormClosed)));
    }

    #[tokio::test]
    async fn test_cancel_after_save_does_not_navigate_twice() {
        let mut f = fixture(MockService::default());
        f.controller.initialize(Some(valid_course())).unwrap();
        f.controller.submit().await.unwrap();
        assert_eq!(f.navigator.count(), 1);

        assert!(matches!(f.controller.cancel(), Err(CourseError::FormClosed)));
        assert!(matches!(f.controller.cancel(), Err(CourseError::FormClosed)));

        assert_eq!(f.navigator.count(), 1);
    }

    #[test]
    fn test_cancel_before_initialize_is_rejected() {
        let mut f = fixture(MockService::default());

        assert!(matches!(
            f.controller.cancel(),
            Err(CourseError::NotInitialized)
        ));
        assert_eq!(f.navigator.count(), 0);
    }

    #[test]
    fn test_unsaved_changes_follow_edits() {
        let mut f = fixture(MockService::default());
        f.controller.initialize(Some(valid_course())).unwrap();
        assert!(!f.controller.has_unsaved_changes().unwrap());

        f.controller
            .touch(FieldId::Lesson {
                index: 0,
                field: LessonField::Name,
            })
            .unwrap();
        assert!(!f.controller.has_unsaved_changes().unwrap());

        f.controller.remove_lesson(0).unwrap();
        assert!(f.controller.has_unsaved_changes().unwrap());

        f.controller.cancel().unwrap();
        assert!(matches!(
            f.controller.has_unsaved_changes(),
            Err(CourseError::FormClosed)
        ));
    }
}
