use crate::core::validators::{self, run_validators, ValidationError, Validator};
use crate::domain::model::{Course, Lesson};
use crate::utils::error::{CourseError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Pristine,
    TouchedValid,
    TouchedInvalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonField {
    Name,
    YoutubeUrl,
}

/// Typed address of a control in the course form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Name,
    Category,
    Lessons,
    Lesson { index: usize, field: LessonField },
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldId::Name => write!(f, "name"),
            FieldId::Category => write!(f, "category"),
            FieldId::Lessons => write!(f, "lessons"),
            FieldId::Lesson {
                index,
                field: LessonField::Name,
            } => write!(f, "lessons[{}].name", index),
            FieldId::Lesson {
                index,
                field: LessonField::YoutubeUrl,
            } => write!(f, "lessons[{}].youtubeUrl", index),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldControl {
    value: String,
    validators: &'static [Validator],
    touched: bool,
    dirty: bool,
}

impl FieldControl {
    pub fn new(value: impl Into<String>, validators: &'static [Validator]) -> Self {
        Self {
            value: value.into(),
            validators,
            touched: false,
            dirty: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }

    pub fn touch(&mut self) {
        self.touched = true;
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        run_validators(self.validators, &self.value)
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    pub fn status(&self) -> FieldStatus {
        match (self.touched, self.is_valid()) {
            (false, _) => FieldStatus::Pristine,
            (true, true) => FieldStatus::TouchedValid,
            (true, false) => FieldStatus::TouchedInvalid,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LessonRow {
    pub id: String,
    pub name: FieldControl,
    pub youtube_url: FieldControl,
}

impl LessonRow {
    pub fn blank() -> Self {
        Self::from_lesson(&Lesson::default())
    }

    pub fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id.clone(),
            name: FieldControl::new(lesson.name.clone(), validators::LESSON_NAME),
            youtube_url: FieldControl::new(lesson.youtube_url.clone(), validators::LESSON_VIDEO),
        }
    }

    pub fn field(&self, field: LessonField) -> &FieldControl {
        match field {
            LessonField::Name => &self.name,
            LessonField::YoutubeUrl => &self.youtube_url,
        }
    }

    pub fn field_mut(&mut self, field: LessonField) -> &mut FieldControl {
        match field {
            LessonField::Name => &mut self.name,
            LessonField::YoutubeUrl => &mut self.youtube_url,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.name.is_valid() && self.youtube_url.is_valid()
    }

    pub fn is_dirty(&self) -> bool {
        self.name.is_dirty() || self.youtube_url.is_dirty()
    }

    pub fn to_lesson(&self) -> Lesson {
        Lesson {
            id: self.id.clone(),
            name: self.name.value().to_string(),
            youtube_url: self.youtube_url.value().to_string(),
        }
    }
}

/// Ordered lesson rows with a non-empty constraint on the collection itself.
#[derive(Debug, Clone, Default)]
pub struct LessonArray {
    rows: Vec<LessonRow>,
    touched: bool,
    dirty: bool,
}

impl LessonArray {
    pub fn new(rows: Vec<LessonRow>) -> Self {
        Self {
            rows,
            touched: false,
            dirty: false,
        }
    }

    pub fn rows(&self) -> &[LessonRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&LessonRow> {
        let len = self.rows.len();
        self.rows
            .get(index)
            .ok_or(CourseError::IndexOutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut LessonRow> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or(CourseError::IndexOutOfRange { index, len })
    }

    /// Appends a row and returns its index.
    pub fn push(&mut self, row: LessonRow) -> usize {
        self.rows.push(row);
        self.dirty = true;
        self.rows.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Result<LessonRow> {
        if index >= self.rows.len() {
            return Err(CourseError::IndexOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        self.dirty = true;
        Ok(self.rows.remove(index))
    }

    pub fn touch(&mut self) {
        self.touched = true;
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// True once rows were added or removed, or any row was edited.
    pub fn is_dirty(&self) -> bool {
        self.dirty || self.rows.iter().any(LessonRow::is_dirty)
    }

    /// Errors of the collection itself: `Required` when empty, `Invalid`
    /// when any row is invalid.
    pub fn errors(&self) -> Vec<ValidationError> {
        if self.rows.is_empty() {
            vec![ValidationError::Required]
        } else if self.rows.iter().any(|row| !row.is_valid()) {
            vec![ValidationError::Invalid]
        } else {
            Vec::new()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    pub fn status(&self) -> FieldStatus {
        match (self.touched, self.is_valid()) {
            (false, _) => FieldStatus::Pristine,
            (true, true) => FieldStatus::TouchedValid,
            (true, false) => FieldStatus::TouchedInvalid,
        }
    }
}

/// The editable tree mirroring a [`Course`].
#[derive(Debug, Clone)]
pub struct CourseForm {
    id: String,
    name: FieldControl,
    category: FieldControl,
    lessons: LessonArray,
}

impl CourseForm {
    /// A course without lessons still gets one blank row.
    pub fn from_course(course: &Course) -> Self {
        let rows = if course.lessons.is_empty() {
            vec![LessonRow::blank()]
        } else {
            course.lessons.iter().map(LessonRow::from_lesson).collect()
        };

        Self {
            id: course.id.clone(),
            name: FieldControl::new(course.name.clone(), validators::COURSE_NAME),
            category: FieldControl::new(course.category.clone(), validators::COURSE_CATEGORY),
            lessons: LessonArray::new(rows),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn lessons(&self) -> &LessonArray {
        &self.lessons
    }

    pub fn add_lesson(&mut self) -> usize {
        self.lessons.push(LessonRow::blank())
    }

    pub fn remove_lesson(&mut self, index: usize) -> Result<LessonRow> {
        let removed = self.lessons.remove(index)?;
        self.lessons.touch();
        Ok(removed)
    }

    pub fn control(&self, field: FieldId) -> Result<&FieldControl> {
        match field {
            FieldId::Name => Ok(&self.name),
            FieldId::Category => Ok(&self.category),
            FieldId::Lesson { index, field } => Ok(self.lessons.get(index)?.field(field)),
            FieldId::Lessons => Err(CourseError::NotAControl {
                field: field.to_string(),
            }),
        }
    }

    fn control_mut(&mut self, field: FieldId) -> Result<&mut FieldControl> {
        match field {
            FieldId::Name => Ok(&mut self.name),
            FieldId::Category => Ok(&mut self.category),
            FieldId::Lesson { index, field } => Ok(self.lessons.get_mut(index)?.field_mut(field)),
            FieldId::Lessons => Err(CourseError::NotAControl {
                field: field.to_string(),
            }),
        }
    }

    pub fn set_value(&mut self, field: FieldId, value: impl Into<String>) -> Result<()> {
        self.control_mut(field)?.set_value(value);
        Ok(())
    }

    /// Marks a control touched. Touching a lesson control also touches the
    /// collection.
    pub fn touch(&mut self, field: FieldId) -> Result<()> {
        match field {
            FieldId::Lessons => self.lessons.touch(),
            FieldId::Lesson { .. } => {
                self.control_mut(field)?.touch();
                self.lessons.touch();
            }
            _ => self.control_mut(field)?.touch(),
        }
        Ok(())
    }

    pub fn touch_all(&mut self) {
        self.name.touch();
        self.category.touch();
        self.lessons.touch();
        for row in self.lessons.rows.iter_mut() {
            row.name.touch();
            row.youtube_url.touch();
        }
    }

    pub fn errors_of(&self, field: FieldId) -> Result<Vec<ValidationError>> {
        match field {
            FieldId::Lessons => Ok(self.lessons.errors()),
            _ => Ok(self.control(field)?.errors()),
        }
    }

    pub fn status(&self, field: FieldId) -> Result<FieldStatus> {
        match field {
            FieldId::Lessons => Ok(self.lessons.status()),
            _ => Ok(self.control(field)?.status()),
        }
    }

    /// First applicable message for a field, or `None` when it is valid.
    pub fn error_message(&self, field: FieldId) -> Result<Option<String>> {
        Ok(self
            .errors_of(field)?
            .first()
            .map(ValidationError::to_string))
    }

    /// Every addressable field, in display order.
    pub fn field_ids(&self) -> Vec<FieldId> {
        let mut ids = vec![FieldId::Name, FieldId::Category, FieldId::Lessons];
        for index in 0..self.lessons.len() {
            ids.push(FieldId::Lesson {
                index,
                field: LessonField::Name,
            });
            ids.push(FieldId::Lesson {
                index,
                field: LessonField::YoutubeUrl,
            });
        }
        ids
    }

    /// Fields currently invalid, paired with their first message.
    pub fn invalid_fields(&self) -> Vec<(FieldId, String)> {
        self.field_ids()
            .into_iter()
            .filter_map(|id| {
                // Ids come from field_ids so the lookup cannot miss.
                self.error_message(id).ok().flatten().map(|msg| (id, msg))
            })
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.name.is_valid() && self.category.is_valid() && self.lessons.is_valid()
    }

    /// Whether anything was edited since the form was built from its course.
    pub fn is_dirty(&self) -> bool {
        self.name.is_dirty() || self.category.is_dirty() || self.lessons.is_dirty()
    }

    pub fn is_lessons_required_error(&self) -> bool {
        self.lessons.is_empty() && self.lessons.is_touched()
    }

    pub fn to_course(&self) -> Course {
        Course {
            id: self.id.clone(),
            name: self.name.value().to_string(),
            category: self.category.value().to_string(),
            lessons: self.lessons.rows().iter().map(LessonRow::to_lesson).collect(),
        }
    }
}
