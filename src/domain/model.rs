use serde::{Deserialize, Deserializer, Serialize};

/// A course as exchanged with the course service. An empty `id` means the
/// course has not been saved yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    pub name: String,
    pub youtube_url: String,
}

// Backends send `null` for ids that are not assigned yet and for courses
// stored without lessons.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Course {
    /// Blank template used when creating a new course.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            name: self.name.clone(),
            category: self.category.clone(),
        }
    }
}

/// One row of the course listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSummary {
    pub name: String,
    pub category: String,
}
