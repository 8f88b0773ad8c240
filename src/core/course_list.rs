use crate::domain::model::{Course, CourseSummary};
use crate::domain::ports::CourseService;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DISPLAYED_COLUMNS: [&str; 2] = ["name", "category"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Loaded(Vec<Course>),
    Failed(String),
}

/// Read-only course listing. Subscribes to the service on construction and
/// drops the subscription (aborting any in-flight fetch) when dropped.
pub struct CourseListView {
    state: watch::Receiver<ListState>,
    task: JoinHandle<()>,
}

impl CourseListView {
    /// Must be called from within a tokio runtime.
    pub fn subscribe<S: CourseService + 'static>(service: Arc<S>) -> Self {
        let (tx, rx) = watch::channel(ListState::Loading);

        let task = tokio::spawn(async move {
            let next = match service.list().await {
                Ok(courses) => {
                    tracing::debug!("Loaded {} course(s)", courses.len());
                    ListState::Loaded(courses)
                }
                Err(e) => {
                    tracing::error!("Loading courses failed: {}", e);
                    ListState::Failed(e.user_friendly_message())
                }
            };
            // Nobody listening means the view is gone.
            let _ = tx.send(next);
        });

        Self { state: rx, task }
    }

    pub fn state(&self) -> ListState {
        self.state.borrow().clone()
    }

    /// Waits for the single emission of the list endpoint.
    pub async fn loaded(&mut self) -> ListState {
        match self
            .state
            .wait_for(|state| !matches!(state, ListState::Loading))
            .await
        {
            Ok(state) => state.clone(),
            Err(_) => ListState::Failed("Course list subscription ended".to_string()),
        }
    }

    pub fn rows(&self) -> Vec<CourseSummary> {
        match &*self.state.borrow() {
            ListState::Loaded(courses) => courses.iter().map(Course::summary).collect(),
            _ => Vec::new(),
        }
    }

    pub fn render_table(&self) -> String {
        match self.state() {
            ListState::Loading => "Loading courses...".to_string(),
            ListState::Failed(message) => format!("Could not load courses: {}", message),
            ListState::Loaded(_) => render_rows(&self.rows()),
        }
    }
}

impl Drop for CourseListView {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn render_rows(rows: &[CourseSummary]) -> String {
    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .chain(std::iter::once(DISPLAYED_COLUMNS[0].len()))
        .max()
        .unwrap_or_default();
    let category_width = rows
        .iter()
        .map(|r| r.category.chars().count())
        .chain(std::iter::once(DISPLAYED_COLUMNS[1].len()))
        .max()
        .unwrap_or_default();

    let mut lines = vec![
        format!(
            "{:<nw$}  {:<cw$}",
            DISPLAYED_COLUMNS[0],
            DISPLAYED_COLUMNS[1],
            nw = name_width,
            cw = category_width
        ),
        format!("{}  {}", "-".repeat(name_width), "-".repeat(category_width)),
    ];
    for row in rows {
        lines.push(format!(
            "{:<nw$}  {:<cw$}",
            row.name,
            row.category,
            nw = name_width,
            cw = category_width
        ));
    }
    lines
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
