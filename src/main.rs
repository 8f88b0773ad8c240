use anyhow::Context;
use clap::Parser;
use course_admin::core::form::FieldStatus;
use course_admin::utils::{logger, validation::Validate};
use course_admin::{
    CliConfig, Command, Course, CourseError, CourseFormController, CourseListView,
    CourseResolver, FormSettings, HistoryNavigator, HttpCourseService, ListState, Settings,
    SubmitOutcome, TracingNotifier,
};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting course-admin");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    let result = match &cli.command {
        Command::List => list(&settings).await,
        Command::Show { id } => show(&settings, id).await,
        Command::Save { file, dry_run } => save(&settings, file, *dry_run).await,
    };

    if let Err(e) = result {
        match e.downcast_ref::<CourseError>() {
            Some(course_error) => exit_with(course_error),
            None => {
                tracing::error!("❌ {:#}", e);
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

fn exit_with(e: &CourseError) -> ! {
    tracing::error!("❌ {} (severity: {:?})", e, e.severity());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code().max(1));
}

async fn list(settings: &Settings) -> anyhow::Result<()> {
    let service = Arc::new(HttpCourseService::new(settings)?);
    let mut view = CourseListView::subscribe(service);

    match view.loaded().await {
        ListState::Failed(message) => {
            eprintln!("❌ {}", message);
            std::process::exit(2);
        }
        _ => println!("{}", view.render_table()),
    }
    Ok(())
}

async fn show(settings: &Settings, id: &str) -> anyhow::Result<()> {
    let service = Arc::new(HttpCourseService::new(settings)?);
    let course = CourseResolver::new(service.clone()).resolve(Some(id)).await?;

    let navigator = HistoryNavigator::new("courses");
    navigator.push(format!("courses/edit/{}", id));
    let mut controller = CourseFormController::with_settings(
        service,
        TracingNotifier,
        navigator,
        FormSettings::from_config(settings),
    );
    controller.initialize(Some(course))?;

    let form = controller.form()?;
    println!("{}", serde_json::to_string_pretty(&controller.value()?)?);
    for id in form.field_ids() {
        if let Some(message) = form.error_message(id)? {
            println!("  ✗ {}: {}", id, message);
        }
    }
    if form.is_valid() {
        println!("✅ Course is valid");
    }
    Ok(())
}

async fn save(settings: &Settings, file: &Path, dry_run: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading course file {}", file.display()))?;
    let course: Course = serde_json::from_str(&content)
        .with_context(|| format!("parsing course file {}", file.display()))?;

    let service = HttpCourseService::new(settings)?;
    let navigator = HistoryNavigator::new("courses");
    navigator.push(if course.is_new() {
        "courses/new".to_string()
    } else {
        format!("courses/edit/{}", course.id)
    });

    let mut controller = CourseFormController::with_settings(
        service,
        TracingNotifier,
        navigator,
        FormSettings::from_config(settings),
    );
    controller.initialize(Some(course))?;

    if dry_run {
        let form = controller.form()?;
        let invalid = form.invalid_fields();
        for (id, message) in &invalid {
            println!("  ✗ {}: {}", id, message);
        }
        if invalid.is_empty() {
            println!("✅ Course is valid ({} lesson(s))", form.lessons().len());
        }
        return Ok(());
    }

    match controller.submit().await? {
        SubmitOutcome::Saved(saved) => {
            println!("{}", serde_json::to_string_pretty(&saved)?);
            Ok(())
        }
        SubmitOutcome::Failed(message) => {
            eprintln!("❌ {}", message);
            std::process::exit(2);
        }
        SubmitOutcome::Invalid(errors) => {
            for (id, message) in &errors {
                let status = controller.field_status(*id).unwrap_or(FieldStatus::Pristine);
                eprintln!("  ✗ {}: {} ({:?})", id, message, status);
            }
            std::process::exit(1);
        }
    }
}
