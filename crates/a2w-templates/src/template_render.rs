//! minijinja rendering of notifications with time helper functions.

use a2w_core::{duration_between, duration_from_now, format_timestamp_local};
use chrono::{DateTime, Utc};
use minijinja::{Environment, Error as TemplateError, ErrorKind};
use thiserror::Error;

use crate::notification::Notification;
use crate::template_catalog::TemplateCatalog;

#[derive(Debug, Error)]
/// Enumerates supported `RenderError` values.
pub enum RenderError {
    #[error("template '{name}' is not present in the template catalog")]
    UnknownTemplate { name: String },
    #[error("failed to render template '{name}': {source}")]
    Template {
        name: String,
        #[source]
        source: TemplateError,
    },
}

impl RenderError {
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::UnknownTemplate { .. } => "render_unknown_template",
            Self::Template { .. } => "render_template_failed",
        }
    }
}

/// Renders `notification` with the catalog template `template_name`.
///
/// The environment is built per call so `time_from_now` reads the clock at
/// render time.
pub fn render_notification(
    catalog: &TemplateCatalog,
    template_name: &str,
    notification: &Notification,
) -> Result<String, RenderError> {
    let source = catalog
        .source(template_name)
        .ok_or_else(|| RenderError::UnknownTemplate {
            name: template_name.to_string(),
        })?;
    let to_render_error = |source: TemplateError| RenderError::Template {
        name: template_name.to_string(),
        source,
    };

    let mut environment = Environment::new();
    register_time_helpers(&mut environment);
    let template = environment
        .template_from_named_str(template_name, source)
        .map_err(to_render_error)?;
    template.render(notification).map_err(to_render_error)
}

fn register_time_helpers(environment: &mut Environment<'_>) {
    environment.add_function("time_format", |timestamp: String| {
        parse_timestamp(&timestamp).map(format_timestamp_local)
    });
    environment.add_function("time_duration", |start: String, end: String| {
        Ok::<_, TemplateError>(duration_between(
            parse_timestamp(&start)?,
            parse_timestamp(&end)?,
        ))
    });
    environment.add_function("time_from_now", |start: String| {
        parse_timestamp(&start).map(duration_from_now)
    });
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TemplateError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|error| {
            TemplateError::new(
                ErrorKind::InvalidOperation,
                format!("'{raw}' is not an RFC3339 timestamp: {error}"),
            )
        })
}
