//! Template rendering using Tera.
//!
//! User-facing notification text comes from templates embedded in the
//! binary. A configured template string can override the embedded one.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;
use tera::{Context, Tera};
use tracing::warn;

/// Template used for pending-task notifications.
pub const PENDING_TASKS_TEMPLATE: &str = "notifications/pending_tasks.tera";

/// Embedded templates, keyed by name.
static EMBEDDED_TEMPLATES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(
        PENDING_TASKS_TEMPLATE,
        include_str!("../templates/notifications/pending_tasks.tera"),
    );
    m
});

/// Global template engine with caching.
static TERA: Lazy<RwLock<Option<Tera>>> = Lazy::new(|| RwLock::new(None));

/// Build the template engine from the embedded templates.
///
/// # Errors
///
/// Returns an error if an embedded template does not parse.
pub fn init_templates() -> Result<()> {
    let mut tera = Tera::default();
    for (name, content) in EMBEDDED_TEMPLATES.iter() {
        tera.add_raw_template(name, content)
            .map_err(|e| Error::Template(format!("Failed to load template {name}: {e}")))?;
    }
    *TERA.write().map_err(|e| Error::Template(e.to_string()))? = Some(tera);
    Ok(())
}

/// Render an embedded template with the given context.
///
/// # Errors
///
/// Returns an error if the template doesn't exist or rendering fails.
pub fn render(name: &str, context: &Context) -> Result<String> {
    let needs_init = TERA.read().map_err(|e| Error::Template(e.to_string()))?.is_none();
    if needs_init {
        init_templates()?;
    }

    let guard = TERA.read().map_err(|e| Error::Template(e.to_string()))?;
    let tera = guard.as_ref().ok_or_else(|| Error::Template("Templates not initialized".into()))?;
    let rendered = tera
        .render(name, context)
        .map_err(|e| Error::Template(format!("Failed to render template {name}: {e}")))?;
    drop(guard);

    Ok(rendered)
}

/// Render a template given as source text rather than by name.
///
/// # Errors
///
/// Returns an error if the source does not parse or rendering fails.
pub fn render_str(source: &str, context: &Context) -> Result<String> {
    Tera::one_off(source, context, false)
        .map_err(|e| Error::Template(format!("Failed to render inline template: {e}")))
}

fn pending_context(pending_count: usize) -> Context {
    let mut context = Context::new();
    context.insert("pending_count", &pending_count);
    context
}

/// Check that a notification template renders.
///
/// # Errors
///
/// Returns an error if the template does not render with a sample count.
pub fn check_notification_template(source: &str) -> Result<()> {
    render_str(source, &pending_context(1)).map(|_| ())
}

/// Render the pending-task notification message.
///
/// A failing override is logged and the embedded template is used instead.
#[must_use]
pub fn render_pending_notification(pending_count: usize, template: Option<&str>) -> String {
    let context = pending_context(pending_count);
    if let Some(source) = template {
        match render_str(source, &context) {
            Ok(message) => return message.trim_end().to_string(),
            Err(e) => warn!(error = %e, "notification template failed, using default"),
        }
    }
    match render(PENDING_TASKS_TEMPLATE, &context) {
        Ok(message) => message.trim_end().to_string(),
        Err(e) => {
            warn!(error = %e, "embedded notification template failed");
            format!("Email notification: You have {pending_count} pending task(s)")
        }
    }
}

/// Get the list of all embedded template names.
#[must_use]
pub fn embedded_template_names() -> Vec<&'static str> {
    EMBEDDED_TEMPLATES.keys().copied().collect()
}
