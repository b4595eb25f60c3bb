//! Alertmanager notification model and template rendering.
//!
//! Templates are discovered once at startup into an immutable
//! [`TemplateCatalog`] and rendered per request with minijinja, which exposes
//! the `time_format`, `time_duration` and `time_from_now` helpers.

pub mod notification;
pub mod template_catalog;
pub mod template_render;

pub use notification::{parse_notification, Alert, Notification};
pub use template_catalog::{
    resolve_template_name, TemplateCatalog, TemplateCatalogError, DEFAULT_TEMPLATE_NAME,
    TEMPLATE_EXTENSION,
};
pub use template_render::{render_notification, RenderError};
