//! fOS Form Cache
//!
//! Preserves user-entered form state across back/forward navigations when a
//! page is restored from a navigation cache instead of being reloaded.
//!
//! Field state is snapshotted into a `data-turbo-bfcache-form-value`
//! attribute on each dirty field (JSON string or boolean) and written back
//! into the live `value` / `checked` / `selected` properties when the page
//! is shown again. Nothing is stored outside the DOM.
//!
//! # Opting out
//! - `data-turbo="false"` or `data-turbo-bfcache-form="false"` on a field,
//!   a form or any ancestor
//! - `<meta name="turbo-cache-control" content="no-cache">` for the page
//!
//! Password fields are never cached.
//!
//! # Example
//! ```rust,ignore
//! use fos_dom::{Document, DomEvent};
//! use fos_formcache::FormCacheController;
//!
//! let mut doc = Document::new("https://example.com/signup");
//! let controller = FormCacheController::default();
//! let attachment = controller.attach(&mut doc);
//!
//! doc.tree_mut().set_value(email, "user@example.com");
//! doc.dispatch_event(DomEvent::change(email));
//! doc.dispatch_event(DomEvent::custom("turbo:load"));
//!
//! attachment.detach(&mut doc);
//! ```

mod cache_control;
mod classifier;
mod config;
mod error;
mod lifecycle;
mod strategy;
mod value;

pub use cache_control::CacheControl;
pub use classifier::{ElementClassifier, FIELD_MATCHERS};
pub use config::FormCacheConfig;
pub use error::FormCacheError;
pub use lifecycle::{Attachment, FormCacheController};
pub use strategy::{default_property, FieldKind, FieldStrategy, Outcome};
pub use value::CachedValue;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
