//! # tagsinput
//!
//! Tag list input widgets for notebook-style front ends: string tags, color
//! tags, float tags and int tags. Each widget holds an ordered list of values
//! that a user builds by adding and removing chips, and that a host program
//! reads back as a typed list.
//!
//! This crate is the authoritative core behind those widgets. It decides
//! whether a proposed tag list is accepted, keeps the accepted state, and
//! exchanges that state with the display surface as JSON. Rendering and the
//! message transport live elsewhere.
//!
//! ## Layers
//!
//! - [`validation`]: the rules. No blank tags, allow-list membership, and for
//!   numeric widgets inclusive `min`/`max` bounds.
//! - [`collection`] and [`widgets`]: widget state. [`TagCollection`] is a tagged
//!   enum over the four widget kinds; every kind implements [`TagInput`].
//! - [`state`] and [`sync`]: the synchronized JSON state and the message
//!   protocol spoken with the display surface.
//! - [`manager`]: the per-session registry of live widgets.
//! - [`config`]: layered defaults for newly created widgets.
//!
//! ## Example
//!
//! ```
//! use tagsinput::{IntTagCollection, TagInput, ValidationError};
//!
//! let mut ints = IntTagCollection::new();
//! ints.set_min(Some(0));
//! ints.set_max(Some(10));
//!
//! ints.set_value(vec![5, 10, 0]).unwrap();
//! assert!(matches!(
//!     ints.set_value(vec![5, 11]),
//!     Err(ValidationError::OutOfRange { .. })
//! ));
//! assert_eq!(ints.value(), &[5, 10, 0]);
//! ```

pub mod attributes;
pub mod collection;
pub mod color;
pub mod config;
pub mod element;
pub mod error;
pub mod format;
pub mod manager;
pub mod state;
pub mod style;
pub mod sync;
pub mod validation;
pub mod widgets;

pub use attributes::Attribute;
pub use collection::{NumericRange, TagList};
pub use color::Color;
pub use config::TagsConfig;
pub use error::{Result, TagsError};
pub use format::NumberFormat;
pub use manager::WidgetManager;
pub use state::{FrontendModule, WidgetState};
pub use style::TagStyle;
pub use sync::{SyncMessage, Widget};
pub use validation::{RangeBound, ValidationError};
pub use widgets::{
    ColorTagCollection, FloatTagCollection, IntTagCollection, NumericTagCollection,
    StringTagCollection, TagCollection, TagInput, WidgetKind,
};
