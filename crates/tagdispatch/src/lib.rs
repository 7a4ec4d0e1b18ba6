//! # Tagdispatch
//! Generic functions dispatched on the labels of a value.
//!
//! A value carries an ordered sequence of labels, most specific first. A generic is only a name:
//! calling it through [`Registry::dispatch`] looks up the implementation registered for the first
//! label that has one, falling back to the `"default"` label. A running implementation can hand
//! over to the next implementation in the same walk with [`Cursor::next`].
//! # Quickstart
//! ```
//! use tagdispatch::{ClassDef, Registry, Tagged};
//!
//! let factor: ClassDef<u32> = ClassDef::new("factor");
//! let ordered = factor.extend("ordered");
//!
//! let mut registry: Registry<Tagged<u32>, (), String> = Registry::new();
//! registry.register("describe", "ordered", |cursor| {
//!     Ok(format!("ordered, {}", cursor.next()?))
//! });
//! registry.register("describe", "factor", |cursor| {
//!     Ok(format!("factor of {}", cursor.value().value()))
//! });
//!
//! let value = ordered.create(3).unwrap();
//! assert_eq!(registry.dispatch("describe", &value, &()).unwrap(), "ordered, factor of 3");
//! ```
mod class;
mod deriver;
mod dispatch;
mod error;
mod has_labels;
mod label;
mod registry;
pub mod table;
mod tagged;
pub use class::ClassDef;
pub use deriver::DeriveFn;
pub use deriver::LabelDeriver;
pub use deriver::Untagged;
pub use dispatch::Cursor;
pub use dispatch::Resolution;
pub use dispatch::ResolutionStep;
pub use error::DispatchError;
pub use error::ValidationError;
pub use has_labels::HasLabels;
pub use label::labels;
pub use label::Label;
pub use label::DEFAULT_LABEL;
pub use label::UNTAGGED_LABEL;
#[doc(inline)]
pub use registry::Method;
pub use registry::Registry;
pub use tagged::Tagged;
