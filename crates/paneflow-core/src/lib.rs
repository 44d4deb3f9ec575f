#![forbid(unsafe_code)]

//! Core data model for the paneflow navigation engine.
//!
//! This crate defines the vocabulary every other paneflow crate speaks:
//!
//! - [`Session`] — the identity scope that keeps independent histories apart.
//! - [`Role`] — a screen's structural position (base, nested pane, overlay)
//!   inside a [`Constraint`] tree.
//! - [`Context`] — the immutable provenance record of one screen: its
//!   session, role, governing constraint and predecessor link.
//! - [`Key`] — an argument value paired with a [`Context`]; the unit of
//!   history.
//! - [`ConstraintResolver`] / [`Registry`] — the wiring boundary supplied by
//!   the hosting application.
//!
//! Everything here is synchronous, allocation-light and free of IO. Failures
//! split into two classes: misconfiguration surfaces as [`ConfigError`]
//! (fail-fast, wiring mistakes), while state-transition rejections in the
//! stack crates are silent status enums, never errors.

pub mod caller;
pub mod constraint;
pub mod context;
pub mod error;
mod hash;
pub mod key;
pub mod metadata;
pub mod registry;
pub mod resolver;
pub mod role;
pub mod session;

pub use caller::Caller;
pub use constraint::{Constraint, ConstraintBuilder, ConstraintNode, PaneBuilder};
pub use context::{Connect, Context, NavAction};
pub use error::ConfigError;
pub use key::{Key, KeyId, NavArg};
pub use metadata::{Metadata, MetadataBuilder};
pub use registry::{Registry, RegistryBuilder};
pub use resolver::{ConstraintResolver, ConstraintResolverBuilder};
pub use role::{
    Role, seek_order_cmp, sort_by_seek_order, sort_by_visible_order, visible_order_cmp,
};
pub use session::Session;
