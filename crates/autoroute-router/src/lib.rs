// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request classification and model routing for the Autoroute gateway.
//!
//! This crate provides:
//! - Signal extractors: [`detect_script`], [`contains_code`],
//!   [`contains_commerce_keywords`] and [`ComplexityEstimator`]
//! - [`ModelCatalog`]: the read-only capability table
//! - [`policy`]: the ordered rule cascade mapping signals to a model role
//! - [`ModelRouter`]: sentinel detection, selection and the byte-level
//!   [`ModelRouter::intercept`] hook used by the gateway
//!
//! Everything here is synchronous and free of I/O.

pub mod catalog;
pub mod code;
pub mod commerce;
pub mod complexity;
pub mod intercept;
pub mod language;
pub mod policy;
pub mod preferences;
pub mod router;
pub mod signals;

pub use catalog::{ModelCapability, ModelCatalog};
pub use code::contains_code;
pub use commerce::contains_commerce_keywords;
pub use complexity::ComplexityEstimator;
pub use intercept::Forwarded;
pub use language::{Script, detect_script};
pub use policy::{ModelRole, RoutingTargets};
pub use preferences::{PREFERENCES_FIELD, Preferences};
pub use router::{ModelRouter, RoutingDecision, RoutingEvent};
pub use signals::{Signals, analysis_text};
