// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Privacy controls for the Autoroute gateway.
//!
//! - [`pii`]: masking of personal data in outbound prompts

pub mod pii;

pub use pii::{mask_payload, mask_pii};
