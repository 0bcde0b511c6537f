// SPDX-License-Identifier: MPL-2.0
//! Custom widgets that the stock widget set does not cover.

pub mod floating;

pub use floating::floating;
