// SPDX-License-Identifier: MPL-2.0
//! Centralized styles for the thumbnail widget.

pub mod button;
pub mod container;
