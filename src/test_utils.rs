// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.

pub use approx::assert_abs_diff_eq;
