// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility modules for string processing and sorted-list arithmetic.
//!
//! Script folding and romanization for Japanese forms, accent-insensitive
//! normalization for glosses, and the linear merges every posting list goes
//! through.

pub mod kana;
pub mod normalize;
pub mod sorted;
