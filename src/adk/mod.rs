// SPDX-License-Identifier: MIT

//! Model-facing kit: chat and embedding clients, tool trait, errors

pub mod embedding;
pub mod error;
pub mod model;
pub mod tool;
