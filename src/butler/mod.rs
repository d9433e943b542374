// SPDX-License-Identifier: MIT

//! HikeButler application layer

pub mod config;
pub mod memory;
pub mod providers;
pub mod server;
pub mod storage;
pub mod tools;
pub mod workflow;
