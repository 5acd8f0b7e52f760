//! CLI infrastructure for the sapper toolkit
//!
//! This module provides the command-line interface for playing single
//! games and benchmarking the inference agent over many boards.

pub mod commands;
pub mod output;
