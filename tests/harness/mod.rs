// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test harness for submission abuse simulation.
//!
//! Drives bursts of form submissions through the guard with a manual clock
//! and shared in-memory storage, and tallies what happened to each one.

pub mod generators;
pub mod metrics;
pub mod scenarios;
