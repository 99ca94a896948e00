// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for Kyanite tools: the prefs document and
//! the sections stored in it.

pub mod config;
pub mod prefs;
