// src/checker/mod.rs
// =============================================================================
// This module contains the link checking logic.
//
// Submodules:
// - validate: resolves every relative link of a DocumentSet against the
//   filesystem and collects the ones that point nowhere
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers can write `checker::validate()` instead of
// `checker::validate::validate()`.
// =============================================================================

mod validate;

pub use validate::validate;
