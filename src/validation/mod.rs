/*!
 * Validation of parsed subtitle documents.
 *
 * This module analyzes a document for timing and presentation issues and
 * annotates each entry with what it finds:
 * - Timing checks (overlap, duration bounds, reading speed): `timing`
 * - Text checks (line length, line count, empty text): `text`
 * - Orchestration, aggregate counts and the auto-repair pass: `service`
 *
 * Validation never fails: the absence of an issue kind simply means no
 * annotation. Structural issues set by the parser are left untouched;
 * content issues are recomputed from scratch on every pass, so the
 * analysis is idempotent.
 */

pub mod service;
pub mod text;
pub mod timing;

// Re-export main types
pub use service::{ValidationConfig, ValidationService, ValidationSummary};
