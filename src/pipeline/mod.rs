//! Pipeline stages for page-by-page translation.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different translation service) without
//! touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ classify ──▶ reconstruct ──▶ segment ──▶ client ──▶ assemble
//! (pages)   (en or ja?)  (paragraphs)   (chunks)    (HTTP)     (document)
//! ```
//!
//! 1. [`input`]       — extraction collaborator seam; yields ordered page text
//! 2. [`classify`]    — ASCII-ratio heuristic routing each page to the
//!    translation path or pass-through
//! 3. [`reconstruct`] — repair PDF line-wrap artefacts into logical paragraphs
//! 4. [`segment`]     — sentences, then size-bounded chunks for the service
//! 5. [`client`]      — the remote call with retry/throttle; the only stage
//!    with network I/O
//! 6. [`assemble`]    — page banners and final document concatenation

pub mod assemble;
pub mod classify;
pub mod client;
pub mod input;
pub mod reconstruct;
pub mod segment;
