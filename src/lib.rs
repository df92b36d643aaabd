//! Voice-driven visual question answering: transcribe a spoken question,
//! answer it against an uploaded image, optionally speak the answer back.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
