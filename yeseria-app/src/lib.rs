//! Terminal front-end for the mold production log.
//!
//! Wires the pure core (validation, indicators, reporting) to the
//! reference-data loader and a registered storage backend. The binary in
//! `main.rs` is a thin clap layer over [`pipeline`].

pub mod pipeline;
pub mod render;
pub mod slots;
pub mod state;

pub use pipeline::{AppError, build_registry};
pub use slots::{SlotLoadError, load_slots};
pub use state::FormState;
