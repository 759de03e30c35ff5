//! Persona system: the bundled persona registry and workflow pattern table.
//!
//! Both tables are static and immutable; every operation reads them and
//! nothing writes them after startup.

pub mod registry;
pub mod types;

pub use registry::PersonaRegistry;
pub use types::{Persona, PersonaId};
