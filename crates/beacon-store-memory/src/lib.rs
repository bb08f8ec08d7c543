//! In-memory backend for the Beacon store.
//!
//! Two independently locked registries sit behind [`MemoryStore`]: one for
//! positions and one for alert pins. Nothing is persisted; a restart starts
//! from an empty store.

mod pins;
mod presence;
mod store;

pub use store::MemoryStore;
