//! Developer tooling: read-only inspection of the chunked tile map's cache
//! state.
//!
//! # Invariants
//! - Tools never mutate the map; summaries derive from accessor queries only.

mod inspector;

pub use inspector::{ChunkInfo, MapInspector, MapSummary};

pub fn crate_info() -> &'static str {
    "tilespace-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
