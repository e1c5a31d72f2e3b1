use std::collections::HashMap;

use super::placement::Placement;
use crate::types::source::UvPoint;

/// First occurrence of a UV quad in the conversion run.
#[derive(Debug, Clone)]
pub struct AtlasEntry {
    pub uv_coords: Vec<UvPoint>,
    pub texture_index: usize,
    pub placement: Placement,
}

/// Append-only registry of distinct UV quads. The position of a quad is its
/// dedup index, which names the bitmap asset (`resources/{index}`).
#[derive(Debug, Default)]
pub struct AtlasCache {
    entries: Vec<AtlasEntry>,
    by_uv: HashMap<Vec<UvPoint>, usize>,
}

impl AtlasCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, uv_coords: &[UvPoint]) -> Option<usize> {
        self.by_uv.get(uv_coords).copied()
    }

    /// Register a quad that `lookup` did not find; returns its dedup index.
    pub fn register(
        &mut self,
        uv_coords: Vec<UvPoint>,
        texture_index: usize,
        placement: Placement,
    ) -> usize {
        if let Some(existing) = self.lookup(&uv_coords) {
            return existing;
        }
        let index = self.entries.len();
        self.by_uv.insert(uv_coords.clone(), index);
        self.entries.push(AtlasEntry {
            uv_coords,
            texture_index,
            placement,
        });
        index
    }

    pub fn get(&self, index: usize) -> Option<&AtlasEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
