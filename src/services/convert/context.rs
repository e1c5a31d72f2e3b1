use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::atlas::AtlasCache;
use crate::types::xfl::Group;

/// Mutable state of one top-level conversion, threaded through every call.
///
/// Nothing here outlives the conversion, so independent conversions (and
/// tests) never share caches.
#[derive(Debug, Default)]
pub struct ConversionContext {
    pub atlas: AtlasCache,
    /// Patched nine-slice groups per (document, shape id).
    nine_slices: HashMap<(PathBuf, u16), Group>,
    /// Movie clips currently being built per document; breaks reference cycles.
    in_progress: HashSet<(PathBuf, u16)>,
    /// In-progress clips that a descendant instanced by their library name.
    back_referenced: HashSet<(PathBuf, u16)>,
}

impl ConversionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nine_slice(&self, document: &Path, shape_id: u16) -> Option<&Group> {
        self.nine_slices.get(&(document.to_path_buf(), shape_id))
    }

    pub fn store_nine_slice(&mut self, document: &Path, shape_id: u16, group: Group) {
        self.nine_slices
            .insert((document.to_path_buf(), shape_id), group);
    }

    pub fn is_in_progress(&self, document: &Path, clip_id: u16) -> bool {
        self.in_progress
            .contains(&(document.to_path_buf(), clip_id))
    }

    pub(crate) fn begin_clip(&mut self, document: &Path, clip_id: u16) {
        self.in_progress.insert((document.to_path_buf(), clip_id));
    }

    pub(crate) fn end_clip(&mut self, document: &Path, clip_id: u16) {
        self.in_progress.remove(&(document.to_path_buf(), clip_id));
    }

    pub(crate) fn note_back_reference(&mut self, document: &Path, clip_id: u16) {
        self.back_referenced
            .insert((document.to_path_buf(), clip_id));
    }

    pub(crate) fn take_back_reference(&mut self, document: &Path, clip_id: u16) -> bool {
        self.back_referenced
            .remove(&(document.to_path_buf(), clip_id))
    }
}
