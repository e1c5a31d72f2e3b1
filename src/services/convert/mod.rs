//! SC container → XFL documents.
//!
//! Exported movie clips are routed into documents keyed by frame rate (plus
//! split suffixes), converted depth first, then written and packed as `.fla`.

pub mod atlas;
pub mod context;
pub mod movieclip;
pub mod nine_slice;
pub mod placement;
pub mod progress;
pub mod shape;
pub mod text_field;

pub use context::ConversionContext;
pub use progress::{LogProgress, Progress};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::services::archive::pack_project;
use crate::services::config::DocumentSettings;
use crate::services::rules::{ContainerRules, RuleSet};
use crate::services::xfl::write_document;
use crate::types::errors::{ConvertError, ConvertResult};
use crate::types::source::{Resource, SupercellSwf};
use crate::types::xfl::{Document, FolderItem, Frame, Layer, Timeline};
use movieclip::{convert_movieclip, ClipTarget};

/// A fresh document with the configured folders and an empty main timeline.
pub fn prepare_document(path: PathBuf, settings: &DocumentSettings, frame_rate: u8) -> Document {
    let mut doc = Document::new(path, settings.clone(), frame_rate);
    doc.folders = settings
        .folders
        .iter()
        .map(|name| FolderItem { name: name.clone() })
        .collect();

    let mut layer = Layer::new("Layer_1");
    layer.frames.push(Frame::new(0, Vec::new()));
    doc.timelines.push(Timeline {
        name: settings.main_timeline.clone(),
        layers: vec![layer],
    });
    doc
}

/// `{project_dir}_{key}`
pub fn document_path(project_dir: &Path, key: &str) -> PathBuf {
    let mut path = project_dir.as_os_str().to_os_string();
    path.push(format!("_{key}"));
    PathBuf::from(path)
}

/// Convert every exported movie clip of `swf` into in-memory documents.
/// Exports that are not movie clips are skipped.
pub fn convert_container(
    swf: &SupercellSwf,
    rules: &ContainerRules,
    settings: &DocumentSettings,
    progress: &mut dyn Progress,
) -> ConvertResult<BTreeMap<String, Document>> {
    let mut ctx = ConversionContext::new();
    let mut documents: BTreeMap<String, Document> = BTreeMap::new();
    let project_dir = swf.project_dir();
    let total = swf.exports.len();

    for (current, (&id, exports)) in swf.exports.iter().enumerate() {
        progress.tick("Converting resources", current, total);

        let resource = swf
            .resources
            .get(&id)
            .ok_or(ConvertError::MissingResource(id))?;
        let Resource::MovieClip(clip) = resource else {
            log::debug!("Export {} ({:?}) is not a movie clip, skipping", id, exports);
            continue;
        };
        if rules.skips_all(exports) {
            log::info!("Skipping movie clip {} ({:?})", id, exports);
            continue;
        }

        let key = rules.document_key(clip.frame_rate, exports);
        let doc = documents.entry(key.clone()).or_insert_with(|| {
            log::info!("New document {} at {} fps", key, clip.frame_rate);
            prepare_document(document_path(&project_dir, &key), settings, clip.frame_rate)
        });

        let kept = rules.kept_exports(exports);
        convert_movieclip(&mut ctx, doc, swf, id, clip, ClipTarget::Exports(&kept))?;
    }

    log::info!(
        "Converted {} into {} documents ({} unique bitmaps)",
        swf.file_name(),
        documents.len(),
        ctx.atlas.len()
    );
    Ok(documents)
}

/// Write each document as a project directory and pack it into `.fla`.
pub fn save_documents(
    documents: &BTreeMap<String, Document>,
    progress: &mut dyn Progress,
) -> ConvertResult<Vec<PathBuf>> {
    let mut archives = Vec::with_capacity(documents.len());
    for doc in documents.values() {
        progress.info(&format!("Saving {}.fla", doc.path.display()));
        write_document(doc)?;
        archives.push(pack_project(&doc.path)?);
    }
    Ok(archives)
}

/// Convert `swf` and persist one `.fla` per document. Nothing is written
/// unless the whole conversion succeeds.
pub fn sc_to_fla(
    swf: &SupercellSwf,
    rules: &RuleSet,
    settings: &DocumentSettings,
    progress: &mut dyn Progress,
) -> ConvertResult<Vec<PathBuf>> {
    let container_rules = rules.for_container(&swf.file_name());
    let documents = convert_container(swf, &container_rules, settings, progress)?;
    save_documents(&documents, progress)
}

#[cfg(test)]
#[path = "tests/convert_tests.rs"]
mod tests;
