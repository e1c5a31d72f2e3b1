use super::*;
use crate::services::archive::extract_project;
use crate::test_utils::{
    bind, frame, init_logger, movieclip, plain, test_swf, textured_quad, uv_rect, xy_rect,
};
use crate::types::source::{MovieClip, Shape};
use std::fs;
use tempfile::TempDir;

#[derive(Default)]
struct RecordingProgress {
    ticks: Vec<(usize, usize)>,
    lines: Vec<String>,
}

impl Progress for RecordingProgress {
    fn tick(&mut self, _label: &str, current: usize, total: usize) {
        self.ticks.push((current, total));
    }

    fn info(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

fn clip(id: u16, frame_rate: u8, shape: u16) -> MovieClip {
    let mut clip = movieclip(id, vec![bind(shape, None)], vec![frame(&[plain(0)])]);
    clip.frame_rate = frame_rate;
    clip
}

/// Two 30 fps exports sharing one sprite, a 60 fps split export, a skipped
/// debug export and an exported shape.
fn container(dir: &Path) -> SupercellSwf {
    let mut swf = test_swf(dir.join("ui.sc"));
    for id in [1, 2] {
        swf.resources.insert(
            id,
            Resource::Shape(Shape {
                id,
                bitmaps: vec![textured_quad(uv_rect(0, 0, 8, 4), xy_rect(0.0, 0.0, 8.0, 4.0))],
            }),
        );
    }
    swf.resources.insert(100, Resource::MovieClip(clip(100, 30, 1)));
    swf.resources.insert(101, Resource::MovieClip(clip(101, 30, 2)));
    swf.resources.insert(102, Resource::MovieClip(clip(102, 60, 1)));
    swf.resources.insert(103, Resource::MovieClip(clip(103, 30, 1)));

    swf.exports.insert(1, vec!["raw_shape".into()]);
    swf.exports.insert(100, vec!["title".into(), "debug_title".into()]);
    swf.exports.insert(101, vec!["button".into()]);
    swf.exports.insert(102, vec!["shop_offer".into()]);
    swf.exports.insert(103, vec!["debug_grid".into()]);
    swf
}

fn rules() -> RuleSet {
    RuleSet::from_json(r#"{"skip": ["debug_"], "split": ["shop"]}"#).unwrap()
}

#[test]
fn test_prepare_document_applies_settings() {
    let settings = DocumentSettings::default();
    let doc = prepare_document(PathBuf::from("out/ui_30"), &settings, 30);

    assert_eq!(doc.name(), "ui_30");
    assert_eq!(doc.frame_rate, 30);
    let folders: Vec<&str> = doc.folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(folders, vec!["shapes", "movieclips", "exports", "resources"]);
    assert_eq!(doc.timelines.len(), 1);
    assert_eq!(doc.timelines[0].name, "Scene 1");
}

#[test]
fn test_document_path_appends_key() {
    assert_eq!(
        document_path(Path::new("/data/ui"), "60_shop"),
        PathBuf::from("/data/ui_60_shop")
    );
}

#[test]
fn test_exports_are_routed_by_frame_rate_and_split() {
    init_logger();
    let temp = TempDir::new().unwrap();
    let swf = container(temp.path());
    let mut progress = RecordingProgress::default();

    let documents = convert_container(
        &swf,
        &rules().for_container("ui.sc"),
        &DocumentSettings::default(),
        &mut progress,
    )
    .unwrap();

    assert_eq!(
        documents.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["30", "60_shop"]
    );
    assert_eq!(progress.ticks.len(), 5);
    assert_eq!(progress.ticks[4], (4, 5));

    let main = &documents["30"];
    assert_eq!(main.path, temp.path().join("ui_30"));
    assert!(main.symbols.contains_key("exports/title"));
    assert!(!main.symbols.contains_key("exports/debug_title"));
    assert!(main.symbols.contains_key("exports/button"));
    assert!(!main.symbols.contains_key("exports/debug_grid"));
    // Both clips reference the same UV quad.
    assert_eq!(main.media.len(), 1);

    let shop = &documents["60_shop"];
    assert_eq!(shop.frame_rate, 60);
    assert!(shop.symbols.contains_key("exports/shop_offer"));
    assert_eq!(shop.media.len(), 1);
}

#[test]
fn test_sc_to_fla_packs_one_archive_per_document() {
    let temp = TempDir::new().unwrap();
    let swf = container(temp.path());
    let mut progress = RecordingProgress::default();

    let archives = sc_to_fla(&swf, &rules(), &DocumentSettings::default(), &mut progress).unwrap();

    assert_eq!(
        archives,
        vec![
            temp.path().join("ui_30.fla"),
            temp.path().join("ui_60_shop.fla")
        ]
    );
    assert_eq!(progress.lines.len(), 2);
    for archive in &archives {
        assert!(archive.is_file());
        assert!(!archive.with_extension("").exists());
    }

    let extracted = extract_project(&archives[0]).unwrap();
    let root = extracted.dest_path;
    assert!(root.join("DOMDocument.xml").is_file());
    assert!(root.join("ui_30.xfl").is_file());
    assert!(root.join("LIBRARY/exports/title.xml").is_file());
    assert!(root.join("LIBRARY/shapes/shape_1.xml").is_file());
    assert!(root.join("LIBRARY/resources/0.png").is_file());
    let dom = fs::read_to_string(root.join("DOMDocument.xml")).unwrap();
    assert!(dom.contains("frameRate=\"30\""));
    assert!(dom.contains("<Include href=\"exports/title.xml\""));
}

#[test]
fn test_failed_conversion_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let mut swf = container(temp.path());
    swf.resources.insert(9, Resource::Unsupported { tag: 42 });
    swf.resources.insert(
        104,
        Resource::MovieClip(movieclip(104, vec![bind(9, None)], vec![frame(&[plain(0)])])),
    );
    swf.exports.insert(104, vec!["broken".into()]);

    let err = sc_to_fla(
        &swf,
        &rules(),
        &DocumentSettings::default(),
        &mut LogProgress,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ConvertError::UnsupportedResource { id: 9, tag: 42 }
    ));
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_export_resource_is_reported() {
    let temp = TempDir::new().unwrap();
    let mut swf = container(temp.path());
    swf.exports.insert(500, vec!["ghost".into()]);

    let err = convert_container(
        &swf,
        &ContainerRules::default(),
        &DocumentSettings::default(),
        &mut LogProgress,
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::MissingResource(500)));
}
