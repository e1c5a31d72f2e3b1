use serde::{Deserialize, Serialize};

/// Document-level defaults stamped onto every generated XFL project.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DocumentSettings {
    pub xfl_version: String,
    pub width: u32,
    pub height: u32,
    pub background_color: u32,
    pub current_timeline: u32,
    pub creator_info: String,
    /// Library folders created up front, in order.
    pub folders: Vec<String>,
    /// Name of the (empty) main timeline.
    pub main_timeline: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            xfl_version: "2.971".into(),
            width: 1280,
            height: 720,
            background_color: 0x666666,
            current_timeline: 1,
            creator_info: "File generated by sc2fla".into(),
            folders: vec![
                "shapes".into(),
                "movieclips".into(),
                "exports".into(),
                "resources".into(),
            ],
            main_timeline: "Scene 1".into(),
        }
    }
}
