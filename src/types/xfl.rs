//! XFL document graph: plain data holders written out by `services::xfl`.

use image::DynamicImage;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::services::config::DocumentSettings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Color transform in XFL terms (`<Color>`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red_multiplier: f64,
    pub green_multiplier: f64,
    pub blue_multiplier: f64,
    pub alpha_multiplier: f64,
    pub red_offset: i32,
    pub green_offset: i32,
    pub blue_offset: i32,
    pub alpha_offset: i32,
}

impl Default for Color {
    fn default() -> Self {
        Self {
            red_multiplier: 1.0,
            green_multiplier: 1.0,
            blue_multiplier: 1.0,
            alpha_multiplier: 1.0,
            red_offset: 0,
            green_offset: 0,
            blue_offset: 0,
            alpha_offset: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FillData {
    Solid { color: u32, alpha: f64 },
    Bitmap {
        bitmap_path: String,
        matrix: Matrix,
        clipped: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillStyle {
    pub index: u32,
    pub data: FillData,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Edge {
    pub fill_style0: Option<u32>,
    pub fill_style1: Option<u32>,
    /// XFL edge path, coordinates in twips.
    pub edges: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    pub is_drawing_object: bool,
    pub matrix: Option<Matrix>,
    pub fills: Vec<FillStyle>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub matrix: Option<Matrix>,
    pub members: Vec<Shape>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BitmapInstance {
    pub library_item_name: String,
    pub matrix: Option<Matrix>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolType {
    Graphic,
    #[default]
    MovieClip,
}

impl SymbolType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Graphic => "graphic",
            Self::MovieClip => "movie clip",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Normal,
    Layer,
    Multiply,
    Screen,
    Lighten,
    Darken,
    Difference,
    Add,
    Subtract,
    Invert,
    Alpha,
    Erase,
    Overlay,
    HardLight,
}

impl BlendMode {
    /// Map the SWF-style blend code carried by SC binds.
    pub fn from_code(code: u8) -> Self {
        match code {
            2 => Self::Layer,
            3 => Self::Multiply,
            4 => Self::Screen,
            5 => Self::Lighten,
            6 => Self::Darken,
            7 => Self::Difference,
            8 => Self::Add,
            9 => Self::Subtract,
            10 => Self::Invert,
            11 => Self::Alpha,
            12 => Self::Erase,
            13 => Self::Overlay,
            14 => Self::HardLight,
            _ => Self::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Layer => "layer",
            Self::Multiply => "multiply",
            Self::Screen => "screen",
            Self::Lighten => "lighten",
            Self::Darken => "darken",
            Self::Difference => "difference",
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Invert => "invert",
            Self::Alpha => "alpha",
            Self::Erase => "erase",
            Self::Overlay => "overlay",
            Self::HardLight => "hardlight",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymbolInstance {
    pub name: Option<String>,
    pub library_item_name: String,
    pub symbol_type: SymbolType,
    pub blend_mode: BlendMode,
    pub matrix: Option<Matrix>,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlowFilter {
    pub blur_x: f64,
    pub blur_y: f64,
    pub color: u32,
    pub strength: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropShadowFilter {
    pub angle: f64,
    pub blur_x: f64,
    pub blur_y: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Glow(GlowFilter),
    DropShadow(DropShadowFilter),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextAttrs {
    pub alignment: Option<String>,
    pub face: String,
    pub size: f64,
    pub bitmap_size: f64,
    pub fill_color: u32,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextRun {
    pub characters: String,
    pub text_attrs: Vec<TextAttrs>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DynamicText {
    pub name: Option<String>,
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
    pub line_type: Option<String>,
    pub matrix: Option<Matrix>,
    pub color: Option<Color>,
    pub text_runs: Vec<TextRun>,
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Shape(Shape),
    Group(Group),
    BitmapInstance(BitmapInstance),
    SymbolInstance(SymbolInstance),
    DynamicText(DynamicText),
}

/// Per-frame values layered over a bind's template instance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InstanceOverride {
    pub matrix: Option<Matrix>,
    pub color: Option<Color>,
}

impl Element {
    pub fn matrix(&self) -> Option<Matrix> {
        match self {
            Self::Shape(s) => s.matrix,
            Self::Group(g) => g.matrix,
            Self::BitmapInstance(b) => b.matrix,
            Self::SymbolInstance(s) => s.matrix,
            Self::DynamicText(t) => t.matrix,
        }
    }

    /// Clone the template and apply the override. Elements without a color
    /// slot (shapes, groups, bitmaps) ignore the color part.
    pub fn instantiate(&self, over: &InstanceOverride) -> Element {
        let mut element = self.clone();
        if let Some(matrix) = over.matrix {
            match &mut element {
                Self::Shape(s) => s.matrix = Some(matrix),
                Self::Group(g) => g.matrix = Some(matrix),
                Self::BitmapInstance(b) => b.matrix = Some(matrix),
                Self::SymbolInstance(s) => s.matrix = Some(matrix),
                Self::DynamicText(t) => t.matrix = Some(matrix),
            }
        }
        if let Some(color) = over.color {
            match &mut element {
                Self::SymbolInstance(s) => s.color = Some(color),
                Self::DynamicText(t) => t.color = Some(color),
                _ => {}
            }
        }
        element
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: usize,
    pub duration: usize,
    pub elements: Vec<Element>,
}

impl Frame {
    pub fn new(index: usize, elements: Vec<Element>) -> Self {
        Self {
            index,
            duration: 1,
            elements,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerType {
    #[default]
    Normal,
    Mask,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layer {
    pub name: String,
    pub layer_type: LayerType,
    pub locked: bool,
    pub parent_layer_index: Option<usize>,
    pub frames: Vec<Frame>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_mask(&self) -> bool {
        self.layer_type == LayerType::Mask
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timeline {
    pub name: String,
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleGrid {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolItem {
    pub name: String,
    pub symbol_type: SymbolType,
    pub timeline: Timeline,
    pub scale_grid: Option<ScaleGrid>,
}

impl SymbolItem {
    pub fn new(name: impl Into<String>, symbol_type: SymbolType) -> Self {
        Self {
            name: name.into(),
            symbol_type,
            timeline: Timeline::default(),
            scale_grid: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BitmapItem {
    pub name: String,
    pub href: String,
    pub allow_smoothing: bool,
    pub quality: u8,
    pub use_imported_jpeg_data: bool,
    pub image: DynamicImage,
    /// Border pixels were duplicated for tiled nine-slice fills.
    pub extruded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderItem {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Document {
    /// Project directory; the packed archive is this path plus `.fla`.
    pub path: PathBuf,
    pub settings: DocumentSettings,
    pub frame_rate: u8,
    pub folders: Vec<FolderItem>,
    pub media: BTreeMap<usize, BitmapItem>,
    pub symbols: BTreeMap<String, SymbolItem>,
    pub timelines: Vec<Timeline>,
}

impl Document {
    pub fn new(path: PathBuf, settings: DocumentSettings, frame_rate: u8) -> Self {
        Self {
            path,
            settings,
            frame_rate,
            folders: Vec::new(),
            media: BTreeMap::new(),
            symbols: BTreeMap::new(),
            timelines: Vec::new(),
        }
    }

    /// Project name: the last path component.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string())
    }
}
