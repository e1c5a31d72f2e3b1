//! Decoded Supercell SC container.
//!
//! The binary tag parser lives elsewhere; everything here is the already
//! decoded, read-only view the converter walks.

use image::DynamicImage;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Matrix/color index meaning "keep the template's value".
pub const NO_OVERRIDE: u16 = 0xFFFF;

#[derive(Debug, Clone, Default)]
pub struct SupercellSwf {
    /// Path of the `.sc` file this container was decoded from.
    pub path: PathBuf,
    /// Resource id → export names, iterated in id order.
    pub exports: BTreeMap<u16, Vec<String>>,
    pub resources: BTreeMap<u16, Resource>,
    pub textures: Vec<Texture>,
    pub matrix_banks: Vec<MatrixBank>,
}

impl SupercellSwf {
    /// File name of the container, used to select per-file rules.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Output project base path: the container path without its extension.
    pub fn project_dir(&self) -> PathBuf {
        self.path.with_extension("")
    }
}

#[derive(Debug, Clone)]
pub enum Resource {
    Shape(Shape),
    MovieClip(MovieClip),
    Modifier(MovieClipModifier),
    TextField(TextField),
    /// A tag the decoder recognized but the converter has no rule for.
    Unsupported { tag: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UvPoint {
    pub u: u16,
    pub v: u16,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XyPoint {
    pub x: f32,
    pub y: f32,
}

/// One textured (or single-texel, solid colored) polygon of a shape.
#[derive(Debug, Clone)]
pub struct ShapeBitmap {
    pub texture_index: usize,
    pub uv_coords: Vec<UvPoint>,
    pub xy_coords: Vec<XyPoint>,
}

impl ShapeBitmap {
    /// Every UV corner samples the same texel.
    pub fn is_solid_color(&self) -> bool {
        match self.uv_coords.first() {
            Some(first) => self.uv_coords.iter().all(|p| p == first),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Shape {
    pub id: u16,
    pub bitmaps: Vec<ShapeBitmap>,
}

#[derive(Debug, Clone, Default)]
pub struct Bind {
    pub id: u16,
    pub name: Option<String>,
    pub blend: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameElement {
    pub bind: u16,
    pub matrix: u16,
    pub color: u16,
}

#[derive(Debug, Clone, Default)]
pub struct MovieClipFrame {
    pub elements: Vec<FrameElement>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NineSlice {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Default)]
pub struct MovieClip {
    pub id: u16,
    pub frame_rate: u8,
    pub binds: Vec<Bind>,
    pub frames: Vec<MovieClipFrame>,
    pub matrix_bank: usize,
    pub nine_slice: Option<NineSlice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKind {
    Mask,
    Masked,
    Unmasked,
}

#[derive(Debug, Clone, Copy)]
pub struct MovieClipModifier {
    pub id: u16,
    pub modifier: ModifierKind,
}

#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub id: u16,
    pub text: Option<String>,
    pub font_name: String,
    pub font_size: u8,
    /// Packed RGBA.
    pub font_color: u32,
    pub font_align: u8,
    pub left: i16,
    pub top: i16,
    pub right: i16,
    pub bottom: i16,
    pub bold: bool,
    pub italic: bool,
    pub multiline: bool,
    /// Packed RGBA; zero when the field has no outline.
    pub outline_color: u32,
    /// Outline strength, as a fraction of 0xFFFF.
    pub c1: u16,
    /// Shadow angle, as a fraction of 0xFFFF of a full turn.
    pub c2: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFilter {
    #[default]
    Linear,
    Nearest,
}

#[derive(Debug, Clone)]
pub struct Texture {
    pub image: DynamicImage,
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
}

impl Texture {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image,
            min_filter: TextureFilter::Linear,
            mag_filter: TextureFilter::Linear,
        }
    }

    pub fn get_image(&self) -> &DynamicImage {
        &self.image
    }

    /// Nearest filtering on both axes means pixel art: no smoothing.
    pub fn allows_smoothing(&self) -> bool {
        !(self.min_filter == TextureFilter::Nearest && self.mag_filter == TextureFilter::Nearest)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2x3 {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTransform {
    pub r_add: i16,
    pub g_add: i16,
    pub b_add: i16,
    pub r_mul: f32,
    pub g_mul: f32,
    pub b_mul: f32,
    pub a_mul: f32,
}

#[derive(Debug, Clone, Default)]
pub struct MatrixBank {
    pub matrices: Vec<Matrix2x3>,
    pub color_transforms: Vec<ColorTransform>,
}
