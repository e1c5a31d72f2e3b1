use image::{DynamicImage, Rgba, RgbaImage};
use std::path::PathBuf;
use std::sync::Once;

use crate::services::config::DocumentSettings;
use crate::services::convert::prepare_document;
use crate::types::source::{
    Bind, ColorTransform, FrameElement, Matrix2x3, MatrixBank, MovieClip, MovieClipFrame,
    ShapeBitmap, SupercellSwf, Texture, UvPoint, XyPoint, NO_OVERRIDE,
};
use crate::types::xfl::Document;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        // Initialize logger only once
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// 64x64 texture whose pixel (x, y) is `[x, y, 100, 255]`.
pub fn gradient_texture() -> Texture {
    Texture::new(DynamicImage::ImageRgba8(RgbaImage::from_fn(64, 64, |x, y| {
        Rgba([x as u8, y as u8, 100, 255])
    })))
}

pub fn uv_rect(x: u16, y: u16, width: u16, height: u16) -> Vec<UvPoint> {
    vec![
        UvPoint { u: x, v: y },
        UvPoint { u: x + width, v: y },
        UvPoint {
            u: x + width,
            v: y + height,
        },
        UvPoint { u: x, v: y + height },
    ]
}

pub fn xy_rect(x: f32, y: f32, width: f32, height: f32) -> Vec<XyPoint> {
    vec![
        XyPoint { x, y },
        XyPoint { x: x + width, y },
        XyPoint {
            x: x + width,
            y: y + height,
        },
        XyPoint { x, y: y + height },
    ]
}

pub fn textured_quad(uv: Vec<UvPoint>, xy: Vec<XyPoint>) -> ShapeBitmap {
    ShapeBitmap {
        texture_index: 0,
        uv_coords: uv,
        xy_coords: xy,
    }
}

/// Quad whose four UV corners sit on texel (u, v).
pub fn solid_quad(u: u16, v: u16, xy: Vec<XyPoint>) -> ShapeBitmap {
    textured_quad(vec![UvPoint { u, v }; 4], xy)
}

/// Container at `path` with one gradient texture and one matrix bank holding
/// an identity matrix (index 0), a translation by (10, 20) (index 1) and a
/// half-alpha color transform (index 0).
pub fn test_swf(path: impl Into<PathBuf>) -> SupercellSwf {
    SupercellSwf {
        path: path.into(),
        textures: vec![gradient_texture()],
        matrix_banks: vec![MatrixBank {
            matrices: vec![
                Matrix2x3 {
                    a: 1.0,
                    b: 0.0,
                    c: 0.0,
                    d: 1.0,
                    tx: 0.0,
                    ty: 0.0,
                },
                Matrix2x3 {
                    a: 1.0,
                    b: 0.0,
                    c: 0.0,
                    d: 1.0,
                    tx: 10.0,
                    ty: 20.0,
                },
            ],
            color_transforms: vec![ColorTransform {
                r_add: 5,
                g_add: 0,
                b_add: 0,
                r_mul: 1.0,
                g_mul: 1.0,
                b_mul: 1.0,
                a_mul: 0.5,
            }],
        }],
        ..Default::default()
    }
}

pub fn test_document(path: impl Into<PathBuf>) -> Document {
    prepare_document(path.into(), &DocumentSettings::default(), 30)
}

pub fn bind(id: u16, name: Option<&str>) -> Bind {
    Bind {
        id,
        name: name.map(str::to_string),
        blend: 0,
    }
}

/// Frame element without matrix/color overrides.
pub fn plain(bind: u16) -> FrameElement {
    FrameElement {
        bind,
        matrix: NO_OVERRIDE,
        color: NO_OVERRIDE,
    }
}

pub fn frame(elements: &[FrameElement]) -> MovieClipFrame {
    MovieClipFrame {
        elements: elements.to_vec(),
    }
}

pub fn movieclip(id: u16, binds: Vec<Bind>, frames: Vec<MovieClipFrame>) -> MovieClip {
    MovieClip {
        id,
        frame_rate: 30,
        binds,
        frames,
        matrix_bank: 0,
        nine_slice: None,
    }
}
