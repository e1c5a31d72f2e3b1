use image::{DynamicImage, Rgba, RgbaImage};
use sc2fla_lib::types::source::{
    Bind, FrameElement, MatrixBank, ModifierKind, MovieClip, MovieClipFrame, MovieClipModifier,
    Resource, Shape, ShapeBitmap, SupercellSwf, Texture, UvPoint, XyPoint, NO_OVERRIDE,
};
use std::path::Path;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

fn quad(u: u16, v: u16, size: u16) -> ShapeBitmap {
    let s = f32::from(size);
    ShapeBitmap {
        texture_index: 0,
        uv_coords: vec![
            UvPoint { u, v },
            UvPoint { u: u + size, v },
            UvPoint {
                u: u + size,
                v: v + size,
            },
            UvPoint { u, v: v + size },
        ],
        xy_coords: vec![
            XyPoint { x: 0.0, y: 0.0 },
            XyPoint { x: s, y: 0.0 },
            XyPoint { x: s, y: s },
            XyPoint { x: 0.0, y: s },
        ],
    }
}

fn element(bind: u16) -> FrameElement {
    FrameElement {
        bind,
        matrix: NO_OVERRIDE,
        color: NO_OVERRIDE,
    }
}

fn bind(id: u16, name: Option<&str>) -> Bind {
    Bind {
        id,
        name: name.map(str::to_string),
        blend: 0,
    }
}

/// `menu.sc` in `dir`: a masked 30 fps `menu` export built from two sprites
/// and a nested spinner clip, plus a 60 fps `event_banner` export.
pub fn menu_container(dir: &Path) -> SupercellSwf {
    let mut swf = SupercellSwf {
        path: dir.join("menu.sc"),
        textures: vec![Texture::new(DynamicImage::ImageRgba8(RgbaImage::from_fn(
            32,
            32,
            |x, y| Rgba([(x * 8) as u8, (y * 8) as u8, 0, 255]),
        )))],
        matrix_banks: vec![MatrixBank::default()],
        ..Default::default()
    };

    swf.resources.insert(
        1,
        Resource::Shape(Shape {
            id: 1,
            bitmaps: vec![quad(0, 0, 8)],
        }),
    );
    swf.resources.insert(
        2,
        Resource::Shape(Shape {
            id: 2,
            bitmaps: vec![quad(8, 8, 8)],
        }),
    );
    for (id, modifier) in [
        (3, ModifierKind::Mask),
        (4, ModifierKind::Masked),
        (5, ModifierKind::Unmasked),
    ] {
        swf.resources
            .insert(id, Resource::Modifier(MovieClipModifier { id, modifier }));
    }

    let spinner = MovieClip {
        id: 10,
        frame_rate: 30,
        binds: vec![bind(2, None)],
        frames: vec![MovieClipFrame {
            elements: vec![element(0)],
        }],
        matrix_bank: 0,
        nine_slice: None,
    };
    swf.resources.insert(10, Resource::MovieClip(spinner));

    let menu = MovieClip {
        id: 20,
        frame_rate: 30,
        binds: vec![
            bind(3, None),
            bind(1, Some("frame_mask")),
            bind(4, None),
            bind(10, Some("spinner")),
            bind(5, None),
        ],
        frames: vec![
            MovieClipFrame {
                elements: (0..5).map(element).collect(),
            },
            MovieClipFrame {
                elements: (0..5).map(element).collect(),
            },
        ],
        matrix_bank: 0,
        nine_slice: None,
    };
    swf.resources.insert(20, Resource::MovieClip(menu));

    let banner = MovieClip {
        id: 21,
        frame_rate: 60,
        binds: vec![bind(1, None)],
        frames: vec![MovieClipFrame {
            elements: vec![element(0)],
        }],
        matrix_bank: 0,
        nine_slice: None,
    };
    swf.resources.insert(21, Resource::MovieClip(banner));

    swf.exports.insert(1, vec!["menu_sprite".into()]);
    swf.exports.insert(20, vec!["menu".into(), "tmp_menu".into()]);
    swf.exports.insert(21, vec!["event_banner".into()]);
    swf
}
