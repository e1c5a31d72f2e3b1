//! Shape → graphic symbol, one layer per bitmap quad.

use super::context::ConversionContext;
use super::placement::Placement;
use crate::services::images::sprite;
use crate::types::errors::{ConvertError, ConvertResult};
use crate::types::source::{Shape, ShapeBitmap, SupercellSwf, Texture, XyPoint};
use crate::types::xfl::{
    BitmapInstance, BitmapItem, Document, Edge, Element, FillData, FillStyle, Frame, Layer,
    Shape as XflShape, SymbolItem, SymbolType,
};

/// Twips per pixel.
pub const TWIPS_PER_PIXEL: f64 = 20.0;

pub fn shape_symbol_name(id: u16) -> String {
    format!("shapes/shape_{id}")
}

pub fn media_item_name(index: usize) -> String {
    format!("resources/{index}")
}

/// Convert a shape into `shapes/shape_{id}` of `doc`.
///
/// Quads are walked last to first so the last-declared quad lands in layer 0,
/// the front-most layer in XFL.
pub fn convert_shape(
    ctx: &mut ConversionContext,
    doc: &mut Document,
    swf: &SupercellSwf,
    id: u16,
    shape: &Shape,
) -> ConvertResult<()> {
    let mut graphic = SymbolItem::new(shape_symbol_name(id), SymbolType::Graphic);
    graphic.timeline.name = format!("shape_{id}");

    for (bitmap_index, bitmap) in shape.bitmaps.iter().rev().enumerate() {
        let texture = swf
            .textures
            .get(bitmap.texture_index)
            .ok_or(ConvertError::MissingTexture(bitmap.texture_index))?;

        let element = if bitmap.is_solid_color() {
            Element::Shape(solid_color_fill(texture, bitmap))
        } else {
            Element::BitmapInstance(bitmap_instance(ctx, doc, swf, bitmap)?)
        };

        let mut layer = Layer::new(format!("shape_layer_{bitmap_index}"));
        layer.frames.push(Frame::new(0, vec![element]));
        graphic.timeline.layers.push(layer);
    }

    log::debug!(
        "Converted shape {} ({} layers)",
        id,
        graphic.timeline.layers.len()
    );
    doc.symbols.insert(graphic.name.clone(), graphic);
    Ok(())
}

/// Closed polygon through `points` (already in twips), XFL edge syntax.
pub(crate) fn polygon_edges(points: &[(i64, i64)]) -> String {
    let mut edges = String::new();
    for (i, current) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        edges.push_str(&format!(
            "!{} {}|{} {}",
            current.0, current.1, next.0, next.1
        ));
    }
    edges
}

fn to_twips(points: &[XyPoint]) -> Vec<(i64, i64)> {
    points
        .iter()
        .map(|p| {
            (
                (f64::from(p.x) * TWIPS_PER_PIXEL).round() as i64,
                (f64::from(p.y) * TWIPS_PER_PIXEL).round() as i64,
            )
        })
        .collect()
}

/// Single-texel quads are flat colors: sample once and draw a vector fill.
fn solid_color_fill(texture: &Texture, bitmap: &ShapeBitmap) -> XflShape {
    let (u, v) = bitmap
        .uv_coords
        .first()
        .map(|p| (u32::from(p.u), u32::from(p.v)))
        .unwrap_or((0, 0));
    let pixel = sprite::sample_pixel(texture.get_image(), u, v);
    let (color, alpha) = sprite::expand_pixel(&pixel);

    XflShape {
        is_drawing_object: false,
        matrix: None,
        fills: vec![FillStyle {
            index: 1,
            data: FillData::Solid { color, alpha },
        }],
        edges: vec![Edge {
            fill_style1: Some(1),
            edges: polygon_edges(&to_twips(&bitmap.xy_coords)),
            ..Default::default()
        }],
    }
}

fn bitmap_instance(
    ctx: &mut ConversionContext,
    doc: &mut Document,
    swf: &SupercellSwf,
    bitmap: &ShapeBitmap,
) -> ConvertResult<BitmapInstance> {
    let cached = ctx
        .atlas
        .lookup(&bitmap.uv_coords)
        .and_then(|index| ctx.atlas.get(index).map(|entry| (index, entry)));

    let (index, matrix) = match cached {
        Some((index, entry)) => (index, entry.placement.matrix_for(&bitmap.xy_coords)),
        None => {
            let (placement, matrix) = Placement::fit(&bitmap.uv_coords, &bitmap.xy_coords);
            let index = ctx.atlas.register(
                bitmap.uv_coords.clone(),
                bitmap.texture_index,
                placement,
            );
            (index, matrix)
        }
    };

    if !doc.media.contains_key(&index) {
        let item = materialize_media(ctx, swf, index)?;
        doc.media.insert(index, item);
    }

    Ok(BitmapInstance {
        library_item_name: media_item_name(index),
        matrix: Some(matrix),
    })
}

/// Cut the sprite for dedup index `index` out of its texture, upright.
fn materialize_media(
    ctx: &ConversionContext,
    swf: &SupercellSwf,
    index: usize,
) -> ConvertResult<BitmapItem> {
    let entry = ctx
        .atlas
        .get(index)
        .ok_or_else(|| ConvertError::MissingMedia(media_item_name(index)))?;
    let texture = swf
        .textures
        .get(entry.texture_index)
        .ok_or(ConvertError::MissingTexture(entry.texture_index))?;

    let rect = entry.placement.rect;
    let orientation = entry.placement.orientation;
    let crop = sprite::crop_region(
        texture.get_image(),
        rect.x,
        rect.y,
        rect.width,
        rect.height,
    );
    let image = sprite::orient(&crop, orientation.quarter_turns, orientation.mirror);

    log::debug!(
        "New bitmap resources/{} ({}x{}, rotated {}°{})",
        index,
        image.width(),
        image.height(),
        orientation.degrees(),
        if orientation.mirror { ", mirrored" } else { "" }
    );

    Ok(BitmapItem {
        name: media_item_name(index),
        href: format!("{}.png", media_item_name(index)),
        // Smoothing is disabled only for textures sampled Nearest on both axes.
        allow_smoothing: texture.allows_smoothing(),
        quality: 100,
        use_imported_jpeg_data: false,
        image,
        extruded: false,
    })
}

#[cfg(test)]
#[path = "tests/shape_tests.rs"]
mod tests;
