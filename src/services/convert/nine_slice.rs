use std::collections::BTreeMap;

use super::shape::{polygon_edges, shape_symbol_name, TWIPS_PER_PIXEL};
use crate::services::images::sprite;
use crate::types::errors::{ConvertError, ConvertResult};
use crate::types::xfl::{
    BitmapInstance, BitmapItem, Document, Edge, Element, FillData, FillStyle, Group, Matrix, Shape,
};

/// Bitmap fill matrix for an extruded sprite: 1:1 scale, shifted back by the
/// one-pixel border.
pub const EXTRUDED_FILL_MATRIX: Matrix = Matrix::new(20.0, 0.0, 0.0, 20.0, -1.0, -1.0);

/// Replace every bitmap instance of `shapes/shape_{shape_id}` with a
/// drawing object filled by a tiling bitmap fill, so nine-slice scaling never
/// shows seams. Returns the patched shapes as one group, used as the bind's
/// instance by the movie clip that asked for the patch.
pub fn patch_shape_nine_slice(doc: &mut Document, shape_id: u16) -> ConvertResult<Group> {
    let Document { symbols, media, .. } = doc;
    let symbol = symbols
        .get_mut(&shape_symbol_name(shape_id))
        .ok_or(ConvertError::MissingResource(shape_id))?;

    let mut group = Group::default();
    for layer in &mut symbol.timeline.layers {
        for frame in &mut layer.frames {
            for element in &mut frame.elements {
                let Element::BitmapInstance(instance) = element else {
                    continue;
                };
                let slice = slice_shape(media, instance)?;
                group.members.push(slice.clone());
                *element = Element::Shape(slice);
            }
        }
    }

    log::debug!(
        "Patched shape {} for nine-slice scaling ({} slices)",
        shape_id,
        group.members.len()
    );
    Ok(group)
}

fn slice_shape(
    media: &mut BTreeMap<usize, BitmapItem>,
    instance: &BitmapInstance,
) -> ConvertResult<Shape> {
    let index = instance
        .library_item_name
        .strip_prefix("resources/")
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| ConvertError::MissingMedia(instance.library_item_name.clone()))?;
    let item = media
        .get_mut(&index)
        .ok_or_else(|| ConvertError::MissingMedia(instance.library_item_name.clone()))?;

    let (width, height) = original_size(item);
    let rect: Vec<(i64, i64)> = [(0, 0), (width, 0), (width, height), (0, height)]
        .iter()
        .map(|&(x, y)| {
            (
                (f64::from(x) * TWIPS_PER_PIXEL).round() as i64,
                (f64::from(y) * TWIPS_PER_PIXEL).round() as i64,
            )
        })
        .collect();

    Ok(Shape {
        is_drawing_object: true,
        matrix: instance.matrix,
        fills: vec![FillStyle {
            index: 1,
            data: FillData::Bitmap {
                bitmap_path: instance.library_item_name.clone(),
                matrix: EXTRUDED_FILL_MATRIX,
                clipped: false,
            },
        }],
        edges: vec![Edge {
            fill_style1: Some(1),
            edges: polygon_edges(&rect),
            ..Default::default()
        }],
    })
}

/// Extrude the media image once and return its size before extrusion.
fn original_size(item: &mut BitmapItem) -> (u32, u32) {
    if item.extruded {
        return (
            item.image.width().saturating_sub(2),
            item.image.height().saturating_sub(2),
        );
    }
    let size = (item.image.width(), item.image.height());
    item.image = sprite::extrude(&item.image);
    item.extruded = true;
    size
}

#[cfg(test)]
#[path = "tests/nine_slice_tests.rs"]
mod tests;
