//! Movie clip → movie clip symbol.
//!
//! Every non-modifier bind becomes one layer holding a template instance;
//! frames clone the template with the frame's matrix/color overrides. Modifier
//! binds drive the mask state machine and never produce a layer.

use super::context::ConversionContext;
use super::nine_slice::patch_shape_nine_slice;
use super::shape::{convert_shape, shape_symbol_name};
use super::text_field::convert_text_field;
use crate::types::errors::{ConvertError, ConvertResult};
use crate::types::source::{
    FrameElement, MatrixBank, ModifierKind, MovieClip, Resource, SupercellSwf, NO_OVERRIDE,
};
use crate::types::xfl::{
    BlendMode, Color, Document, Element, Frame, Group, InstanceOverride, Layer, LayerType, Matrix,
    ScaleGrid, SymbolInstance, SymbolItem, SymbolType,
};

pub fn movieclip_symbol_name(id: u16) -> String {
    format!("movieclips/movieclip_{id}")
}

pub fn export_symbol_name(export: &str) -> String {
    format!("exports/{export}")
}

/// Where a converted clip is registered in the document library.
#[derive(Debug, Clone, Copy)]
pub enum ClipTarget<'a> {
    /// Nested clip: `movieclips/movieclip_{id}`.
    Library,
    /// Exported clip: one independent copy per export name.
    Exports(&'a [String]),
}

enum BindSlot {
    Modifier(ModifierKind),
    Layer { layer: Layer, template: Element },
}

#[derive(Default)]
struct MaskState {
    mask: bool,
    masked: bool,
    current: Option<usize>,
}

impl MaskState {
    fn apply(&mut self, kind: ModifierKind) {
        match kind {
            ModifierKind::Mask => self.mask = true,
            ModifierKind::Masked => {
                self.mask = false;
                self.masked = true;
            }
            ModifierKind::Unmasked => {
                self.mask = false;
                self.masked = false;
                self.current = None;
            }
        }
    }
}

/// Masked layers grouped under their mask, in first-seen order.
#[derive(Default)]
struct MaskGroups {
    groups: Vec<(usize, Vec<usize>)>,
}

impl MaskGroups {
    fn contains(&self, bind: usize) -> bool {
        self.groups.iter().any(|(_, members)| members.contains(&bind))
    }

    fn assign(&mut self, mask: usize, bind: usize) {
        if self.contains(bind) {
            return;
        }
        match self.groups.iter_mut().find(|(m, _)| *m == mask) {
            Some((_, members)) => members.push(bind),
            None => self.groups.push((mask, vec![bind])),
        }
    }
}

/// Convert `clip` into `doc` and register it according to `target`.
pub fn convert_movieclip(
    ctx: &mut ConversionContext,
    doc: &mut Document,
    swf: &SupercellSwf,
    id: u16,
    clip: &MovieClip,
    target: ClipTarget<'_>,
) -> ConvertResult<()> {
    ctx.begin_clip(&doc.path, id);
    let built = build_symbol(ctx, doc, swf, id, clip);
    ctx.end_clip(&doc.path, id);
    let back_referenced = ctx.take_back_reference(&doc.path, id);
    let symbol = built?;

    match target {
        ClipTarget::Exports(names) => {
            for export in names {
                let mut copy = symbol.clone();
                copy.name = export_symbol_name(export);
                copy.timeline.name = export.clone();
                log::debug!("Registered export {}", copy.name);
                doc.symbols.insert(copy.name.clone(), copy);
            }
            // A descendant instanced this clip by its library name.
            if back_referenced {
                register_library_symbol(doc, id, symbol);
            }
        }
        ClipTarget::Library => register_library_symbol(doc, id, symbol),
    }
    Ok(())
}

fn register_library_symbol(doc: &mut Document, id: u16, mut symbol: SymbolItem) {
    symbol.name = movieclip_symbol_name(id);
    symbol.timeline.name = format!("movieclip_{id}");
    doc.symbols.insert(symbol.name.clone(), symbol);
}

fn build_symbol(
    ctx: &mut ConversionContext,
    doc: &mut Document,
    swf: &SupercellSwf,
    id: u16,
    clip: &MovieClip,
) -> ConvertResult<SymbolItem> {
    let mut slots = Vec::with_capacity(clip.binds.len());
    let mut layer_order = Vec::new();
    for index in 0..clip.binds.len() {
        let slot = bind_slot(ctx, doc, swf, clip, index)?;
        if matches!(slot, BindSlot::Layer { .. }) {
            layer_order.push(index);
        }
        slots.push(slot);
    }

    let mut groups = MaskGroups::default();
    for (frame_index, frame) in clip.frames.iter().enumerate() {
        let present: Vec<usize> = frame.elements.iter().map(|e| usize::from(e.bind)).collect();
        if let Some(&bind) = present.iter().find(|&&b| b >= slots.len()) {
            return Err(ConvertError::InvalidBind { clip: id, bind });
        }
        let drawn: Vec<usize> = present
            .iter()
            .copied()
            .filter(|&b| matches!(slots[b], BindSlot::Layer { .. }))
            .collect();
        reconcile_layer_order(&mut layer_order, &drawn);

        let mut state = MaskState::default();
        for (bind_index, slot) in slots.iter_mut().enumerate() {
            let (layer, template) = match slot {
                BindSlot::Modifier(kind) => {
                    state.apply(*kind);
                    continue;
                }
                BindSlot::Layer { layer, template } => (layer, template),
            };

            let Some(position) = present.iter().position(|&b| b == bind_index) else {
                match layer.frames.last_mut() {
                    Some(last) if last.is_empty() => last.duration += 1,
                    _ => layer.frames.push(Frame::new(frame_index, Vec::new())),
                }
                continue;
            };

            if state.mask {
                layer.layer_type = LayerType::Mask;
                layer.locked = true;
                state.current = Some(bind_index);
            } else if state.masked {
                if let Some(mask) = state.current {
                    groups.assign(mask, bind_index);
                }
            }

            let element = frame.elements[position];
            if frame_index > 0 && clip.frames[frame_index - 1].elements.contains(&element) {
                if let Some(last) = layer.frames.last_mut() {
                    last.duration += 1;
                    continue;
                }
            }

            let instance = template.instantiate(&resolve_override(swf, clip, &element)?);
            layer.frames.push(Frame::new(frame_index, vec![instance]));
        }
    }

    let mut symbol = SymbolItem::new(String::new(), SymbolType::MovieClip);
    symbol.timeline.layers = finalize_layers(slots, &layer_order, &groups);
    symbol.scale_grid = clip.nine_slice.map(|grid| ScaleGrid {
        left: f64::from(grid.x),
        top: f64::from(grid.y),
        right: f64::from(grid.x + grid.width),
        bottom: f64::from(grid.y + grid.height),
    });

    log::debug!(
        "Converted movie clip {} ({} layers, {} frames)",
        id,
        symbol.timeline.layers.len(),
        clip.frames.len()
    );
    Ok(symbol)
}

fn bind_slot(
    ctx: &mut ConversionContext,
    doc: &mut Document,
    swf: &SupercellSwf,
    clip: &MovieClip,
    index: usize,
) -> ConvertResult<BindSlot> {
    let bind = &clip.binds[index];
    let resource = swf
        .resources
        .get(&bind.id)
        .ok_or(ConvertError::MissingResource(bind.id))?;

    let template = match resource {
        Resource::Modifier(modifier) => return Ok(BindSlot::Modifier(modifier.modifier)),
        Resource::Shape(shape) => {
            let name = shape_symbol_name(bind.id);
            if !doc.symbols.contains_key(&name) {
                convert_shape(ctx, doc, swf, bind.id, shape)?;
            }
            if clip.nine_slice.is_some() {
                Element::Group(nine_slice_group(ctx, doc, bind.id)?)
            } else {
                Element::SymbolInstance(SymbolInstance {
                    library_item_name: name,
                    symbol_type: SymbolType::Graphic,
                    ..Default::default()
                })
            }
        }
        Resource::MovieClip(child) => {
            let name = movieclip_symbol_name(bind.id);
            if ctx.is_in_progress(&doc.path, bind.id) {
                log::warn!("Movie clip {} references itself through its children", bind.id);
                ctx.note_back_reference(&doc.path, bind.id);
            } else if !doc.symbols.contains_key(&name) {
                convert_movieclip(ctx, doc, swf, bind.id, child, ClipTarget::Library)?;
            }
            Element::SymbolInstance(SymbolInstance {
                name: bind.name.clone(),
                library_item_name: name,
                symbol_type: SymbolType::MovieClip,
                blend_mode: BlendMode::from_code(bind.blend),
                ..Default::default()
            })
        }
        Resource::TextField(field) => Element::DynamicText(convert_text_field(bind, field)),
        Resource::Unsupported { tag } => {
            return Err(ConvertError::UnsupportedResource {
                id: bind.id,
                tag: *tag,
            })
        }
    };

    let layer_name = match bind.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Layer_{index}"),
    };
    Ok(BindSlot::Layer {
        layer: Layer::new(layer_name),
        template,
    })
}

fn nine_slice_group(
    ctx: &mut ConversionContext,
    doc: &mut Document,
    shape_id: u16,
) -> ConvertResult<Group> {
    if let Some(group) = ctx.nine_slice(&doc.path, shape_id) {
        return Ok(group.clone());
    }
    let group = patch_shape_nine_slice(doc, shape_id)?;
    ctx.store_nine_slice(&doc.path, shape_id, group.clone());
    Ok(group)
}

/// Bring the relative order of `frame_binds` into `order`, one pairwise swap
/// at a time. The insertion index is taken before the removal.
pub(crate) fn reconcile_layer_order(order: &mut Vec<usize>, frame_binds: &[usize]) {
    let frame_position = |bind: usize| frame_binds.iter().position(|&b| b == bind);
    for &element in frame_binds {
        for &comparative in frame_binds {
            if comparative == element {
                continue;
            }
            let (Some(element_pos), Some(comparative_pos)) =
                (frame_position(element), frame_position(comparative))
            else {
                continue;
            };
            let bind_pos = order.iter().position(|&b| b == element);
            let cmp_bind_pos = order.iter().position(|&b| b == comparative);
            let (Some(bind_pos), Some(cmp_bind_pos)) = (bind_pos, cmp_bind_pos) else {
                continue;
            };

            if (element_pos > comparative_pos) != (bind_pos > cmp_bind_pos) {
                let moved = order.remove(cmp_bind_pos);
                order.insert(bind_pos, moved);
            }
        }
    }
}

fn bank<'a>(
    swf: &'a SupercellSwf,
    clip: &MovieClip,
    kind: &'static str,
    index: u16,
) -> ConvertResult<&'a MatrixBank> {
    swf.matrix_banks
        .get(clip.matrix_bank)
        .ok_or(ConvertError::MissingMatrix {
            bank: clip.matrix_bank,
            kind,
            index,
        })
}

fn resolve_override(
    swf: &SupercellSwf,
    clip: &MovieClip,
    element: &FrameElement,
) -> ConvertResult<InstanceOverride> {
    let mut result = InstanceOverride::default();

    if element.matrix != NO_OVERRIDE {
        let m = bank(swf, clip, "matrix", element.matrix)?
            .matrices
            .get(usize::from(element.matrix))
            .ok_or(ConvertError::MissingMatrix {
                bank: clip.matrix_bank,
                kind: "matrix",
                index: element.matrix,
            })?;
        result.matrix = Some(Matrix::new(
            f64::from(m.a),
            f64::from(m.b),
            f64::from(m.c),
            f64::from(m.d),
            f64::from(m.tx),
            f64::from(m.ty),
        ));
    }

    if element.color != NO_OVERRIDE {
        let c = bank(swf, clip, "color transform", element.color)?
            .color_transforms
            .get(usize::from(element.color))
            .ok_or(ConvertError::MissingMatrix {
                bank: clip.matrix_bank,
                kind: "color transform",
                index: element.color,
            })?;
        result.color = Some(Color {
            red_multiplier: f64::from(c.r_mul),
            green_multiplier: f64::from(c.g_mul),
            blue_multiplier: f64::from(c.b_mul),
            alpha_multiplier: f64::from(c.a_mul),
            red_offset: i32::from(c.r_add),
            green_offset: i32::from(c.g_add),
            blue_offset: i32::from(c.b_add),
            alpha_offset: 0,
        });
    }

    Ok(result)
}

/// Render order is the reverse of the reconciled bind order. Masked layers
/// leave that order and are placed right after their mask, locked, with the
/// parent index resolved once every group is in place.
fn finalize_layers(slots: Vec<BindSlot>, layer_order: &[usize], groups: &MaskGroups) -> Vec<Layer> {
    let mut layers: Vec<Option<Layer>> = slots
        .into_iter()
        .map(|slot| match slot {
            BindSlot::Layer { layer, .. } => Some(layer),
            BindSlot::Modifier(_) => None,
        })
        .collect();

    let mut order: Vec<usize> = layer_order
        .iter()
        .rev()
        .copied()
        .filter(|&bind| !groups.contains(bind))
        .collect();

    for (mask, members) in &groups.groups {
        match order.iter().position(|&b| b == *mask) {
            Some(position) => {
                for &member in members {
                    order.insert(position + 1, member);
                }
            }
            None => order.extend(members.iter().copied()),
        }
    }

    let position_of = |order: &[usize], bind: usize| order.iter().position(|&b| b == bind);
    let mut parents: Vec<(usize, usize)> = Vec::new();
    for (mask, members) in &groups.groups {
        if let Some(parent) = position_of(&order, *mask) {
            parents.extend(members.iter().map(|&member| (member, parent)));
        }
    }
    for (member, parent) in parents {
        if let Some(layer) = layers[member].as_mut() {
            layer.locked = true;
            layer.parent_layer_index = Some(parent);
        }
    }

    order
        .into_iter()
        .filter_map(|bind| layers[bind].take())
        .collect()
}

#[cfg(test)]
#[path = "tests/movieclip_tests.rs"]
mod tests;
