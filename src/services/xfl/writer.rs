use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};

use super::xml::XmlElement;
use crate::types::errors::ConvertResult;
use crate::types::xfl::{
    BitmapInstance, BitmapItem, BlendMode, Color, Document, DynamicText, Element, FillData,
    Filter, Frame, Group, Layer, LayerType, Matrix, Shape, SymbolInstance, SymbolItem, SymbolType,
    Timeline,
};

const XFL_NAMESPACE: &str = "http://ns.adobe.com/xfl/2008/";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// Proxy file contents every XFL project carries next to DOMDocument.xml.
pub const XFL_PROXY: &str = "PROXY-CS5";
const KEY_MODE_NORMAL: u32 = 9728;

pub const LIBRARY_DIR: &str = "LIBRARY";
pub const DOCUMENT_FILE: &str = "DOMDocument.xml";

/// Write `doc` as an XFL project directory at `doc.path`.
pub fn write_document(doc: &Document) -> ConvertResult<PathBuf> {
    let library = doc.path.join(LIBRARY_DIR);
    fs::create_dir_all(&library)?;

    for item in doc.media.values() {
        let path = library.join(&item.href);
        ensure_parent(&path)?;
        item.image.save_with_format(&path, ImageFormat::Png)?;
    }

    for symbol in doc.symbols.values() {
        let path = library.join(format!("{}.xml", symbol.name));
        ensure_parent(&path)?;
        fs::write(&path, with_declaration(symbol_xml(symbol)))?;
    }

    fs::write(
        doc.path.join(DOCUMENT_FILE),
        with_declaration(document_xml(doc)),
    )?;
    fs::write(doc.path.join(format!("{}.xfl", doc.name())), XFL_PROXY)?;

    log::info!(
        "Wrote XFL project {} ({} symbols, {} bitmaps)",
        doc.path.display(),
        doc.symbols.len(),
        doc.media.len()
    );
    Ok(doc.path.clone())
}

fn ensure_parent(path: &Path) -> ConvertResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn with_declaration(root: XmlElement) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}",
        root.render()
    )
}

fn hex_color(color: u32) -> String {
    format!("#{:06X}", color & 0x00FF_FFFF)
}

pub fn document_xml(doc: &Document) -> XmlElement {
    let settings = &doc.settings;
    let mut root = XmlElement::new("DOMDocument")
        .attr("xmlns:xsi", XSI_NAMESPACE)
        .attr("xmlns", XFL_NAMESPACE)
        .attr("currentTimeline", settings.current_timeline)
        .attr("xflVersion", &settings.xfl_version)
        .attr("creatorInfo", &settings.creator_info)
        .attr("platform", "Windows")
        .attr("width", settings.width)
        .attr("height", settings.height)
        .attr("frameRate", doc.frame_rate)
        .attr("backgroundColor", hex_color(settings.background_color));

    let mut folders = XmlElement::new("folders");
    for folder in &doc.folders {
        folders.push(
            XmlElement::new("DOMFolderItem")
                .attr("name", &folder.name)
                .attr("isExpanded", false),
        );
    }
    root.push(folders);

    let mut media = XmlElement::new("media");
    for item in doc.media.values() {
        media.push(bitmap_item_xml(item));
    }
    root.push(media);

    let mut symbols = XmlElement::new("symbols");
    for symbol in doc.symbols.values() {
        symbols.push(
            XmlElement::new("Include")
                .attr("href", format!("{}.xml", symbol.name))
                .attr("loadImmediate", false),
        );
    }
    root.push(symbols);

    let mut timelines = XmlElement::new("timelines");
    for timeline in &doc.timelines {
        timelines.push(timeline_xml(timeline));
    }
    root.push(timelines);
    root
}

fn bitmap_item_xml(item: &BitmapItem) -> XmlElement {
    XmlElement::new("DOMBitmapItem")
        .attr("name", &item.name)
        .attr("href", &item.href)
        .attr("allowSmoothing", item.allow_smoothing)
        .attr("quality", item.quality)
        .attr("useImportedJPEGData", item.use_imported_jpeg_data)
        .attr("frameRight", item.image.width() * 20)
        .attr("frameBottom", item.image.height() * 20)
}

pub fn symbol_xml(symbol: &SymbolItem) -> XmlElement {
    let mut root = XmlElement::new("DOMSymbolItem")
        .attr("xmlns:xsi", XSI_NAMESPACE)
        .attr("xmlns", XFL_NAMESPACE)
        .attr("name", &symbol.name);
    if symbol.symbol_type == SymbolType::Graphic {
        root = root.attr("symbolType", symbol.symbol_type.as_str());
    }
    if let Some(grid) = symbol.scale_grid {
        root = root
            .attr("scaleGridLeft", grid.left)
            .attr("scaleGridRight", grid.right)
            .attr("scaleGridTop", grid.top)
            .attr("scaleGridBottom", grid.bottom);
    }
    root.child(XmlElement::new("timeline").child(timeline_xml(&symbol.timeline)))
}

fn timeline_xml(timeline: &Timeline) -> XmlElement {
    let mut layers = XmlElement::new("layers");
    for layer in &timeline.layers {
        layers.push(layer_xml(layer));
    }
    XmlElement::new("DOMTimeline")
        .attr("name", &timeline.name)
        .child(layers)
}

fn layer_xml(layer: &Layer) -> XmlElement {
    let mut root = XmlElement::new("DOMLayer").attr("name", &layer.name);
    if layer.layer_type == LayerType::Mask {
        root = root.attr("layerType", "mask");
    }
    if layer.locked {
        root = root.attr("locked", true);
    }
    root = root.attr_opt("parentLayerIndex", layer.parent_layer_index);

    let mut frames = XmlElement::new("frames");
    for frame in &layer.frames {
        frames.push(frame_xml(frame));
    }
    root.child(frames)
}

fn frame_xml(frame: &Frame) -> XmlElement {
    let mut root = XmlElement::new("DOMFrame").attr("index", frame.index);
    if frame.duration > 1 {
        root = root.attr("duration", frame.duration);
    }
    root = root.attr("keyMode", KEY_MODE_NORMAL);

    let mut elements = XmlElement::new("elements");
    for element in &frame.elements {
        elements.push(element_xml(element));
    }
    root.child(elements)
}

pub fn element_xml(element: &Element) -> XmlElement {
    match element {
        Element::Shape(shape) => shape_xml(shape),
        Element::Group(group) => group_xml(group),
        Element::BitmapInstance(bitmap) => bitmap_instance_xml(bitmap),
        Element::SymbolInstance(symbol) => symbol_instance_xml(symbol),
        Element::DynamicText(text) => dynamic_text_xml(text),
    }
}

fn matrix_xml(matrix: &Matrix) -> XmlElement {
    let mut node = XmlElement::new("Matrix");
    for (key, value, default) in [
        ("a", matrix.a, 1.0),
        ("b", matrix.b, 0.0),
        ("c", matrix.c, 0.0),
        ("d", matrix.d, 1.0),
        ("tx", matrix.tx, 0.0),
        ("ty", matrix.ty, 0.0),
    ] {
        if value != default {
            node = node.attr(key, value);
        }
    }
    XmlElement::new("matrix").child(node)
}

fn color_xml(color: &Color) -> XmlElement {
    let defaults = Color::default();
    let mut node = XmlElement::new("Color");
    for (key, value, default) in [
        ("redMultiplier", color.red_multiplier, defaults.red_multiplier),
        ("greenMultiplier", color.green_multiplier, defaults.green_multiplier),
        ("blueMultiplier", color.blue_multiplier, defaults.blue_multiplier),
        ("alphaMultiplier", color.alpha_multiplier, defaults.alpha_multiplier),
    ] {
        if value != default {
            node = node.attr(key, value);
        }
    }
    for (key, value) in [
        ("redOffset", color.red_offset),
        ("greenOffset", color.green_offset),
        ("blueOffset", color.blue_offset),
        ("alphaOffset", color.alpha_offset),
    ] {
        if value != 0 {
            node = node.attr(key, value);
        }
    }
    XmlElement::new("color").child(node)
}

fn with_matrix(node: XmlElement, matrix: Option<&Matrix>) -> XmlElement {
    match matrix {
        Some(matrix) => node.child(matrix_xml(matrix)),
        None => node,
    }
}

fn shape_xml(shape: &Shape) -> XmlElement {
    let mut root = XmlElement::new("DOMShape");
    if shape.is_drawing_object {
        root = root.attr("isDrawingObject", true);
    }
    root = with_matrix(root, shape.matrix.as_ref());

    let mut fills = XmlElement::new("fills");
    for fill in &shape.fills {
        let data = match &fill.data {
            FillData::Solid { color, alpha } => {
                let mut solid = XmlElement::new("SolidColor").attr("color", hex_color(*color));
                if *alpha < 1.0 {
                    solid = solid.attr("alpha", alpha);
                }
                solid
            }
            FillData::Bitmap {
                bitmap_path,
                matrix,
                clipped,
            } => XmlElement::new("BitmapFill")
                .attr("bitmapPath", bitmap_path)
                .attr("bitmapIsClipped", clipped)
                .child(matrix_xml(matrix)),
        };
        fills.push(
            XmlElement::new("FillStyle")
                .attr("index", fill.index)
                .child(data),
        );
    }

    let mut edges = XmlElement::new("edges");
    for edge in &shape.edges {
        edges.push(
            XmlElement::new("Edge")
                .attr_opt("fillStyle0", edge.fill_style0)
                .attr_opt("fillStyle1", edge.fill_style1)
                .attr("edges", &edge.edges),
        );
    }
    root.child(fills).child(edges)
}

fn group_xml(group: &Group) -> XmlElement {
    let mut members = XmlElement::new("members");
    for shape in &group.members {
        members.push(shape_xml(shape));
    }
    with_matrix(XmlElement::new("DOMGroup"), group.matrix.as_ref()).child(members)
}

fn bitmap_instance_xml(bitmap: &BitmapInstance) -> XmlElement {
    let root =
        XmlElement::new("DOMBitmapInstance").attr("libraryItemName", &bitmap.library_item_name);
    with_matrix(root, bitmap.matrix.as_ref())
}

fn symbol_instance_xml(symbol: &SymbolInstance) -> XmlElement {
    let mut root = XmlElement::new("DOMSymbolInstance")
        .attr("libraryItemName", &symbol.library_item_name)
        .attr_opt("name", symbol.name.as_deref().filter(|n| !n.is_empty()));
    if symbol.symbol_type == SymbolType::Graphic {
        root = root
            .attr("symbolType", symbol.symbol_type.as_str())
            .attr("loop", "loop");
    }
    if symbol.blend_mode != BlendMode::Normal {
        root = root.attr("blendMode", symbol.blend_mode.as_str());
    }
    root = with_matrix(root, symbol.matrix.as_ref());
    if let Some(color) = &symbol.color {
        root = root.child(color_xml(color));
    }
    root
}

fn dynamic_text_xml(text: &DynamicText) -> XmlElement {
    let mut root = XmlElement::new("DOMDynamicText")
        .attr_opt("name", text.name.as_deref().filter(|n| !n.is_empty()))
        .attr("width", text.width)
        .attr("height", text.height)
        .attr("left", text.left)
        .attr("top", text.top)
        .attr_opt("lineType", text.line_type.as_deref());
    root = with_matrix(root, text.matrix.as_ref());
    if let Some(color) = &text.color {
        root = root.child(color_xml(color));
    }

    let mut runs = XmlElement::new("textRuns");
    for run in &text.text_runs {
        let mut attrs = XmlElement::new("textAttrs");
        for a in &run.text_attrs {
            attrs.push(
                XmlElement::new("DOMTextAttrs")
                    .attr_opt("alignment", a.alignment.as_deref())
                    .attr("face", &a.face)
                    .attr("size", a.size)
                    .attr("bitmapSize", a.bitmap_size)
                    .attr("fillColor", hex_color(a.fill_color))
                    .attr("alpha", a.alpha),
            );
        }
        runs.push(
            XmlElement::new("DOMTextRun")
                .child(XmlElement::new("characters").text(run.characters.clone()))
                .child(attrs),
        );
    }
    root = root.child(runs);

    if !text.filters.is_empty() {
        let mut filters = XmlElement::new("filters");
        for filter in &text.filters {
            filters.push(match filter {
                Filter::Glow(glow) => XmlElement::new("GlowFilter")
                    .attr("blurX", glow.blur_x)
                    .attr("blurY", glow.blur_y)
                    .attr("color", hex_color(glow.color))
                    .attr("strength", glow.strength),
                Filter::DropShadow(shadow) => XmlElement::new("DropShadowFilter")
                    .attr("angle", shadow.angle)
                    .attr("blurX", shadow.blur_x)
                    .attr("blurY", shadow.blur_y)
                    .attr("distance", shadow.distance),
            });
        }
        root = root.child(filters);
    }
    root
}
