use crate::types::source::{Bind, TextField};
use crate::types::xfl::{DropShadowFilter, DynamicText, Filter, GlowFilter, TextAttrs, TextRun};

/// Alignment code the SC exporter writes for centered text.
const ALIGN_CENTER: u8 = 18;
/// Glow strength used when the field carries no explicit strength.
const DEFAULT_GLOW_STRENGTH: f64 = 15.0;

/// Split packed RGBA into (RGB, alpha 0..=1).
fn split_rgba(packed: u32) -> (u32, f64) {
    ((packed >> 8) & 0x00FF_FFFF, f64::from(packed & 0xFF) / 255.0)
}

fn font_face(field: &TextField) -> String {
    let style = match (field.bold, field.italic) {
        (true, true) => "-BoldItalic",
        (true, false) => "-Bold",
        (false, true) => "-Italic",
        (false, false) => "",
    };
    format!("{}{}", field.font_name, style)
}

pub fn convert_text_field(bind: &Bind, field: &TextField) -> DynamicText {
    let (fill_color, alpha) = split_rgba(field.font_color);
    let size = f64::from(field.font_size);

    let attrs = TextAttrs {
        alignment: (field.font_align == ALIGN_CENTER).then(|| "center".to_string()),
        face: font_face(field),
        size,
        bitmap_size: size * 20.0,
        fill_color,
        alpha,
    };

    let mut filters = Vec::new();
    if field.outline_color != 0 {
        let (color, _) = split_rgba(field.outline_color);
        let strength = if field.c1 != 0 {
            f64::from(field.c1) / 65535.0
        } else {
            DEFAULT_GLOW_STRENGTH
        };
        filters.push(Filter::Glow(GlowFilter {
            blur_x: 2.0,
            blur_y: 2.0,
            color,
            strength,
        }));
    }
    if field.c2 != 0 {
        filters.push(Filter::DropShadow(DropShadowFilter {
            angle: f64::from(field.c2) / 65535.0 * 360.0,
            blur_x: 4.0,
            blur_y: 4.0,
            distance: 4.0,
        }));
    }

    DynamicText {
        name: bind.name.clone(),
        width: f64::from(field.right) - f64::from(field.left),
        height: f64::from(field.bottom) - f64::from(field.top),
        top: f64::from(field.top),
        left: f64::from(field.left),
        line_type: field.multiline.then(|| "multiline no wrap".to_string()),
        matrix: None,
        color: None,
        text_runs: vec![TextRun {
            characters: field.text.clone().unwrap_or_default(),
            text_attrs: vec![attrs],
        }],
        filters,
    }
}

#[cfg(test)]
#[path = "tests/text_field_tests.rs"]
mod tests;
