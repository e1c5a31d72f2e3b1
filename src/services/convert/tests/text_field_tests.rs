use super::*;

fn field() -> TextField {
    TextField {
        id: 3,
        text: Some("Play".into()),
        font_name: "Supercell".into(),
        font_size: 24,
        font_color: 0xFF8000CC,
        font_align: 18,
        left: -50,
        top: -10,
        right: 50,
        bottom: 20,
        bold: true,
        italic: false,
        multiline: true,
        ..Default::default()
    }
}

#[test]
fn test_geometry_font_and_color() {
    let bind = Bind {
        id: 3,
        name: Some("label".into()),
        blend: 0,
    };
    let text = convert_text_field(&bind, &field());

    assert_eq!(text.name.as_deref(), Some("label"));
    assert_eq!((text.width, text.height), (100.0, 30.0));
    assert_eq!((text.left, text.top), (-50.0, -10.0));
    assert_eq!(text.line_type.as_deref(), Some("multiline no wrap"));

    let run = &text.text_runs[0];
    assert_eq!(run.characters, "Play");
    let attrs = &run.text_attrs[0];
    assert_eq!(attrs.face, "Supercell-Bold");
    assert_eq!(attrs.alignment.as_deref(), Some("center"));
    assert_eq!(attrs.size, 24.0);
    assert_eq!(attrs.bitmap_size, 480.0);
    assert_eq!(attrs.fill_color, 0xFF8000);
    assert!((attrs.alpha - 0.8).abs() < 1e-9);
    assert!(text.filters.is_empty());
}

#[test]
fn test_face_suffixes() {
    let mut f = field();
    f.bold = true;
    f.italic = true;
    assert_eq!(
        convert_text_field(&Bind::default(), &f).text_runs[0].text_attrs[0].face,
        "Supercell-BoldItalic"
    );
    f.bold = false;
    assert_eq!(
        convert_text_field(&Bind::default(), &f).text_runs[0].text_attrs[0].face,
        "Supercell-Italic"
    );
    f.italic = false;
    assert_eq!(
        convert_text_field(&Bind::default(), &f).text_runs[0].text_attrs[0].face,
        "Supercell"
    );
}

#[test]
fn test_outline_becomes_glow_with_default_strength() {
    let mut f = field();
    f.outline_color = 0x000000FF;
    let text = convert_text_field(&Bind::default(), &f);

    let Filter::Glow(glow) = &text.filters[0] else {
        panic!("expected a glow filter");
    };
    assert_eq!((glow.blur_x, glow.blur_y), (2.0, 2.0));
    assert_eq!(glow.color, 0);
    assert_eq!(glow.strength, 15.0);
}

#[test]
fn test_encoded_strength_and_shadow_angle() {
    let mut f = field();
    f.outline_color = 0x112233FF;
    f.c1 = 0xFFFF;
    f.c2 = 0x4000;
    let text = convert_text_field(&Bind::default(), &f);

    assert_eq!(text.filters.len(), 2);
    let Filter::Glow(glow) = &text.filters[0] else {
        panic!("expected a glow filter");
    };
    assert_eq!(glow.color, 0x112233);
    assert_eq!(glow.strength, 1.0);

    let Filter::DropShadow(shadow) = &text.filters[1] else {
        panic!("expected a drop shadow");
    };
    assert!((shadow.angle - 90.0).abs() < 0.01);
    assert_eq!(
        (shadow.blur_x, shadow.blur_y, shadow.distance),
        (4.0, 4.0, 4.0)
    );
}

#[test]
fn test_left_aligned_single_line_without_text() {
    let mut f = field();
    f.font_align = 0;
    f.multiline = false;
    f.text = None;
    let text = convert_text_field(&Bind::default(), &f);

    assert!(text.line_type.is_none());
    assert!(text.text_runs[0].text_attrs[0].alignment.is_none());
    assert_eq!(text.text_runs[0].characters, "");
}
