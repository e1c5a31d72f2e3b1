use super::*;
use crate::test_utils::{uv_rect, xy_rect};

fn assert_matrix_close(actual: &Matrix, expected: &Matrix) {
    for (a, e) in [
        (actual.a, expected.a),
        (actual.b, expected.b),
        (actual.c, expected.c),
        (actual.d, expected.d),
        (actual.tx, expected.tx),
        (actual.ty, expected.ty),
    ] {
        assert!((a - e).abs() < 1e-6, "{actual:?} != {expected:?}");
    }
}

#[test]
fn test_sprite_rect_is_uv_bounding_box() {
    let rect = SpriteRect::from_uv(&uv_rect(10, 20, 8, 4));
    assert_eq!(
        rect,
        SpriteRect {
            x: 10,
            y: 20,
            width: 8,
            height: 4
        }
    );

    let point = [UvPoint { u: 3, v: 3 }; 4];
    let rect = SpriteRect::from_uv(&point);
    assert_eq!((rect.width, rect.height), (1, 1));
}

#[test]
fn test_upright_sprite_keeps_identity_orientation() {
    let (placement, matrix) = Placement::fit(&uv_rect(0, 0, 8, 4), &xy_rect(5.0, 6.0, 8.0, 4.0));

    assert_eq!(placement.orientation, Orientation::new(0, false));
    assert_matrix_close(&matrix, &Matrix::new(1.0, 0.0, 0.0, 1.0, 5.0, 6.0));
}

#[test]
fn test_rotated_sprite_is_turned_upright() {
    // A 4x2 sprite packed a quarter turn counter-clockwise: 2x4 in the atlas.
    let uv = vec![
        UvPoint { u: 10, v: 24 },
        UvPoint { u: 10, v: 20 },
        UvPoint { u: 12, v: 20 },
        UvPoint { u: 12, v: 24 },
    ];
    let xy = xy_rect(0.0, 0.0, 4.0, 2.0);

    let (placement, matrix) = Placement::fit(&uv, &xy);

    assert_eq!(placement.orientation, Orientation::new(1, false));
    assert_eq!(placement.orientation.degrees(), 90);
    assert_eq!(
        placement.rect,
        SpriteRect {
            x: 10,
            y: 20,
            width: 2,
            height: 4
        }
    );
    assert_matrix_close(&matrix, &Matrix::IDENTITY);
}

#[test]
fn test_repeat_matrix_is_refit_from_cached_corners() {
    let (placement, _) = Placement::fit(&uv_rect(0, 0, 8, 4), &xy_rect(0.0, 0.0, 8.0, 4.0));

    let matrix = placement.matrix_for(&xy_rect(10.0, 5.0, 16.0, 8.0));
    assert_matrix_close(&matrix, &Matrix::new(2.0, 0.0, 0.0, 2.0, 10.0, 5.0));
}

#[test]
fn test_degenerate_fit_falls_back_to_translation() {
    let from = [(0.0, 0.0), (0.0, 0.0), (0.0, 0.0)];
    let to = [
        XyPoint { x: 3.0, y: 3.0 },
        XyPoint { x: 3.0, y: 3.0 },
        XyPoint { x: 3.0, y: 3.0 },
    ];
    assert_matrix_close(
        &fit_affine(&from, &to),
        &Matrix::new(1.0, 0.0, 0.0, 1.0, 3.0, 3.0),
    );
}
