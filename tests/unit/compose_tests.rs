// Compositing primitive unit tests

use adforge::compose::*;
use image::{Rgba, RgbaImage};
use rstest::rstest;

fn framed_subject() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(60, 40, Rgba([0, 0, 0, 0]));
    for y in 10..25 {
        for x in 15..45 {
            img.put_pixel(x, y, Rgba([30, 90, 160, 255]));
        }
    }
    img
}

#[test]
fn test_trim_crops_to_content() {
    let trimmed = trim_transparent_border(&framed_subject());
    assert_eq!(trimmed.dimensions(), (30, 15));
}

#[test]
fn test_trim_is_idempotent() {
    let once = trim_transparent_border(&framed_subject());
    let twice = trim_transparent_border(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_all_white_image_is_returned_unchanged() {
    let white = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
    assert_eq!(trim_transparent_border(&white), white);
}

#[rstest]
#[case(400, 200, 100, 100)]
#[case(200, 400, 100, 100)]
#[case(50, 20, 300, 90)]
#[case(1, 1000, 40, 40)]
#[case(1000, 1, 40, 40)]
fn test_fit_stays_within_bounds(
    #[case] w: u32,
    #[case] h: u32,
    #[case] max_w: u32,
    #[case] max_h: u32,
) {
    let (fw, fh) = fit_dimensions(w, h, max_w, max_h);
    assert!(fw >= 1 && fh >= 1);
    assert!(fw <= max_w && fh <= max_h);
    assert!(fw == max_w || fh == max_h || fw == 1 || fh == 1);
}

#[test]
fn test_fit_within_resizes_pixels() {
    let img = RgbaImage::from_pixel(400, 200, Rgba([10, 20, 30, 255]));
    let fitted = fit_within(&img, 100, 100).unwrap();
    assert_eq!(fitted.dimensions(), (100, 50));
    assert_eq!(fitted.get_pixel(50, 25)[3], 255);
}

#[test]
fn test_trim_and_fit_uses_subject_aspect() {
    let fitted = trim_and_fit(&framed_subject(), 60, 60).unwrap();
    assert_eq!(fitted.dimensions(), (60, 30));
}

#[rstest]
#[case("#000000")]
#[case("#ffffff")]
#[case("#d9f69e")]
#[case("#1a2b3c")]
fn test_hex_round_trip(#[case] hex: &str) {
    assert_eq!(rgb_to_hex(hex_to_rgb(hex).unwrap()), hex);
}

#[rstest]
#[case("#12345")]
#[case("12345G")]
#[case("")]
#[case("#1234567")]
fn test_malformed_hex_is_rejected(#[case] hex: &str) {
    assert!(hex_to_rgb(hex).is_err());
}

#[test]
fn test_hex_without_hash_and_uppercase() {
    assert_eq!(hex_to_rgb("D9F69E").unwrap(), Color::new(0xd9, 0xf6, 0x9e));
}

#[test]
fn test_paste_respects_alpha() {
    let mut canvas = solid_canvas(10, 10, Color::white());
    let mut stamp = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
    stamp.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
    paste_with_alpha(&mut canvas, &stamp, 2, 2);

    assert_eq!(*canvas.get_pixel(2, 2), Rgba([255, 255, 255, 255]));
    assert_eq!(*canvas.get_pixel(3, 3), Rgba([0, 0, 0, 255]));
    assert_eq!(*canvas.get_pixel(8, 8), Rgba([255, 255, 255, 255]));
}

#[test]
fn test_paste_clips_at_edges() {
    let mut canvas = solid_canvas(10, 10, Color::white());
    let stamp = RgbaImage::from_pixel(6, 6, Rgba([0, 0, 0, 255]));
    paste_with_alpha(&mut canvas, &stamp, -3, 7);
    assert_eq!(*canvas.get_pixel(0, 9), Rgba([0, 0, 0, 255]));
    assert_eq!(*canvas.get_pixel(3, 9), Rgba([255, 255, 255, 255]));
}

#[test]
fn test_gradient_endpoints() {
    let top = Color::new(255, 0, 0);
    let bottom = Color::new(0, 0, 255);
    let grad = linear_gradient(4, 11, top, bottom);
    assert_eq!(*grad.get_pixel(0, 0), top.to_rgba());
    assert_eq!(*grad.get_pixel(3, 10), bottom.to_rgba());
}

#[test]
fn test_encode_jpeg_and_png() {
    let img = solid_canvas(16, 9, Color::new(40, 80, 120));
    let jpeg = encode(&img, OutputFormat::Jpeg, 95).unwrap();
    let png = encode(&img, OutputFormat::Png, 0).unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
    assert_eq!(decode_image(&png).unwrap(), img);
}
