// Text measurement and layout unit tests

use adforge::text::*;
use image::{Rgba, RgbaImage};

#[test]
fn test_font_lookup_is_cached_by_face() {
    let a = font(FontFace::DISPLAY_BOLD, 24.0).unwrap();
    let b = font(FontFace::DISPLAY_BOLD, 48.0).unwrap();
    assert_eq!(a.face(), b.face());
    assert!(text_width("Just Dropped", &b) > text_width("Just Dropped", &a));
}

#[test]
fn test_empty_text_has_no_width() {
    let f = font(FontFace::TEXT_REGULAR, 30.0).unwrap();
    assert_eq!(text_width("", &f), 0);
    assert!(text_bounds("", &f).is_empty());
}

#[test]
fn test_wrap_keeps_every_word() {
    let f = font(FontFace::TEXT_REGULAR, 32.0).unwrap();
    let copy = "A weightless serum that leaves skin soft, bright and ready for makeup";
    let lines = wrap_text(copy, &f, 300);
    assert!(lines.len() > 1);
    assert_eq!(lines.join(" "), copy);
    for line in &lines {
        if line.contains(' ') {
            assert!(text_width(line, &f) <= 300, "{:?} too wide", line);
        }
    }
}

#[test]
fn test_shrink_to_fit_never_goes_below_minimum() {
    let size = shrink_to_fit(&"W".repeat(200), FontFace::DISPLAY_BOLD, 50, 40, 12).unwrap();
    assert_eq!(size, 12);
}

#[test]
fn test_shrink_to_fit_keeps_start_when_it_fits() {
    assert_eq!(shrink_to_fit("Hi", FontFace::DISPLAY_BOLD, 500, 40, 12).unwrap(), 40);
}

#[test]
fn test_draw_text_marks_pixels() {
    let mut canvas = RgbaImage::from_pixel(200, 60, Rgba([255, 255, 255, 255]));
    let f = font(FontFace::DISPLAY_BOLD, 32.0).unwrap();
    let bounds = draw_text(&mut canvas, "Shop", 10, 10, &f, adforge::compose::Color::black());
    assert!(!bounds.is_empty());
    assert!(canvas.pixels().any(|p| p[0] < 128));
}

#[test]
fn test_watermark_rows_are_staggered() {
    let positions = watermark_positions(1080, 1920, 360, 90);
    let first_row: Vec<_> = positions.iter().filter(|(_, y)| *y == 0).collect();
    let second_row: Vec<_> = positions.iter().filter(|(_, y)| *y == 90).collect();
    assert!(!first_row.is_empty() && !second_row.is_empty());
    assert_ne!(first_row[0].0.rem_euclid(360), second_row[0].0.rem_euclid(360));
}
