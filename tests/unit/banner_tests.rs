// Banner engine unit tests

use adforge::banner::*;
use adforge::compose::{decode_image, Color};
use adforge::error::AdError;
use image::{Rgba, RgbaImage};
use rstest::rstest;
use std::collections::HashSet;

fn brand() -> BrandConfig {
    BrandConfig {
        brand_name: "Acme Outdoor Co.".to_string(),
        brand_abbrev: "ACME".to_string(),
        logo_image: RgbaImage::from_pixel(240, 80, Rgba([20, 40, 160, 255])),
        product_image: RgbaImage::from_pixel(300, 300, Rgba([200, 90, 30, 255])),
        headline_eng: "Gear up for the weekend".to_string(),
        headline_esp: "Prepárate para el fin de semana".to_string(),
        bg_color: Color::new(0xd9, 0xf6, 0x9e),
    }
}

#[test]
fn test_full_run_produces_24_uniquely_named_banners() {
    let assets = generate_all_banners(&brand()).unwrap();
    assert_eq!(assets.len(), 24);

    let names: HashSet<_> = assets.iter().map(|a| a.filename.as_str()).collect();
    assert_eq!(names.len(), 24);
    assert!(assets.iter().all(|a| a.filename.ends_with(".jpg")));
}

#[test]
fn test_region_set_has_12_banners_in_order() {
    let assets = generate_banners(&brand(), Region::Us).unwrap();
    let names: Vec<_> = assets.iter().map(|a| a.filename.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "1300x90_ENG_ILM_ACME.jpg",
            "650x45_ENG_ILM_ACME.jpg",
            "1200x90_ENG_ILM_ACME.jpg",
            "600x45_ENG_ILM_ACME.jpg",
            "640x90_ENG_ILM_ACME.jpg",
            "320x45_ENG_ILM_ACME.jpg",
            "1300x90_ESP_ILM_ACME.jpg",
            "650x45_ESP_ILM_ACME.jpg",
            "1200x90_ESP_ILM_ACME.jpg",
            "600x45_ESP_ILM_ACME.jpg",
            "640x90_ESP_ILM_ACME.jpg",
            "320x45_ESP_ILM_ACME.jpg",
        ]
    );
}

#[test]
fn test_half_sizes_are_half_of_full_sizes() {
    let assets = generate_banners(&brand(), Region::Us).unwrap();
    for pair in assets.chunks(2) {
        let full = decode_image(&pair[0].bytes).unwrap();
        let half = decode_image(&pair[1].bytes).unwrap();
        assert_eq!(full.width(), 2 * half.width(), "{}", pair[0].filename);
        assert_eq!(full.height(), 2 * half.height(), "{}", pair[0].filename);
    }
}

#[rstest]
#[case(Region::Us, Language::Eng, "1300x90_ENG_ILM_ACME.jpg")]
#[case(Region::Us, Language::Esp, "640x90_ESP_ILM_ACME.jpg")]
#[case(Region::Ca, Language::Eng, "1300x90_ILM_Acme_Outdoor_Co_CA_ENG.jpg")]
#[case(Region::Ca, Language::Esp, "640x90_ILM_Acme_Outdoor_Co_CA_ESP.jpg")]
fn test_filename_conventions(#[case] region: Region, #[case] lang: Language, #[case] expected: &str) {
    let width = if expected.starts_with("1300") { 1300 } else { 640 };
    assert_eq!(banner_filename(width, 90, lang, &brand(), region), expected);
}

#[rstest]
#[case("Acme Outdoor Co.", "Acme_Outdoor_Co")]
#[case("L'Oréal Paris", "L_Or_al_Paris")]
#[case("__edge__", "edge")]
#[case("a-b_c", "a-b_c")]
fn test_sanitize_filename(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(sanitize_filename(input), expected);
}

#[test]
fn test_empty_abbrev_fails_before_rendering() {
    let mut cfg = brand();
    cfg.brand_abbrev = "  ".to_string();
    assert!(matches!(
        generate_all_banners(&cfg),
        Err(AdError::MissingField("brand_abbrev"))
    ));
}

#[rstest]
#[case("A very very very long headline that cannot possibly fit")]
#[case("An extraordinarily long promotional headline that cannot possibly fit in one banner row")]
fn test_long_headline_shrinks_to_fit_or_minimum(#[case] headline: &str) {
    let size = headline_font_size(1300, 90, headline).unwrap();
    assert!(size >= layout::MIN_HEADLINE_SIZE);

    let zone = HeadlineZones::for_size(1300, 90).headline;
    let font = adforge::text::font(adforge::text::FontFace::DISPLAY_BOLD, size as f32).unwrap();
    let width = adforge::text::text_width(headline, &font);
    assert!(width <= zone.width() || size == layout::MIN_HEADLINE_SIZE);

    let mut cfg = brand();
    cfg.headline_eng = headline.to_string();
    assert_eq!(generate_all_banners(&cfg).unwrap().len(), 24);
}

#[test]
fn test_short_headline_keeps_large_size() {
    let short = headline_font_size(1300, 90, "Hi").unwrap();
    let long = headline_font_size(1300, 90, "A much longer headline with many more words").unwrap();
    assert!(short >= long);
}

#[test]
fn test_localised_strings() {
    assert_eq!(Language::Eng.new_on_amazon(), "New on Amazon!");
    assert_eq!(Language::Esp.new_on_amazon(), "¡Nuevo en Amazon!");
    assert_eq!(Language::Esp.cta("Acme"), "Compra Acme");
}
