// Story engine unit tests

use adforge::compose::decode_image;
use adforge::story::*;
use chrono::NaiveDate;
use image::{Rgba, RgbaImage};
use rstest::rstest;
use std::collections::{BTreeMap, HashMap, HashSet};

fn october() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 17).unwrap()
}

fn products(n: usize) -> Vec<ProductEntry> {
    (0..n)
        .map(|i| ProductEntry {
            asin: format!("B0TEST{:04}", i),
            brand: format!("Brand {}", i),
            product_name: format!("Product {}", i),
            copy: "Smells amazing and lasts all day long".to_string(),
            image: RgbaImage::from_pixel(120, 160, Rgba([(40 * i) as u8, 120, 200, 255])),
        })
        .collect()
}

#[rstest]
#[case(Channel::AmazonHome, 3, 5)]
#[case(Channel::AmazonBeauty, 2, 4)]
#[case(Channel::AmazonFashion, 1, 3)]
#[case(Channel::Amazon, 4, 6)]
#[case(Channel::AmazonCa, 3, 10)]
fn test_frame_counts(#[case] channel: Channel, #[case] n: usize, #[case] expected: usize) {
    let frames = generate_franchise_frames_at(channel, &products(n), "Just Dropped", october()).unwrap();
    assert_eq!(frames.len(), expected);
}

#[test]
fn test_frame_sequence_and_names() {
    let frames =
        generate_franchise_frames_at(Channel::AmazonHome, &products(2), "Just Dropped", october())
            .unwrap();
    let names: Vec<_> = frames.iter().map(|f| f.filename.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "AmazonHome/Frame_01_Collage.png",
            "AmazonHome/Frame_02_B0TEST0000.png",
            "AmazonHome/Frame_03_B0TEST0001.png",
            "AmazonHome/Frame_04_Collage.png",
        ]
    );
    assert_eq!(frames[0].bytes, frames[3].bytes);
}

#[test]
fn test_canada_has_english_and_french_sets() {
    let frames =
        generate_franchise_frames_at(Channel::AmazonCa, &products(1), "Just Dropped", october())
            .unwrap();
    let folders: Vec<_> = frames.iter().filter_map(|f| f.folder()).collect();
    assert_eq!(
        folders,
        vec!["Amazon_ca", "Amazon_ca", "Amazon_ca", "Amazon_ca_FR", "Amazon_ca_FR", "Amazon_ca_FR"]
    );
    assert_ne!(frames[0].bytes, frames[3].bytes);
}

#[test]
fn test_frames_are_story_sized_png() {
    let frames =
        generate_franchise_frames_at(Channel::AmazonBeauty, &products(1), "Summer Glow", october())
            .unwrap();
    for frame in &frames {
        let img = decode_image(&frame.bytes).unwrap();
        assert_eq!(img.dimensions(), (1080, 1920), "{}", frame.filename);
    }
}

#[test]
fn test_empty_franchise_still_has_bookend_collages() {
    let frames =
        generate_franchise_frames_at(Channel::AmazonFashion, &[], "Just Dropped", october()).unwrap();
    assert_eq!(frames.len(), 2);
}

#[test]
fn test_all_franchises_in_channel_order_with_unique_names() {
    let mut franchises = BTreeMap::new();
    franchises.insert(Channel::AmazonCa, products(1));
    franchises.insert(Channel::AmazonHome, products(1));
    let mut themes = HashMap::new();
    themes.insert(Channel::AmazonHome, "Cozy Minimalism".to_string());

    let frames = generate_all_franchises_at(&franchises, &themes, october()).unwrap();
    assert_eq!(frames.len(), 3 + 6);
    assert!(frames[0].filename.starts_with("AmazonHome/"));
    assert!(frames[3].filename.starts_with("Amazon_ca/"));

    let names: HashSet<_> = frames.iter().map(|f| f.filename.as_str()).collect();
    assert_eq!(names.len(), frames.len());
}

#[test]
fn test_custom_theme_changes_collage() {
    let items = products(1);
    let plain =
        generate_franchise_frames_at(Channel::AmazonHome, &items, "Just Dropped", october()).unwrap();
    let themed =
        generate_franchise_frames_at(Channel::AmazonHome, &items, "Cozy Minimalism", october())
            .unwrap();
    assert_ne!(plain[0].bytes, themed[0].bytes);
}

#[test]
fn test_annotation_scenario() {
    assert_eq!(
        annotation("Smells amazing and lasts all day", 30),
        "Smells amazing and lasts all "
    );
}

#[test]
fn test_pad_products_repeats_in_order() {
    let items = products(2);
    let padded = pad_products(&items, 6);
    let asins: Vec<_> = padded.iter().map(|p| p.asin.as_str()).collect();
    assert_eq!(
        asins,
        vec!["B0TEST0000", "B0TEST0001", "B0TEST0000", "B0TEST0001", "B0TEST0000", "B0TEST0001"]
    );
}

#[rstest]
#[case(StoryLang::En, 10, "october")]
#[case(StoryLang::Fr, 10, "octobre")]
#[case(StoryLang::Fr, 2, "février")]
fn test_month_labels(#[case] lang: StoryLang, #[case] month: u32, #[case] expected: &str) {
    let date = NaiveDate::from_ymd_opt(2025, month, 1).unwrap();
    assert_eq!(lang.month_label(date), expected);
}

#[test]
fn test_fashion_chunks() {
    let chunks = fashion_chunks("Relaxed wool coat with deep pockets and a soft lining", 30);
    assert_eq!(chunks, vec!["Relaxed wool coat", "with deep pockets"]);
    assert_eq!(fashion_chunks("Soft knit sweater", 30), vec!["Soft knit sweater"]);
}

#[test]
fn test_individual_frames_cycle_gradients() {
    let palette = &Channel::Amazon.spec().palette;
    let frames =
        generate_franchise_frames_at(Channel::Amazon, &products(8), "Just Dropped", october())
            .unwrap();
    assert_eq!(frames.len(), 10);

    for (i, frame) in frames[1..9].iter().enumerate() {
        let (top, _) = palette.gradient(i).unwrap();
        let img = decode_image(&frame.bytes).unwrap();
        assert_eq!(*img.get_pixel(0, 0), top.to_rgba(), "{}", frame.filename);
    }

    let first = decode_image(&frames[1].bytes).unwrap();
    let wrapped = decode_image(&frames[7].bytes).unwrap();
    assert_eq!(first.get_pixel(0, 0), wrapped.get_pixel(0, 0));
}
