// Fixture files shared by the integration tests

use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Write a solid PNG with a white border, like a product shot on white.
pub fn write_product_png(dir: &Path, name: &str, color: [u8; 3]) -> PathBuf {
    let mut img = RgbaImage::from_pixel(160, 200, Rgba([255, 255, 255, 255]));
    for y in 20..180 {
        for x in 20..140 {
            img.put_pixel(x, y, Rgba([color[0], color[1], color[2], 255]));
        }
    }
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}

pub fn write_logo_png(dir: &Path) -> PathBuf {
    let path = dir.join("logo.png");
    RgbaImage::from_pixel(90, 40, Rgba([20, 20, 20, 255]))
        .save(&path)
        .unwrap();
    path
}

pub fn write_banner_job(dir: &Path, extra: &str) -> PathBuf {
    write_logo_png(dir);
    write_product_png(dir, "product.png", [200, 40, 40]);
    let path = dir.join("banner.yaml");
    std::fs::write(
        &path,
        format!(
            "brand_name: \"L'Oréal Paris\"\n\
             brand_abbrev: LOP\n\
             logo: logo.png\n\
             product: product.png\n\
             headline_eng: Serum that works overnight\n\
             headline_esp: Suero que trabaja toda la noche\n\
             {}",
            extra
        ),
    )
    .unwrap();
    path
}

pub fn write_story_job(dir: &Path) -> PathBuf {
    write_product_png(dir, "mug.png", [30, 90, 160]);
    write_product_png(dir, "lamp.png", [220, 180, 40]);
    let path = dir.join("stories.yaml");
    std::fs::write(
        &path,
        r#"
date: 2025-10-17
franchises:
  - channel: "@AmazonHome"
    theme: Cozy Minimalism
    products:
      - asin: B0MUG00001
        brand: Northwind
        product_name: Stoneware mug
        copy: Keeps coffee hot through the longest meetings
        image: mug.png
        mcid: "4411"
      - asin: B0LAMP0001
        brand: Lumen
        product_name: Desk lamp
        copy: Warm light that dims with a tap
        image: lamp.png
    alt_asins:
      - asin: B0ALT00001
        brand: Northwind
  - channel: "@Amazon.ca"
    products:
      - asin: B0MUG00002
        brand: Northwind
        product_name: Travel mug
        copy: Leak-proof lid for the morning commute
        image: mug.png
"#,
    )
    .unwrap();
    path
}

/// Relative paths of every file under `root`, sorted.
pub fn list_files(root: &Path) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in std::fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let rel = path.strip_prefix(root).unwrap();
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    out.sort();
    out
}
