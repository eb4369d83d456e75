// Configuration and job file unit tests

use adforge::background::WhiteKeyRemover;
use adforge::banner::Region;
use adforge::config::*;
use adforge::story::Channel;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_full_config_round_trip_through_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"
fonts: {}
search:
  api_key: abc123
  base_url: https://search.internal/v1
  retry:
    max_retries: 4
    initial_backoff_ms: 100
    max_backoff_ms: 800
logging:
  level: warn
"#,
    )
    .unwrap();
    file.flush().unwrap();

    let config = AppConfig::from_file(file.path()).unwrap();
    config.validate().unwrap();
    assert_eq!(config.search.base_url, "https://search.internal/v1");
    let policy = config.search.retry.to_retry_policy();
    assert_eq!(policy.max_retries, 4);
    assert_eq!(policy.backoff_duration(3).as_millis(), 400);
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_missing_config_file_is_config_error() {
    let err = AppConfig::from_file("/definitely/not/here.yaml").unwrap_err();
    assert_eq!(err.kind(), adforge::error::ErrorKind::Input);
}

#[test]
fn test_font_override_directory_is_applied() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::from_yaml_with_env(&format!(
        "fonts:\n  dir: {}\n",
        dir.path().display()
    ))
    .unwrap();
    config.validate().unwrap();
    assert_eq!(config.apply_fonts().unwrap(), 0);
}

#[test]
fn test_banner_job_without_region_means_both_sets() {
    let yaml = r#"
brand_name: Brand
brand_abbrev: BR
logo: a.png
product: b.png
headline_eng: Hello
headline_esp: Hola
"#;
    let job = BannerJob::from_yaml(yaml, Path::new("/jobs")).unwrap();
    assert!(job.region.is_none());
    assert_eq!(job.product_path(), Path::new("/jobs/b.png"));

    let ca = BannerJob::from_yaml(&format!("{}region: ca\n", yaml), Path::new("/jobs")).unwrap();
    assert_eq!(ca.region, Some(Region::Ca));
}

#[test]
fn test_banner_job_rejects_bad_color() {
    let yaml = r##"
brand_name: Brand
brand_abbrev: BR
logo: a.png
product: b.png
headline_eng: Hello
headline_esp: Hola
bg_color: "#12"
"##;
    assert!(BannerJob::from_yaml(yaml, Path::new(".")).is_err());
}

#[test]
fn test_story_job_with_remote_image_that_fails_is_missing_image() {
    let yaml = r#"
franchises:
  - channel: "@AmazonBeauty"
    products:
      - asin: B0REMOTE
        brand: Glow
        image_url: "not a url"
"#;
    let job = StoryJob::from_yaml(yaml, Path::new(".")).unwrap();
    let curation = job.to_curation(&WhiteKeyRemover::default()).unwrap();
    assert!(curation[&Channel::AmazonBeauty].products[0].image.is_none());
}

#[test]
fn test_story_job_missing_local_image_is_error() {
    let yaml = r#"
franchises:
  - channel: "@Amazon"
    products:
      - asin: B0LOCAL
        image: missing.png
"#;
    let dir = TempDir::new().unwrap();
    let job = StoryJob::from_yaml(yaml, dir.path()).unwrap();
    assert!(job.to_curation(&WhiteKeyRemover::default()).is_err());
}
