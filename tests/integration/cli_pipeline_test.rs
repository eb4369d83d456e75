// End-to-end runs of the banner, story and theme pipelines

use super::fixtures::*;
use adforge::asset::write_assets;
use adforge::background::WhiteKeyRemover;
use adforge::banner::generate_all_banners;
use adforge::campaign::ready_franchises;
use adforge::config::{BannerJob, StoryJob};
use adforge::story::{generate_all_franchises_at, Channel};
use std::process::Command;
use tempfile::TempDir;

fn adforge() -> Command {
    Command::new(env!("CARGO_BIN_EXE_adforge"))
}

#[test]
fn test_banner_job_writes_both_naming_sets() {
    let dir = TempDir::new().unwrap();
    let job_path = write_banner_job(dir.path(), "");
    let job = BannerJob::from_file(&job_path).unwrap();
    let cfg = job.to_brand_config(&WhiteKeyRemover::default()).unwrap();

    let out = dir.path().join("out");
    let written = write_assets(&generate_all_banners(&cfg).unwrap(), &out).unwrap();
    assert_eq!(written.len(), 24);

    let files = list_files(&out);
    assert!(files.contains(&"1300x90_ENG_ILM_LOP.jpg".to_string()));
    assert!(files.iter().any(|f| f.contains("L_Or_al_Paris")));
}

#[test]
fn test_story_job_writes_franchise_folders() {
    let dir = TempDir::new().unwrap();
    let job = StoryJob::from_file(write_story_job(dir.path())).unwrap();
    let curation = job.to_curation(&WhiteKeyRemover::default()).unwrap();
    let franchises = ready_franchises(&curation);
    let date = job.date.unwrap();

    let frames = generate_all_franchises_at(&franchises, &job.theme_names(), date).unwrap();
    let out = dir.path().join("stories");
    write_assets(&frames, &out).unwrap();

    let files = list_files(&out);
    assert_eq!(files.len(), 4 + 6);
    assert!(files.contains(&"AmazonHome/Frame_02_B0MUG00001.png".to_string()));
    assert!(files.contains(&"Amazon_ca_FR/Frame_03_Collage.png".to_string()));
    assert!(franchises.contains_key(&Channel::AmazonCa));
}

#[test]
fn test_cli_banners_region_flag_limits_output() {
    let dir = TempDir::new().unwrap();
    let job_path = write_banner_job(dir.path(), "");
    let out = dir.path().join("us");

    let status = adforge()
        .args(["banners", "--region", "us", "--job"])
        .arg(&job_path)
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let files = list_files(&out);
    assert_eq!(files.len(), 12);
    assert!(files.iter().all(|f| f.ends_with("_LOP.jpg")));
}

#[test]
fn test_cli_banners_uses_job_region() {
    let dir = TempDir::new().unwrap();
    let job_path = write_banner_job(dir.path(), "region: ca\n");
    let out = dir.path().join("ca");

    let status = adforge()
        .arg("banners")
        .arg("--job")
        .arg(&job_path)
        .arg("--out")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());
    let files = list_files(&out);
    assert_eq!(files.len(), 12);
    assert!(files.iter().all(|f| f.contains("_ILM_L_Or_al_Paris_")));
}

#[test]
fn test_cli_stories_writes_report() {
    let dir = TempDir::new().unwrap();
    let job_path = write_story_job(dir.path());
    let out = dir.path().join("frames");
    let report = dir.path().join("report.json");

    let status = adforge()
        .arg("stories")
        .arg("--job")
        .arg(&job_path)
        .arg("--out")
        .arg(&out)
        .arg("--report")
        .arg(&report)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(list_files(&out).len(), 10);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    let sheets = json.as_array().unwrap();
    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[0]["sheet_name"], "AmazonHome");
    assert_eq!(sheets[0]["frames"]["headers"][4], "MCID");
    assert_eq!(sheets[0]["frames"]["rows"][1][4], "4411");
    assert_eq!(sheets[0]["alt_asins"]["rows"][0][1], "B0ALT00001");
}

#[test]
fn test_cli_themes_without_api_key_prints_templates() {
    let output = adforge()
        .args(["themes", "--channel", "@AmazonHome", "--date", "2026-04-10"])
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let home = json["@AmazonHome"].as_array().unwrap();
    assert!(!home.is_empty());
    assert!(json.get("@Amazon").is_none());
}

#[test]
fn test_cli_rejects_unknown_channel() {
    let output = adforge()
        .args(["themes", "--channel", "@Nowhere"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_cli_missing_job_file_fails() {
    let dir = TempDir::new().unwrap();
    let status = adforge()
        .args(["banners", "--job", "/no/such/job.yaml", "--out"])
        .arg(dir.path())
        .status()
        .unwrap();
    assert!(!status.success());
}
