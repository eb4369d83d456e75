// Campaign workflow unit tests

use adforge::campaign::*;
use adforge::story::Channel;
use chrono::NaiveDate;
use image::{Rgba, RgbaImage};
use std::collections::HashMap;

fn product(asin: &str, brand: &str) -> ProductDraft {
    ProductDraft {
        asin: asin.to_string(),
        brand: brand.to_string(),
        product_name: format!("{} pick", brand),
        copy: "Lightweight and ready for every day".to_string(),
        image: Some(RgbaImage::from_pixel(50, 70, Rgba([120, 100, 200, 255]))),
        ..Default::default()
    }
}

fn approved() -> HashMap<Channel, String> {
    Channel::ALL
        .into_iter()
        .map(|c| (c, format!("{} theme", c.folder())))
        .collect()
}

#[test]
fn test_curation_errors_block_and_warnings_pass() {
    let mut curation = Curation::new();
    curation.insert(
        Channel::AmazonHome,
        FranchiseDraft {
            products: vec![product("H1", "Northwind")],
            alt_asins: vec![],
        },
    );
    curation.insert(
        Channel::AmazonFashion,
        FranchiseDraft {
            products: vec![product("F1", "northwind ")],
            alt_asins: vec![],
        },
    );
    let report = validate_curation(&curation);
    assert!(report.errors.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.can_proceed());

    curation
        .get_mut(&Channel::AmazonHome)
        .unwrap()
        .products
        .push(product("H1", "Other"));
    assert!(!validate_curation(&curation).can_proceed());
}

#[test]
fn test_session_runs_all_steps() {
    let mut session = CampaignSession::new(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
    session.approve_themes(approved()).unwrap();

    let mut curation = Curation::new();
    curation.insert(
        Channel::AmazonCa,
        FranchiseDraft {
            products: vec![product("C1", "Maple"), product("C2", "Birch")],
            alt_asins: vec![AltAsin {
                asin: "CALT".to_string(),
                brand: "Maple".to_string(),
            }],
        },
    );
    session.submit_curation(curation).unwrap();

    let frames = session.generate().unwrap();
    assert_eq!(frames.len(), 8);
    assert_eq!(frames[7].filename, "Amazon_ca_FR/Frame_04_Collage.png");

    let reports = session.report().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].sheet_name, "Amazon_ca");
    assert_eq!(reports[0].frames.last().unwrap().frame, "Frame 4 (Collage)");
    assert_eq!(reports[0].alt_asins[0].asin, "CALT");
}

#[test]
fn test_back_keeps_payloads_and_allows_resubmission() {
    let mut session = CampaignSession::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    session.approve_themes(approved()).unwrap();

    let mut first = Curation::new();
    first.insert(
        Channel::Amazon,
        FranchiseDraft {
            products: vec![product("A1", "Solo")],
            alt_asins: vec![],
        },
    );
    session.submit_curation(first).unwrap();
    assert_eq!(session.step(), Step::Generate);

    assert_eq!(session.back(), Step::Curate);
    assert_eq!(session.curation()[&Channel::Amazon].products.len(), 1);

    let mut second = Curation::new();
    second.insert(
        Channel::Amazon,
        FranchiseDraft {
            products: vec![product("A1", "Solo"), product("A2", "Duo")],
            alt_asins: vec![],
        },
    );
    let report = session.submit_curation(second).unwrap();
    assert_eq!(report.ready_count, 2);
    assert_eq!(session.generate().unwrap().len(), 4);
}

#[test]
fn test_rejected_curation_reports_errors() {
    let mut session = CampaignSession::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    session.approve_themes(approved()).unwrap();

    let mut curation = Curation::new();
    let mut missing = product("X1", "Ghost");
    missing.image = None;
    curation.insert(
        Channel::AmazonBeauty,
        FranchiseDraft {
            products: vec![missing],
            alt_asins: vec![],
        },
    );

    match session.submit_curation(curation) {
        Err(SessionError::CurationRejected(report)) => {
            assert_eq!(
                report.errors,
                vec!["Missing images for: @AmazonBeauty Product 1 (X1)"]
            );
        }
        other => panic!("expected rejection, got {:?}", other.map(|r| r.ready_count)),
    }
}
