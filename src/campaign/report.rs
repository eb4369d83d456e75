//! Franchise reporting rows
//!
//! One report per channel, mirroring the generated frame sequence so the
//! rows line up with the exported frames. Writing the rows to a
//! spreadsheet happens outside this crate; reports serialize with serde.

use super::curation::{Curation, ProductDraft};
use crate::constants::REPORT_SHEET_NAME_MAX_CHARS;
use crate::story::Channel;
use serde::Serialize;

/// Column headers of the frame table
pub const FRAME_HEADERS: [&str; 8] = [
    "Frame #",
    "Child ASIN",
    "Brand",
    "Product Name",
    "MCID",
    "ASIN Site Launch Date",
    "WBR Team",
    "Account Rep",
];

/// Column headers of the alternative-ASIN table
pub const ALT_ASIN_HEADERS: [&str; 3] = ["#", "ASIN", "Brand"];

/// Placeholder ASIN for collage frames
pub const COLLAGE_ASIN: &str = "\u{2014}";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrameRow {
    pub frame: String,
    pub child_asin: String,
    pub brand: String,
    pub product_name: String,
    pub mcid: String,
    pub launch_date: String,
    pub wbr_team: String,
    pub account_rep: String,
}

impl FrameRow {
    fn collage(frame_number: usize) -> Self {
        FrameRow {
            frame: format!("Frame {} (Collage)", frame_number),
            child_asin: COLLAGE_ASIN.to_string(),
            ..Default::default()
        }
    }

    fn product(frame_number: usize, product: &ProductDraft) -> Self {
        FrameRow {
            frame: format!("Frame {}", frame_number),
            child_asin: product.asin.trim().to_string(),
            brand: product.brand.clone(),
            product_name: product.product_name.clone(),
            mcid: product.mcid.clone(),
            launch_date: product.launch_date.clone(),
            wbr_team: product.wbr_team.clone(),
            account_rep: product.account_rep.clone(),
        }
    }

    /// Cells in [`FRAME_HEADERS`] order
    pub fn cells(&self) -> [&str; 8] {
        [
            self.frame.as_str(),
            self.child_asin.as_str(),
            self.brand.as_str(),
            self.product_name.as_str(),
            self.mcid.as_str(),
            self.launch_date.as_str(),
            self.wbr_team.as_str(),
            self.account_rep.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AltAsinRow {
    /// 1-based position in the entered list, blanks included
    pub index: usize,
    pub asin: String,
    pub brand: String,
}

impl AltAsinRow {
    /// Cells in [`ALT_ASIN_HEADERS`] order
    pub fn cells(&self) -> [String; 3] {
        [self.index.to_string(), self.asin.clone(), self.brand.clone()]
    }
}

/// Header row plus string rows, the shape a spreadsheet writer consumes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn new<I, R, C>(headers: &[&str], rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }
}

/// One named sheet with its frame and alternative-ASIN tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSheet {
    pub sheet_name: String,
    pub channel: Channel,
    pub frames: Table,
    pub alt_asins: Table,
}

/// Report sheet for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FranchiseReport {
    pub channel: Channel,
    pub sheet_name: String,
    pub frames: Vec<FrameRow>,
    pub alt_asins: Vec<AltAsinRow>,
}

impl FranchiseReport {
    /// Tabulate the rows under [`FRAME_HEADERS`] and [`ALT_ASIN_HEADERS`].
    pub fn to_sheet(&self) -> ReportSheet {
        ReportSheet {
            sheet_name: self.sheet_name.clone(),
            channel: self.channel,
            frames: Table::new(&FRAME_HEADERS, self.frames.iter().map(FrameRow::cells)),
            alt_asins: Table::new(&ALT_ASIN_HEADERS, self.alt_asins.iter().map(AltAsinRow::cells)),
        }
    }
}

/// Channel folder name cut to the spreadsheet sheet-name limit
pub fn sheet_name(channel: Channel) -> String {
    channel.folder().chars().take(REPORT_SHEET_NAME_MAX_CHARS).collect()
}

/// Reports for every channel with at least one product ASIN, in channel order.
pub fn build_reports(curation: &Curation) -> Vec<FranchiseReport> {
    let mut reports = Vec::new();
    for (channel, franchise) in curation {
        let products: Vec<_> = franchise.products.iter().filter(|p| p.has_asin()).collect();
        if products.is_empty() {
            continue;
        }

        let mut frames = Vec::with_capacity(products.len() + 2);
        frames.push(FrameRow::collage(1));
        for (i, product) in products.iter().enumerate() {
            frames.push(FrameRow::product(i + 2, product));
        }
        frames.push(FrameRow::collage(products.len() + 2));

        let alt_asins = franchise
            .alt_asins
            .iter()
            .enumerate()
            .filter(|(_, alt)| !alt.asin.trim().is_empty())
            .map(|(j, alt)| AltAsinRow {
                index: j + 1,
                asin: alt.asin.trim().to_string(),
                brand: alt.brand.clone(),
            })
            .collect();

        reports.push(FranchiseReport {
            channel: *channel,
            sheet_name: sheet_name(*channel),
            frames,
            alt_asins,
        });
    }
    reports
}
