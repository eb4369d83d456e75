//! Story campaign workflow
//!
//! Ties theme research, product curation, frame generation and reporting
//! together for a full "Just Dropped" run across all five channels.

pub mod curation;
pub mod report;
pub mod session;

pub use curation::{
    ready_franchises, validate_curation, AltAsin, Curation, CurationReport, FranchiseDraft,
    ProductDraft,
};
pub use report::{
    build_reports, sheet_name, AltAsinRow, FrameRow, FranchiseReport, ReportSheet, Table,
    ALT_ASIN_HEADERS, FRAME_HEADERS,
};
pub use session::{CampaignSession, SessionError, Step};
