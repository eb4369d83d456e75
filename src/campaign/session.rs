//! Four-step campaign workflow
//!
//! Theme → Curate → Generate → Report, with an approval gate between each
//! step. Moving back keeps everything entered so far, so a user can fix
//! curation after seeing the frames without redoing theme approval.

use super::curation::{ready_franchises, validate_curation, Curation, CurationReport};
use super::report::{build_reports, FranchiseReport};
use crate::asset::GeneratedAsset;
use crate::error::AdError;
use crate::search::WebSearch;
use crate::story::{generate_all_franchises_at, Channel};
use crate::themes::{research_themes, Theme};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Theme,
    Curate,
    Generate,
    Report,
}

impl Step {
    fn previous(self) -> Step {
        match self {
            Step::Theme | Step::Curate => Step::Theme,
            Step::Generate => Step::Curate,
            Step::Report => Step::Generate,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::Theme => "1. Theme",
            Step::Curate => "2. Products",
            Step::Generate => "3. Generate",
            Step::Report => "4. Report",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Action requires step {expected}, session is at {actual}")]
    WrongStep { expected: Step, actual: Step },

    #[error("No approved theme for: {}", .0.iter().map(Channel::handle).collect::<Vec<_>>().join(", "))]
    MissingThemes(Vec<Channel>),

    #[error("Curation rejected: {}", rejection_summary(.0))]
    CurationRejected(CurationReport),

    #[error("Generation failed: {0}")]
    Render(#[from] AdError),
}

fn rejection_summary(report: &CurationReport) -> String {
    if report.errors.is_empty() {
        "no products with an ASIN and an image".to_string()
    } else {
        report.errors.join("; ")
    }
}

/// State of one campaign run
#[derive(Debug)]
pub struct CampaignSession {
    step: Step,
    date: NaiveDate,
    proposals: BTreeMap<Channel, Vec<Theme>>,
    approved: HashMap<Channel, String>,
    curation: Curation,
    frames: Vec<GeneratedAsset>,
}

impl CampaignSession {
    /// New session; `date` drives seasons and month labels
    pub fn new(date: NaiveDate) -> Self {
        Self {
            step: Step::Theme,
            date,
            proposals: BTreeMap::new(),
            approved: HashMap::new(),
            curation: Curation::new(),
            frames: Vec::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn proposals(&self) -> &BTreeMap<Channel, Vec<Theme>> {
        &self.proposals
    }

    pub fn approved_themes(&self) -> &HashMap<Channel, String> {
        &self.approved
    }

    pub fn curation(&self) -> &Curation {
        &self.curation
    }

    pub fn frames(&self) -> &[GeneratedAsset] {
        &self.frames
    }

    fn require(&self, expected: Step) -> Result<(), SessionError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(SessionError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    /// Run trend research for every channel and keep the proposals.
    pub fn research(
        &mut self,
        search: &dyn WebSearch,
    ) -> Result<&BTreeMap<Channel, Vec<Theme>>, SessionError> {
        self.require(Step::Theme)?;
        self.proposals = research_themes(search, &Channel::ALL, self.date);
        Ok(&self.proposals)
    }

    /// Approve one theme name per channel and move to curation.
    ///
    /// Names may come from the proposals or be entered freely; blank names
    /// count as missing.
    pub fn approve_themes(&mut self, themes: HashMap<Channel, String>) -> Result<(), SessionError> {
        self.require(Step::Theme)?;
        let missing: Vec<Channel> = Channel::ALL
            .into_iter()
            .filter(|c| themes.get(c).map_or(true, |name| name.trim().is_empty()))
            .collect();
        if !missing.is_empty() {
            return Err(SessionError::MissingThemes(missing));
        }

        self.approved = themes
            .into_iter()
            .map(|(channel, name)| (channel, name.trim().to_string()))
            .collect();
        self.step = Step::Curate;
        Ok(())
    }

    /// Validate and store the curation, moving to generation when it passes.
    ///
    /// The returned report carries any warnings. A rejected curation is
    /// still stored so it can be corrected in place.
    pub fn submit_curation(&mut self, curation: Curation) -> Result<CurationReport, SessionError> {
        self.require(Step::Curate)?;
        let report = validate_curation(&curation);
        self.curation = curation;
        if !report.can_proceed() {
            return Err(SessionError::CurationRejected(report));
        }
        self.step = Step::Generate;
        Ok(report)
    }

    /// Render every franchise with ready products and move to reporting.
    pub fn generate(&mut self) -> Result<&[GeneratedAsset], SessionError> {
        self.require(Step::Generate)?;
        let franchises = ready_franchises(&self.curation);
        self.frames = generate_all_franchises_at(&franchises, &self.approved, self.date)?;
        info!(
            franchises = franchises.len(),
            frames = self.frames.len(),
            "Campaign frames generated"
        );
        self.step = Step::Report;
        Ok(&self.frames)
    }

    /// Report rows for the curated products.
    pub fn report(&self) -> Result<Vec<FranchiseReport>, SessionError> {
        self.require(Step::Report)?;
        Ok(build_reports(&self.curation))
    }

    /// Return to the previous step; a no-op at the first step.
    pub fn back(&mut self) -> Step {
        self.step = self.step.previous();
        self.step
    }
}
