//! Story copy that changes with language: titles and month labels.

use chrono::{Datelike, NaiveDate};

/// Language of a story frame set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoryLang {
    En,
    Fr,
}

impl StoryLang {
    /// Collage title
    pub fn title(&self) -> &'static str {
        match self {
            StoryLang::En => "Just Dropped",
            StoryLang::Fr => "Tout juste sorti",
        }
    }

    /// Lowercase month name for `date`
    pub fn month_label(&self, date: NaiveDate) -> &'static str {
        let idx = date.month0() as usize;
        match self {
            StoryLang::En => EN_MONTHS[idx],
            StoryLang::Fr => FR_MONTHS[idx],
        }
    }

    /// Folder suffix appended to the channel folder
    pub fn folder_suffix(&self) -> &'static str {
        match self {
            StoryLang::En => "",
            StoryLang::Fr => "_FR",
        }
    }
}

const EN_MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

const FR_MONTHS: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];
