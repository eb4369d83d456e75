// Adforge marketing asset compositor

pub mod asset;
pub mod background;
pub mod banner;
pub mod campaign;
pub mod compose;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod retry;
pub mod search;
pub mod story;
pub mod text;
pub mod themes;
