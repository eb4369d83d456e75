//! Job files
//!
//! A job describes one generation run in YAML. Image paths are resolved
//! relative to the job file, and `${VAR}` references are substituted the
//! same way as in the application config.
//!
//! ```yaml
//! # banners
//! brand_name: Acme Outdoor
//! brand_abbrev: ACME
//! logo: images/logo.png
//! product: images/tent.png
//! headline_eng: Gear up for the weekend
//! headline_esp: Prepárate para el fin de semana
//! bg_color: "#d9f69e"
//! region: us
//! remove_background: true
//! ```

use super::substitute_env;
use crate::background::BackgroundRemover;
use crate::banner::{BrandConfig, Region};
use crate::campaign::{AltAsin, Curation, FranchiseDraft, ProductDraft};
use crate::compose::{hex_to_rgb, load_image, Color};
use crate::constants::DEFAULT_BANNER_BG_HEX;
use crate::error::AdError;
use crate::search::fetch_image;
use crate::story::Channel;
use chrono::NaiveDate;
use image::RgbaImage;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

fn read_job<T: DeserializeOwned>(path: &Path) -> Result<T, AdError> {
    let yaml = std::fs::read_to_string(path).map_err(|e| {
        AdError::Config(format!("Failed to read job file {}: {}", path.display(), e))
    })?;
    parse_job(&yaml)
}

fn parse_job<T: DeserializeOwned>(yaml: &str) -> Result<T, AdError> {
    let substituted = substitute_env(yaml)?;
    serde_yaml::from_str(&substituted).map_err(|e| AdError::Config(format!("Invalid job: {}", e)))
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// One brand's banner run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerJob {
    pub brand_name: String,
    pub brand_abbrev: String,
    pub logo: PathBuf,
    pub product: PathBuf,
    pub headline_eng: String,
    pub headline_esp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<Color>,
    /// Naming set to produce; both when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    /// Key out the white studio background of the product image
    #[serde(default)]
    pub remove_background: bool,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl BannerJob {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AdError> {
        let path = path.as_ref();
        let mut job: BannerJob = read_job(path)?;
        job.base_dir = parent_dir(path);
        Ok(job)
    }

    /// Parse a job whose relative image paths start at `base_dir`
    pub fn from_yaml(yaml: &str, base_dir: &Path) -> Result<Self, AdError> {
        let mut job: BannerJob = parse_job(yaml)?;
        job.base_dir = base_dir.to_path_buf();
        Ok(job)
    }

    pub fn logo_path(&self) -> PathBuf {
        resolve(&self.base_dir, &self.logo)
    }

    pub fn product_path(&self) -> PathBuf {
        resolve(&self.base_dir, &self.product)
    }

    /// Load the images and build a validated [`BrandConfig`].
    pub fn to_brand_config(&self, remover: &dyn BackgroundRemover) -> Result<BrandConfig, AdError> {
        let bg_color = match self.bg_color {
            Some(color) => color,
            None => hex_to_rgb(DEFAULT_BANNER_BG_HEX)?,
        };

        let logo_image = load_image(&self.logo_path())?;
        let mut product_image = load_image(&self.product_path())?;
        if self.remove_background {
            product_image = remover.remove(&product_image);
        }

        let cfg = BrandConfig {
            brand_name: self.brand_name.clone(),
            brand_abbrev: self.brand_abbrev.clone(),
            logo_image,
            product_image,
            headline_eng: self.headline_eng.clone(),
            headline_esp: self.headline_esp.clone(),
            bg_color,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

/// One product of a story franchise
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductJob {
    pub asin: String,
    pub brand: String,
    pub product_name: String,
    pub copy: String,
    /// Local image, relative to the job file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
    /// Remote image, used when no local path is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub remove_background: bool,
    pub mcid: String,
    pub launch_date: String,
    pub wbr_team: String,
    pub account_rep: String,
}

/// Products and backups for one channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FranchiseJob {
    pub channel: Channel,
    /// Approved theme name; "Just Dropped" when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default)]
    pub products: Vec<ProductJob>,
    #[serde(default)]
    pub alt_asins: Vec<AltAsin>,
}

/// A story campaign run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryJob {
    pub franchises: Vec<FranchiseJob>,
    /// Date for month labels and seasons; today when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl StoryJob {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AdError> {
        let path = path.as_ref();
        let mut job: StoryJob = read_job(path)?;
        job.base_dir = parent_dir(path);
        job.check_channels()?;
        Ok(job)
    }

    /// Parse a job whose relative image paths start at `base_dir`
    pub fn from_yaml(yaml: &str, base_dir: &Path) -> Result<Self, AdError> {
        let mut job: StoryJob = parse_job(yaml)?;
        job.base_dir = base_dir.to_path_buf();
        job.check_channels()?;
        Ok(job)
    }

    fn check_channels(&self) -> Result<(), AdError> {
        let mut seen = Vec::with_capacity(self.franchises.len());
        for franchise in &self.franchises {
            if seen.contains(&franchise.channel) {
                return Err(AdError::Config(format!(
                    "Channel {} appears more than once",
                    franchise.channel
                )));
            }
            seen.push(franchise.channel);
        }
        Ok(())
    }

    /// Theme names set in the job
    pub fn theme_names(&self) -> HashMap<Channel, String> {
        self.franchises
            .iter()
            .filter_map(|f| {
                f.theme
                    .as_ref()
                    .filter(|t| !t.trim().is_empty())
                    .map(|t| (f.channel, t.trim().to_string()))
            })
            .collect()
    }

    /// Load product images and build the curation.
    ///
    /// Unreadable local files are errors. A remote image that cannot be
    /// fetched leaves the product without an image, which curation
    /// validation reports.
    pub fn to_curation(&self, remover: &dyn BackgroundRemover) -> Result<Curation, AdError> {
        let mut curation = Curation::new();
        for franchise in &self.franchises {
            let mut products = Vec::with_capacity(franchise.products.len());
            for product in &franchise.products {
                products.push(self.load_product(product, remover)?);
            }
            curation.insert(
                franchise.channel,
                FranchiseDraft {
                    products,
                    alt_asins: franchise.alt_asins.clone(),
                },
            );
        }
        Ok(curation)
    }

    fn load_product(
        &self,
        product: &ProductJob,
        remover: &dyn BackgroundRemover,
    ) -> Result<ProductDraft, AdError> {
        let image = self.load_product_image(product)?.map(|img| {
            if product.remove_background {
                remover.remove(&img)
            } else {
                img
            }
        });
        debug!(
            asin = %product.asin,
            has_image = image.is_some(),
            "Loaded product"
        );

        Ok(ProductDraft {
            asin: product.asin.clone(),
            brand: product.brand.clone(),
            product_name: product.product_name.clone(),
            copy: product.copy.clone(),
            image,
            mcid: product.mcid.clone(),
            launch_date: product.launch_date.clone(),
            wbr_team: product.wbr_team.clone(),
            account_rep: product.account_rep.clone(),
        })
    }

    fn load_product_image(&self, product: &ProductJob) -> Result<Option<RgbaImage>, AdError> {
        if let Some(path) = &product.image {
            return load_image(&resolve(&self.base_dir, path)).map(Some);
        }
        Ok(product.image_url.as_deref().and_then(fetch_image))
    }
}
