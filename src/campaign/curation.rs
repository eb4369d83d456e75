//! Product curation and validation

use crate::constants::{
    ALT_ASINS_PER_FRANCHISE, MISSING_IMAGE_LIST_MAX, PRIMARY_ASINS_PER_FRANCHISE,
};
use crate::story::{Channel, ProductEntry};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A product row as entered during curation
///
/// Rows without an ASIN are treated as blank and ignored.
#[derive(Clone, Default)]
pub struct ProductDraft {
    pub asin: String,
    pub brand: String,
    pub product_name: String,
    pub copy: String,
    pub image: Option<RgbaImage>,
    pub mcid: String,
    pub launch_date: String,
    pub wbr_team: String,
    pub account_rep: String,
}

impl std::fmt::Debug for ProductDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductDraft")
            .field("asin", &self.asin)
            .field("brand", &self.brand)
            .field("product_name", &self.product_name)
            .field("image", &self.image.as_ref().map(|img| img.dimensions()))
            .finish()
    }
}

impl ProductDraft {
    pub fn has_asin(&self) -> bool {
        !self.asin.trim().is_empty()
    }

    /// Has both an ASIN and an image
    pub fn is_ready(&self) -> bool {
        self.has_asin() && self.image.is_some()
    }

    /// Engine input for a ready product
    pub fn to_entry(&self) -> Option<ProductEntry> {
        if !self.has_asin() {
            return None;
        }
        let image = self.image.clone()?;
        Some(ProductEntry {
            asin: self.asin.trim().to_string(),
            brand: self.brand.clone(),
            product_name: self.product_name.clone(),
            copy: self.copy.clone(),
            image,
        })
    }
}

/// Backup product listed in the report only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltAsin {
    pub asin: String,
    #[serde(default)]
    pub brand: String,
}

/// Everything curated for one channel
#[derive(Debug, Clone, Default)]
pub struct FranchiseDraft {
    pub products: Vec<ProductDraft>,
    pub alt_asins: Vec<AltAsin>,
}

impl FranchiseDraft {
    pub fn ready_products(&self) -> impl Iterator<Item = &ProductDraft> {
        self.products.iter().filter(|p| p.is_ready())
    }
}

/// Curated products keyed by channel
pub type Curation = BTreeMap<Channel, FranchiseDraft>;

/// Validation outcome; errors block generation, warnings do not
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CurationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Products with an ASIN and an image, across all channels
    pub ready_count: usize,
}

impl CurationReport {
    /// Generation may proceed
    pub fn can_proceed(&self) -> bool {
        self.errors.is_empty() && self.ready_count > 0
    }
}

/// Check a curation before generation.
pub fn validate_curation(curation: &Curation) -> CurationReport {
    let mut report = CurationReport::default();

    for (channel, franchise) in curation {
        let mut seen = BTreeSet::new();
        let mut dupes = BTreeSet::new();
        for product in franchise.products.iter().filter(|p| p.has_asin()) {
            let asin = product.asin.trim();
            if !seen.insert(asin) {
                dupes.insert(asin);
            }
        }
        if !dupes.is_empty() {
            report.errors.push(format!(
                "{}: Duplicate ASINs within franchise: {}",
                channel,
                dupes.into_iter().collect::<Vec<_>>().join(", ")
            ));
        }

        let entered = franchise.products.iter().filter(|p| p.has_asin()).count();
        if entered > PRIMARY_ASINS_PER_FRANCHISE {
            report.warnings.push(format!(
                "{}: {} products entered, {} planned per franchise",
                channel, entered, PRIMARY_ASINS_PER_FRANCHISE
            ));
        }
        let alts = franchise.alt_asins.iter().filter(|a| !a.asin.trim().is_empty()).count();
        if alts > ALT_ASINS_PER_FRANCHISE {
            report.warnings.push(format!(
                "{}: {} alternative ASINs entered, {} planned per franchise",
                channel, alts, ALT_ASINS_PER_FRANCHISE
            ));
        }
    }

    let mut us_brands: BTreeMap<String, BTreeSet<Channel>> = BTreeMap::new();
    for (channel, franchise) in curation.iter().filter(|(c, _)| c.is_us()) {
        for product in &franchise.products {
            let brand = product.brand.trim().to_lowercase();
            if !brand.is_empty() {
                us_brands.entry(brand).or_default().insert(*channel);
            }
        }
    }
    for (brand, channels) in us_brands {
        if channels.len() > 1 {
            let handles: Vec<_> = channels.iter().map(Channel::handle).collect();
            report.warnings.push(format!(
                "Brand \"{}\" appears in multiple US franchises: {}",
                brand,
                handles.join(", ")
            ));
        }
    }

    let mut missing_images = Vec::new();
    for (channel, franchise) in curation {
        for (i, product) in franchise.products.iter().enumerate() {
            if product.has_asin() && product.image.is_none() {
                missing_images.push(format!(
                    "{} Product {} ({})",
                    channel,
                    i + 1,
                    product.asin.trim()
                ));
            }
        }
    }
    if !missing_images.is_empty() {
        let mut message = format!(
            "Missing images for: {}",
            missing_images
                .iter()
                .take(MISSING_IMAGE_LIST_MAX)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
        if missing_images.len() > MISSING_IMAGE_LIST_MAX {
            message.push_str(&format!(
                " and {} more",
                missing_images.len() - MISSING_IMAGE_LIST_MAX
            ));
        }
        report.errors.push(message);
    }

    report.ready_count = curation.values().map(|f| f.ready_products().count()).sum();
    report
}

/// Engine inputs for every channel with at least one ready product
pub fn ready_franchises(curation: &Curation) -> BTreeMap<Channel, Vec<ProductEntry>> {
    curation
        .iter()
        .filter_map(|(channel, franchise)| {
            let entries: Vec<_> = franchise.products.iter().filter_map(ProductDraft::to_entry).collect();
            if entries.is_empty() {
                None
            } else {
                Some((*channel, entries))
            }
        })
        .collect()
}
