//! Content module - turns CMS documents into the shapes the pages render

pub mod detail;
pub mod listing;
mod post;

use chrono_tz::Tz;

pub use detail::{fetch_detail, project_detail};
pub use listing::{fetch_listing, fetch_next_page, listing_options, project_listing, LISTING_PAGE_SIZE};
pub use post::{
    Banner, Paragraph, PostData, PostDetail, PostSummary, PostUid, PostsPagination, Section,
    SummaryData,
};

use crate::config::SiteConfig;
use crate::error::ContentError;
use crate::helpers::{normalize_date, DateLocale, PT_BR};

/// How publication dates are displayed
#[derive(Debug, Clone, Copy)]
pub struct DateStyle {
    pub locale: &'static DateLocale,
    pub tz: Tz,
}

impl Default for DateStyle {
    fn default() -> Self {
        Self {
            locale: &PT_BR,
            tz: Tz::UTC,
        }
    }
}

impl DateStyle {
    pub fn from_config(config: &SiteConfig) -> anyhow::Result<Self> {
        Ok(Self {
            locale: config.date_locale()?,
            tz: config.tz()?,
        })
    }

    /// Normalize an optional CMS timestamp
    pub fn format(&self, raw: Option<&str>) -> Result<Option<String>, ContentError> {
        normalize_date(raw, self.locale, &self.tz)
    }
}
