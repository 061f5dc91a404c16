use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewSource {
    Google,
    Trustpilot,
    Facebook,
    #[serde(other)]
    Other,
}

/// A review imported from a third-party platform. `decrypted` is set by the
/// backend once it has classified the review as a genuine five-star one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub author_name: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    pub source: ReviewSource,
    #[serde(default)]
    pub decrypted: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
}

impl Review {
    pub fn is_decrypted_five_star(&self) -> bool {
        self.decrypted && self.rating == 5
    }
}

/// Figures shown on the reviews dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub count: usize,
    pub average: Option<f64>,
    pub five_star: usize,
    pub decrypted: usize,
}

impl ReviewSummary {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let count = reviews.len();
        let average = (count > 0).then(|| {
            let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
            // one decimal, as displayed
            (f64::from(total) / count as f64 * 10.0).round() / 10.0
        });
        Self {
            count,
            average,
            five_star: reviews.iter().filter(|r| r.rating == 5).count(),
            decrypted: reviews.iter().filter(|r| r.is_decrypted_five_star()).count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibilityStats {
    #[serde(default)]
    pub profile_views: u64,
    #[serde(default)]
    pub search_appearances: u64,
    #[serde(default)]
    pub website_clicks: u64,
    #[serde(default)]
    pub phone_clicks: u64,
}

impl VisibilityStats {
    /// Share of search appearances that led to a profile view, in percent.
    pub fn view_rate(&self) -> Option<f64> {
        (self.search_appearances > 0)
            .then(|| self.profile_views as f64 * 100.0 / self.search_appearances as f64)
    }
}
