//! Course catalog types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Icon shown next to a course card.
///
/// Course rows store an icon *name*; this is the closed set of names the
/// frontend knows how to render. Unknown names fall back to [`CourseIcon::BookOpen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseIcon {
    BookOpen,
    Code,
    Database,
    Brain,
    ChartBar,
    Cloud,
    Shield,
    Smartphone,
    Palette,
    TrendingUp,
}

impl CourseIcon {
    /// Resolve a stored icon name. Accepts `kebab-case`, `snake_case` and
    /// `PascalCase` spellings.
    pub fn from_name(name: &str) -> Self {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "code" | "code2" | "terminal" => CourseIcon::Code,
            "database" => CourseIcon::Database,
            "brain" | "cpu" => CourseIcon::Brain,
            "chartbar" | "barchart" => CourseIcon::ChartBar,
            "cloud" => CourseIcon::Cloud,
            "shield" | "lock" => CourseIcon::Shield,
            "smartphone" | "mobile" => CourseIcon::Smartphone,
            "palette" | "brush" => CourseIcon::Palette,
            "trendingup" => CourseIcon::TrendingUp,
            _ => CourseIcon::BookOpen,
        }
    }
}

/// A published course as listed in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub category: String,
    pub level: CourseLevel,
    pub icon: CourseIcon,
    pub price: Decimal,
    pub enrolled_count: i64,
    /// Unix timestamp of when the course was published.
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseSort {
    #[default]
    Newest,
    PriceLowToHigh,
    PriceHighToLow,
    Title,
    Popular,
}

/// Query parameters for listing courses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCoursesQuery {
    pub category: Option<String>,
    pub level: Option<CourseLevel>,
    /// Case-insensitive substring match over title and category.
    pub search: Option<String>,
    pub max_price: Option<Decimal>,
    #[serde(default)]
    pub sort: CourseSort,
}
