//! Course catalog filtering and ordering.

use courseflow_sdk::objects::{CourseIcon, CourseSort, CourseSummary, ListCoursesQuery};

use crate::entities::course::CourseRecord;

impl From<CourseRecord> for CourseSummary {
    fn from(record: CourseRecord) -> Self {
        Self {
            id: record.id,
            icon: CourseIcon::from_name(&record.icon),
            slug: record.slug,
            title: record.title,
            category: record.category,
            level: record.level.into(),
            price: record.price,
            enrolled_count: record.enrolled_count,
            created_at: record.created_at.assume_utc().unix_timestamp(),
        }
    }
}

/// Apply the catalog filters and sort order to published courses.
///
/// Blank `category` or `search` values, and the category `"all"`, do not
/// filter anything.
pub fn select(records: Vec<CourseRecord>, query: &ListCoursesQuery) -> Vec<CourseSummary> {
    let category = non_blank(query.category.as_deref())
        .filter(|c| !c.eq_ignore_ascii_case("all"))
        .map(str::to_lowercase);
    let search = non_blank(query.search.as_deref()).map(str::to_lowercase);

    let mut courses: Vec<CourseSummary> = records
        .into_iter()
        .map(CourseSummary::from)
        .filter(|course| {
            category
                .as_deref()
                .is_none_or(|c| course.category.to_lowercase() == c)
        })
        .filter(|course| query.level.is_none_or(|level| course.level == level))
        .filter(|course| query.max_price.is_none_or(|max| course.price <= max))
        .filter(|course| {
            search.as_deref().is_none_or(|needle| {
                course.title.to_lowercase().contains(needle)
                    || course.category.to_lowercase().contains(needle)
            })
        })
        .collect();

    match query.sort {
        CourseSort::Newest => courses.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        CourseSort::PriceLowToHigh => courses.sort_by(|a, b| a.price.cmp(&b.price)),
        CourseSort::PriceHighToLow => courses.sort_by(|a, b| b.price.cmp(&a.price)),
        CourseSort::Title => courses.sort_by_cached_key(|c| c.title.to_lowercase()),
        CourseSort::Popular => courses.sort_by(|a, b| {
            b.enrolled_count
                .cmp(&a.enrolled_count)
                .then_with(|| a.title.cmp(&b.title))
        }),
    }
    courses
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CourseLevel;
    use courseflow_sdk::objects::CourseLevel as SdkCourseLevel;
    use rust_decimal::Decimal;
    use time::{Date, Month, PrimitiveDateTime, Time};
    use uuid::Uuid;

    fn course(
        title: &str,
        category: &str,
        level: CourseLevel,
        price: i64,
        enrolled: i64,
        day: u8,
    ) -> CourseRecord {
        CourseRecord {
            id: Uuid::new_v4(),
            slug: title.to_lowercase().replace(' ', "-"),
            title: title.to_owned(),
            category: category.to_owned(),
            level,
            icon: "code".to_owned(),
            price: Decimal::from(price),
            enrolled_count: enrolled,
            created_at: PrimitiveDateTime::new(
                Date::from_calendar_date(2026, Month::January, day).unwrap(),
                Time::MIDNIGHT,
            ),
        }
    }

    fn catalog() -> Vec<CourseRecord> {
        vec![
            course("Rust Basics", "Programming", CourseLevel::Beginner, 4999, 120, 3),
            course("Advanced SQL", "Data", CourseLevel::Advanced, 7999, 40, 10),
            course("Machine Learning", "Data", CourseLevel::Intermediate, 12999, 300, 5),
            course("Cloud Foundations", "DevOps", CourseLevel::Beginner, 2999, 80, 20),
        ]
    }

    fn titles(courses: &[CourseSummary]) -> Vec<&str> {
        courses.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn test_default_is_newest_first() {
        let courses = select(catalog(), &ListCoursesQuery::default());
        assert_eq!(
            titles(&courses),
            vec!["Cloud Foundations", "Advanced SQL", "Machine Learning", "Rust Basics"]
        );
        assert_eq!(courses[0].icon, CourseIcon::Code);
    }

    #[test]
    fn test_filters_combine() {
        let query = ListCoursesQuery {
            category: Some("data".to_owned()),
            max_price: Some(Decimal::from(10000)),
            ..Default::default()
        };
        assert_eq!(titles(&select(catalog(), &query)), vec!["Advanced SQL"]);

        let query = ListCoursesQuery {
            level: Some(SdkCourseLevel::Beginner),
            sort: CourseSort::PriceLowToHigh,
            ..Default::default()
        };
        assert_eq!(
            titles(&select(catalog(), &query)),
            vec!["Cloud Foundations", "Rust Basics"]
        );
    }

    #[test]
    fn test_search_matches_title_or_category() {
        let query = ListCoursesQuery {
            search: Some("  DEVOPS ".to_owned()),
            ..Default::default()
        };
        assert_eq!(titles(&select(catalog(), &query)), vec!["Cloud Foundations"]);

        let query = ListCoursesQuery {
            search: Some("rust".to_owned()),
            ..Default::default()
        };
        assert_eq!(titles(&select(catalog(), &query)), vec!["Rust Basics"]);
    }

    #[test]
    fn test_all_category_and_blank_values_do_not_filter() {
        let query = ListCoursesQuery {
            category: Some("All".to_owned()),
            search: Some("   ".to_owned()),
            ..Default::default()
        };
        assert_eq!(select(catalog(), &query).len(), 4);
    }

    #[test]
    fn test_sort_orders() {
        let by = |sort| {
            let query = ListCoursesQuery {
                sort,
                ..Default::default()
            };
            titles(&select(catalog(), &query))
                .into_iter()
                .map(str::to_owned)
                .collect::<Vec<_>>()
        };
        assert_eq!(by(CourseSort::PriceHighToLow)[0], "Machine Learning");
        assert_eq!(by(CourseSort::Popular)[0], "Machine Learning");
        assert_eq!(by(CourseSort::Popular)[3], "Advanced SQL");
        assert_eq!(
            by(CourseSort::Title),
            vec!["Advanced SQL", "Cloud Foundations", "Machine Learning", "Rust Basics"]
        );
    }
}
