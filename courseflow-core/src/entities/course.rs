use crate::backend::BackendError;
use crate::entities::CourseLevel;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A published course as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CourseRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub category: String,
    pub level: CourseLevel,
    pub icon: String,
    /// Price of the cheapest package.
    pub price: Decimal,
    pub enrolled_count: i64,
    pub created_at: time::PrimitiveDateTime,
}

/// A purchasable package of a course. The price here is the only source
/// of the checkout's original price.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CourseOffer {
    pub course_id: Uuid,
    pub title: String,
    pub package: String,
    pub price: Decimal,
}

#[derive(Debug, Clone)]
/// Look up one package of a published course.
pub struct GetCourseOffer {
    pub course_id: Uuid,
    pub package: String,
}

impl Processor<GetCourseOffer> for DatabaseProcessor {
    type Output = Option<CourseOffer>;
    type Error = BackendError;
    #[tracing::instrument(skip_all, err, name = "SQL:GetCourseOffer")]
    async fn process(&self, query: GetCourseOffer) -> Result<Option<CourseOffer>, BackendError> {
        let offer = sqlx::query_as::<_, CourseOffer>(
            r#"
            SELECT
                c.id AS course_id,
                c.title,
                p.variant AS package,
                p.price
            FROM courses c
            JOIN course_packages p ON p.course_id = c.id
            WHERE c.id = $1
              AND p.variant = $2
              AND c.published = true
            "#,
        )
        .bind(query.course_id)
        .bind(query.package)
        .fetch_optional(&self.pool)
        .await?;
        Ok(offer)
    }
}

#[derive(Debug, Clone)]
/// List every published course. Filtering and sorting happen in
/// [`crate::catalog`].
pub struct ListPublishedCourses;

impl Processor<ListPublishedCourses> for DatabaseProcessor {
    type Output = Vec<CourseRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListPublishedCourses")]
    async fn process(&self, _query: ListPublishedCourses) -> Result<Vec<CourseRecord>, sqlx::Error> {
        sqlx::query_as::<_, CourseRecord>(
            r#"
            SELECT
                c.id,
                c.slug,
                c.title,
                c.category,
                c.level,
                c.icon,
                MIN(p.price) AS price,
                (SELECT COUNT(*) FROM enrollments e WHERE e.course_id = c.id) AS enrolled_count,
                c.created_at
            FROM courses c
            JOIN course_packages p ON p.course_id = c.id
            WHERE c.published = true
            GROUP BY c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
