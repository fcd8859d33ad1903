use crate::backend::BackendError;
use crate::entities::PaymentStatus;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A purchase record linking a buyer, a course package and price terms.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct EnrollmentRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub package: String,
    pub original_price: Decimal,
    pub coupon_code: Option<String>,
    pub discount_percentage: Decimal,
    pub final_price: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_link: Option<String>,
    pub created_at: time::PrimitiveDateTime,
}

#[derive(Debug, Clone)]
/// Create an enrollment. Returns the generated id.
pub struct InsertEnrollment {
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub package: String,
    pub original_price: Decimal,
    pub coupon_code: Option<String>,
    pub discount_percentage: Decimal,
    pub final_price: Decimal,
    pub payment_status: PaymentStatus,
}

impl Processor<InsertEnrollment> for DatabaseProcessor {
    type Output = Uuid;
    type Error = BackendError;
    #[tracing::instrument(skip_all, err, name = "SQL:InsertEnrollment")]
    async fn process(&self, cmd: InsertEnrollment) -> Result<Uuid, BackendError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO enrollments (
                user_id, course_id, package, original_price,
                coupon_code, discount_percentage, final_price, payment_status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(cmd.user_id)
        .bind(cmd.course_id)
        .bind(cmd.package)
        .bind(cmd.original_price)
        .bind(cmd.coupon_code)
        .bind(cmd.discount_percentage)
        .bind(cmd.final_price)
        .bind(cmd.payment_status)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }
}

#[derive(Debug, Clone)]
/// Store the resolved payment link on an enrollment.
pub struct AttachPaymentLink {
    pub enrollment_id: Uuid,
    pub payment_link: String,
}

impl Processor<AttachPaymentLink> for DatabaseProcessor {
    type Output = ();
    type Error = BackendError;
    #[tracing::instrument(skip_all, err, name = "SQL:AttachPaymentLink")]
    async fn process(&self, cmd: AttachPaymentLink) -> Result<(), BackendError> {
        let result = sqlx::query(
            r#"
            UPDATE enrollments
            SET payment_link = $2
            WHERE id = $1
            "#,
        )
        .bind(cmd.enrollment_id)
        .bind(cmd.payment_link)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(BackendError::NotFound("enrollment"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// List enrollments, newest first.
pub struct ListEnrollments {
    pub limit: i64,
    pub offset: i64,
    pub payment_status: Option<PaymentStatus>,
}

impl Processor<ListEnrollments> for DatabaseProcessor {
    type Output = Vec<EnrollmentRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListEnrollments")]
    async fn process(&self, query: ListEnrollments) -> Result<Vec<EnrollmentRecord>, sqlx::Error> {
        sqlx::query_as::<_, EnrollmentRecord>(
            r#"
            SELECT
                id, user_id, course_id, package, original_price, coupon_code,
                discount_percentage, final_price, payment_status, payment_link, created_at
            FROM enrollments
            WHERE ($1::payment_status IS NULL OR payment_status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(query.payment_status)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
    }
}
