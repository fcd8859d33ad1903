use crate::backend::BackendError;
use crate::entities::TransactionStatus;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone)]
/// Record a payment attempt against an enrollment.
pub struct InsertTransaction {
    pub enrollment_id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub status: TransactionStatus,
}

impl Processor<InsertTransaction> for DatabaseProcessor {
    type Output = Uuid;
    type Error = BackendError;
    #[tracing::instrument(skip_all, err, name = "SQL:InsertTransaction")]
    async fn process(&self, cmd: InsertTransaction) -> Result<Uuid, BackendError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO transactions (enrollment_id, user_id, amount, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(cmd.enrollment_id)
        .bind(cmd.user_id)
        .bind(cmd.amount)
        .bind(cmd.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }
}
