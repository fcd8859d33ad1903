use crate::backend::BackendError;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
/// Remote procedure `get_payment_link(discount_percentage)`.
///
/// Each discount tier may route to a different hosted payment page.
/// Returns `None` when no link is configured for the tier.
pub struct GetPaymentLink {
    pub discount_percentage: Decimal,
}

impl Processor<GetPaymentLink> for DatabaseProcessor {
    type Output = Option<String>;
    type Error = BackendError;
    #[tracing::instrument(skip_all, err, name = "SQL:GetPaymentLink")]
    async fn process(&self, query: GetPaymentLink) -> Result<Option<String>, BackendError> {
        let link = sqlx::query_scalar::<_, Option<String>>("SELECT get_payment_link($1)")
            .bind(query.discount_percentage)
            .fetch_one(&self.pool)
            .await?;
        Ok(link)
    }
}
