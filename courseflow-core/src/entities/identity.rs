use crate::backend::BackendError;
use crate::framework::DatabaseProcessor;
use courseflow_sdk::objects::IdentityRecord;
use kanau::processor::Processor;
use uuid::Uuid;

#[derive(Debug, Clone)]
/// Insert or replace the buyer's KYC record.
///
/// Keyed by user id: a later submission overwrites the earlier one.
/// Empty optional fields are stored as NULL.
pub struct UpsertIdentityRecord {
    pub user_id: Uuid,
    pub record: IdentityRecord,
}

impl Processor<UpsertIdentityRecord> for DatabaseProcessor {
    type Output = ();
    type Error = BackendError;
    #[tracing::instrument(skip_all, err, name = "SQL:UpsertIdentityRecord")]
    async fn process(&self, cmd: UpsertIdentityRecord) -> Result<(), BackendError> {
        let UpsertIdentityRecord { user_id, record } = cmd;
        sqlx::query(
            r#"
            INSERT INTO kyc_records (
                user_id, full_name, email, phone, date_of_birth, gender,
                address_line1, address_line2, city, state, postal_code,
                tax_id, national_id, occupation, income_bracket
            )
            VALUES (
                $1, $2, $3, $4, $5, $6,
                $7, NULLIF($8, ''), $9, $10, $11,
                NULLIF($12, ''), NULLIF($13, ''), $14, $15
            )
            ON CONFLICT (user_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                date_of_birth = EXCLUDED.date_of_birth,
                gender = EXCLUDED.gender,
                address_line1 = EXCLUDED.address_line1,
                address_line2 = EXCLUDED.address_line2,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                postal_code = EXCLUDED.postal_code,
                tax_id = EXCLUDED.tax_id,
                national_id = EXCLUDED.national_id,
                occupation = EXCLUDED.occupation,
                income_bracket = EXCLUDED.income_bracket,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(record.full_name.trim())
        .bind(record.email.trim())
        .bind(record.phone.trim())
        .bind(record.date_of_birth.trim())
        .bind(record.gender.trim())
        .bind(record.address_line1.trim())
        .bind(record.address_line2.trim())
        .bind(record.city.trim())
        .bind(record.state.trim())
        .bind(record.postal_code.trim())
        .bind(record.tax_id.trim())
        .bind(record.national_id.trim())
        .bind(record.occupation.trim())
        .bind(record.income_bracket.trim())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
