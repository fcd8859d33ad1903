pub mod coupon;
pub mod course;
pub mod enrollment;
pub mod identity;
pub mod payment_link;
pub mod transaction;
pub mod user;

use courseflow_sdk::objects::{
    CourseLevel as SdkCourseLevel, PaymentStatus as SdkPaymentStatus,
    TransactionStatus as SdkTransactionStatus,
};

/// Payment status for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see `courseflow_sdk::objects::PaymentStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "payment_status")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl From<PaymentStatus> for SdkPaymentStatus {
    fn from(value: PaymentStatus) -> Self {
        match value {
            PaymentStatus::Pending => SdkPaymentStatus::Pending,
            PaymentStatus::Completed => SdkPaymentStatus::Completed,
            PaymentStatus::Failed => SdkPaymentStatus::Failed,
        }
    }
}

impl From<SdkPaymentStatus> for PaymentStatus {
    fn from(value: SdkPaymentStatus) -> Self {
        match value {
            SdkPaymentStatus::Pending => PaymentStatus::Pending,
            SdkPaymentStatus::Completed => PaymentStatus::Completed,
            SdkPaymentStatus::Failed => PaymentStatus::Failed,
        }
    }
}

/// Transaction status for database operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "transaction_status")]
pub enum TransactionStatus {
    Initiated,
    Completed,
    Failed,
}

impl From<TransactionStatus> for SdkTransactionStatus {
    fn from(value: TransactionStatus) -> Self {
        match value {
            TransactionStatus::Initiated => SdkTransactionStatus::Initiated,
            TransactionStatus::Completed => SdkTransactionStatus::Completed,
            TransactionStatus::Failed => SdkTransactionStatus::Failed,
        }
    }
}

/// Course difficulty for database operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "course_level")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl From<CourseLevel> for SdkCourseLevel {
    fn from(value: CourseLevel) -> Self {
        match value {
            CourseLevel::Beginner => SdkCourseLevel::Beginner,
            CourseLevel::Intermediate => SdkCourseLevel::Intermediate,
            CourseLevel::Advanced => SdkCourseLevel::Advanced,
        }
    }
}
