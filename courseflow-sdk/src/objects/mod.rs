pub mod admin;
pub mod catalog;
pub mod checkout;
pub mod coupon;
pub mod enrollment;
pub mod identity;

pub use catalog::{CourseIcon, CourseLevel, CourseSort, CourseSummary, ListCoursesQuery};
pub use checkout::{
    CheckoutStep, CheckoutView, CourseOfferView, EditIdentityRequest, PaymentRedirect, PriceBreakdown,
    PriceLine, PriceLineKind, StartCheckoutRequest, ValidationErrorResponse,
};
pub use coupon::{ApplyCouponRequest, ApplyCouponResponse, CouponOutcome};
pub use enrollment::{PaymentStatus, TransactionStatus};
pub use identity::{FieldErrors, IdentityField, IdentityRecord};
