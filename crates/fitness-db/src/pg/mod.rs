//! PostgreSQL repository implementations

mod course;
mod product;
mod purchase;
mod registrant;
mod subscription;

pub use course::PgCourseRepository;
pub use product::PgProductRepository;
pub use purchase::PgPurchaseRepository;
pub use registrant::PgRegistrantRepository;
pub use subscription::PgSubscriptionRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub registrants: PgRegistrantRepository,
    pub courses: PgCourseRepository,
    pub subscriptions: PgSubscriptionRepository,
    pub products: PgProductRepository,
    pub purchases: PgPurchaseRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            registrants: PgRegistrantRepository::new(pool.clone()),
            courses: PgCourseRepository::new(pool.clone()),
            subscriptions: PgSubscriptionRepository::new(pool.clone()),
            products: PgProductRepository::new(pool.clone()),
            purchases: PgPurchaseRepository::new(pool),
        }
    }
}
