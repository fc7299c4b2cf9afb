//! In-memory repositories for router tests
//!
//! Each mock mirrors the constraints the PostgreSQL schema enforces: unique
//! emails, one instance per (course, start), one enrollment per registrant
//! and course, one active subscription per registrant.

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use fitness_db::{
    ActiveSubscriptionRow, BookCourse, CourseRepository, CourseRow, CreatePurchase,
    CreateRegistrant, CreateSubscription, DbError, DbResult, EnrollmentRow, OrderRecord,
    PaymentRow, ProductRepository, ProductRow, PurchaseLineRow, PurchaseReceipt,
    PurchaseRepository, PurchaseRow, RegistrantRepository, RegistrantRow, SubscriptionRepository,
    SubscriptionRow, SubscriptionTypeRow, UpdateRegistrant,
};
use fitness_types::order_total;

fn next(counter: &AtomicI32) -> i32 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

// ============================================================================
// Registrants
// ============================================================================

#[derive(Default, Clone)]
pub struct MockRegistrantRepository {
    registrants: Arc<DashMap<i32, RegistrantRow>>,
    next_id: Arc<AtomicI32>,
}

impl MockRegistrantRepository {
    #[allow(dead_code)]
    pub fn count(&self) -> usize {
        self.registrants.len()
    }
}

#[async_trait]
impl RegistrantRepository for MockRegistrantRepository {
    async fn find_by_id(&self, id: i32) -> DbResult<Option<RegistrantRow>> {
        Ok(self.registrants.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<RegistrantRow>> {
        Ok(self
            .registrants
            .iter()
            .find(|r| r.email == email)
            .map(|r| r.value().clone()))
    }

    async fn create(&self, registrant: CreateRegistrant) -> DbResult<RegistrantRow> {
        if self.registrants.iter().any(|r| r.email == registrant.email) {
            return Err(DbError::Conflict("email already registered".into()));
        }
        let id = next(&self.next_id);
        let row = RegistrantRow {
            id,
            email: registrant.email,
            password_hash: registrant.password_hash,
            last_name: registrant.last_name,
            first_name: registrant.first_name,
            address: registrant.address,
            phone: registrant.phone,
            birth_date: registrant.birth_date,
            civility: registrant.civility,
            role: registrant.role.as_str().to_string(),
            subscription_id: registrant.subscription_id,
        };
        self.registrants.insert(id, row.clone());
        Ok(row)
    }

    async fn update_profile(
        &self,
        id: i32,
        update: UpdateRegistrant,
    ) -> DbResult<Option<RegistrantRow>> {
        let Some(mut row) = self.registrants.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(email) = update.email {
            row.email = email;
        }
        if let Some(hash) = update.password_hash {
            row.password_hash = hash;
        }
        row.last_name = update.last_name.or(row.last_name.take());
        row.first_name = update.first_name.or(row.first_name.take());
        row.address = update.address.or(row.address.take());
        row.phone = update.phone.or(row.phone.take());
        row.civility = update.civility.or(row.civility.take());
        Ok(Some(row.clone()))
    }
}

// ============================================================================
// Courses
// ============================================================================

#[derive(Default, Clone)]
pub struct MockCourseRepository {
    courses: Arc<DashMap<(String, NaiveDateTime), CourseRow>>,
    enrollments: Arc<DashMap<(i32, i32), chrono::DateTime<Utc>>>,
    next_id: Arc<AtomicI32>,
}

impl MockCourseRepository {
    #[allow(dead_code)]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    #[allow(dead_code)]
    pub fn enrollment_count(&self) -> usize {
        self.enrollments.len()
    }
}

#[async_trait]
impl CourseRepository for MockCourseRepository {
    async fn book(&self, booking: BookCourse) -> DbResult<CourseRow> {
        let key = (booking.kind.name().to_string(), booking.starts_at);
        let course = self
            .courses
            .entry(key)
            .or_insert_with(|| CourseRow {
                id: next(&self.next_id),
                name: booking.kind.name().to_string(),
                duration_minutes: booking.duration_minutes,
                starts_at: booking.starts_at,
                price: Decimal::ZERO,
                coach_id: Some(booking.kind.coach_id()),
            })
            .clone();

        let enrollment = (booking.registrant_id, course.id);
        if self.enrollments.contains_key(&enrollment) {
            return Err(DbError::Conflict("already enrolled".into()));
        }
        self.enrollments.insert(enrollment, Utc::now());
        Ok(course)
    }

    async fn enrollments_for(&self, registrant_id: i32) -> DbResult<Vec<EnrollmentRow>> {
        let mut rows: Vec<EnrollmentRow> = self
            .enrollments
            .iter()
            .filter(|e| e.key().0 == registrant_id)
            .filter_map(|e| {
                let course_id = e.key().1;
                let enrolled_at = *e.value();
                self.courses
                    .iter()
                    .find(|c| c.id == course_id)
                    .map(|c| EnrollmentRow {
                        course_id,
                        course_name: c.name.clone(),
                        starts_at: c.starts_at,
                        duration_minutes: c.duration_minutes,
                        enrolled_at,
                    })
            })
            .collect();
        rows.sort_by(|a, b| b.starts_at.cmp(&a.starts_at));
        Ok(rows)
    }

    async fn cancel_enrollment(&self, registrant_id: i32, course_id: i32) -> DbResult<bool> {
        Ok(self.enrollments.remove(&(registrant_id, course_id)).is_some())
    }
}

// ============================================================================
// Subscriptions
// ============================================================================

#[derive(Clone)]
pub struct MockSubscriptionRepository {
    subscriptions: Arc<DashMap<i32, SubscriptionRow>>,
    types: Arc<Vec<SubscriptionTypeRow>>,
    next_id: Arc<AtomicI32>,
    next_payment_id: Arc<AtomicI32>,
}

impl Default for MockSubscriptionRepository {
    fn default() -> Self {
        let types = [("ESSENTIAL", 2999), ("PREMIUM", 4999)]
            .into_iter()
            .enumerate()
            .map(|(i, (name, cents))| SubscriptionTypeRow {
                id: i as i32 + 1,
                name: name.to_string(),
                price: Decimal::new(cents, 2),
                description: None,
            })
            .collect();
        Self {
            subscriptions: Arc::default(),
            types: Arc::new(types),
            next_id: Arc::default(),
            next_payment_id: Arc::default(),
        }
    }
}

impl MockSubscriptionRepository {
    #[allow(dead_code)]
    pub fn count(&self) -> usize {
        self.subscriptions.len()
    }
}

#[async_trait]
impl SubscriptionRepository for MockSubscriptionRepository {
    async fn find_active(&self, registrant_id: i32) -> DbResult<Option<ActiveSubscriptionRow>> {
        Ok(self
            .subscriptions
            .iter()
            .find(|s| s.registrant_id == registrant_id && s.active)
            .map(|s| ActiveSubscriptionRow {
                type_name: self
                    .types
                    .iter()
                    .find(|t| t.id == s.type_id)
                    .map(|t| t.name.clone())
                    .unwrap_or_default(),
                subscription: s.value().clone(),
            }))
    }

    async fn subscribe(&self, sub: CreateSubscription) -> DbResult<(SubscriptionRow, PaymentRow)> {
        if sub.active
            && self
                .subscriptions
                .iter()
                .any(|s| s.registrant_id == sub.registrant_id && s.active)
        {
            return Err(DbError::Conflict("an active subscription already exists".into()));
        }
        let row = SubscriptionRow {
            id: next(&self.next_id),
            duration_months: sub.duration_months,
            starts_on: sub.starts_on,
            ends_on: sub.ends_on,
            price: sub.price,
            active: sub.active,
            type_id: sub.type_id,
            registrant_id: sub.registrant_id,
        };
        let payment = PaymentRow {
            id: next(&self.next_payment_id),
            amount: sub.price,
            paid_on: Utc::now().date_naive(),
            method: sub.payment_method,
            purchase_id: None,
            subscription_id: Some(row.id),
            registrant_id: sub.registrant_id,
        };
        self.subscriptions.insert(row.id, row.clone());
        Ok((row, payment))
    }

    async fn cancel_active(&self, registrant_id: i32) -> DbResult<Option<SubscriptionRow>> {
        let Some(mut row) = self
            .subscriptions
            .iter_mut()
            .find(|s| s.registrant_id == registrant_id && s.active)
        else {
            return Ok(None);
        };
        row.active = false;
        Ok(Some(row.clone()))
    }

    async fn list_types(&self) -> DbResult<Vec<SubscriptionTypeRow>> {
        Ok(self.types.to_vec())
    }

    async fn find_types_by_name(&self, name: &str) -> DbResult<Vec<SubscriptionTypeRow>> {
        Ok(self.types.iter().filter(|t| t.name == name).cloned().collect())
    }
}

// ============================================================================
// Products
// ============================================================================

#[derive(Default, Clone)]
pub struct MockProductRepository {
    products: Arc<DashMap<i32, ProductRow>>,
    next_id: Arc<AtomicI32>,
}

impl MockProductRepository {
    /// Seed a product and return its id
    #[allow(dead_code)]
    pub fn seed(&self, name: &str, price: Decimal) -> i32 {
        let id = next(&self.next_id);
        self.products.insert(
            id,
            ProductRow {
                id,
                name: name.to_string(),
                price,
            },
        );
        id
    }

    /// Change a catalogue price
    #[allow(dead_code)]
    pub fn set_price(&self, id: i32, price: Decimal) {
        if let Some(mut row) = self.products.get_mut(&id) {
            row.price = price;
        }
    }

    fn price_of(&self, id: i32) -> Option<(String, Decimal)> {
        self.products.get(&id).map(|p| (p.name.clone(), p.price))
    }
}

#[async_trait]
impl ProductRepository for MockProductRepository {
    async fn list(&self) -> DbResult<Vec<ProductRow>> {
        let mut rows: Vec<ProductRow> = self.products.iter().map(|p| p.value().clone()).collect();
        rows.sort_by_key(|p| p.id);
        Ok(rows)
    }

    async fn find_by_name(&self, name: &str) -> DbResult<Vec<ProductRow>> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.name == name)
            .map(|p| p.value().clone())
            .collect())
    }

    async fn insert_if_absent(&self, name: &str, price: Decimal) -> DbResult<Option<ProductRow>> {
        if self.products.iter().any(|p| p.name == name) {
            return Ok(None);
        }
        let id = self.seed(name, price);
        Ok(self.products.get(&id).map(|p| p.value().clone()))
    }
}

// ============================================================================
// Purchases
// ============================================================================

#[derive(Clone)]
pub struct MockPurchaseRepository {
    products: MockProductRepository,
    /// Purchase with its (product id, quantity) lines
    purchases: Arc<DashMap<i32, (PurchaseRow, Vec<(i32, i32)>)>>,
    next_id: Arc<AtomicI32>,
}

impl MockPurchaseRepository {
    pub fn new(products: MockProductRepository) -> Self {
        Self {
            products,
            purchases: Arc::default(),
            next_id: Arc::default(),
        }
    }

    #[allow(dead_code)]
    pub fn count(&self) -> usize {
        self.purchases.len()
    }

    fn lines_of(&self, lines: &[(i32, i32)], purchase_id: i32) -> Vec<PurchaseLineRow> {
        lines
            .iter()
            .filter_map(|&(product_id, quantity)| {
                self.products
                    .price_of(product_id)
                    .map(|(name, price)| PurchaseLineRow {
                        purchase_id,
                        product_id,
                        product_name: name,
                        unit_price: price,
                        quantity,
                    })
            })
            .collect()
    }
}

#[async_trait]
impl PurchaseRepository for MockPurchaseRepository {
    async fn create(&self, purchase: CreatePurchase) -> DbResult<PurchaseReceipt> {
        let mut priced = Vec::new();
        for line in &purchase.lines {
            let (_, price) = self
                .products
                .price_of(line.product_id.0)
                .ok_or_else(|| DbError::NotFound(format!("product {}", line.product_id)))?;
            priced.push((price, line.quantity));
        }
        let total = order_total(priced);

        let row = PurchaseRow {
            id: next(&self.next_id),
            purchased_at: Utc::now(),
            registrant_id: purchase.registrant_id,
        };
        let lines = purchase
            .lines
            .iter()
            .map(|l| (l.product_id.0, l.quantity))
            .collect();
        self.purchases.insert(row.id, (row.clone(), lines));

        let payment = PaymentRow {
            id: row.id,
            amount: total,
            paid_on: Utc::now().date_naive(),
            method: purchase.payment_method,
            purchase_id: Some(row.id),
            subscription_id: None,
            registrant_id: purchase.registrant_id,
        };

        Ok(PurchaseReceipt {
            purchase: row,
            total,
            payment,
        })
    }

    async fn orders_for(&self, registrant_id: i32) -> DbResult<Vec<OrderRecord>> {
        let mut records: Vec<OrderRecord> = self
            .purchases
            .iter()
            .filter(|p| p.value().0.registrant_id == registrant_id)
            .map(|p| {
                let (purchase, lines) = p.value();
                let lines = self.lines_of(lines, purchase.id);
                let total = order_total(lines.iter().map(|l| (l.unit_price, l.quantity)));
                OrderRecord {
                    purchase: purchase.clone(),
                    lines,
                    total,
                }
            })
            .collect();
        records.sort_by(|a, b| b.purchase.id.cmp(&a.purchase.id));
        Ok(records)
    }
}
