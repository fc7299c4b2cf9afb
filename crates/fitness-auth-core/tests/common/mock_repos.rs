//! In-memory registrant repository for testing

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use fitness_db::{
    CreateRegistrant, DbError, DbResult, RegistrantRepository, RegistrantRow, UpdateRegistrant,
};

/// In-memory registrant repository
#[derive(Default, Clone)]
pub struct MockRegistrantRepository {
    registrants: Arc<DashMap<i32, RegistrantRow>>,
    by_email: Arc<DashMap<String, i32>>,
    next_id: Arc<AtomicI32>,
}

impl MockRegistrantRepository {
    pub fn new() -> Self {
        Self::default()
    }

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
            .by_email
            .get(email)
            .and_then(|id| self.registrants.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, registrant: CreateRegistrant) -> DbResult<RegistrantRow> {
        if self.by_email.contains_key(&registrant.email) {
            return Err(DbError::Conflict("email already registered".into()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = RegistrantRow {
            id,
            email: registrant.email.clone(),
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
        self.by_email.insert(registrant.email, id);
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
            self.by_email.remove(&row.email);
            self.by_email.insert(email.clone(), id);
            row.email = email;
        }
        if let Some(hash) = update.password_hash {
            row.password_hash = hash;
        }
        if let Some(v) = update.last_name {
            row.last_name = Some(v);
        }
        if let Some(v) = update.first_name {
            row.first_name = Some(v);
        }
        if let Some(v) = update.address {
            row.address = Some(v);
        }
        if let Some(v) = update.phone {
            row.phone = Some(v);
        }
        if let Some(v) = update.civility {
            row.civility = Some(v);
        }
        Ok(Some(row.clone()))
    }
}
