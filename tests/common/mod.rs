//! Shared test doubles: an in-memory user store and a counting mailer.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use employee_manager::domain::{Car, NewUser, Role, User};
use employee_manager::errors::AppResult;
use employee_manager::infra::{UnitOfWork, UserRepository};
use employee_manager::services::{Mail, Mailer};

/// In-memory [`UserRepository`] backing the real services in tests.
#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
    memberships: Mutex<Vec<(Uuid, Role)>>,
    cars: Mutex<Vec<Car>>,
}

impl InMemoryUsers {
    pub fn give_car(&self, owner_id: Uuid, registration_number: &str) {
        self.cars.lock().unwrap().push(Car {
            id: Uuid::new_v4(),
            owner_id,
            registration_number: Some(registration_number.to_string()),
            model: Some("Dacia Logan".to_string()),
        });
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let mut found = self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == username)
            .cloned();

        if let Some(user) = found.as_mut() {
            user.car = self
                .cars
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.owner_id == user.id)
                .cloned();
        }
        Ok(found)
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            cnp: new_user.cnp,
            address: new_user.address,
            phone_number: new_user.phone_number,
            photo_url: new_user.photo_url,
            car: None,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn assign_role(&self, user_id: Uuid, role: Role) -> AppResult<()> {
        self.memberships.lock().unwrap().push((user_id, role));
        Ok(())
    }

    async fn roles_of(&self, user_id: Uuid) -> AppResult<Vec<Role>> {
        Ok(self
            .memberships
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, role)| *role)
            .collect())
    }
}

/// Unit of work handing out the in-memory repository.
pub struct InMemoryUow {
    users: Arc<InMemoryUsers>,
}

impl InMemoryUow {
    pub fn new() -> (Arc<Self>, Arc<InMemoryUsers>) {
        let users = Arc::new(InMemoryUsers::default());
        (
            Arc::new(Self {
                users: users.clone(),
            }),
            users,
        )
    }
}

impl UnitOfWork for InMemoryUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }
}

/// Mailer that counts deliveries instead of sending.
#[derive(Default)]
pub struct CountingMailer {
    sent: AtomicUsize,
}

impl CountingMailer {
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Mailer for CountingMailer {
    async fn send(&self, _mail: Mail) -> AppResult<()> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
