//! Shared fakes for the service tests: a manual clock and an in-memory
//! Identity Store with switchable failure modes.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::errors::IdentityError;
use crate::models::{NewUser, User};
use crate::services::identity_service::IdentityStore;
use crate::services::otp_service::Clock;

pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub struct InMemoryIdentityService {
    users: Mutex<Vec<User>>,
    next_id: AtomicU64,
    fail_lookup: AtomicBool,
    patch_failure: Mutex<Option<(u16, Option<String>)>>,
}

impl InMemoryIdentityService {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            fail_lookup: AtomicBool::new(false),
            patch_failure: Mutex::new(None),
        }
    }

    pub fn seed(&self, id: &str, name: &str, email: &str, password: &str) {
        self.users.lock().unwrap().push(User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: String::new(),
            profile_pic: String::new(),
        });
    }

    /// Make the next lookup/create call fail as if the store were down.
    pub fn fail_next_lookup(&self) {
        self.fail_lookup.store(true, Ordering::SeqCst);
    }

    /// Make the next password PATCH fail with this status and body message.
    pub fn fail_next_patch(&self, status: u16, message: Option<&str>) {
        *self.patch_failure.lock().unwrap() = Some((status, message.map(str::to_string)));
    }

    pub fn password_of(&self, id: &str) -> Option<String> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.password.clone())
    }

    pub fn change_email(&self, id: &str, email: &str) {
        if let Some(u) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            u.email = email.to_string();
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn check_lookup(&self) -> Result<(), IdentityError> {
        if self.fail_lookup.swap(false, Ordering::SeqCst) {
            return Err(IdentityError::Status {
                status: 503,
                message: None,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityService {
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, IdentityError> {
        self.check_lookup()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.email == email)
            .cloned()
            .collect())
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Vec<User>, IdentityError> {
        self.check_lookup()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.email == email && u.password == password)
            .cloned()
            .collect())
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<User, IdentityError> {
        self.check_lookup()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id: format!("gen-{}", id),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            password: new_user.password.clone(),
            phone: new_user.phone.clone(),
            profile_pic: new_user.profile_pic.clone(),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        user_id: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        if let Some((status, message)) = self.patch_failure.lock().unwrap().take() {
            return Err(IdentityError::Status { status, message });
        }

        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.password = new_password.to_string();
                Ok(())
            }
            None => Err(IdentityError::Status {
                status: 404,
                message: None,
            }),
        }
    }
}
