//! In-process implementation of the repository traits.
//!
//! Mirrors the MongoDB semantics the handlers depend on (full-field
//! overwrites, matched/deleted reporting, newest-first listing) so the HTTP
//! layer can be exercised without a running server.

use std::cmp::Reverse;

use async_trait::async_trait;
use pipesense_core::types::RecordId;
use tokio::sync::RwLock;

use crate::models::sensor::{CreateSensor, Sensor, UpdateSensor};
use crate::models::user::{CreateUser, UpdateUser, User, UserTokens};
use crate::models::vibration::{
    CreateVibration, Page, UpdateVibration, VibrationData, VibrationFilter,
};
use crate::models::warning::{CreateWarning, Warning};
use crate::repositories::{HealthProbe, SensorRepo, UserRepo, VibrationRepo, WarningRepo};
use crate::DbResult;

#[derive(Default)]
pub struct MemoryStore {
    sensors: RwLock<Vec<Sensor>>,
    users: RwLock<Vec<User>>,
    vibrations: RwLock<Vec<VibrationData>>,
    warnings: RwLock<Vec<Warning>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Remove the first element matching `pred`. Returns whether one was removed.
fn remove_where<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> bool {
    match items.iter().position(pred) {
        Some(index) => {
            items.remove(index);
            true
        }
        None => false,
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> DbResult<()> {
        Ok(())
    }
}

#[async_trait]
impl SensorRepo for MemoryStore {
    async fn create(&self, input: &CreateSensor) -> DbResult<Sensor> {
        let sensor = Sensor::from_create(RecordId::generate(), input);
        self.sensors.write().await.push(sensor.clone());
        Ok(sensor)
    }

    async fn find_by_id(&self, id: RecordId) -> DbResult<Option<Sensor>> {
        let sensors = self.sensors.read().await;
        Ok(sensors.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_serial_number(&self, serial_number: &str) -> DbResult<Option<Sensor>> {
        let sensors = self.sensors.read().await;
        Ok(sensors
            .iter()
            .find(|s| s.serial_number == serial_number)
            .cloned())
    }

    async fn list(&self) -> DbResult<Vec<Sensor>> {
        Ok(self.sensors.read().await.clone())
    }

    async fn update(&self, id: RecordId, input: &UpdateSensor) -> DbResult<bool> {
        let mut sensors = self.sensors.write().await;
        match sensors.iter_mut().find(|s| s.id == id) {
            Some(sensor) => {
                sensor.apply(input);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_token(&self, id: RecordId, token: &str) -> DbResult<bool> {
        let mut sensors = self.sensors.write().await;
        match sensors.iter_mut().find(|s| s.id == id) {
            Some(sensor) => {
                sensor.token = Some(token.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: RecordId) -> DbResult<bool> {
        Ok(remove_where(&mut *self.sensors.write().await, |s| s.id == id))
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn create(&self, input: &CreateUser) -> DbResult<User> {
        let user = User::from_create(RecordId::generate(), input);
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: RecordId) -> DbResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn list(&self) -> DbResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn update(&self, id: RecordId, input: &UpdateUser) -> DbResult<bool> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.apply(input);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_tokens(&self, id: RecordId, tokens: &UserTokens) -> DbResult<bool> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.set_tokens(tokens);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: RecordId) -> DbResult<bool> {
        Ok(remove_where(&mut *self.users.write().await, |u| u.id == id))
    }
}

#[async_trait]
impl VibrationRepo for MemoryStore {
    async fn create(&self, input: &CreateVibration) -> DbResult<VibrationData> {
        let reading = VibrationData::from_create(RecordId::generate(), input);
        self.vibrations.write().await.push(reading.clone());
        Ok(reading)
    }

    async fn find_by_id(&self, id: RecordId) -> DbResult<Option<VibrationData>> {
        let vibrations = self.vibrations.read().await;
        Ok(vibrations.iter().find(|v| v.id == id).cloned())
    }

    async fn list(&self, filter: &VibrationFilter, page: Page) -> DbResult<Vec<VibrationData>> {
        let vibrations = self.vibrations.read().await;
        let mut matching: Vec<VibrationData> = vibrations
            .iter()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect();
        matching.sort_by_key(|v| Reverse(v.timestamp));

        let skip = usize::try_from(page.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(skip).take(limit).collect())
    }

    async fn count(&self, filter: &VibrationFilter) -> DbResult<u64> {
        let vibrations = self.vibrations.read().await;
        Ok(vibrations.iter().filter(|v| filter.matches(v)).count() as u64)
    }

    async fn update(&self, id: RecordId, input: &UpdateVibration) -> DbResult<bool> {
        let mut vibrations = self.vibrations.write().await;
        match vibrations.iter_mut().find(|v| v.id == id) {
            Some(reading) => {
                reading.apply(input);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: RecordId) -> DbResult<bool> {
        Ok(remove_where(&mut *self.vibrations.write().await, |v| {
            v.id == id
        }))
    }
}

#[async_trait]
impl WarningRepo for MemoryStore {
    async fn find_by_id(&self, id: RecordId) -> DbResult<Option<Warning>> {
        let warnings = self.warnings.read().await;
        Ok(warnings.iter().find(|w| w.id == id).cloned())
    }

    async fn list(&self) -> DbResult<Vec<Warning>> {
        Ok(self.warnings.read().await.clone())
    }

    async fn count(&self) -> DbResult<u64> {
        Ok(self.warnings.read().await.len() as u64)
    }

    async fn insert_many(&self, inputs: &[CreateWarning]) -> DbResult<Vec<Warning>> {
        let created: Vec<Warning> = inputs
            .iter()
            .map(|input| Warning {
                id: RecordId::generate(),
                level: input.level,
                name: input.name.clone(),
            })
            .collect();
        self.warnings.write().await.extend(created.iter().cloned());
        Ok(created)
    }
}
