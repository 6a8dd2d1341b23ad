//! MongoDB-backed implementation of the repository traits.

mod documents;

use std::time::Duration;

use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use pipesense_core::types::RecordId;

use crate::models::sensor::{CreateSensor, Sensor, UpdateSensor};
use crate::models::user::{CreateUser, UpdateUser, User, UserTokens};
use crate::models::vibration::{
    CreateVibration, Page, UpdateVibration, VibrationData, VibrationFilter,
};
use crate::models::warning::{CreateWarning, Warning};
use crate::repositories::{HealthProbe, SensorRepo, UserRepo, VibrationRepo, WarningRepo};
use crate::{DbResult, SENSORS, USERS, VIBRATIONS, WARNINGS};

use documents::{
    by_id, sensor_token_update, sensor_update, user_tokens_update, user_update, vibration_filter,
    vibration_update, SensorDocument, UserDocument, VibrationDocument, WarningDocument,
};

/// One shared client bound to a fixed database.
///
/// Cheap to clone; the driver pools connections internally and is safe to
/// use from many requests at once.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
    sensors: Collection<SensorDocument>,
    users: Collection<UserDocument>,
    vibrations: Collection<VibrationDocument>,
    warnings: Collection<WarningDocument>,
}

impl MongoStore {
    /// Connect to `uri` and verify the server answers a `ping`.
    ///
    /// `timeout` bounds both connection setup and server selection, so an
    /// unreachable server fails here instead of on the first request.
    pub async fn connect(uri: &str, database: &str, timeout: Duration) -> DbResult<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);
        if options.app_name.is_none() {
            options.app_name = Some("pipesense".to_string());
        }

        let client = Client::with_options(options)?;
        let store = Self::new(&client, database);
        store.ping().await?;
        tracing::info!(database, "Connected to MongoDB");
        Ok(store)
    }

    pub fn new(client: &Client, database: &str) -> Self {
        let db = client.database(database);
        Self {
            sensors: db.collection(SENSORS),
            users: db.collection(USERS),
            vibrations: db.collection(VIBRATIONS),
            warnings: db.collection(WARNINGS),
            db,
        }
    }
}

#[async_trait]
impl HealthProbe for MongoStore {
    async fn ping(&self) -> DbResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[async_trait]
impl SensorRepo for MongoStore {
    async fn create(&self, input: &CreateSensor) -> DbResult<Sensor> {
        let sensor = Sensor::from_create(RecordId::generate(), input);
        self.sensors
            .insert_one(SensorDocument::from(&sensor))
            .await?;
        Ok(sensor)
    }

    async fn find_by_id(&self, id: RecordId) -> DbResult<Option<Sensor>> {
        let found = self.sensors.find_one(by_id(id.into())).await?;
        Ok(found.map(Sensor::from))
    }

    async fn find_by_serial_number(&self, serial_number: &str) -> DbResult<Option<Sensor>> {
        let found = self
            .sensors
            .find_one(doc! { "serial_number": serial_number })
            .await?;
        Ok(found.map(Sensor::from))
    }

    async fn list(&self) -> DbResult<Vec<Sensor>> {
        let docs: Vec<SensorDocument> = self.sensors.find(doc! {}).await?.try_collect().await?;
        Ok(docs.into_iter().map(Sensor::from).collect())
    }

    async fn update(&self, id: RecordId, input: &UpdateSensor) -> DbResult<bool> {
        let result = self
            .sensors
            .update_one(by_id(id.into()), sensor_update(input))
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn set_token(&self, id: RecordId, token: &str) -> DbResult<bool> {
        let result = self
            .sensors
            .update_one(by_id(id.into()), sensor_token_update(token))
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: RecordId) -> DbResult<bool> {
        let result = self.sensors.delete_one(by_id(id.into())).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl UserRepo for MongoStore {
    async fn create(&self, input: &CreateUser) -> DbResult<User> {
        let user = User::from_create(RecordId::generate(), input);
        self.users.insert_one(UserDocument::from(&user)).await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: RecordId) -> DbResult<Option<User>> {
        let found = self.users.find_one(by_id(id.into())).await?;
        Ok(found.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let found = self.users.find_one(doc! { "username": username }).await?;
        Ok(found.map(User::from))
    }

    async fn list(&self) -> DbResult<Vec<User>> {
        let docs: Vec<UserDocument> = self.users.find(doc! {}).await?.try_collect().await?;
        Ok(docs.into_iter().map(User::from).collect())
    }

    async fn update(&self, id: RecordId, input: &UpdateUser) -> DbResult<bool> {
        let result = self
            .users
            .update_one(by_id(id.into()), user_update(input))
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn set_tokens(&self, id: RecordId, tokens: &UserTokens) -> DbResult<bool> {
        let result = self
            .users
            .update_one(by_id(id.into()), user_tokens_update(tokens))
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: RecordId) -> DbResult<bool> {
        let result = self.users.delete_one(by_id(id.into())).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl VibrationRepo for MongoStore {
    async fn create(&self, input: &CreateVibration) -> DbResult<VibrationData> {
        let reading = VibrationData::from_create(RecordId::generate(), input);
        self.vibrations
            .insert_one(VibrationDocument::from(&reading))
            .await?;
        Ok(reading)
    }

    async fn find_by_id(&self, id: RecordId) -> DbResult<Option<VibrationData>> {
        let found = self.vibrations.find_one(by_id(id.into())).await?;
        Ok(found.map(VibrationData::from))
    }

    async fn list(&self, filter: &VibrationFilter, page: Page) -> DbResult<Vec<VibrationData>> {
        let docs: Vec<VibrationDocument> = self
            .vibrations
            .find(vibration_filter(filter))
            .sort(doc! { "timestamp": -1 })
            .skip(page.skip)
            .limit(i64::try_from(page.limit).unwrap_or(i64::MAX))
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(VibrationData::from).collect())
    }

    async fn count(&self, filter: &VibrationFilter) -> DbResult<u64> {
        Ok(self
            .vibrations
            .count_documents(vibration_filter(filter))
            .await?)
    }

    async fn update(&self, id: RecordId, input: &UpdateVibration) -> DbResult<bool> {
        let result = self
            .vibrations
            .update_one(by_id(id.into()), vibration_update(input))
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: RecordId) -> DbResult<bool> {
        let result = self.vibrations.delete_one(by_id(id.into())).await?;
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl WarningRepo for MongoStore {
    async fn find_by_id(&self, id: RecordId) -> DbResult<Option<Warning>> {
        let found = self.warnings.find_one(by_id(id.into())).await?;
        Ok(found.map(Warning::from))
    }

    async fn list(&self) -> DbResult<Vec<Warning>> {
        let docs: Vec<WarningDocument> = self.warnings.find(doc! {}).await?.try_collect().await?;
        Ok(docs.into_iter().map(Warning::from).collect())
    }

    async fn count(&self) -> DbResult<u64> {
        Ok(self.warnings.count_documents(doc! {}).await?)
    }

    async fn insert_many(&self, inputs: &[CreateWarning]) -> DbResult<Vec<Warning>> {
        let warnings: Vec<Warning> = inputs
            .iter()
            .map(|input| Warning {
                id: RecordId::generate(),
                level: input.level,
                name: input.name.clone(),
            })
            .collect();
        if warnings.is_empty() {
            return Ok(warnings);
        }

        self.warnings
            .insert_many(warnings.iter().map(WarningDocument::from))
            .await?;
        Ok(warnings)
    }
}
