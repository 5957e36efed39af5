//! Client records.

use bidgate_core::entities::Client;

use crate::mapper::{ClientFields, RawClient, fields, types};
use crate::{Direction, Query, RecordStore, StoreError};

impl RecordStore {
    /// Most recently created clients first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list request fails.
    pub async fn list_clients(&self, limit: u32) -> Result<Vec<Client>, StoreError> {
        let query = Query::new()
            .sort_by(fields::CREATED_DATE, Direction::Descending)
            .limit(limit);
        self.list_mapped::<RawClient, Client>(types::CLIENT, &query)
            .await
    }

    /// Fetch one client by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the request fails.
    pub async fn get_client(&self, id: &str) -> Result<Option<Client>, StoreError> {
        Ok(self
            .get::<RawClient>(types::CLIENT, id)
            .await?
            .map(Client::from))
    }

    /// First client whose invite token equals `token`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list request fails.
    pub async fn find_client_by_invite_token(
        &self,
        token: &str,
    ) -> Result<Option<Client>, StoreError> {
        self.find_client(fields::INVITE_TOKEN, token).await
    }

    /// First client linked to the external auth user `clerk_user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list request fails.
    pub async fn find_client_by_user(
        &self,
        clerk_user_id: &str,
    ) -> Result<Option<Client>, StoreError> {
        self.find_client(fields::CLERK_USER_ID, clerk_user_id).await
    }

    /// First client linked to the billing customer `customer_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list request fails.
    pub async fn find_client_by_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<Client>, StoreError> {
        self.find_client(fields::STRIPE_CUSTOMER_ID, customer_id)
            .await
    }

    async fn find_client(&self, key: &str, value: &str) -> Result<Option<Client>, StoreError> {
        let query = Query::new().equals(key, value).limit(1);
        Ok(self
            .list_mapped::<RawClient, Client>(types::CLIENT, &query)
            .await?
            .into_iter()
            .next())
    }

    /// Create a client record and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the create request fails.
    pub async fn create_client(&self, fields: &ClientFields) -> Result<String, StoreError> {
        self.create(types::CLIENT, fields).await
    }

    /// Partially update a client record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the update request fails.
    pub async fn update_client(&self, id: &str, fields: &ClientFields) -> Result<(), StoreError> {
        self.update(types::CLIENT, id, fields).await
    }

    pub(crate) async fn list_mapped<R, T>(
        &self,
        type_name: &str,
        query: &Query,
    ) -> Result<Vec<T>, StoreError>
    where
        R: serde::de::DeserializeOwned + Into<T>,
    {
        Ok(self
            .list::<R>(type_name, query)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
