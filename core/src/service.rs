//! Async facade over the build/parse client and a pluggable transport.
//!
//! # Design
//! `ApiService` owns a `TrackerClient` and an `HttpTransport` and runs the
//! build → execute → parse pipeline for every operation, so controllers deal
//! only in domain types and `ApiError`. It is cheap to clone; each controller
//! holds its own copy.

use crate::client::TrackerClient;
use crate::error::ApiError;
use crate::http::HttpTransport;
use crate::types::{Case, CaseQuery, CaseUpdate, Client, ClientUpdate, NewCase, NewClient};

#[derive(Debug, Clone)]
pub struct ApiService<T> {
    client: TrackerClient,
    transport: T,
}

impl<T: HttpTransport> ApiService<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: TrackerClient::new(base_url),
            transport,
        }
    }

    pub async fn list_clients(&self, skip: u32, limit: u32) -> Result<Vec<Client>, ApiError> {
        let request = self.client.build_list_clients(skip, limit);
        let response = self.transport.execute(request).await?;
        self.client.parse_list_clients(response)
    }

    pub async fn get_client(&self, id: i64) -> Result<Client, ApiError> {
        let request = self.client.build_get_client(id);
        let response = self.transport.execute(request).await?;
        self.client.parse_get_client(response)
    }

    pub async fn create_client(&self, input: &NewClient) -> Result<Client, ApiError> {
        let request = self.client.build_create_client(input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_client(response)
    }

    pub async fn update_client(&self, id: i64, input: &ClientUpdate) -> Result<Client, ApiError> {
        let request = self.client.build_update_client(id, input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_client(response)
    }

    pub async fn delete_client(&self, id: i64) -> Result<(), ApiError> {
        let request = self.client.build_delete_client(id);
        let response = self.transport.execute(request).await?;
        self.client.parse_delete_client(response)
    }

    pub async fn list_cases(&self, query: &CaseQuery) -> Result<Vec<Case>, ApiError> {
        let request = self.client.build_list_cases(query);
        let response = self.transport.execute(request).await?;
        self.client.parse_list_cases(response)
    }

    pub async fn get_case(&self, id: i64) -> Result<Case, ApiError> {
        let request = self.client.build_get_case(id);
        let response = self.transport.execute(request).await?;
        self.client.parse_get_case(response)
    }

    pub async fn create_case(&self, input: &NewCase) -> Result<Case, ApiError> {
        let request = self.client.build_create_case(input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_case(response)
    }

    pub async fn update_case(&self, id: i64, input: &CaseUpdate) -> Result<Case, ApiError> {
        let request = self.client.build_update_case(id, input)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_case(response)
    }

    pub async fn delete_case(&self, id: i64) -> Result<(), ApiError> {
        let request = self.client.build_delete_case(id);
        let response = self.transport.execute(request).await?;
        self.client.parse_delete_case(response)
    }
}
