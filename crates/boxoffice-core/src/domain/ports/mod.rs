//! Ports: contracts the surrounding client must provide
//!
//! The core performs no I/O of its own. These traits describe the reads
//! and writes the HTTP layer implements — a schedule read and a
//! full-replace schedule write per event, batched mapping writes, and a
//! whole-order replace for questions. Infrastructure adapters live with
//! the consumer, not here.

use crate::domain::entities::Show;
use crate::domain::services::reconciler::{
    MappingDeleteRequest, NewSeatCategoryMapping, SeatCategoryMapping,
};
use crate::domain::services::resequencer::OrderUpdate;
use crate::domain::value_objects::{EventId, QuestionId, ShowId};
use async_trait::async_trait;
use thiserror::Error;

/// Failures surfaced by a collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend rejected the request
    #[error("backend rejected the request: {0}")]
    Rejected(String),

    /// The backend could not be reached
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The addressed resource does not exist
    #[error("not found: {0}")]
    NotFound(String),
}

/// Result type for collaborator calls
pub type StoreResult<T> = Result<T, StoreError>;

/// Schedule persistence as seen by the core
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Currently persisted shows of the event, ticket types nested
    async fn load_schedule(&self, event: &EventId) -> StoreResult<Vec<Show>>;

    /// Full replace-by-event write; returns the shows as persisted, with
    /// server ids filled in
    async fn replace_schedule(&self, event: &EventId, shows: Vec<Show>) -> StoreResult<Vec<Show>>;
}

/// Seat-category mapping persistence
#[async_trait]
pub trait SeatMappingStore: Send + Sync {
    /// Currently persisted mappings for one show
    async fn load_for_show(
        &self,
        event: &EventId,
        show: &ShowId,
    ) -> StoreResult<Vec<SeatCategoryMapping>>;

    /// Batched create; the backend issues the ids
    async fn create_mappings(
        &self,
        event: &EventId,
        show: &ShowId,
        mappings: Vec<NewSeatCategoryMapping>,
    ) -> StoreResult<Vec<SeatCategoryMapping>>;

    /// Batched update of mappings that already carry ids
    async fn update_mappings(
        &self,
        event: &EventId,
        show: &ShowId,
        mappings: Vec<SeatCategoryMapping>,
    ) -> StoreResult<Vec<SeatCategoryMapping>>;

    /// Wholesale removal for one show; explicit user intent only
    async fn delete_all_for_show(&self, request: MappingDeleteRequest) -> StoreResult<()>;
}

/// Question ordering persistence
#[async_trait]
pub trait QuestionOrderStore: Send + Sync {
    /// Replace the whole question order for the event
    async fn replace_order(
        &self,
        event: &EventId,
        order: Vec<OrderUpdate<QuestionId>>,
    ) -> StoreResult<()>;
}
