//! In-memory store doubles for driving the application services

// not every test binary exercises every store
#![allow(dead_code)]

use async_trait::async_trait;
use boxoffice_core::{
    EventId, MappingDeleteRequest, MappingId, NewSeatCategoryMapping, OrderUpdate,
    QuestionId, QuestionOrderStore, ScheduleStore, SeatCategoryMapping, SeatMappingStore, Show,
    ShowId, StoreError, StoreResult, TicketTypeId,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Schedule store that issues server ids on replace, like the backend
#[derive(Default)]
pub struct MemoryScheduleStore {
    shows: Mutex<Vec<Show>>,
    counter: AtomicU64,
    fail_next_write: AtomicBool,
}

impl MemoryScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next write fail once
    pub fn fail_next_write(&self) {
        self.fail_next_write.store(true, Ordering::SeqCst);
    }

    pub fn persisted(&self) -> Vec<Show> {
        self.shows.lock().clone()
    }

    fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn persist_show(&self, show: Show) -> Show {
        let id = show
            .id()
            .cloned()
            .unwrap_or_else(|| ShowId::from(format!("show-{}", self.next())));
        let mut persisted = Show::draft(show.window())
            .with_id(id)
            .with_seating_plan(show.seating_plan_id().cloned());
        for ticket in show.ticket_types() {
            let ticket = if ticket.id().is_temporary() {
                ticket
                    .clone()
                    .with_id(TicketTypeId::from(format!("tt-{}", self.next())))
            } else {
                ticket.clone()
            };
            persisted = persisted.with_ticket_type(ticket);
        }
        persisted
    }
}

#[async_trait]
impl ScheduleStore for MemoryScheduleStore {
    async fn load_schedule(&self, _event: &EventId) -> StoreResult<Vec<Show>> {
        Ok(self.shows.lock().clone())
    }

    async fn replace_schedule(&self, _event: &EventId, shows: Vec<Show>) -> StoreResult<Vec<Show>> {
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected failure".to_owned()));
        }
        let persisted: Vec<Show> = shows
            .into_iter()
            .map(|show| self.persist_show(show))
            .collect();
        *self.shows.lock() = persisted.clone();
        Ok(persisted)
    }
}

/// Mapping store that issues ids on create
#[derive(Default)]
pub struct MemoryMappingStore {
    mappings: Mutex<Vec<SeatCategoryMapping>>,
    counter: AtomicU64,
}

impl MemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn persisted(&self) -> Vec<SeatCategoryMapping> {
        self.mappings.lock().clone()
    }
}

#[async_trait]
impl SeatMappingStore for MemoryMappingStore {
    async fn load_for_show(
        &self,
        _event: &EventId,
        show: &ShowId,
    ) -> StoreResult<Vec<SeatCategoryMapping>> {
        Ok(self
            .mappings
            .lock()
            .iter()
            .filter(|mapping| &mapping.show_id == show)
            .cloned()
            .collect())
    }

    async fn create_mappings(
        &self,
        _event: &EventId,
        _show: &ShowId,
        mappings: Vec<NewSeatCategoryMapping>,
    ) -> StoreResult<Vec<SeatCategoryMapping>> {
        let mut stored = self.mappings.lock();
        let mut created = Vec::with_capacity(mappings.len());
        for mapping in mappings {
            let id = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
            let persisted = SeatCategoryMapping {
                id: MappingId::from(format!("m-{id}")),
                seating_plan_id: mapping.seating_plan_id,
                show_id: mapping.show_id,
                category: mapping.category,
                ticket_type_id: mapping.ticket_type_id,
            };
            stored.push(persisted.clone());
            created.push(persisted);
        }
        Ok(created)
    }

    async fn update_mappings(
        &self,
        _event: &EventId,
        _show: &ShowId,
        mappings: Vec<SeatCategoryMapping>,
    ) -> StoreResult<Vec<SeatCategoryMapping>> {
        let mut stored = self.mappings.lock();
        for mapping in &mappings {
            let Some(existing) = stored.iter_mut().find(|m| m.id == mapping.id) else {
                return Err(StoreError::NotFound(mapping.id.to_string()));
            };
            *existing = mapping.clone();
        }
        Ok(mappings)
    }

    async fn delete_all_for_show(&self, request: MappingDeleteRequest) -> StoreResult<()> {
        self.mappings
            .lock()
            .retain(|mapping| mapping.show_id != request.show_id);
        Ok(())
    }
}

/// Order store recording the last written order and the write count
#[derive(Default)]
pub struct MemoryOrderStore {
    order: Mutex<Vec<OrderUpdate<QuestionId>>>,
    writes: AtomicU64,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_order(&self) -> Vec<OrderUpdate<QuestionId>> {
        self.order.lock().clone()
    }

    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionOrderStore for MemoryOrderStore {
    async fn replace_order(
        &self,
        _event: &EventId,
        order: Vec<OrderUpdate<QuestionId>>,
    ) -> StoreResult<()> {
        *self.order.lock() = order;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
