use std::collections::HashSet;

use tracing::error;

use libris_core::record::RecordId;

use crate::api::ApiClient;
use crate::state::AppState;

/// Drives the state machine against the API: validate, request, reconcile.
/// Carries an explicit in-flight guard so a second request against a record
/// that already has one pending is dropped instead of racing it.
pub struct App {
    pub state: AppState,
    api: ApiClient,
    in_flight: HashSet<RecordId>,
    create_in_flight: bool,
}

impl App {
    pub fn new(api: ApiClient) -> Self { App { state: AppState::new(), api, in_flight: HashSet::new(), create_in_flight: false } }

    /// Fetch the full record set and replace the list mirror.
    pub async fn refresh(&mut self) {
        match self.api.list_books().await {
            Ok(records) => self.state.load(records),
            Err(err) => {
                error!("Error fetching books: {}", err);
                self.state.set_error("Error fetching books. Please try again.");
            }
        }
    }

    pub async fn submit_create(&mut self) {
        if self.create_in_flight {
            return;
        }
        let Some(book) = self.state.take_create_submission() else { return };

        self.create_in_flight = true;
        let result = self.api.create_book(&book.into_document()).await;
        self.create_in_flight = false;

        match result {
            Ok(record) => self.state.apply_created(record),
            Err(err) => {
                error!("Error adding book: {}", err);
                self.state.set_error("Error adding book. Please try again.");
            }
        }
    }

    pub async fn submit_edit(&mut self) {
        let Some(id) = self.state.editing_id() else { return };
        if self.in_flight.contains(&id) {
            return;
        }
        let Some((id, book)) = self.state.take_edit_submission() else { return };

        self.in_flight.insert(id);
        let result = self.api.update_book(id, &book.into_document()).await;
        self.in_flight.remove(&id);

        match result {
            Ok(record) => self.state.apply_updated(record),
            Err(err) => {
                error!("Error updating book: {}", err);
                self.state.set_error("Error updating book. Please try again.");
            }
        }
    }

    pub async fn delete(&mut self, id: RecordId) {
        if !self.in_flight.insert(id) {
            return;
        }
        let result = self.api.delete_book(id).await;
        self.in_flight.remove(&id);

        match result {
            Ok(_) => self.state.apply_removed(id),
            Err(err) => {
                error!("Error deleting book: {}", err);
                self.state.set_error("Error deleting book. Please try again.");
            }
        }
    }
}
