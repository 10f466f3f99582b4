//! Local mirror of the remote product list plus the "new product" draft.
//!
//! The store owns three pieces of state: the product collection, the draft
//! and the status of the most recent network operation. Presentation layers
//! read it through [`ProductStore::snapshot`] and [`ProductStore::subscribe_events`]
//! and never mutate it directly.

use std::{collections::HashSet, fmt, sync::Arc};

use shared::{
    domain::Product,
    draft::{Draft, DraftAction, DraftField},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{error, info, warn};

use crate::{
    config::{ClientSettings, DEFAULT_SUCCESS_MARKER},
    error::{ServiceError, StoreError},
    service::{HttpProductService, ProductService},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Load,
    Submit,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Load => f.write_str("load"),
            Operation::Submit => f.write_str("submit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl Status {
    pub fn is_loading(&self) -> bool {
        matches!(self, Status::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Status::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Product),
    /// The service answered successfully but without the success marker.
    /// Nothing was changed locally.
    Rejected { message: String },
}

#[derive(Debug, Clone)]
pub enum StoreEvent {
    StatusChanged(Status),
    ProductsLoaded { count: usize },
    ProductAdded(Product),
    DraftChanged(Draft),
    SubmissionRejected { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub products: Vec<Product>,
    pub draft: Draft,
    pub status: Status,
    pub in_flight: Vec<Operation>,
}

impl StoreSnapshot {
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.contains(&Operation::Submit)
    }
}

#[derive(Default)]
struct StoreState {
    products: Vec<Product>,
    draft: Draft,
    in_flight: HashSet<Operation>,
    last_error: Option<String>,
}

impl StoreState {
    fn status(&self) -> Status {
        if !self.in_flight.is_empty() {
            Status::Loading
        } else if let Some(message) = &self.last_error {
            Status::Error(message.clone())
        } else {
            Status::Idle
        }
    }
}

pub struct ProductStore {
    service: Arc<dyn ProductService>,
    success_marker: String,
    inner: Mutex<StoreState>,
    events: broadcast::Sender<StoreEvent>,
}

impl ProductStore {
    pub fn new(service: Arc<dyn ProductService>) -> Arc<Self> {
        Self::new_with_success_marker(service, DEFAULT_SUCCESS_MARKER)
    }

    pub fn new_with_success_marker(
        service: Arc<dyn ProductService>,
        success_marker: impl Into<String>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            service,
            success_marker: success_marker.into(),
            inner: Mutex::new(StoreState::default()),
            events,
        })
    }

    /// Builds a store backed by [`HttpProductService`].
    pub fn from_settings(settings: &ClientSettings) -> Result<Arc<Self>, ServiceError> {
        let service = HttpProductService::from_settings(settings)?;
        Ok(Self::new_with_success_marker(
            Arc::new(service),
            settings.success_marker.clone(),
        ))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        let guard = self.inner.lock().await;
        let mut in_flight: Vec<Operation> = guard.in_flight.iter().copied().collect();
        in_flight.sort();
        StoreSnapshot {
            products: guard.products.clone(),
            draft: guard.draft.clone(),
            status: guard.status(),
            in_flight,
        }
    }

    pub async fn status(&self) -> Status {
        self.inner.lock().await.status()
    }

    /// Replaces the collection with the server's current list.
    ///
    /// Returns the number of products loaded. On failure the collection is
    /// left as it was and the status carries the fetch error message.
    pub async fn load_products(&self) -> Result<usize, StoreError> {
        self.begin(Operation::Load).await?;

        let result = self.service.list_products().await;

        let mut guard = self.inner.lock().await;
        guard.in_flight.remove(&Operation::Load);
        match result {
            Ok(products) => {
                let count = products.len();
                guard.products = products;
                guard.last_error = None;
                info!(count, "loaded products");
                self.emit(StoreEvent::ProductsLoaded { count });
                self.emit(StoreEvent::StatusChanged(guard.status()));
                Ok(count)
            }
            Err(err) => {
                let err = StoreError::Fetch(err);
                error!(error = %err, "product list request failed");
                guard.last_error = Some(err.user_message());
                self.emit(StoreEvent::StatusChanged(guard.status()));
                Err(err)
            }
        }
    }

    pub async fn update_draft_field(&self, field: DraftField, value: impl Into<String>) -> Draft {
        self.dispatch_draft(DraftAction::Set {
            field,
            value: value.into(),
        })
        .await
    }

    pub async fn reset_draft(&self) -> Draft {
        self.dispatch_draft(DraftAction::Reset).await
    }

    pub async fn dispatch_draft(&self, action: DraftAction) -> Draft {
        let mut guard = self.inner.lock().await;
        let next = std::mem::take(&mut guard.draft).apply(action);
        guard.draft = next.clone();
        self.emit(StoreEvent::DraftChanged(next.clone()));
        next
    }

    /// Sends the current draft to the service.
    ///
    /// The product is appended and the draft cleared only when the response
    /// message equals the success marker; any other message leaves local state
    /// untouched and yields [`SubmitOutcome::Rejected`].
    pub async fn submit_draft(&self) -> Result<SubmitOutcome, StoreError> {
        let request = {
            let mut guard = self.inner.lock().await;
            if guard.in_flight.contains(&Operation::Submit) {
                warn!(operation = %Operation::Submit, "ignoring duplicate request");
                return Err(StoreError::AlreadyInFlight(Operation::Submit));
            }

            let request = match guard.draft.to_new_product() {
                Ok(request) => request,
                Err(err) => {
                    let err = StoreError::from(err);
                    warn!(error = %err, "draft rejected before submission");
                    guard.last_error = Some(err.user_message());
                    self.emit(StoreEvent::StatusChanged(guard.status()));
                    return Err(err);
                }
            };

            guard.in_flight.insert(Operation::Submit);
            guard.last_error = None;
            self.emit(StoreEvent::StatusChanged(guard.status()));
            request
        };

        let result = self.service.create_product(&request).await;

        let mut guard = self.inner.lock().await;
        guard.in_flight.remove(&Operation::Submit);
        let outcome = match result {
            Ok(response) if response.message == self.success_marker => {
                let product = request.into_product(response.id);
                info!(
                    title = %product.title,
                    id = ?product.id.as_ref().map(|id| id.0.as_str()),
                    "product added"
                );
                guard.products.push(product.clone());
                guard.draft = Draft::default();
                guard.last_error = None;
                self.emit(StoreEvent::ProductAdded(product.clone()));
                self.emit(StoreEvent::DraftChanged(Draft::default()));
                Ok(SubmitOutcome::Created(product))
            }
            Ok(response) => {
                warn!(
                    message = %response.message,
                    "create response did not carry the success marker; nothing added"
                );
                self.emit(StoreEvent::SubmissionRejected {
                    message: response.message.clone(),
                });
                Ok(SubmitOutcome::Rejected {
                    message: response.message,
                })
            }
            Err(err) => {
                let err = StoreError::Create(err);
                error!(error = %err, "create product request failed");
                guard.last_error = Some(err.user_message());
                Err(err)
            }
        };
        self.emit(StoreEvent::StatusChanged(guard.status()));
        outcome
    }

    async fn begin(&self, operation: Operation) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().await;
        if !guard.in_flight.insert(operation) {
            warn!(%operation, "ignoring duplicate request");
            return Err(StoreError::AlreadyInFlight(operation));
        }
        guard.last_error = None;
        self.emit(StoreEvent::StatusChanged(guard.status()));
        Ok(())
    }

    fn emit(&self, event: StoreEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
