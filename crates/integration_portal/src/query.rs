//! Query and mutation handles
//!
//! A [`QueryHandle`] owns one background load and publishes its progress as a
//! [`QueryState`]. A [`Mutation`] sends nothing until triggered.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::PortalClient;
use crate::error::ApiError;
use crate::request::RequestDescriptor;

/// Progress of a read
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Pending,
    Success(T),
    Error(ApiError),
}

impl<T> QueryState<T> {
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(e) => Self::Error(e),
        }
    }
}

impl<T: Clone> QueryState<T> {
    fn to_result(&self) -> Option<Result<T, ApiError>> {
        match self {
            Self::Pending => None,
            Self::Success(value) => Some(Ok(value.clone())),
            Self::Error(e) => Some(Err(e.clone())),
        }
    }
}

/// A read in flight (or settled); aborts its load when dropped
pub struct QueryHandle<T> {
    client: PortalClient,
    key: String,
    descriptor: RequestDescriptor,
    state: Arc<watch::Sender<QueryState<T>>>,
    updates: watch::Receiver<QueryState<T>>,
    task: Option<JoinHandle<()>>,
}

impl<T> fmt::Debug for QueryHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryHandle")
            .field("key", &self.key)
            .field("path", &self.descriptor.path())
            .field("pending", &self.updates.borrow().is_pending())
            .finish_non_exhaustive()
    }
}

impl<T> QueryHandle<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    pub(crate) fn spawn(client: PortalClient, key: String, descriptor: RequestDescriptor) -> Self {
        let (tx, updates) = watch::channel(QueryState::Pending);
        let mut handle = Self {
            client,
            key,
            descriptor,
            state: Arc::new(tx),
            updates,
            task: None,
        };
        handle.start(false);
        handle
    }

    fn start(&mut self, reload: bool) {
        let client = self.client.clone();
        let key = self.key.clone();
        let descriptor = self.descriptor.clone();
        let state = Arc::clone(&self.state);

        self.task = Some(tokio::spawn(async move {
            let result = if reload {
                client.refetch::<T>(&key, &descriptor).await
            } else {
                client.query::<T>(&key, &descriptor).await
            };
            state.send_replace(QueryState::from_result(result));
        }));
    }

    /// Snapshot of the current state
    pub fn state(&self) -> QueryState<T> {
        self.updates.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.updates.borrow().is_pending()
    }

    /// Wait until the load finishes
    ///
    /// # Errors
    ///
    /// The load's [`ApiError`], or [`ApiError::Cancelled`] after
    /// [`Self::cancel`].
    pub async fn settled(&mut self) -> Result<T, ApiError> {
        let state = self
            .updates
            .wait_for(|s| !s.is_pending())
            .await
            .map_err(|_| ApiError::Cancelled)?;
        state.to_result().unwrap_or(Err(ApiError::Cancelled))
    }

    /// Discard the cached value and load again
    pub fn refetch(&mut self) {
        self.abort();
        self.state.send_replace(QueryState::Pending);
        self.start(true);
    }

    /// Abort the load; a pending state becomes [`ApiError::Cancelled`]
    pub fn cancel(&mut self) {
        self.abort();
        self.state.send_if_modified(|s| {
            if s.is_pending() {
                *s = QueryState::Error(ApiError::Cancelled);
                true
            } else {
                false
            }
        });
    }
}

impl<T> QueryHandle<T> {
    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                debug!(key = %self.key, path = self.descriptor.path(), "Aborting query");
            }
            task.abort();
        }
    }
}

impl<T> Drop for QueryHandle<T> {
    fn drop(&mut self) {
        self.abort();
    }
}

/// A write that is sent once per trigger
pub struct Mutation<T> {
    client: PortalClient,
    descriptor: RequestDescriptor,
    _response: PhantomData<fn() -> T>,
}

impl<T> Clone for Mutation<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            descriptor: self.descriptor.clone(),
            _response: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Mutation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutation")
            .field("verb", &self.descriptor.verb())
            .field("path", &self.descriptor.path())
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned> Mutation<T> {
    pub(crate) const fn new(client: PortalClient, descriptor: RequestDescriptor) -> Self {
        Self {
            client,
            descriptor,
            _response: PhantomData,
        }
    }

    pub const fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    /// Send the descriptor as built
    ///
    /// # Errors
    ///
    /// See [`PortalClient::execute`].
    pub async fn trigger(&self) -> Result<T, ApiError> {
        self.client.execute_as(&self.descriptor).await
    }

    /// Send with `payload` as the JSON body, replacing any preset body
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidRequest`] if `payload` cannot be serialized, otherwise
    /// see [`PortalClient::execute`].
    pub async fn trigger_with<P: Serialize + ?Sized>(&self, payload: &P) -> Result<T, ApiError> {
        let descriptor = self.descriptor.clone().with_body(payload)?;
        self.client.execute_as(&descriptor).await
    }
}

/// What [`PortalClient::call`] hands back, depending on the verb
#[derive(Debug)]
pub enum ApiCall<T> {
    Query(QueryHandle<T>),
    Mutation(Mutation<T>),
}

impl<T> ApiCall<T> {
    pub fn into_query(self) -> Option<QueryHandle<T>> {
        match self {
            Self::Query(q) => Some(q),
            Self::Mutation(_) => None,
        }
    }

    pub fn into_mutation(self) -> Option<Mutation<T>> {
        match self {
            Self::Query(_) => None,
            Self::Mutation(m) => Some(m),
        }
    }
}
