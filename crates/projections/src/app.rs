//! Application façade: initialization lifecycle and view access.

use std::sync::Arc;

use document_store::DocumentStore;
use domain::UpdateRequest;
use tokio::sync::RwLock;

use crate::cache::ReferenceDataCache;
use crate::materializer::{MaterializationReport, ViewMaterializer, WritePolicy};
use crate::reader::ViewReader;
use crate::views::{EmployeeWithCity, EmployeeWithPosition};
use crate::{ProjectionError, Result};

/// Lifecycle state of an [`HrApp`].
enum AppState {
    Uninitialized,
    Ready(Arc<ReferenceDataCache>),
}

/// The HR application: loads reference data, materializes the employee
/// views once, then serves them.
///
/// The app moves from uninitialized to ready exactly once, through
/// [`initialize`](Self::initialize). A failed initialization leaves it
/// uninitialized; view writes that landed before the failure are not
/// rolled back.
pub struct HrApp<S: DocumentStore> {
    store: S,
    policy: WritePolicy,
    state: RwLock<AppState>,
}

impl<S: DocumentStore> HrApp<S> {
    /// Creates an uninitialized app over a store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: WritePolicy::default(),
            state: RwLock::new(AppState::Uninitialized),
        }
    }

    /// Sets the policy applied to rejected view writes during initialization.
    pub fn with_policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Creates an app and initializes it.
    pub async fn create(store: S, policy: WritePolicy) -> Result<Self> {
        let app = Self::new(store).with_policy(policy);
        app.initialize().await?;
        Ok(app)
    }

    /// Loads the reference cache, then materializes the views against it.
    ///
    /// Fails with [`ProjectionError::AlreadyInitialized`] if the app is
    /// already ready; any load or materialization failure is wrapped in
    /// [`ProjectionError::Initialization`].
    #[tracing::instrument(skip(self))]
    pub async fn initialize(&self) -> Result<MaterializationReport> {
        let mut state = self.state.write().await;
        if matches!(*state, AppState::Ready(_)) {
            return Err(ProjectionError::AlreadyInitialized);
        }

        let wrap = |e: ProjectionError| ProjectionError::Initialization(Box::new(e));

        let cache = ReferenceDataCache::load(&self.store).await.map_err(wrap)?;
        let report = ViewMaterializer::with_standard_views(&self.store, &cache)
            .policy(self.policy)
            .materialize()
            .await
            .map_err(wrap)?;

        *state = AppState::Ready(Arc::new(cache));
        tracing::info!("application ready");
        Ok(report)
    }

    /// Returns true once initialization has succeeded.
    pub async fn is_ready(&self) -> bool {
        matches!(*self.state.read().await, AppState::Ready(_))
    }

    /// Returns the reference cache built during initialization.
    pub async fn reference_cache(&self) -> Option<Arc<ReferenceDataCache>> {
        match &*self.state.read().await {
            AppState::Ready(cache) => Some(Arc::clone(cache)),
            AppState::Uninitialized => None,
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists every employee with their city name.
    pub async fn employee_with_city_list(&self) -> Result<Vec<EmployeeWithCity>> {
        self.ensure_ready().await?;
        ViewReader::new(&self.store).employees_with_city().await
    }

    /// Lists every employee with their position and division names.
    pub async fn employee_with_position_list(&self) -> Result<Vec<EmployeeWithPosition>> {
        self.ensure_ready().await?;
        ViewReader::new(&self.store).employees_with_position().await
    }

    /// Accepts an update to a normalized entity.
    ///
    /// Write-back is not implemented: the request is accepted and ignored,
    /// and views are not rebuilt.
    #[tracing::instrument(skip(self, request), fields(entity = ?request.entity))]
    pub async fn update(&self, request: UpdateRequest) -> Result<()> {
        // TODO: persist the entity and re-materialize the views that reference it.
        tracing::debug!(
            kind = %request.entity.document_kind(),
            "normalized write-back not implemented, update ignored"
        );
        Ok(())
    }

    async fn ensure_ready(&self) -> Result<()> {
        if self.is_ready().await {
            Ok(())
        } else {
            Err(ProjectionError::NotReady)
        }
    }
}
