//! View materializer: joins employees against the reference cache and
//! writes the resulting view rows to the store.

use std::collections::HashMap;

use common::EntityId;
use document_store::{DocumentFilter, DocumentRecord, DocumentStore, DocumentStoreError};
use domain::{Document, DocumentKind};
use futures_util::future::join_all;

use crate::cache::ReferenceDataCache;
use crate::projection::ViewProjection;
use crate::views::standard_views;
use crate::{ProjectionError, Result};

/// What to do when some view writes are rejected.
///
/// Either way every issued write has settled before the policy is applied,
/// and rows that were written stay written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WritePolicy {
    /// Fail the whole materialization if any write was rejected.
    #[default]
    AbortOnFailure,
    /// Keep what succeeded and report the rejected writes.
    CommitSucceeded,
}

impl std::str::FromStr for WritePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "abort" => Ok(WritePolicy::AbortOnFailure),
            "commit" => Ok(WritePolicy::CommitSucceeded),
            other => Err(format!("unknown write policy: {other}")),
        }
    }
}

/// Per-view counts from a materialization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewTally {
    /// Rows the store accepted.
    pub written: usize,
    /// Employees skipped because a reference did not resolve.
    pub missing_reference: usize,
    /// Rows the store rejected.
    pub rejected: usize,
}

/// A view write the store rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    pub view: DocumentKind,
    pub employee_id: EntityId,
    pub message: String,
}

/// Outcome of a materialization run.
#[derive(Debug, Clone, Default)]
pub struct MaterializationReport {
    /// Employee documents returned by the store.
    pub employees_seen: usize,
    /// Employee documents that failed schema validation.
    pub invalid_employees: usize,
    views: HashMap<DocumentKind, ViewTally>,
    /// Every rejected write, in no particular order.
    pub failures: Vec<WriteFailure>,
}

impl MaterializationReport {
    /// Returns the counts for one view.
    pub fn tally(&self, view: DocumentKind) -> ViewTally {
        self.views.get(&view).copied().unwrap_or_default()
    }

    /// Total rows written across all views.
    pub fn rows_written(&self) -> usize {
        self.views.values().map(|t| t.written).sum()
    }

    /// Total writes issued across all views.
    pub fn writes_attempted(&self) -> usize {
        self.views.values().map(|t| t.written + t.rejected).sum()
    }

    /// Returns true if every issued write succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn tally_mut(&mut self, view: DocumentKind) -> &mut ViewTally {
        self.views.entry(view).or_default()
    }
}

/// A view row waiting to be written.
struct PendingWrite {
    view: DocumentKind,
    employee_id: EntityId,
    record: DocumentRecord,
}

/// Builds materialized views from employees and the reference cache.
///
/// Every registered projection is attempted independently for every valid
/// employee, so one employee may yield a row in several views or in none.
/// Each run appends fresh rows; the store does not deduplicate, so running
/// twice against the same data duplicates every row.
pub struct ViewMaterializer<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    cache: &'a ReferenceDataCache,
    projections: Vec<Box<dyn ViewProjection>>,
    policy: WritePolicy,
}

impl<'a, S: DocumentStore + ?Sized> ViewMaterializer<'a, S> {
    /// Creates a materializer with no projections registered.
    pub fn new(store: &'a S, cache: &'a ReferenceDataCache) -> Self {
        Self {
            store,
            cache,
            projections: Vec::new(),
            policy: WritePolicy::default(),
        }
    }

    /// Creates a materializer with the employee-with-city and
    /// employee-with-position views registered.
    pub fn with_standard_views(store: &'a S, cache: &'a ReferenceDataCache) -> Self {
        let mut materializer = Self::new(store, cache);
        for projection in standard_views() {
            materializer.register(projection);
        }
        materializer
    }

    /// Registers a projection with this materializer.
    pub fn register(&mut self, projection: Box<dyn ViewProjection>) {
        self.projections.push(projection);
    }

    /// Sets the policy applied to rejected writes.
    pub fn policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the number of registered projections.
    pub fn projection_count(&self) -> usize {
        self.projections.len()
    }

    /// Queries all employees, joins them, and writes every resulting row.
    ///
    /// All writes are issued concurrently and awaited together. With
    /// [`WritePolicy::AbortOnFailure`] a single rejected write fails the call
    /// with [`ProjectionError::WritesRejected`]; rows already written are not
    /// rolled back. Nothing is retried.
    #[tracing::instrument(skip(self), fields(policy = ?self.policy))]
    pub async fn materialize(&self) -> Result<MaterializationReport> {
        let employees = self
            .store
            .query(DocumentKind::Employee.as_str(), DocumentFilter::all())
            .await
            .map_err(ProjectionError::EmployeeQuery)?;

        let mut report = MaterializationReport {
            employees_seen: employees.len(),
            ..Default::default()
        };
        for projection in &self.projections {
            report.tally_mut(projection.view_kind());
        }

        let pending = self.join_all_employees(&employees.items, &mut report)?;
        let attempted = pending.len();

        let writes = pending.into_iter().map(|write| async move {
            let outcome = self.store.post(write.record).await;
            (write.view, write.employee_id, outcome)
        });
        let outcomes = join_all(writes).await;

        let mut first_error: Option<DocumentStoreError> = None;
        for (view, employee_id, outcome) in outcomes {
            match outcome {
                Ok(()) => {
                    report.tally_mut(view).written += 1;
                    metrics::counter!("views_rows_written", "view" => view.as_str()).increment(1);
                }
                Err(error) => {
                    tracing::error!(%view, %employee_id, %error, "view write rejected");
                    metrics::counter!("views_rows_rejected", "view" => view.as_str())
                        .increment(1);
                    report.tally_mut(view).rejected += 1;
                    report.failures.push(WriteFailure {
                        view,
                        employee_id,
                        message: error.to_string(),
                    });
                    first_error.get_or_insert(error);
                }
            }
        }

        match (first_error, self.policy) {
            (None, _) => {
                tracing::info!(
                    employees = report.employees_seen,
                    rows_written = report.rows_written(),
                    "materialization complete"
                );
                Ok(report)
            }
            (Some(first), WritePolicy::AbortOnFailure) => Err(ProjectionError::WritesRejected {
                attempted,
                failed: report.failures.len(),
                first,
            }),
            (Some(_), WritePolicy::CommitSucceeded) => {
                tracing::warn!(
                    rows_written = report.rows_written(),
                    rejected = report.failures.len(),
                    "materialization committed with rejected writes"
                );
                Ok(report)
            }
        }
    }

    /// Validates employees and runs every projection, collecting the rows to write.
    fn join_all_employees(
        &self,
        items: &[document_store::StoredDocument],
        report: &mut MaterializationReport,
    ) -> Result<Vec<PendingWrite>> {
        let mut pending = Vec::new();

        for item in items {
            let employee = match Document::validate(DocumentKind::Employee, &item.data) {
                Ok(Document::Employee(employee)) => employee,
                Ok(other) => {
                    tracing::debug!(document_id = %item.id, kind = %other.kind(), "skipping non-employee document");
                    report.invalid_employees += 1;
                    metrics::counter!("views_invalid_employee").increment(1);
                    continue;
                }
                Err(violation) => {
                    tracing::debug!(document_id = %item.id, %violation, "skipping invalid employee document");
                    report.invalid_employees += 1;
                    metrics::counter!("views_invalid_employee").increment(1);
                    continue;
                }
            };

            for projection in &self.projections {
                let view = projection.view_kind();
                match projection.project(&employee, self.cache) {
                    Ok(document) => pending.push(PendingWrite {
                        view,
                        employee_id: employee.id.clone(),
                        record: document.to_record()?,
                    }),
                    Err(missing) => {
                        tracing::warn!(
                            view = projection.name(),
                            employee_id = %missing.employee_id,
                            "{missing}; skipping view row"
                        );
                        metrics::counter!("views_missing_reference", "view" => view.as_str())
                            .increment(1);
                        report.tally_mut(view).missing_reference += 1;
                    }
                }
            }
        }

        Ok(pending)
    }
}
