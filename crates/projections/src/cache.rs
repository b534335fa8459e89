//! In-memory reference data: cities, divisions and positions keyed by id.

use std::collections::HashMap;

use common::EntityId;
use document_store::{DocumentFilter, DocumentStore};
use domain::{City, Division, Document, DocumentKind, Position};

use crate::{ProjectionError, Result};

/// A kind of reference entity held by the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    City,
    Division,
    Position,
}

impl ReferenceKind {
    /// Load order of the reference kinds.
    pub const ALL: [ReferenceKind; 3] = [
        ReferenceKind::City,
        ReferenceKind::Division,
        ReferenceKind::Position,
    ];

    /// Returns the document kind this reference is stored under.
    pub fn document_kind(&self) -> DocumentKind {
        match self {
            ReferenceKind::City => DocumentKind::City,
            ReferenceKind::Division => DocumentKind::Division,
            ReferenceKind::Position => DocumentKind::Position,
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.document_kind().as_str())
    }
}

/// A borrowed reference entity returned by [`ReferenceDataCache::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceEntity<'a> {
    City(&'a City),
    Division(&'a Division),
    Position(&'a Position),
}

impl ReferenceEntity<'_> {
    pub fn kind(&self) -> ReferenceKind {
        match self {
            ReferenceEntity::City(_) => ReferenceKind::City,
            ReferenceEntity::Division(_) => ReferenceKind::Division,
            ReferenceEntity::Position(_) => ReferenceKind::Position,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ReferenceEntity::City(city) => &city.name,
            ReferenceEntity::Division(division) => &division.name,
            ReferenceEntity::Position(position) => &position.name,
        }
    }
}

/// Per-kind counts from a cache load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindSummary {
    /// Documents that validated and were cached.
    pub loaded: usize,
    /// Documents that failed validation and were skipped.
    pub skipped: usize,
}

impl KindSummary {
    /// Returns true if the store returned no documents of this kind.
    pub fn is_empty(&self) -> bool {
        self.loaded == 0 && self.skipped == 0
    }
}

/// Counts from a cache load, per reference kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub cities: KindSummary,
    pub divisions: KindSummary,
    pub positions: KindSummary,
}

impl LoadSummary {
    pub fn get(&self, kind: ReferenceKind) -> KindSummary {
        match kind {
            ReferenceKind::City => self.cities,
            ReferenceKind::Division => self.divisions,
            ReferenceKind::Position => self.positions,
        }
    }

    /// Kinds for which the store returned no documents, in load order.
    pub fn empty_kinds(&self) -> Vec<ReferenceKind> {
        ReferenceKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_empty())
            .collect()
    }

    fn get_mut(&mut self, kind: ReferenceKind) -> &mut KindSummary {
        match kind {
            ReferenceKind::City => &mut self.cities,
            ReferenceKind::Division => &mut self.divisions,
            ReferenceKind::Position => &mut self.positions,
        }
    }
}

/// Identifier-keyed lookup over the reference entities.
///
/// Built once by [`load`](Self::load) and read-only afterwards; there is no
/// refresh or invalidation. Documents that fail schema validation are left
/// out, and an empty cache is a valid state.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataCache {
    cities: HashMap<EntityId, City>,
    divisions: HashMap<EntityId, Division>,
    positions: HashMap<EntityId, Position>,
    summary: LoadSummary,
}

impl ReferenceDataCache {
    /// Creates an empty cache.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a cache directly from entities, without a store.
    pub fn from_entities(
        cities: impl IntoIterator<Item = City>,
        divisions: impl IntoIterator<Item = Division>,
        positions: impl IntoIterator<Item = Position>,
    ) -> Self {
        let mut cache = Self::empty();
        for document in cities
            .into_iter()
            .map(Document::City)
            .chain(divisions.into_iter().map(Document::Division))
            .chain(positions.into_iter().map(Document::Position))
        {
            cache.absorb(document);
        }
        cache
    }

    /// Loads every city, division and position from the store.
    ///
    /// A failing store query aborts the load; no partially filled cache is
    /// returned.
    #[tracing::instrument(skip(store))]
    pub async fn load<S: DocumentStore + ?Sized>(store: &S) -> Result<Self> {
        let mut cache = Self::empty();

        for kind in ReferenceKind::ALL {
            let document_kind = kind.document_kind();
            let result = store
                .query(document_kind.as_str(), DocumentFilter::all())
                .await
                .map_err(|source| ProjectionError::ReferenceLoad {
                    kind: document_kind,
                    source,
                })?;

            if result.is_empty() {
                tracing::warn!(%kind, "no reference documents found");
            }

            for item in &result.items {
                let cached = match Document::validate(document_kind, &item.data) {
                    Ok(document) => cache.absorb(document),
                    Err(violation) => {
                        tracing::debug!(%kind, document_id = %item.id, %violation, "skipping invalid reference document");
                        false
                    }
                };

                let summary = cache.summary.get_mut(kind);
                if cached {
                    summary.loaded += 1;
                    metrics::counter!("reference_documents_loaded", "kind" => document_kind.as_str())
                        .increment(1);
                } else {
                    summary.skipped += 1;
                    metrics::counter!("reference_documents_skipped", "kind" => document_kind.as_str())
                        .increment(1);
                }
            }
        }

        tracing::info!(
            cities = cache.cities.len(),
            divisions = cache.divisions.len(),
            positions = cache.positions.len(),
            "reference data loaded"
        );

        Ok(cache)
    }

    /// Inserts a reference document. Returns false for non-reference kinds.
    fn absorb(&mut self, document: Document) -> bool {
        match document {
            Document::City(city) => {
                self.cities.insert(city.id.clone(), city);
                true
            }
            Document::Division(division) => {
                self.divisions.insert(division.id.clone(), division);
                true
            }
            Document::Position(position) => {
                self.positions.insert(position.id.clone(), position);
                true
            }
            Document::Employee(_)
            | Document::EmployeeWithCityView(_)
            | Document::EmployeeWithPositionView(_) => false,
        }
    }

    /// Looks up a reference entity by kind and id.
    pub fn lookup(&self, kind: ReferenceKind, id: &EntityId) -> Option<ReferenceEntity<'_>> {
        match kind {
            ReferenceKind::City => self.city(id).map(ReferenceEntity::City),
            ReferenceKind::Division => self.division(id).map(ReferenceEntity::Division),
            ReferenceKind::Position => self.position(id).map(ReferenceEntity::Position),
        }
    }

    pub fn city(&self, id: &EntityId) -> Option<&City> {
        self.cities.get(id)
    }

    pub fn division(&self, id: &EntityId) -> Option<&Division> {
        self.divisions.get(id)
    }

    pub fn position(&self, id: &EntityId) -> Option<&Position> {
        self.positions.get(id)
    }

    /// Returns the number of cached entities of a kind.
    pub fn len(&self, kind: ReferenceKind) -> usize {
        match kind {
            ReferenceKind::City => self.cities.len(),
            ReferenceKind::Division => self.divisions.len(),
            ReferenceKind::Position => self.positions.len(),
        }
    }

    /// Returns true if no reference entity of any kind is cached.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.divisions.is_empty() && self.positions.is_empty()
    }

    /// Returns the counts recorded by [`load`](Self::load).
    pub fn summary(&self) -> &LoadSummary {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use document_store::{DocumentStoreExt, InMemoryDocumentStore};
    use serde_json::json;

    async fn seeded_store() -> InMemoryDocumentStore {
        let store = InMemoryDocumentStore::new();
        store
            .post_json(json!({"type": "city", "id": "c1", "name": "Almaty"}))
            .await
            .unwrap();
        store
            .post_json(json!({"type": "city", "id": "c2", "name": "Astana"}))
            .await
            .unwrap();
        store
            .post_json(json!({"type": "division", "id": "d1", "name": "IT", "cityId": "c1"}))
            .await
            .unwrap();
        store
            .post_json(json!({"type": "position", "id": "p1", "name": "Developer"}))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn load_caches_all_reference_kinds() {
        let store = seeded_store().await;
        let cache = ReferenceDataCache::load(&store).await.unwrap();

        assert_eq!(cache.len(ReferenceKind::City), 2);
        assert_eq!(cache.len(ReferenceKind::Division), 1);
        assert_eq!(cache.len(ReferenceKind::Position), 1);
        assert_eq!(cache.city(&"c2".into()).unwrap().name, "Astana");
        assert_eq!(cache.division(&"d1".into()).unwrap().city_id, EntityId::new("c1"));
    }

    #[tokio::test]
    async fn lookup_returns_typed_entity_or_none() {
        let store = seeded_store().await;
        let cache = ReferenceDataCache::load(&store).await.unwrap();

        let city = cache.lookup(ReferenceKind::City, &"c1".into()).unwrap();
        assert_eq!(city.kind(), ReferenceKind::City);
        assert_eq!(city.name(), "Almaty");

        assert!(cache.lookup(ReferenceKind::City, &"missing".into()).is_none());
        // Ids are scoped per kind.
        assert!(cache.lookup(ReferenceKind::Position, &"c1".into()).is_none());
    }

    #[tokio::test]
    async fn invalid_documents_are_skipped_not_errors() {
        let store = seeded_store().await;
        store.insert_raw("city", json!({"id": "c3"})).await;
        store.insert_raw("city", json!({"id": 4, "name": "Shymkent"})).await;
        store.insert_raw("position", json!("not an object")).await;

        let cache = ReferenceDataCache::load(&store).await.unwrap();

        assert_eq!(cache.len(ReferenceKind::City), 2);
        assert_eq!(
            cache.summary().cities,
            KindSummary {
                loaded: 2,
                skipped: 2
            }
        );
        assert_eq!(cache.summary().get(ReferenceKind::Position).skipped, 1);
    }

    #[tokio::test]
    async fn kind_without_documents_loads_as_empty() {
        let store = InMemoryDocumentStore::new();
        store
            .post_json(json!({"type": "city", "id": "c1", "name": "Almaty"}))
            .await
            .unwrap();
        store.insert_raw("position", json!({"id": "p1"})).await;

        let cache = ReferenceDataCache::load(&store).await.unwrap();

        assert_eq!(cache.len(ReferenceKind::City), 1);
        assert_eq!(cache.len(ReferenceKind::Division), 0);
        // An invalid position was fetched, so positions are not reported empty.
        assert_eq!(cache.summary().empty_kinds(), vec![ReferenceKind::Division]);
        assert!(cache.summary().divisions.is_empty());
        assert!(!cache.summary().positions.is_empty());
    }

    #[tokio::test]
    async fn empty_store_yields_empty_cache() {
        let store = InMemoryDocumentStore::new();
        let cache = ReferenceDataCache::load(&store).await.unwrap();

        assert!(cache.is_empty());
        assert_eq!(*cache.summary(), LoadSummary::default());
        assert_eq!(cache.summary().empty_kinds(), ReferenceKind::ALL.to_vec());
    }

    #[tokio::test]
    async fn store_failure_aborts_load() {
        let store = seeded_store().await;
        store.fail_queries_of_type("division").await;

        let err = ReferenceDataCache::load(&store).await.unwrap_err();
        assert!(matches!(
            err,
            ProjectionError::ReferenceLoad {
                kind: DocumentKind::Division,
                ..
            }
        ));
        assert!(err.to_string().starts_with("Failed to load reference data"));
    }

    #[tokio::test]
    async fn later_duplicate_id_wins() {
        let store = seeded_store().await;
        store
            .post_json(json!({"type": "city", "id": "c1", "name": "Almaty (renamed)"}))
            .await
            .unwrap();

        let cache = ReferenceDataCache::load(&store).await.unwrap();
        assert_eq!(cache.city(&"c1".into()).unwrap().name, "Almaty (renamed)");
    }

    #[test]
    fn from_entities_builds_lookup() {
        let cache = ReferenceDataCache::from_entities(
            [City::new("c1", "Almaty")],
            [Division::new("d1", "IT", "c1")],
            [Position::new("p1", "Developer")],
        );

        assert!(!cache.is_empty());
        assert_eq!(
            cache.lookup(ReferenceKind::Division, &"d1".into()).map(|e| e.name().to_string()),
            Some("IT".to_string())
        );
    }
}
