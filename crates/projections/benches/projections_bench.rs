use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use document_store::{DocumentStore, InMemoryDocumentStore};
use domain::{City, Division, Document, Employee, Position};
use projections::{
    EmployeeWithCityProjection, ReferenceDataCache, ViewMaterializer, ViewProjection, ViewReader,
};

const CITIES: usize = 10;
const DIVISIONS: usize = 20;
const POSITIONS: usize = 15;

async fn post(store: &InMemoryDocumentStore, document: Document) {
    store.post(document.to_record().unwrap()).await.unwrap();
}

/// Populate a store with reference data and N employees spread across it.
async fn populate_store(store: &InMemoryDocumentStore, n: usize) {
    for i in 0..CITIES {
        post(store, Document::City(City::new(format!("c{i}"), format!("City {i}")))).await;
    }
    for i in 0..DIVISIONS {
        let city = format!("c{}", i % CITIES);
        post(
            store,
            Document::Division(Division::new(format!("d{i}"), format!("Division {i}"), city)),
        )
        .await;
    }
    for i in 0..POSITIONS {
        post(
            store,
            Document::Position(Position::new(format!("p{i}"), format!("Position {i}"))),
        )
        .await;
    }
    for i in 0..n {
        let employee = Employee::new(format!("e{i}"), format!("First {i}"))
            .with_last_name(format!("Last {i}"))
            .with_city(format!("c{}", i % CITIES))
            .with_division(format!("d{}", i % DIVISIONS))
            .with_position(format!("p{}", i % POSITIONS));
        post(store, Document::Employee(employee)).await;
    }
}

fn populated(rt: &tokio::runtime::Runtime, n: usize) -> InMemoryDocumentStore {
    let store = InMemoryDocumentStore::new();
    rt.block_on(populate_store(&store, n));
    store
}

fn bench_materialize(c: &mut Criterion, n: usize) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let template = populated(&rt, n);
    let cache = rt.block_on(ReferenceDataCache::load(&template)).unwrap();

    c.bench_function(&format!("projections/materialize_{n}_employees"), |b| {
        b.iter_batched(
            || populated(&rt, n),
            |store| {
                rt.block_on(async {
                    ViewMaterializer::with_standard_views(&store, &cache)
                        .materialize()
                        .await
                        .unwrap();
                });
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_materialize_100_employees(c: &mut Criterion) {
    bench_materialize(c, 100);
}

fn bench_materialize_1000_employees(c: &mut Criterion) {
    bench_materialize(c, 1000);
}

fn bench_load_reference_cache(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = populated(&rt, 0);

    c.bench_function("projections/load_reference_cache", |b| {
        b.iter(|| {
            rt.block_on(async {
                ReferenceDataCache::load(&store).await.unwrap();
            });
        });
    });
}

fn bench_project_single_employee(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = populated(&rt, 0);
    let cache = rt.block_on(ReferenceDataCache::load(&store)).unwrap();
    let projection = EmployeeWithCityProjection;
    let employee = Employee::new("e1", "First")
        .with_city("c3")
        .with_division("d3")
        .with_position("p3");

    c.bench_function("projections/project_single_employee", |b| {
        b.iter(|| projection.project(&employee, &cache).unwrap());
    });
}

fn bench_read_1000_rows(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = populated(&rt, 1000);
    let cache = rt.block_on(ReferenceDataCache::load(&store)).unwrap();
    rt.block_on(
        ViewMaterializer::with_standard_views(&store, &cache).materialize(),
    )
    .unwrap();

    c.bench_function("projections/read_1000_city_rows", |b| {
        b.iter(|| {
            rt.block_on(async {
                ViewReader::new(&store).employees_with_city().await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_materialize_100_employees,
    bench_materialize_1000_employees,
    bench_load_reference_cache,
    bench_project_single_employee,
    bench_read_1000_rows,
);
criterion_main!(benches);
