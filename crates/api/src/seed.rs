//! Demo data set: two cities, two divisions, two positions, two employees.

use document_store::{DocumentStore, DocumentStoreError};
use domain::{City, Division, Document, Employee, Position};

const ALMATY: &str = "3ba648aa-4498-43da-b29f-b83f37a25429";
const ASTANA: &str = "32d82d73-3eac-4e5a-9921-fcd2e1447c76";
const IT_DEPARTMENT: &str = "97cf9556-2882-4c4a-b7b5-37cf53347447";
const DIRECTORATE: &str = "3e80754a-3681-4e5c-8d6d-b84d09a7a3c4";
// Shares its id with the directorate; ids are only unique per kind.
const SUPPORT_LEAD: &str = "3e80754a-3681-4e5c-8d6d-b84d09a7a3c4";
const DEVELOPER: &str = "cc811dfb-7f73-4c18-969f-c8408fd92263";

/// Returns the demo documents in posting order.
pub fn demo_documents() -> Vec<Document> {
    vec![
        Document::City(City::new(ALMATY, "Алматы")),
        Document::City(City::new(ASTANA, "Астана")),
        Document::Division(Division::new(
            IT_DEPARTMENT,
            "Департамент информационных технологий",
            ALMATY,
        )),
        Document::Division(Division::new(DIRECTORATE, "Дирекция", ALMATY)),
        Document::Position(Position::new(SUPPORT_LEAD, "Руководитель службы поддержки")),
        Document::Position(Position::new(DEVELOPER, "Разработчик")),
        Document::Employee(demo_employee("65f5c1d4-fb87-4da2-b0bd-a22343605396")),
        Document::Employee(demo_employee("59e23b74-8645-46d6-9751-5fe594dd89e6")),
    ]
}

fn demo_employee(id: &str) -> Employee {
    Employee::new(id, "Name 1")
        .with_last_name("Name 2")
        .with_division(DIRECTORATE)
        .with_city(ALMATY)
        .with_position(DEVELOPER)
}

/// Posts the demo data set to a store, one document at a time.
#[tracing::instrument(skip(store))]
pub async fn seed_demo_data<S: DocumentStore + ?Sized>(store: &S) -> Result<usize, DocumentStoreError> {
    let documents = demo_documents();
    let count = documents.len();
    for document in documents {
        store.post(document.to_record()?).await?;
    }
    tracing::info!(count, "seeded demo data");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use document_store::InMemoryDocumentStore;

    #[tokio::test]
    async fn seeds_every_kind() {
        let store = InMemoryDocumentStore::new();

        let count = seed_demo_data(&store).await.unwrap();

        assert_eq!(count, 8);
        for kind in ["city", "division", "position", "employee"] {
            assert_eq!(store.count_of_type(kind).await, 2);
        }
    }

    #[test]
    fn demo_documents_pass_validation() {
        for document in demo_documents() {
            let record = document.to_record().unwrap();
            assert_eq!(
                Document::validate(document.kind(), &record.data).unwrap(),
                document
            );
        }
    }
}
