use std::collections::BTreeMap;

use tokio::sync::RwLock;

use crate::model::{
    Contract, Dataset, Document, Entity, House, HouseOwned, Id, News, Protocol, Report,
};
use crate::store::error::{StoreError, StoreResult};
use crate::store::traits::{AdminStore, HouseStore, NewsStore};

#[derive(Debug, Default)]
struct Tables {
    houses: BTreeMap<Id, House>,
    news: BTreeMap<Id, News>,
    reports: BTreeMap<Id, Report>,
    contracts: BTreeMap<Id, Contract>,
    protocols: BTreeMap<Id, Protocol>,
    documents: BTreeMap<Id, Document>,
}

/// In-process store with the same ordering and cascade rules as the
/// Postgres schema. Tables are keyed by id, so iteration is id ascending.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn from_dataset(dataset: &Dataset) -> StoreResult<Self> {
        let store = Self::new();
        store.load_dataset(dataset).await?;
        Ok(store)
    }
}

fn by_id<T: Clone>(table: &BTreeMap<Id, T>) -> Vec<T> {
    table.values().cloned().collect()
}

fn insert_missing<T: Clone>(table: &mut BTreeMap<Id, T>, rows: &[T], id: impl Fn(&T) -> Id) {
    for row in rows {
        table.entry(id(row)).or_insert_with(|| row.clone());
    }
}

fn drop_owned_by<T: HouseOwned>(table: &mut BTreeMap<Id, T>, house_id: Id) -> usize {
    let before = table.len();
    table.retain(|_, row| row.house_id() != house_id);
    before - table.len()
}

#[async_trait::async_trait]
impl HouseStore for MemoryStore {
    async fn list_houses(&self) -> StoreResult<Vec<House>> {
        let tables = self.tables.read().await;
        let mut houses = by_id(&tables.houses);
        // stable sort keeps ascending id among equal dates
        houses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(houses)
    }

    async fn list_contracts(&self) -> StoreResult<Vec<Contract>> {
        Ok(by_id(&self.tables.read().await.contracts))
    }

    async fn list_protocols(&self) -> StoreResult<Vec<Protocol>> {
        Ok(by_id(&self.tables.read().await.protocols))
    }

    async fn list_documents(&self) -> StoreResult<Vec<Document>> {
        Ok(by_id(&self.tables.read().await.documents))
    }
}

#[async_trait::async_trait]
impl NewsStore for MemoryStore {
    async fn list_news(&self) -> StoreResult<Vec<News>> {
        let tables = self.tables.read().await;
        let mut news = by_id(&tables.news);
        news.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(news)
    }

    async fn list_reports(&self) -> StoreResult<Vec<Report>> {
        Ok(by_id(&self.tables.read().await.reports))
    }
}

#[async_trait::async_trait]
impl AdminStore for MemoryStore {
    async fn load_dataset(&self, dataset: &Dataset) -> StoreResult<()> {
        let mut tables = self.tables.write().await;

        // Reject the whole load if any dependent points at a house that
        // exists in neither the dataset nor the store.
        for (table, id, house_id) in dataset.dangling_house_refs() {
            if !tables.houses.contains_key(&house_id) {
                return Err(StoreError::query_failed(
                    Entity::Houses,
                    format!("{} row {} references missing house {}", table, id, house_id),
                ));
            }
        }

        insert_missing(&mut tables.houses, &dataset.houses, |h| h.id);
        insert_missing(&mut tables.news, &dataset.news, |n| n.id);
        insert_missing(&mut tables.reports, &dataset.reports, |r| r.id);
        insert_missing(&mut tables.contracts, &dataset.contracts, |c| c.id);
        insert_missing(&mut tables.protocols, &dataset.protocols, |p| p.id);
        insert_missing(&mut tables.documents, &dataset.documents, |d| d.id);

        log::debug!(
            "memory store now holds {} houses, {} news",
            tables.houses.len(),
            tables.news.len()
        );
        Ok(())
    }

    async fn delete_house(&self, id: Id) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.houses.remove(&id).is_none() {
            return Ok(false);
        }

        let removed = drop_owned_by(&mut tables.contracts, id)
            + drop_owned_by(&mut tables.protocols, id)
            + drop_owned_by(&mut tables.documents, id);
        log::debug!("deleted house {} and {} dependent rows", id, removed);
        Ok(true)
    }
}
