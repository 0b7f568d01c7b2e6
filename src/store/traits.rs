use crate::model::{Contract, Dataset, Document, House, Id, News, Protocol, Report};
use crate::store::error::StoreResult;

/// Reads for houses and the rows that hang off them.
///
/// Houses come back newest first (ties by ascending id). Contracts,
/// protocols and documents come back by ascending id.
#[async_trait::async_trait]
pub trait HouseStore: Send + Sync {
    async fn list_houses(&self) -> StoreResult<Vec<House>>;
    async fn list_contracts(&self) -> StoreResult<Vec<Contract>>;
    async fn list_protocols(&self) -> StoreResult<Vec<Protocol>>;
    async fn list_documents(&self) -> StoreResult<Vec<Document>>;
}

/// Reads for published content. News newest first, reports by id.
#[async_trait::async_trait]
pub trait NewsStore: Send + Sync {
    async fn list_news(&self) -> StoreResult<Vec<News>>;
    async fn list_reports(&self) -> StoreResult<Vec<Report>>;
}

/// The read-only surface the HTTP layer is allowed to see.
pub trait Store: HouseStore + NewsStore + Send + Sync {}
impl<T: HouseStore + NewsStore> Store for T {}

/// Writes performed by administrative tooling, never routed over HTTP.
#[async_trait::async_trait]
pub trait AdminStore: Send + Sync {
    /// Inserts every row whose primary key is not present yet.
    async fn load_dataset(&self, dataset: &Dataset) -> StoreResult<()>;
    /// Removes a house together with its contracts, protocols and documents.
    async fn delete_house(&self, id: Id) -> StoreResult<bool>;
}
