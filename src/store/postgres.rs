use std::time::Duration;

use anyhow::Context;
use log::{debug, info, warn};
use sqlx::{
    postgres::{PgPoolOptions, PgRow},
    PgPool, Row,
};

use crate::config::DatabaseConfig;
use crate::model::{Contract, Dataset, Document, Entity, House, Id, News, Protocol, Report};
use crate::store::error::{StoreError, StoreResult};
use crate::store::traits::{AdminStore, HouseStore, NewsStore};

const SELECT_HOUSES: &str =
    "SELECT id, address, date, area, tariff FROM houses ORDER BY date DESC, id ASC";
const SELECT_NEWS: &str =
    "SELECT id, title, date, image, report, text FROM news ORDER BY date DESC, id ASC";
const SELECT_REPORTS: &str = "SELECT id, text, image, report_id FROM reports ORDER BY id";
const SELECT_CONTRACTS: &str = "SELECT id, text, house_id FROM contracts ORDER BY id";
const SELECT_PROTOCOLS: &str =
    "SELECT id, name, number, date, link, house_id FROM protocols ORDER BY id";
const SELECT_DOCUMENTS: &str =
    "SELECT id, name, number, date, link, house_id FROM documents ORDER BY id";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
    query_timeout: Duration,
}

impl PostgresStore {
    /// Create a new PostgreSQL store, opening the first connection eagerly
    pub async fn new(database_url: &str, config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = Self::pool_options(config)
            .connect(database_url)
            .await
            .map_err(|e| {
                StoreError::StorageUnavailable(format!(
                    "failed to create PostgreSQL connection pool: {}",
                    e
                ))
            })?;
        info!(
            "PostgreSQL pool ready (max {} connections)",
            config.max_connections
        );

        Ok(Self {
            pool,
            query_timeout: config.query_timeout(),
        })
    }

    /// Create a store whose connections are opened on first use
    pub fn connect_lazy(database_url: &str, config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = Self::pool_options(config)
            .connect_lazy(database_url)
            .map_err(|e| StoreError::StorageUnavailable(e.to_string()))?;

        Ok(Self {
            pool,
            query_timeout: config.query_timeout(),
        })
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs one fixed read. Connection acquisition is bounded by the pool's
    /// acquire timeout and any failure there means the store is unavailable;
    /// only the read itself runs under the per-query timeout. The connection
    /// goes back to the pool when this returns, on every path.
    async fn fetch<T: Send>(
        &self,
        entity: Entity,
        sql: &'static str,
        map: fn(&PgRow) -> Result<T, sqlx::Error>,
    ) -> StoreResult<Vec<T>> {
        let mut conn = self.pool.acquire().await.map_err(|e| {
            let err = StoreError::StorageUnavailable(e.to_string());
            warn!("no connection for {}: {}", entity, err);
            err
        })?;

        let read = async {
            let rows = sqlx::query(sql).fetch_all(&mut *conn).await?;
            rows.iter().map(map).collect::<Result<Vec<T>, sqlx::Error>>()
        };

        match tokio::time::timeout(self.query_timeout, read).await {
            Ok(Ok(records)) => {
                debug!("fetched {} rows from {}", records.len(), entity);
                Ok(records)
            }
            Ok(Err(e)) => {
                let err = StoreError::from_sqlx(entity, e);
                warn!("{}", err);
                Err(err)
            }
            Err(_) => {
                warn!("read of {} exceeded {:?}", entity, self.query_timeout);
                Err(StoreError::query_failed(
                    entity,
                    format!("timed out after {:?}", self.query_timeout),
                ))
            }
        }
    }
}

fn house_from_row(row: &PgRow) -> Result<House, sqlx::Error> {
    Ok(House {
        id: row.try_get("id")?,
        address: row.try_get("address")?,
        date: row.try_get("date")?,
        area: row.try_get("area")?,
        tariff: row.try_get("tariff")?,
    })
}

fn news_from_row(row: &PgRow) -> Result<News, sqlx::Error> {
    Ok(News {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        date: row.try_get("date")?,
        image: row.try_get("image")?,
        report: row.try_get("report")?,
        text: row.try_get("text")?,
    })
}

fn report_from_row(row: &PgRow) -> Result<Report, sqlx::Error> {
    Ok(Report {
        id: row.try_get("id")?,
        text: row.try_get("text")?,
        image: row.try_get("image")?,
        report_id: row.try_get("report_id")?,
    })
}

fn contract_from_row(row: &PgRow) -> Result<Contract, sqlx::Error> {
    Ok(Contract {
        id: row.try_get("id")?,
        text: row.try_get("text")?,
        house_id: row.try_get("house_id")?,
    })
}

fn protocol_from_row(row: &PgRow) -> Result<Protocol, sqlx::Error> {
    Ok(Protocol {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        number: row.try_get("number")?,
        date: row.try_get("date")?,
        link: row.try_get("link")?,
        house_id: row.try_get("house_id")?,
    })
}

fn document_from_row(row: &PgRow) -> Result<Document, sqlx::Error> {
    Ok(Document {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        number: row.try_get("number")?,
        date: row.try_get("date")?,
        link: row.try_get("link")?,
        house_id: row.try_get("house_id")?,
    })
}

#[async_trait::async_trait]
impl HouseStore for PostgresStore {
    async fn list_houses(&self) -> StoreResult<Vec<House>> {
        self.fetch(Entity::Houses, SELECT_HOUSES, house_from_row).await
    }

    async fn list_contracts(&self) -> StoreResult<Vec<Contract>> {
        self.fetch(Entity::Contracts, SELECT_CONTRACTS, contract_from_row)
            .await
    }

    async fn list_protocols(&self) -> StoreResult<Vec<Protocol>> {
        self.fetch(Entity::Protocols, SELECT_PROTOCOLS, protocol_from_row)
            .await
    }

    async fn list_documents(&self) -> StoreResult<Vec<Document>> {
        self.fetch(Entity::Documents, SELECT_DOCUMENTS, document_from_row)
            .await
    }
}

#[async_trait::async_trait]
impl NewsStore for PostgresStore {
    async fn list_news(&self) -> StoreResult<Vec<News>> {
        self.fetch(Entity::News, SELECT_NEWS, news_from_row).await
    }

    async fn list_reports(&self) -> StoreResult<Vec<Report>> {
        self.fetch(Entity::Reports, SELECT_REPORTS, report_from_row)
            .await
    }
}

#[async_trait::async_trait]
impl AdminStore for PostgresStore {
    async fn load_dataset(&self, dataset: &Dataset) -> StoreResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::from_sqlx(Entity::Houses, e))?;

        for house in &dataset.houses {
            sqlx::query(
                "INSERT INTO houses (id, address, date, area, tariff) VALUES ($1, $2, $3, $4, $5) \
                 ON CONFLICT (id) DO NOTHING",
            )
            .bind(house.id)
            .bind(&house.address)
            .bind(house.date)
            .bind(&house.area)
            .bind(&house.tariff)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_sqlx(Entity::Houses, e))?;
        }

        for news in &dataset.news {
            sqlx::query(
                "INSERT INTO news (id, title, date, image, report, text) VALUES ($1, $2, $3, $4, $5, $6) \
                 ON CONFLICT (id) DO NOTHING",
            )
            .bind(news.id)
            .bind(&news.title)
            .bind(news.date)
            .bind(&news.image)
            .bind(news.report)
            .bind(&news.text)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_sqlx(Entity::News, e))?;
        }

        for report in &dataset.reports {
            sqlx::query(
                "INSERT INTO reports (id, text, image, report_id) VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (id) DO NOTHING",
            )
            .bind(report.id)
            .bind(&report.text)
            .bind(&report.image)
            .bind(report.report_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_sqlx(Entity::Reports, e))?;
        }

        for contract in &dataset.contracts {
            sqlx::query(
                "INSERT INTO contracts (id, text, house_id) VALUES ($1, $2, $3) \
                 ON CONFLICT (id) DO NOTHING",
            )
            .bind(contract.id)
            .bind(&contract.text)
            .bind(contract.house_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_sqlx(Entity::Contracts, e))?;
        }

        for protocol in &dataset.protocols {
            sqlx::query(
                "INSERT INTO protocols (id, name, number, date, link, house_id) VALUES ($1, $2, $3, $4, $5, $6) \
                 ON CONFLICT (id) DO NOTHING",
            )
            .bind(protocol.id)
            .bind(&protocol.name)
            .bind(protocol.number)
            .bind(protocol.date)
            .bind(&protocol.link)
            .bind(protocol.house_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_sqlx(Entity::Protocols, e))?;
        }

        for document in &dataset.documents {
            sqlx::query(
                "INSERT INTO documents (id, name, number, date, link, house_id) VALUES ($1, $2, $3, $4, $5, $6) \
                 ON CONFLICT (id) DO NOTHING",
            )
            .bind(document.id)
            .bind(&document.name)
            .bind(document.number)
            .bind(document.date)
            .bind(&document.link)
            .bind(document.house_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_sqlx(Entity::Documents, e))?;
        }

        // Explicit ids bypass the SERIAL sequences; move them past the
        // loaded rows so later inserts by admin tooling don't collide.
        for entity in Entity::ALL {
            let sql = format!(
                "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
                 COALESCE((SELECT MAX(id) FROM {table}), 0) + 1, false)",
                table = entity.table()
            );
            sqlx::query(&sql)
                .execute(&mut *tx)
                .await
                .map_err(|e| StoreError::from_sqlx(entity, e))?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::from_sqlx(Entity::Houses, e))?;
        info!(
            "loaded dataset: {} houses, {} news, {} reports",
            dataset.houses.len(),
            dataset.news.len(),
            dataset.reports.len()
        );
        Ok(())
    }

    async fn delete_house(&self, id: Id) -> StoreResult<bool> {
        // contracts, protocols and documents follow via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM houses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(Entity::Houses, e))?;

        Ok(result.rows_affected() > 0)
    }
}
