//! Table-store listing backend.
//!
//! The page only ever reads two things from the backend: the database list
//! and the table list of one database. [`ListingBackend`] is that seam;
//! [`HttpListingBackend`] talks to the Infinity HTTP API and
//! [`InMemoryListingBackend`] serves fixed data.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use common::config::BackendConfig;
use common::errors::{AppError, AppResult};
use common::models::{DatabaseList, ListDatabaseResponse, ListTableResponse, TableList};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// Read-only access to databases and tables.
#[async_trait]
pub trait ListingBackend: Send + Sync {
    /// Lists all databases, in backend order.
    async fn list_databases(&self) -> AppResult<DatabaseList>;

    /// Lists the tables of `database`, in backend order.
    async fn list_tables(&self, database: &str) -> AppResult<TableList>;
}

/// Client for the Infinity HTTP API.
pub struct HttpListingBackend {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpListingBackend {
    /// Creates a backend client with the configured timeout.
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("无法创建 HTTP 客户端: {}", e)))?;

        Ok(Self::with_client(config.base_url.clone(), http_client))
    }

    /// Creates a backend client around an existing `reqwest::Client`.
    pub fn with_client(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        }
    }

    fn databases_url(&self) -> String {
        format!("{}/databases", self.base_url)
    }

    fn tables_url(&self, database: &str) -> String {
        format!(
            "{}/databases/{}/tables",
            self.base_url,
            urlencoding::encode(database)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self
            .http_client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!(url, error = %e, "无法连接到后端服务");
                AppError::ExternalService(format!("无法连接到后端服务: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(url, %status, "后端服务返回异常状态");
            return Err(AppError::ExternalService(format!("后端服务返回 HTTP {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("后端服务返回无效响应: {}", e)))
    }
}

#[async_trait]
impl ListingBackend for HttpListingBackend {
    async fn list_databases(&self) -> AppResult<DatabaseList> {
        let raw: ListDatabaseResponse = self.get_json(&self.databases_url()).await?;
        let list = raw.into_result()?;
        debug!(count = list.databases.len(), "已获取数据库列表");
        Ok(list)
    }

    async fn list_tables(&self, database: &str) -> AppResult<TableList> {
        let raw: ListTableResponse = self.get_json(&self.tables_url(database)).await?;
        let list = raw.into_result(database)?;
        debug!(database, count = list.tables.len(), "已获取表列表");
        Ok(list)
    }
}

/// Backend serving a fixed set of databases from memory.
///
/// Databases keep their insertion order. Asking for the tables of an
/// unknown database yields the same error the real backend reports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryListingBackend {
    databases: Vec<String>,
    tables: HashMap<String, Vec<String>>,
    unavailable: bool,
    databases_fail: bool,
    failing_tables: HashSet<String>,
}

/// Error code the Infinity API uses for a missing database.
pub const DB_NOT_EXIST: i64 = 3021;

impl InMemoryListingBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a database with its tables.
    pub fn with_database<I, S>(mut self, name: &str, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.databases.push(name.to_string());
        self.tables
            .insert(name.to_string(), tables.into_iter().map(Into::into).collect());
        self
    }

    /// Makes every call fail as if the backend were down.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Makes `list_databases` fail; table listings keep working.
    pub fn fail_list_databases(mut self) -> Self {
        self.databases_fail = true;
        self
    }

    /// Makes `list_tables` fail for `database` only.
    pub fn fail_tables_of(mut self, database: &str) -> Self {
        self.failing_tables.insert(database.to_string());
        self
    }
}

fn unavailable_error() -> AppError {
    AppError::ExternalService("后端服务不可用".to_string())
}

#[async_trait]
impl ListingBackend for InMemoryListingBackend {
    async fn list_databases(&self) -> AppResult<DatabaseList> {
        if self.unavailable || self.databases_fail {
            return Err(unavailable_error());
        }
        Ok(DatabaseList {
            databases: self.databases.clone(),
        })
    }

    async fn list_tables(&self, database: &str) -> AppResult<TableList> {
        if self.unavailable || self.failing_tables.contains(database) {
            return Err(unavailable_error());
        }
        let tables = self.tables.get(database).ok_or_else(|| AppError::Backend {
            code: DB_NOT_EXIST,
            message: format!("Database: {} doesn't exist.", database),
        })?;
        Ok(TableList {
            database: database.to_string(),
            tables: tables.clone(),
        })
    }
}
