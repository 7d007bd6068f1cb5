//! Database and table listing models.
//!
//! Covers both the raw payloads returned by the Infinity HTTP API and the
//! checked lists handed to the rest of the service.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::{AppError, AppResult};

/// Databases known to the backend, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DatabaseList {
    /// Database names.
    pub databases: Vec<String>,
}

/// Tables of one database, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TableList {
    /// Owning database.
    pub database: String,
    /// Table names.
    pub tables: Vec<String>,
}

/// Raw `GET /databases` payload.
#[derive(Debug, Deserialize)]
pub struct ListDatabaseResponse {
    pub error_code: i64,
    #[serde(default, alias = "error_msg")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub databases: Vec<String>,
}

/// Raw `GET /databases/{db}/tables` payload.
#[derive(Debug, Deserialize)]
pub struct ListTableResponse {
    pub error_code: i64,
    #[serde(default, alias = "error_msg")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub tables: Vec<String>,
}

fn check_error_code(code: i64, message: Option<String>) -> AppResult<()> {
    if code == 0 {
        return Ok(());
    }
    Err(AppError::Backend {
        code,
        message: message.unwrap_or_else(|| "unknown backend error".to_string()),
    })
}

impl ListDatabaseResponse {
    /// Converts the payload, failing on a non-zero error code.
    pub fn into_result(self) -> AppResult<DatabaseList> {
        check_error_code(self.error_code, self.error_message)?;
        Ok(DatabaseList {
            databases: self.databases,
        })
    }
}

impl ListTableResponse {
    /// Converts the payload for `database`, failing on a non-zero error code.
    pub fn into_result(self, database: &str) -> AppResult<TableList> {
        check_error_code(self.error_code, self.error_message)?;
        Ok(TableList {
            database: database.to_string(),
            tables: self.tables,
        })
    }
}

/// Path parameters for the table listing endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct ListTablesPath {
    /// Database name.
    #[validate(length(min = 1, max = 255, message = "Database name must be 1-255 characters"))]
    pub name: String,
}
