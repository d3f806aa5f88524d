//! Persisted connection profiles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported source database dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseKind {
    #[default]
    #[serde(rename = "SQLite")]
    Sqlite,
    #[serde(rename = "PostgreSQL")]
    Postgres,
    #[serde(rename = "MySQL")]
    Mysql,
    #[serde(rename = "MSSQL")]
    Mssql,
}

impl DatabaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseKind::Sqlite => "SQLite",
            DatabaseKind::Postgres => "PostgreSQL",
            DatabaseKind::Mysql => "MySQL",
            DatabaseKind::Mssql => "MSSQL",
        }
    }

    /// Conventional server port, as a placeholder hint. SQLite is
    /// file-based and has none.
    pub fn default_port(&self) -> Option<u16> {
        match self {
            DatabaseKind::Sqlite => None,
            DatabaseKind::Postgres => Some(5432),
            DatabaseKind::Mysql => Some(3306),
            DatabaseKind::Mssql => Some(1433),
        }
    }

    /// True for dialects reached over host/port rather than a file path.
    pub fn is_server(&self) -> bool {
        !matches!(self, DatabaseKind::Sqlite)
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DatabaseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(DatabaseKind::Sqlite),
            "postgresql" | "postgres" => Ok(DatabaseKind::Postgres),
            "mysql" | "mariadb" => Ok(DatabaseKind::Mysql),
            "mssql" | "sqlserver" => Ok(DatabaseKind::Mssql),
            other => Err(format!("unknown database kind: {other}")),
        }
    }
}

/// Advisory reference fields stored next to the connection string.
/// Never used to connect; the connection string is the single source of
/// truth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileParams {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub database: String,
}

/// A named, persisted description of how to reach a source database.
///
/// `name` is the store's key; saving under an existing name overwrites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DatabaseKind,
    #[serde(default)]
    pub params: ProfileParams,
    pub connection_string: String,
}
