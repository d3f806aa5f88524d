#![deny(unsafe_code)]

//! Connection-profile builder.
//!
//! Turns dialect-specific form fields into the single opaque connection
//! string a profile stores. Validation is fail-fast: an incomplete form
//! is rejected before any save or connect request is dispatched.

use smap_model::{ConnectionProfile, DatabaseKind, ProfileParams};

/// Form fields for building a connection profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionForm {
    pub name: String,
    pub kind: DatabaseKind,
    /// SQLite file path.
    pub path: String,
    pub host: String,
    pub port: String,
    pub username: String,
    pub password: String,
    pub database: String,
    /// Escape hatch: use `custom_string` verbatim, bypassing templating.
    pub use_custom: bool,
    pub custom_string: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    /// Required fields are missing for the selected dialect.
    #[error("incomplete connection form: {0}")]
    Incomplete(String),
    /// Saving requires a profile name.
    #[error("profile name is required")]
    MissingName,
}

/// Build the connection string for a form.
///
/// The custom override, when selected and non-empty, is returned
/// verbatim. Otherwise the dialect template applies; the port segment is
/// omitted entirely when no port is supplied.
pub fn build_connection_string(form: &ConnectionForm) -> Result<String, ConnectError> {
    if form.use_custom {
        let custom = form.custom_string.trim();
        if custom.is_empty() {
            return Err(ConnectError::Incomplete(
                "custom connection string selected but empty".to_string(),
            ));
        }
        return Ok(custom.to_string());
    }

    match form.kind {
        DatabaseKind::Sqlite => {
            if form.path.is_empty() {
                return Err(ConnectError::Incomplete(
                    "SQLite requires a file path".to_string(),
                ));
            }
            Ok(format!("sqlite:///{}", form.path.replace('\\', "/")))
        }
        DatabaseKind::Postgres => server_url(form, "postgresql+psycopg2", ""),
        DatabaseKind::Mysql => server_url(form, "mysql+pymysql", ""),
        DatabaseKind::Mssql => server_url(
            form,
            "mssql+pyodbc",
            "?driver=ODBC+Driver+17+for+SQL+Server",
        ),
    }
}

fn server_url(form: &ConnectionForm, scheme: &str, suffix: &str) -> Result<String, ConnectError> {
    if form.host.is_empty() {
        return Err(ConnectError::Incomplete(format!(
            "{} requires a host",
            form.kind
        )));
    }
    if form.database.is_empty() {
        return Err(ConnectError::Incomplete(format!(
            "{} requires a database name",
            form.kind
        )));
    }
    let port = if form.port.is_empty() {
        String::new()
    } else {
        format!(":{}", form.port)
    };
    Ok(format!(
        "{scheme}://{user}:{password}@{host}{port}/{database}{suffix}",
        user = form.username,
        password = form.password,
        host = form.host,
        database = form.database,
    ))
}

/// Assemble the profile payload for an explicit save.
///
/// The params are advisory copies of path/host/database; only the
/// connection string is ever used to connect. Duplicate names overwrite
/// at the store, which keys on name.
pub fn to_profile(form: &ConnectionForm) -> Result<ConnectionProfile, ConnectError> {
    if form.name.trim().is_empty() {
        return Err(ConnectError::MissingName);
    }
    let connection_string = build_connection_string(form)?;
    Ok(ConnectionProfile {
        name: form.name.clone(),
        kind: form.kind,
        params: ProfileParams {
            path: form.path.clone(),
            host: form.host.clone(),
            database: form.database.clone(),
        },
        connection_string,
    })
}
