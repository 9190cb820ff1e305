//! Zero-row metadata probe.
//!
//! Some drivers (Oracle, PostgreSQL) describe result columns unreliably
//! without executing. For those importers the host value class of every
//! column is harvested from a statement guaranteed to return no rows
//! (`SELECT * FROM t WHERE 1 = 2`) before inference runs.
//!
//! The connectivity layer is abstracted behind [`ProbeConnection`] and
//! [`ProbeStatement`]; the statement is closed on every exit path and the
//! probe's rows are never read.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::core::traits::Importer;
use crate::core::typespec::{RawColumn, TypeSpec};
use crate::error::{BoxError, Result, XlateError};

/// One column as described by the probe statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedColumn {
    pub name: String,
    /// Host value class, e.g. `oracle.sql.TIMESTAMPTZ`.
    pub java_class: Option<String>,
}

impl ProbedColumn {
    pub fn new(name: impl Into<String>, java_class: Option<&str>) -> Self {
        Self {
            name: name.into(),
            java_class: java_class.map(str::to_string),
        }
    }
}

/// A prepared probe statement.
#[async_trait]
pub trait ProbeStatement: Send {
    /// Result-set metadata, in column order.
    async fn describe(&mut self) -> std::result::Result<Vec<ProbedColumn>, BoxError>;

    /// Release the statement and any result-set handle.
    async fn close(self: Box<Self>) -> std::result::Result<(), BoxError>;
}

/// Connection able to prepare probe statements.
#[async_trait]
pub trait ProbeConnection: Send + Sync {
    async fn prepare(&self, sql: &str) -> std::result::Result<Box<dyn ProbeStatement>, BoxError>;
}

/// Run the importer's probe for `table` and fill in each column's host class
/// by position.
///
/// # Errors
///
/// [`XlateError::Probe`] when the driver fails to prepare or describe, and
/// [`XlateError::ProbeMismatch`] when the probe's column count differs from
/// `columns`. The statement is closed before either is returned; a failed
/// close is logged and does not mask the outcome.
pub async fn harvest_host_classes(
    conn: &dyn ProbeConnection,
    importer: &dyn Importer,
    table: &str,
    columns: &mut [RawColumn],
) -> Result<()> {
    let sql = importer.probe_sql(table);
    debug!("Probing {} for host classes: {}", table, sql);

    let mut stmt = conn
        .prepare(&sql)
        .await
        .map_err(|e| XlateError::probe(sql.as_str(), e))?;
    let described = stmt.describe().await;
    if let Err(e) = stmt.close().await {
        warn!("Failed to close probe statement for {}: {}", table, e);
    }
    let probed = described.map_err(|e| XlateError::probe(sql.as_str(), e))?;

    if probed.len() != columns.len() {
        return Err(XlateError::ProbeMismatch {
            table: table.to_string(),
            expected: columns.len(),
            probed: probed.len(),
        });
    }
    for (column, probed) in columns.iter_mut().zip(probed) {
        if probed.java_class.is_some() {
            column.java_class = probed.java_class;
        }
    }
    Ok(())
}

/// Infer every column of `table`, probing first when the importer needs it.
pub async fn import_columns(
    conn: &dyn ProbeConnection,
    importer: &dyn Importer,
    table: &str,
    mut columns: Vec<RawColumn>,
) -> Result<Vec<TypeSpec>> {
    if importer.requires_probe() {
        harvest_host_classes(conn, importer, table, &mut columns).await?;
    }
    Ok(columns.iter().map(|raw| importer.infer(raw)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sql_types;
    use crate::core::typespec::TypeKind;
    use crate::drivers::{Db2Importer, OracleImporter};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Copy)]
    enum Outcome {
        Describe,
        DescribeFails,
        CloseFails,
    }

    struct MockStatement {
        columns: Vec<ProbedColumn>,
        outcome: Outcome,
        closed: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ProbeStatement for MockStatement {
        async fn describe(&mut self) -> std::result::Result<Vec<ProbedColumn>, BoxError> {
            match self.outcome {
                Outcome::DescribeFails => Err("ORA-00942: table or view does not exist".into()),
                _ => Ok(self.columns.clone()),
            }
        }

        async fn close(self: Box<Self>) -> std::result::Result<(), BoxError> {
            self.closed.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Outcome::CloseFails => Err("connection reset".into()),
                _ => Ok(()),
            }
        }
    }

    struct MockConnection {
        columns: Vec<ProbedColumn>,
        outcome: Outcome,
        closed: Arc<AtomicUsize>,
        prepared: Mutex<Vec<String>>,
    }

    impl MockConnection {
        fn new(columns: Vec<ProbedColumn>, outcome: Outcome) -> Self {
            Self {
                columns,
                outcome,
                closed: Arc::new(AtomicUsize::new(0)),
                prepared: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ProbeConnection for MockConnection {
        async fn prepare(&self, sql: &str) -> std::result::Result<Box<dyn ProbeStatement>, BoxError> {
            self.prepared.lock().unwrap().push(sql.to_string());
            Ok(Box::new(MockStatement {
                columns: self.columns.clone(),
                outcome: self.outcome,
                closed: Arc::clone(&self.closed),
            }))
        }
    }

    struct RefusingConnection;

    #[async_trait]
    impl ProbeConnection for RefusingConnection {
        async fn prepare(&self, _sql: &str) -> std::result::Result<Box<dyn ProbeStatement>, BoxError> {
            Err("not connected".into())
        }
    }

    fn oracle_columns() -> Vec<RawColumn> {
        vec![
            RawColumn::new("NUMBER", sql_types::NUMERIC).with_size(10).with_scale(0),
            RawColumn::new("SYS.ANYDATA", sql_types::OTHER),
        ]
    }

    fn probed() -> Vec<ProbedColumn> {
        vec![
            ProbedColumn::new("ID", Some("java.math.BigDecimal")),
            ProbedColumn::new("TS", Some("oracle.sql.TIMESTAMPTZ")),
        ]
    }

    #[tokio::test]
    async fn test_probe_fills_host_classes() {
        let conn = MockConnection::new(probed(), Outcome::Describe);
        let specs = import_columns(&conn, &OracleImporter::new(), "HR.EMP", oracle_columns())
            .await
            .unwrap();

        assert_eq!(specs[0].kind, TypeKind::Fixed);
        assert_eq!(specs[1].kind, TypeKind::TimestampTz);
        assert_eq!(
            specs[1].jdbc.java_class.as_deref(),
            Some("oracle.sql.TIMESTAMPTZ")
        );
        assert_eq!(
            conn.prepared.lock().unwrap().as_slice(),
            ["SELECT * FROM HR.EMP WHERE 1 = 2"]
        );
        assert_eq!(conn.closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_probe_when_not_required() {
        let conn = MockConnection::new(Vec::new(), Outcome::Describe);
        let columns = vec![RawColumn::new("SMALLINT", sql_types::SMALLINT).with_size(16)];
        let specs = import_columns(&conn, &Db2Importer::new(), "T", columns)
            .await
            .unwrap();
        assert_eq!(specs.len(), 1);
        assert!(conn.prepared.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_describe_failure_propagates_and_closes() {
        let conn = MockConnection::new(probed(), Outcome::DescribeFails);
        let mut columns = oracle_columns();
        let err = harvest_host_classes(&conn, &OracleImporter::new(), "HR.EMP", &mut columns)
            .await
            .unwrap_err();

        assert!(matches!(err, XlateError::Probe { .. }));
        assert!(err.format_detailed().contains("ORA-00942"));
        assert_eq!(conn.closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_column_count_mismatch_closes() {
        let conn = MockConnection::new(probed()[..1].to_vec(), Outcome::Describe);
        let mut columns = oracle_columns();
        let err = harvest_host_classes(&conn, &OracleImporter::new(), "HR.EMP", &mut columns)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            XlateError::ProbeMismatch {
                expected: 2,
                probed: 1,
                ..
            }
        ));
        assert_eq!(conn.closed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_close_failure_is_not_fatal() {
        let conn = MockConnection::new(probed(), Outcome::CloseFails);
        let mut columns = oracle_columns();
        harvest_host_classes(&conn, &OracleImporter::new(), "HR.EMP", &mut columns)
            .await
            .unwrap();
        assert_eq!(columns[1].java_class.as_deref(), Some("oracle.sql.TIMESTAMPTZ"));
    }

    #[tokio::test]
    async fn test_prepare_failure() {
        let mut columns = oracle_columns();
        let err = harvest_host_classes(&RefusingConnection, &OracleImporter::new(), "T", &mut columns)
            .await
            .unwrap_err();
        assert!(matches!(err, XlateError::Probe { ref sql, .. } if sql == "SELECT * FROM T WHERE 1 = 2"));
    }
}
