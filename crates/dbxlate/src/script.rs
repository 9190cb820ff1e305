//! SQL script assembly over one [`ScriptGenerator`].
//!
//! The builder turns canonical table definitions and rows into statements:
//! `CREATE TABLE`, foreign keys as separate `ALTER TABLE` statements,
//! `INSERT`, key-based `UPDATE`/`DELETE`, and whole [`TableDiff`]s.
//!
//! Rendering never stops at a column it cannot express exactly. Every loss
//! becomes a warning prefixed with `table.column`, and only
//! [`ScriptOptions::warnings_as_errors`] turns warnings into a failure.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::schema::{ColumnDef, TableDef};
use crate::core::traits::{Rendered, ScriptGenerator};
use crate::core::value::SqlValue;
use crate::diff::{Row, TableDiff};
use crate::error::{Result, XlateError};

/// Statement layout options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptOptions {
    /// Appended to every statement by [`Script::to_sql`].
    pub terminator: String,

    /// Prefix table names with their schema.
    pub qualify_schema: bool,

    /// Emit a `PRIMARY KEY` constraint in `CREATE TABLE`.
    pub include_primary_key: bool,

    /// Emit `ALTER TABLE ... ADD CONSTRAINT ... FOREIGN KEY` statements.
    pub include_foreign_keys: bool,

    /// Fail with [`XlateError::Lossy`] instead of collecting warnings.
    pub warnings_as_errors: bool,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            terminator: ";".to_string(),
            qualify_schema: true,
            include_primary_key: true,
            include_foreign_keys: true,
            warnings_as_errors: false,
        }
    }
}

/// Statements plus the losses incurred producing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Script {
    pub statements: Vec<String>,
    pub warnings: Vec<String>,
}

impl Script {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Append another script's statements and warnings.
    pub fn extend(&mut self, other: Script) {
        self.statements.extend(other.statements);
        self.warnings.extend(other.warnings);
    }

    /// One statement per line, each followed by `terminator`.
    pub fn to_sql(&self, terminator: &str) -> String {
        let mut out = String::new();
        for stmt in &self.statements {
            out.push_str(stmt);
            out.push_str(terminator);
            out.push('\n');
        }
        out
    }

    fn absorb(&mut self, context: &str, rendered: Rendered) -> String {
        self.warnings
            .extend(rendered.warnings.into_iter().map(|w| format!("{}: {}", context, w)));
        rendered.text
    }
}

/// Builds scripts for one target dialect.
///
/// # Example
///
/// ```rust
/// use dbxlate::core::{ColumnDef, TableDef, TypeKind, TypeSpec};
/// use dbxlate::drivers::PostgresGenerator;
/// use dbxlate::script::{ScriptBuilder, ScriptOptions};
///
/// let table = TableDef {
///     schema: None,
///     name: "emp".to_string(),
///     columns: vec![ColumnDef {
///         name: "id".to_string(),
///         spec: TypeSpec::integer_bits(32),
///         is_nullable: false,
///     }],
///     primary_key: vec!["id".to_string()],
///     foreign_keys: vec![],
/// };
/// let gen = PostgresGenerator::new();
/// let script = ScriptBuilder::new(&gen, ScriptOptions::default())
///     .create_table(&table)
///     .unwrap();
/// assert_eq!(
///     script.statements[0],
///     "CREATE TABLE \"emp\" (\n    \"id\" integer NOT NULL,\n    PRIMARY KEY (\"id\")\n)"
/// );
/// ```
pub struct ScriptBuilder<'g> {
    generator: &'g dyn ScriptGenerator,
    options: ScriptOptions,
}

impl<'g> ScriptBuilder<'g> {
    pub fn new(generator: &'g dyn ScriptGenerator, options: ScriptOptions) -> Self {
        Self { generator, options }
    }

    pub fn options(&self) -> &ScriptOptions {
        &self.options
    }

    pub fn dialect(&self) -> &str {
        self.generator.name()
    }

    fn qualify(&self, schema: Option<&str>, name: &str) -> String {
        match schema {
            Some(s) if self.options.qualify_schema && !s.is_empty() => format!(
                "{}.{}",
                self.generator.quote_ident(s),
                self.generator.quote_ident(name)
            ),
            _ => self.generator.quote_ident(name),
        }
    }

    /// Quoted, optionally schema-qualified table name.
    pub fn table_name(&self, table: &TableDef) -> String {
        self.qualify(table.schema.as_deref(), &table.name)
    }

    fn quote_list(&self, names: &[String]) -> String {
        names
            .iter()
            .map(|n| self.generator.quote_ident(n))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn context(table: &TableDef, column: &ColumnDef) -> String {
        format!("{}.{}", table.name, column.name)
    }

    /// Hand the script back, or fail if warnings are fatal.
    fn finish(&self, context: String, script: Script) -> Result<Script> {
        if script.warnings.is_empty() {
            return Ok(script);
        }
        if self.options.warnings_as_errors {
            return Err(XlateError::lossy(context, script.warnings));
        }
        for w in &script.warnings {
            warn!("{}", w);
        }
        Ok(script)
    }

    fn check_row(table: &TableDef, row: &[SqlValue<'_>]) -> Result<()> {
        if row.len() != table.columns.len() {
            return Err(XlateError::Script(format!(
                "{} has {} columns but the row has {} values",
                table.full_name(),
                table.columns.len(),
                row.len()
            )));
        }
        Ok(())
    }

    fn key_indexes(table: &TableDef) -> Result<Vec<usize>> {
        if !table.has_pk() {
            return Err(XlateError::Script(format!(
                "{} has no primary key",
                table.full_name()
            )));
        }
        table.key_indexes().ok_or_else(|| {
            XlateError::Script(format!(
                "primary key of {} names a column the table does not have",
                table.full_name()
            ))
        })
    }

    fn literal(
        &self,
        script: &mut Script,
        table: &TableDef,
        column: &ColumnDef,
        value: &SqlValue<'_>,
    ) -> String {
        let rendered = self.generator.render_literal(&column.spec, value);
        script.absorb(&Self::context(table, column), rendered)
    }

    /// `"k1" = 1 AND "k2" IS NULL` over the key columns of `row`.
    fn key_predicate(
        &self,
        script: &mut Script,
        table: &TableDef,
        keys: &[usize],
        row: &[SqlValue<'_>],
    ) -> String {
        keys.iter()
            .map(|&i| {
                let column = &table.columns[i];
                let name = self.generator.quote_ident(&column.name);
                if row[i].is_null() {
                    format!("{} IS NULL", name)
                } else {
                    format!("{} = {}", name, self.literal(script, table, column, &row[i]))
                }
            })
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// `CREATE TABLE`, followed by one `ALTER TABLE` per foreign key.
    pub fn create_table(&self, table: &TableDef) -> Result<Script> {
        let mut script = Script::default();
        let mut lines = Vec::with_capacity(table.columns.len() + 1);

        for column in &table.columns {
            let rendered = self.generator.render_type(&column.spec);
            let ty = script.absorb(&Self::context(table, column), rendered);
            let nullable = if column.is_nullable { "" } else { " NOT NULL" };
            lines.push(format!(
                "    {} {}{}",
                self.generator.quote_ident(&column.name),
                ty,
                nullable
            ));
        }

        if self.options.include_primary_key && table.has_pk() {
            Self::key_indexes(table)?;
            lines.push(format!("    PRIMARY KEY ({})", self.quote_list(&table.primary_key)));
        }

        script.statements.push(format!(
            "CREATE TABLE {} (\n{}\n)",
            self.table_name(table),
            lines.join(",\n")
        ));

        if self.options.include_foreign_keys {
            for (n, fk) in table.foreign_keys.iter().enumerate() {
                let name = if fk.name.is_empty() {
                    format!("fk_{}_{}", table.name, n + 1)
                } else {
                    fk.name.clone()
                };
                let target_schema = fk.ref_schema.as_deref().or(table.schema.as_deref());
                let mut stmt = format!(
                    "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {}",
                    self.table_name(table),
                    self.generator.quote_ident(&name),
                    self.quote_list(&fk.columns),
                    self.qualify(target_schema, &fk.ref_table)
                );
                if !fk.ref_columns.is_empty() {
                    stmt.push_str(&format!(" ({})", self.quote_list(&fk.ref_columns)));
                }
                script.statements.push(stmt);
            }
        }

        debug!(
            "Generated {} DDL for {} ({} statements)",
            self.dialect(),
            table.full_name(),
            script.len()
        );
        self.finish(table.full_name(), script)
    }

    pub fn drop_table(&self, table: &TableDef) -> Script {
        Script {
            statements: vec![format!("DROP TABLE {}", self.table_name(table))],
            warnings: Vec::new(),
        }
    }

    /// `INSERT` of one full row, in column order.
    pub fn insert(&self, table: &TableDef, row: &[SqlValue<'_>]) -> Result<Script> {
        Self::check_row(table, row)?;
        let mut script = Script::default();
        let values: Vec<String> = table
            .columns
            .iter()
            .zip(row)
            .map(|(column, value)| self.literal(&mut script, table, column, value))
            .collect();
        let names: Vec<String> = table.columns.iter().map(|c| c.name.clone()).collect();
        script.statements.push(format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table_name(table),
            self.quote_list(&names),
            values.join(", ")
        ));
        self.finish(table.full_name(), script)
    }

    /// `UPDATE` of `columns` in the row identified by its primary key.
    ///
    /// An empty `columns` list updates every non-key column.
    pub fn update(&self, table: &TableDef, row: &[SqlValue<'_>], columns: &[usize]) -> Result<Script> {
        Self::check_row(table, row)?;
        let keys = Self::key_indexes(table)?;
        let targets: Vec<usize> = if columns.is_empty() {
            (0..table.columns.len()).filter(|i| !keys.contains(i)).collect()
        } else {
            columns.to_vec()
        };
        if let Some(bad) = targets.iter().find(|&&i| i >= table.columns.len()) {
            return Err(XlateError::Script(format!(
                "column {} out of range for {}",
                bad,
                table.full_name()
            )));
        }

        let mut script = Script::default();
        if targets.is_empty() {
            return Ok(script);
        }
        let assignments: Vec<String> = targets
            .iter()
            .map(|&i| {
                let column = &table.columns[i];
                format!(
                    "{} = {}",
                    self.generator.quote_ident(&column.name),
                    self.literal(&mut script, table, column, &row[i])
                )
            })
            .collect();
        let predicate = self.key_predicate(&mut script, table, &keys, row);
        script.statements.push(format!(
            "UPDATE {} SET {} WHERE {}",
            self.table_name(table),
            assignments.join(", "),
            predicate
        ));
        self.finish(table.full_name(), script)
    }

    /// `DELETE` of the row identified by its primary key.
    pub fn delete(&self, table: &TableDef, row: &[SqlValue<'_>]) -> Result<Script> {
        Self::check_row(table, row)?;
        let keys = Self::key_indexes(table)?;
        let mut script = Script::default();
        let predicate = self.key_predicate(&mut script, table, &keys, row);
        script.statements.push(format!(
            "DELETE FROM {} WHERE {}",
            self.table_name(table),
            predicate
        ));
        self.finish(table.full_name(), script)
    }

    /// Deletes, then updates, then inserts, each in key order.
    pub fn apply_diff(&self, table: &TableDef, diff: &TableDiff) -> Result<Script> {
        let mut script = Script::default();
        for row in &diff.deleted {
            script.extend(self.delete(table, row)?);
        }
        for update in &diff.updated {
            script.extend(self.update(table, &update.after, &update.changed)?);
        }
        for row in &diff.inserted {
            script.extend(self.insert(table, row)?);
        }
        debug!(
            "{}: {} statements from {} differences",
            table.full_name(),
            script.len(),
            diff.total_differences()
        );
        Ok(script)
    }

    /// `INSERT` for every row.
    pub fn insert_all(&self, table: &TableDef, rows: &[Row]) -> Result<Script> {
        let mut script = Script::default();
        for row in rows {
            script.extend(self.insert(table, row)?);
        }
        Ok(script)
    }
}
