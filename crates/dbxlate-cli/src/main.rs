//! dbxlate CLI - translate column types, literals and scripts between SQL dialects.

mod input;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dbxlate::core::DialectCatalog;
use dbxlate::diff::{diff_rows, CommitGraph};
use dbxlate::{
    Config, RawColumn, Rendered, Script, ScriptBuilder, ScriptOptions, SqlValue, TableDef,
    XlateError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, warn, Level};

#[derive(Parser)]
#[command(name = "dbxlate")]
#[command(about = "Cross-dialect SQL type and value translation")]
#[command(version)]
struct Cli {
    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error. Lossy translations log at warn.
    #[arg(long, default_value = "warn")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Raw column metadata as a source engine would report it.
#[derive(Args)]
struct ColumnArgs {
    /// Source dialect
    #[arg(long)]
    from: String,

    /// Vendor type name, e.g. NUMBER or "timestamp with time zone"
    #[arg(long)]
    type_name: String,

    /// Reported precision or length
    #[arg(long, allow_hyphen_values = true)]
    size: Option<i32>,

    /// Reported scale
    #[arg(long, allow_hyphen_values = true)]
    scale: Option<i32>,

    /// Generic SQL type code
    #[arg(long, default_value = "1111", allow_hyphen_values = true)]
    sql_type: i32,

    /// Host value class name
    #[arg(long)]
    java_class: Option<String>,
}

impl ColumnArgs {
    fn raw(&self) -> RawColumn {
        RawColumn {
            type_name: self.type_name.clone(),
            size: self.size,
            scale: self.scale,
            sql_type: self.sql_type,
            java_class: self.java_class.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List registered dialects and their capabilities
    Dialects {
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Translate one column type
    RenderType {
        #[command(flatten)]
        column: ColumnArgs,

        /// Target dialect
        #[arg(long)]
        to: String,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Render a JSON value as a literal for a column type
    RenderLiteral {
        #[command(flatten)]
        column: ColumnArgs,

        /// Target dialect
        #[arg(long)]
        to: String,

        /// Value as JSON: a string, number, boolean, null or interval object
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },

    /// Generate DDL (and optional INSERTs) from table documents
    Script {
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Source dialect (overrides the configuration)
        #[arg(long)]
        from: Option<String>,

        /// Target dialect (overrides the configuration)
        #[arg(long)]
        to: Option<String>,

        /// JSON array of table documents
        #[arg(short, long)]
        input: PathBuf,

        /// JSON object of rows keyed by table name
        #[arg(long)]
        rows: Option<PathBuf>,

        /// Fail on any lossy translation
        #[arg(long)]
        strict: bool,
    },

    /// Generate DELETE/UPDATE/INSERT statements turning one snapshot into another
    Diff {
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,

        /// JSON array of table documents
        #[arg(short, long)]
        input: PathBuf,

        /// Rows before the change, keyed by table name
        #[arg(long)]
        before: PathBuf,

        /// Rows after the change, keyed by table name
        #[arg(long)]
        after: PathBuf,
    },

    /// Print the tables affected by changing the dirty set, in commit order
    CommitOrder {
        /// JSON array of table documents
        #[arg(short, long)]
        input: PathBuf,

        /// Changed table (repeatable)
        #[arg(long, required = true)]
        dirty: Vec<String>,

        /// Print delete order (children first) instead of insert order
        #[arg(long)]
        delete: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), XlateError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    let catalog = DialectCatalog::with_builtins();

    match cli.command {
        Commands::Dialects { format } => print_dialects(&catalog, format),

        Commands::RenderType { column, to, format } => {
            let translator = catalog.translator(&column.from, &to)?;
            let translated = translator.translate_column(&column.raw());
            match format {
                OutputFormat::Text => println!("{}", translated.ddl.text),
                OutputFormat::Json => {
                    let out = serde_json::json!({
                        "source": translator.source_dialect(),
                        "target": translator.target_dialect(),
                        "canonical": translated.spec.to_string(),
                        "spec": translated.spec,
                        "ddl": translated.ddl.text,
                        "warnings": translated.ddl.warnings,
                    });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
            }
            Ok(())
        }

        Commands::RenderLiteral { column, to, value } => {
            let importer = catalog.require_importer(&column.from)?;
            let generator = catalog.require_generator(&to)?;
            let spec = importer.infer(&column.raw());
            let json: serde_json::Value = serde_json::from_str(&value)?;
            let value = SqlValue::from_json(spec.kind, &json)?;
            debug!("{} value {:?} for {}", value.variant_name(), value, spec);
            let rendered: Rendered = generator.render_literal(&spec, &value);
            for w in &rendered.warnings {
                warn!("{}", w);
            }
            println!("{}", rendered.text);
            Ok(())
        }

        Commands::Script {
            config,
            from,
            to,
            input,
            rows,
            strict,
        } => {
            let settings = resolve_settings(config, from, to)?;
            let mut options = settings.options;
            options.warnings_as_errors |= strict;
            let tables = input::load_tables(&input, &catalog, &settings.source)?;
            let generator = catalog.require_generator(&settings.target)?;
            let builder = ScriptBuilder::new(generator.as_ref(), options);

            let graph = CommitGraph::from_tables(&tables);
            let order = graph.insert_order(graph.tables())?;
            let mut script = Script::default();
            for name in &order {
                if let Some(table) = input::find_table(&tables, name) {
                    script.extend(builder.create_table(table)?);
                }
            }
            if let Some(path) = rows {
                let mut documents = input::load_rows(&path)?;
                for name in &order {
                    let Some(table) = input::find_table(&tables, name) else {
                        continue;
                    };
                    let rows = input::take_rows(&mut documents, table)?;
                    script.extend(builder.insert_all(table, &rows)?);
                }
                input::reject_leftover_rows(&documents)?;
            }

            info!(
                "Generated {} statements for {} ({} warnings)",
                script.len(),
                builder.dialect(),
                script.warnings.len()
            );
            print!("{}", script.to_sql(&builder.options().terminator));
            Ok(())
        }

        Commands::Diff {
            config,
            from,
            to,
            input,
            before,
            after,
        } => {
            let settings = resolve_settings(config, from, to)?;
            let tables = input::load_tables(&input, &catalog, &settings.source)?;
            let generator = catalog.require_generator(&settings.target)?;
            let builder = ScriptBuilder::new(generator.as_ref(), settings.options);

            let mut old = input::load_rows(&before)?;
            let mut new = input::load_rows(&after)?;
            let graph = CommitGraph::from_tables(&tables);
            let order = graph.insert_order(graph.tables())?;

            let mut diffs = Vec::new();
            for name in &order {
                let Some(table) = input::find_table(&tables, name) else {
                    continue;
                };
                let keys = key_indexes(table)?;
                let before_rows = input::take_rows(&mut old, table)?;
                let after_rows = input::take_rows(&mut new, table)?;
                diffs.push((table, diff_rows(&keys, &before_rows, &after_rows)?));
            }
            input::reject_leftover_rows(&old)?;
            input::reject_leftover_rows(&new)?;

            // Children's deletes run before their parents'.
            let mut script = Script::default();
            for (table, diff) in diffs.iter().rev() {
                let deletes = dbxlate::TableDiff {
                    deleted: diff.deleted.clone(),
                    ..Default::default()
                };
                script.extend(builder.apply_diff(table, &deletes)?);
            }
            for (table, diff) in &diffs {
                let upserts = dbxlate::TableDiff {
                    deleted: Vec::new(),
                    ..diff.clone()
                };
                script.extend(builder.apply_diff(table, &upserts)?);
            }

            print!("{}", script.to_sql(&builder.options().terminator));
            Ok(())
        }

        Commands::CommitOrder {
            input,
            dirty,
            delete,
        } => {
            let tables = input::load_tables(&input, &catalog, "generic")?;
            let graph = CommitGraph::from_tables(&tables);
            let affected = graph.closure(dirty.as_slice())?;
            let order = if delete {
                graph.delete_order(affected.as_slice())?
            } else {
                graph.insert_order(affected.as_slice())?
            };
            for name in order {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

/// Dialects and layout after merging the config file with command-line overrides.
struct Settings {
    source: String,
    target: String,
    options: ScriptOptions,
}

fn resolve_settings(
    config_path: Option<PathBuf>,
    from: Option<String>,
    to: Option<String>,
) -> Result<Settings, XlateError> {
    let config = match config_path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Some(Config::load(&path)?)
        }
        None => None,
    };

    let source = match (from, config.as_ref().and_then(|c| c.source_dialect.clone())) {
        (Some(name), _) | (None, Some(name)) => name,
        (None, None) => "generic".to_string(),
    };
    let target = match (to, config.as_ref().map(|c| c.target_dialect.clone())) {
        (Some(name), _) | (None, Some(name)) => name,
        (None, None) => {
            return Err(XlateError::Config(
                "no target dialect: pass --to or set target_dialect in the configuration".into(),
            ))
        }
    };
    let options = config
        .as_ref()
        .map(Config::script_options)
        .unwrap_or_default();

    Ok(Settings {
        source: DialectCatalog::normalize_dialect(&source)?.to_string(),
        target: DialectCatalog::normalize_dialect(&target)?.to_string(),
        options,
    })
}

fn key_indexes(table: &TableDef) -> Result<Vec<usize>, XlateError> {
    if !table.has_pk() {
        return Err(XlateError::Diff(format!(
            "{} has no primary key to match rows by",
            table.full_name()
        )));
    }
    table.key_indexes().ok_or_else(|| {
        XlateError::Diff(format!(
            "primary key of {} names a missing column",
            table.full_name()
        ))
    })
}

fn print_dialects(catalog: &DialectCatalog, format: OutputFormat) -> Result<(), XlateError> {
    let mut names: Vec<&str> = catalog.generator_names();
    for name in catalog.importer_names() {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names.sort_unstable();

    let rows: Vec<serde_json::Value> = names
        .iter()
        .map(|&name| {
            let caps = catalog.capabilities(name).ok();
            serde_json::json!({
                "name": name,
                "importer": catalog.has_importer(name),
                "generator": catalog.has_generator(name),
                "reports_table_info": caps.map(|c| c.reports_table_info),
                "requires_probe": caps.map(|c| c.requires_probe),
            })
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => {
            println!(
                "{:<16} {:<9} {:<10} {:<11} {}",
                "DIALECT", "IMPORTER", "GENERATOR", "TABLE INFO", "PROBE"
            );
            for name in names {
                let caps = catalog.capabilities(name).ok();
                let flag = |b: bool| if b { "yes" } else { "-" };
                println!(
                    "{:<16} {:<9} {:<10} {:<11} {}",
                    name,
                    flag(catalog.has_importer(name)),
                    flag(catalog.has_generator(name)),
                    caps.map_or("-", |c| flag(c.reports_table_info)),
                    caps.map_or("-", |c| flag(c.requires_probe)),
                );
            }
        }
    }
    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
