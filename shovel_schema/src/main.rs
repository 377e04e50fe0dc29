use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use shovel_schema::config::{self, DatabaseConfig, Root};
use shovel_schema::db::connection::connect;
use shovel_schema::utils::logging::init_logging;
use shovel_schema::{diff, indexes, row_estimate, table_size};

#[derive(Parser)]
#[command(name = "shovel-schema", version, about = "Create and migrate the tables declared by integrations")]
struct Cli {
    /// Config file (.toml, .json, .yaml)
    #[arg(short, long)]
    config: PathBuf,

    /// Overrides `database.url` from the config file
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the merged DDL without touching the database
    Ddl,
    /// Create tables and add missing columns
    Migrate,
    /// Show declared columns missing from, or undeclared in, the database
    Diff,
    /// Show indexes, row estimate and size of a table
    Inspect { table: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let root = config::load_from_file(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    init_logging(&root.logging)?;

    match &cli.command {
        Command::Ddl => {
            for stmt in root.ddl() {
                println!("{};", stmt);
            }
        }
        Command::Migrate => {
            let pool = connect(&database(&cli, &root)?).await?;
            root.migrate(&pool).await?;
        }
        Command::Diff => {
            let pool = connect(&database(&cli, &root)?).await?;
            for table in root.tables().tables() {
                let dd = diff(&pool, &table.name, &table.columns, &table.schema).await?;
                println!("{}", table.qualified_name());
                for c in &dd.add {
                    println!("  + {} {}", c.name, c.data_type);
                }
                for c in &dd.remove {
                    println!("  ? {} {} (not declared)", c.name, c.data_type);
                }
            }
        }
        Command::Inspect { table } => {
            let pool = connect(&database(&cli, &root)?).await?;
            let idx = indexes(&pool, table).await;
            println!("indexes: {}", serde_json::to_string_pretty(&idx)?);
            println!("rows:    {}", row_estimate(&pool, table).await);
            println!("size:    {}", table_size(&pool, table).await);
        }
    }
    Ok(())
}

fn database(cli: &Cli, root: &Root) -> anyhow::Result<DatabaseConfig> {
    let mut db = match (&root.database, &cli.database_url) {
        (Some(db), _) => db.clone(),
        (None, Some(url)) => DatabaseConfig {
            url: url.clone(),
            pool_size: None,
            timeout_seconds: None,
        },
        (None, None) => bail!("no database url: set database.url, --database-url or DATABASE_URL"),
    };
    if let Some(url) = &cli.database_url {
        db.url = url.clone();
    }
    Ok(db)
}
