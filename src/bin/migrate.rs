use anyhow::{Result, anyhow};
use event_reminder_bot::config::{DEFAULT_DATABASE_URL, DEFAULT_EVENTS_CSV};
use event_reminder_bot::database::connection::DatabaseManager;
use event_reminder_bot::database::models::Subscriber;
use event_reminder_bot::events::EventStore;
use std::env;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    // sqlx reports through `log`
    env_logger::init();
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("migrate");

    match command {
        "migrate" | "up" => run_migrations().await,
        "check" => check_database().await,
        "events" => check_events(args.get(2).map(PathBuf::from)),
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            print_help();
            std::process::exit(1);
        }
    }
}

fn database_url() -> String {
    match env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_DATABASE_URL.to_string(),
    }
}

async fn run_migrations() -> Result<()> {
    println!("🔧 Event Reminder Bot - Database Migration Tool");
    println!("================================================");

    let url = database_url();
    println!("📊 Database URL: {}", mask_url(&url));
    println!("🚀 Running database migrations...");

    let db_manager = DatabaseManager::new(&url).await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    match db_manager.run_migrations().await {
        Ok(_) => println!("✅ Migrations completed successfully!"),
        Err(e) => {
            eprintln!("❌ Migration failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn check_database() -> Result<()> {
    println!("🔍 Checking database connection and schema...");

    let url = database_url();
    println!("📊 Database URL: {}", mask_url(&url));

    let db_manager = DatabaseManager::new(&url).await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    match check_tables(&db_manager).await {
        Ok(tables) => {
            println!("✅ Database connection successful!");
            println!("📋 Found tables:");
            for table in tables {
                println!("  • {table}");
            }
        }
        Err(e) => {
            println!("⚠️  Database check failed: {e}");
            println!("💡 Try running 'migrate up' to create the schema");
            return Ok(());
        }
    }

    match Subscriber::count(&db_manager.pool).await {
        Ok(count) => println!("👥 Subscribed chats: {count}"),
        Err(e) => println!("⚠️  Could not count subscribers: {e}"),
    }

    Ok(())
}

/// Reads the calendar the way the bot does and prints every skipped row.
fn check_events(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(|| match env::var("EVENTS_CSV") {
        Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => PathBuf::from(DEFAULT_EVENTS_CSV),
    });
    println!("🔍 Checking event source {}", path.display());

    let (snapshot, report) = EventStore::new(path).load_with_report();

    if let Some(e) = &report.error {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }

    println!("📋 {} rows read, {} events loaded", report.rows_read, snapshot.len());
    for dropped in &report.dropped {
        println!("  ⚠️  line {}: {}", dropped.line, dropped.reason);
    }
    if let (Some(first), Some(last)) = (snapshot.records().first(), snapshot.records().last()) {
        println!("📅 Events span {} to {}", first.date, last.date);
    }

    if report.rows_dropped() > 0 {
        return Err(anyhow!("{} rows were skipped", report.rows_dropped()));
    }
    println!("✅ Event source is valid!");
    Ok(())
}

async fn check_tables(db_manager: &DatabaseManager) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>("SELECT name FROM sqlite_master WHERE type='table'")
        .fetch_all(&db_manager.pool)
        .await?;

    Ok(names)
}

fn mask_url(url: &str) -> String {
    if url.starts_with("sqlite:") {
        let path = url.strip_prefix("sqlite:").unwrap_or(url);
        if let Some(filename) = Path::new(path).file_name() {
            format!("sqlite:.../{}", filename.to_string_lossy())
        } else {
            url.to_string()
        }
    } else {
        url.to_string()
    }
}

fn print_help() {
    println!("📅 Event Reminder Bot - Maintenance Tool");
    println!();
    println!("USAGE:");
    println!("    migrate [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    migrate, up    Run database migrations (default)");
    println!("    check          Check database connection and schema");
    println!("    events [PATH]  Validate the events CSV");
    println!("    help           Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    DATABASE_URL   Database connection string (default: {DEFAULT_DATABASE_URL})");
    println!("    EVENTS_CSV     Events file (default: {DEFAULT_EVENTS_CSV})");
    println!();
}
