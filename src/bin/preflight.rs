use site_records::infra::config;
use site_records::{RecordService, StoreConfig};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           DATABASE_SCHEMA (default: website_analytics)\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    // Force-read config (nice error messages if missing)
    let database_url = config::database_url();
    let schema = config::database_schema();

    println!("> Preflight:");
    println!("  DATABASE_SCHEMA={}", schema);

    let service = RecordService::new(StoreConfig {
        database_url,
        schema,
    });

    // First call connects and bootstraps the schema.
    service.ping().await?;
    println!("  Database reachable, record tables bootstrapped.");

    let count = service.visit_count().await?;
    println!("  Visit counter readable (count={}).", count);

    let records = service.list_records().await?;
    println!("  Record listing OK ({} records).", records.len());

    println!("> Preflight OK.");
    Ok(())
}
