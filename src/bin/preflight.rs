use movie_catalog::infra::config::StorageBackend;
use movie_catalog::infra::{logging, storage};
use movie_catalog::Config;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--apply-schema]\n\
         \n\
         Reads env vars (a .env file is honoured):\n\
           STORAGE_BACKEND (postgres|memory), DATABASE_URL, DATABASE_MAX_CONNECTIONS\n\
         \n\
         --apply-schema   create the movie/director/genre tables if they are missing\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let apply_schema = args.iter().any(|a| a == "--apply-schema");

    let config = Config::from_env()?;
    logging::init(config.log_format);

    println!("> Preflight:");
    match &config.storage {
        StorageBackend::Postgres {
            max_connections, ..
        } => println!("  STORAGE_BACKEND=postgres (max_connections={})", max_connections),
        StorageBackend::Memory => println!("  STORAGE_BACKEND=memory"),
    }
    println!("  BIND_ADDR={}", config.bind_addr);

    let store = storage::connect_store(&config.storage)
        .await
        .map_err(|e| anyhow::anyhow!("Could not connect to the store: {}", e))?;
    store.ping().await?;
    println!("  Store reachable.");

    if apply_schema {
        store.ensure_schema().await?;
        println!("  Schema applied (movie, director, genre).");
    }

    match store.counts().await {
        Ok(counts) => {
            println!("  movie rows:    {}", counts.movies);
            println!("  director rows: {}", counts.directors);
            println!("  genre rows:    {}", counts.genres);
        }
        Err(e) => {
            eprintln!("  Could not count rows ({}). Run with --apply-schema to create the tables.", e);
            std::process::exit(1);
        }
    }

    println!("> Preflight OK");
    Ok(())
}
