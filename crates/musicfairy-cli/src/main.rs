use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use musicfairy_cli::admin::{PromoteOutcome, promote_user};
use musicfairy_cli::seeder;
use musicfairy_config::{DatabaseConfig, StoreBackend};
use musicfairy_db::MongoStore;
use musicfairy_models::UserRole;

#[derive(Parser)]
#[command(name = "musicfairy-cli")]
#[command(about = "Music Fairy CLI - Administrative tools for Music Fairy", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set the role of a registered user (use this to create the first admin)
    Promote {
        /// Email the user registered with
        #[arg(short = 'e', long)]
        email: String,

        /// student, instructor or admin
        #[arg(short = 'r', long, default_value = "admin")]
        role: UserRole,
    },
    /// Insert sample news items
    SeedNews {
        /// Number of news items to create
        #[arg(short = 'c', long, default_value = "6")]
        count: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let config = DatabaseConfig::from_env();
    if config.backend == StoreBackend::Memory {
        eprintln!("❌ STORE_BACKEND=memory has nothing to administer; point the CLI at MongoDB");
        std::process::exit(1);
    }

    let store = match MongoStore::connect(&config.uri, &config.database_name).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Promote { email, role } => handle_promote(&store, &email, role).await,
        Commands::SeedNews { count } => handle_seed_news(&store, count).await,
    }
}

async fn handle_promote(store: &MongoStore, email: &str, role: UserRole) {
    match promote_user(store, email, role).await {
        Ok(PromoteOutcome::Promoted) => {
            println!("\n✅ {} is now {}", email, role);
        }
        Ok(PromoteOutcome::Unchanged) => {
            println!("\nℹ️  {} already has role {}", email, role);
        }
        Ok(PromoteOutcome::NotFound) => {
            eprintln!("\n❌ No user registered with {}", email);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("\n❌ Error promoting user: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed_news(store: &MongoStore, count: usize) {
    match seeder::seed_news(store, count).await {
        Ok(ids) => {
            println!("✅ Created {} news items", ids.len());
        }
        Err(e) => {
            eprintln!("\n❌ Error seeding news: {}", e);
            std::process::exit(1);
        }
    }
}
