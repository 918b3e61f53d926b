use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use trivia_cli::seeder::{self, SeedConfig};
use trivia_db::PgPool;

#[derive(Parser)]
#[command(name = "trivia-cli")]
#[command(about = "Trivia CLI - Database tools for the Trivia API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run pending database migrations
    Migrate,
    /// Seed the standard categories, sample questions, and generated questions
    Seed {
        /// Number of generated questions to add on top of the samples
        #[arg(short = 'q', long, default_value = "0")]
        questions: usize,

        /// Skip the bundled sample questions
        #[arg(long)]
        no_samples: bool,
    },
    /// Seed only the standard categories
    SeedCategories,
    /// Delete all questions and categories
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match trivia_db::init_db_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::Seed {
            questions,
            no_samples,
        } => handle_seed(&pool, questions, no_samples).await,
        Commands::SeedCategories => handle_seed_categories(&pool).await,
        Commands::Clear { yes } => handle_clear(&pool, yes).await,
    }
}

async fn handle_migrate(pool: &PgPool) {
    match trivia_db::run_migrations(pool).await {
        Ok(_) => println!("✅ Migrations applied"),
        Err(e) => {
            eprintln!("\n❌ Error running migrations: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, questions: usize, no_samples: bool) {
    let mut config = SeedConfig::new(questions);
    if no_samples {
        config = config.without_samples();
    }

    match seeder::seed_all(pool, config).await {
        Ok(summary) => {
            println!(
                "   {} categories available, {} questions inserted",
                summary.categories, summary.questions
            );
        }
        Err(e) => {
            eprintln!("\n❌ Error seeding database: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed_categories(pool: &PgPool) {
    match seeder::categories::seed_categories(pool).await {
        Ok(ids) => println!("✅ {} categories available", ids.len()),
        Err(e) => {
            eprintln!("\n❌ Error seeding categories: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_clear(pool: &PgPool, yes: bool) {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete ALL questions and categories?")
            .default(false)
            .interact();

        match confirmed {
            Ok(true) => {}
            Ok(false) => {
                println!("Aborted");
                return;
            }
            Err(e) => {
                eprintln!("❌ Failed to read confirmation: {}", e);
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\n❌ Error clearing data: {}", e);
        std::process::exit(1);
    }
}
