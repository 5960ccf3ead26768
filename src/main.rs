//! CLI entry point for glymph

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "glymph")]
#[command(author = "David Glymph")]
#[command(version)]
#[command(about = "A static site generator for a personal portfolio and blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new blog post or project entry
    New {
        /// Section to create the document in (blog, projects)
        #[arg(short, long, default_value = "blog")]
        section: String,

        /// Title of the new document
        title: String,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site content
    List {
        /// Type of content to list (blog, projects, route)
        #[arg(default_value = "blog")]
        r#type: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "glymph=debug,info"
    } else {
        "glymph=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            glymph::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New { section, title } => {
            let site = glymph::Site::new(&base_dir)?;
            tracing::info!("Creating new {} entry: {}", section, title);
            glymph::commands::new::create_document(&site, &title, &section)?;
        }

        Commands::Generate { watch } => {
            let site = glymph::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");

            glymph::commands::generate::run(&site)?;
            println!("Generated successfully!");

            if watch {
                tracing::info!("Watching for file changes...");
                glymph::commands::generate::watch(&site).await?;
            }
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let site = glymph::Site::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            site.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            glymph::server::start(&site, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let site = glymph::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = glymph::Site::new(&base_dir)?;
            glymph::commands::list::run(&site, &r#type)?;
        }
    }

    Ok(())
}
