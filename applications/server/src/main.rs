/// Mixtape Server - Collaborative playlist-sharing server
use clap::{Parser, Subcommand};
use mixtape_core::{User, UserStore};
use mixtape_server::{
    config::ServerConfig,
    services::{AuthService, Sanitizer},
    state::AppState,
};
use mixtape_storage::Database;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mixtape-server")]
#[command(about = "Mixtape collaborative playlist-sharing server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user account
    AddUser {
        /// Given name
        #[arg(long)]
        first_name: String,
        /// Family name
        #[arg(long)]
        last_name: String,
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Display name
        #[arg(short, long)]
        username: String,
        /// Password (min 8 characters)
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mixtape_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            serve().await?;
        }
        Commands::AddUser {
            first_name,
            last_name,
            email,
            username,
            password,
        } => {
            add_user(&first_name, &last_name, &email, &username, &password).await?;
        }
        Commands::ListUsers => {
            list_users().await?;
        }
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Mixtape Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let db = Database::new(&config.storage.database_url).await?;
    let db = Arc::new(db);
    tracing::info!("Database connected");

    // Initialize auth service
    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    ));
    tracing::info!("Auth service initialized");

    // Initialize text sanitizer
    let sanitizer = Arc::new(Sanitizer::new());

    // Build application state and router
    let app_state = AppState::new(
        db,
        Arc::clone(&auth_service),
        sanitizer,
        config.community,
    );
    let app = mixtape_server::create_router(app_state, auth_service, &config.rate_limit);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(
    first_name: &str,
    last_name: &str,
    email: &str,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    config.validate()?;

    if password.len() < 8 {
        anyhow::bail!("Password must be at least 8 characters");
    }

    let db = Database::new(&config.storage.database_url).await?;
    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    );

    let password_hash = auth_service.hash_password(password)?;
    let user = User::new(first_name, last_name, email, username, password_hash);
    db.insert(&user).await?;

    tracing::info!("Created user {} <{}>", user.username, user.email);

    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let db = Database::new(&config.storage.database_url).await?;

    let users = db.all().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {}", user.username, user.email);
    }

    Ok(())
}
