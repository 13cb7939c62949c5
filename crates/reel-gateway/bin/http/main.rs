use clap::{Parser, ValueEnum};
use reel_catalog::CatalogService;
use reel_gateway::app::App;
use reel_gateway::state::AppState;
use reel_storage::{InMemoryRepository, MySqlRepository};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub const LISTEN_ADDR_ENV: &str = "REEL_GATEWAY_HTTP_LISTEN_ADDR";
pub const STORAGE_BACKEND_ENV: &str = "REEL_GATEWAY_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "REEL_GATEWAY_MYSQL_DSN";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "reel-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = CLI::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting gateway server"
    );

    let state = match config.storage {
        StorageBackendArg::InMemory => {
            AppState::new(Arc::new(CatalogService::new(InMemoryRepository::new())))
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .ok_or_else(|| anyhow::anyhow!("mysql dsn is required when storage backend is mysql"))?;
            let repository = MySqlRepository::connect(&mysql_dsn).await?;
            AppState::new(Arc::new(CatalogService::new(repository)))
        }
    };

    let router = App::router(state);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
