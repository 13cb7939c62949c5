mod cli;
mod error;
mod server;

use crate::cli::{StorageBackendArg, CLI};
use crate::server::CatalogGrpcServer;
use clap::Parser;
use reel_catalog::CatalogService;
use reel_core::Repository;
use reel_proto_schema::v1::catalog_service_server::CatalogServiceServer;
use reel_storage::{InMemoryRepository, MySqlRepository};
use tonic::transport::Server;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = CLI::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting catalog gRPC server"
    );

    match config.storage {
        StorageBackendArg::InMemory => {
            run_server(config.listen_addr, InMemoryRepository::new()).await?;
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .ok_or_else(|| anyhow::anyhow!("mysql dsn is required when storage backend is mysql"))?;
            let repository = MySqlRepository::connect(&mysql_dsn).await?;
            run_server(config.listen_addr, repository).await?;
        }
    }

    Ok(())
}

async fn run_server<R: Repository>(
    listen_addr: std::net::SocketAddr,
    repository: R,
) -> Result<(), tonic::transport::Error> {
    let service = CatalogGrpcServer::new(CatalogService::new(repository));

    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<CatalogServiceServer<CatalogGrpcServer<CatalogService<R>>>>()
        .await;

    Server::builder()
        .add_service(health_service)
        .add_service(CatalogServiceServer::new(service))
        .serve(listen_addr)
        .await
}
