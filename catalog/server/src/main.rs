#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let config = catalog_server::config::Config::from_env()?;
    catalog_server::web::start_web_server(config).await
}
