use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;
use eat_where_places::config::Config;
use eat_where_places::controller;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Config::parse();
    init_tracing(&config);

    controller::serve(&config).await
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if config.is_production() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
