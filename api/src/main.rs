use clap::Parser;
use quill_api::{config::QuillApiConfig, server};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = QuillApiConfig::parse();

    if !config.dump_openapi {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or("quill_api=info,quill_common=info,quill_db=info".into()),
            )
            .pretty()
            .init();
    }

    let (router, api) = server::make(config.clone()).await?;

    if config.dump_openapi {
        let json = api.to_pretty_json()?;
        print!("{}", json);
        return Ok(());
    }

    let listener = TcpListener::bind(config.bind_addr).await?;

    info!("Listening on http://{:?}", config.bind_addr);

    axum::serve(listener, router).await?;

    Ok(())
}
