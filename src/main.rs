use anyhow::Context as _;
use log::info;

use kubemarks::{cluster::KubeClient, cmd::Command, logging::Logger, server::run_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let command = Command::init();

    Logger::init()?;

    let config = command.load_config()?;

    info!("starting kubemarks");

    let client = kube::Client::try_default()
        .await
        .context("failed to create Kubernetes client")?;

    info!("connected to Kubernetes API");

    run_server(&config, KubeClient::new(client)).await
}
