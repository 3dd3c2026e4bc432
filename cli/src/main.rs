use ontap_snap::library::{cli::run, logging::init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    run().await
}
