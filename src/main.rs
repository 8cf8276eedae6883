use user_traits::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::load();

    cli::serve::run(cli).await
}
