#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wp_comments::run().await
}
