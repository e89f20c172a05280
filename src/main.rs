#[tokio::main]
async fn main() -> std::io::Result<()> {
    careloop::run().await
}
