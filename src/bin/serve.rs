#[tokio::main]
pub async fn main() -> Result<(), anyhow::Error> {
    validator_penalties::start_server().await?;
    Ok(())
}
