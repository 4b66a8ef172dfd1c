#[tokio::main]
async fn main() -> Result<(), deal_scraper_lib::RunError> {
    deal_scraper_lib::init_tracing();
    deal_scraper_lib::run().await
}
