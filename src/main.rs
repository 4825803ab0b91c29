use std::sync::Arc;

use bookcrawler::page::DocumentPage;
use bookcrawler::scrapers::HttpScraper;
use bookcrawler::storage::create_sink;
use bookcrawler::{CrawlConfig, Crawler, LogProgress};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .init();

    let config = CrawlConfig::default().with_headers(vec![("User-Agent", "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")]);

    let scraper = HttpScraper::new()?
        .with_timeout(config.navigation_timeout)?
        .with_headers(&config.headers)?;
    let page = DocumentPage::new(Box::new(scraper), config.navigation_timeout);
    let sink = create_sink(&config.output);

    let mut crawler = Crawler::new(Box::new(page), config).with_observer(Arc::new(LogProgress));
    let summary = crawler.run(&sink).await?;

    crawler.stats().print_summary();
    println!(
        "\nThere are {} books in {}",
        summary.records.len(),
        summary.output.display()
    );

    Ok(())
}
