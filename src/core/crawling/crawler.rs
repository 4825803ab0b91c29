use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

use crate::core::config::CrawlConfig;
use crate::core::errors::{PageError, PageResult, ScraperError, ScraperResult};
use crate::core::record::{BookRecord, RecordSet};
use crate::page::{ElementHandle, Locator, Page};
use crate::parser::selectors::{listing, root};
use crate::parser::RecordExtractor;
use crate::progress::ProgressObserver;
use crate::stats::StatsTracker;
use crate::storage::RecordSink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTarget {
    /// Position in the listing when it was first enumerated.
    pub index: usize,
    pub title: String,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraversalState {
    Idle,
    AtListing { category: String },
    AtDetail { category: String, item: String },
    Done,
}

#[derive(Debug)]
pub struct CrawlSummary {
    pub records: RecordSet,
    pub skipped_items: usize,
    pub skipped_categories: usize,
    pub output: PathBuf,
}

/// Walks every category listing and every item detail page, one at a time,
/// over a single shared [`Page`].
pub struct Crawler {
    page: Box<dyn Page>,
    config: CrawlConfig,
    extractor: RecordExtractor,
    stats: Arc<StatsTracker>,
    observers: Vec<Arc<dyn ProgressObserver>>,
    state: TraversalState,
}

impl Crawler {
    pub fn new(page: Box<dyn Page>, config: CrawlConfig) -> Self {
        info!("Initializing crawler");
        let stats = Arc::new(StatsTracker::new());

        Self {
            page,
            config,
            extractor: RecordExtractor::new(),
            observers: vec![Arc::clone(&stats) as Arc<dyn ProgressObserver>],
            stats,
            state: TraversalState::Idle,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    /// Crawls, then hands the whole record set to `sink`. The sink is not
    /// touched when the root page cannot be loaded.
    pub async fn run(&mut self, sink: &dyn RecordSink) -> ScraperResult<CrawlSummary> {
        let records = self.crawl().await?;
        let output = sink.write(records.as_slice()).await?;
        let stats = self.stats.get_stats();

        Ok(CrawlSummary {
            records,
            skipped_items: stats.skipped_items,
            skipped_categories: stats.skipped_categories,
            output,
        })
    }

    pub async fn crawl(&mut self) -> ScraperResult<RecordSet> {
        info!("Starting crawl at {}", self.config.start_url);

        let categories = self.load_root().await?;
        let mut records = RecordSet::new();

        for category in &categories {
            if let Err(e) = self.visit_category(category, &mut records).await {
                warn!("Skipping category {}: {}", category.name, e);
                let reason = e.to_string();
                self.notify(|o| o.category_skipped(&category.name, &reason));
            }
        }

        self.transition(TraversalState::Done);
        info!(
            "Crawl completed. {} books from {} categories",
            records.len(),
            categories.len()
        );
        let total = records.len();
        self.notify(|o| o.finished(total));

        Ok(records)
    }

    async fn load_root(&mut self) -> ScraperResult<Vec<Category>> {
        let start_url = self.config.start_url.clone();

        let root_failure = |e: PageError| {
            error!("Failed to load root page {}: {}", start_url, e);
            ScraperError::RootLoadFailure(e.to_string())
        };

        self.page.goto(&start_url).await.map_err(root_failure)?;
        let categories = self.enumerate_categories().await.map_err(root_failure)?;

        if categories.is_empty() {
            error!("No categories found at {}", start_url);
            return Err(ScraperError::RootLoadFailure(format!(
                "no categories found at {}",
                start_url
            )));
        }

        info!("Found {} categories", categories.len());
        Ok(categories)
    }

    async fn enumerate_categories(&self) -> PageResult<Vec<Category>> {
        let links = self.page.list_elements(root::CATEGORY_LINK).await?;

        let mut categories = Vec::with_capacity(links.len());
        for link in &links {
            let name = self.page.text(&Locator::from(link)).await?.trim().to_string();
            match (name.is_empty(), self.link_url(link).await?) {
                (false, Some(url)) => categories.push(Category { name, url }),
                _ => warn!("Ignoring category link {} without a name or target", link.describe()),
            }
        }

        Ok(categories)
    }

    async fn enumerate_items(&self) -> PageResult<Vec<ItemTarget>> {
        let links = self.page.list_elements(listing::ITEM_LINK).await?;

        let mut items = Vec::with_capacity(links.len());
        for link in &links {
            let locator = Locator::from(link);
            let Some(url) = self.link_url(link).await? else {
                warn!("Ignoring item link {} without a target", link.describe());
                continue;
            };
            let title = match self.page.attribute(&locator, listing::ITEM_TITLE_ATTR).await? {
                Some(title) if !title.trim().is_empty() => title.trim().to_string(),
                _ => self.page.text(&locator).await?.trim().to_string(),
            };
            items.push(ItemTarget {
                index: items.len(),
                title,
                url,
            });
        }

        Ok(items)
    }

    async fn visit_category(
        &mut self,
        category: &Category,
        records: &mut RecordSet,
    ) -> PageResult<()> {
        info!("Crawling category: {}", category.name);

        self.page.goto(&category.url).await?;
        let listing_url = self.page.current_url().cloned().ok_or(PageError::NoDocument)?;
        self.transition(TraversalState::AtListing {
            category: category.name.clone(),
        });

        let items = self.enumerate_items().await?;
        debug!("{} items listed in {}", items.len(), category.name);

        for (position, item) in items.iter().enumerate() {
            if let Err(e) = self.ensure_listing(category, &listing_url).await {
                let remaining = &items[position..];
                warn!(
                    "Listing for {} could not be reloaded, skipping its last {} items: {}",
                    category.name,
                    remaining.len(),
                    e
                );
                let reason = format!("listing reload failed: {}", e);
                for item in remaining {
                    self.notify(|o| o.item_skipped(&category.name, &item.title, &reason));
                }
                return Ok(());
            }

            match self.visit_item(category, &listing_url, item).await {
                Ok(record) => {
                    let title = record.title.clone();
                    let index = records.push(record);
                    self.stats.record_category(&category.name);
                    self.notify(|o| o.record_added(index, &title));
                }
                Err(e) => {
                    warn!("Skipping '{}' in {}: {}", item.title, category.name, e);
                    let reason = e.to_string();
                    self.notify(|o| o.item_skipped(&category.name, &item.title, &reason));
                }
            }
        }

        Ok(())
    }

    async fn visit_item(
        &mut self,
        category: &Category,
        listing_url: &Url,
        item: &ItemTarget,
    ) -> ScraperResult<BookRecord> {
        let handle = self.locate_item(item).await?;
        self.page.click(&handle).await?;
        self.transition(TraversalState::AtDetail {
            category: category.name.clone(),
            item: item.title.clone(),
        });

        let extracted = self.extractor.extract(self.page.as_ref(), &category.name).await;

        match self.page.go_back().await {
            Ok(()) if self.page.current_url() == Some(listing_url) => {
                self.transition(TraversalState::AtListing {
                    category: category.name.clone(),
                });
            }
            Ok(()) => warn!(
                "Going back from '{}' did not return to {}",
                item.title, listing_url
            ),
            Err(e) => warn!("Could not go back from '{}': {}", item.title, e),
        }

        Ok(extracted?)
    }

    /// Puts the page back on the category listing when the last back
    /// navigation did not. A failed reload ends the category; the items not
    /// yet visited are reported as skipped items.
    async fn ensure_listing(&mut self, category: &Category, listing_url: &Url) -> PageResult<()> {
        let at_listing = matches!(self.state, TraversalState::AtListing { .. })
            && self.page.current_url() == Some(listing_url);
        if at_listing {
            return Ok(());
        }

        warn!("Reloading listing for {} at {}", category.name, listing_url);
        self.page.goto(listing_url).await?;
        self.transition(TraversalState::AtListing {
            category: category.name.clone(),
        });
        Ok(())
    }

    /// Finds the link for `item` in the current listing, by its original
    /// position first and by target URL if the listing changed.
    async fn locate_item(&self, item: &ItemTarget) -> PageResult<ElementHandle> {
        let handles = self.page.list_elements(listing::ITEM_LINK).await?;

        if let Some(handle) = handles.get(item.index) {
            if self.link_url(handle).await?.as_ref() == Some(&item.url) {
                return Ok(handle.clone());
            }
        }

        debug!("Listing changed, searching for {}", item.url);
        for handle in &handles {
            if self.link_url(handle).await?.as_ref() == Some(&item.url) {
                return Ok(handle.clone());
            }
        }

        Err(PageError::element_not_found(format!(
            "{} -> {}",
            listing::ITEM_LINK,
            item.url
        )))
    }

    async fn link_url(&self, link: &ElementHandle) -> PageResult<Option<Url>> {
        let base = self.page.current_url().cloned().ok_or(PageError::NoDocument)?;
        let Some(href) = self.page.attribute(&Locator::from(link), "href").await? else {
            return Ok(None);
        };

        match base.join(href.trim()) {
            Ok(url) => Ok(Some(url)),
            Err(e) => {
                warn!("Unresolvable link '{}' on {}: {}", href, base, e);
                Ok(None)
            }
        }
    }

    fn transition(&mut self, next: TraversalState) {
        debug!("State: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn notify(&self, f: impl Fn(&dyn ProgressObserver)) {
        for observer in &self.observers {
            f(observer.as_ref());
        }
    }
}
