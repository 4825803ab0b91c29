use async_trait::async_trait;
use log::{debug, trace};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

use super::{ElementHandle, Locator, Page};
use crate::core::errors::{PageError, PageResult};
use crate::scrapers::Scraper;

struct LoadedView {
    url: Url,
    body: String,
}

/// A [`Page`] over static documents: views are fetched through a
/// [`Scraper`], queries run against the parsed markup of the current view,
/// and `go_back` reloads the previous URL from the history.
pub struct DocumentPage {
    scraper: Box<dyn Scraper>,
    navigation_timeout: Duration,
    current: Option<LoadedView>,
    history: Vec<Url>,
    generation: u64,
}

impl DocumentPage {
    pub fn new(scraper: Box<dyn Scraper>, navigation_timeout: Duration) -> Self {
        Self {
            scraper,
            navigation_timeout,
            current: None,
            history: Vec::new(),
            generation: 0,
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    async fn load(&self, url: &Url) -> PageResult<LoadedView> {
        let response = timeout(self.navigation_timeout, self.scraper.fetch(url))
            .await
            .map_err(|_| PageError::NavigationTimeout {
                url: url.to_string(),
                timeout: self.navigation_timeout,
            })??;

        if !response.response_type.is_markup() {
            return Err(PageError::navigation(
                url,
                format!("not a document ({:?} response)", response.response_type),
            ));
        }

        Ok(LoadedView {
            url: response.url,
            body: response.body,
        })
    }

    async fn navigate(&mut self, url: &Url) -> PageResult<()> {
        let view = self.load(url).await?;
        if let Some(previous) = self.current.take() {
            self.history.push(previous.url);
        }
        self.show(view);
        Ok(())
    }

    fn show(&mut self, view: LoadedView) {
        debug!("Now at {}", view.url);
        self.current = Some(view);
        self.generation += 1;
    }

    fn query<T>(&self, f: impl FnOnce(&Html, &Url) -> PageResult<T>) -> PageResult<T> {
        let view = self.current.as_ref().ok_or(PageError::NoDocument)?;
        let document = Html::parse_document(&view.body);
        f(&document, &view.url)
    }

    fn resolve<'a>(&self, document: &'a Html, locator: &Locator) -> PageResult<ElementRef<'a>> {
        let (selector, index) = match locator {
            Locator::Css(selector) => (selector.as_str(), 0),
            Locator::Element(handle) => {
                if handle.generation != self.generation {
                    trace!("Stale handle {} (generation {})", handle.describe(), handle.generation);
                    return Err(PageError::element_not_found(handle.describe()));
                }
                (handle.selector.as_str(), handle.index)
            }
        };

        document
            .select(&parse_selector(selector)?)
            .nth(index)
            .ok_or_else(|| PageError::element_not_found(locator.describe()))
    }
}

fn parse_selector(selector: &str) -> PageResult<Selector> {
    Selector::parse(selector).map_err(|e| PageError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn link_target(element: ElementRef<'_>) -> PageResult<Option<String>> {
    if let Some(href) = element.value().attr("href") {
        return Ok(Some(href.to_string()));
    }
    let link = parse_selector("a[href]")?;
    Ok(element
        .select(&link)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string))
}

fn is_hidden(element: ElementRef<'_>) -> bool {
    let value = element.value();
    if value.attr("hidden").is_some() {
        return true;
    }
    value
        .attr("style")
        .map(|style| {
            let style: String = style
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_lowercase();
            style.contains("display:none") || style.contains("visibility:hidden")
        })
        .unwrap_or(false)
}

#[async_trait]
impl Page for DocumentPage {
    async fn goto(&mut self, url: &Url) -> PageResult<()> {
        self.navigate(url).await
    }

    async fn click(&mut self, handle: &ElementHandle) -> PageResult<()> {
        let target = self.query(|document, base| {
            let element = self.resolve(document, &Locator::from(handle))?;
            let href = link_target(element)?
                .ok_or_else(|| PageError::element_not_found(format!("{} a[href]", handle.describe())))?;
            base.join(&href).map_err(|e| PageError::navigation(base, e))
        })?;

        debug!("Clicking {} -> {}", handle.describe(), target);
        self.navigate(&target).await
    }

    async fn go_back(&mut self) -> PageResult<()> {
        let Some(previous) = self.history.pop() else {
            let here = self.current.as_ref().map(|v| v.url.to_string()).unwrap_or_default();
            return Err(PageError::Navigation {
                url: here,
                reason: "no previous view".to_string(),
            });
        };

        match self.load(&previous).await {
            Ok(view) => {
                self.show(view);
                Ok(())
            }
            Err(e) => {
                self.history.push(previous);
                Err(e)
            }
        }
    }

    fn current_url(&self) -> Option<&Url> {
        self.current.as_ref().map(|view| &view.url)
    }

    async fn list_elements(&self, selector: &str) -> PageResult<Vec<ElementHandle>> {
        let count = self.query(|document, _| Ok(document.select(&parse_selector(selector)?).count()))?;
        Ok((0..count)
            .map(|index| ElementHandle {
                selector: selector.to_string(),
                index,
                generation: self.generation,
            })
            .collect())
    }

    async fn text(&self, locator: &Locator) -> PageResult<String> {
        self.query(|document, _| {
            let element = self.resolve(document, locator)?;
            Ok(element.text().collect::<String>())
        })
    }

    async fn texts(&self, selector: &str) -> PageResult<Vec<String>> {
        self.query(|document, _| {
            Ok(document
                .select(&parse_selector(selector)?)
                .map(|element| element.text().collect::<String>())
                .collect())
        })
    }

    async fn attribute(&self, locator: &Locator, name: &str) -> PageResult<Option<String>> {
        self.query(|document, _| {
            let element = self.resolve(document, locator)?;
            Ok(element.value().attr(name).map(str::to_string))
        })
    }

    async fn is_visible(&self, selector: &str) -> PageResult<bool> {
        self.query(|document, _| {
            let Some(element) = document.select(&parse_selector(selector)?).next() else {
                return Ok(false);
            };
            let hidden = std::iter::once(element)
                .chain(element.ancestors().filter_map(ElementRef::wrap))
                .any(is_hidden);
            Ok(!hidden)
        })
    }
}
