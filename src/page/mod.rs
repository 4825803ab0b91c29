//! The page-access capability the crawler drives.
//!
//! A [`Page`] is one mutable "current page" shared by the whole run. Read
//! queries take `&self` and may be issued concurrently against the same
//! view; navigation takes `&mut self`.

pub mod document;

use async_trait::async_trait;
use url::Url;

use crate::core::errors::PageResult;

pub use document::DocumentPage;

/// An element found by [`Page::list_elements`]. Only valid for the document
/// it was found in: any navigation makes it stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    pub selector: String,
    pub index: usize,
    pub generation: u64,
}

impl ElementHandle {
    pub fn describe(&self) -> String {
        format!("{}[{}]", self.selector, self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// First element matching a CSS selector.
    Css(String),
    Element(ElementHandle),
}

impl Locator {
    pub fn css(selector: &str) -> Self {
        Locator::Css(selector.to_string())
    }

    pub fn describe(&self) -> String {
        match self {
            Locator::Css(selector) => selector.clone(),
            Locator::Element(handle) => handle.describe(),
        }
    }
}

impl From<ElementHandle> for Locator {
    fn from(handle: ElementHandle) -> Self {
        Locator::Element(handle)
    }
}

impl From<&ElementHandle> for Locator {
    fn from(handle: &ElementHandle) -> Self {
        Locator::Element(handle.clone())
    }
}

#[async_trait]
pub trait Page: Send + Sync {
    /// Loads `url`. The view being left becomes reachable through `go_back`.
    async fn goto(&mut self, url: &Url) -> PageResult<()>;

    /// Follows the link carried by `handle` (or its first descendant link).
    async fn click(&mut self, handle: &ElementHandle) -> PageResult<()>;

    /// Returns to the previously visited view.
    async fn go_back(&mut self) -> PageResult<()>;

    fn current_url(&self) -> Option<&Url>;

    async fn list_elements(&self, selector: &str) -> PageResult<Vec<ElementHandle>>;

    async fn text(&self, locator: &Locator) -> PageResult<String>;

    /// Text of every element matching `selector`, in document order.
    async fn texts(&self, selector: &str) -> PageResult<Vec<String>>;

    /// `Ok(None)` when the element exists but lacks the attribute.
    async fn attribute(&self, locator: &Locator, name: &str) -> PageResult<Option<String>>;

    async fn is_visible(&self, selector: &str) -> PageResult<bool>;
}
