use log::debug;

use super::fields::{
    classify_stock, decode_rating, extract_available, required_text_field, text_field,
};
use super::selectors::detail;
use crate::core::errors::{ExtractionError, FieldError, PageError};
use crate::core::record::{BookRecord, StockState};
use crate::page::{Locator, Page};

type FieldResult<T> = Result<T, ExtractionError>;

/// Builds one [`BookRecord`] from the detail view the page is positioned on.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordExtractor;

impl RecordExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Field queries run concurrently; failures are reported for the first
    /// field in record order, and any failure rejects the whole item.
    pub async fn extract(&self, page: &dyn Page, category: &str) -> FieldResult<BookRecord> {
        let (title, price, stock, rating, upc, description) = futures::join!(
            title(page),
            price(page),
            stock(page),
            rating(page),
            upc(page),
            description(page)
        );

        let title = title?;
        let price = price?;
        let (stock, available) = stock?;
        let rating = rating?;
        let upc = upc?;
        let description = description?;

        debug!("Extracted '{}' (upc {})", title, upc);

        Ok(BookRecord {
            title,
            category: category.to_string(),
            price,
            stock,
            available,
            rating,
            upc,
            description,
        })
    }
}

fn field_error(field: &'static str) -> impl Fn(FieldError) -> ExtractionError {
    move |e| ExtractionError::new(field, e)
}

/// Text at `selector`, with an absent element mapped to `None`.
async fn optional_text(
    page: &dyn Page,
    field: &'static str,
    selector: &str,
) -> FieldResult<Option<String>> {
    match page.text(&Locator::css(selector)).await {
        Ok(text) => Ok(Some(text)),
        Err(PageError::ElementNotFound { .. }) => Ok(None),
        Err(e) => Err(ExtractionError::new(field, e)),
    }
}

async fn title(page: &dyn Page) -> FieldResult<String> {
    let raw = optional_text(page, "title", detail::TITLE).await?;
    required_text_field("title", raw).map_err(field_error("title"))
}

async fn price(page: &dyn Page) -> FieldResult<String> {
    let raw = optional_text(page, "price", detail::PRICE).await?;
    text_field("price", raw).map_err(field_error("price"))
}

async fn stock(page: &dyn Page) -> FieldResult<(StockState, u32)> {
    let Some(text) = optional_text(page, "stock", detail::AVAILABILITY).await? else {
        return Ok((StockState::Unknown, 0));
    };

    let visible = page
        .is_visible(detail::AVAILABILITY)
        .await
        .map_err(|e| ExtractionError::new("stock", e))?;
    // hidden availability counts as out of stock
    if !visible {
        return Ok((StockState::OutOfStock, 0));
    }

    let stock = classify_stock(Some(text.as_str()));
    let available = match stock {
        StockState::InStock => extract_available(&text),
        _ => 0,
    };
    Ok((stock, available))
}

async fn rating(page: &dyn Page) -> FieldResult<u8> {
    let class_attr = match page
        .attribute(&Locator::css(detail::RATING), detail::RATING_ATTR)
        .await
    {
        Ok(Some(value)) => value,
        Ok(None) | Err(PageError::ElementNotFound { .. }) => {
            return Err(ExtractionError::new(
                "rating",
                FieldError::MissingField { field: "rating" },
            ))
        }
        Err(e) => return Err(ExtractionError::new("rating", e)),
    };

    decode_rating(&class_attr).map_err(field_error("rating"))
}

async fn upc(page: &dyn Page) -> FieldResult<String> {
    let page_error = |e: PageError| ExtractionError::new("upc", e);

    let headers = page.texts(detail::INFO_HEADER).await.map_err(page_error)?;
    let raw = match headers.iter().position(|h| h.trim() == detail::UPC_HEADER) {
        Some(row) => page
            .texts(detail::INFO_VALUE)
            .await
            .map_err(page_error)?
            .into_iter()
            .nth(row),
        None => None,
    };

    required_text_field("upc", raw).map_err(field_error("upc"))
}

async fn description(page: &dyn Page) -> FieldResult<String> {
    let raw = optional_text(page, "description", detail::DESCRIPTION).await?;
    text_field("description", raw).map_err(field_error("description"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ExtractionCause;
    use crate::fixtures::{detail_url, DetailFixture};
    use crate::page::DocumentPage;
    use crate::scrapers::MockScraper;
    use std::time::Duration;
    use url::Url;

    async fn page_at(fixture: &DetailFixture) -> DocumentPage {
        let url = detail_url(&fixture.title);
        let scraper = MockScraper::new().with_page(&url, fixture.render()).unwrap();
        let mut page = DocumentPage::new(Box::new(scraper), Duration::from_secs(1));
        page.goto(&Url::parse(&url).unwrap()).await.unwrap();
        page
    }

    #[tokio::test]
    async fn test_extracts_full_record() {
        let fixture = DetailFixture::new("It's Only the Himalayas")
            .rating_class("star-rating Three")
            .upc(Some("a22124811bfa8350"));
        let page = page_at(&fixture).await;

        let record = RecordExtractor::new().extract(&page, "Travel").await.unwrap();

        assert_eq!(
            record,
            BookRecord {
                title: "It's Only the Himalayas".to_string(),
                category: "Travel".to_string(),
                price: "£45.17".to_string(),
                stock: StockState::InStock,
                available: 19,
                rating: 3,
                upc: "a22124811bfa8350".to_string(),
                description: "About It's Only the Himalayas.".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_out_of_stock_has_zero_available() {
        let fixture = DetailFixture::new("Sold Out").availability(Some("Out of stock"));
        let page = page_at(&fixture).await;

        let record = RecordExtractor::new().extract(&page, "Poetry").await.unwrap();
        assert_eq!(record.stock, StockState::OutOfStock);
        assert_eq!(record.available, 0);
    }

    #[tokio::test]
    async fn test_absent_availability_is_unknown() {
        let fixture = DetailFixture::new("No Availability").availability(None);
        let page = page_at(&fixture).await;

        let record = RecordExtractor::new().extract(&page, "Poetry").await.unwrap();
        assert_eq!(record.stock, StockState::Unknown);
        assert_eq!(record.available, 0);
    }

    #[tokio::test]
    async fn test_hidden_availability_is_out_of_stock() {
        let fixture = DetailFixture::new("Withdrawn")
            .availability(Some("In stock (19 available)"))
            .hide_availability();
        let page = page_at(&fixture).await;

        let record = RecordExtractor::new().extract(&page, "Poetry").await.unwrap();
        assert_eq!(record.stock, StockState::OutOfStock);
        assert_eq!(record.available, 0);
    }

    #[tokio::test]
    async fn test_missing_description_names_field() {
        let fixture = DetailFixture::new("Quiet Book").description(None);
        let page = page_at(&fixture).await;

        let err = RecordExtractor::new().extract(&page, "Travel").await.unwrap_err();
        assert_eq!(err.field, "description");
        assert!(err.is_missing_field());
    }

    #[tokio::test]
    async fn test_unmapped_rating_is_rejected() {
        let fixture = DetailFixture::new("Odd Rating").rating_class("star-rating Eleven");
        let page = page_at(&fixture).await;

        let err = RecordExtractor::new().extract(&page, "Travel").await.unwrap_err();
        assert_eq!(err.field, "rating");
        assert_eq!(
            err.cause,
            ExtractionCause::Field(FieldError::UnparseableValue {
                field: "rating",
                value: "star-rating Eleven".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_first_failing_field_in_record_order() {
        let fixture = DetailFixture::new("Broken")
            .rating_class("star-rating")
            .upc(None)
            .description(None);
        let page = page_at(&fixture).await;

        let err = RecordExtractor::new().extract(&page, "Travel").await.unwrap_err();
        assert_eq!(err.field, "rating");
    }

    #[tokio::test]
    async fn test_missing_upc_row() {
        let fixture = DetailFixture::new("No Upc").upc(None);
        let page = page_at(&fixture).await;

        let err = RecordExtractor::new().extract(&page, "Travel").await.unwrap_err();
        assert_eq!(err.field, "upc");
        assert!(err.is_missing_field());
    }

    #[tokio::test]
    async fn test_page_without_document() {
        let page = DocumentPage::new(Box::new(MockScraper::new()), Duration::from_secs(1));

        let err = RecordExtractor::new().extract(&page, "Travel").await.unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(err.cause, ExtractionCause::Page(PageError::NoDocument));
    }
}
