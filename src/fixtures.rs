//! HTML fixtures shaped like the catalog's markup, and an in-memory catalog
//! served through [`MockScraper`].

use crate::parser::fields::encode_rating;
use crate::scrapers::MockScraper;

pub const BASE: &str = "http://books.test/";

#[derive(Debug, Clone)]
pub struct DetailFixture {
    pub title: String,
    pub price: String,
    pub availability: Option<String>,
    pub availability_hidden: bool,
    pub rating_class: String,
    pub upc: Option<String>,
    pub description: Option<String>,
}

impl DetailFixture {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            price: "£45.17".to_string(),
            availability: Some("In stock (19 available)".to_string()),
            availability_hidden: false,
            rating_class: format!("star-rating {}", encode_rating(3).unwrap_or("Three")),
            upc: Some(format!("upc-{}", slug(title))),
            description: Some(format!("About {}.", title)),
        }
    }

    pub fn availability(mut self, text: Option<&str>) -> Self {
        self.availability = text.map(str::to_string);
        self
    }

    pub fn hide_availability(mut self) -> Self {
        self.availability_hidden = true;
        self
    }

    pub fn rating_class(mut self, class_attr: &str) -> Self {
        self.rating_class = class_attr.to_string();
        self
    }

    pub fn upc(mut self, upc: Option<&str>) -> Self {
        self.upc = upc.map(str::to_string);
        self
    }

    pub fn description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(str::to_string);
        self
    }

    pub fn render(&self) -> String {
        let availability = self
            .availability
            .as_ref()
            .map(|text| {
                let style = if self.availability_hidden {
                    " style=\"display: none\""
                } else {
                    ""
                };
                format!(
                    "<p class=\"instock availability\"{}>\n    <i class=\"icon-ok\"></i>\n    {}\n</p>",
                    style, text
                )
            })
            .unwrap_or_default();

        let description = self
            .description
            .as_ref()
            .map(|text| {
                format!(
                    "<div id=\"product_description\" class=\"sub-header\"><h2>Product Description</h2></div>\n<p>{}</p>",
                    text
                )
            })
            .unwrap_or_default();

        let upc_row = self
            .upc
            .as_ref()
            .map(|upc| format!("<tr><th>UPC</th><td>{}</td></tr>", upc))
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html><body>
<article class="product_page">
  <div class="row">
    <div class="col-sm-6 product_main">
      <h1>{title}</h1>
      <p class="price_color">{price}</p>
      {availability}
      <p class="{rating}">
        <i class="icon-star"></i>
      </p>
    </div>
  </div>
  {description}
  <table class="table table-striped">
    {upc_row}
    <tr><th>Product Type</th><td>Books</td></tr>
    <tr><th>Price (excl. tax)</th><td>{price}</td></tr>
  </table>
</article>
</body></html>"#,
            title = self.title,
            price = self.price,
            availability = availability,
            rating = self.rating_class,
            description = description,
            upc_row = upc_row,
        )
    }
}

pub fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

pub fn category_url(name: &str) -> String {
    format!("{}catalogue/category/{}/index.html", BASE, slug(name))
}

pub fn detail_url(title: &str) -> String {
    format!("{}catalogue/{}/index.html", BASE, slug(title))
}

pub fn root_page(categories: &[&str]) -> String {
    let links: String = categories
        .iter()
        .map(|name| {
            format!(
                "<li>\n  <a href=\"catalogue/category/{}/index.html\">\n    {}\n  </a>\n</li>\n",
                slug(name),
                name
            )
        })
        .collect();

    format!(
        r#"<html><body>
<ul class="nav nav-list">
  <li>
    <a href="catalogue/category/books_1/index.html">Books</a>
    <ul>
{links}
    </ul>
  </li>
</ul>
</body></html>"#
    )
}

pub fn listing_page(titles: &[&str]) -> String {
    let cards: String = titles
        .iter()
        .map(|title| {
            format!(
                "<li><article class=\"product_pod\"><h3><a href=\"../../{}/index.html\" title=\"{}\">{}</a></h3></article></li>\n",
                slug(title),
                title,
                title
            )
        })
        .collect();

    format!("<html><body><section><ol class=\"row\">\n{cards}</ol></section></body></html>")
}

/// A catalog: categories in display order, each with its items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub categories: Vec<(String, Vec<DetailFixture>)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, name: &str, items: Vec<DetailFixture>) -> Self {
        self.categories.push((name.to_string(), items));
        self
    }

    pub fn scraper(&self) -> MockScraper {
        let names: Vec<&str> = self.categories.iter().map(|(n, _)| n.as_str()).collect();
        let mut scraper = MockScraper::new().with_page(BASE, root_page(&names)).unwrap();

        for (name, items) in &self.categories {
            let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
            scraper = scraper
                .with_page(&category_url(name), listing_page(&titles))
                .unwrap();
            for item in items {
                scraper = scraper
                    .with_page(&detail_url(&item.title), item.render())
                    .unwrap();
            }
        }
        scraper
    }
}
