//! Locations queried on the catalog pages. Update these when the site markup
//! changes.

/// Root page.
pub mod root {
    /// Category links in the side navigation, in display order.
    pub const CATEGORY_LINK: &str = "ul.nav ul li a";
}

/// Category listing page.
pub mod listing {
    /// One link per item card, in display order.
    pub const ITEM_LINK: &str = "article.product_pod h3 a";

    /// The link's `title` attribute carries the untruncated item title.
    pub const ITEM_TITLE_ATTR: &str = "title";
}

/// Item detail page.
pub mod detail {
    pub const TITLE: &str = ".product_main h1";
    pub const PRICE: &str = ".product_main .price_color";
    pub const AVAILABILITY: &str = ".product_main .availability";
    pub const RATING: &str = ".product_main .star-rating";
    pub const RATING_ATTR: &str = "class";

    /// Header and data cells of the product information table. Each row
    /// holds exactly one of each, so the indices line up.
    pub const INFO_HEADER: &str = "table.table-striped th";
    pub const INFO_VALUE: &str = "table.table-striped td";
    pub const UPC_HEADER: &str = "UPC";

    pub const DESCRIPTION: &str = "#product_description + p";
}
