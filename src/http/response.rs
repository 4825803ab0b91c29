use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    Html,
    Json,
    Text,
    Binary,
}

impl ResponseType {
    /// Whether the body can be parsed as a document view.
    pub fn is_markup(&self) -> bool {
        matches!(self, ResponseType::Html | ResponseType::Text)
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub url: Url,
    pub status: u16,
    pub body: String,
    pub response_type: ResponseType,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }
}
