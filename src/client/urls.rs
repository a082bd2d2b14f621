use crate::models::ids::ClientId;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

pub struct UrlBuilder {
    base_url: String,
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl UrlBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn sse_connect(&self, client_id: &ClientId) -> String {
        format!(
            "{}/api/sse/connect?clientId={}",
            self.base_url,
            urlencoding::encode(client_id.as_ref())
        )
    }

    pub fn order_simulate(&self) -> String {
        format!("{}/api/order/simulate", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_id_is_query_encoded() {
        let urls = UrlBuilder::new("http://localhost:8080");
        assert_eq!(
            urls.sse_connect(&ClientId::from("client 1&x")),
            "http://localhost:8080/api/sse/connect?clientId=client%201%26x"
        );
    }
}
