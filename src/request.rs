use serde_json::{Map, Value as JsonValue};

/// HTTP method of a logical API call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// One logical API call: endpoint, method and body.
///
/// The payload is only sent for non-GET requests.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestSpec {
    pub endpoint_path: String,
    pub method: Method,
    pub payload: Map<String, JsonValue>,
    pub query: Vec<(String, String)>,
}

impl RequestSpec {
    /// A GET request without body.
    pub fn get(endpoint_path: impl Into<String>) -> Self {
        Self {
            endpoint_path: endpoint_path.into(),
            method: Method::Get,
            payload: Map::new(),
            query: Vec::new(),
        }
    }

    /// A POST request carrying `payload` as its JSON body.
    pub fn post(endpoint_path: impl Into<String>, payload: Map<String, JsonValue>) -> Self {
        Self {
            endpoint_path: endpoint_path.into(),
            method: Method::Post,
            payload,
            query: Vec::new(),
        }
    }

    /// Appends a query-string pair.
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Whether the payload is serialized as the request body.
    pub fn has_body(&self) -> bool {
        self.method != Method::Get
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn get_never_has_body() {
        let mut spec = RequestSpec::get("/health");
        spec.payload.insert("ignored".to_owned(), json!(true));
        assert!(!spec.has_body());
    }

    #[test]
    fn post_has_body_and_query_accumulates() {
        let spec = RequestSpec::post("/scrapeurl", Map::new())
            .with_query("a", 1)
            .with_query("b", "two");
        assert!(spec.has_body());
        assert_eq!(
            spec.query,
            vec![
                ("a".to_owned(), "1".to_owned()),
                ("b".to_owned(), "two".to_owned())
            ]
        );
    }
}
