//! Inbound request model.
//!
//! [`HttpRequest`] keeps the request URL and headers and parses every
//! `Cookie` header once, on construction. Header names are case-insensitive
//! (`http::HeaderMap`), cookie names are not.

use crate::cookies::{parse_cookie_header, Cookie};
use http::header::COOKIE;
use http::HeaderMap;
use url::Url;

/// The parts of an inbound request the helpers rely on.
pub trait Request {
    /// Cookies sent with the request, in header order. Empty if none.
    fn cookies(&self) -> &[Cookie];

    /// Raw query string, without the leading `?`.
    fn query_string(&self) -> Option<&str>;

    /// First value of the query parameter `name`, form-url-decoded.
    fn parameter(&self, name: &str) -> Option<String>;

    /// Like [`parameter`](Request::parameter), with surrounding whitespace
    /// removed.
    fn parameter_trimmed(&self, name: &str) -> Option<String> {
        self.parameter(name).map(|v| v.trim().to_string())
    }
}

/// Simple request backed by a [`Url`] and a [`HeaderMap`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    url: Url,
    headers: HeaderMap,
    cookies: Vec<Cookie>,
}

impl HttpRequest {
    pub fn new(url: Url, headers: HeaderMap) -> Self {
        let cookies = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(parse_cookie_header)
            .collect();

        Self { url, headers, cookies }
    }

    /// Builds a request from an `http::Request`. Relative request URIs are
    /// resolved against `base`.
    pub fn from_http<B>(request: &http::Request<B>, base: &Url) -> Result<Self, url::ParseError> {
        let url = base.join(&request.uri().to_string())?;
        Ok(Self::new(url, request.headers().clone()))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl Request for HttpRequest {
    fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    fn query_string(&self) -> Option<&str> {
        self.url.query()
    }

    fn parameter(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn url(s: &str) -> Url {
        Url::parse(s).expect("valid URL")
    }

    #[test]
    fn no_cookie_header_means_no_cookies() {
        let req = HttpRequest::new(url("http://localhost/"), HeaderMap::new());
        assert!(req.cookies().is_empty());
    }

    #[test]
    fn all_cookie_headers_are_read_in_order() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1; b=2"));
        headers.append(COOKIE, HeaderValue::from_static("a=3"));

        let req = HttpRequest::new(url("http://localhost/"), headers);
        let names: Vec<&str> = req.cookies().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
    }

    #[test]
    fn parameters_are_decoded() {
        let req = HttpRequest::new(
            url("http://localhost/search?q=feilong%20shop&page=2&q=second&name=+x+"),
            HeaderMap::new(),
        );

        assert_eq!(req.query_string(), Some("q=feilong%20shop&page=2&q=second&name=+x+"));
        assert_eq!(req.parameter("q").as_deref(), Some("feilong shop"));
        assert_eq!(req.parameter("page").as_deref(), Some("2"));
        assert_eq!(req.parameter("name").as_deref(), Some(" x "));
        assert_eq!(req.parameter_trimmed("name").as_deref(), Some("x"));
        assert!(req.parameter("missing").is_none());
    }

    #[test]
    fn from_http_resolves_against_base() {
        let request = http::Request::builder()
            .uri("/member/info?id=7")
            .header(COOKIE, "shopName=feilong")
            .body(())
            .unwrap();

        let req = HttpRequest::from_http(&request, &url("https://shop.example.com/")).unwrap();
        assert_eq!(req.url().as_str(), "https://shop.example.com/member/info?id=7");
        assert_eq!(req.parameter("id").as_deref(), Some("7"));
        assert_eq!(req.cookies()[0].value, "feilong");
    }
}
