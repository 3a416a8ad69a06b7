//! CORS directives
//!
//! One method per header of the CORS protocol. Each validates its input
//! before the header is written.

use std::fmt::Display;

use super::ResponseBuilder;
use crate::error::{ResponseError, Result};

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
pub const MAX_AGE: &str = "Access-Control-Max-Age";
pub const EXPOSE_HEADERS: &str = "Access-Control-Expose-Headers";

impl ResponseBuilder<'_> {
    /// Allowed origins; an empty list (after dropping blank entries) allows `*`
    pub fn access_control_allow_origin<S: AsRef<str>>(
        &mut self,
        origins: &[S],
    ) -> Result<&mut Self> {
        let joined = join(origins);
        let value = if joined.is_empty() { "*" } else { joined.as_str() };
        self.add_header(ALLOW_ORIGIN, value)
    }

    pub fn access_control_allow_methods<S: AsRef<str>>(
        &mut self,
        methods: &[S],
    ) -> Result<&mut Self> {
        self.required_list(ALLOW_METHODS, methods)
    }

    pub fn access_control_allow_headers<S: AsRef<str>>(
        &mut self,
        headers: &[S],
    ) -> Result<&mut Self> {
        self.required_list(ALLOW_HEADERS, headers)
    }

    pub fn access_control_expose_headers<S: AsRef<str>>(
        &mut self,
        headers: &[S],
    ) -> Result<&mut Self> {
        self.required_list(EXPOSE_HEADERS, headers)
    }

    pub fn access_control_allow_credentials(&mut self) -> Result<&mut Self> {
        self.add_header(ALLOW_CREDENTIALS, "true")
    }

    /// Preflight cache lifetime in seconds, written verbatim
    ///
    /// Anything that does not parse as a finite number is rejected.
    pub fn access_control_max_age(&mut self, seconds: impl Display) -> Result<&mut Self> {
        let value = seconds.to_string();
        if !is_numeric(&value) {
            return Err(ResponseError::NotNumeric { value });
        }
        self.add_header(MAX_AGE, &value)
    }

    /// Blank entries are dropped; a list with nothing left is rejected
    fn required_list<S: AsRef<str>>(
        &mut self,
        header: &'static str,
        values: &[S],
    ) -> Result<&mut Self> {
        let joined = join(values);
        if joined.is_empty() {
            return Err(ResponseError::EmptyList { header });
        }
        self.add_header(header, &joined)
    }
}

fn join<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| v.as_ref().trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_numeric(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DownloadConfig, ViewConfig};
    use crate::response::Responder;

    fn responder() -> Responder {
        Responder::new(ViewConfig::default(), DownloadConfig::default())
    }

    #[test]
    fn test_allow_origin() {
        let r = responder();
        let mut res = r.response();
        res.access_control_allow_origin(&["a", "b"]).unwrap();
        assert_eq!(res.headers()[ALLOW_ORIGIN], "a, b");

        let none: [&str; 0] = [];
        res.access_control_allow_origin(&none).unwrap();
        assert_eq!(res.headers()[ALLOW_ORIGIN], "*");

        res.access_control_allow_origin(&["", "  "]).unwrap();
        assert_eq!(res.headers()[ALLOW_ORIGIN], "*");
    }

    #[test]
    fn test_empty_lists_rejected_before_mutation() {
        let r = responder();
        let mut res = r.response();
        let none: Vec<String> = Vec::new();

        let err = res.access_control_allow_methods(&none).unwrap_err();
        assert!(matches!(err, ResponseError::EmptyList { header } if header == ALLOW_METHODS));
        assert!(res.access_control_allow_headers(&none).is_err());
        assert!(res.access_control_expose_headers(&none).is_err());
        assert!(res.headers().is_empty());
    }

    #[test]
    fn test_blank_entries_dropped() {
        let r = responder();
        let mut res = r.response();
        let err = res.access_control_allow_methods(&[" ", ""]).unwrap_err();
        assert!(matches!(err, ResponseError::EmptyList { header } if header == ALLOW_METHODS));
        assert!(res.headers().is_empty());

        res.access_control_allow_headers(&[" X-A ", "", "X-B"]).unwrap();
        assert_eq!(res.headers()[ALLOW_HEADERS], "X-A, X-B");
    }

    #[test]
    fn test_lists_joined() {
        let r = responder();
        let mut res = r.response();
        res.access_control_allow_methods(&["GET", "POST"])
            .unwrap()
            .access_control_allow_headers(&["Content-Type".to_string()])
            .unwrap()
            .access_control_expose_headers(&["X-Total", "X-Page"])
            .unwrap()
            .access_control_allow_credentials()
            .unwrap();

        let headers = res.headers();
        assert_eq!(headers[ALLOW_METHODS], "GET, POST");
        assert_eq!(headers[ALLOW_HEADERS], "Content-Type");
        assert_eq!(headers[EXPOSE_HEADERS], "X-Total, X-Page");
        assert_eq!(headers[ALLOW_CREDENTIALS], "true");
    }

    #[test]
    fn test_max_age() {
        let r = responder();
        let mut res = r.response();
        res.access_control_max_age(86400).unwrap();
        assert_eq!(res.headers()[MAX_AGE], "86400");
        res.access_control_max_age("1.5").unwrap();
        assert_eq!(res.headers()[MAX_AGE], "1.5");

        for bad in ["ten", "", "NaN", "inf"] {
            let err = res.access_control_max_age(bad).unwrap_err();
            assert!(matches!(err, ResponseError::NotNumeric { .. }), "{bad} accepted");
        }
        assert_eq!(res.headers()[MAX_AGE], "1.5");
    }
}
