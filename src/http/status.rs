//! HTTP status code table
//!
//! The fixed set of status codes the response builder accepts.
//! Anything outside this table has to go through `add_header` directly.

/// Get the reason phrase for a supported status code
///
/// # Examples
/// ```
/// use responder::http::status::reason_phrase;
/// assert_eq!(reason_phrase(404), Some("Not Found"));
/// assert_eq!(reason_phrase(418), None);
/// ```
pub const fn reason_phrase(code: u16) -> Option<&'static str> {
    let phrase = match code {
        // 2xx
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        205 => "Reset Content",
        206 => "Partial Content",

        // 3xx
        300 => "Multiple Choices",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        305 => "Use Proxy",
        307 => "Temporary Redirect",

        // 4xx
        400 => "Bad Request",
        401 => "Unauthorized",
        402 => "Payment Required",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        407 => "Proxy Authentication Required",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        412 => "Precondition Failed",
        413 => "Payload Too Large",
        414 => "URI Too Long",
        415 => "Unsupported Media Type",
        416 => "Range Not Satisfiable",
        417 => "Expectation Failed",

        // 5xx
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",

        _ => return None,
    };
    Some(phrase)
}

/// Format an HTTP/1.1 status line, e.g. `HTTP/1.1 404 Not Found`
pub fn status_line(code: u16) -> Option<String> {
    reason_phrase(code).map(|reason| format!("HTTP/1.1 {code} {reason}"))
}

/// Every code in the table, in ascending order
pub const SUPPORTED_CODES: [u16; 37] = [
    200, 201, 202, 204, 205, 206, 300, 301, 302, 303, 304, 305, 307, 400, 401, 402, 403, 404, 405,
    406, 407, 408, 409, 410, 411, 412, 413, 414, 415, 416, 417, 500, 501, 502, 503, 504, 505,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_codes() {
        assert_eq!(reason_phrase(200), Some("OK"));
        assert_eq!(reason_phrase(307), Some("Temporary Redirect"));
        assert_eq!(reason_phrase(416), Some("Range Not Satisfiable"));
        assert_eq!(reason_phrase(505), Some("HTTP Version Not Supported"));
    }

    #[test]
    fn test_unsupported_codes() {
        for code in [0, 100, 203, 306, 308, 418, 429, 506, 999] {
            assert_eq!(reason_phrase(code), None, "code {code} should be rejected");
        }
    }

    #[test]
    fn test_table_matches_lookup() {
        for code in SUPPORTED_CODES {
            assert!(reason_phrase(code).is_some(), "code {code} missing a phrase");
        }
    }

    #[test]
    fn test_status_line() {
        assert_eq!(status_line(404).as_deref(), Some("HTTP/1.1 404 Not Found"));
        assert_eq!(status_line(451), None);
    }
}
