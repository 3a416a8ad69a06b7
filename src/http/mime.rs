//! MIME type detection module
//!
//! Downloads are typed by inspecting the file content first and the
//! extension second.

/// Detect the Content-Type of a file body
///
/// # Examples
/// ```
/// use responder::http::mime::detect;
/// assert_eq!(detect(b"%PDF-1.7 ...", Some("bin")), "application/pdf");
/// assert_eq!(detect(b"a,b\n1,2\n", Some("csv")), "text/csv");
/// assert_eq!(detect(b"plain words", None), "text/plain; charset=utf-8");
/// ```
pub fn detect(content: &[u8], extension: Option<&str>) -> &'static str {
    if let Some(sniffed) = sniff(content) {
        return sniffed;
    }

    let by_extension = from_extension(extension.map(str::to_ascii_lowercase).as_deref());
    if by_extension != OCTET_STREAM {
        return by_extension;
    }

    if looks_like_text(content) {
        "text/plain; charset=utf-8"
    } else {
        OCTET_STREAM
    }
}

const OCTET_STREAM: &str = "application/octet-stream";

/// Recognize well-known binary formats by their leading magic bytes
fn sniff(content: &[u8]) -> Option<&'static str> {
    let mime = if content.starts_with(b"%PDF-") {
        "application/pdf"
    } else if content.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if content.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if content.starts_with(b"GIF87a") || content.starts_with(b"GIF89a") {
        "image/gif"
    } else if content.len() >= 12 && &content[..4] == b"RIFF" && &content[8..12] == b"WEBP" {
        "image/webp"
    } else if content.starts_with(b"PK\x03\x04") {
        "application/zip"
    } else if content.starts_with(&[0x1F, 0x8B]) {
        "application/gzip"
    } else {
        return None;
    };
    Some(mime)
}

/// Empty files and valid UTF-8 without NUL bytes count as text
fn looks_like_text(content: &[u8]) -> bool {
    !content.contains(&0) && std::str::from_utf8(content).is_ok()
}

/// Get MIME Content-Type based on file extension
pub fn from_extension(extension: Option<&str>) -> &'static str {
    match extension {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("csv") => "text/csv",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // Scripts and data
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",

        // Images
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",

        // Media
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",

        // Documents
        Some("doc") => "application/msword",
        Some("xls") => "application/vnd.ms-excel",
        Some("tar") => "application/x-tar",

        _ => OCTET_STREAM,
    }
}
