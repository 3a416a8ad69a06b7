//! File downloads
//!
//! The file is read in full, typed by content inspection and written raw.
//! When `download.legacy_content_encoding` is on (the default) the response
//! also carries `Content-Encoding: base64` for compatibility with older
//! clients, although the body is never base64 encoded.

use std::path::Path;

use super::{header_pair, ResponseBuilder};
use crate::error::Result;
use crate::http::mime;
use crate::logger;

/// Options for [`ResponseBuilder::download`]
#[derive(Debug, Clone, Default)]
pub struct Download<'a> {
    name: Option<&'a str>,
    disposition: Option<&'a str>,
    headers: Vec<(&'a str, &'a str)>,
}

impl<'a> Download<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// File name offered to the client; defaults to the file's base name
    #[must_use]
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    /// `attachment` or `inline`; defaults to the configured disposition
    #[must_use]
    pub fn disposition(mut self, disposition: &'a str) -> Self {
        self.disposition = Some(disposition);
        self
    }

    /// Extra header, applied after the download headers
    #[must_use]
    pub fn header(mut self, name: &'a str, value: &'a str) -> Self {
        self.headers.push((name, value));
        self
    }
}

impl ResponseBuilder<'_> {
    /// Send a file as a download
    ///
    /// A missing or unreadable file fails with `Io`, and an invalid header
    /// with `InvalidHeader`, before any header is set.
    pub async fn download(
        &mut self,
        file: impl AsRef<Path>,
        options: Download<'_>,
    ) -> Result<()> {
        self.ensure_open()?;
        let path = file.as_ref();
        let content = tokio::fs::read(path).await?;

        let extension = path.extension().and_then(|e| e.to_str());
        let content_type = mime::detect(&content, extension);
        let base_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = options.name.unwrap_or(&base_name);

        let responder = self.responder;
        let config = responder.download_config();
        let disposition = options.disposition.unwrap_or(&config.default_disposition);
        let legacy_encoding = config.legacy_content_encoding;

        let mut headers = vec![
            header_pair("Content-Disposition", &format!("{disposition}; filename={name}"))?,
            header_pair("Content-Type", content_type)?,
            header_pair("Content-Length", &content.len().to_string())?,
        ];
        if legacy_encoding {
            headers.push(header_pair("Content-Encoding", "base64")?);
        }
        for (header, value) in &options.headers {
            headers.push(header_pair(header, value)?);
        }
        // Extra headers come last so they win over the computed ones
        for (header, value) in headers {
            self.headers.insert(header, value);
        }

        logger::log_debug(&format!(
            "Download {} as '{name}' ({content_type}, {} bytes)",
            path.display(),
            content.len()
        ));
        self.write(&content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DownloadConfig, ViewConfig};
    use crate::error::ResponseError;
    use crate::response::testing::{scratch_dir, write_file};
    use crate::response::Responder;

    fn responder(legacy_content_encoding: bool) -> Responder {
        Responder::new(
            ViewConfig::default(),
            DownloadConfig {
                legacy_content_encoding,
                ..DownloadConfig::default()
            },
        )
    }

    #[tokio::test]
    async fn test_download_defaults() {
        let tmp = scratch_dir("download");
        let dir = tmp.path();
        let file = write_file(dir, "report.pdf", b"%PDF-1.7\nfake report body");

        let r = responder(true);
        let mut res = r.response();
        res.download(&file, Download::new()).await.unwrap();

        let headers = res.headers();
        assert_eq!(
            headers["Content-Disposition"],
            "attachment; filename=report.pdf"
        );
        assert_eq!(headers["Content-Type"], "application/pdf");
        let size = std::fs::metadata(&file).unwrap().len();
        assert_eq!(headers["Content-Length"], size.to_string().as_str());
        assert_eq!(res.body(), b"%PDF-1.7\nfake report body");
    }

    #[tokio::test]
    async fn test_download_keeps_legacy_base64_header_without_encoding_body() {
        // Known discrepancy: the header claims base64 but the bytes are raw.
        let tmp = scratch_dir("download-legacy");
        let dir = tmp.path();
        let file = write_file(dir, "notes.txt", b"plain notes");

        let r = responder(true);
        let mut res = r.response();
        res.download(&file, Download::new()).await.unwrap();

        assert_eq!(res.headers()["Content-Encoding"], "base64");
        assert_eq!(res.body(), b"plain notes");
    }

    #[tokio::test]
    async fn test_download_without_legacy_header() {
        let tmp = scratch_dir("download-plain");
        let dir = tmp.path();
        let file = write_file(dir, "notes.txt", b"plain notes");

        let r = responder(false);
        let mut res = r.response();
        res.download(&file, Download::new()).await.unwrap();

        assert!(res.headers().get("Content-Encoding").is_none());
        assert_eq!(res.body(), b"plain notes");
    }

    #[tokio::test]
    async fn test_download_options() {
        let tmp = scratch_dir("download-options");
        let dir = tmp.path();
        let file = write_file(dir, "export.csv", b"id,name\n1,Ada\n");

        let r = responder(true);
        let mut res = r.response();
        let options = Download::new()
            .name("users.csv")
            .disposition("inline")
            .header("Cache-Control", "no-store")
            .header("Content-Type", "text/csv; charset=utf-8");
        res.download(&file, options).await.unwrap();

        let headers = res.headers();
        assert_eq!(headers["Content-Disposition"], "inline; filename=users.csv");
        assert_eq!(headers["Cache-Control"], "no-store");
        // Extra headers are applied last and win
        assert_eq!(headers["Content-Type"], "text/csv; charset=utf-8");
    }

    #[tokio::test]
    async fn test_download_invalid_extra_header_sets_nothing() {
        let tmp = scratch_dir("download-bad-header");
        let file = write_file(tmp.path(), "a.txt", b"hello");

        let r = responder(true);
        let mut res = r.response();
        let options = Download::new()
            .header("Cache-Control", "no-store")
            .header("X-Bad", "a\nb");
        let err = res.download(&file, options).await.unwrap_err();

        assert!(matches!(err, ResponseError::InvalidHeader { name } if name == "X-Bad"));
        assert!(res.headers().is_empty());
        assert!(res.body().is_empty());
    }

    #[tokio::test]
    async fn test_download_missing_file() {
        let tmp = scratch_dir("download-missing");
        let dir = tmp.path();
        let r = responder(true);
        let mut res = r.response();

        let err = res
            .download(dir.join("nope.bin"), Download::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ResponseError::Io(_)));
        assert!(res.headers().is_empty());
        assert!(res.body().is_empty());
    }
}
