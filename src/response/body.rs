//! Body emission: `send` and the `json` call shapes

use serde::Serialize;

use super::{JsonArg, Payload, ResponseBuilder};
use crate::error::Result;

impl ResponseBuilder<'_> {
    /// Append `data` to the body
    ///
    /// Structured values (JSON arrays and objects) are serialized first;
    /// text and bytes are written as-is. With `stop` set the exchange ends
    /// after this write and every later write fails with `Ended`.
    pub fn send(&mut self, data: impl Into<Payload>, stop: bool) -> Result<bool> {
        self.ensure_open()?;
        self.write(&data.into().into_bytes());
        if stop {
            self.ended = true;
        }
        Ok(true)
    }

    /// JSON response with status 200
    pub fn json<T: Serialize + ?Sized>(&mut self, data: &T) -> Result<bool> {
        self.json_with(data, JsonArg::default())
    }

    /// JSON response with a status code, or with the legacy stop flag
    ///
    /// `json_with(&data, 404)` sets the status; `json_with(&data, true)`
    /// keeps status 200 and ends the exchange.
    pub fn json_with<T: Serialize + ?Sized>(
        &mut self,
        data: &T,
        arg: impl Into<JsonArg>,
    ) -> Result<bool> {
        let JsonArg { code, stop } = arg.into();
        self.json_full(data, code, stop)
    }

    /// JSON response with explicit status and stop flag
    pub fn json_full<T: Serialize + ?Sized>(
        &mut self,
        data: &T,
        code: u16,
        stop: bool,
    ) -> Result<bool> {
        self.ensure_open()?;
        let encoded = serde_json::to_string(data)?;

        self.force_utf8();
        self.add_header("Content-Type", "application/json; charset=UTF-8")?;
        self.code(code, false);
        self.send(encoded, stop)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{DownloadConfig, ViewConfig};
    use crate::error::ResponseError;
    use crate::response::{Responder, UTF8};
    use serde_json::json;

    fn responder() -> Responder {
        Responder::new(ViewConfig::default(), DownloadConfig::default())
    }

    #[test]
    fn test_send_appends_and_keeps_going() {
        let r = responder();
        let mut res = r.response();
        assert!(res.send("Hello, ", false).unwrap());
        assert!(res.send(String::from("world"), false).unwrap());
        assert!(!res.is_ended());
        assert_eq!(res.body(), b"Hello, world");
    }

    #[test]
    fn test_send_serializes_containers() {
        let r = responder();
        let mut res = r.response();
        res.send(json!({"ok": true}), false).unwrap();
        res.send(json!(["a"]), false).unwrap();
        assert_eq!(res.body(), br#"{"ok":true}["a"]"#);
    }

    #[test]
    fn test_send_stop_ends_exchange() {
        let r = responder();
        let mut res = r.response();
        assert!(res.send("last words", true).unwrap());
        assert!(res.is_ended());

        assert!(matches!(res.send("more", false), Err(ResponseError::Ended)));
        assert!(matches!(
            res.add_header("X-After", "1"),
            Err(ResponseError::Ended)
        ));
        assert!(!res.code(500, true));
        assert_eq!(res.body(), b"last words");
        assert!(res.headers().get("X-After").is_none());
    }

    #[test]
    fn test_json_for_any_shape() {
        let r = responder();
        for data in [json!({"a": 1}), json!([1, 2]), json!("text"), json!(3.5), json!(null)] {
            let mut res = r.response();
            assert!(res.json(&data).unwrap());
            assert_eq!(
                res.headers()["Content-Type"],
                "application/json; charset=UTF-8"
            );
            assert_eq!(res.body(), data.to_string().as_bytes());
            assert_eq!(res.status(), Some(200));
            assert_eq!(res.charset(), Some(UTF8));
        }
    }

    #[test]
    fn test_json_with_code() {
        let r = responder();
        let mut res = r.response();
        res.json_with(&json!({"error": "missing"}), 404u16).unwrap();
        assert_eq!(res.status_line().as_deref(), Some("HTTP/1.1 404 Not Found"));
        assert!(!res.is_ended());
    }

    #[test]
    fn test_json_legacy_bool_matches_explicit_stop() {
        let r = responder();
        let data = json!({"done": true});

        let mut legacy = r.response();
        legacy.json_with(&data, true).unwrap();

        let mut explicit = r.response();
        explicit.json_full(&data, 200, true).unwrap();

        assert_eq!(legacy.status(), Some(200));
        assert!(legacy.is_ended());
        assert_eq!(legacy.status(), explicit.status());
        assert_eq!(legacy.body(), explicit.body());
        assert_eq!(legacy.headers(), explicit.headers());
        assert!(legacy.send("after", false).is_err());
    }

    #[test]
    fn test_json_unsupported_code_keeps_body() {
        let r = responder();
        let mut res = r.response();
        res.json_with(&json!([]), 418u16).unwrap();
        assert_eq!(res.status(), None);
        assert_eq!(res.body(), b"[]");
        assert_eq!(res.finish().status(), 200);
    }

    #[test]
    fn test_json_serializes_structs() {
        #[derive(serde::Serialize)]
        struct User {
            id: u32,
            name: &'static str,
        }
        let r = responder();
        let mut res = r.response();
        res.json(&User { id: 7, name: "Ada" }).unwrap();
        assert_eq!(res.body(), br#"{"id":7,"name":"Ada"}"#);
    }
}
