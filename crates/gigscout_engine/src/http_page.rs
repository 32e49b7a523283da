use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use engine_logging::engine_debug;
use futures_util::StreamExt;
use reqwest::header::{CONTENT_TYPE, COOKIE};

use crate::page::BrowserPage;
use crate::settings::HttpSettings;
use crate::types::{CookieRecord, PageError, PageErrorKind, WaitUntil};

/// Static-markup backend: fetches each URL over HTTP and serves the decoded
/// document. There is no layout, so the document height is the markup length
/// and scrolling never reveals anything new.
///
/// Cookies set by the final response of each navigation are kept and sent on
/// later requests; cookies set on intermediate redirects are not seen.
pub struct HttpPage {
    settings: HttpSettings,
    client: reqwest::Client,
    cookies: Vec<CookieRecord>,
    current: Option<LoadedDocument>,
    closed: bool,
}

struct LoadedDocument {
    final_url: String,
    markup: String,
}

impl HttpPage {
    pub fn new(settings: HttpSettings) -> Result<Self, PageError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| PageError::new(PageErrorKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            client,
            cookies: Vec::new(),
            current: None,
            closed: false,
        })
    }

    /// URL of the loaded document after redirects.
    pub fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|doc| doc.final_url.as_str())
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    fn cookie_header(&self, url: &reqwest::Url) -> Option<String> {
        let host = url.host_str()?;
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .filter(|c| c.applies_to_host(host))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect();
        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }

    fn store_response_cookies(&mut self, response: &reqwest::Response) {
        let host = response.url().host_str().unwrap_or_default().to_string();
        for cookie in response.cookies() {
            let record = CookieRecord {
                name: cookie.name().to_string(),
                value: cookie.value().to_string(),
                domain: cookie.domain().map_or_else(|| host.clone(), str::to_string),
                path: cookie.path().unwrap_or("/").to_string(),
                expires: cookie_expiry(&cookie),
                http_only: cookie.http_only(),
                secure: cookie.secure(),
                session: cookie.expires().is_none() && cookie.max_age().is_none(),
                same_site: if cookie.same_site_strict() {
                    Some("Strict".to_string())
                } else if cookie.same_site_lax() {
                    Some("Lax".to_string())
                } else {
                    None
                },
            };
            engine_debug!("Stored cookie {} for {}", record.name, record.domain);
            self.cookies
                .retain(|c| !(c.name == record.name && c.domain == record.domain));
            self.cookies.push(record);
        }
    }

    fn ensure_open(&self) -> Result<(), PageError> {
        if self.closed {
            return Err(PageError::new(PageErrorKind::Closed, "page already closed"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl BrowserPage for HttpPage {
    async fn goto(&mut self, url: &str, _wait: WaitUntil, timeout: Duration) -> Result<(), PageError> {
        self.ensure_open()?;
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| PageError::new(PageErrorKind::InvalidUrl, err.to_string()))?;

        let mut request = self.client.get(parsed.clone()).timeout(timeout);
        if let Some(header) = self.cookie_header(&parsed) {
            request = request.header(COOKIE, header);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;
        self.store_response_cookies(&response);

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::new(
                PageErrorKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(PageError::new(
                    PageErrorKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(PageError::new(
                    PageErrorKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(PageError::new(
                    PageErrorKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let markup = decode_markup(&bytes, content_type.as_deref())?;
        engine_debug!("Loaded {} ({} bytes)", final_url, bytes.len());
        self.current = Some(LoadedDocument { final_url, markup });
        Ok(())
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), PageError> {
        self.ensure_open()
    }

    async fn document_height(&mut self) -> Result<u64, PageError> {
        self.ensure_open()?;
        self.current
            .as_ref()
            .map(|doc| doc.markup.len() as u64)
            .ok_or_else(|| PageError::new(PageErrorKind::NoDocument, "nothing loaded yet"))
    }

    async fn content(&mut self) -> Result<String, PageError> {
        self.ensure_open()?;
        self.current
            .as_ref()
            .map(|doc| doc.markup.clone())
            .ok_or_else(|| PageError::new(PageErrorKind::NoDocument, "nothing loaded yet"))
    }

    async fn cookies(&mut self) -> Result<Vec<CookieRecord>, PageError> {
        Ok(self.cookies.clone())
    }

    async fn set_cookies(&mut self, cookies: &[CookieRecord]) -> Result<(), PageError> {
        for cookie in cookies {
            self.cookies
                .retain(|c| !(c.name == cookie.name && c.domain == cookie.domain));
            self.cookies.push(cookie.clone());
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<(), PageError> {
        self.closed = true;
        self.current = None;
        Ok(())
    }
}

/// Seconds since the epoch, `-1` for session cookies. `Max-Age` wins over `Expires`.
fn cookie_expiry(cookie: &reqwest::cookie::Cookie<'_>) -> f64 {
    let at = match (cookie.max_age(), cookie.expires()) {
        (Some(max_age), _) => SystemTime::now().checked_add(max_age),
        (None, Some(expires)) => Some(expires),
        (None, None) => None,
    };
    at.and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map_or(-1.0, |d| d.as_secs_f64())
}

fn map_reqwest_error(err: reqwest::Error) -> PageError {
    if err.is_timeout() {
        return PageError::new(PageErrorKind::Timeout, err.to_string());
    }
    PageError::new(PageErrorKind::Network, err.to_string())
}

/// BOM -> Content-Type charset -> chardetng guess.
fn decode_markup(bytes: &[u8], content_type: Option<&str>) -> Result<String, PageError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(enc, _)| enc)
        .or_else(|| {
            content_type
                .and_then(charset_label)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(PageError::new(
            PageErrorKind::Decode,
            format!("invalid {} byte sequence", encoding.name()),
        ));
    }
    Ok(text.into_owned())
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::{charset_label, decode_markup};

    #[test]
    fn charset_is_read_case_insensitively() {
        assert_eq!(
            charset_label("text/html; Charset=\"ISO-8859-1\"").as_deref(),
            Some("ISO-8859-1")
        );
        assert_eq!(charset_label("text/html"), None);
    }

    #[test]
    fn latin1_markup_is_decoded() {
        let decoded = decode_markup(b"caf\xe9", Some("text/html; charset=ISO-8859-1")).unwrap();
        assert_eq!(decoded, "café");
    }

    #[test]
    fn bom_takes_precedence() {
        let decoded = decode_markup(b"\xEF\xBB\xBFhello", Some("text/html; charset=ISO-8859-1")).unwrap();
        assert_eq!(decoded, "hello");
    }
}
