//! Submit request use case: free-text request lines in, a classified
//! pending request out.

use std::sync::{Arc, OnceLock};

use regex_lite::Regex;

use clockwork_domain::{
    classify_line, CharacterName, LineDisposition, Quality, Request, RequestLine, UserId,
};

use crate::infrastructure::clock::ClockHandle;
use crate::infrastructure::ports::Notifier;
use crate::stores::{CatalogStore, RequestStore};

use super::error::RequestError;

/// Quality suffix on a request line, e.g. "Sword of Flame (enchanted)".
/// Lines without one default to raw.
fn quality_suffix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(.+?)\s*\((raw|enchanted|legendary)\)\s*$")
            .expect("static pattern compiles")
    })
}

/// Split free text into request lines, one item per line. Blank lines are
/// skipped; a trailing quality suffix is peeled off, defaulting to raw.
pub(crate) fn parse_request_lines(text: &str) -> Vec<RequestLine> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let line = match quality_suffix().captures(trimmed) {
            Some(captures) => {
                let name = captures[1].trim().to_string();
                let quality = captures[2]
                    .to_lowercase()
                    .parse::<Quality>()
                    .unwrap_or(Quality::Raw);
                RequestLine::new(name, quality)
            }
            None => RequestLine::new(trimmed, Quality::Raw),
        };
        lines.push(line);
    }
    lines
}

/// Submit request use case.
pub struct SubmitRequest {
    catalog: Arc<CatalogStore>,
    requests: Arc<RequestStore>,
    notifier: Arc<dyn Notifier>,
    clock: ClockHandle,
}

impl SubmitRequest {
    pub fn new(
        catalog: Arc<CatalogStore>,
        requests: Arc<RequestStore>,
        notifier: Arc<dyn Notifier>,
        clock: ClockHandle,
    ) -> Self {
        Self {
            catalog,
            requests,
            notifier,
            clock,
        }
    }

    /// Parse, classify, and record a free-text request.
    ///
    /// Every line lands in exactly one bucket; a request is created even
    /// when nothing could be confirmed, so staff see what the requester
    /// asked for and can follow up.
    pub async fn execute(
        &self,
        user_id: &UserId,
        character_name: CharacterName,
        text: &str,
        notes: Option<String>,
    ) -> Result<Request, RequestError> {
        let lines = parse_request_lines(text);
        if lines.is_empty() {
            return Err(RequestError::Validation(
                "Request contained no item lines".to_string(),
            ));
        }

        let catalog = self.catalog.snapshot().await;
        let id = self.requests.next_id();
        let mut request = Request::new(
            id,
            user_id.clone(),
            character_name,
            notes,
            self.clock.now(),
        );

        for line in &lines {
            match classify_line(&catalog, line) {
                LineDisposition::Confirmed(item) => request.confirmed.push(item),
                LineDisposition::Suggested(item) => {
                    tracing::debug!(
                        request_id = %id,
                        original = %item.original,
                        suggested = %item.suggested,
                        confidence = item.confidence,
                        "Line needs confirmation"
                    );
                    request.suggested.push(item);
                }
                LineDisposition::Unverifiable(item) => {
                    tracing::warn!(
                        request_id = %id,
                        original = %item.original,
                        reason = %item.reason,
                        "Line could not be verified"
                    );
                    request.unverifiable.push(item);
                }
            }
        }

        self.requests.insert(request.clone());

        // Announcement is best-effort; the request exists either way.
        if let Err(err) = self.notifier.announce_request(&request).await {
            tracing::warn!(request_id = %request.id, error = %err, "Request announcement failed");
        }

        tracing::info!(
            request_id = %request.id,
            user_id = %user_id,
            confirmed = request.confirmed.len(),
            suggested = request.suggested.len(),
            unverifiable = request.unverifiable.len(),
            "Request submitted"
        );
        Ok(request)
    }
}
