//! The request lifecycle state machine and line-item classification.
//!
//! A request is born Pending and moves exactly once to Fulfilled, Denied,
//! or Partial. All three are terminal: the active store drops the record on
//! transition, so a request id can never be acted on twice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::DomainError;
use crate::ids::{CharacterName, RequestId, UserId};
use crate::matcher::{resolve, Candidate, MatchOutcome};
use crate::quality::Quality;

/// Lifecycle status. Pending is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Fulfilled,
    Denied,
    Partial,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fulfilled => "fulfilled",
            Self::Denied => "denied",
            Self::Partial => "partial",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A line item resolved with the requested quality in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedItem {
    /// Catalog display name.
    pub name: String,
    pub quality: Quality,
    /// What the requester actually typed, when it differed from the
    /// catalog name.
    pub typed_as: Option<String>,
}

/// A fuzzy match above the suggestion threshold, pending staff
/// confirmation before it can be filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedItem {
    /// The request line as typed, quality included.
    pub original: String,
    /// Catalog display name of the best match.
    pub suggested: String,
    pub requested_quality: Quality,
    pub confidence: f64,
    /// Display names of nearby candidates, best first.
    pub alternatives: Vec<String>,
}

/// A line item the matcher could not usably resolve, or whose requested
/// quality is out of stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnverifiableItem {
    /// The request line as typed, quality included.
    pub original: String,
    pub reason: String,
    /// Tiers actually in stock, when the name matched but the quality
    /// did not.
    pub available_qualities: Vec<Quality>,
    /// Display names of weak candidates, best first.
    pub alternatives: Vec<String>,
}

/// How a pending request was closed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionKind {
    Fulfilled,
    Denied {
        reason: String,
    },
    /// Free-form staff text, recorded verbatim.
    Partial {
        sent_items: String,
        unavailable_items: String,
    },
}

/// Terminal transition record: who acted, when, and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub staff_id: UserId,
    pub resolved_at: DateTime<Utc>,
    pub kind: ResolutionKind,
}

/// A tracked bank request.
///
/// Line items are snapshotted at submission time into three disjoint
/// buckets; the request references catalog items by name only, never by
/// live pointer, so later catalog refreshes cannot mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub user_id: UserId,
    pub character_name: CharacterName,
    pub confirmed: Vec<ConfirmedItem>,
    pub suggested: Vec<SuggestedItem>,
    pub unverifiable: Vec<UnverifiableItem>,
    pub notes: Option<String>,
    pub requested_at: DateTime<Utc>,
    pub status: RequestStatus,
    pub resolution: Option<Resolution>,
}

impl Request {
    pub fn new(
        id: RequestId,
        user_id: UserId,
        character_name: CharacterName,
        notes: Option<String>,
        requested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            character_name,
            confirmed: Vec::new(),
            suggested: Vec::new(),
            unverifiable: Vec::new(),
            notes,
            requested_at,
            status: RequestStatus::Pending,
            resolution: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Total line items across all three buckets.
    pub fn line_item_count(&self) -> usize {
        self.confirmed.len() + self.suggested.len() + self.unverifiable.len()
    }

    /// Whether any line item needs staff attention before filling.
    pub fn needs_attention(&self) -> bool {
        !self.suggested.is_empty() || !self.unverifiable.is_empty()
    }

    /// Transition Pending -> Fulfilled.
    pub fn fulfill(&mut self, staff_id: UserId, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.transition(staff_id, at, ResolutionKind::Fulfilled)
    }

    /// Transition Pending -> Denied. The reason is required.
    pub fn deny(
        &mut self,
        staff_id: UserId,
        reason: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(DomainError::validation("Denial reason cannot be empty"));
        }
        self.transition(staff_id, at, ResolutionKind::Denied { reason })
    }

    /// Transition Pending -> Partial. Both item strings are recorded
    /// verbatim.
    pub fn partial(
        &mut self,
        staff_id: UserId,
        sent_items: impl Into<String>,
        unavailable_items: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.transition(
            staff_id,
            at,
            ResolutionKind::Partial {
                sent_items: sent_items.into(),
                unavailable_items: unavailable_items.into(),
            },
        )
    }

    fn transition(
        &mut self,
        staff_id: UserId,
        at: DateTime<Utc>,
        kind: ResolutionKind,
    ) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::invalid_state_transition(format!(
                "request {} is already {}",
                self.id, self.status
            )));
        }
        self.status = match kind {
            ResolutionKind::Fulfilled => RequestStatus::Fulfilled,
            ResolutionKind::Denied { .. } => RequestStatus::Denied,
            ResolutionKind::Partial { .. } => RequestStatus::Partial,
        };
        self.resolution = Some(Resolution {
            staff_id,
            resolved_at: at,
            kind,
        });
        Ok(())
    }
}

// ============================================================================
// Line-item classification
// ============================================================================

/// One parsed request line: an item name and the quality it was asked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestLine {
    pub name: String,
    pub quality: Quality,
}

impl RequestLine {
    pub fn new(name: impl Into<String>, quality: Quality) -> Self {
        Self {
            name: name.into(),
            quality,
        }
    }

    /// The line as the requester wrote it, quality spelled out.
    fn original_text(&self) -> String {
        format!("{} ({})", self.name, self.quality)
    }
}

/// Which bucket a classified line lands in.
#[derive(Debug, Clone, PartialEq)]
pub enum LineDisposition {
    Confirmed(ConfirmedItem),
    Suggested(SuggestedItem),
    Unverifiable(UnverifiableItem),
}

/// Route one request line into a bucket.
///
/// Exact and high-confidence matches confirm when the requested quality is
/// in stock, and demote to unverifiable (with the stock that *is*
/// available) when it is not. Suggestions wait for staff; everything else
/// needs manual verification.
pub fn classify_line(catalog: &Catalog, line: &RequestLine) -> LineDisposition {
    match resolve(catalog, &line.name) {
        MatchOutcome::Exact { item }
        | MatchOutcome::HighConfidence { item, .. } => {
            if item.has_quality(line.quality) {
                let typed_as = if line.name.to_lowercase() != item.name.to_lowercase() {
                    Some(line.name.clone())
                } else {
                    None
                };
                LineDisposition::Confirmed(ConfirmedItem {
                    name: item.name.clone(),
                    quality: line.quality,
                    typed_as,
                })
            } else {
                LineDisposition::Unverifiable(UnverifiableItem {
                    original: line.original_text(),
                    reason: format!("{} quality not available", line.quality),
                    available_qualities: item.available_qualities(),
                    alternatives: Vec::new(),
                })
            }
        }
        MatchOutcome::Suggestion {
            item,
            confidence,
            alternatives,
        } => LineDisposition::Suggested(SuggestedItem {
            original: line.original_text(),
            suggested: item.name.clone(),
            requested_quality: line.quality,
            confidence,
            alternatives: candidate_names(&alternatives),
        }),
        MatchOutcome::LowConfidence { alternatives } => {
            LineDisposition::Unverifiable(UnverifiableItem {
                original: line.original_text(),
                reason: "low confidence match".to_string(),
                available_qualities: Vec::new(),
                alternatives: candidate_names(&alternatives),
            })
        }
        MatchOutcome::NotFound => LineDisposition::Unverifiable(UnverifiableItem {
            original: line.original_text(),
            reason: "no matches found".to_string(),
            available_qualities: Vec::new(),
            alternatives: Vec::new(),
        }),
    }
}

fn candidate_names(candidates: &[Candidate]) -> Vec<String> {
    candidates.iter().map(|c| c.item.name.clone()).collect()
}
