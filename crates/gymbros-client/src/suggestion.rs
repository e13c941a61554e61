//! Schema-validated, fail-open AI suggestion parsing.
//!
//! The model's output is untrusted JSON. Anything that does not match the
//! schema and bounds below becomes "no suggestion" rather than an error:
//! AI output must never block booking or break a screen. The cache keeps
//! the last good suggestion per context for four hours and serves it stale
//! when the provider is down.

#![allow(async_fn_in_trait)]

use std::hash::{Hash as _, Hasher as _};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use gymbros_domain::id::ClassId;

pub const SUGGESTION_TTL_HOURS: i64 = 4;
pub const MAX_RECOMMENDED_CLASSES: usize = 3;
pub const MAX_SMART_TAGS: usize = 3;
pub const MAX_RETENTION_ALERTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Class,
    Timing,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VibeType {
    Focus,
    Power,
    Calm,
    Social,
}

/// A member-facing suggestion card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSuggestion {
    pub headline: String,
    pub reasoning: String,
    pub recommended_class_ids: Vec<ClassId>,
    pub recommendation_type: RecommendationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimal_time: Option<String>,
    pub vibe_type: VibeType,
    #[serde(default)]
    pub smart_tags: Vec<String>,
}

/// Parse and bound-check a raw model payload. `None` means "show no
/// suggestion": wrong shape, empty text, zero or more than three
/// recommended classes, or more than three tags.
pub fn validate(raw: serde_json::Value) -> Option<AiSuggestion> {
    let suggestion: AiSuggestion = match serde_json::from_value(raw) {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!(error = %e, "discarding malformed suggestion payload");
            return None;
        }
    };
    if suggestion.headline.trim().is_empty() || suggestion.reasoning.trim().is_empty() {
        return None;
    }
    if suggestion.recommended_class_ids.is_empty()
        || suggestion.recommended_class_ids.len() > MAX_RECOMMENDED_CLASSES
    {
        return None;
    }
    if suggestion.smart_tags.len() > MAX_SMART_TAGS {
        return None;
    }
    Some(suggestion)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightVibe {
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastTone {
    Friendly,
    Urgent,
    Motivational,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRecap {
    pub summary: String,
    pub attendance_rate: f64,
    pub trend: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionAlert {
    pub member_name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartBroadcast {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub tone: BroadcastTone,
    pub vibe_type: InsightVibe,
}

/// The trainer dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachInsights {
    pub recap: WeeklyRecap,
    #[serde(default)]
    pub retention_alerts: Vec<RetentionAlert>,
    #[serde(default)]
    pub smart_broadcasts: Vec<SmartBroadcast>,
}

/// Same discipline as [`validate`]: `None` hides the insights panel.
pub fn validate_coach_insights(raw: serde_json::Value) -> Option<CoachInsights> {
    let insights: CoachInsights = match serde_json::from_value(raw) {
        Ok(i) => i,
        Err(e) => {
            tracing::debug!(error = %e, "discarding malformed insights payload");
            return None;
        }
    };
    if insights.recap.summary.trim().is_empty() {
        return None;
    }
    if !(0.0..=1.0).contains(&insights.recap.attendance_rate) {
        return None;
    }
    if insights.retention_alerts.len() > MAX_RETENTION_ALERTS {
        return None;
    }
    Some(insights)
}

/// The inputs a suggestion was generated from. Two contexts with the same
/// fingerprint may reuse a cached suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionContext {
    pub booked_class_ids: Vec<ClassId>,
    pub goal: String,
    pub language: String,
}

impl SuggestionContext {
    /// Order-insensitive over the booked classes: re-sorting the schedule
    /// list must not bust the cache.
    pub fn fingerprint(&self) -> u64 {
        let mut ids = self.booked_class_ids.clone();
        ids.sort_unstable_by_key(|id| id.0);

        let mut hasher = std::hash::DefaultHasher::new();
        ids.hash(&mut hasher);
        self.goal.hash(&mut hasher);
        self.language.hash(&mut hasher);
        hasher.finish()
    }
}

/// Raw-suggestion source (the AI edge function, behind the gateway).
pub trait SuggestionProvider {
    async fn fetch_suggestion(
        &self,
        context: &SuggestionContext,
    ) -> Result<serde_json::Value, anyhow::Error>;
}

#[derive(Debug, Clone)]
struct CachedSuggestion {
    suggestion: AiSuggestion,
    fingerprint: u64,
    stored_at: DateTime<Utc>,
}

/// Last-good-suggestion cache with a TTL and context fingerprint.
#[derive(Debug, Default)]
pub struct SuggestionCache {
    entry: Option<CachedSuggestion>,
}

impl SuggestionCache {
    pub fn new() -> Self {
        Self { entry: None }
    }

    fn fresh(&self, fingerprint: u64, now: DateTime<Utc>) -> Option<&AiSuggestion> {
        let entry = self.entry.as_ref()?;
        let expired = now - entry.stored_at >= Duration::hours(SUGGESTION_TTL_HOURS);
        (entry.fingerprint == fingerprint && !expired).then_some(&entry.suggestion)
    }

    /// Return the cached suggestion if fresh for this context, otherwise
    /// fetch and validate a new one.
    ///
    /// - Valid payload: cached and returned.
    /// - Invalid payload: `None` (fail-open; nothing cached).
    /// - Provider error: the previous suggestion, stale or not, if any.
    pub async fn get_or_fetch<P: SuggestionProvider>(
        &mut self,
        provider: &P,
        context: &SuggestionContext,
        now: DateTime<Utc>,
    ) -> Option<AiSuggestion> {
        let fingerprint = context.fingerprint();
        if let Some(cached) = self.fresh(fingerprint, now) {
            return Some(cached.clone());
        }

        match provider.fetch_suggestion(context).await {
            Ok(raw) => {
                let suggestion = validate(raw)?;
                self.entry = Some(CachedSuggestion {
                    suggestion: suggestion.clone(),
                    fingerprint,
                    stored_at: now,
                });
                Some(suggestion)
            }
            Err(e) => {
                tracing::debug!(error = %e, "suggestion fetch failed, serving last good");
                self.entry.as_ref().map(|e| e.suggestion.clone())
            }
        }
    }
}
