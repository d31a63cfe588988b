//! Desk state and its transitions
//!
//! State is a plain value. Each transition consumes it and returns the next
//! one. Results are fenced by [`RequestId`] so a slow response can never
//! overwrite the outcome of a newer submission.

use crate::model::{ComparisonAnalysis, SingleAnalysis};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Input mode of the desk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Single,
    Multi,
    /// Chart-image analysis, not launched yet
    Image,
}

/// Identifies one in-flight submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient user notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level: NoticeLevel::Error,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskState {
    pub mode: Mode,
    pub is_loading: bool,
    /// Quote lookup failed; the user should enter a price manually
    pub price_error: Option<String>,
    pub last_error: Option<String>,
    pub single: Option<SingleAnalysis>,
    pub comparison: Option<ComparisonAnalysis>,
    pub notices: Vec<Notice>,
    pub pending: Option<RequestId>,
    pub updated_at: DateTime<Utc>,
}

impl Default for DeskState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            is_loading: false,
            price_error: None,
            last_error: None,
            single: None,
            comparison: None,
            notices: Vec::new(),
            pending: None,
            updated_at: Utc::now(),
        }
    }
}

impl DeskState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    fn is_current(&self, id: RequestId) -> bool {
        self.pending == Some(id)
    }

    /// Start a submission in the current mode, clearing that mode's result
    pub fn begin(self) -> (Self, RequestId) {
        let id = RequestId::new();
        let (single, comparison) = match self.mode {
            Mode::Single => (None, self.comparison),
            Mode::Multi => (self.single, None),
            Mode::Image => (self.single, self.comparison),
        };

        let next = Self {
            is_loading: true,
            price_error: None,
            last_error: None,
            single,
            comparison,
            pending: Some(id),
            updated_at: Utc::now(),
            ..self
        };
        (next, id)
    }

    /// Append a notice for the request `id`; ignored when stale
    pub fn notify(mut self, id: RequestId, notice: Notice) -> Self {
        if !self.is_current(id) {
            return self;
        }
        self.notices.push(notice);
        self
    }

    pub fn finish_single(self, id: RequestId, analysis: SingleAnalysis) -> Self {
        if !self.is_current(id) {
            return self;
        }
        Self {
            is_loading: false,
            single: Some(analysis),
            pending: None,
            updated_at: Utc::now(),
            ..self
        }
    }

    pub fn finish_comparison(self, id: RequestId, comparison: ComparisonAnalysis) -> Self {
        if !self.is_current(id) {
            return self;
        }
        Self {
            is_loading: false,
            comparison: Some(comparison),
            pending: None,
            updated_at: Utc::now(),
            ..self
        }
    }

    /// End the request with an error notice
    pub fn fail(self, id: RequestId, notice: Notice) -> Self {
        if !self.is_current(id) {
            return self;
        }
        let mut notices = self.notices;
        let last_error = Some(notice.description.clone());
        notices.push(notice);

        Self {
            is_loading: false,
            last_error,
            notices,
            pending: None,
            updated_at: Utc::now(),
            ..self
        }
    }

    /// End the request because no price could be resolved
    pub fn price_failed(self, id: RequestId, message: impl Into<String>) -> Self {
        if !self.is_current(id) {
            return self;
        }
        Self {
            is_loading: false,
            price_error: Some(message.into()),
            pending: None,
            updated_at: Utc::now(),
            ..self
        }
    }

    pub fn switch_mode(self, mode: Mode) -> Self {
        Self {
            mode,
            price_error: None,
            updated_at: Utc::now(),
            ..self
        }
    }

    /// Hand queued notices to the caller
    pub fn take_notices(mut self) -> (Self, Vec<Notice>) {
        let notices = std::mem::take(&mut self.notices);
        (self, notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{normalize_comparison, normalize_single};
    use crate::model::{PricePoint, RiskProfile, SingleRequest, Timeframe};

    fn analysis(signal: &str) -> SingleAnalysis {
        let request = SingleRequest::new("AAPL", 1.0, Timeframe::Swing, RiskProfile::Moderate);
        normalize_single(&format!("{{\"signal\":\"{signal}\"}}"), &request).into_inner()
    }

    #[test]
    fn test_begin_and_finish() {
        let (state, id) = DeskState::default().begin();
        assert!(state.is_loading);
        assert_eq!(state.pending, Some(id));

        let state = state.finish_single(id, analysis("BUY"));
        assert!(!state.is_loading);
        assert_eq!(state.pending, None);
        assert_eq!(state.single.as_ref().map(|a| a.signal.as_str()), Some("BUY"));
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let (state, first) = DeskState::default().begin();
        let (state, second) = state.begin();

        let state = state.finish_single(first, analysis("SELL"));
        assert!(state.single.is_none());
        assert!(state.is_loading);

        let state = state.fail(first, Notice::error("Analysis Failed", "late"));
        assert!(state.notices.is_empty());
        assert_eq!(state.last_error, None);

        let state = state.finish_single(second, analysis("BUY"));
        assert_eq!(state.single.map(|a| a.signal.as_str()), Some("BUY"));
    }

    #[test]
    fn test_begin_clears_only_current_mode() {
        let stocks = vec![PricePoint::new("A", 1.0), PricePoint::new("B", 2.0)];
        let (state, id) = DeskState::new(Mode::Multi).begin();
        let state = state.finish_comparison(id, normalize_comparison("{}", &stocks).into_inner());

        let state = state.switch_mode(Mode::Single);
        let (state, id) = state.begin();
        let state = state.finish_single(id, analysis("HOLD"));
        assert!(state.comparison.is_some());

        let state = state.switch_mode(Mode::Multi);
        let (state, _) = state.begin();
        assert!(state.comparison.is_none());
        assert!(state.single.is_some());
    }

    #[test]
    fn test_price_failure_and_mode_switch() {
        let (state, id) = DeskState::default().begin();
        let state = state.price_failed(id, "API rate limit reached. Please enter price manually.");
        assert!(!state.is_loading);
        assert!(state.price_error.is_some());

        let state = state.switch_mode(Mode::Image);
        assert_eq!(state.mode, Mode::Image);
        assert_eq!(state.price_error, None);
    }

    #[test]
    fn test_fail_records_error_notice() {
        let (state, id) = DeskState::default().begin();
        let state = state.fail(id, Notice::error("Analysis Failed", "boom"));
        assert_eq!(state.last_error.as_deref(), Some("boom"));

        let (state, notices) = state.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].to_string(), "Analysis Failed: boom");
        assert!(state.notices.is_empty());
    }
}
