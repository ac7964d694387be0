use std::sync::Arc;

use sn_inference::StockNewsSummarizer;

pub struct AppState {
    pub summarizer: Arc<StockNewsSummarizer>,
    password: Option<String>,
}

impl AppState {
    pub fn new(summarizer: Arc<StockNewsSummarizer>, password: Option<String>) -> Self {
        Self {
            summarizer,
            password,
        }
    }

    /// An unset or empty password never matches, so a deployment without
    /// `APP_PASSWORD` blocks every request rather than opening the gate.
    pub fn password_matches(&self, given: &str) -> bool {
        match self.password.as_deref() {
            Some(expected) if !expected.is_empty() => expected == given,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use sn_inference::models::DummyModel;
    use sn_inference::BatchSummarizer;

    use crate::handlers::tests::{StubLookup, StubSource};

    fn state(password: Option<&str>) -> AppState {
        let summarizer = StockNewsSummarizer::new(
            Arc::new(StubLookup),
            Arc::new(StubSource::default()),
            BatchSummarizer::new(Arc::new(DummyModel)),
        );
        AppState::new(Arc::new(summarizer), password.map(str::to_string))
    }

    #[test]
    fn configured_password_must_match_exactly() {
        let state = state(Some("hunter2"));
        assert!(state.password_matches("hunter2"));
        assert!(!state.password_matches("hunter"));
        assert!(!state.password_matches(""));
    }

    #[test]
    fn missing_or_empty_password_blocks_everyone() {
        assert!(!state(None).password_matches(""));
        assert!(!state(None).password_matches("anything"));
        assert!(!state(Some("")).password_matches(""));
    }
}
