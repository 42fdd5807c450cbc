use crate::target::CHALLENGE_MARKERS;

/// Where a freshly loaded page stands with respect to the verification gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// A verification page is showing; the body has to appear before extraction.
    AwaitingVerification,
    Ready,
}

impl PageState {
    /// Classify a loaded page from its visible body text.
    pub fn after_load(body_text: &str) -> Self {
        if is_challenge_page(body_text) {
            PageState::AwaitingVerification
        } else {
            PageState::Ready
        }
    }
}

pub fn is_challenge_page(body_text: &str) -> bool {
    CHALLENGE_MARKERS
        .iter()
        .any(|marker| body_text.contains(marker))
}
