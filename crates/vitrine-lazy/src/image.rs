//! Lazy image data structure

use serde::{Deserialize, Serialize};
use vitrine_core::NodeId;

use crate::error::LazyError;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LazyState {
    /// Created, not yet registered with the observer
    Unobserved,
    /// Waiting for its first visibility event
    Observed,
    /// `src` set, the host is fetching the image
    Loading,
    /// Host reported the image loaded
    Loaded,
}

impl LazyState {
    /// Transitions only ever move forward, one step at a time
    pub fn can_transition_to(&self, target: LazyState) -> bool {
        matches!(
            (self, target),
            (LazyState::Unobserved, LazyState::Observed)
                | (LazyState::Observed, LazyState::Loading)
                | (LazyState::Loading, LazyState::Loaded)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LazyState::Unobserved => "unobserved",
            LazyState::Observed => "observed",
            LazyState::Loading => "loading",
            LazyState::Loaded => "loaded",
        }
    }
}

impl std::fmt::Display for LazyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LazyState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unobserved" => Ok(LazyState::Unobserved),
            "observed" => Ok(LazyState::Observed),
            "loading" => Ok(LazyState::Loading),
            "loaded" => Ok(LazyState::Loaded),
            _ => Err(format!("Unknown lazy image state: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LazyImage {
    /// The `img` element
    pub node: NodeId,
    /// Real source, copied into `src` on first visibility
    pub deferred_src: String,
    pub state: LazyState,
}

impl LazyImage {
    pub fn new(node: NodeId, deferred_src: String) -> Self {
        Self {
            node,
            deferred_src,
            state: LazyState::Unobserved,
        }
    }

    pub fn transition_to(&mut self, new_state: LazyState) -> Result<()> {
        if !self.state.can_transition_to(new_state) {
            return Err(LazyError::InvalidTransition {
                from: self.state.to_string(),
                to: new_state.to_string(),
            });
        }

        tracing::trace!(
            image = %self.node,
            from = %self.state,
            to = %new_state,
            "Lazy image state transition"
        );

        self.state = new_state;
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LazyState::Loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::Document;

    fn image() -> LazyImage {
        let mut doc = Document::new();
        LazyImage::new(doc.create_element("img"), "images/a.jpg".to_string())
    }

    #[test]
    fn test_valid_transitions() {
        assert!(LazyState::Unobserved.can_transition_to(LazyState::Observed));
        assert!(LazyState::Observed.can_transition_to(LazyState::Loading));
        assert!(LazyState::Loading.can_transition_to(LazyState::Loaded));
    }

    #[test]
    fn test_invalid_transitions() {
        // No skipping ahead
        assert!(!LazyState::Unobserved.can_transition_to(LazyState::Loading));
        assert!(!LazyState::Observed.can_transition_to(LazyState::Loaded));
        // No going back, and no repeats
        assert!(!LazyState::Loaded.can_transition_to(LazyState::Observed));
        assert!(!LazyState::Loading.can_transition_to(LazyState::Observed));
        assert!(!LazyState::Loading.can_transition_to(LazyState::Loading));
    }

    #[test]
    fn test_lifecycle() {
        let mut img = image();
        assert_eq!(img.state, LazyState::Unobserved);

        img.transition_to(LazyState::Observed).unwrap();
        img.transition_to(LazyState::Loading).unwrap();
        img.transition_to(LazyState::Loaded).unwrap();
        assert!(img.is_loaded());

        let err = img.transition_to(LazyState::Loading).unwrap_err();
        assert!(matches!(err, LazyError::InvalidTransition { .. }));
    }

    #[test]
    fn test_parse_state() {
        assert_eq!("Loading".parse::<LazyState>().unwrap(), LazyState::Loading);
        assert!("gone".parse::<LazyState>().is_err());
    }
}
