//! Tab data structure
//!
//! A tab pairs a gallery name with the button rendered for it.

use vitrine_core::{Document, NodeId};

use crate::state::TabState;

pub const TAB_BUTTON_CLASS: &str = "tab-button";

#[derive(Debug, Clone)]
pub struct Tab {
    /// Gallery name, also the button label
    pub name: String,
    /// Button element in the tabs container
    pub button: NodeId,
    pub state: TabState,
}

impl Tab {
    /// Create the button for `name` and append it to `container`
    pub(crate) fn create(doc: &mut Document, container: NodeId, name: &str) -> Self {
        let button = doc.create_element("button");
        doc.set_text(button, name);
        doc.add_class(button, TAB_BUTTON_CLASS);
        doc.append_child(container, button);

        Self {
            name: name.to_string(),
            button,
            state: TabState::Inactive,
        }
    }

    pub(crate) fn transition_to(&mut self, doc: &mut Document, new_state: TabState) {
        if self.state == new_state {
            return;
        }

        tracing::debug!(
            tab = %self.name,
            from = %self.state,
            to = %new_state,
            "Tab state transition"
        );

        match new_state {
            TabState::Active => doc.add_class(self.button, TabState::MARKER_CLASS),
            TabState::Inactive => doc.remove_class(self.button, TabState::MARKER_CLASS),
        }
        self.state = new_state;
    }

    /// Mark tab as active (user selected it)
    pub(crate) fn activate(&mut self, doc: &mut Document) {
        self.transition_to(doc, TabState::Active);
    }

    /// Clear the active marker
    pub(crate) fn deactivate(&mut self, doc: &mut Document) {
        self.transition_to(doc, TabState::Inactive);
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tab() {
        let mut doc = Document::with_containers(&["tabs"]);
        let container = doc.get_element_by_id("tabs").unwrap();

        let tab = Tab::create(&mut doc, container, "Trip");
        assert_eq!(tab.state, TabState::Inactive);
        assert_eq!(doc.text(tab.button), "Trip");
        assert!(doc.has_class(tab.button, TAB_BUTTON_CLASS));
        assert_eq!(doc.children(container), &[tab.button]);
    }

    #[test]
    fn test_marker_follows_state() {
        let mut doc = Document::with_containers(&["tabs"]);
        let container = doc.get_element_by_id("tabs").unwrap();
        let mut tab = Tab::create(&mut doc, container, "Trip");

        tab.activate(&mut doc);
        assert!(tab.is_active());
        assert!(doc.has_class(tab.button, "active"));

        let before = doc.mutation_count();
        tab.activate(&mut doc);
        assert_eq!(doc.mutation_count(), before);

        tab.deactivate(&mut doc);
        assert!(!tab.is_active());
        assert!(!doc.has_class(tab.button, "active"));
    }
}
