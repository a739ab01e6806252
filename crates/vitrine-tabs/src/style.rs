//! Responsive grid stylesheet
//!
//! One `<style id="responsive-styles">` in `<head>`, created on first use and
//! rewritten on every render.

use vitrine_core::{Document, NodeId};

pub const STYLESHEET_ID: &str = "responsive-styles";
pub const GRID_CLASS: &str = "gallery-grid";

const GRID_RULES: &str = "
      .gallery-grid {
          display: grid;
          grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
          gap: 20px;
      }
  ";

#[derive(Debug, Default)]
pub(crate) struct Stylesheet {
    node: Option<NodeId>,
}

impl Stylesheet {
    pub(crate) fn apply(&mut self, doc: &mut Document) -> NodeId {
        let node = match self.node.or_else(|| doc.get_element_by_id(STYLESHEET_ID)) {
            Some(node) => node,
            None => {
                let node = doc.create_element("style");
                doc.set_attribute(node, "id", STYLESHEET_ID);
                let head = doc.head();
                doc.append_child(head, node);
                node
            }
        };

        doc.set_text(node, GRID_RULES);
        self.node = Some(node);
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_once() {
        let mut doc = Document::new();
        let mut sheet = Stylesheet::default();

        let first = sheet.apply(&mut doc);
        let second = sheet.apply(&mut doc);
        assert_eq!(first, second);
        assert_eq!(doc.query_by_tag("style").len(), 1);
        assert_eq!(doc.element(first).parent(), Some(doc.head()));
        assert!(doc.text(first).contains("minmax(200px, 1fr)"));
    }

    #[test]
    fn test_reuses_existing_element() {
        let mut doc = Document::new();
        let existing = doc.create_element("style");
        doc.set_attribute(existing, "id", STYLESHEET_ID);
        doc.set_text(existing, ".old {}");
        let head = doc.head();
        doc.append_child(head, existing);

        let node = Stylesheet::default().apply(&mut doc);
        assert_eq!(node, existing);
        assert_eq!(doc.query_by_tag("style").len(), 1);
        assert!(!doc.text(node).contains(".old"));
    }
}
