use kuchiki::NodeRef;
use kuchiki::traits::*;

/// A parsed HTML page whose elements are addressed by `id`.
pub struct SlotPage {
    document: NodeRef,
}

impl SlotPage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: kuchiki::parse_html().one(html),
        }
    }

    fn find(&self, id: &str) -> Option<NodeRef> {
        self.document
            .descendants()
            .elements()
            .find(|el| el.attributes.borrow().get("id") == Some(id))
            .map(|el| el.as_node().clone())
    }

    pub fn has_slot(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Current text content of the slot.
    #[allow(dead_code)]
    pub fn slot_text(&self, id: &str) -> Option<String> {
        self.find(id).map(|node| node.text_contents())
    }

    /// Replaces the slot's children with a single text node. Returns false when
    /// no element carries `id`.
    pub fn set_text(&self, id: &str, text: &str) -> bool {
        let Some(node) = self.find(id) else {
            return false;
        };
        let existing: Vec<_> = node.children().collect();
        for child in existing {
            child.detach();
        }
        node.append(NodeRef::new_text(text));
        true
    }

    pub fn to_html(&self) -> String {
        self.document.to_string()
    }
}
