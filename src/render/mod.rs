//! Render tree abstraction
//!
//! The engine renders into a flat, ordered list of elements owned by the
//! caller (the sidebar's containers list). [`RenderTarget`] is the seam; the
//! in-memory [`ElementList`] keeps a mutation log so callers can see exactly
//! which patches were applied.

use std::collections::BTreeMap;

use serde::Serialize;

/// Attribute carrying the identity id of an element
pub const CONTAINER_ID_ATTR: &str = "data-container-id";

/// Handle to a rendered element
pub type ElementId = u64;

/// A detached element description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

/// One change applied to the render tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    Inserted { id: ElementId, before: Option<ElementId> },
    Removed { id: ElementId },
    AttributeSet { id: ElementId, name: String, value: String },
    AttributeRemoved { id: ElementId, name: String },
}

/// The caller-supplied parent element entries render into
pub trait RenderTarget {
    /// Add an element at the end of the list
    fn append(&mut self, element: Element) -> ElementId;

    /// Add an element immediately before `anchor`, or at the end if `anchor`
    /// is not attached
    fn insert_before(&mut self, element: Element, anchor: ElementId) -> ElementId;

    /// Detach an element; returns false if it was not attached
    fn remove(&mut self, id: ElementId) -> bool;

    /// Set an attribute on an attached element; returns false if detached
    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> bool;

    /// Drop an attribute; returns false if detached or absent
    fn remove_attribute(&mut self, id: ElementId, name: &str) -> bool;

    fn attribute(&self, id: ElementId, name: &str) -> Option<String>;

    fn contains(&self, id: ElementId) -> bool;

    /// Attached element handles in render order
    fn children(&self) -> Vec<ElementId>;
}

/// In-memory render target
#[derive(Debug, Default)]
pub struct ElementList {
    children: Vec<(ElementId, Element)>,
    next_id: ElementId,
    log: Vec<Mutation>,
}

impl ElementList {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: ElementId) -> Option<usize> {
        self.children.iter().position(|(child, _)| *child == id)
    }

    fn allocate(&mut self) -> ElementId {
        self.next_id += 1;
        self.next_id
    }

    /// Look up an attached element
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.children
            .iter()
            .find(|(child, _)| *child == id)
            .map(|(_, element)| element)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Every mutation applied so far
    pub fn mutations(&self) -> &[Mutation] {
        &self.log
    }

    /// Forget recorded mutations
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Values of `data-container-id` in render order
    pub fn container_ids(&self) -> Vec<String> {
        self.children
            .iter()
            .filter_map(|(_, element)| element.attributes.get(CONTAINER_ID_ATTR).cloned())
            .collect()
    }
}

impl RenderTarget for ElementList {
    fn append(&mut self, element: Element) -> ElementId {
        let id = self.allocate();
        self.children.push((id, element));
        self.log.push(Mutation::Inserted { id, before: None });
        id
    }

    fn insert_before(&mut self, element: Element, anchor: ElementId) -> ElementId {
        let Some(index) = self.position(anchor) else {
            return self.append(element);
        };
        let id = self.allocate();
        self.children.insert(index, (id, element));
        self.log.push(Mutation::Inserted {
            id,
            before: Some(anchor),
        });
        id
    }

    fn remove(&mut self, id: ElementId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.children.remove(index);
                self.log.push(Mutation::Removed { id });
                true
            }
            None => false,
        }
    }

    fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.children[index]
            .1
            .attributes
            .insert(name.to_string(), value.to_string());
        self.log.push(Mutation::AttributeSet {
            id,
            name: name.to_string(),
            value: value.to_string(),
        });
        true
    }

    fn remove_attribute(&mut self, id: ElementId, name: &str) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        if self.children[index].1.attributes.remove(name).is_none() {
            return false;
        }
        self.log.push(Mutation::AttributeRemoved {
            id,
            name: name.to_string(),
        });
        true
    }

    fn attribute(&self, id: ElementId, name: &str) -> Option<String> {
        self.get(id).and_then(|element| element.attributes.get(name).cloned())
    }

    fn contains(&self, id: ElementId) -> bool {
        self.position(id).is_some()
    }

    fn children(&self) -> Vec<ElementId> {
        self.children.iter().map(|(id, _)| *id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_before_anchor() {
        let mut list = ElementList::new();
        let last = list.append(Element::new("li").with_attribute(CONTAINER_ID_ATTR, "tmp"));
        let a = list.insert_before(Element::new("li").with_attribute(CONTAINER_ID_ATTR, "a"), last);
        let b = list.insert_before(Element::new("li").with_attribute(CONTAINER_ID_ATTR, "b"), last);

        assert_eq!(list.children(), vec![a, b, last]);
        assert_eq!(list.container_ids(), vec!["a", "b", "tmp"]);
    }

    #[test]
    fn test_insert_before_detached_anchor_appends() {
        let mut list = ElementList::new();
        let first = list.append(Element::new("li"));
        let id = list.insert_before(Element::new("li"), 999);
        assert_eq!(list.children(), vec![first, id]);
    }

    #[test]
    fn test_remove_twice() {
        let mut list = ElementList::new();
        let id = list.append(Element::new("li"));
        assert!(list.remove(id));
        assert!(!list.remove(id));
        assert!(list.is_empty());
        assert_eq!(list.mutations().len(), 2);
    }

    #[test]
    fn test_attributes_on_detached_element() {
        let mut list = ElementList::new();
        let id = list.append(Element::new("li"));
        assert!(list.set_attribute(id, "label", "Work"));
        assert_eq!(list.attribute(id, "label").as_deref(), Some("Work"));
        assert!(list.remove_attribute(id, "label"));
        assert!(!list.remove_attribute(id, "label"));

        list.remove(id);
        assert!(!list.set_attribute(id, "label", "Home"));
    }
}
