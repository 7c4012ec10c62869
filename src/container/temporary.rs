//! The collapsed group of temporary containers

use std::collections::BTreeSet;

use crate::render::{Element, ElementId, RenderTarget, CONTAINER_ID_ATTR};
use crate::session::{ScratchRecord, TEMPORARY_CONTAINER_KEY};

/// Attribute holding the member count label
pub const COUNT_ATTR: &str = "data-count";
/// Present while the group has no members
pub const HIDDEN_ATTR: &str = "hidden";

/// One rendered element standing in for every temporary container
///
/// Membership carries ids only; member attributes are not tracked.
#[derive(Debug)]
pub struct TemporaryAggregate {
    members: BTreeSet<String>,
    element: ElementId,
    scratch: ScratchRecord,
}

impl TemporaryAggregate {
    /// Append the group element to the end of the list
    pub fn mount<R: RenderTarget>(tree: &mut R, scratch: ScratchRecord) -> Self {
        let element = tree.append(
            Element::new("li")
                .with_attribute(CONTAINER_ID_ATTR, TEMPORARY_CONTAINER_KEY)
                .with_attribute(COUNT_ATTR, "0")
                .with_attribute(HIDDEN_ATTR, "true"),
        );
        Self {
            members: BTreeSet::new(),
            element,
            scratch,
        }
    }

    fn render_count<R: RenderTarget>(&self, tree: &mut R) {
        tree.set_attribute(self.element, COUNT_ATTR, &self.members.len().to_string());
        if self.members.is_empty() {
            tree.set_attribute(self.element, HIDDEN_ATTR, "true");
        } else {
            tree.remove_attribute(self.element, HIDDEN_ATTR);
        }
    }

    /// Add a member; returns false if it already was one
    pub fn attach<R: RenderTarget>(&mut self, tree: &mut R, id: &str) -> bool {
        if !self.members.insert(id.to_string()) {
            return false;
        }
        self.render_count(tree);
        true
    }

    /// Drop a member; returns false if it was not one
    pub fn detach<R: RenderTarget>(&mut self, tree: &mut R, id: &str) -> bool {
        if !self.members.remove(id) {
            return false;
        }
        self.render_count(tree);
        true
    }

    pub fn has_member(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn scratch(&self) -> &ScratchRecord {
        &self.scratch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ElementList;

    #[test]
    fn test_mount_hidden_and_empty() {
        let mut tree = ElementList::new();
        let group = TemporaryAggregate::mount(&mut tree, ScratchRecord::default());
        assert!(group.is_empty());
        assert_eq!(tree.attribute(group.element(), COUNT_ATTR).as_deref(), Some("0"));
        assert!(tree.attribute(group.element(), HIDDEN_ATTR).is_some());
    }

    #[test]
    fn test_attach_detach_updates_count() {
        let mut tree = ElementList::new();
        let mut group = TemporaryAggregate::mount(&mut tree, ScratchRecord::default());

        assert!(group.attach(&mut tree, "tmp-1"));
        assert!(group.attach(&mut tree, "tmp-2"));
        assert!(!group.attach(&mut tree, "tmp-1"));
        assert_eq!(tree.attribute(group.element(), COUNT_ATTR).as_deref(), Some("2"));
        assert!(tree.attribute(group.element(), HIDDEN_ATTR).is_none());
        assert!(group.has_member("tmp-2"));

        assert!(group.detach(&mut tree, "tmp-1"));
        assert!(group.detach(&mut tree, "tmp-2"));
        assert!(!group.detach(&mut tree, "tmp-2"));
        assert_eq!(tree.attribute(group.element(), COUNT_ATTR).as_deref(), Some("0"));
        assert!(tree.attribute(group.element(), HIDDEN_ATTR).is_some());
    }

    #[test]
    fn test_members_sorted() {
        let mut tree = ElementList::new();
        let mut group = TemporaryAggregate::mount(&mut tree, ScratchRecord::default());
        group.attach(&mut tree, "b");
        group.attach(&mut tree, "a");
        assert_eq!(group.members().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
