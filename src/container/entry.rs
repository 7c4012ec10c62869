//! A single rendered container

use crate::host::ContainerIdentity;
use crate::render::{Element, ElementId, RenderTarget, CONTAINER_ID_ATTR};
use crate::session::ScratchRecord;

/// Display attributes of an identity that map onto rendered attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayField {
    Name,
    Icon,
    IconUrl,
    Color,
    ColorCode,
}

impl DisplayField {
    pub const ALL: [DisplayField; 5] = [
        DisplayField::Name,
        DisplayField::Icon,
        DisplayField::IconUrl,
        DisplayField::Color,
        DisplayField::ColorCode,
    ];

    /// Rendered attribute the field is written to
    pub fn attribute(self) -> &'static str {
        match self {
            DisplayField::Name => "label",
            DisplayField::Icon => "data-identity-icon",
            DisplayField::IconUrl => "data-identity-icon-url",
            DisplayField::Color => "data-identity-color",
            DisplayField::ColorCode => "data-identity-color-code",
        }
    }

    pub fn value(self, identity: &ContainerIdentity) -> &str {
        match self {
            DisplayField::Name => &identity.name,
            DisplayField::Icon => &identity.icon,
            DisplayField::IconUrl => &identity.icon_url,
            DisplayField::Color => &identity.color,
            DisplayField::ColorCode => &identity.color_code,
        }
    }
}

/// Projection of one identity into the render tree
#[derive(Debug)]
pub struct ContainerEntry {
    identity: ContainerIdentity,
    element: ElementId,
    scratch: ScratchRecord,
}

impl ContainerEntry {
    fn render(identity: &ContainerIdentity) -> Element {
        DisplayField::ALL.iter().fold(
            Element::new("li").with_attribute(CONTAINER_ID_ATTR, &identity.id),
            |element, field| element.with_attribute(field.attribute(), field.value(identity)),
        )
    }

    /// Render `identity` and insert it right before `anchor`
    pub fn mount<R: RenderTarget>(
        tree: &mut R,
        identity: ContainerIdentity,
        scratch: ScratchRecord,
        anchor: ElementId,
    ) -> Self {
        let element = tree.insert_before(Self::render(&identity), anchor);
        Self {
            identity,
            element,
            scratch,
        }
    }

    pub fn id(&self) -> &str {
        &self.identity.id
    }

    /// Last identity snapshot applied to the element
    pub fn identity(&self) -> &ContainerIdentity {
        &self.identity
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn scratch(&self) -> &ScratchRecord {
        &self.scratch
    }

    /// Patch only the attributes whose source fields changed
    ///
    /// Returns the fields that were rewritten.
    pub fn refresh<R: RenderTarget>(
        &mut self,
        tree: &mut R,
        identity: ContainerIdentity,
    ) -> Vec<DisplayField> {
        let changed: Vec<DisplayField> = DisplayField::ALL
            .into_iter()
            .filter(|field| field.value(&self.identity) != field.value(&identity))
            .collect();

        for field in &changed {
            tree.set_attribute(self.element, field.attribute(), field.value(&identity));
        }

        self.identity = identity;
        changed
    }

    /// Detach the element; a second call does nothing
    pub fn destroy<R: RenderTarget>(&mut self, tree: &mut R) -> bool {
        tree.remove(self.element)
    }
}
