//! Element node kinds, state flags and the per-node layout result.

use bitflags::bitflags;
use slotmap::new_key_type;

use crate::dimensions::{Dimensions, SizeRange};
use crate::id::ElementId;
use crate::math::{RectI, Vector2I};

new_key_type! {
    /// Stable handle to an element in a [`GuiTree`](crate::tree::GuiTree).
    pub struct ElementKey;
}

/// Depth configuration carried by a panel. Offsets are relative to the parent
/// panel's depth; `u16::MAX` range bounds mean "inherit the parent window".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelDepth {
    pub depth_offset: i16,
    pub depth_range_min: u16,
    pub depth_range_max: u16,
}

impl Default for PanelDepth {
    fn default() -> Self {
        Self {
            depth_offset: 0,
            depth_range_min: u16::MAX,
            depth_range_max: u16::MAX,
        }
    }
}

/// What a tree node is. The kind decides how the node sizes itself and how it
/// partitions its area among children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Leaf element; sized by its content oracle.
    Element,
    /// Flow container distributing space left to right.
    LayoutX,
    /// Flow container distributing space top to bottom.
    LayoutY,
    /// Absolute-position container with its own depth window.
    Panel(PanelDepth),
    /// Spacer with a constant, non-negotiable size along the flow axis.
    FixedSpace { size: u32 },
    /// Spacer that expands to fill unused flow-axis space.
    FlexibleSpace,
}

impl ElementKind {
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ElementKind::LayoutX | ElementKind::LayoutY | ElementKind::Panel(_)
        )
    }

    pub fn is_space(&self) -> bool {
        matches!(
            self,
            ElementKind::FixedSpace { .. } | ElementKind::FlexibleSpace
        )
    }

    pub fn is_panel(&self) -> bool {
        matches!(self, ElementKind::Panel(_))
    }
}

bitflags! {
    /// Local and effective element state.
    ///
    /// The `EFF_*` bits cache the AND of the local bit over the element and
    /// all its ancestors; they are maintained by the tree whenever a local
    /// flag or the element's parent changes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ElementFlags: u8 {
        /// Content changed; layout/mesh needs a rebuild.
        const DIRTY = 1 << 0;
        /// Not rendered, but still occupies layout space.
        const HIDDEN = 1 << 1;
        /// Excluded from layout entirely, as if removed.
        const INACTIVE = 1 << 2;
        /// Rendered faded; interaction policy is the call site's business.
        const DISABLED = 1 << 3;
        const EFF_HIDDEN = 1 << 4;
        const EFF_INACTIVE = 1 << 5;
        const EFF_DISABLED = 1 << 6;
    }
}

/// Represents padding values for each side of an element. Padding spaces an
/// element from its siblings; it participates in size math but is never
/// allocated to the element itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
}

impl Padding {
    pub fn new(left: u16, right: u16, top: u16, bottom: u16) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Sets the same padding value for all sides.
    pub fn all(value: u16) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sets the same padding for left and right sides.
    /// Top and bottom are set to `0`.
    pub fn horizontal(value: u16) -> Self {
        Self::new(value, value, 0, 0)
    }

    /// Sets the same padding for top and bottom sides.
    /// Left and right are set to `0`.
    pub fn vertical(value: u16) -> Self {
        Self::new(0, 0, value, value)
    }

    pub(crate) fn width(&self) -> i32 {
        i32::from(self.left) + i32::from(self.right)
    }

    pub(crate) fn height(&self) -> i32 {
        i32::from(self.top) + i32::from(self.bottom)
    }
}

impl From<u16> for Padding {
    /// Creates padding with the same value for all sides.
    fn from(value: u16) -> Self {
        Self::all(value)
    }
}

impl From<(u16, u16, u16, u16)> for Padding {
    /// Creates padding from a tuple in CSS order: (top, right, bottom, left).
    fn from((top, right, bottom, left): (u16, u16, u16, u16)) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

/// Result of the top-down layout pass for one node: where it sits, what clips
/// it, and the draw-order depth window it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutData {
    /// Assigned rectangle, in root space.
    pub area: RectI,
    /// Intersection of the parent clip and this node's own rectangle.
    pub clip_rect: RectI,
    /// Depth of the owning widget; passed through unchanged.
    pub widget_depth: u8,
    /// Depth of the nearest panel, remapped at each panel boundary.
    pub panel_depth: i16,
    /// Allowed depth window below `panel_depth`; `u16::MAX` = unbounded.
    pub depth_range_min: u16,
    /// Allowed depth window above `panel_depth`; `u16::MAX` = unbounded.
    pub depth_range_max: u16,
}

impl LayoutData {
    /// Layout data for a root area: clipped to itself, depth zero, unbounded
    /// depth window.
    pub fn new(area: RectI) -> Self {
        Self {
            area,
            clip_rect: area,
            widget_depth: 0,
            panel_depth: 0,
            depth_range_min: u16::MAX,
            depth_range_max: u16::MAX,
        }
    }
}

impl Default for LayoutData {
    fn default() -> Self {
        Self::new(RectI::ZERO)
    }
}

/// One arena slot: the node's configuration plus everything the two layout
/// passes cache on it.
#[derive(Debug, Clone)]
pub(crate) struct ElementNode {
    pub kind: ElementKind,
    pub dimensions: Dimensions,
    pub padding: Padding,
    pub flags: ElementFlags,
    pub parent: Option<ElementKey>,
    pub children: Vec<ElementKey>,
    /// Nearest ancestor panel; coordinate space for bounds queries.
    pub anchor_parent: Option<ElementKey>,
    /// Nearest ancestor whose size does not depend on children; re-layout
    /// triggered by a content change only needs to start here.
    pub update_parent: Option<ElementKey>,
    pub size_range: SizeRange,
    pub layout_data: LayoutData,
    /// Extent the children actually occupied, which can differ from the
    /// assigned area (panel children may spill past it).
    pub actual_size: Vector2I,
    pub id: Option<ElementId>,
}

impl ElementNode {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            dimensions: Dimensions::flexible(),
            padding: Padding::default(),
            flags: ElementFlags::DIRTY,
            parent: None,
            children: Vec::new(),
            anchor_parent: None,
            update_parent: None,
            size_range: SizeRange::ZERO,
            layout_data: LayoutData::default(),
            actual_size: Vector2I::ZERO,
            id: None,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.flags.contains(ElementFlags::EFF_INACTIVE)
    }

    pub fn is_visible(&self) -> bool {
        !self.flags.contains(ElementFlags::EFF_HIDDEN)
    }

    /// True when this node's size range cannot change because of its
    /// descendants; such nodes bound the scope of content-driven re-layouts.
    pub fn is_update_boundary(&self) -> bool {
        self.dimensions.fixed_width() && self.dimensions.fixed_height()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn padding_constructors() {
        assert_eq!(Padding::all(4), Padding::new(4, 4, 4, 4));
        assert_eq!(Padding::horizontal(2), Padding::new(2, 2, 0, 0));
        assert_eq!(Padding::vertical(3), Padding::new(0, 0, 3, 3));
        assert_eq!(Padding::from(5u16), Padding::all(5));
        // CSS order: top, right, bottom, left.
        assert_eq!(Padding::from((1u16, 2u16, 3u16, 4u16)), Padding::new(4, 2, 1, 3));
    }

    #[test]
    fn new_nodes_start_dirty() {
        let node = ElementNode::new(ElementKind::Element);
        assert!(node.flags.contains(ElementFlags::DIRTY));
        assert!(node.is_active());
        assert!(node.is_visible());
    }

    #[test]
    fn update_boundary_needs_both_axes_fixed() {
        let mut node = ElementNode::new(ElementKind::LayoutX);
        assert!(!node.is_update_boundary());

        node.dimensions.set_width(100);
        assert!(!node.is_update_boundary());

        node.dimensions.set_height(50);
        assert!(node.is_update_boundary());
    }

    #[test]
    fn kind_predicates() {
        assert!(ElementKind::Panel(PanelDepth::default()).is_container());
        assert!(ElementKind::LayoutX.is_container());
        assert!(!ElementKind::Element.is_container());
        assert!(ElementKind::FixedSpace { size: 8 }.is_space());
        assert!(ElementKind::FlexibleSpace.is_space());
        assert!(!ElementKind::LayoutY.is_panel());
    }
}
