//! Retained-mode GUI layout engine.
//!
//! `lath` computes concrete pixel positions, sizes, clip rectangles and
//! render depths for a tree of GUI elements, given a root area and
//! per-element sizing constraints. Rendering, text measurement and input
//! dispatch are the embedder's business; the tree only positions things.
//!
//! Layout runs in two passes: a bottom-up pass computes every element's
//! [`SizeRange`](dimensions::SizeRange) from its children and its own
//! [`Dimensions`](dimensions::Dimensions), then a top-down pass partitions
//! the root area among children per each container's policy: flow layouts
//! distribute along one axis with weighted shrink/grow and clamping, panels
//! place children at explicit offsets with an independent depth window.
//!
//! ```
//! use lath::prelude::*;
//!
//! let mut tree = GuiTree::new();
//! let row = tree.create(ElementKind::LayoutX);
//! tree.add_child(tree.root(), row).unwrap();
//! let button = tree.create(ElementKind::Element);
//! tree.add_child(row, button).unwrap();
//! let spring = tree.create(ElementKind::FlexibleSpace);
//! tree.add_child(row, spring).unwrap();
//! tree.set_size(button, 80, 24).unwrap();
//!
//! tree.perform_layout(RectI::new(0, 0, 640, 480), &());
//! assert_eq!(tree.get_global_bounds(button).unwrap().width, 80);
//! ```

pub mod dimensions;
pub mod element;
pub mod errors;
pub mod events;
pub mod id;
pub mod math;
pub mod tree;
pub mod utility;

mod flow;
mod panel;

pub use crate::element::ElementKey;
pub use crate::errors::LayoutError;
pub use crate::tree::GuiTree;

/// A single import for everything you need.
///
/// ```rust
/// use lath::prelude::*;
/// ```
pub mod prelude {
    pub use crate::dimensions::{Dimensions, SizeRange};
    pub use crate::element::{
        ElementFlags, ElementKey, ElementKind, LayoutData, Padding, PanelDepth,
    };
    pub use crate::errors::LayoutError;
    pub use crate::events::{MouseButton, MouseEvent, MouseEventType, TextInputEvent};
    pub use crate::id::ElementId;
    pub use crate::math::{RectI, Vector2I};
    pub use crate::tree::{ContentSizer, GuiTree};
    pub use crate::utility::LayoutUtility;

    // Macros
    pub use crate::{fixed_size, flexible};
}
