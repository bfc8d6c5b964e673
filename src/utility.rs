//! Sizing queries for embedding code that wants to know how big a subtree
//! wants to be, or would actually be, before committing a resize.

use crate::errors::LayoutError;
use crate::math::{RectI, Vector2I};
use crate::tree::{ContentSizer, GuiTree};
use crate::element::ElementKey;

/// Facade over the two layout passes for read-only sizing questions.
pub struct LayoutUtility;

impl LayoutUtility {
    /// Optimal size of `element`'s subtree: the size it would take with
    /// unlimited space. Refreshes the cached size ranges along the way (they
    /// are recomputed on the next layout pass anyway) but touches nothing
    /// else.
    pub fn calc_optimal_size(
        tree: &mut GuiTree,
        element: ElementKey,
        sizer: &dyn ContentSizer,
    ) -> Result<Vector2I, LayoutError> {
        tree.update_optimal_sizes(element, sizer)?;
        Ok(tree
            .size_range(element)
            .map(|range| range.optimal)
            .unwrap_or(Vector2I::ZERO))
    }

    /// Size `element`'s subtree would actually occupy inside a
    /// `width` x `height` budget. This can differ from the budget in both
    /// directions: child minimums can push past it, and a panel's children
    /// can spill past the nominal rect. The top-down pass is simulated, so no
    /// presentation state changes; pass `update_optimal_sizes = false` to
    /// also reuse the cached size ranges as-is.
    pub fn calc_actual_size(
        width: i32,
        height: i32,
        tree: &mut GuiTree,
        element: ElementKey,
        sizer: &dyn ContentSizer,
        update_optimal_sizes: bool,
    ) -> Result<Vector2I, LayoutError> {
        if update_optimal_sizes {
            tree.update_optimal_sizes(element, sizer)?;
        } else if tree.kind(element).is_none() {
            return Err(LayoutError::InvalidElement);
        }
        Ok(tree.simulate_actual_size(element, RectI::new(0, 0, width.max(0), height.max(0))))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::element::{ElementKind, LayoutData, PanelDepth};
    use rustc_hash::FxHashMap;

    #[test]
    fn optimal_size_of_a_row() {
        let mut tree = GuiTree::new();
        let mut sizes = FxHashMap::default();
        let row = tree.create(ElementKind::LayoutX);
        tree.add_child(tree.root(), row).unwrap();

        for width in [40, 60] {
            let child = tree.create(ElementKind::Element);
            tree.add_child(row, child).unwrap();
            sizes.insert(child, Vector2I::new(width, 25));
        }

        let optimal = LayoutUtility::calc_optimal_size(&mut tree, row, &sizes).unwrap();
        assert_eq!(optimal, Vector2I::new(100, 25));
    }

    #[test]
    fn actual_size_exceeds_budget_when_minimums_do() {
        let mut tree = GuiTree::new();
        let mut sizes = FxHashMap::default();
        let row = tree.create(ElementKind::LayoutX);
        tree.add_child(tree.root(), row).unwrap();

        let child = tree.create(ElementKind::Element);
        tree.add_child(row, child).unwrap();
        tree.set_flexible_width(child, 120, 0).unwrap();
        sizes.insert(child, Vector2I::new(150, 20));

        let actual =
            LayoutUtility::calc_actual_size(80, 50, &mut tree, row, &sizes, true).unwrap();
        assert_eq!(actual.x, 120);
    }

    #[test]
    fn actual_size_sees_panel_overflow() {
        let mut tree = GuiTree::new();
        let panel = tree.create(ElementKind::Panel(PanelDepth::default()));
        tree.add_child(tree.root(), panel).unwrap();
        let child = tree.create(ElementKind::Element);
        tree.add_child(panel, child).unwrap();
        tree.set_position(child, 70, 0).unwrap();
        tree.set_size(child, 50, 30).unwrap();

        let actual =
            LayoutUtility::calc_actual_size(100, 100, &mut tree, panel, &(), true).unwrap();
        assert_eq!(actual, Vector2I::new(120, 30));
    }

    #[test]
    fn simulation_leaves_layout_data_untouched() {
        let mut tree = GuiTree::new();
        let mut sizes = FxHashMap::default();
        let row = tree.create(ElementKind::LayoutX);
        tree.add_child(tree.root(), row).unwrap();
        let child = tree.create(ElementKind::Element);
        tree.add_child(row, child).unwrap();
        sizes.insert(child, Vector2I::new(50, 20));

        tree.perform_layout(RectI::new(0, 0, 200, 100), &sizes);
        let before: LayoutData = *tree.layout_data(child).unwrap();

        LayoutUtility::calc_actual_size(10, 10, &mut tree, row, &sizes, true).unwrap();
        assert_eq!(*tree.layout_data(child).unwrap(), before);
    }

    #[test]
    fn stale_handles_are_rejected() {
        let mut tree = GuiTree::new();
        let child = tree.create(ElementKind::Element);
        tree.add_child(tree.root(), child).unwrap();
        tree.destroy(child).unwrap();

        assert_eq!(
            LayoutUtility::calc_optimal_size(&mut tree, child, &()),
            Err(LayoutError::InvalidElement)
        );
        assert_eq!(
            LayoutUtility::calc_actual_size(10, 10, &mut tree, child, &(), false),
            Err(LayoutError::InvalidElement)
        );
    }
}
