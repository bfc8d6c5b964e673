//! Absolute-position container placement and depth-window remapping.
//!
//! A panel is the opposite policy from a flow layout: every child is placed
//! at its own explicit offset and sized independently of its siblings.
//! Panels also own the draw-order depth scheme: each panel remaps the depth
//! window it receives from its parent, and the window can only narrow on the
//! way down, never widen.

use crate::dimensions::{Dimensions, SizeRange};
use crate::element::{LayoutData, PanelDepth};
use crate::math::{RectI, Vector2I};

/// Area for one panel child: explicit offset, own size.
///
/// A non-fixed axis stretches from the child's offset to the panel edge, but
/// is pulled back toward the optimal size when it would leave the child's
/// min/max range: below optimal a minimum raises it, above optimal a maximum
/// caps it. The optimal value itself is never the target, only the clamp
/// bound.
pub(crate) fn element_area(
    layout_area: &RectI,
    dimensions: &Dimensions,
    size_range: &SizeRange,
) -> RectI {
    let x = layout_area.x + dimensions.x;
    let y = layout_area.y + dimensions.y;

    let width = if dimensions.fixed_width() {
        size_range.optimal.x
    } else {
        let mut width = (layout_area.width - dimensions.x).max(0);
        if width < size_range.optimal.x {
            if size_range.min.x > 0 {
                width = width.max(size_range.min.x);
            }
        } else if width > size_range.optimal.x && size_range.max.x > 0 {
            width = width.min(size_range.max.x);
        }
        width
    };

    let height = if dimensions.fixed_height() {
        size_range.optimal.y
    } else {
        let mut height = (layout_area.height - dimensions.y).max(0);
        if height < size_range.optimal.y {
            if size_range.min.y > 0 {
                height = height.max(size_range.min.y);
            }
        } else if height > size_range.optimal.y && size_range.max.y > 0 {
            height = height.min(size_range.max.y);
        }
        height
    };

    RectI::new(x, y, width.max(0), height.max(0))
}

/// Optimal content size of a panel: the bounding box of `offset + size` over
/// the children, not a sum. Spacers have no meaning under absolute
/// positioning and contribute nothing.
pub(crate) fn optimal_content_size(
    children: impl Iterator<Item = (Dimensions, SizeRange, i32, i32)>,
) -> Vector2I {
    let mut optimal = Vector2I::ZERO;

    for (dimensions, size_range, padding_width, padding_height) in children {
        optimal.x = optimal
            .x
            .max(dimensions.x + size_range.optimal.x + padding_width);
        optimal.y = optimal
            .y
            .max(dimensions.y + size_range.optimal.y + padding_height);
    }

    optimal
}

/// Remaps the incoming depth window through this panel's depth config.
///
/// The new depth and both window edges are clamped into the parent window
/// with one identical min/max clamp, which preserves their ordering and makes
/// every descendant window a subset of its parent's. A `u16::MAX` range bound
/// means "inherit": the side stays unbounded only while both the panel and
/// the incoming data leave it unbounded.
pub(crate) fn update_depth_range(config: &PanelDepth, data: &mut LayoutData) {
    let parent_depth = i32::from(data.panel_depth);
    let parent_min_bounded = data.depth_range_min != u16::MAX;
    let parent_max_bounded = data.depth_range_max != u16::MAX;
    let parent_low = parent_depth - i32::from(data.depth_range_min);
    let parent_high = parent_depth + i32::from(data.depth_range_max);

    let mut new_depth = parent_depth + i32::from(config.depth_offset);
    let mut new_low = new_depth - i32::from(config.depth_range_min);
    let mut new_high = new_depth + i32::from(config.depth_range_max);

    for value in [&mut new_depth, &mut new_low, &mut new_high] {
        if parent_min_bounded {
            *value = (*value).max(parent_low);
        }
        if parent_max_bounded {
            *value = (*value).min(parent_high);
        }
    }

    data.panel_depth = new_depth.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;

    if config.depth_range_min != u16::MAX || parent_min_bounded {
        data.depth_range_min = (new_depth - new_low).clamp(0, i32::from(u16::MAX) - 1) as u16;
    }
    if config.depth_range_max != u16::MAX || parent_max_bounded {
        data.depth_range_max = (new_high - new_depth).clamp(0, i32::from(u16::MAX) - 1) as u16;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn free_range(optimal_width: i32, optimal_height: i32) -> SizeRange {
        SizeRange {
            optimal: Vector2I::new(optimal_width, optimal_height),
            min: Vector2I::ZERO,
            max: Vector2I::ZERO,
        }
    }

    #[test]
    fn absolute_placement() {
        let mut dimensions = Dimensions::fixed(60, 40);
        dimensions.set_position(50, 50);
        let range = dimensions.calculate_size_range(Vector2I::ZERO);

        let area = element_area(&RectI::new(0, 0, 200, 200), &dimensions, &range);
        assert_eq!(area, RectI::new(50, 50, 60, 40));
    }

    #[test]
    fn flexible_child_stretches_to_panel_edge() {
        let mut dimensions = Dimensions::flexible();
        dimensions.set_position(30, 10);
        let range = free_range(20, 20);

        let area = element_area(&RectI::new(0, 0, 200, 100), &dimensions, &range);
        assert_eq!(area, RectI::new(30, 10, 170, 90));
    }

    #[test]
    fn stretch_caps_at_max_above_optimal() {
        let mut dimensions = Dimensions::flexible();
        dimensions.set_flexible_width(0, 120);
        let mut range = free_range(20, 20);
        range.max.x = 120;

        let area = element_area(&RectI::new(0, 0, 400, 100), &dimensions, &range);
        assert_eq!(area.width, 120);
    }

    #[test]
    fn shortfall_raises_to_min_below_optimal() {
        let mut dimensions = Dimensions::flexible();
        dimensions.set_position(90, 0);
        let mut range = free_range(50, 20);
        range.min.x = 40;

        // Natural width would be 100 - 90 = 10, below optimal; the minimum
        // pulls it back up.
        let area = element_area(&RectI::new(0, 0, 100, 100), &dimensions, &range);
        assert_eq!(area.width, 40);
    }

    #[test]
    fn offset_past_edge_floors_at_zero() {
        let mut dimensions = Dimensions::flexible();
        dimensions.set_position(250, 0);
        let range = free_range(0, 0);

        let area = element_area(&RectI::new(0, 0, 200, 100), &dimensions, &range);
        assert_eq!(area.width, 0);
        assert!(area.height >= 0);
    }

    #[test]
    fn bounding_box_aggregation() {
        let mut near = Dimensions::flexible();
        near.set_position(10, 10);
        let mut far = Dimensions::flexible();
        far.set_position(100, 5);

        let children = vec![
            (near, free_range(50, 20), 0, 0),
            (far, free_range(30, 40), 0, 0),
        ];
        let optimal = optimal_content_size(children.into_iter());

        assert_eq!(optimal, Vector2I::new(130, 45));
    }

    #[test]
    fn depth_offset_applies_within_parent_window() {
        let mut data = LayoutData::new(RectI::ZERO);
        data.panel_depth = 10;
        data.depth_range_min = 5;
        data.depth_range_max = 5;

        let config = PanelDepth {
            depth_offset: 3,
            depth_range_min: 1,
            depth_range_max: 1,
        };
        update_depth_range(&config, &mut data);

        assert_eq!(data.panel_depth, 13);
        assert_eq!(data.depth_range_min, 1);
        assert_eq!(data.depth_range_max, 1);
    }

    #[test]
    fn depth_clamps_into_parent_window() {
        let mut data = LayoutData::new(RectI::ZERO);
        data.panel_depth = 10;
        data.depth_range_min = 2;
        data.depth_range_max = 2;

        let config = PanelDepth {
            depth_offset: 100,
            depth_range_min: u16::MAX,
            depth_range_max: u16::MAX,
        };
        update_depth_range(&config, &mut data);

        // Depth is pinned to the top of the window; the window itself can
        // only narrow.
        assert_eq!(data.panel_depth, 12);
        assert_eq!(data.depth_range_min, 4);
        assert_eq!(data.depth_range_max, 0);
    }

    #[test]
    fn unbounded_stays_unbounded_until_someone_bounds_it() {
        let mut data = LayoutData::new(RectI::ZERO);
        assert_eq!(data.depth_range_min, u16::MAX);

        let inherit = PanelDepth::default();
        update_depth_range(&inherit, &mut data);
        assert_eq!(data.depth_range_min, u16::MAX);
        assert_eq!(data.depth_range_max, u16::MAX);

        let bounded = PanelDepth {
            depth_offset: 0,
            depth_range_min: 7,
            depth_range_max: 9,
        };
        update_depth_range(&bounded, &mut data);
        assert_eq!(data.depth_range_min, 7);
        assert_eq!(data.depth_range_max, 9);
    }

    #[test]
    fn nested_windows_always_narrow() {
        let mut data = LayoutData::new(RectI::ZERO);
        data.panel_depth = 0;
        data.depth_range_min = 100;
        data.depth_range_max = 100;

        let mut low = i32::from(data.panel_depth) - i32::from(data.depth_range_min);
        let mut high = i32::from(data.panel_depth) + i32::from(data.depth_range_max);

        let configs = [
            PanelDepth { depth_offset: 40, depth_range_min: 20, depth_range_max: 60 },
            PanelDepth { depth_offset: -90, depth_range_min: 10, depth_range_max: 10 },
            PanelDepth { depth_offset: 5, depth_range_min: u16::MAX, depth_range_max: 2 },
        ];

        for config in configs {
            update_depth_range(&config, &mut data);

            let new_low = i32::from(data.panel_depth) - i32::from(data.depth_range_min);
            let new_high = i32::from(data.panel_depth) + i32::from(data.depth_range_max);

            assert!(new_low >= low, "low edge must not widen");
            assert!(new_high <= high, "high edge must not widen");
            assert!(new_low <= i32::from(data.panel_depth));
            assert!(new_high >= i32::from(data.panel_depth));

            low = new_low;
            high = new_high;
        }
    }
}
