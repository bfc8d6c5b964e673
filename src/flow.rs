//! One-axis space distribution shared by the X and Y flow layouts.
//!
//! The two layouts are mirror images, so a single routine handles both with a
//! `horizontal` flag selecting which axis is the flow axis. Children are
//! seeded with their optimal size, then a deficit or surplus is distributed
//! iteratively: every round hands each still-resizable child a share of the
//! remaining delta weighted by its seeded size, and retires children as they
//! hit a bound. The pool of resizable children shrinks every round, so the
//! loop terminates in at most one round per child.

use crate::dimensions::SizeRange;
use crate::element::{ElementKind, Padding};
use crate::math::{RectI, Vector2I};

/// Flow-relevant view of one child, gathered by the tree before distribution.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FlowChild {
    pub active: bool,
    pub kind: FlowChildKind,
    pub fixed_width: bool,
    pub fixed_height: bool,
    pub size_range: SizeRange,
    pub padding: Padding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlowChildKind {
    /// Leaf element; centered on the perpendicular axis.
    Element,
    /// Nested layout or panel; top/left aligned on the perpendicular axis.
    Container,
    FixedSpace,
    FlexibleSpace,
}

impl From<&ElementKind> for FlowChildKind {
    fn from(kind: &ElementKind) -> Self {
        match kind {
            ElementKind::Element => FlowChildKind::Element,
            ElementKind::LayoutX | ElementKind::LayoutY | ElementKind::Panel(_) => {
                FlowChildKind::Container
            }
            ElementKind::FixedSpace { .. } => FlowChildKind::FixedSpace,
            ElementKind::FlexibleSpace => FlowChildKind::FlexibleSpace,
        }
    }
}

impl FlowChild {
    fn optimal(&self, horizontal: bool) -> i32 {
        axis(self.size_range.optimal, horizontal)
    }

    fn min(&self, horizontal: bool) -> i32 {
        axis(self.size_range.min, horizontal)
    }

    fn max(&self, horizontal: bool) -> i32 {
        axis(self.size_range.max, horizontal)
    }

    fn fixed_along(&self, horizontal: bool) -> bool {
        if horizontal {
            self.fixed_width
        } else {
            self.fixed_height
        }
    }

    fn flow_padding(&self, horizontal: bool) -> i32 {
        if horizontal {
            self.padding.width()
        } else {
            self.padding.height()
        }
    }

    fn cross_padding(&self, horizontal: bool) -> i32 {
        if horizontal {
            self.padding.height()
        } else {
            self.padding.width()
        }
    }

    fn leading_padding(&self, horizontal: bool) -> i32 {
        if horizontal {
            i32::from(self.padding.left)
        } else {
            i32::from(self.padding.top)
        }
    }

    fn trailing_padding(&self, horizontal: bool) -> i32 {
        if horizontal {
            i32::from(self.padding.right)
        } else {
            i32::from(self.padding.bottom)
        }
    }
}

fn axis(vector: Vector2I, horizontal: bool) -> i32 {
    if horizontal {
        vector.x
    } else {
        vector.y
    }
}

fn flow_size(area: &RectI, horizontal: bool) -> i32 {
    if horizontal {
        area.width
    } else {
        area.height
    }
}

fn set_flow_size(area: &mut RectI, horizontal: bool, size: i32) {
    if horizontal {
        area.width = size;
    } else {
        area.height = size;
    }
}

/// Optimal content size of a flow container: flow-axis sizes and paddings
/// accumulate, the perpendicular axis takes the largest child. A fixed space
/// has flow-axis size regardless of what the parent allows, but no
/// perpendicular extent.
pub(crate) fn optimal_content_size(children: &[FlowChild], horizontal: bool) -> Vector2I {
    let mut flow_total = 0;
    let mut cross_total = 0;

    for child in children {
        if !child.active {
            continue;
        }

        let mut optimal = child.size_range.optimal;
        if child.kind == FlowChildKind::FixedSpace {
            if horizontal {
                optimal.y = 0;
            } else {
                optimal.x = 0;
            }
        }

        flow_total += axis(optimal, horizontal) + child.flow_padding(horizontal);
        cross_total = cross_total.max(axis(optimal, !horizontal) + child.cross_padding(horizontal));
    }

    if horizontal {
        Vector2I::new(flow_total, cross_total)
    } else {
        Vector2I::new(cross_total, flow_total)
    }
}

/// Partitions `layout_area` among `children` along the flow axis.
///
/// Returns one rectangle per child slot, index-parallel with the input;
/// inactive children keep a zero rectangle that is never consumed.
pub(crate) fn element_areas(
    layout_area: RectI,
    children: &[FlowChild],
    horizontal: bool,
) -> Vec<RectI> {
    let count = children.len();
    let mut areas = vec![RectI::ZERO; count];
    let mut processed = vec![false; count];
    let mut scale_weights = vec![0.0f32; count];

    let available = flow_size(&layout_area, horizontal).max(0);

    // Seed with optimal sizes and classify. Only elements that can still
    // change size stay in the resizable pool.
    let mut total_optimal = 0;
    let mut total_non_clamped = 0;
    let mut num_non_clamped = 0u32;
    let mut num_flexible_spaces = 0u32;

    for (index, child) in children.iter().enumerate() {
        if !child.active {
            processed[index] = true;
            continue;
        }

        let optimal = child.optimal(horizontal).max(0);
        set_flow_size(&mut areas[index], horizontal, optimal);
        total_optimal += optimal + child.flow_padding(horizontal);

        match child.kind {
            FlowChildKind::FixedSpace => processed[index] = true,
            FlowChildKind::FlexibleSpace => {
                num_flexible_spaces += 1;
                num_non_clamped += 1;
            }
            FlowChildKind::Element | FlowChildKind::Container => {
                if child.fixed_along(horizontal) {
                    processed[index] = true;
                } else if optimal > 0 {
                    num_non_clamped += 1;
                    total_non_clamped += optimal;
                } else {
                    processed[index] = true;
                }
            }
        }
    }

    // Surplus goes to flexible spaces first: split evenly with ceil shares,
    // tracking the remainder exactly so the sum never exceeds the surplus.
    if total_optimal < available && num_flexible_spaces > 0 {
        let mut remaining = available - total_optimal;
        let mut spaces_left = num_flexible_spaces as i32;

        for (index, child) in children.iter().enumerate() {
            if !child.active || child.kind != FlowChildKind::FlexibleSpace {
                continue;
            }

            let share = ((remaining + spaces_left - 1) / spaces_left).clamp(0, remaining);
            set_flow_size(&mut areas[index], horizontal, share);
            remaining -= share;
            spaces_left -= 1;
            processed[index] = true;
            num_non_clamped -= 1;
        }

        // Flexible spaces now fill to the edge.
        total_optimal = available;
    }

    // Per-child weight: share of the resizable pool. Larger elements absorb
    // proportionally more of any adjustment. Weights are computed once and
    // reused every round; only the remaining delta shrinks.
    if total_non_clamped > 0 {
        for (index, child) in children.iter().enumerate() {
            if processed[index] || !child.active {
                continue;
            }
            scale_weights[index] =
                flow_size(&areas[index], horizontal) as f32 / total_non_clamped as f32;
        }
    }

    if total_optimal > available {
        shrink(
            children,
            &mut areas,
            &mut processed,
            &scale_weights,
            &mut num_non_clamped,
            total_optimal - available,
            horizontal,
        );
    } else if total_optimal < available {
        grow(
            children,
            &mut areas,
            &mut processed,
            &scale_weights,
            &mut num_non_clamped,
            available - total_optimal,
            horizontal,
        );
    }

    // Perpendicular sizing and final offsets. Padding is inserted between
    // allocated sizes, not inside them.
    let cross_available = flow_size(&layout_area, !horizontal).max(0);
    let mut offset = 0;

    for (index, child) in children.iter().enumerate() {
        if !child.active {
            continue;
        }

        let cross_size = match child.kind {
            FlowChildKind::FixedSpace => 0,
            _ => {
                if child.fixed_along(!horizontal) {
                    child.optimal(!horizontal).min(cross_available)
                } else {
                    let mut size = cross_available;
                    let min = child.min(!horizontal);
                    let max = child.max(!horizontal);
                    if min > 0 && size < min {
                        size = min;
                    }
                    if max > 0 && size > max {
                        size = max;
                    }
                    size
                }
            }
        };

        // Leaf elements center in perpendicular slack; nested containers stay
        // top/left aligned.
        let cross_offset = if child.kind == FlowChildKind::Element {
            let slack = cross_available - (cross_size + child.cross_padding(horizontal));
            if slack > 0 {
                (slack + 1) / 2
            } else {
                0
            }
        } else {
            0
        };

        offset += child.leading_padding(horizontal);

        let area = &mut areas[index];
        if horizontal {
            area.x = layout_area.x + offset;
            area.y = layout_area.y + cross_offset;
            area.height = cross_size;
        } else {
            area.y = layout_area.y + offset;
            area.x = layout_area.x + cross_offset;
            area.width = cross_size;
        }

        offset += flow_size(area, horizontal) + child.trailing_padding(horizontal);
    }

    areas
}

fn shrink(
    children: &[FlowChild],
    areas: &mut [RectI],
    processed: &mut [bool],
    scale_weights: &[f32],
    num_non_clamped: &mut u32,
    deficit: i32,
    horizontal: bool,
) {
    let mut remaining = deficit;

    while remaining > 0 && *num_non_clamped > 0 {
        let round_total = remaining;
        let mut progressed = false;

        for (index, child) in children.iter().enumerate() {
            if processed[index] {
                continue;
            }

            if child.kind == FlowChildKind::FlexibleSpace {
                // Spaces give up everything on first touch.
                let current = flow_size(&areas[index], horizontal);
                set_flow_size(&mut areas[index], horizontal, 0);
                remaining = (remaining - current).max(0);
                processed[index] = true;
                *num_non_clamped -= 1;
                progressed = true;
            } else {
                let current = flow_size(&areas[index], horizontal);
                let share = (round_total as f32 * scale_weights[index]).ceil() as i32;
                let take = share.min(remaining);
                let mut new_size = (current - take).max(0);

                let min = child.min(horizontal);
                if min > 0 && new_size < min {
                    new_size = min.min(current);
                    processed[index] = true;
                    *num_non_clamped -= 1;
                } else if new_size == 0 {
                    processed[index] = true;
                    *num_non_clamped -= 1;
                }

                let taken = current - new_size;
                set_flow_size(&mut areas[index], horizontal, new_size);
                remaining -= taken;
                if taken > 0 || processed[index] {
                    progressed = true;
                }
            }

            if remaining == 0 {
                break;
            }
        }

        if !progressed {
            break;
        }
    }

    if remaining > 0 {
        // All children are clamped; the rest of the deficit is accepted
        // overflow, not an error.
        log::trace!("flow layout dropped {remaining}px of unsatisfiable deficit");
    }
}

fn grow(
    children: &[FlowChild],
    areas: &mut [RectI],
    processed: &mut [bool],
    scale_weights: &[f32],
    num_non_clamped: &mut u32,
    surplus: i32,
    horizontal: bool,
) {
    let mut remaining = surplus;

    while remaining > 0 && *num_non_clamped > 0 {
        let round_total = remaining;
        let mut progressed = false;

        for (index, child) in children.iter().enumerate() {
            if processed[index] {
                continue;
            }

            if child.kind == FlowChildKind::FlexibleSpace {
                // Already filled before the grow phase runs.
                processed[index] = true;
                *num_non_clamped -= 1;
                progressed = true;
            } else {
                let current = flow_size(&areas[index], horizontal);
                let share = (round_total as f32 * scale_weights[index]).ceil() as i32;
                let mut new_size = current + share.min(remaining);

                let max = child.max(horizontal);
                if max > 0 && new_size > max {
                    new_size = max.max(current);
                    processed[index] = true;
                    *num_non_clamped -= 1;
                }

                let added = new_size - current;
                set_flow_size(&mut areas[index], horizontal, new_size);
                remaining -= added;
                if added > 0 || processed[index] {
                    progressed = true;
                }
            }

            if remaining == 0 {
                break;
            }
        }

        if !progressed {
            break;
        }
    }
}
