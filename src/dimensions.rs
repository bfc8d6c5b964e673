//! Per-element sizing policy and the computed size range it produces.

use bitflags::bitflags;

use crate::math::Vector2I;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DimensionFlags: u8 {
        /// Width is locked to a single value, ignoring available space.
        const FIXED_WIDTH = 1 << 0;
        /// Height is locked to a single value, ignoring available space.
        const FIXED_HEIGHT = 1 << 1;
        /// Width was set explicitly by the user and overrides style defaults.
        const OVERRIDDEN_WIDTH = 1 << 2;
        /// Height was set explicitly by the user and overrides style defaults.
        const OVERRIDDEN_HEIGHT = 1 << 3;
    }
}

/// Sizing policy for a single element.
///
/// `x`/`y` are explicit offsets, only meaningful when the element sits under a
/// panel. Min/max bounds of `0` mean "no minimum" and "unbounded" respectively.
/// A fixed axis stores its value in both the min and max field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub x: i32,
    pub y: i32,
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
    flags: DimensionFlags,
}

impl Dimensions {
    /// Fully flexible dimensions: no bounds, no offset.
    pub fn flexible() -> Self {
        Self::default()
    }

    /// Dimensions locked to an exact size on both axes.
    pub fn fixed(width: u32, height: u32) -> Self {
        let mut dimensions = Self::default();
        dimensions.set_width(width);
        dimensions.set_height(height);
        dimensions
    }

    pub fn fixed_width(&self) -> bool {
        self.flags.contains(DimensionFlags::FIXED_WIDTH)
    }

    pub fn fixed_height(&self) -> bool {
        self.flags.contains(DimensionFlags::FIXED_HEIGHT)
    }

    pub fn overridden_width(&self) -> bool {
        self.flags.contains(DimensionFlags::OVERRIDDEN_WIDTH)
    }

    pub fn overridden_height(&self) -> bool {
        self.flags.contains(DimensionFlags::OVERRIDDEN_HEIGHT)
    }

    /// Locks the width to `width` pixels.
    pub fn set_width(&mut self, width: u32) {
        self.min_width = width;
        self.max_width = width;
        self.flags
            .insert(DimensionFlags::FIXED_WIDTH | DimensionFlags::OVERRIDDEN_WIDTH);
    }

    /// Lets the width shrink to `min_width` and grow to `max_width`
    /// (`0` = unbounded).
    pub fn set_flexible_width(&mut self, min_width: u32, max_width: u32) {
        self.min_width = min_width;
        self.max_width = max_width;
        self.flags.remove(DimensionFlags::FIXED_WIDTH);
        self.flags.insert(DimensionFlags::OVERRIDDEN_WIDTH);
    }

    /// Locks the height to `height` pixels.
    pub fn set_height(&mut self, height: u32) {
        self.min_height = height;
        self.max_height = height;
        self.flags
            .insert(DimensionFlags::FIXED_HEIGHT | DimensionFlags::OVERRIDDEN_HEIGHT);
    }

    /// Lets the height shrink to `min_height` and grow to `max_height`
    /// (`0` = unbounded).
    pub fn set_flexible_height(&mut self, min_height: u32, max_height: u32) {
        self.min_height = min_height;
        self.max_height = max_height;
        self.flags.remove(DimensionFlags::FIXED_HEIGHT);
        self.flags.insert(DimensionFlags::OVERRIDDEN_HEIGHT);
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    /// Locks both axes to an exact size.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.set_width(width);
        self.set_height(height);
    }

    /// Back to flexible defaults, clearing override flags. The offset is kept.
    pub fn reset(&mut self) {
        let x = self.x;
        let y = self.y;
        *self = Self::default();
        self.x = x;
        self.y = y;
    }

    /// Computes the size range for an element whose unconstrained content size
    /// is `optimal_content`. Pure function of the inputs.
    pub fn calculate_size_range(&self, optimal_content: Vector2I) -> SizeRange {
        let mut range = SizeRange::ZERO;

        if self.fixed_width() {
            let fixed = self.min_width as i32;
            range.optimal.x = fixed;
            range.min.x = fixed;
            range.max.x = fixed;
        } else {
            range.optimal.x = optimal_content.x.max(0);
            range.min.x = self.min_width as i32;
            range.max.x = self.max_width as i32;

            if range.optimal.x < range.min.x {
                range.optimal.x = range.min.x;
            }
            if range.max.x > 0 && range.optimal.x > range.max.x {
                range.optimal.x = range.max.x;
            }
        }

        if self.fixed_height() {
            let fixed = self.min_height as i32;
            range.optimal.y = fixed;
            range.min.y = fixed;
            range.max.y = fixed;
        } else {
            range.optimal.y = optimal_content.y.max(0);
            range.min.y = self.min_height as i32;
            range.max.y = self.max_height as i32;

            if range.optimal.y < range.min.y {
                range.optimal.y = range.min.y;
            }
            if range.max.y > 0 && range.optimal.y > range.max.y {
                range.optimal.y = range.max.y;
            }
        }

        range
    }
}

/// Result of a bottom-up sizing pass: the size an element wants, and the
/// bounds it accepts. A `max` component of `0` means "no upper bound", not
/// zero pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeRange {
    pub optimal: Vector2I,
    pub min: Vector2I,
    pub max: Vector2I,
}

impl SizeRange {
    pub const ZERO: SizeRange = SizeRange {
        optimal: Vector2I::ZERO,
        min: Vector2I::ZERO,
        max: Vector2I::ZERO,
    };
}

/// Shorthand for [`Dimensions::fixed`].
#[macro_export]
macro_rules! fixed_size {
    ($width:expr, $height:expr) => {
        $crate::dimensions::Dimensions::fixed($width, $height)
    };
}

/// Shorthand for flexible [`Dimensions`]. With no arguments the element is
/// unbounded; with four it is bounded per axis (`0` = unbounded).
#[macro_export]
macro_rules! flexible {
    () => {
        $crate::dimensions::Dimensions::flexible()
    };
    ($min_width:expr, $max_width:expr, $min_height:expr, $max_height:expr) => {{
        let mut dimensions = $crate::dimensions::Dimensions::flexible();
        dimensions.set_flexible_width($min_width, $max_width);
        dimensions.set_flexible_height($min_height, $max_height);
        dimensions
    }};
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fixed_width_collapses_range() {
        let dimensions = Dimensions::fixed(40, 25);
        let range = dimensions.calculate_size_range(Vector2I::new(999, 999));

        assert_eq!(range.optimal, Vector2I::new(40, 25));
        assert_eq!(range.min, Vector2I::new(40, 25));
        assert_eq!(range.max, Vector2I::new(40, 25));
    }

    #[test]
    fn flexible_passes_content_through() {
        let dimensions = Dimensions::flexible();
        let range = dimensions.calculate_size_range(Vector2I::new(120, 30));

        assert_eq!(range.optimal, Vector2I::new(120, 30));
        assert_eq!(range.min, Vector2I::ZERO);
        assert_eq!(range.max, Vector2I::ZERO);
    }

    #[test]
    fn optimal_is_clamped_into_bounds() {
        let mut dimensions = Dimensions::flexible();
        dimensions.set_flexible_width(50, 80);

        let below = dimensions.calculate_size_range(Vector2I::new(10, 0));
        assert_eq!(below.optimal.x, 50);

        let above = dimensions.calculate_size_range(Vector2I::new(200, 0));
        assert_eq!(above.optimal.x, 80);
    }

    #[test]
    fn negative_content_floors_to_zero() {
        let dimensions = Dimensions::flexible();
        let range = dimensions.calculate_size_range(Vector2I::new(-5, -5));
        assert_eq!(range.optimal, Vector2I::ZERO);
    }

    #[test]
    fn reset_keeps_offset_and_clears_overrides() {
        let mut dimensions = Dimensions::fixed(10, 10);
        dimensions.set_position(7, 9);
        assert!(dimensions.overridden_width());

        dimensions.reset();
        assert_eq!((dimensions.x, dimensions.y), (7, 9));
        assert!(!dimensions.fixed_width());
        assert!(!dimensions.overridden_width());
        assert!(!dimensions.overridden_height());
    }

    #[test]
    fn fixed_size_macro() {
        let dimensions = fixed_size!(12, 34);
        assert!(dimensions.fixed_width());
        assert!(dimensions.fixed_height());
        assert_eq!(dimensions.min_width, 12);
        assert_eq!(dimensions.max_height, 34);
    }

    #[test]
    fn flexible_macro() {
        let unbounded = flexible!();
        assert!(!unbounded.fixed_width());
        assert_eq!(unbounded.max_width, 0);

        let bounded = flexible!(10, 100, 20, 0);
        assert_eq!(bounded.min_width, 10);
        assert_eq!(bounded.max_width, 100);
        assert_eq!(bounded.min_height, 20);
        assert_eq!(bounded.max_height, 0);
        assert!(bounded.overridden_width());
    }
}
