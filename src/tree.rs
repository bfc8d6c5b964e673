//! The element tree: an arena of nodes plus the two-pass layout protocol.
//!
//! Ownership is strictly tree-shaped. Nodes live in a slotmap and refer to
//! each other by handle; the parent owns its children and destroying a node
//! destroys its subtree. All mutation happens between layout passes on one
//! thread; nothing here locks or suspends.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::dimensions::{Dimensions, SizeRange};
use crate::element::{
    ElementFlags, ElementKey, ElementKind, ElementNode, LayoutData, Padding, PanelDepth,
};
use crate::errors::LayoutError;
use crate::flow::{self, FlowChild};
use crate::id::ElementId;
use crate::math::{RectI, Vector2I};
use crate::panel;

/// Sizing oracle for leaf elements: the unconstrained natural size of an
/// element's content, in pixels. Passed explicitly into the bottom-up pass so
/// style resolution stays the embedder's business.
pub trait ContentSizer {
    fn optimal_content_size(&self, element: ElementKey) -> Vector2I;
}

/// Zero-size content for trees made purely of containers and spacers.
impl ContentSizer for () {
    fn optimal_content_size(&self, _element: ElementKey) -> Vector2I {
        Vector2I::ZERO
    }
}

impl ContentSizer for FxHashMap<ElementKey, Vector2I> {
    fn optimal_content_size(&self, element: ElementKey) -> Vector2I {
        self.get(&element).copied().unwrap_or(Vector2I::ZERO)
    }
}

/// A tree of GUI elements with cached layout state.
pub struct GuiTree {
    nodes: SlotMap<ElementKey, ElementNode>,
    root: ElementKey,
    ids: FxHashMap<u64, ElementKey>,
    screen_origin: Vector2I,
}

impl GuiTree {
    /// Creates a tree whose root is a panel with a default depth window.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(ElementNode::new(ElementKind::Panel(PanelDepth::default())));
        Self {
            nodes,
            root,
            ids: FxHashMap::default(),
            screen_origin: Vector2I::ZERO,
        }
    }

    pub fn root(&self) -> ElementKey {
        self.root
    }

    /// Offset added by [`GuiTree::get_screen_bounds`]; the embedder sets it to
    /// the window position of the root area.
    pub fn set_screen_origin(&mut self, origin: Vector2I) {
        self.screen_origin = origin;
    }

    // ------------------------------------------------------------------
    // Tree mutation
    // ------------------------------------------------------------------

    /// Creates a detached element. Attach it with [`GuiTree::add_child`] or
    /// [`GuiTree::insert_child`].
    pub fn create(&mut self, kind: ElementKind) -> ElementKey {
        self.nodes.insert(ElementNode::new(kind))
    }

    /// Appends `child` to `parent`'s child list. A child that already has a
    /// parent is detached from it first.
    pub fn add_child(&mut self, parent: ElementKey, child: ElementKey) -> Result<(), LayoutError> {
        let index = self
            .nodes
            .get(parent)
            .ok_or(LayoutError::InvalidElement)?
            .children
            .len();
        self.insert_child(parent, index, child)
    }

    /// Inserts `child` at `index` in `parent`'s child list. Insertion order is
    /// layout order. An out-of-range index appends.
    pub fn insert_child(
        &mut self,
        parent: ElementKey,
        index: usize,
        child: ElementKey,
    ) -> Result<(), LayoutError> {
        if !self.nodes.contains_key(child) {
            return Err(LayoutError::InvalidElement);
        }
        let parent_node = self.nodes.get(parent).ok_or(LayoutError::InvalidElement)?;
        if !parent_node.kind.is_container() {
            return Err(LayoutError::NotAContainer);
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(LayoutError::WouldCreateCycle);
        }

        self.detach(child);

        let parent_node = &mut self.nodes[parent];
        let index = index.min(parent_node.children.len());
        parent_node.children.insert(index, child);
        self.nodes[child].parent = Some(parent);

        self.refresh_au_parents(child);
        self.refresh_effective_flags(child);
        self.mark_dirty(parent);
        Ok(())
    }

    /// Detaches `child` from `parent` without destroying it.
    pub fn remove_child(
        &mut self,
        parent: ElementKey,
        child: ElementKey,
    ) -> Result<(), LayoutError> {
        let child_node = self.nodes.get(child).ok_or(LayoutError::InvalidElement)?;
        if child_node.parent != Some(parent) {
            return Err(LayoutError::InvalidElement);
        }

        self.detach(child);
        self.refresh_au_parents(child);
        self.refresh_effective_flags(child);
        Ok(())
    }

    /// Destroys every child of `parent`.
    pub fn clear_children(&mut self, parent: ElementKey) -> Result<(), LayoutError> {
        let children = self
            .nodes
            .get(parent)
            .ok_or(LayoutError::InvalidElement)?
            .children
            .clone();
        for child in children {
            self.destroy(child)?;
        }
        Ok(())
    }

    /// Detaches `key` and destroys it together with its whole subtree. The
    /// root cannot be destroyed.
    pub fn destroy(&mut self, key: ElementKey) -> Result<(), LayoutError> {
        if !self.nodes.contains_key(key) || key == self.root {
            return Err(LayoutError::InvalidElement);
        }

        self.detach(key);

        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                if let Some(id) = node.id {
                    self.ids.remove(&id.value());
                }
                stack.extend(node.children);
            }
        }
        Ok(())
    }

    fn detach(&mut self, child: ElementKey) {
        if let Some(old_parent) = self.nodes[child].parent.take() {
            self.nodes[old_parent].children.retain(|&key| key != child);
            self.mark_dirty(old_parent);
        }
    }

    fn is_ancestor(&self, candidate: ElementKey, of: ElementKey) -> bool {
        let mut current = self.nodes[of].parent;
        while let Some(key) = current {
            if key == candidate {
                return true;
            }
            current = self.nodes[key].parent;
        }
        false
    }

    // ------------------------------------------------------------------
    // Per-node configuration
    // ------------------------------------------------------------------

    fn with_node<T>(
        &mut self,
        key: ElementKey,
        apply: impl FnOnce(&mut ElementNode) -> T,
    ) -> Result<T, LayoutError> {
        let node = self.nodes.get_mut(key).ok_or(LayoutError::InvalidElement)?;
        let result = apply(node);
        self.mark_dirty(key);
        Ok(result)
    }

    /// Explicit offset, meaningful under a panel parent.
    pub fn set_position(&mut self, key: ElementKey, x: i32, y: i32) -> Result<(), LayoutError> {
        self.with_node(key, |node| node.dimensions.set_position(x, y))
    }

    /// Locks the width; the element no longer grows or shrinks horizontally.
    pub fn set_width(&mut self, key: ElementKey, width: u32) -> Result<(), LayoutError> {
        self.with_node(key, |node| node.dimensions.set_width(width))?;
        self.refresh_au_parents(key);
        Ok(())
    }

    /// Locks the height.
    pub fn set_height(&mut self, key: ElementKey, height: u32) -> Result<(), LayoutError> {
        self.with_node(key, |node| node.dimensions.set_height(height))?;
        self.refresh_au_parents(key);
        Ok(())
    }

    /// Width may shrink to `min_width` and grow to `max_width` (`0` =
    /// unbounded).
    pub fn set_flexible_width(
        &mut self,
        key: ElementKey,
        min_width: u32,
        max_width: u32,
    ) -> Result<(), LayoutError> {
        self.with_node(key, |node| {
            node.dimensions.set_flexible_width(min_width, max_width);
        })?;
        self.refresh_au_parents(key);
        Ok(())
    }

    /// Height may shrink to `min_height` and grow to `max_height` (`0` =
    /// unbounded).
    pub fn set_flexible_height(
        &mut self,
        key: ElementKey,
        min_height: u32,
        max_height: u32,
    ) -> Result<(), LayoutError> {
        self.with_node(key, |node| {
            node.dimensions.set_flexible_height(min_height, max_height);
        })?;
        self.refresh_au_parents(key);
        Ok(())
    }

    /// Locks both axes.
    pub fn set_size(&mut self, key: ElementKey, width: u32, height: u32) -> Result<(), LayoutError> {
        self.with_node(key, |node| node.dimensions.set_size(width, height))?;
        self.refresh_au_parents(key);
        Ok(())
    }

    /// Back to flexible defaults; clears user overrides, keeps the offset.
    pub fn reset_dimensions(&mut self, key: ElementKey) -> Result<(), LayoutError> {
        self.with_node(key, |node| node.dimensions.reset())?;
        self.refresh_au_parents(key);
        Ok(())
    }

    pub fn set_padding(&mut self, key: ElementKey, padding: Padding) -> Result<(), LayoutError> {
        self.with_node(key, |node| node.padding = padding)
    }

    /// Changes the constant size of a fixed space.
    pub fn set_fixed_space_size(&mut self, key: ElementKey, size: u32) -> Result<(), LayoutError> {
        let node = self.nodes.get_mut(key).ok_or(LayoutError::InvalidElement)?;
        match &mut node.kind {
            ElementKind::FixedSpace { size: current } => *current = size,
            _ => return Err(LayoutError::KindMismatch),
        }
        self.mark_dirty(key);
        Ok(())
    }

    /// Changes a panel's depth offset and window.
    pub fn set_panel_depth(&mut self, key: ElementKey, depth: PanelDepth) -> Result<(), LayoutError> {
        let node = self.nodes.get_mut(key).ok_or(LayoutError::InvalidElement)?;
        match &mut node.kind {
            ElementKind::Panel(config) => *config = depth,
            _ => return Err(LayoutError::KindMismatch),
        }
        self.mark_dirty(key);
        Ok(())
    }

    /// Registers `id` for `key` so it can be found again without its handle.
    pub fn set_id(&mut self, key: ElementKey, id: ElementId) -> Result<(), LayoutError> {
        if !self.nodes.contains_key(key) {
            return Err(LayoutError::InvalidElement);
        }
        if let Some(&existing) = self.ids.get(&id.value()) {
            if existing != key {
                return Err(LayoutError::DuplicateId);
            }
        }
        if let Some(old) = self.nodes[key].id.replace(id) {
            self.ids.remove(&old.value());
        }
        self.ids.insert(id.value(), key);
        Ok(())
    }

    pub fn find(&self, id: ElementId) -> Option<ElementKey> {
        self.ids.get(&id.value()).copied()
    }

    /// Flags the element's content as changed. Layout needs to be re-run from
    /// [`GuiTree::layout_root_for`] to pick the change up.
    pub fn mark_content_dirty(&mut self, key: ElementKey) -> Result<(), LayoutError> {
        if !self.nodes.contains_key(key) {
            return Err(LayoutError::InvalidElement);
        }
        self.mark_dirty(key);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Visibility / activity / disabled state
    // ------------------------------------------------------------------

    /// Hidden elements are not rendered but still occupy layout space.
    pub fn set_visible(&mut self, key: ElementKey, visible: bool) -> Result<(), LayoutError> {
        self.set_state_flag(key, ElementFlags::HIDDEN, !visible)
    }

    /// Inactive elements are excluded from layout entirely, as if removed.
    pub fn set_active(&mut self, key: ElementKey, active: bool) -> Result<(), LayoutError> {
        self.set_state_flag(key, ElementFlags::INACTIVE, !active)
    }

    /// Disabled elements render faded; whether they keep receiving input is
    /// the dispatcher's call.
    pub fn set_disabled(&mut self, key: ElementKey, disabled: bool) -> Result<(), LayoutError> {
        self.set_state_flag(key, ElementFlags::DISABLED, disabled)
    }

    fn set_state_flag(
        &mut self,
        key: ElementKey,
        flag: ElementFlags,
        value: bool,
    ) -> Result<(), LayoutError> {
        let node = self.nodes.get_mut(key).ok_or(LayoutError::InvalidElement)?;
        if node.flags.contains(flag) == value {
            return Ok(());
        }
        node.flags.set(flag, value);
        self.refresh_effective_flags(key);
        self.mark_dirty(key);
        Ok(())
    }

    pub fn is_visible(&self, key: ElementKey) -> Option<bool> {
        self.nodes
            .get(key)
            .map(|node| !node.flags.contains(ElementFlags::HIDDEN))
    }

    pub fn is_active(&self, key: ElementKey) -> Option<bool> {
        self.nodes
            .get(key)
            .map(|node| !node.flags.contains(ElementFlags::INACTIVE))
    }

    pub fn is_disabled(&self, key: ElementKey) -> Option<bool> {
        self.nodes
            .get(key)
            .map(|node| node.flags.contains(ElementFlags::DISABLED))
    }

    /// Effective visibility: hidden if this element or any ancestor is hidden.
    pub fn is_effectively_visible(&self, key: ElementKey) -> Option<bool> {
        self.nodes.get(key).map(ElementNode::is_visible)
    }

    /// Effective activity: inactive if this element or any ancestor is.
    pub fn is_effectively_active(&self, key: ElementKey) -> Option<bool> {
        self.nodes.get(key).map(ElementNode::is_active)
    }

    pub fn is_effectively_disabled(&self, key: ElementKey) -> Option<bool> {
        self.nodes
            .get(key)
            .map(|node| node.flags.contains(ElementFlags::EFF_DISABLED))
    }

    pub fn is_dirty(&self, key: ElementKey) -> Option<bool> {
        self.nodes
            .get(key)
            .map(|node| node.flags.contains(ElementFlags::DIRTY))
    }

    fn refresh_effective_flags(&mut self, key: ElementKey) {
        let (parent_hidden, parent_inactive, parent_disabled) = match self.nodes[key].parent {
            Some(parent) => {
                let flags = self.nodes[parent].flags;
                (
                    flags.contains(ElementFlags::EFF_HIDDEN),
                    flags.contains(ElementFlags::EFF_INACTIVE),
                    flags.contains(ElementFlags::EFF_DISABLED),
                )
            }
            None => (false, false, false),
        };

        let node = &mut self.nodes[key];
        let mut effective = node.flags;
        effective.set(
            ElementFlags::EFF_HIDDEN,
            parent_hidden || node.flags.contains(ElementFlags::HIDDEN),
        );
        effective.set(
            ElementFlags::EFF_INACTIVE,
            parent_inactive || node.flags.contains(ElementFlags::INACTIVE),
        );
        effective.set(
            ElementFlags::EFF_DISABLED,
            parent_disabled || node.flags.contains(ElementFlags::DISABLED),
        );

        if effective == node.flags {
            // Descendants derive from these bits; nothing below is stale.
            return;
        }
        node.flags = effective;

        let children = node.children.clone();
        for child in children {
            self.refresh_effective_flags(child);
        }
    }

    // ------------------------------------------------------------------
    // Anchor / update parents
    // ------------------------------------------------------------------

    /// The element layout has to be re-run from when this element's content
    /// changes: its update parent, or the root.
    pub fn layout_root_for(&self, key: ElementKey) -> Option<ElementKey> {
        let node = self.nodes.get(key)?;
        Some(node.update_parent.unwrap_or(self.root))
    }

    pub fn anchor_parent(&self, key: ElementKey) -> Option<ElementKey> {
        self.nodes.get(key).and_then(|node| node.anchor_parent)
    }

    pub fn update_parent(&self, key: ElementKey) -> Option<ElementKey> {
        self.nodes.get(key).and_then(|node| node.update_parent)
    }

    fn derive_au_parents(&self, key: ElementKey) -> (Option<ElementKey>, Option<ElementKey>) {
        match self.nodes[key].parent {
            None => (None, None),
            Some(parent) => {
                let parent_node = &self.nodes[parent];
                let anchor = if parent_node.kind.is_panel() {
                    Some(parent)
                } else {
                    parent_node.anchor_parent
                };
                let update = if parent_node.is_update_boundary() {
                    Some(parent)
                } else {
                    parent_node.update_parent
                };
                (anchor, update)
            }
        }
    }

    /// Recomputes anchor/update parents for `key` and its descendants. The
    /// first level is always refreshed (the caller may have changed `key`'s
    /// own boundary status); below that, recursion stops at any node whose
    /// stored values are already consistent.
    fn refresh_au_parents(&mut self, key: ElementKey) {
        let derived = self.derive_au_parents(key);
        let node = &mut self.nodes[key];
        node.anchor_parent = derived.0;
        node.update_parent = derived.1;

        let children = node.children.clone();
        for child in children {
            self.refresh_au_parents_inner(child);
        }
    }

    fn refresh_au_parents_inner(&mut self, key: ElementKey) {
        let derived = self.derive_au_parents(key);
        let node = &mut self.nodes[key];
        if (node.anchor_parent, node.update_parent) == derived {
            return;
        }
        node.anchor_parent = derived.0;
        node.update_parent = derived.1;

        let children = node.children.clone();
        for child in children {
            self.refresh_au_parents_inner(child);
        }
    }

    fn mark_dirty(&mut self, key: ElementKey) {
        let boundary = self.nodes.get(key).and_then(|node| node.update_parent);
        let mut current = Some(key);
        while let Some(step) = current {
            let node = &mut self.nodes[step];
            node.flags.insert(ElementFlags::DIRTY);
            if Some(step) == boundary {
                break;
            }
            current = node.parent;
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn kind(&self, key: ElementKey) -> Option<ElementKind> {
        self.nodes.get(key).map(|node| node.kind)
    }

    pub fn parent(&self, key: ElementKey) -> Option<ElementKey> {
        self.nodes.get(key).and_then(|node| node.parent)
    }

    pub fn children(&self, key: ElementKey) -> Option<&[ElementKey]> {
        self.nodes.get(key).map(|node| node.children.as_slice())
    }

    pub fn dimensions(&self, key: ElementKey) -> Option<&Dimensions> {
        self.nodes.get(key).map(|node| &node.dimensions)
    }

    pub fn padding(&self, key: ElementKey) -> Option<Padding> {
        self.nodes.get(key).map(|node| node.padding)
    }

    /// Size range cached by the last bottom-up pass.
    pub fn size_range(&self, key: ElementKey) -> Option<SizeRange> {
        self.nodes.get(key).map(|node| node.size_range)
    }

    /// Layout result of the last top-down pass.
    pub fn layout_data(&self, key: ElementKey) -> Option<&LayoutData> {
        self.nodes.get(key).map(|node| &node.layout_data)
    }

    /// Extent the children actually occupied in the last top-down pass.
    pub fn actual_size(&self, key: ElementKey) -> Option<Vector2I> {
        self.nodes.get(key).map(|node| node.actual_size)
    }

    /// Bounds relative to the anchor parent (the nearest ancestor panel).
    pub fn get_bounds(&self, key: ElementKey) -> Option<RectI> {
        let node = self.nodes.get(key)?;
        let mut area = node.layout_data.area;
        if let Some(anchor) = node.anchor_parent {
            let anchor_area = self.nodes.get(anchor)?.layout_data.area;
            area.x -= anchor_area.x;
            area.y -= anchor_area.y;
        }
        Some(area)
    }

    /// Bounds in root space.
    pub fn get_global_bounds(&self, key: ElementKey) -> Option<RectI> {
        self.nodes.get(key).map(|node| node.layout_data.area)
    }

    /// Bounds in screen space (root space shifted by the screen origin).
    pub fn get_screen_bounds(&self, key: ElementKey) -> Option<RectI> {
        let node = self.nodes.get(key)?;
        let mut area = node.layout_data.area;
        area.x += self.screen_origin.x;
        area.y += self.screen_origin.y;
        Some(area)
    }

    /// The part of the element actually visible after clipping.
    pub fn get_visible_bounds(&self, key: ElementKey) -> Option<RectI> {
        let node = self.nodes.get(key)?;
        Some(node.layout_data.area.clip(&node.layout_data.clip_rect))
    }

    /// Topmost leaf element whose visible bounds contain `point`. Containers
    /// and spacers are transparent to hit testing; hidden and inactive
    /// subtrees never hit.
    pub fn element_at(&self, point: Vector2I) -> Option<ElementKey> {
        self.hit_test(self.root, point)
    }

    fn hit_test(&self, key: ElementKey, point: Vector2I) -> Option<ElementKey> {
        let node = &self.nodes[key];
        if !node.is_active() || !node.is_visible() {
            return None;
        }

        // Later children draw above earlier ones.
        for &child in node.children.iter().rev() {
            if let Some(hit) = self.hit_test(child, point) {
                return Some(hit);
            }
        }

        if node.kind == ElementKind::Element {
            let visible = node.layout_data.area.clip(&node.layout_data.clip_rect);
            if visible.contains(point) {
                return Some(key);
            }
        }
        None
    }

    // ------------------------------------------------------------------
    // Two-pass layout protocol
    // ------------------------------------------------------------------

    /// Bottom-up pass: recomputes and caches every node's [`SizeRange`] from
    /// its children and its own [`Dimensions`], post-order.
    pub fn update_optimal_sizes(
        &mut self,
        key: ElementKey,
        sizer: &dyn ContentSizer,
    ) -> Result<(), LayoutError> {
        if !self.nodes.contains_key(key) {
            return Err(LayoutError::InvalidElement);
        }
        self.update_optimal_sizes_inner(key, sizer);
        Ok(())
    }

    fn update_optimal_sizes_inner(&mut self, key: ElementKey, sizer: &dyn ContentSizer) {
        let children = self.nodes[key].children.clone();
        for &child in &children {
            if self.nodes[child].is_active() {
                self.update_optimal_sizes_inner(child, sizer);
            } else {
                // Inactive children keep their slot but contribute nothing.
                self.nodes[child].size_range = SizeRange::ZERO;
            }
        }

        let kind = self.nodes[key].kind;
        let dimensions = self.nodes[key].dimensions;
        let range = match kind {
            ElementKind::Element => {
                dimensions.calculate_size_range(sizer.optimal_content_size(key))
            }
            ElementKind::FixedSpace { size } => {
                let size = Vector2I::new(size as i32, size as i32);
                SizeRange {
                    optimal: size,
                    min: size,
                    max: size,
                }
            }
            // Grows without bound, wants nothing.
            ElementKind::FlexibleSpace => SizeRange::ZERO,
            ElementKind::LayoutX => {
                let content = flow::optimal_content_size(&self.flow_children(key), true);
                dimensions.calculate_size_range(content)
            }
            ElementKind::LayoutY => {
                let content = flow::optimal_content_size(&self.flow_children(key), false);
                dimensions.calculate_size_range(content)
            }
            ElementKind::Panel(_) => {
                let node = &self.nodes[key];
                let content = panel::optimal_content_size(node.children.iter().filter_map(|&child| {
                    let child_node = &self.nodes[child];
                    if !child_node.is_active() || child_node.kind.is_space() {
                        return None;
                    }
                    Some((
                        child_node.dimensions,
                        child_node.size_range,
                        child_node.padding.width(),
                        child_node.padding.height(),
                    ))
                }));
                dimensions.calculate_size_range(content)
            }
        };
        self.nodes[key].size_range = range;
    }

    /// Top-down pass: assigns `data` to `key`, partitions the area among its
    /// children per the node's layout policy, and recurses. Clears dirty
    /// flags on the way.
    pub fn update_layout(&mut self, key: ElementKey, data: LayoutData) -> Result<(), LayoutError> {
        if !self.nodes.contains_key(key) {
            return Err(LayoutError::InvalidElement);
        }
        self.update_layout_inner(key, data);
        Ok(())
    }

    /// Runs both passes over the whole tree for the given root area.
    pub fn perform_layout(&mut self, area: RectI, sizer: &dyn ContentSizer) {
        self.update_optimal_sizes_inner(self.root, sizer);
        self.update_layout_inner(self.root, LayoutData::new(area));
    }

    fn update_layout_inner(&mut self, key: ElementKey, mut data: LayoutData) {
        if let ElementKind::Panel(config) = self.nodes[key].kind {
            panel::update_depth_range(&config, &mut data);
        }

        self.nodes[key].layout_data = data;
        self.nodes[key].flags.remove(ElementFlags::DIRTY);

        let kind = self.nodes[key].kind;
        let children = self.nodes[key].children.clone();
        if !kind.is_container() || children.is_empty() {
            self.nodes[key].actual_size = if kind.is_container() {
                Vector2I::ZERO
            } else {
                data.area.size()
            };
            return;
        }

        let areas = self.element_areas(key, &data.area);
        debug_assert_eq!(
            areas.len(),
            children.len(),
            "element area slots must match the child list"
        );
        let count = areas.len().min(children.len());

        let mut extent = Vector2I::ZERO;
        for index in 0..count {
            let child = children[index];
            if !self.nodes[child].is_active() {
                continue;
            }

            let child_area = areas[index];
            let child_data = LayoutData {
                area: child_area,
                clip_rect: child_area.clip(&data.clip_rect),
                ..data
            };
            self.update_layout_inner(child, child_data);

            let padding = self.nodes[child].padding;
            extent.x = extent
                .x
                .max(child_area.right() + i32::from(padding.right) - data.area.x);
            extent.y = extent
                .y
                .max(child_area.bottom() + i32::from(padding.bottom) - data.area.y);
        }
        self.nodes[key].actual_size = extent.max(Vector2I::ZERO);
    }

    /// Area for each child slot of a container, index-parallel with the child
    /// list. Inactive slots stay zero.
    fn element_areas(&self, key: ElementKey, area: &RectI) -> Vec<RectI> {
        let node = &self.nodes[key];
        match node.kind {
            ElementKind::LayoutX => flow::element_areas(*area, &self.flow_children(key), true),
            ElementKind::LayoutY => flow::element_areas(*area, &self.flow_children(key), false),
            ElementKind::Panel(_) => node
                .children
                .iter()
                .map(|&child| {
                    let child_node = &self.nodes[child];
                    if child_node.is_active() {
                        panel::element_area(area, &child_node.dimensions, &child_node.size_range)
                    } else {
                        RectI::ZERO
                    }
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn flow_children(&self, key: ElementKey) -> Vec<FlowChild> {
        self.nodes[key]
            .children
            .iter()
            .map(|&child| {
                let child_node = &self.nodes[child];
                FlowChild {
                    active: child_node.is_active(),
                    kind: (&child_node.kind).into(),
                    fixed_width: child_node.dimensions.fixed_width(),
                    fixed_height: child_node.dimensions.fixed_height(),
                    size_range: child_node.size_range,
                    padding: child_node.padding,
                }
            })
            .collect()
    }

    /// Computes the extent a subtree would occupy if assigned `area`, without
    /// touching any cached layout state.
    pub(crate) fn simulate_actual_size(&self, key: ElementKey, area: RectI) -> Vector2I {
        let node = &self.nodes[key];
        if !node.kind.is_container() {
            return area.size();
        }
        if node.children.is_empty() {
            return Vector2I::ZERO;
        }

        let areas = self.element_areas(key, &area);
        let count = areas.len().min(node.children.len());

        let mut extent = Vector2I::ZERO;
        for index in 0..count {
            let child = node.children[index];
            let child_node = &self.nodes[child];
            if !child_node.is_active() {
                continue;
            }
            let child_area = areas[index];
            extent.x = extent
                .x
                .max(child_area.right() + i32::from(child_node.padding.right) - area.x);
            extent.y = extent
                .y
                .max(child_area.bottom() + i32::from(child_node.padding.bottom) - area.y);
        }
        extent.max(Vector2I::ZERO)
    }
}

impl Default for GuiTree {
    fn default() -> Self {
        Self::new()
    }
}
