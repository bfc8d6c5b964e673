use core::fmt;

/// Errors reported by the tree-mutation API. The layout passes themselves
/// never fail; once the tree shape is valid, layout always produces a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LayoutError {
    /// The element handle is stale or was never part of this tree.
    InvalidElement,
    /// Attaching the child would make it its own ancestor.
    WouldCreateCycle,
    /// The target element is a leaf or spacer and cannot hold children.
    NotAContainer,
    /// Thrown if you are trying to use an id that's already registered for
    /// some other element.
    DuplicateId,
    /// The operation only applies to a different element kind (e.g. setting
    /// a panel depth on a flow layout).
    KindMismatch,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LayoutError::InvalidElement => "element handle is stale or foreign to this tree",
            LayoutError::WouldCreateCycle => "attaching the child would create a cycle",
            LayoutError::NotAContainer => "target element cannot hold children",
            LayoutError::DuplicateId => "id is already registered for another element",
            LayoutError::KindMismatch => "operation does not apply to this element kind",
        };
        formatter.write_str(text)
    }
}

impl std::error::Error for LayoutError {}
