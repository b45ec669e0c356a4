//! Hub and spoke conversion traits

use crate::error::ConversionError;

/// Marker for the canonical version every other version converts through.
pub trait Hub {}

/// A spoke version of a resource that converts to and from hub `H`.
///
/// Spoke to spoke conversion never happens directly; callers go through `H`.
pub trait Convertible<H: Hub>: Sized {
    /// Convert this object into the hub version.
    fn convert_to(&self) -> Result<H, ConversionError>;

    /// Build this version of the object from the hub version.
    fn convert_from(hub: &H) -> Result<Self, ConversionError>;

    /// Convert every item of a list into the hub version, in order.
    fn convert_list_to(items: &[Self]) -> Result<Vec<H>, ConversionError> {
        items.iter().map(Self::convert_to).collect()
    }

    /// Build every item of a list from the hub version, in order.
    fn convert_list_from(hubs: &[H]) -> Result<Vec<Self>, ConversionError> {
        hubs.iter().map(Self::convert_from).collect()
    }
}
