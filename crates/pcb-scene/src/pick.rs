use crate::registry::Registry;
use crate::scene::PrimitiveId;

/// Resolve the renderer's ray hits to a selectable primitive.
///
/// The renderer reports every primitive the pick ray crossed, nearest first.
/// Scenery, lights, and the board slab never carry a registry entry, so the
/// first registered hit is the selection candidate; a ray that crosses
/// nothing registered is a miss.
pub fn resolve_hits<I>(hits: I, registry: &Registry) -> Option<PrimitiveId>
where
    I: IntoIterator<Item = PrimitiveId>,
{
    hits.into_iter().find(|id| registry.contains(*id))
}
