use crate::entities::Id;

/// Produces identifiers for new records.
///
/// Records are addressed by their identifier, so a duplicate
/// would silently replace an existing record. Implementations
/// must draw from a space where collisions are negligible.
pub trait IdGenerator {
    fn generate(&self) -> Id;
}

/// Random identifiers (UUID v4).
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&self) -> Id {
        Id::new()
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> Id,
{
    fn generate(&self) -> Id {
        self()
    }
}
