//! ID generator port for producing unique identifiers.

/// Generates unique identifiers.
///
/// Used to name scratch files (one per poll) so repeated polling cycles never
/// share an output sink.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}
