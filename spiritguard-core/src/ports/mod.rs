// spiritguard-core/src/ports/mod.rs

// What the application needs from the outside world, without knowing how it
// is provided. Adapters live in `infrastructure`.

use crate::error::SpiritGuardError;

/// A place the raw sales export comes from (a file, a download cache...).
pub trait SalesSource {
    /// Raw bytes of the export. `Ok(None)` means the source is absent, which
    /// callers treat as "no data" rather than a failure.
    fn fetch(&self) -> Result<Option<Vec<u8>>, SpiritGuardError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}
