//! Uniform close semantics for engine-owned resources

use std::io;

/// A lazily-constructed, closeable engine resource.
///
/// The engine closes every *built* resource exactly once at teardown;
/// resources that were never built are not constructed merely to be
/// closed. A close failure is logged and must not prevent closing the
/// sibling resources.
pub trait Resource: Send + Sync {
    /// Release the resource.
    fn close(&self) -> io::Result<()>;
}
