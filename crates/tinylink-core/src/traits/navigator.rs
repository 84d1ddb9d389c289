// # Navigator Trait
//
// The only side effect the redirect resolver performs is asking something
// else to navigate to a URL. In a browser that is a location change, in the
// command-line shell it is printing the target.

/// Performs a navigation hand-off
///
/// Navigation is fire-and-forget: the implementation does not report back
/// whether the target could be reached.
pub trait Navigator: Send + Sync {
    /// Navigate to `target`
    fn navigate(&self, target: &str);
}
