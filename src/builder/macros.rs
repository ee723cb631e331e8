//! Macros for ergonomic route table construction.

/// Build a [`RoutesMap`](crate::routes::RoutesMap) from `type => pattern`
/// pairs, in order.
///
/// # Example
///
/// ```
/// use lockstep::routes;
/// use lockstep::routes::RouteMatcher;
///
/// let table = routes! {
///     "FIRST" => "/first",
///     "SECOND" => "/second/:param",
/// };
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.path_to_action("/second/bar").action_type, "SECOND");
/// ```
#[macro_export]
macro_rules! routes {
    ($($action_type:expr => $pattern:expr),* $(,)?) => {{
        let table = $crate::routes::RoutesMap::new();
        $(
            let table = table.route($action_type, $pattern);
        )*
        table
    }};
}
