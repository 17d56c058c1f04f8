//! Macros for ergonomic markup construction.

/// Build an ordered [`Attributes`](crate::core::Attributes) map.
///
/// Keys are anything convertible into `String`, values anything
/// convertible into `serde_json::Value`.
///
/// # Example
///
/// ```
/// use statechart_markup::attrs;
///
/// let attributes = attrs! {
///     "event" => "START",
///     "target" => "running",
/// };
///
/// assert_eq!(attributes.len(), 2);
/// assert_eq!(attributes["target"], "running");
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::core::Attributes::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut attributes = $crate::core::Attributes::new();
        $(
            attributes.insert(
                ::std::string::String::from($key),
                $crate::serde_json::Value::from($value),
            );
        )+
        attributes
    }};
}
