//! Named implementations referenced from markup.
//!
//! Markup refers to actions, guards, services, activities and delays by
//! name. The options record maps those names to implementations, which
//! the compiler hands to the machine constructor untouched.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Ordered map from implementation name to implementation.
pub type Implementations = IndexMap<String, Implementation>;

/// Shareable callable taking runtime arguments and producing a value.
///
/// The compiler never calls an implementation; it only moves and wraps
/// them. Equality is identity of the underlying function.
///
/// # Example
///
/// ```rust
/// use statechart_markup::core::Implementation;
/// use serde_json::json;
///
/// let is_positive = Implementation::new(|args| json!(args[0].as_i64() > Some(0)));
///
/// assert_eq!(is_positive.call(&[json!(3)]), json!(true));
/// assert_eq!(is_positive.call(&[json!(-1)]), json!(false));
/// ```
#[derive(Clone)]
pub struct Implementation {
    function: Arc<dyn Fn(&[Value]) -> Value + Send + Sync>,
}

impl Implementation {
    /// Wrap a function.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Implementation {
            function: Arc::new(function),
        }
    }

    /// An implementation that ignores its arguments, e.g. a fixed delay.
    pub fn constant(value: Value) -> Self {
        Self::new(move |_| value.clone())
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.function)(args)
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Implementation(..)")
    }
}

impl PartialEq for Implementation {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.function, &other.function)
    }
}
