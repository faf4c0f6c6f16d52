/// Builds an [`UntypedValue`](crate::UntypedValue) from JSON-like syntax.
///
/// ```
/// use remap_value::{UntypedValue, value};
///
/// let v = value!({
///     "key": "E1",
///     "employee": {"name": "Ann", "position": "Eng"},
///     "expiry_time": 3600.0,
///     "offsets": [-1, 2, null],
/// });
/// assert_eq!(v.get("key").and_then(UntypedValue::as_str), Some("E1"));
/// ```
///
/// Keys must be string literals. Values are `null`, nested `{...}` / `[...]`,
/// an optionally negated literal, or any single token tree that converts
/// with `UntypedValue::from` (parenthesize longer expressions).
#[macro_export]
macro_rules! value {
    (null) => {
        $crate::UntypedValue::Null
    };

    ([]) => {
        $crate::UntypedValue::Sequence(::std::vec::Vec::new())
    };

    ([ $($tt:tt)+ ]) => {
        $crate::UntypedValue::Sequence($crate::value!(@seq [] $($tt)+))
    };

    ({}) => {
        $crate::UntypedValue::Mapping($crate::Mapping::new())
    };

    ({ $($tt:tt)+ }) => {{
        let mut mapping = $crate::Mapping::new();
        $crate::value!(@map mapping $($tt)+);
        $crate::UntypedValue::Mapping(mapping)
    }};

    // Sequence elements, accumulated in order.
    (@seq [$($done:expr,)*]) => {
        ::std::vec![$($done,)*]
    };
    (@seq [$($done:expr,)*] - $num:literal $(, $($rest:tt)*)?) => {
        $crate::value!(@seq [$($done,)* $crate::UntypedValue::from(-$num),] $($($rest)*)?)
    };
    (@seq [$($done:expr,)*] $next:tt $(, $($rest:tt)*)?) => {
        $crate::value!(@seq [$($done,)* $crate::value!($next),] $($($rest)*)?)
    };

    // Mapping entries, inserted in order.
    (@map $mapping:ident) => {};
    (@map $mapping:ident $key:literal : - $num:literal $(, $($rest:tt)*)?) => {
        $mapping.insert(::std::string::String::from($key), $crate::UntypedValue::from(-$num));
        $crate::value!(@map $mapping $($($rest)*)?);
    };
    (@map $mapping:ident $key:literal : $val:tt $(, $($rest:tt)*)?) => {
        $mapping.insert(::std::string::String::from($key), $crate::value!($val));
        $crate::value!(@map $mapping $($($rest)*)?);
    };

    ($other:expr) => {
        $crate::UntypedValue::from($other)
    };
}
