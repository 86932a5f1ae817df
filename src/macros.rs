/// Compile a literal regex once and hand out a `&'static Regex`.
///
/// Patterns are string literals checked by the test-suite, so compilation
/// cannot fail at runtime.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
