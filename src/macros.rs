/// Compile a literal pattern once, case-insensitively, and hand out a
/// `&'static Regex`.
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::RegexBuilder::new($pat).case_insensitive(true).build().unwrap());
        &*RE
    }};
}
