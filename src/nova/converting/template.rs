//! Positional `%s` templates

/// The placeholder token
pub const PLACEHOLDER: &str = "%s";

/// Number of `%s` placeholders in a template
pub fn count_placeholders(template: &str) -> usize {
    template.matches(PLACEHOLDER).count()
}

/// Fill placeholders left to right with `args`.
///
/// Arguments are inserted literally, so a `%s` inside an argument is never
/// substituted again. Placeholders without a matching argument become empty.
pub fn instantiate(template: &str, args: &[&str]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;

    while let Some(pos) = rest.find(PLACEHOLDER) {
        output.push_str(&rest[..pos]);
        output.push_str(args.next().copied().unwrap_or(""));
        rest = &rest[pos + PLACEHOLDER.len()..];
    }
    output.push_str(rest);
    output
}
