//! Built-in conversions applied when no configured rule matches
//!
//! - `input <type> <name>` reads a typed value from the shared scanner
//! - `print <expr>` writes a line to the console
//! - anything else gets a statement terminator unless it already ends a block

/// Name of the shared `java.util.Scanner` declared in every entry point
pub const SCANNER_VARIABLE: &str = "sc";

/// Characters that already end a statement or a block
const TERMINATORS: &[char] = &[';', '{', '}'];

/// Strip a case-insensitive keyword prefix from `line`
pub fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let head = line.get(..keyword.len())?;
    if head.eq_ignore_ascii_case(keyword) {
        Some(&line[keyword.len()..])
    } else {
        None
    }
}

/// Map pseudocode type names to Java ones (`string` becomes `String`)
pub fn canonical_type(ty: &str) -> String {
    if ty.eq_ignore_ascii_case("string") {
        "String".to_string()
    } else {
        ty.to_string()
    }
}

/// `input <type> <name>`
///
/// Returns `None` when the line does not start with `input`. Unsupported
/// types and short statements produce an inline `// ERROR` comment.
pub fn convert_input(line: &str) -> Option<String> {
    strip_keyword(line, "input")?;

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return Some(format!("// ERROR: Invalid input statement: {}", line));
    }

    let ty = parts[1].to_lowercase();
    let var = parts[2];
    let statement = match ty.as_str() {
        "int" => format!("int {} = {}.nextInt();", var, SCANNER_VARIABLE),
        "double" => format!("double {} = {}.nextDouble();", var, SCANNER_VARIABLE),
        "boolean" => format!("boolean {} = {}.nextBoolean();", var, SCANNER_VARIABLE),
        "string" => format!("String {} = {}.nextLine();", var, SCANNER_VARIABLE),
        _ => format!("// ERROR: Unsupported input type: {}", ty),
    };
    Some(statement)
}

/// `print <expr>` or `print(<expr>)`
pub fn convert_print(line: &str) -> Option<String> {
    let content = strip_keyword(line, "print")?.trim();
    if content.starts_with('(') {
        Some(format!("System.out.println{};", content))
    } else {
        Some(format!("System.out.println({});", content))
    }
}

/// Append `;` unless the line is empty or already ends a statement or block
pub fn terminate(line: &str) -> String {
    match line.chars().last() {
        Some(c) if !TERMINATORS.contains(&c) => format!("{};", line),
        _ => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_types() {
        assert_eq!(
            convert_input("input int x"),
            Some("int x = sc.nextInt();".to_string())
        );
        assert_eq!(
            convert_input("INPUT Double d"),
            Some("double d = sc.nextDouble();".to_string())
        );
        assert_eq!(
            convert_input("input boolean ok"),
            Some("boolean ok = sc.nextBoolean();".to_string())
        );
        assert_eq!(
            convert_input("input string name"),
            Some("String name = sc.nextLine();".to_string())
        );
    }

    #[test]
    fn test_input_unsupported_type() {
        assert_eq!(
            convert_input("input char c"),
            Some("// ERROR: Unsupported input type: char".to_string())
        );
    }

    #[test]
    fn test_input_too_short() {
        assert_eq!(
            convert_input("input x"),
            Some("// ERROR: Invalid input statement: input x".to_string())
        );
    }

    #[test]
    fn test_not_input() {
        assert_eq!(convert_input("print x"), None);
    }

    #[test]
    fn test_print_wraps_argument() {
        assert_eq!(
            convert_print("print \"hello\""),
            Some("System.out.println(\"hello\");".to_string())
        );
        assert_eq!(
            convert_print("print(a + b)"),
            Some("System.out.println(a + b);".to_string())
        );
    }

    #[test]
    fn test_terminate() {
        assert_eq!(terminate("x = 1"), "x = 1;");
        assert_eq!(terminate("x = 1;"), "x = 1;");
        assert_eq!(terminate("}"), "}");
        assert_eq!(terminate("if (x) {"), "if (x) {");
        assert_eq!(terminate(""), "");
    }

    #[test]
    fn test_canonical_type() {
        assert_eq!(canonical_type("string"), "String");
        assert_eq!(canonical_type("STRING"), "String");
        assert_eq!(canonical_type("int"), "int");
    }

    #[test]
    fn test_strip_keyword_handles_short_and_multibyte() {
        assert_eq!(strip_keyword("pr", "print"), None);
        assert_eq!(strip_keyword("prïnt", "print"), None);
        assert_eq!(strip_keyword("Print x", "print"), Some(" x"));
    }
}
