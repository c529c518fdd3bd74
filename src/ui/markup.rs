//! Host label markup

const LINE_BREAK: &str = "[CR]";

pub fn bold(value: &str) -> String {
    format!("[B]{value}[/B]")
}

pub fn uppercase(value: &str) -> String {
    format!("[UPPERCASE]{value}[/UPPERCASE]")
}

pub fn color(color: &str, value: &str) -> String {
    format!("[COLOR={}]{value}[/COLOR]", color.to_lowercase())
}

pub fn light(value: &str) -> String {
    format!("[LIGHT]{value}[/LIGHT]")
}

pub fn italic(value: &str) -> String {
    format!("[I]{value}[/I]")
}

pub fn indent(tabs: usize, value: &str) -> String {
    format!("[TABS]{tabs}[/TABS]{value}")
}

pub fn new_line(count: usize) -> String {
    LINE_BREAK.repeat(count)
}

/// Surround `value` with line breaks
pub fn with_breaks(value: &str, before: usize, after: usize) -> String {
    format!("{}{value}{}", new_line(before), new_line(after))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup() {
        assert_eq!(bold("Title"), "[B]Title[/B]");
        assert_eq!(color("Red", "Live"), "[COLOR=red]Live[/COLOR]");
        assert_eq!(indent(2, "x"), "[TABS]2[/TABS]x");
        assert_eq!(new_line(2), "[CR][CR]");
        assert_eq!(
            with_breaks(&italic("note"), 1, 0),
            "[CR][I]note[/I]"
        );
        assert_eq!(with_breaks(&uppercase(&light("a")), 0, 1), "[UPPERCASE][LIGHT]a[/LIGHT][/UPPERCASE][CR]");
    }
}
