use super::*;

#[test]
fn test_plain_styling_has_no_escape_codes() {
    let styling = StyleManager::plain();

    assert_eq!(styling.format_success("done"), "+ done");
    assert_eq!(styling.format_error("failed"), "x failed");
    assert_eq!(styling.format_warning("careful"), "! careful");
    assert_eq!(styling.style_emphasis("bold"), "bold");
    assert_eq!(styling.style_subtle("dim"), "dim");
}

#[test]
fn test_unicode_symbols() {
    let styling = StyleManager::new(false, true);
    assert_eq!(styling.format_success("done"), "✓ done");
    assert_eq!(styling.bullet(), "•");
}

#[test]
fn test_forced_color_emits_ansi() {
    let styling = StyleManager::new(true, false);
    assert!(styling.format_error("failed").contains("\u{1b}["));
}
