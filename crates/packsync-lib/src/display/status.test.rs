use super::*;

#[test]
fn test_detail_formatting() {
    assert_eq!(StatusLine::detail("jei.jar", ""), "jei.jar");
    assert_eq!(StatusLine::detail("jei.jar", "added"), "jei.jar: added");
}

#[test]
fn test_status_lines_do_not_panic() {
    let styling = StyleManager::plain();
    let status = StatusLine::new(&styling);

    status.success("apply", "4/4");
    status.error("remove", "not found");
    status.warning("2 entries skipped");
    status.info("instance /tmp/x");
    status.message("plain");
    status.emphasis("packsync");
    status.subtle("secondary");
    status.properties(&[("Add", "1".to_string()), ("Overrides", "3".to_string())]);
    status.list(&["a.jar".to_string()]);
}
