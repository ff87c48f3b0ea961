use super::*;

#[test]
fn test_bar_starts_at_zero() {
    let progress = ProgressDisplay::hidden(StyleManager::plain());
    assert_eq!(progress.position(), 0);
}

#[test]
fn test_report_sets_rounded_position() {
    let mut progress = ProgressDisplay::hidden(StyleManager::plain());

    progress.report(33.333);
    assert_eq!(progress.position(), 33);

    progress.report(66.666);
    assert_eq!(progress.position(), 67);

    progress.report(100.0);
    assert_eq!(progress.position(), 100);
}

#[test]
fn test_report_clamps_out_of_range() {
    let mut progress = ProgressDisplay::hidden(StyleManager::plain());

    progress.report(250.0);
    assert_eq!(progress.position(), 100);

    progress.report(-5.0);
    assert_eq!(progress.position(), 0);
}

#[test]
fn test_finish_and_abandon_do_not_panic() {
    let progress = ProgressDisplay::hidden(StyleManager::new(false, true));
    progress.finish("done");

    let progress = ProgressDisplay::hidden(StyleManager::plain());
    progress.abandon("update failed");
}

#[test]
fn test_usable_as_dyn_sink() {
    let mut progress = ProgressDisplay::hidden(StyleManager::plain());
    let sink: &mut (dyn ProgressSink + Send) = &mut progress;
    sink.report(50.0);
    assert_eq!(progress.position(), 50);
}
