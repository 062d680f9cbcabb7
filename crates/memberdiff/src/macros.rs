/// Assert that two values have no structural differences.
///
/// On failure the panic message lists every difference, one per line.
#[macro_export]
macro_rules! assert_no_differences {
    ($left:expr, $right:expr $(,)?) => {
        match $crate::compare(&$left, &$right) {
            Ok(report) => {
                if !report.is_empty() {
                    panic!(
                        "structural comparison found {} difference(s):\n{}",
                        report.len(),
                        report
                    );
                }
            }
            Err(err) => panic!("structural comparison failed: {}", err),
        }
    };
}

/// Assert that comparing two values yields exactly `count` records.
#[macro_export]
macro_rules! assert_differences {
    ($left:expr, $right:expr, $count:expr $(,)?) => {
        match $crate::compare(&$left, &$right) {
            Ok(report) => {
                if report.len() != $count {
                    panic!(
                        "expected {} difference(s), found {}:\n{}",
                        $count,
                        report.len(),
                        report
                    );
                }
            }
            Err(err) => panic!("structural comparison failed: {}", err),
        }
    };
}
