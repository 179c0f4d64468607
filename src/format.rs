use crate::stopwatch::Elapsed;

/// Fixed-width "HH:MM:SS" clock line, wrapped in dot markers while the
/// widget is pinned above other windows.
pub fn clock_line(hours: u32, minutes: u32, seconds: u32, marked: bool) -> String {
    let mark = if marked { "." } else { "" };
    format!("{mark}{hours:02}:{minutes:02}:{seconds:02}{mark}")
}

/// Fixed-width "HH:MM:SS.mmm" stopwatch line, wrapped in dot markers while
/// the stopwatch is accumulating.
pub fn stopwatch_line(elapsed: &Elapsed, marked: bool) -> String {
    let mark = if marked { "." } else { "" };
    format!(
        "{mark}{:02}:{:02}:{:02}.{:03}{mark}",
        elapsed.hours, elapsed.minutes, elapsed.seconds, elapsed.millis
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_line_zero_pads() {
        assert_eq!(clock_line(1, 2, 3, false), "01:02:03");
        assert_eq!(clock_line(23, 59, 9, false), "23:59:09");
    }

    #[test]
    fn clock_line_marks_topmost() {
        assert_eq!(clock_line(1, 2, 3, true), ".01:02:03.");
    }

    #[test]
    fn stopwatch_line_pads_millis_to_three() {
        let e = Elapsed::from_ms(7);
        assert_eq!(stopwatch_line(&e, false), "00:00:00.007");
    }

    #[test]
    fn stopwatch_line_marks_running() {
        let e = Elapsed::from_ms(3_723_456);
        assert_eq!(stopwatch_line(&e, true), ".01:02:03.456.");
    }
}
