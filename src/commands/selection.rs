#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    AwaitingSelection,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidSelection {
    NotANumber,
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    // zero-based
    Select(usize),
    Quit,
    Invalid(InvalidSelection),
}

pub fn parse_selection(input: &str, count: usize) -> SelectionEvent {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return SelectionEvent::Quit;
    }

    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => SelectionEvent::Select(n - 1),
        Ok(_) => SelectionEvent::Invalid(InvalidSelection::OutOfRange),
        Err(_) => SelectionEvent::Invalid(InvalidSelection::NotANumber),
    }
}

impl ViewerState {
    pub fn on_event(self, event: SelectionEvent) -> ViewerState {
        match (self, event) {
            (ViewerState::Done, _) | (_, SelectionEvent::Quit) => ViewerState::Done,
            (ViewerState::AwaitingSelection, _) => ViewerState::AwaitingSelection,
        }
    }
}

pub fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        let cases = vec![
            ("1", SelectionEvent::Select(0)),
            (" 3 \n", SelectionEvent::Select(2)),
            ("q", SelectionEvent::Quit),
            ("Q", SelectionEvent::Quit),
            ("quit", SelectionEvent::Quit),
            ("0", SelectionEvent::Invalid(InvalidSelection::OutOfRange)),
            ("4", SelectionEvent::Invalid(InvalidSelection::OutOfRange)),
            ("-1", SelectionEvent::Invalid(InvalidSelection::NotANumber)),
            ("two", SelectionEvent::Invalid(InvalidSelection::NotANumber)),
            ("", SelectionEvent::Invalid(InvalidSelection::NotANumber)),
        ];

        for (input, expected) in cases {
            assert_eq!(
                parse_selection(input, 3),
                expected,
                "parse_selection({input:?}, 3)"
            );
        }
    }

    #[test]
    fn test_transitions() {
        let awaiting = ViewerState::AwaitingSelection;
        assert_eq!(
            awaiting.on_event(SelectionEvent::Select(0)),
            ViewerState::AwaitingSelection
        );
        assert_eq!(
            awaiting.on_event(SelectionEvent::Invalid(InvalidSelection::NotANumber)),
            ViewerState::AwaitingSelection
        );
        assert_eq!(awaiting.on_event(SelectionEvent::Quit), ViewerState::Done);
        assert_eq!(
            ViewerState::Done.on_event(SelectionEvent::Select(1)),
            ViewerState::Done
        );
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y\n"));
        assert!(is_affirmative(" yes "));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yep"));
    }
}
