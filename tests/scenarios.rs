use lesson_deck::deck::DeckCursor;
use lesson_deck::highlight::{self, ColorSlot, HighlightSpan};
use lesson_deck::lesson::{MatchingPair, QuestionTf, ScrambleItem};
use lesson_deck::widget::{
    Direction, ItemStatus, MatchOutcome, MatchingBoard, ScrambleBoard, TrueFalseQuiz,
};

#[test]
fn scenario_a_cursor_clamps_at_start() {
    let mut cursor = DeckCursor::new(3);
    assert_eq!(cursor.current_index(), 0);
    cursor.advance();
    assert_eq!(cursor.current_index(), 1);
    cursor.retreat();
    assert_eq!(cursor.current_index(), 0);
    cursor.retreat();
    assert_eq!(cursor.current_index(), 0);
}

#[test]
fn scenario_b_true_false_locks_first_answer() {
    let mut quiz = TrueFalseQuiz::new(vec![QuestionTf {
        id: 2,
        statement: "The weather is always sunny in early spring.".into(),
        is_true: false,
        explanation: None,
        context_highlight: None,
    }]);

    assert_eq!(quiz.answer(2, true), Some(false));
    assert_eq!(quiz.answer(2, false), None);
    assert_eq!(quiz.status(2), ItemStatus::Answered { correct: false });
}

#[test]
fn scenario_c_matching_mismatch_then_match() {
    let pairs = vec![
        MatchingPair {
            id: 1,
            left: "Some mornings are ___".into(),
            right: "Cloudy".into(),
            context_highlight: None,
        },
        MatchingPair {
            id: 2,
            left: "The mountain is ___ in the evenings".into(),
            right: "Cool".into(),
            context_highlight: None,
        },
    ];
    let mut board = MatchingBoard::with_right_order(pairs, vec![1, 0]);

    board.select_left(1);
    assert_eq!(board.select_right(2), Some(MatchOutcome::Mismatch));
    assert_eq!(board.armed(), None);
    assert_eq!(board.locked_count(), 0);

    board.select_left(1);
    assert!(matches!(board.select_right(1), Some(MatchOutcome::Matched { .. })));
    assert!(board.is_locked(1));
    assert_eq!(board.locked_count(), 1);
    assert!(!board.is_solved());
}

#[test]
fn scenario_d_scramble_swap_then_check() {
    let mut board = ScrambleBoard::arranged(
        vec![ScrambleItem {
            id: 1,
            parts: vec!["go".into(), "early".into()],
            correct_sentence: "go early".into(),
        }],
        vec![vec!["early".into(), "go".into()]],
    );

    assert!(board.move_token(1, 1, Direction::Left));
    assert_eq!(board.tokens(1).unwrap(), ["go".to_string(), "early".to_string()]);
    assert_eq!(board.check(1), Some(true));
    assert!(board.is_solved(1));
    assert!(!board.move_token(1, 0, Direction::Right));
}

#[test]
fn highlight_wraps_every_unclaimed_occurrence_once() {
    let passage = "You should go early. Go early and bring water. early";
    let spans = vec![
        HighlightSpan {
            owner_id: 1,
            literal_text: "Go early and bring water".into(),
            color: ColorSlot::for_position(0),
        },
        HighlightSpan {
            owner_id: 2,
            literal_text: "early".into(),
            color: ColorSlot::for_position(1),
        },
    ];

    let segments = highlight::apply(passage, &spans);
    let rebuilt: String = segments.iter().map(|s| s.text).collect();
    assert_eq!(rebuilt, passage);

    let second: Vec<&str> = segments
        .iter()
        .filter(|s| s.mark.map(|m| m.owner_id) == Some(2))
        .map(|s| s.text)
        .collect();
    // the occurrence inside span 1 stays with span 1
    assert_eq!(second, vec!["early", "early"]);
}
