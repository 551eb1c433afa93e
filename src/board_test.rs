#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

fn memo_id(tail: u32) -> MemoId {
    Uuid::parse_str(&format!("00000000-0000-4000-8000-{tail:012}")).unwrap()
}

// --- MemoState ---

#[test]
fn memo_default_is_unit_scale_at_origin() {
    let memo = MemoState::default();
    assert_eq!(memo.scale, 1.0);
    assert_eq!(memo.width, 0.0);
}

#[test]
fn memo_center_accounts_for_scale() {
    let mut memo = MemoState::new(100.0, 50.0, 200.0, 100.0);
    assert_eq!(memo.center(), (200.0, 100.0));
    memo.scale = 2.0;
    assert_eq!(memo.center(), (300.0, 150.0));
}

#[test]
fn memo_merge_applies_known_numeric_fields() {
    let mut memo = MemoState::new(0.0, 0.0, 10.0, 10.0);
    let fields = json!({ "x": 5.0, "scale": 2.0, "label": "hi" });
    memo.merge(fields.as_object().unwrap());
    assert_eq!(memo.x, 5.0);
    assert_eq!(memo.scale, 2.0);
    assert_eq!(memo.width, 10.0);
}

#[test]
fn memo_snapshot_lists_all_fields() {
    let snapshot = MemoState::new(1.0, 2.0, 3.0, 4.0).snapshot();
    assert_eq!(snapshot["x"], 1.0);
    assert_eq!(snapshot["y"], 2.0);
    assert_eq!(snapshot["scale"], 1.0);
    assert_eq!(snapshot["width"], 3.0);
    assert_eq!(snapshot["height"], 4.0);
}

// --- PublicBoardState ---

#[test]
fn insert_and_read_back() {
    let mut board = PublicBoardState::new();
    let id = memo_id(1);
    board.insert_memo(id, MemoState::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(board.len(), 1);
    assert_eq!(board.memo(&id).map(|m| m.x), Some(1.0));
    assert!(board.memo(&memo_id(2)).is_none());
}

#[test]
fn remove_clears_focus_on_the_removed_memo() {
    let mut board = PublicBoardState::new();
    let id = memo_id(1);
    board.insert_memo(id, MemoState::default());
    board.focused = Some(id);
    assert!(board.remove_memo(&id).is_some());
    assert_eq!(board.focused, None);
    assert!(board.is_empty());
}

#[test]
fn remove_keeps_focus_on_other_memos() {
    let mut board = PublicBoardState::new();
    board.insert_memo(memo_id(1), MemoState::default());
    board.insert_memo(memo_id(2), MemoState::default());
    board.focused = Some(memo_id(2));
    board.remove_memo(&memo_id(1));
    assert_eq!(board.focused, Some(memo_id(2)));
}

#[test]
fn memo_ids_are_sorted() {
    let mut board = PublicBoardState::new();
    for tail in [7, 2, 9, 4] {
        board.insert_memo(memo_id(tail), MemoState::default());
    }
    assert_eq!(board.memo_ids(), vec![memo_id(2), memo_id(4), memo_id(7), memo_id(9)]);
}

#[test]
fn snapshot_has_focused_and_memo_map() {
    let mut board = PublicBoardState::new();
    let id = memo_id(3);
    board.insert_memo(id, MemoState::new(1.0, 1.0, 2.0, 2.0));
    let unfocused = board.snapshot();
    assert_eq!(unfocused["focused"], Value::Null);
    assert_eq!(unfocused["memos"][id.to_string()]["width"], 2.0);

    board.focused = Some(id);
    assert_eq!(board.snapshot()["focused"], json!(id.to_string()));
}

#[test]
fn merge_domain_sets_and_clears_focus() {
    let mut board = PublicBoardState::new();
    let id = memo_id(5);
    board.insert_memo(id, MemoState::default());

    let set = json!({ "focused": id.to_string() });
    board.merge_domain(set.as_object().unwrap());
    assert_eq!(board.focused, Some(id));

    let clear = json!({ "focused": null });
    board.merge_domain(clear.as_object().unwrap());
    assert_eq!(board.focused, None);
}

#[test]
fn merge_memo_reports_missing_entities() {
    let mut board = PublicBoardState::new();
    let fields = json!({ "x": 1.0 });
    assert!(!board.merge_memo(&memo_id(1), fields.as_object().unwrap()));
    board.insert_memo(memo_id(1), MemoState::default());
    assert!(board.merge_memo(&memo_id(1), fields.as_object().unwrap()));
    assert_eq!(board.memo(&memo_id(1)).map(|m| m.x), Some(1.0));
}
