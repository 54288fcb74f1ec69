use ropepad_core::{RopeError, TextRope};

const SAMPLES: &[&str] = &[
    "",
    "a",
    "hello",
    "hello, world",
    "one\ntwo\nthree\n",
    "the quick brown fox jumps over the lazy dog",
];

/// A rope assembled from many small inserts, so it is deeper than one
/// built in a single pass.
fn built_by_typing(text: &str) -> TextRope {
    let mut rope = TextRope::new();
    for (i, byte) in text.bytes().enumerate() {
        rope = rope.insert(i, [byte]).unwrap();
    }
    rope
}

#[test]
fn split_then_concat_is_lossless() {
    for text in SAMPLES {
        for rope in [TextRope::from(*text), built_by_typing(text)] {
            for i in 0..=text.len() {
                let (left, right) = rope.split(i).unwrap();
                assert_eq!(left.len(), i);
                assert_eq!(TextRope::concat(left, right).to_bytes(), text.as_bytes());
            }
        }
    }
}

#[test]
fn delete_undoes_insert() {
    for text in SAMPLES {
        let rope = TextRope::from(*text);
        for i in 0..=text.len() {
            for inserted in ["", "x", "\n", "a much longer run of inserted text"] {
                let grown = rope.insert(i, inserted).unwrap();
                assert_eq!(grown.len(), text.len() + inserted.len());
                let restored = grown.delete(i, i + inserted.len()).unwrap();
                assert_eq!(restored.to_bytes(), text.as_bytes());
            }
        }
    }
}

#[test]
fn index_agrees_with_substring() {
    for text in SAMPLES {
        let rope = built_by_typing(text);
        for i in 0..text.len() {
            let byte = rope.index(i).unwrap();
            assert_eq!(byte, text.as_bytes()[i]);
            assert_eq!(rope.substring(i, i + 1).unwrap(), vec![byte]);
        }
        assert!(matches!(
            rope.index(text.len()),
            Err(RopeError::OutOfRange { .. })
        ));
    }
}

#[test]
fn split_at_the_ends() {
    let rope = TextRope::from("boundary");
    let (left, right) = rope.split(0).unwrap();
    assert!(left.is_empty());
    assert_eq!(right, rope);

    let (left, right) = rope.split(rope.len()).unwrap();
    assert_eq!(left, rope);
    assert!(right.is_empty());

    assert!(matches!(
        rope.split(rope.len() + 1),
        Err(RopeError::OutOfRange { .. })
    ));
}

#[test]
fn empty_delete_is_identity() {
    let rope = TextRope::from("boundary");
    for k in 0..=rope.len() {
        assert_eq!(rope.delete(k, k).unwrap(), rope);
    }
}

#[test]
fn invalid_ranges_are_rejected() {
    let rope = TextRope::from("abc");
    assert!(matches!(
        rope.delete(2, 1),
        Err(RopeError::InvalidRange { .. })
    ));
    assert!(matches!(
        rope.substring(0, 4),
        Err(RopeError::InvalidRange { .. })
    ));
    assert!(matches!(
        rope.insert(4, "x"),
        Err(RopeError::OutOfRange { .. })
    ));
}

#[test]
fn edits_leave_the_original_untouched() {
    let original = TextRope::from("hello");
    let edited = original.insert(0, "X").unwrap();
    assert_eq!(edited.to_string(), "Xhello");
    assert_eq!(edited.len(), 6);
    assert_eq!(original.to_string(), "hello");

    let trimmed = edited.delete(1, 3).unwrap();
    assert_eq!(trimmed.to_string(), "Xllo");
    assert_eq!(edited.to_string(), "Xhello");
}

#[test]
fn rebalance_keeps_content_and_flattens() {
    let text = "abcdefghijklmnopqrstuvwxyz".repeat(8);
    let deep = built_by_typing(&text);
    let balanced = deep.rebalance();
    assert_eq!(balanced.to_bytes(), text.as_bytes());
    assert!(balanced.depth() < deep.depth());
}
