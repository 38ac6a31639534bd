use super::*;

const TEXT: &str = "Hello to this beaufitul world!";
const CHUNK: usize = 15;

fn rope() -> Rope {
    Rope::with_chunk_size(TEXT.as_bytes(), CHUNK)
}

#[test]
fn build_splits_at_midpoint() {
    let rope = rope();

    match rope.root.as_ref() {
        Node::Internal { left, right: Some(right), weight } => {
            assert_eq!(*weight, CHUNK);
            let leaf = |node: &Node| match node {
                Node::Leaf(chunk) => chunk.as_bytes().to_vec(),
                other => panic!("expected a leaf, got {:?}", other),
            };

            assert_eq!(leaf(left.as_ref()), &TEXT.as_bytes()[..CHUNK]);
            assert_eq!(leaf(right.as_ref()), &TEXT.as_bytes()[CHUNK..]);
        }
        other => panic!("expected an internal root, got {:?}", other),
    }
}

#[test]
fn build_leaves_share_one_allocation() {
    let rope = Rope::with_chunk_size(TEXT.as_bytes(), 4);

    let mut chunks = Vec::new();
    collect_chunks(&rope.root, &mut chunks);

    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|chunk| chunk.shares_storage(&chunks[0])));
}

fn collect_chunks(node: &Node, chunks: &mut Vec<Chunk>) {
    match node {
        Node::Leaf(chunk) => chunks.push(chunk.clone()),
        Node::Internal { left, right, .. } => {
            collect_chunks(left, chunks);
            if let Some(right) = right {
                collect_chunks(right, chunks);
            }
        }
    }
}

#[test]
fn empty_input_is_single_empty_leaf() {
    let rope = Rope::new(Vec::<u8>::new());

    assert!(rope.is_empty());
    assert_eq!(
        rope.stats(),
        RopeStats {
            len: 0,
            nodes: 1,
            leaves: 1,
            depth: 0,
        }
    );
    assert_eq!(rope.to_bytes(), b"");
}

#[test]
fn zero_chunk_size_still_terminates() {
    let rope = Rope::with_chunk_size(TEXT.as_bytes(), 0);

    assert_eq!(rope.stats().leaves, TEXT.len());
    assert_eq!(rope, TEXT);
}

#[test]
fn auto_chunk_size() {
    assert_eq!(ChunkSize::Auto.resolve(0), 5);
    assert_eq!(ChunkSize::Auto.resolve(99), 5);
    assert_eq!(ChunkSize::Auto.resolve(2000), 100);
    assert_eq!(ChunkSize::Fixed(0).resolve(10), 1);
    assert_eq!(ChunkSize::Fixed(7).resolve(10), 7);
}

#[test]
fn parse_chunk_size() {
    assert_eq!("auto".parse::<ChunkSize>(), Ok(ChunkSize::Auto));
    assert_eq!(" 64 ".parse::<ChunkSize>(), Ok(ChunkSize::Fixed(64)));
    assert!("sixty".parse::<ChunkSize>().is_err());
}

#[test]
fn materialize_hand_built_nodes() {
    let texts = ["Hello world", "", "7_7.7__7  && 777"];

    for text in texts {
        let rope = Rope::from_root(Node::new_leaf(Chunk::new(text.as_bytes().into())));
        assert_eq!(rope.to_string(), text);
    }
}

#[test]
fn at_every_position() {
    let rope = rope();

    for (pos, byte) in TEXT.bytes().enumerate() {
        assert_eq!(rope.at(pos), Ok(byte));
    }
}

#[test]
fn at_past_end_fails() {
    let rope = rope();

    let past_end = RopeError::IndexOutOfBounds {
        index: TEXT.len(),
        len: TEXT.len(),
    };

    assert_eq!(rope.at(TEXT.len()), Err(past_end));
    assert_eq!(position(-1), Err(RopeError::NegativeIndex(-1)));
    assert_eq!(position(3), Ok(3));
}

#[test]
fn len_for_several_chunk_sizes() {
    assert_eq!(rope().len(), TEXT.len());
    assert_eq!(Rope::with_chunk_size(TEXT.as_bytes(), 2).len(), TEXT.len());
}

#[test]
fn concat_leaves_operands_alone() {
    let left = Rope::with_chunk_size(&TEXT.as_bytes()[..CHUNK], CHUNK / 2);
    let right = Rope::with_chunk_size(&TEXT.as_bytes()[CHUNK..], CHUNK / 2);

    let joined = left.concat(&right);

    assert_eq!(left, &TEXT[..CHUNK]);
    assert_eq!(right, &TEXT[CHUNK..]);
    assert_eq!(joined, TEXT);
    assert!(joined.is_consistent());
}

#[test]
fn concat_with_nothing_is_identity() {
    let rope = rope();
    let same = rope.concat_all([]);

    assert!(Rc::ptr_eq(&rope.root, &same.root));
}

#[test]
fn split_result_survives_split_of_operand() {
    let mut left = Rope::with_chunk_size(&TEXT.as_bytes()[..CHUNK], 4);
    let right = Rope::with_chunk_size(&TEXT.as_bytes()[CHUNK..], 4);

    let joined = left.concat(&right);
    let tail = left.split(6).unwrap();

    assert_eq!(left, &TEXT[..6]);
    assert_eq!(tail, &TEXT[6..CHUNK]);
    assert_eq!(joined, TEXT);
    assert!(joined.is_consistent());
}

#[test]
fn split_of_concat_result_leaves_operands_alone() {
    let left = Rope::with_chunk_size(&TEXT.as_bytes()[..CHUNK], 4);
    let right = Rope::with_chunk_size(&TEXT.as_bytes()[CHUNK..], 4);

    let mut joined = left.concat(&right);
    let tail = joined.split(20).unwrap();

    assert_eq!(joined, &TEXT[..20]);
    assert_eq!(tail, &TEXT[20..]);
    assert_eq!(left, &TEXT[..CHUNK]);
    assert_eq!(right, &TEXT[CHUNK..]);
}

#[test]
fn split_every_position() {
    for pos in 0..=TEXT.len() {
        let mut left = rope().clone_with(ChunkSize::Fixed(CHUNK));
        let right = left.split(pos).unwrap();

        assert_eq!(left, &TEXT[..pos], "left part at {}", pos);
        assert_eq!(right, &TEXT[pos..], "right part at {}", pos);
        assert!(left.is_consistent() && right.is_consistent());
    }
}

#[test]
fn split_keeps_weights_in_step() {
    let mut left = rope();
    let right = left.split(10).unwrap();

    assert_eq!(left.len(), 10);
    for (pos, byte) in TEXT[..10].bytes().enumerate() {
        assert_eq!(left.at(pos), Ok(byte));
    }
    for (pos, byte) in TEXT[10..].bytes().enumerate() {
        assert_eq!(right.at(pos), Ok(byte));
    }
}

#[test]
fn split_past_end_is_rejected() {
    let mut rope = rope();

    let past_end = RopeError::InvalidPosition {
        pos: TEXT.len() + 1,
        len: TEXT.len(),
    };

    assert_eq!(rope.split(TEXT.len() + 1).unwrap_err(), past_end);
    assert_eq!(rope, TEXT);
}

#[test]
fn split_at_ends() {
    let mut rope = rope();
    let everything = rope.split(0).unwrap();
    assert!(rope.is_empty());
    assert_eq!(everything, TEXT);

    let mut rope = self::rope();
    let nothing = rope.split(TEXT.len()).unwrap();
    assert!(nothing.is_empty());
    assert_eq!(rope, TEXT);
}

#[test]
fn insert_banana() {
    let mut rope = rope();
    rope.insert(10, b"Banana!").unwrap();
    assert_eq!(rope, "Hello to tBanana!his beaufitul world!");

    let mut rope = self::rope();
    rope.insert(11, b"Banana!").unwrap();
    assert_eq!(rope, "Hello to thBanana!is beaufitul world!");
}

#[test]
fn insert_every_position() {
    let banana = "Banana!";

    for pos in 0..=TEXT.len() {
        let mut rope = rope().clone_with(ChunkSize::Fixed(CHUNK));
        rope.insert(pos, banana.as_bytes()).unwrap();

        let want = format!("{}{}{}", &TEXT[..pos], banana, &TEXT[pos..]);
        assert_eq!(rope, want.as_str());
        assert!(rope.is_consistent());
    }
}

#[test]
fn insert_past_end_leaves_rope_alone() {
    let mut rope = rope();

    let past_end = RopeError::InvalidPosition {
        pos: TEXT.len() + 1,
        len: TEXT.len(),
    };

    assert_eq!(rope.insert(TEXT.len() + 1, b"x"), Err(past_end));
    assert_eq!(rope, TEXT);
}

#[test]
fn delete_every_position() {
    for n in [0, 1, 2, 3] {
        for pos in 0..=TEXT.len() {
            let mut rope = rope().clone_with(ChunkSize::Fixed(CHUNK));
            rope.delete(pos, n).unwrap();

            let want = format!("{}{}", &TEXT[..pos], &TEXT[(pos + n).min(TEXT.len())..]);
            assert_eq!(rope, want.as_str());
            assert!(rope.is_consistent());
        }
    }
}

#[test]
fn delete_clamps_span() {
    let mut rope = rope();
    rope.delete(6, 1000).unwrap();

    assert_eq!(rope, "Hello ");
}

#[test]
fn delete_past_end_is_rejected() {
    let mut rope = rope();

    assert!(rope.delete(TEXT.len() + 1, 1).is_err());
    assert_eq!(rope, TEXT);
}

#[test]
fn deep_clone_shares_nothing() {
    let rope = rope();
    let clone = rope.clone_with(ChunkSize::Fixed(CHUNK));

    assert!(!Rc::ptr_eq(&rope.root, &clone.root));
    assert_eq!(clone, rope);

    let mut rope_chunks = Vec::new();
    let mut clone_chunks = Vec::new();
    collect_chunks(&rope.root, &mut rope_chunks);
    collect_chunks(&clone.root, &mut clone_chunks);
    assert!(!rope_chunks[0].shares_storage(&clone_chunks[0]));
}

#[test]
fn shallow_copy_shares_children() {
    let rope = rope();
    let copy = rope.shallow_copy();

    assert!(!Rc::ptr_eq(&rope.root, &copy.root));
    match (rope.root.as_ref(), copy.root.as_ref()) {
        (Node::Internal { left: a, .. }, Node::Internal { left: b, .. }) => {
            assert!(Rc::ptr_eq(a, b))
        }
        _ => panic!("expected internal roots"),
    }
}

#[test]
fn stats_and_walk() {
    let rope = rope();

    let stats = RopeStats {
        len: TEXT.len(),
        nodes: 3,
        leaves: 2,
        depth: 1,
    };
    assert_eq!(rope.stats(), stats);

    let root = NodeKind::Internal {
        weight: CHUNK,
        has_right: true,
    };
    let kinds = rope.walk().collect::<Vec<_>>();
    assert_eq!(kinds[0], (0, root));
    assert_eq!(kinds[1], (1, NodeKind::Leaf(&TEXT.as_bytes()[..CHUNK])));
    assert_eq!(kinds[2], (1, NodeKind::Leaf(&TEXT.as_bytes()[CHUNK..])));
}

#[test]
fn display_and_debug() {
    let rope = Rope::from("ab\u{e9}");

    assert_eq!(rope.to_string(), "ab\u{e9}");
    assert_eq!(
        format!("{:?}", Rope::with_chunk_size(&b"abcd"[..], 2)),
        r#"Rope { len: 4, leaves: ["ab", "cd"] }"#
    );
}

#[test]
fn long_typing_session() {
    const KEYSTROKES: usize = 200_000;

    let mut rope = Rope::default();
    for _ in 0..KEYSTROKES {
        rope.insert(rope.len(), b"x").unwrap();
    }

    assert_eq!(rope.len(), KEYSTROKES);
    assert_eq!(rope.at(0), Ok(b'x'));
    assert_eq!(rope.at(KEYSTROKES - 1), Ok(b'x'));
    assert!(rope.to_bytes().iter().all(|&byte| byte == b'x'));
    assert!(rope.is_consistent());
    assert!(rope.stats().depth >= KEYSTROKES);

    let snapshot = rope.clone();
    rope.insert(1, b"y").unwrap();
    rope.delete(KEYSTROKES / 2, 10).unwrap();

    assert_eq!(rope.at(1), Ok(b'y'));
    assert_eq!(rope.len(), KEYSTROKES + 1 - 10);
    drop(rope);

    assert_eq!(snapshot.at(1), Ok(b'x'));
    assert_eq!(snapshot.len(), KEYSTROKES);
}
