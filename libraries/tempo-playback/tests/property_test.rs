//! Property-based tests for playback sessions
//!
//! Uses proptest to verify clock and ordering invariants across many
//! random sources and command sequences.

use proptest::prelude::*;
use tempo_core::{Collection, CollectionKind, Episode, MediaSource, Podcast, Song};
use tempo_playback::{resolver, Permutation, PlaybackConfig, PlaybackSession};

// ===== Helpers =====

fn arbitrary_durations() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..400, 1..12)
}

fn collection(durations: &[u64]) -> MediaSource {
    let tracks = durations
        .iter()
        .enumerate()
        .map(|(i, &d)| Song::new(format!("T{i}"), d))
        .collect();
    Collection::new("Random", CollectionKind::Playlist, tracks).into()
}

fn podcast(durations: &[u64]) -> MediaSource {
    let episodes = durations
        .iter()
        .enumerate()
        .map(|(i, &d)| Episode::new(format!("E{i}"), d))
        .collect();
    Podcast::new("Random", "host", episodes).into()
}

/// Operations a command feed can apply between clock ticks
#[derive(Debug, Clone)]
enum Op {
    Advance(u64),
    Next,
    Prev,
    Forward,
    Backward,
    Repeat,
    Shuffle(u64),
    PlayPause,
}

fn arbitrary_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        4 => (0u64..500).prop_map(Op::Advance),
        1 => Just(Op::Next),
        1 => Just(Op::Prev),
        1 => Just(Op::Forward),
        1 => Just(Op::Backward),
        1 => Just(Op::Repeat),
        1 => any::<u64>().prop_map(Op::Shuffle),
        1 => Just(Op::PlayPause),
    ];
    prop::collection::vec(op, 0..40)
}

fn apply(session: &mut PlaybackSession, now: &mut u64, op: &Op) {
    match *op {
        Op::Advance(delta) => {
            *now += delta;
            session.advance_time(*now).ok();
        }
        Op::Next => {
            session.next().ok();
        }
        Op::Prev => {
            session.prev().ok();
        }
        Op::Forward => {
            session.forward().ok();
        }
        Op::Backward => {
            session.backward().ok();
        }
        Op::Repeat => {
            session.cycle_repeat().ok();
        }
        Op::Shuffle(seed) => {
            session.toggle_shuffle(seed).ok();
        }
        Op::PlayPause => {
            session.toggle_play().ok();
        }
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: remaining + elapsed always equals the total duration
    #[test]
    fn remaining_plus_elapsed_is_total(
        durations in arbitrary_durations(),
        is_podcast in any::<bool>(),
        ops in arbitrary_ops(),
    ) {
        let source = if is_podcast { podcast(&durations) } else { collection(&durations) };
        let total: u64 = durations.iter().sum();

        let mut session = PlaybackSession::new("prop", PlaybackConfig::default());
        session.load(source, 0).unwrap();

        let mut now = 0;
        for op in &ops {
            apply(&mut session, &mut now, op);
            if !session.is_loaded() {
                break;
            }
            prop_assert_eq!(session.remaining() + session.elapsed_in_source(), total);
        }
    }

    /// Property: repeating sessions never leave the [0, total) window
    #[test]
    fn repeating_position_stays_in_range(
        durations in arbitrary_durations(),
        ops in arbitrary_ops(),
    ) {
        let total: u64 = durations.iter().sum();
        let mut session = PlaybackSession::new("prop", PlaybackConfig::default());
        session.load(collection(&durations), 0).unwrap();
        session.cycle_repeat().unwrap();

        let mut now = 0;
        for op in ops.iter().filter(|op| !matches!(op, Op::Repeat)) {
            apply(&mut session, &mut now, op);
            prop_assert!(session.is_loaded());
            prop_assert!(session.position() < total);
        }
    }

    /// Property: status is pure
    #[test]
    fn status_is_idempotent(
        durations in arbitrary_durations(),
        ops in arbitrary_ops(),
    ) {
        let mut session = PlaybackSession::new("prop", PlaybackConfig::default());
        session.load(collection(&durations), 0).unwrap();

        let mut now = 0;
        for op in &ops {
            apply(&mut session, &mut now, op);
            prop_assert_eq!(session.status(), session.status());
        }
    }

    /// Property: shuffle on then off restores position and current item
    #[test]
    fn shuffle_round_trip(
        durations in arbitrary_durations(),
        offset in 0u64..4000,
        seed in any::<u64>(),
    ) {
        let total: u64 = durations.iter().sum();
        let mut session = PlaybackSession::new("prop", PlaybackConfig::default());
        session.load(collection(&durations), 0).unwrap();
        session.advance_time(offset % total).unwrap();

        let position = session.position();
        let item = session.current_name();

        session.toggle_shuffle(seed).unwrap();
        prop_assert_eq!(session.current_name(), item.clone());

        session.toggle_shuffle(seed).unwrap();
        prop_assert_eq!(session.position(), position);
        prop_assert_eq!(session.current_name(), item);
    }

    /// Property: seeded permutations cover every index exactly once
    #[test]
    fn seeded_permutation_is_valid(len in 0usize..200, seed in any::<u64>()) {
        let order = Permutation::seeded(len, seed);
        let mut sorted = order.as_slice().to_vec();
        sorted.sort_unstable();

        prop_assert_eq!(sorted, (0..len).collect::<Vec<_>>());
        prop_assert_eq!(order, Permutation::seeded(len, seed));
    }

    /// Property: the resolved item always contains the position
    #[test]
    fn resolved_item_contains_position(
        durations in arbitrary_durations(),
        seed in any::<u64>(),
        position in 0u64..10_000,
    ) {
        let total: u64 = durations.iter().sum();
        let order = Permutation::seeded(durations.len(), seed);
        let resolved = resolver::resolve(&durations, order.as_slice(), position).unwrap();

        prop_assert_eq!(resolved.start + resolved.elapsed, position % total);
        prop_assert!(resolved.elapsed < resolved.duration);
        prop_assert_eq!(
            resolved.start,
            resolver::played_duration_before(&durations, order.as_slice(), resolved.order_index)
        );
    }
}
