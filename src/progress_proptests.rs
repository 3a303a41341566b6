use super::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Begin(usize),
    Advance,
    Reset,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..20).prop_map(Op::Begin),
        Just(Op::Advance),
        Just(Op::Reset),
    ]
}

proptest! {
    /// どんな操作列でも completed <= total が保たれる
    #[test]
    fn prop_completed_never_exceeds_total(ops in proptest::collection::vec(op_strategy(), 0..50)) {
        let mut tracker = ProgressTracker::new();
        for op in ops {
            match op {
                Op::Begin(n) => tracker.begin(n),
                Op::Advance => tracker.advance(),
                Op::Reset => tracker.reset(),
            }
            prop_assert!(tracker.completed_files() <= tracker.total_files());
        }
    }

    /// begin 直後は total = ingredients + 2, completed = 1
    #[test]
    fn prop_begin_accounting(n in 0usize..1000) {
        let mut tracker = ProgressTracker::new();
        tracker.begin(n);
        prop_assert_eq!(tracker.total_files(), n + 2);
        prop_assert_eq!(tracker.completed_files(), 1);
    }

    /// reset 後は常にゼロの Idle 状態
    #[test]
    fn prop_reset_is_total(ops in proptest::collection::vec(op_strategy(), 0..30)) {
        let mut tracker = ProgressTracker::new();
        for op in ops {
            match op {
                Op::Begin(n) => tracker.begin(n),
                Op::Advance => tracker.advance(),
                Op::Reset => tracker.reset(),
            }
        }
        tracker.reset();
        let snapshot = tracker.snapshot();
        prop_assert!(!snapshot.sync_started);
        prop_assert_eq!(snapshot.total_files, 0);
        prop_assert_eq!(snapshot.completed_files, 0);
    }
}
