//! Property-based tests for dispatch and history.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated machines and event sequences.

use proptest::prelude::*;
use statenest::{Handler, State, StateMachine, StateMachineBuilder};
use std::cell::RefCell;
use std::rc::Rc;

/// `len` states named `S0..`, each moving to the next on "tick".
fn ring(len: usize) -> Vec<State> {
    (0..len)
        .map(|ix| {
            State::builder(format!("S{ix}"))
                .on("tick", Handler::to(format!("S{}", (ix + 1) % len)))
                .build()
        })
        .collect()
}

proptest! {
    #[test]
    fn ring_position_matches_tick_count(len in 1..8usize, ticks in 0..40usize) {
        let machine = StateMachine::new(ring(len)).unwrap();
        machine.init(None);

        for _ in 0..ticks {
            machine.emit("tick", ());
        }

        let expected = format!("S{}", ticks % len);
        prop_assert_eq!(machine.current_id(), Some(expected.as_str()));
    }

    #[test]
    fn first_accepting_guard_wins(verdicts in prop::collection::vec(any::<bool>(), 1..8)) {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let handlers: Vec<Handler<()>> = verdicts
            .iter()
            .enumerate()
            .map(|(ix, &accept)| {
                let fired = Rc::clone(&fired);
                Handler::to(format!("T{ix}"))
                    .when(move |_| accept)
                    .then(move |_| fired.borrow_mut().push(ix))
            })
            .collect();

        let mut states = vec![State::builder("A").on("go", handlers).build()];
        states.extend((0..verdicts.len()).map(|ix| State::leaf(format!("T{ix}"))));
        let machine = StateMachine::new(states).unwrap();
        machine.init(None);

        let handled = machine.dispatch("go", &());

        match verdicts.iter().position(|&accept| accept) {
            Some(winner) => {
                let expected = format!("T{winner}");
                prop_assert!(handled);
                prop_assert_eq!(machine.current_id(), Some(expected.as_str()));
                prop_assert_eq!(fired.borrow().clone(), vec![winner]);
            }
            None => {
                prop_assert!(!handled);
                prop_assert_eq!(machine.current_id(), Some("A"));
                prop_assert!(fired.borrow().is_empty());
                prop_assert_eq!(machine.history().len(), 1);
            }
        }
    }

    #[test]
    fn history_is_bounded_by_limit(limit in 0..10usize, ticks in 0..30usize) {
        let machine = StateMachineBuilder::new()
            .history_limit(limit)
            .states(ring(3))
            .build()
            .unwrap();
        machine.init(None);

        for _ in 0..ticks {
            machine.emit("tick", ());
        }

        let history = machine.history();
        prop_assert_eq!(history.len(), limit.min(ticks + 1));
        prop_assert_eq!(history.limit(), limit);
        if !history.is_empty() {
            prop_assert_eq!(history.get_path().len(), history.len() + 1);
        }
    }

    #[test]
    fn queued_emits_keep_fifo_order(count in 1..10usize) {
        let mut states = vec![State::builder("Start")
            .on(
                "go",
                Handler::to("S0").then(move |ctx| {
                    for ix in 0..count {
                        ctx.emit(format!("e{ix}"), ());
                    }
                }),
            )
            .build()];
        states.extend((0..=count).map(|ix| {
            State::builder(format!("S{ix}"))
                .on(format!("e{ix}"), Handler::to(format!("S{}", ix + 1)))
                .build()
        }));
        states.push(State::leaf(format!("S{}", count + 1)));

        let machine: StateMachine = StateMachine::new(states).unwrap();
        machine.init(None);
        machine.emit("go", ());

        let expected = format!("S{count}");
        prop_assert_eq!(machine.current_id(), Some(expected.as_str()));
        prop_assert_eq!(machine.pending_events(), 0);

        let events: Vec<String> = machine
            .history()
            .transitions()
            .iter()
            .filter_map(|t| t.event.clone())
            .collect();
        let mut expected_events = vec!["go".to_string()];
        expected_events.extend((0..count).map(|ix| format!("e{ix}")));
        prop_assert_eq!(events, expected_events);
    }

    #[test]
    fn every_parallel_region_sees_every_event(regions in 1..6usize, ticks in 0..12usize) {
        let children: Vec<StateMachine> = (0..regions)
            .map(|_| StateMachine::new(ring(2)).unwrap())
            .collect();
        let machine = StateMachine::new(vec![State::builder("Split")
            .parallel(children.clone())
            .build()])
        .unwrap();
        machine.init(None);

        for _ in 0..ticks {
            machine.emit("tick", ());
        }

        let expected = format!("S{}", ticks % 2);
        for child in &children {
            prop_assert_eq!(child.current_id(), Some(expected.as_str()));
        }
        prop_assert_eq!(machine.configuration().leaves().len(), regions);
        prop_assert_eq!(machine.current_id(), Some("Split"));
    }
}
