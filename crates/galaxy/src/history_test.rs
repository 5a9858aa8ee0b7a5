use std::cell::Cell;
use std::sync::Arc;
use std::thread;

use crate::history::{DEFAULT_LIMIT, History};

/// A source whose current value increases every time it is read
struct Counter(Cell<u32>);

impl Counter {
    fn new() -> Self {
        Counter(Cell::new(0))
    }

    fn next(&self) -> u32 {
        let value = self.0.get();
        self.0.set(value + 1);
        value
    }
}

fn counting_history(limit: usize) -> History<Counter, u32> {
    History::with_limit(Counter::next, limit)
}

#[test]
fn test_new_history_is_empty() {
    let history: History<Counter, u32> = History::new(Counter::next);

    assert!(history.is_empty());
    assert_eq!(history.limit(), DEFAULT_LIMIT);
    assert_eq!(history.latest(), None);
}

#[test]
fn test_keeps_values_in_sampling_order() {
    let source = Counter::new();
    let history = counting_history(5);

    for _ in 0..3 {
        history.add_current_value(&source);
    }

    assert_eq!(history.values(), vec![0, 1, 2]);
    assert_eq!(history.latest(), Some(2));
}

#[test]
fn test_keeps_last_limit_values() {
    let source = Counter::new();
    let history = counting_history(4);

    for _ in 0..10 {
        history.add_current_value(&source);
    }

    assert_eq!(history.len(), 4);
    assert_eq!(history.values(), vec![6, 7, 8, 9]);
}

#[test]
fn test_lowering_limit_evicts_on_next_sample() {
    let source = Counter::new();
    let history = counting_history(10);

    for _ in 0..10 {
        history.add_current_value(&source);
    }

    history.set_limit(3);
    // Nothing is evicted until the next sample
    assert_eq!(history.len(), 10);
    assert_eq!(history.limit(), 3);

    history.add_current_value(&source);
    assert_eq!(history.values(), vec![8, 9, 10]);
}

#[test]
fn test_raising_limit_grows_history() {
    let source = Counter::new();
    let history = counting_history(2);

    for _ in 0..4 {
        history.add_current_value(&source);
    }
    assert_eq!(history.values(), vec![2, 3]);

    history.set_limit(4);
    for _ in 0..3 {
        history.add_current_value(&source);
    }
    assert_eq!(history.values(), vec![3, 4, 5, 6]);
}

#[test]
fn test_zero_limit_stores_nothing() {
    let source = Counter::new();
    let history = counting_history(0);

    history.add_current_value(&source);
    assert!(history.is_empty());
}

#[test]
fn test_reader_follows_history() {
    let source = Counter::new();
    let history = counting_history(3);
    let reader = history.reader();

    assert!(reader.is_empty());

    for _ in 0..5 {
        history.add_current_value(&source);
    }

    assert_eq!(reader.values(), vec![2, 3, 4]);
    assert_eq!(reader.latest(), Some(4));
    assert_eq!(reader.limit(), 3);

    history.set_limit(7);
    assert_eq!(reader.clone().limit(), 7);
}

#[test]
fn test_reader_on_another_thread() {
    let history: Arc<History<u32, u32>> = Arc::new(History::with_limit(|v: &u32| *v, 50));
    let reader = history.reader();

    let writer = {
        let history = Arc::clone(&history);
        thread::spawn(move || {
            for i in 0..1000 {
                history.add_current_value(&i);
            }
        })
    };

    // Every observed sequence is contiguous and bounded, whatever the interleaving
    for _ in 0..100 {
        let values = reader.values();
        assert!(values.len() <= 50);
        assert!(values.windows(2).all(|w| w[1] == w[0] + 1));
    }

    writer.join().unwrap();
    assert_eq!(reader.len(), 50);
    assert_eq!(reader.latest(), Some(999));
}
