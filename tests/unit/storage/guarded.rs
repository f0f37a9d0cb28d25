use super::*;

#[test]
fn unlocked_write_commits_immediately() {
    let mut cell = GuardedCell::new(1);
    cell.write(2);
    assert_eq!(*cell.read(), 2);
    assert!(!cell.has_pending());
}

#[test]
fn locked_write_is_invisible_until_unlock_and_read() {
    let mut cell = GuardedCell::new(1);
    cell.lock();
    cell.write(2);
    assert_eq!(*cell.read(), 1);
    assert!(cell.has_pending());

    cell.unlock();
    // unlock alone does not flush
    assert_eq!(*cell.peek(), 1);
    assert_eq!(*cell.read(), 2);
    assert!(!cell.has_pending());
}

#[test]
fn locked_writes_are_last_write_wins() {
    let mut cell = GuardedCell::new("a");
    cell.lock();
    cell.write("b");
    cell.write("c");
    cell.unlock();
    assert_eq!(*cell.read(), "c");
}

#[test]
fn write_after_unlock_flushes_then_overwrites() {
    let mut cell = GuardedCell::new(vec![1]);
    cell.lock();
    cell.write(vec![2]);
    cell.unlock();
    cell.write(vec![3]);
    assert!(!cell.has_pending());
    assert_eq!(cell.read(), &vec![3]);
}

#[test]
fn pending_is_flushed_exactly_once() {
    let mut cell = GuardedCell::new(0);
    cell.lock();
    cell.write(5);
    cell.unlock();
    assert_eq!(*cell.read(), 5);
    *cell.read_mut() = 6;
    assert_eq!(*cell.read(), 6);
}

#[test]
fn into_inner_prefers_pending() {
    let mut cell = GuardedCell::new(1);
    cell.lock();
    cell.write(9);
    assert_eq!(cell.into_inner(), 9);
}
