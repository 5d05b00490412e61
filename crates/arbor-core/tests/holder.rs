use arbor_core::{Blackboard, Release, MOVEMENT_HOLDER};

#[derive(Debug, Default)]
struct NavPath {
    resets: u32,
}

#[test]
fn stale_controller_leaves_resource_to_newer_one() {
    let mut bb = Blackboard::new();
    let mut path = NavPath::default();

    let a = MOVEMENT_HOLDER.acquire(&mut bb);
    assert_eq!(a.epoch(), 1);

    let b = MOVEMENT_HOLDER.acquire(&mut bb);
    assert_eq!(b.epoch(), 2);

    let released = a.release(&bb, || path.resets += 1);
    assert_eq!(released, Release::Superseded { current: 2 });
    assert_eq!(path.resets, 0);

    let released = b.release(&bb, || path.resets += 1);
    assert_eq!(released, Release::Released);
    assert_eq!(path.resets, 1);
}

#[test]
fn repeated_releases_of_a_current_token_are_idempotent_on_the_epoch() {
    let mut bb = Blackboard::new();
    let token = MOVEMENT_HOLDER.acquire(&mut bb);

    assert_eq!(token.release(&bb, || {}), Release::Released);
    assert_eq!(MOVEMENT_HOLDER.current(&bb), 1);
    assert!(token.is_current(&bb));
}

#[test]
fn clearing_the_blackboard_resets_the_epoch() {
    let mut bb = Blackboard::new();
    let token = MOVEMENT_HOLDER.acquire(&mut bb);
    bb.clear();

    assert_eq!(MOVEMENT_HOLDER.current(&bb), 0);
    assert!(!token.is_current(&bb));
}
