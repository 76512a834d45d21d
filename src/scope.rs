use crate::dup::{CopyOptions, Duplicate};
use crate::slot::{Slot, Snapshot};

/// Run `f` with `slot` lent to it, restoring the slot's prior state when
/// `f` returns or panics.
///
/// The slot is captured on entry and not otherwise touched; `f` may mutate
/// it arbitrarily, including clearing it. On exit a previously present
/// value is written back and a previously absent slot is cleared.
pub fn rollback<S, R>(slot: &mut S, f: impl FnOnce(&mut S) -> R) -> R
where
    S: Slot + ?Sized,
{
    let saved = Snapshot::capture(slot);
    run_restoring(slot, saved, f)
}

/// Like [`rollback`], duplicating the captured value per `opts`.
///
/// With the default options the snapshot keeps the probed value as-is, so
/// for shared handles later in-place mutation shows up in what gets
/// restored; `opts.copy` saves a top-level duplicate and `opts.deepcopy` a
/// fully independent one.
pub fn rollback_with<S, R>(slot: &mut S, opts: CopyOptions, f: impl FnOnce(&mut S) -> R) -> R
where
    S: Slot + ?Sized,
    S::Value: Duplicate,
{
    let saved = match Snapshot::capture(slot) {
        Snapshot::Present(value) => Snapshot::Present(opts.apply(value)),
        Snapshot::Absent => Snapshot::Absent,
    };
    run_restoring(slot, saved, f)
}

/// Set `slot` to `value` for the duration of `f`, then restore whatever was
/// there before, present or absent.
pub fn set<S, R>(slot: &mut S, value: S::Value, f: impl FnOnce(&mut S) -> R) -> R
where
    S: Slot + ?Sized,
{
    let saved = Snapshot::capture(slot);
    slot.write(value);
    run_restoring(slot, saved, f)
}

/// Clear `slot` for the duration of `f`, then restore whatever was there
/// before. Clearing an already-absent slot is a no-op.
pub fn unset<S, R>(slot: &mut S, f: impl FnOnce(&mut S) -> R) -> R
where
    S: Slot + ?Sized,
{
    let saved = Snapshot::capture(slot);
    slot.clear();
    run_restoring(slot, saved, f)
}

fn run_restoring<S, R>(slot: &mut S, saved: Snapshot<S::Value>, f: impl FnOnce(&mut S) -> R) -> R
where
    S: Slot + ?Sized,
{
    let mut guard = Restore {
        slot,
        saved: Some(saved),
    };
    f(&mut *guard.slot)
}

/// Applies the snapshot on drop, so restoration also runs while unwinding
/// out of the caller's closure.
struct Restore<'a, S: Slot + ?Sized> {
    slot: &'a mut S,
    saved: Option<Snapshot<S::Value>>,
}

impl<S: Slot + ?Sized> Drop for Restore<'_, S> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            saved.restore(self.slot);
        }
    }
}
