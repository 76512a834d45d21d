//! Scoped changes to environment variables.
//!
//! Like the working directory, the environment is process-wide, so these
//! helpers hand out drop guards. The guard records whether the variable
//! was set (and to what) at construction and puts that state back on drop:
//! a previously set variable is re-set to its old value, a previously
//! unset one is removed again.
//!
//! Values are handled as `OsString`, so non-UTF-8 contents survive the
//! round trip.
//!
//! Not thread-safe: `set_var`/`remove_var` mutate process-global state,
//! which is why they are unsafe on modern toolchains. Callers running
//! threads that read or write the environment must serialize around the
//! whole scope, guard construction and drop included.

use std::env;
use std::ffi::{OsStr, OsString};

/// Restores one environment variable's recorded state on drop.
#[derive(Debug)]
pub struct EnvGuard {
    name: OsString,
    prev: Option<OsString>,
}

impl EnvGuard {
    /// The variable this guard watches.
    pub fn name(&self) -> &OsStr {
        &self.name
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.prev {
            Some(value) => unsafe { env::set_var(&self.name, value) },
            None => unsafe { env::remove_var(&self.name) },
        }
    }
}

/// Set `name` to `value` until the returned guard drops.
pub fn set(name: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> EnvGuard {
    let guard = rollback(name);
    unsafe { env::set_var(&guard.name, value) };
    guard
}

/// Unset `name` until the returned guard drops. Already-unset variables
/// are left alone on entry and stay unset after.
pub fn unset(name: impl AsRef<OsStr>) -> EnvGuard {
    let guard = rollback(name);
    unsafe { env::remove_var(&guard.name) };
    guard
}

/// Record the state of `name` without touching it, restoring that state
/// when the returned guard drops.
pub fn rollback(name: impl AsRef<OsStr>) -> EnvGuard {
    let name = name.as_ref().to_os_string();
    let prev = env::var_os(&name);
    EnvGuard { name, prev }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // The environment is process-global and the test harness runs tests
    // concurrently; each test also uses its own variable name.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn get(name: &str) -> Option<OsString> {
        env::var_os(name)
    }

    #[test]
    fn set_restores_prior_value() {
        let _lock = ENV_LOCK.lock().unwrap();
        let name = "SETBACK_TEST_SET";
        let _outer = set(name, "foo");
        {
            let _guard = set(name, "bar");
            assert_eq!(get(name), Some("bar".into()));
        }
        assert_eq!(get(name), Some("foo".into()));
    }

    #[test]
    fn set_restores_after_inner_mutation() {
        let _lock = ENV_LOCK.lock().unwrap();
        let name = "SETBACK_TEST_SET_MUT";
        let _outer = set(name, "foo");
        {
            let _guard = set(name, "bar");
            unsafe { env::set_var(name, "quux") };
        }
        assert_eq!(get(name), Some("foo".into()));

        {
            let _guard = set(name, "bar");
            unsafe { env::remove_var(name) };
        }
        assert_eq!(get(name), Some("foo".into()));
    }

    #[test]
    fn set_on_unset_variable_unsets_after() {
        let _lock = ENV_LOCK.lock().unwrap();
        let name = "SETBACK_TEST_SET_UNSET";
        let _outer = unset(name);
        {
            let _guard = set(name, "bar");
            assert_eq!(get(name), Some("bar".into()));
        }
        assert_eq!(get(name), None);

        {
            let _guard = set(name, "bar");
            unsafe { env::set_var(name, "quux") };
        }
        assert_eq!(get(name), None);
    }

    #[test]
    fn unset_restores_prior_value() {
        let _lock = ENV_LOCK.lock().unwrap();
        let name = "SETBACK_TEST_UNSET";
        let _outer = set(name, "foo");
        {
            let _guard = unset(name);
            assert_eq!(get(name), None);
        }
        assert_eq!(get(name), Some("foo".into()));

        {
            let _guard = unset(name);
            unsafe { env::set_var(name, "quux") };
        }
        assert_eq!(get(name), Some("foo".into()));
    }

    #[test]
    fn unset_on_unset_variable_is_noop() {
        let _lock = ENV_LOCK.lock().unwrap();
        let name = "SETBACK_TEST_UNSET_NOOP";
        let _outer = unset(name);
        {
            let _guard = unset(name);
            assert_eq!(get(name), None);
            unsafe { env::set_var(name, "quux") };
        }
        assert_eq!(get(name), None);
    }

    #[test]
    fn rollback_undoes_whatever_happened() {
        let _lock = ENV_LOCK.lock().unwrap();
        let name = "SETBACK_TEST_ROLLBACK";
        let _outer = set(name, "foo");
        {
            let _guard = rollback(name);
            unsafe { env::remove_var(name) };
        }
        assert_eq!(get(name), Some("foo".into()));

        let _outer = unset(name);
        {
            let _guard = rollback(name);
            unsafe { env::set_var(name, "quux") };
        }
        assert_eq!(get(name), None);
    }

    #[test]
    fn nested_guards_restore_in_lifo_order() {
        let _lock = ENV_LOCK.lock().unwrap();
        let name = "SETBACK_TEST_NESTED";
        let _outer = set(name, "a");
        {
            let _mid = set(name, "b");
            {
                let _inner = set(name, "c");
                assert_eq!(get(name), Some("c".into()));
            }
            assert_eq!(get(name), Some("b".into()));
        }
        assert_eq!(get(name), Some("a".into()));
    }
}
