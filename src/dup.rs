use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::rc::Rc;

/// How the rollback variants duplicate a captured value.
///
/// Both flags false (the default) keeps the probed value as-is; for shared
/// handles such as `Rc<RefCell<T>>` that means the snapshot aliases the
/// live value and in-place mutation during the scope is observed at
/// rollback. `copy` saves a top-level duplicate, `deepcopy` a recursively
/// independent one. `deepcopy` wins when both are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyOptions {
    pub copy: bool,
    pub deepcopy: bool,
}

impl CopyOptions {
    pub const fn shallow() -> Self {
        CopyOptions {
            copy: true,
            deepcopy: false,
        }
    }

    pub const fn deep() -> Self {
        CopyOptions {
            copy: false,
            deepcopy: true,
        }
    }

    pub(crate) fn apply<V: Duplicate>(self, value: V) -> V {
        if self.deepcopy {
            value.deep()
        } else if self.copy {
            value.shallow()
        } else {
            value
        }
    }
}

/// Values that can be duplicated at two depths.
///
/// `shallow` produces a top-level duplicate that may still share nested
/// structure; `deep` produces a fully independent one. For plain owned
/// values the two coincide with `clone`, which the default methods
/// provide; only alias types (`Rc<RefCell<T>>`) and containers of them
/// need real implementations.
pub trait Duplicate: Clone {
    fn shallow(&self) -> Self {
        self.clone()
    }

    fn deep(&self) -> Self {
        self.clone()
    }
}

macro_rules! leaf_duplicate {
    ($($ty:ty),* $(,)?) => {
        $(impl Duplicate for $ty {})*
    };
}

leaf_duplicate!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    std::path::PathBuf,
    std::ffi::OsString,
);

impl Duplicate for &str {}

impl<T: Duplicate> Duplicate for Option<T> {
    fn deep(&self) -> Self {
        self.as_ref().map(Duplicate::deep)
    }
}

impl<T: Duplicate> Duplicate for Box<T> {
    fn deep(&self) -> Self {
        Box::new((**self).deep())
    }
}

impl<T: Duplicate> Duplicate for Vec<T> {
    fn deep(&self) -> Self {
        self.iter().map(Duplicate::deep).collect()
    }
}

impl<K: Clone + Eq + Hash, V: Duplicate> Duplicate for HashMap<K, V> {
    fn deep(&self) -> Self {
        self.iter().map(|(k, v)| (k.clone(), v.deep())).collect()
    }
}

impl<K: Clone + Ord, V: Duplicate> Duplicate for BTreeMap<K, V> {
    fn deep(&self) -> Self {
        self.iter().map(|(k, v)| (k.clone(), v.deep())).collect()
    }
}

impl<K: Clone + Eq + Hash, V: Duplicate> Duplicate for IndexMap<K, V> {
    fn deep(&self) -> Self {
        self.iter().map(|(k, v)| (k.clone(), v.deep())).collect()
    }
}

impl<T: Duplicate> Duplicate for Rc<RefCell<T>> {
    fn shallow(&self) -> Self {
        Rc::new(RefCell::new(self.borrow().clone()))
    }

    fn deep(&self) -> Self {
        Rc::new(RefCell::new(self.borrow().deep()))
    }
}
