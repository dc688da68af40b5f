use std::fmt::Debug;
use std::hash::Hash;

/// The identity + equality contract for anything that can be diffed.
///
/// `identity()` must be stable across the old and new snapshots of the same
/// logical element, independent of its position or content. `is_equal()`
/// compares content only and is consulted exclusively for elements that
/// share an identity: a `false` answer marks the element as updated, never
/// as moved.
///
/// Identities should be unique within one snapshot. Duplicates are tolerated
/// but matched by occurrence order, so they cannot be tracked individually.
pub trait Diffable {
    /// The key used to match elements across snapshots.
    type Identity: Hash + Eq + Ord + Clone + Debug;

    /// The stable identity of this element.
    fn identity(&self) -> Self::Identity;

    /// Content equality against another element with the same identity.
    fn is_equal(&self, other: &Self) -> bool;
}

impl<T: Diffable + ?Sized> Diffable for &T {
    type Identity = T::Identity;

    fn identity(&self) -> Self::Identity {
        (**self).identity()
    }

    fn is_equal(&self, other: &Self) -> bool {
        (**self).is_equal(*other)
    }
}

impl Diffable for str {
    type Identity = String;

    fn identity(&self) -> String {
        self.to_owned()
    }

    fn is_equal(&self, other: &Self) -> bool {
        self == other
    }
}

/// Values that are their own identity: two equal values are the same element
/// with the same content.
macro_rules! self_identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Diffable for $ty {
                type Identity = $ty;

                fn identity(&self) -> $ty {
                    self.clone()
                }

                fn is_equal(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

self_identified!(
    String, char, bool, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize,
);
