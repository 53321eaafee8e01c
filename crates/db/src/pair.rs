//! Canonical unordered pair of user ids.

/// Two users related by an undirected relationship.
///
/// `UserPair::new(a, b) == UserPair::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserPair {
    low: i32,
    high: i32,
}

impl UserPair {
    /// Create a pair from two ids in any order.
    #[must_use]
    pub const fn new(a: i32, b: i32) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The side of the pair opposite `user_id`, if `user_id` is part of it.
    #[must_use]
    pub const fn other(&self, user_id: i32) -> Option<i32> {
        if self.low == user_id {
            Some(self.high)
        } else if self.high == user_id {
            Some(self.low)
        } else {
            None
        }
    }
}
