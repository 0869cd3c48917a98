// Cache module for local, TTL-scoped caching of API responses.
// Entries stay readable after expiry so screens can show stale data while refreshing.

pub mod clock;
pub mod keys;
pub mod store;

#[cfg(test)]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use keys::{CACHE_PREFIX, SCHEDULE_PREFIX, SCHEDULE_TODAY, USER_ME, ttl};
pub use store::{CacheEntry, CacheStats, CacheStore, ENTRY_VERSION};
