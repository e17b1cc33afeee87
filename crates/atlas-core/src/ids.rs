//! Exchange id generation

use rand::Rng;

/// Exclusive upper bound for generated exchange ids
pub const MAX_EXCHANGE_ID: u32 = 10_000;

/// Source of per-invocation exchange ids
pub trait ExchangeIdGenerator: Send + Sync {
    /// Produce the next exchange id
    fn next_id(&self) -> u32;
}

/// Uniformly random ids in `0..MAX_EXCHANGE_ID`
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomExchangeIds;

impl ExchangeIdGenerator for RandomExchangeIds {
    fn next_id(&self) -> u32 {
        rand::rng().random_range(0..MAX_EXCHANGE_ID)
    }
}

/// Always returns the same id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedExchangeId(pub u32);

impl ExchangeIdGenerator for FixedExchangeId {
    fn next_id(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_in_range() {
        let ids = RandomExchangeIds;
        for _ in 0..1_000 {
            assert!(ids.next_id() < MAX_EXCHANGE_ID);
        }
    }

    #[test]
    fn test_fixed_id() {
        let ids = FixedExchangeId(17);
        assert_eq!(ids.next_id(), 17);
        assert_eq!(ids.next_id(), 17);
    }
}
