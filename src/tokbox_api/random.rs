use rand::Rng;
use std::fmt;

/// Upper bound (exclusive) of the session token nonce
pub const NONCE_BOUND: u32 = 999_999;

/// Source of the random values embedded in signed tokens
///
/// Nonces and JWT ids only need to avoid collisions, not to be secret.
/// Tests plug in a fixed implementation to get reproducible tokens.
pub trait RandomSource: Send + Sync + fmt::Debug {
    /// Nonce in `[0, NONCE_BOUND)`
    fn nonce(&self) -> u32;

    /// Unique identifier for a service token (`jti` claim)
    fn token_id(&self) -> String;
}

/// Default source backed by the thread-local RNG and UUID v4
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn nonce(&self) -> u32 {
        rand::thread_rng().gen_range(0..NONCE_BOUND)
    }

    fn token_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
