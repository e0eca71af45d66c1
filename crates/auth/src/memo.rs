use config::UserCacheConfig;
use context::ValidationOutcome;
use futures_util::lock::Mutex;
use mini_moka::sync::Cache;
use sha2::{Digest, Sha256};

/// Memoizes validation outcomes by token.
///
/// An explicit decorator over any [`crate::ValidateToken`] implementation:
/// the key derivation and the store-skip predicate are part of this wrapper,
/// not of the validator, so the policy is testable on its own. With the
/// default predicate an outcome without an identity is never stored — a
/// transient "shape unrecognized" or failed validation does not stick.
pub struct MemoizedValidator<V> {
    inner: V,
    cache: Cache<String, ValidationOutcome>,
    key_prefix: String,
    skip: fn(&ValidationOutcome) -> bool,
    refresh_lock: Mutex<()>,
}

impl<V: crate::ValidateToken> MemoizedValidator<V> {
    pub fn new(inner: V, config: &UserCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();

        Self {
            inner,
            cache,
            key_prefix: config.key_prefix.clone(),
            skip: |outcome| !outcome.has_identity(),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Replaces the store-skip predicate. Outcomes for which the predicate
    /// returns true are passed through without being cached.
    pub fn with_skip_predicate(mut self, skip: fn(&ValidationOutcome) -> bool) -> Self {
        self.skip = skip;
        self
    }

    pub async fn validate(&self, token: &str) -> ValidationOutcome {
        let key = self.cache_key(token);

        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        let _guard = self.refresh_lock.lock().await;

        // Somebody else validated this token while we waited for the lock.
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        let outcome = self.inner.validate(token).await;

        if !(self.skip)(&outcome) {
            self.cache.insert(key, outcome.clone());
        }

        outcome
    }

    fn cache_key(&self, token: &str) -> String {
        format!("{}:{}", self.key_prefix, hash_token(token))
    }
}

impl<V: crate::ValidateToken> crate::ValidateToken for MemoizedValidator<V> {
    fn validate(&self, token: &str) -> impl Future<Output = ValidationOutcome> + Send {
        MemoizedValidator::validate(self, token)
    }
}

/// Tokens are hashed before they become cache keys.
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use context::{UserIdentity, ValidationStatus};

    use super::*;
    use crate::ValidateToken;

    /// Counts upstream calls and answers with a canned outcome per token.
    struct CountingValidator {
        calls: AtomicUsize,
        outcome: fn(&str) -> ValidationOutcome,
    }

    impl CountingValidator {
        fn new(outcome: fn(&str) -> ValidationOutcome) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ValidateToken for CountingValidator {
        async fn validate(&self, token: &str) -> ValidationOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)(token)
        }
    }

    fn with_identity(token: &str) -> ValidationOutcome {
        let mut identity = UserIdentity::new(token.to_string());
        identity.user_id = Some(7);
        ValidationOutcome::success(Some(identity))
    }

    fn without_identity(_token: &str) -> ValidationOutcome {
        ValidationOutcome::success(None)
    }

    #[tokio::test]
    async fn identity_bearing_outcomes_are_cached() {
        let memoized = MemoizedValidator::new(
            CountingValidator::new(with_identity),
            &UserCacheConfig::default(),
        );

        let first = memoized.validate("tok123").await;
        let second = memoized.validate("tok123").await;

        assert_eq!(first, second);
        assert_eq!(memoized.inner.calls(), 1);
    }

    #[tokio::test]
    async fn different_tokens_are_cached_independently() {
        let memoized = MemoizedValidator::new(
            CountingValidator::new(with_identity),
            &UserCacheConfig::default(),
        );

        memoized.validate("tok123").await;
        memoized.validate("tok456").await;

        assert_eq!(memoized.inner.calls(), 2);
    }

    #[tokio::test]
    async fn absent_identity_outcomes_are_never_cached() {
        let memoized = MemoizedValidator::new(
            CountingValidator::new(without_identity),
            &UserCacheConfig::default(),
        );

        memoized.validate("tok123").await;
        memoized.validate("tok123").await;

        assert_eq!(memoized.inner.calls(), 2);
    }

    #[tokio::test]
    async fn failures_are_never_cached() {
        let memoized = MemoizedValidator::new(
            CountingValidator::new(|_| {
                ValidationOutcome::failure(ValidationStatus::TokenExpiredOrInvalid, "expired")
            }),
            &UserCacheConfig::default(),
        );

        memoized.validate("tok123").await;
        memoized.validate("tok123").await;

        assert_eq!(memoized.inner.calls(), 2);
    }

    #[tokio::test]
    async fn custom_skip_predicate_is_respected() {
        let memoized = MemoizedValidator::new(
            CountingValidator::new(without_identity),
            &UserCacheConfig::default(),
        )
        .with_skip_predicate(|_| false);

        memoized.validate("tok123").await;
        memoized.validate("tok123").await;

        // Everything is cached when the predicate never skips.
        assert_eq!(memoized.inner.calls(), 1);
    }

    #[test]
    fn cache_keys_carry_the_prefix_and_hide_the_token() {
        let memoized = MemoizedValidator::new(
            CountingValidator::new(with_identity),
            &UserCacheConfig::default(),
        );

        let key = memoized.cache_key("tok123");

        assert!(key.starts_with("wicket:userdetails:"));
        assert!(!key.contains("tok123"));
    }
}
