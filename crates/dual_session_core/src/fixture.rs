use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;

pub const DEFAULT_FIXTURE_SIZE: usize = 1024;
pub const OBJECT_KEY_PREFIX: &str = "test-object-";
pub const OBJECT_KEY_SUFFIX: &str = ".txt";

/// Wall-clock source, in whole seconds since the Unix epoch.
pub trait Clock {
    fn now_unix_seconds(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_seconds(&self) -> u64 {
        // Clamp pre-epoch clocks to zero rather than wrapping.
        u64::try_from(Utc::now().timestamp()).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_unix_seconds(&self) -> u64 {
        self.0
    }
}

/// Object seeded into the source bucket and copied to the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestObject {
    pub key: String,
    pub body: String,
}

impl TestObject {
    pub fn generate<R: Rng + ?Sized>(clock: &dyn Clock, rng: &mut R, size: usize) -> Self {
        Self {
            key: test_object_key(clock.now_unix_seconds()),
            body: generate_random_content(rng, size),
        }
    }
}

/// Two invocations within the same second produce the same key.
pub fn test_object_key(unix_seconds: u64) -> String {
    format!("{OBJECT_KEY_PREFIX}{unix_seconds}{OBJECT_KEY_SUFFIX}")
}

/// Returns the timestamp embedded in a key produced by [`test_object_key`].
pub fn parse_test_object_key(key: &str) -> Option<u64> {
    let digits = key
        .strip_prefix(OBJECT_KEY_PREFIX)?
        .strip_suffix(OBJECT_KEY_SUFFIX)?;
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub fn generate_random_content<R: Rng + ?Sized>(rng: &mut R, size: usize) -> String {
    (0..size)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn default_content_is_1024_alphanumeric_chars() {
        let content = generate_random_content(&mut rand::thread_rng(), DEFAULT_FIXTURE_SIZE);
        assert_eq!(content.len(), 1024);
        assert!(content.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let first = generate_random_content(&mut StdRng::seed_from_u64(7), 64);
        let second = generate_random_content(&mut StdRng::seed_from_u64(7), 64);
        assert_eq!(first, second);
    }

    #[test]
    fn key_embeds_the_clock_reading() {
        let object = TestObject::generate(
            &FixedClock(1_760_000_000),
            &mut StdRng::seed_from_u64(1),
            DEFAULT_FIXTURE_SIZE,
        );
        assert_eq!(object.key, "test-object-1760000000.txt");
        assert_eq!(parse_test_object_key(&object.key), Some(1_760_000_000));
    }

    #[test]
    fn same_second_produces_same_key() {
        let clock = FixedClock(42);
        let first = TestObject::generate(&clock, &mut StdRng::seed_from_u64(1), 8);
        let second = TestObject::generate(&clock, &mut StdRng::seed_from_u64(2), 8);
        assert_eq!(first.key, second.key);
        assert_ne!(first.body, second.body);
    }

    #[test]
    fn parse_rejects_foreign_keys() {
        assert_eq!(parse_test_object_key("test-object-.txt"), None);
        assert_eq!(parse_test_object_key("test-object-12a.txt"), None);
        assert_eq!(parse_test_object_key("other-12.txt"), None);
        assert_eq!(parse_test_object_key("test-object-12.bin"), None);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_unix_seconds() > 1_577_836_800);
    }

    proptest! {
        #[test]
        fn content_is_always_alphanumeric_of_requested_length(seed in any::<u64>(), size in 0usize..4096) {
            let content = generate_random_content(&mut StdRng::seed_from_u64(seed), size);
            prop_assert_eq!(content.len(), size);
            prop_assert!(content.bytes().all(|byte| byte.is_ascii_alphanumeric()));
        }

        #[test]
        fn default_size_holds_for_repeated_generation(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..4 {
                let content = generate_random_content(&mut rng, DEFAULT_FIXTURE_SIZE);
                prop_assert_eq!(content.chars().count(), DEFAULT_FIXTURE_SIZE);
                prop_assert!(content.chars().all(|c| c.is_ascii_alphanumeric()));
            }
        }

        #[test]
        fn key_round_trips_any_timestamp(seconds in any::<u64>()) {
            prop_assert_eq!(parse_test_object_key(&test_object_key(seconds)), Some(seconds));
        }
    }
}
