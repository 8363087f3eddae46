//! Client Key Generation

use rand::rngs::OsRng;
use rand::Rng;

/// Characters a client key is drawn from
pub const KEY_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+-=";

/// Length of every generated client key
pub const KEY_LENGTH: usize = 16;

/// Generate a client key from the OS random source
pub fn generate_key() -> String {
    generate_key_with(&mut OsRng, KEY_LENGTH)
}

/// Generate a key of `length` characters, each picked uniformly and
/// independently from [`KEY_ALPHABET`]
pub fn generate_key_with<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())] as char)
        .collect()
}

/// Whether `key` has the shape of a generated key
pub fn is_well_formed(key: &str) -> bool {
    key.len() == KEY_LENGTH && key.bytes().all(|b| KEY_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet() {
        assert_eq!(KEY_ALPHABET.len(), 50);
        let unique: HashSet<_> = KEY_ALPHABET.iter().collect();
        assert_eq!(unique.len(), KEY_ALPHABET.len());
    }

    #[test]
    fn test_generated_keys_are_well_formed() {
        for _ in 0..500 {
            let key = generate_key();
            assert_eq!(key.len(), KEY_LENGTH);
            assert!(is_well_formed(&key), "bad key: {}", key);
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = generate_key_with(&mut StdRng::seed_from_u64(7), KEY_LENGTH);
        let b = generate_key_with(&mut StdRng::seed_from_u64(7), KEY_LENGTH);
        assert_eq!(a, b);
        assert_eq!(generate_key_with(&mut StdRng::seed_from_u64(7), 0), "");
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("ABCDEFGHIJ012345"));
        assert!(is_well_formed("!@#$%^&*()_+-=AZ"));
        assert!(!is_well_formed("abcdefghij012345"));
        assert!(!is_well_formed("SHORT"));
        assert!(!is_well_formed("ABCDEFGHIJ01234?"));
    }
}
