use rand::distributions::Alphanumeric;
use rand::Rng;

/// Random alphanumeric secret, e.g. for api keys
pub fn create_random_secret(secret_len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}

/// Compares two secrets in time that only depends on their lengths
pub fn secrets_match(given: &str, expected: &str) -> bool {
    let given = given.as_bytes();
    let expected = expected.as_bytes();
    if given.len() != expected.len() {
        return false;
    }
    given
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_creates_random_secret() {
        let sec1 = create_random_secret(16);
        let sec2 = create_random_secret(16);
        assert_eq!(sec1.len(), 16);
        assert_ne!(sec1, sec2);
        assert!(sec1.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn it_compares_secrets() {
        assert!(secrets_match("abc123", "abc123"));
        assert!(!secrets_match("abc124", "abc123"));
        assert!(!secrets_match("abc", "abc123"));
        assert!(!secrets_match("", "abc123"));
    }
}
