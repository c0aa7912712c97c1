//! Functional programming utilities

use crate::consts::{ALPHABETS, ID_LENGTH, TIME_ORDERED_ID_SUFFIX_LENGTH};

/// The Applicative trait provides a pure behavior,
/// which can be used to create values of type f a from values of type a.
pub trait Applicative<R> {
    /// The Associative type acts as a (f a) wrapper for Self.
    type WrappedSelf<T>;

    /// Applicative::pure(_) is abstraction with lifts any arbitrary type to underlying higher
    /// order type
    fn pure(v: R) -> Self::WrappedSelf<R>;
}

impl<R> Applicative<R> for Option<R> {
    type WrappedSelf<T> = Option<T>;
    fn pure(v: R) -> Self::WrappedSelf<R> {
        Some(v)
    }
}

impl<R, E> Applicative<R> for Result<R, E> {
    type WrappedSelf<T> = Result<T, E>;
    fn pure(v: R) -> Self::WrappedSelf<R> {
        Ok(v)
    }
}

/// based on the condition provided into the `predicate`
pub fn when<W: Applicative<(), WrappedSelf<()> = W>, F>(predicate: bool, f: F) -> W
where
    F: FnOnce() -> W,
{
    if predicate {
        f()
    } else {
        W::pure(())
    }
}

#[inline]
pub fn generate_id_with_default_len(prefix: &str) -> String {
    generate_id(ID_LENGTH, prefix)
}

#[inline]
pub fn generate_id(length: usize, prefix: &str) -> String {
    format!("{}_{}", prefix, nanoid::nanoid!(length, &ALPHABETS))
}

/// `{prefix}_{unix millis}_{random}`.
///
/// Ids minted within the same millisecond only differ by the random tail, so
/// uniqueness is probabilistic. Callers needing a hard guarantee must enforce
/// it in storage.
pub fn generate_time_ordered_id(prefix: &str) -> String {
    let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!(
        "{}_{}_{}",
        prefix,
        millis,
        nanoid::nanoid!(TIME_ORDERED_ID_SUFFIX_LENGTH, &ALPHABETS)
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn when_runs_closure_only_on_true() {
        let ran: Result<(), &str> = when(true, || Err("ran"));
        assert_eq!(ran, Err("ran"));
        let skipped: Result<(), &str> = when(false, || Err("ran"));
        assert_eq!(skipped, Ok(()));
    }

    #[test]
    fn default_len_id_has_prefix() {
        let id = generate_id_with_default_len("MUID");
        assert!(id.starts_with("MUID_"));
        assert_eq!(id.len(), "MUID_".len() + ID_LENGTH);
        let random = id.strip_prefix("MUID_").unwrap();
        assert!(random.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn time_ordered_id_layout() {
        let id = generate_time_ordered_id("TXN");
        let mut parts = id.splitn(3, '_');
        assert_eq!(parts.next(), Some("TXN"));
        let millis = parts.next().unwrap();
        assert!(millis.parse::<u128>().is_ok());
        assert_eq!(parts.next().unwrap().len(), TIME_ORDERED_ID_SUFFIX_LENGTH);
    }

    #[test]
    fn time_ordered_ids_do_not_collide_in_a_tight_loop() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_time_ordered_id("TXN")).collect();
        assert_eq!(ids.len(), 1000);
    }
}
