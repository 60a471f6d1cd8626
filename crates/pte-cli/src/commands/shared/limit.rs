/// Compute effective limit with precedence: local arg -> configured default.
#[must_use]
pub fn effective_limit(local: Option<u32>, configured: u32) -> usize {
    usize::try_from(local.unwrap_or(configured)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::effective_limit;

    #[test]
    fn local_takes_precedence() {
        assert_eq!(effective_limit(Some(5), 20), 5);
    }

    #[test]
    fn configured_used_when_local_missing() {
        assert_eq!(effective_limit(None, 20), 20);
    }
}
