//! Input shape checks for the HTTP layer. The waitlist core itself accepts
//! any non-empty email; rejecting garbage before it lands in the store is
//! the caller's job.

/// Minimal email shape check: non-empty local and domain parts around a
/// single '@', a dot in the domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
