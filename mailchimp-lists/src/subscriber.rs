/// Computes the subscriber hash Mailchimp uses to address a list member.
///
/// The hash is the MD5 digest of the ASCII-lowercased email address, rendered
/// as 32 lowercase hex characters. Mailchimp expects exactly this value in the
/// `{subscriber_hash}` segment of member paths.
///
/// ## Example
///
/// ```
/// use mailchimp_lists::subscriber_hash;
///
/// assert_eq!(
///     subscriber_hash("User@Example.com"),
///     subscriber_hash("user@example.com"),
/// );
/// ```
pub fn subscriber_hash(email: &str) -> String {
    format!("{:x}", md5::compute(email.to_ascii_lowercase().as_bytes()))
}
