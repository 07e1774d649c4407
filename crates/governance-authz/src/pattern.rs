/// Glob match of `subject` against `pattern`.
///
/// `*` matches any run of characters, including an empty one, and may appear
/// anywhere in the pattern. Every other character matches only itself.
/// Comparison is per `char`, so multi-byte subjects are safe.
///
/// ```
/// use governance_authz::wildcard_match;
///
/// assert!(wildcard_match("orders.created", "orders.*"));
/// assert!(wildcard_match("payments.audit", "*.audit"));
/// assert!(!wildcard_match("payments.secret", "*.audit"));
/// ```
pub fn wildcard_match(subject: &str, pattern: &str) -> bool {
    let subject: Vec<char> = subject.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let (mut s, mut p) = (0, 0);
    // Position of the last `*` seen and the subject index it is currently
    // standing in for.
    let mut star: Option<(usize, usize)> = None;

    while s < subject.len() {
        if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, s));
            p += 1;
        } else if p < pattern.len() && pattern[p] == subject[s] {
            s += 1;
            p += 1;
        } else if let Some((star_p, star_s)) = star {
            star = Some((star_p, star_s + 1));
            p = star_p + 1;
            s = star_s + 1;
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}
