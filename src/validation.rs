use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Syntactic email shape: something, an "@", something, a ".", something,
    /// with no whitespace or second "@" inside any run.
    static ref EMAIL_SHAPE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    /// Disposable/test mailbox patterns that are rejected outright
    static ref SPAM_EMAIL_PATTERNS: Vec<Regex> = [
        r"temp.*mail",
        r"disposable",
        r"throwaway",
        r"10minute",
        r"guerrilla.*mail",
        r"mailinator",
        r"test.*test",
        r"example\.com",
        r"fake.*mail",
    ]
    .iter()
    .map(|pattern| Regex::new(&format!("(?i){pattern}")).unwrap())
    .collect();

    /// Obvious automation signatures in a user-agent string
    static ref BOT_AGENT_PATTERNS: Vec<Regex> = [r"bot", r"crawl", r"spider", r"scrape"]
        .iter()
        .map(|pattern| Regex::new(&format!("(?i){pattern}")).unwrap())
        .collect();
}

/// Shape check only; says nothing about whether the mailbox exists.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Heuristic spam screen over the address and the reported user agent.
///
/// A missing or empty agent is rejected outright even though it is a weak
/// signal; the stricter agent-length check of an earlier revision stays
/// removed because it rejected legitimate browsers.
pub fn is_likely_spam(email: &str, user_agent: Option<&str>) -> bool {
    if SPAM_EMAIL_PATTERNS.iter().any(|p| p.is_match(email)) {
        return true;
    }

    let agent = match user_agent {
        Some(agent) if !agent.is_empty() => agent,
        _ => return true,
    };

    BOT_AGENT_PATTERNS.iter().any(|p| p.is_match(agent))
}
