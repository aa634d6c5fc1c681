//! Application message composition.

use rand::seq::SliceRandom;
use rand::Rng;

pub mod templates;

use templates::{APPLICATION_TEMPLATE, SALUTATIONS};

/// Drops a parenthetical suffix: `"Backend developer (Python)"` -> `"Backend developer"`.
pub fn shorten_title(title: &str) -> &str {
    title.split('(').next().unwrap_or(title).trim_end()
}

/// Fills the template for one vacancy with a random salutation.
pub fn compose_message<R: Rng + ?Sized>(title: &str, contact: &str, rng: &mut R) -> String {
    let greeting = SALUTATIONS.choose(rng).copied().unwrap_or(SALUTATIONS[0]);
    render(greeting, shorten_title(title), contact)
}

/// Fills every `{slot}` of the template in one pass, so inserted text is never rescanned.
fn render(greeting: &str, vacancy: &str, contact: &str) -> String {
    let mut out = String::with_capacity(APPLICATION_TEMPLATE.len() + vacancy.len() + contact.len());
    let mut rest = APPLICATION_TEMPLATE;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        rest = &rest[open..];
        let Some(close) = rest.find('}') else {
            break;
        };
        match &rest[1..close] {
            "greeting" => out.push_str(greeting),
            "vacancy" => out.push_str(vacancy),
            "contact" => out.push_str(contact),
            _ => out.push_str(&rest[..=close]),
        }
        rest = &rest[close + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shorten_without_parenthesis_is_identity() {
        assert_eq!(shorten_title("Backend developer"), "Backend developer");
        assert_eq!(
            shorten_title(shorten_title("Backend developer")),
            "Backend developer"
        );
    }

    #[test]
    fn test_shorten_strips_parenthetical() {
        assert_eq!(shorten_title("Backend developer (Python)"), "Backend developer");
    }

    #[test]
    fn test_shorten_splits_on_first_parenthesis() {
        assert_eq!(shorten_title("Dev (Go) (remote)"), "Dev");
        assert_eq!(shorten_title("(Senior) Dev"), "");
    }

    #[test]
    fn test_message_contains_short_title_and_contact() {
        let mut rng = StdRng::seed_from_u64(7);
        let msg = compose_message("Backend developer (Python)", "@me", &mut rng);
        assert!(msg.contains("Backend developer"));
        assert!(msg.contains("@me"));
        assert!(!msg.contains("(Python)"));
        assert!(!msg.contains('{'));
    }

    #[test]
    fn test_message_starts_with_known_salutation() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let msg = compose_message("Rust engineer", "t.me/me", &mut rng);
            assert!(SALUTATIONS.iter().any(|s| msg.starts_with(&format!("{s}, "))));
        }
    }

    #[test]
    fn test_every_salutation_is_reachable() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let msg = compose_message("QA", "@me", &mut rng);
            let greeting = msg.split(',').next().unwrap().to_string();
            seen.insert(greeting);
        }
        assert_eq!(seen.len(), SALUTATIONS.len());
    }

    #[test]
    fn test_braces_in_contact_are_kept_literally() {
        let msg = render("Привет", "Backend developer", "{vacancy} @me");
        assert!(msg.contains("с помощью {vacancy} @me"));
        assert_eq!(msg.matches("Backend developer").count(), 1);
    }

    #[test]
    fn test_braces_in_title_are_kept_literally() {
        let msg = render("Привет", "Lead {contact}", "@me");
        assert!(msg.contains("в качестве Lead {contact}."));
        assert_eq!(msg.matches("@me").count(), 1);
    }

    #[test]
    fn test_template_whitespace_collapses_across_lines() {
        let msg = render("Привет", "QA", "@me");
        assert!(msg.contains("мою кандидатуру"));
        assert!(!msg.contains("  "));
    }
}
