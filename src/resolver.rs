//! The response resolver: maps a free-text query to advice text.
//!
//! The mapping is a deterministic keyword rule table. The query is
//! lowercased and the first rule with a matching keyword wins; anything
//! unrecognized falls back to [`FALLBACK_ADVICE`]. The resolver is pure
//! and total: it never fails and never returns an empty string.

/// Advice returned when no rule matches the query.
pub const FALLBACK_ADVICE: &str = "Start with the basics: spend less than you earn, save the \
     difference, and let time do the compounding. Try asking me about saving, budgeting, \
     debt, or investing.";

/// A single advice rule. If any keyword appears in the lowercased query,
/// the rule's advice is returned.
struct Rule {
    keywords: &'static [&'static str],
    advice: &'static str,
}

// First match wins, so narrower topics come before broad ones.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["emergency", "rainy day", "unexpected"],
        advice: "Build an emergency fund before anything else. Three to six months of living \
                 expenses in an easily accessible account turns a crisis into an inconvenience, \
                 and keeps you from borrowing at the worst possible moment.",
    },
    Rule {
        keywords: &["save", "saving", "put aside", "set aside"],
        advice: "Pay yourself first: set aside at least a tenth of everything you earn before \
                 you spend on anything else. Treat that share as untouchable, and move it \
                 somewhere separate the day you are paid so you are never tempted to spend it.",
    },
    Rule {
        keywords: &["budget", "track", "expense", "spending", "overspend"],
        advice: "Control your expenditures. Write down what you actually spend for a month, \
                 then budget so that necessary expenses never exceed nine-tenths of your \
                 income. What gets tracked gets managed.",
    },
    Rule {
        keywords: &["debt", "loan", "borrow", "credit card", "owe"],
        advice: "Avoid debt that does not pay for itself. Clear your most expensive debts \
                 first while paying the minimum on the rest, and be wary of borrowing for \
                 things that lose value the moment you buy them.",
    },
    Rule {
        keywords: &["invest", "stock", "compound", "grow", "wealth", "multiply"],
        advice: "Make your gold multiply: put your savings to work so each coin earns more \
                 coins. Invest steadily in things you understand, favor boring consistency \
                 over hot tips, and give compounding the years it needs.",
    },
    Rule {
        keywords: &["risk", "scam", "guarantee", "lose", "loss", "protect"],
        advice: "Guard your treasure from loss. If a return sounds too good to be true, it is. \
                 Seek advice from people experienced in handling money, and never invest in \
                 ventures you cannot afford to walk away from.",
    },
    Rule {
        keywords: &["income", "earn", "salary", "raise", "job", "side"],
        advice: "Increase your ability to earn. Skills compound like savings do: learn the \
                 work adjacent to yours, ask for the raise with evidence in hand, and let a \
                 side income start small rather than not at all.",
    },
    Rule {
        keywords: &["house", "home", "rent", "mortgage"],
        advice: "Own your dwelling if you can do so without straining your budget. A \
                 reasonable mortgage turns an expense into equity, but an oversized one turns \
                 a home into a burden. Keep total housing costs well under a third of your \
                 income.",
    },
    Rule {
        keywords: &["retire", "retirement", "pension", "old age"],
        advice: "Provide for your later years while they are still far away. Small regular \
                 contributions made early beat large ones made late, so fund your retirement \
                 account before lifestyle upgrades, not after.",
    },
];

/// Resolve a query to advice text.
///
/// Deterministic: identical input always yields identical output. The
/// caller is responsible for suppressing empty queries; an empty string
/// passed here still resolves (to the fallback).
pub fn resolve(query: &str) -> String {
    let normalized = query.to_lowercase();
    for rule in RULES {
        if rule.keywords.iter().any(|k| normalized.contains(k)) {
            return rule.advice.to_string();
        }
    }
    FALLBACK_ADVICE.to_string()
}
