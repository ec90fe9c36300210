//! OCR repair rule table.
//!
//! The indexed statutes were digitized with OCR, which splits compound
//! words ("Haft ung", "straf recht lichen"). The model copies those splits
//! into its answers. Each rule matches one known split; rules run top to
//! bottom over the whole text: the decorative emoji first, then specific
//! legal terms before generic words and abbreviations.

use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};

/// How a rule rewrites its match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repair {
    /// Replace the match with fixed text
    Literal(&'static str),
    /// Remove all whitespace inside the match, keeping its letters and case.
    /// Used for terms with many inflected forms.
    CollapseWhitespace,
}

/// A compiled (pattern, repair) pair.
#[derive(Debug)]
pub struct RepairRule {
    pattern: Regex,
    repair: Repair,
}

impl RepairRule {
    fn new(pattern: &str, repair: Repair) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("Invalid OCR repair pattern"),
            repair,
        }
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn repair(&self) -> Repair {
        self.repair
    }

    /// Apply the rule to every non-overlapping match in `text`.
    pub fn apply(&self, text: &str) -> String {
        match self.repair {
            Repair::Literal(replacement) => self
                .pattern
                .replace_all(text, NoExpand(replacement))
                .into_owned(),
            Repair::CollapseWhitespace => self
                .pattern
                .replace_all(text, |caps: &Captures| {
                    caps[0].split_whitespace().collect::<String>()
                })
                .into_owned(),
        }
    }
}

use Repair::{CollapseWhitespace as Collapse, Literal};

/// Rule source, in application order.
const RULES: &[(&str, Repair)] = &[
    // Decorative scales emoji the model likes to lead with. Removed first so
    // the splits it sat inside are still seen by the rules below.
    (r"\x{2696}\x{FE0F}?\s*", Literal("")),
    // Legal compound words
    (r"(?i)\bstraf\s*recht\s*lich(?:\s*en?)?\b", Collapse),
    (r"(?i)\bHaft\s+ung\b", Literal("Haftung")),
    (r"(?i)\bV\s*or\s+s\s*atz\b", Literal("Vorsatz")),
    (r"(?i)\bV\s+ors\s*atz\b", Literal("Vorsatz")),
    (r"(?i)\bF\s*ah\s*rl\s*äss\s*ig\s*keit\b", Literal("Fahrlässigkeit")),
    (r"(?i)\bTat\s+best?\s*and\w*", Collapse),
    (r"(?i)\bRe\s*chts\s*wid\s*rig\s*keit\b", Literal("Rechtswidrigkeit")),
    (r"(?i)\bSch\s+uld\b", Literal("Schuld")),
    (r"(?i)\bStr\s*af\s*bar\s*keit\b", Literal("Strafbarkeit")),
    (r"(?i)\bStr\s+af\s*maß\b", Literal("Strafmaß")),
    (r"(?i)\bRechts\s*anw\s*alt\b", Literal("Rechtsanwalt")),
    (r"(?i)\bRechts\s*ber?\s*atung\b", Literal("Rechtsberatung")),
    (r"(?i)\bVerein\s+barung\b", Literal("Vereinbarung")),
    (r"(?i)\bVertr\s+äge?\b", Collapse),
    (r"(?i)\bgesetz\s+buch\b", Collapse),
    (r"(?i)\bRecht\s*fert\s*igungs?\s*grund\b", Literal("Rechtfertigungsgrund")),
    (r"(?i)\bNot\s+wehr\b", Literal("Notwehr")),
    (r"(?i)\bNot\s+stand\b", Literal("Notstand")),
    (r"(?i)\bBe\s+geh\s*ung\b", Literal("Begehung")),
    (r"(?i)\bver\s*wirk\s*lich\s*ung\b", Literal("Verwirklichung")),
    (r"(?i)\bS\s*org\s*falt\b", Literal("Sorgfalt")),
    (r"(?i)\bUm\s+ständ(?:\s*e)?\b", Collapse),
    (r"(?i)\bSch\s*uld\s*un\s*fähig\s*keit\b", Literal("Schuldunfähigkeit")),
    (r"(?i)\bEins\s+icht\b", Literal("Einsicht")),
    (r"(?i)\bpers\s+önlich\w*", Collapse),
    (r"(?i)\bAllgeme\s+ine?\b", Collapse),
    (r"(?i)\bStra\s*f\s*tat(?:\s*en?)?\b", Collapse),
    (r"(?i)\bOr\s*dn\s*ungs\s*wid\s*rig\s*keit(?:\s*en)?\b", Collapse),
    (r"(?i)\bschuld\s+haft\b", Literal("schuldhaft")),
    (r"(?i)\bgehand\s+elt\b", Literal("gehandelt")),
    (r"(?i)\bdefini\s+ert\b", Literal("definiert")),
    (r"(?i)\bdetaill\s+iert\w*", Collapse),
    (r"(?i)\bspezif\s+isch\w*", Collapse),
    (r"(?i)\bTä\s+ters?\b", Collapse),
    (r"(?i)\bwirk\s+lich\b", Literal("wirklich")),
    (r"(?i)\bSch\s+were?\b", Collapse),
    (r"(?i)\bgest\s+ellt\w*", Collapse),
    (r"(?i)\bverm\s*inder\s+te?\b", Collapse),
    (r"(?i)\bwid\s+rig\b", Literal("widrig")),
    (r"(?i)\bAs\s+pekt(?:\s*en?)?\b", Collapse),
    (r"(?i)\bverbind\s+lich\w*", Collapse),
    (r"(?i)\bAus\s+künfte\b", Literal("Auskünfte")),
    (r"(?i)\bbereit\s+stellen\b", Literal("bereitstellen")),
    (r"(?i)\bbereit\s+gestellt\w*", Collapse),
    (r"(?i)\bent\s+sprechend\w*", Collapse),
    (r"(?i)\bent\s+halten\b", Literal("enthalten")),
    (r"\bW\s+ollen\b", Literal("Wollen")),
    // Common words
    (r"(?i)\bHin\s+weis", Literal("Hinweis")),
    (r"(?i)\bBest\s+es\b", Literal("Bestes")),
    (r"(?i)\brecht\s+lichen\b", Literal("rechtlichen")),
    (r"(?i)\bRahmen\s+bedingungen\b", Literal("Rahmenbedingungen")),
    // Statute abbreviations
    (r"\bB\s+GB\b", Literal("BGB")),
    (r"\bSt\s+GB\b", Literal("StGB")),
    (r"\bH\s+GB\b", Literal("HGB")),
    (r"\bZ\s+PO\b", Literal("ZPO")),
    (r"\bSt\s+PO\b", Literal("StPO")),
    (r"\bAbs\s+\.", Literal("Abs.")),
    (r"\bNr\s+\.", Literal("Nr.")),
    (r"\bArt\s+\.", Literal("Art.")),
    (r"\bz\s+\.B\s+\.", Literal("z.B.")),
];

static OCR_RULES: Lazy<Vec<RepairRule>> = Lazy::new(|| {
    RULES
        .iter()
        .map(|(pattern, repair)| RepairRule::new(pattern, *repair))
        .collect()
});

/// The compiled rule table, in application order.
pub fn ocr_rules() -> &'static [RepairRule] {
    &OCR_RULES
}

/// Apply every OCR rule in order.
pub fn repair_ocr(text: &str) -> String {
    OCR_RULES
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}
