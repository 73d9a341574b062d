//! Organization label canonicalization.
//!
//! The rule tables below are authoritative reference data. Order matters in
//! both lists: replacements are applied one after another, and overrides are
//! tried top to bottom with the first matching substring winning. A broad
//! override placed above a more specific one shadows it.

/// Per-character substitutions applied before any rule.
pub const CHARACTER_MAP: &[(char, char)] = &[
    ('Á', 'A'),
    ('É', 'E'),
    ('Í', 'I'),
    ('Ó', 'O'),
    ('Ú', 'U'),
    ('-', ' '),
    (',', ' '),
    ('.', ' '),
    ('"', ' '),
    ('+', ' '),
];

/// Boilerplate prefixes and typos, replaced everywhere they occur.
pub const REPLACEMENT_RULES: &[(&str, &str)] = &[
    ("ALIANZA ELECTORAL ", ""),
    (
        "MOVIMIENTO REGIONAL O DEPARTAMENTAL MOVIMIENTO INDEPENDIENTE REGIONAL",
        "MR/D",
    ),
    (
        "MOVIMIENTO REGIONAL O DEPARTAMENTAL MOVIMIENTO INDEPENDIENTE",
        "MR/D",
    ),
    (
        "MOVIMIENTO REGIONAL O DEPARTAMENTAL MOVIMIENTO REGIONAL",
        "MR/D",
    ),
    ("MOVIMIENTO REGIONAL O DEPARTAMENTAL MOVIMIENTO", "MR/D"),
    ("MOVIMIENTO REGIONAL O DEPARTAMENTAL", "MR/D"),
    ("MOVIMIENTO REGIONAL", "MR/D"),
    ("ORGANIZACION POLITICA LOCAL DISTRITAL", "OPLD"),
    ("ORGANIZACION POLITICA LOCAL PROVINCIAL", "OPLP"),
    ("PARTIDO POLITICO NACIONAL ", ""),
    ("PARTIDO POLITICO ", ""),
    ("POLPULAR", "POPULAR"),
    ("IZQUIERA", "IZQUIERDA"),
];

/// Known aliases and renamed organizations: `(substring, canonical name)`.
///
/// Every canonical name must normalize to itself.
pub const OVERRIDE_RULES: &[(&str, &str)] = &[
    ("AMPLIO", "FRENTE AMPLIO"),
    ("ANDE MAR", "MR/D ANDEMAR"),
    ("CAMBIO 90", "CAMBIO 90"),
    ("FUERZA POPULAR", "FUERZA POPULAR"),
    ("GRAN CAMBIO", "PERUANOS POR EL KAMBIO"),
    ("KAMBIO", "PERUANOS POR EL KAMBIO"),
    ("INTEGRACION AMAZONICA", "INTEGRACION AMAZONICO"),
    ("INTEGRACION LORETANA", "INTEGRACION LORETANA MIL"),
    ("SOCIALISTA", "PARTIDO SOCIALISTA DEL PERU"),
    ("SOLIDARIDAD NACIONAL", "SOLIDARIDAD NACIONAL"),
    ("APRA", "APRISTA PERUANO"),
    ("APRISTA", "APRISTA PERUANO"),
    ("PPC", "PARTIDO POPULAR CRISTIANO"),
    (" FIA ", "FREPAP"),
    ("PARA PROGRESO", "ALIANZA POR EL PROGRESO"),
    ("PARA EL PROGRESO", "ALIANZA POR EL PROGRESO"),
    ("NACIONALISTA", "NACIONALISTA"),
    ("FREDEMO", "FREDEMO"),
    ("SOMOS PERU", "SOMOS PERU"),
    ("DE AFIRMACION", "MOVIMIENTO AFIRMACION SOCIAL"),
    ("AYLLU", "MR/D AYLLU"),
    ("ETNOCACERISTA", "ETNOCACERISTA"),
    ("FUERZA SOCIAL", "MR/D FUERZA SOCIAL"),
    ("PODEMOS POR EL", "PODEMOS PERU"),
    ("POPULAR CRISTIANO", "PARTIDO POPULAR CRISTIANO"),
];

/// Short codes marking regional and local movements.
pub const REGIONAL_MARKERS: &[&str] = &["MR/D", "OPLD", "OPLP"];

/// An ordered `(pattern, replacement)` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub pattern: String,
    pub replacement: String,
}

impl Rule {
    #[must_use]
    pub fn new(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

/// Canonicalizes free-text organization labels.
///
/// Pure and total: every input maps to exactly one output.
#[derive(Debug, Clone)]
pub struct Normalizer {
    replacements: Vec<Rule>,
    overrides: Vec<Rule>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(
            REPLACEMENT_RULES.iter().map(|(p, r)| Rule::new(p, r)).collect(),
            OVERRIDE_RULES.iter().map(|(p, r)| Rule::new(p, r)).collect(),
        )
    }
}

impl Normalizer {
    /// Build a normalizer from explicit rule lists, kept in the given order.
    ///
    /// A replacement must not reintroduce any replacement pattern, otherwise
    /// [`Normalizer::normalize`] never reaches a stable label.
    #[must_use]
    pub const fn new(replacements: Vec<Rule>, overrides: Vec<Rule>) -> Self {
        Self {
            replacements,
            overrides,
        }
    }

    #[must_use]
    pub fn overrides(&self) -> &[Rule] {
        &self.overrides
    }

    /// Canonical label for a raw organization label.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let substituted: String = raw.chars().map(substitute).collect();
        let mut label = collapse_whitespace(&substituted);

        // A removal can expose a new match ("PARTIDO PARTIDO POLITICO POLITICO"),
        // so replacements run until the label is stable. No replacement output
        // recreates a pattern, so this terminates.
        loop {
            let next = collapse_whitespace(&self.apply_replacements(&label));
            if next == label {
                break;
            }
            label = next;
        }

        self.overrides
            .iter()
            .find(|rule| label.contains(&rule.pattern))
            .map_or(label.clone(), |rule| rule.replacement.clone())
    }

    fn apply_replacements(&self, label: &str) -> String {
        let mut out = label.to_string();
        for rule in &self.replacements {
            if out.contains(&rule.pattern) {
                out = out.replace(&rule.pattern, &rule.replacement);
            }
        }
        out
    }
}

/// Whether a canonical label denotes a regional or local movement.
#[must_use]
pub fn is_regional_movement(label: &str) -> bool {
    REGIONAL_MARKERS.iter().any(|marker| label.contains(marker))
}

fn substitute(c: char) -> char {
    CHARACTER_MAP
        .iter()
        .find(|(from, _)| *from == c)
        .map_or(c, |(_, to)| *to)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
