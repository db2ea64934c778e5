//! Randomized token generator — identifiers, numeric disguises, predicates, junk.

use lv_core::IdentifierStyle;
use rand::seq::SliceRandom;
use rand::Rng;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const CONFUSABLE: &[u8] = b"lI1iOo0";
const DIGITS: &[u8] = b"0123456789";

/// Reserved words shared by Lua 5.1 and Luau, plus Luau's `continue`.
pub const KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
    "continue",
];

/// Expressions that are always true under Lua 5.1 and Luau.
pub const OPAQUE_PREDICATES: &[&str] = &[
    "(1 + 1 == 2)",
    "(type(nil) == \"nil\")",
    "(not false)",
    "(#\"abc\" == 3)",
    "(2 * 3 == 6)",
    "(type({}) == \"table\")",
    "(10 % 3 == 1)",
    "(true or false)",
    "(\"a\" .. \"b\" == \"ab\")",
    "(math.floor(3.7) == 3)",
    "(type(1) == \"number\")",
    "(select(\"#\", 1, 2) == 2)",
];

/// Collisions tolerated by [`TokenGenerator::distinct_identifiers`] before it
/// starts suffixing names.
const MAX_COLLISIONS: usize = 256;

type JunkFn<R> = fn(&mut TokenGenerator<R>, IdentifierStyle) -> String;

/// Token source for one pipeline run. Owns the injected entropy source.
pub struct TokenGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> TokenGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_inner(self) -> R {
        self.rng
    }

    /// A fresh identifier in the given style. Never a reserved word.
    ///
    /// No uniqueness across calls; use [`Self::distinct_identifiers`] when
    /// several names must coexist in one fragment.
    pub fn identifier(&mut self, style: IdentifierStyle) -> String {
        loop {
            let name = self.raw_identifier(style);
            if !KEYWORDS.contains(&name.as_str()) {
                return name;
            }
        }
    }

    fn raw_identifier(&mut self, style: IdentifierStyle) -> String {
        match style {
            IdentifierStyle::Default => {
                let len = self.rng.gen_range(4..=11);
                self.draw(LETTERS, len)
            }
            IdentifierStyle::Confusable => {
                let len = self.rng.gen_range(3..=10);
                format!("l{}", self.draw(CONFUSABLE, len))
            }
            IdentifierStyle::Numeric => {
                let len = self.rng.gen_range(3..=10);
                format!("_{}", self.draw(DIGITS, len))
            }
            IdentifierStyle::Minimal => {
                let len = self.rng.gen_range(1..=2);
                self.draw(LOWER, len)
            }
        }
    }

    fn draw(&mut self, alphabet: &[u8], len: usize) -> String {
        (0..len)
            .map(|_| alphabet[self.rng.gen_range(0..alphabet.len())] as char)
            .collect()
    }

    /// `count` pairwise-distinct identifiers.
    ///
    /// Once repeated draws keep colliding (a small namespace such as
    /// [`IdentifierStyle::Minimal`]), collisions are resolved by appending the
    /// slot index instead of drawing again.
    pub fn distinct_identifiers(&mut self, style: IdentifierStyle, count: usize) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(count);
        let mut misses = 0;
        while names.len() < count {
            let mut name = self.identifier(style);
            if names.contains(&name) {
                misses += 1;
                if misses < MAX_COLLISIONS {
                    continue;
                }
                name = format!("{}{}", name, names.len());
                if names.contains(&name) {
                    continue;
                }
            }
            names.push(name);
        }
        names
    }

    /// One always-true expression from the fixed catalogue.
    pub fn opaque_predicate(&mut self) -> &'static str {
        OPAQUE_PREDICATES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(OPAQUE_PREDICATES[0])
    }

    /// One inert statement from the fixed catalogue.
    pub fn junk_statement(&mut self, style: IdentifierStyle) -> String {
        let catalogue: [JunkFn<R>; 10] = [
            |g, s| format!("local {} = {}", g.identifier(s), g.rng.gen_range(0..100_000)),
            |g, s| {
                let (name, value) = (g.identifier(s), g.identifier(IdentifierStyle::Default));
                format!("local {} = \"{}\"", name, value)
            },
            |g, s| format!("if false then local {} = nil end", g.identifier(s)),
            |g, s| format!("local {} = (function() return nil end)()", g.identifier(s)),
            |g, s| format!("local {} = {{}}", g.identifier(s)),
            |g, s| format!("do local {} = {} end", g.identifier(s), g.rng.gen_range(0..1000)),
            |_, _| "while false do end".to_string(),
            |g, s| format!("for {} = 1, 0 do end", g.identifier(s)),
            |g, s| format!("local {} = type(nil)", g.identifier(s)),
            |g, s| {
                let cond = g.opaque_predicate();
                format!("if not {} then local {} = 0 end", cond, g.identifier(s))
            },
        ];
        let pick = catalogue[self.rng.gen_range(0..catalogue.len())];
        pick(self, style)
    }

    /// An expression that evaluates to exactly `n`, built from fresh operands.
    ///
    /// Operands are formed in `i64`, so every `i32` input is representable.
    pub fn numeric_expression(&mut self, n: i32) -> String {
        let n = i64::from(n);
        match self.rng.gen_range(0..4) {
            0 => {
                let b = self.rng.gen_range(1..=1000i64);
                format!("({} - {})", n + b, b)
            }
            1 => format!("({} / 2)", n * 2),
            2 => {
                let frac = self.rng.gen_range(1..=9);
                // Truncate toward zero for either sign.
                let round = if n < 0 { "ceil" } else { "floor" };
                format!("math.{}({}.{})", round, n, frac)
            }
            _ => {
                let k = self.rng.gen_range(1..=500i64);
                format!("({} + {} - {})", n, k, k)
            }
        }
    }

    /// Random XOR key for string masking.
    pub fn byte_key(&mut self) -> u8 {
        self.rng.gen_range(1..=255)
    }

    /// Non-zero initial state for the dispatch loop.
    pub fn state_value(&mut self) -> u32 {
        self.rng.gen_range(1..=999_999)
    }

    /// Fair coin.
    pub fn coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}
