//! Settings model — step toggles, presets, dialect and identifier style.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One rewrite pass. Variant order is the fixed pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    EncryptStrings,
    ControlFlowFlatten,
    OpaquePredicates,
    JunkCode,
    NumbersToExpressions,
    ConstantArray,
    AntiTamper,
    Vmify,
    WrapInFunction,
}

impl Step {
    pub const ALL: [Step; 9] = [
        Step::EncryptStrings,
        Step::ControlFlowFlatten,
        Step::OpaquePredicates,
        Step::JunkCode,
        Step::NumbersToExpressions,
        Step::ConstantArray,
        Step::AntiTamper,
        Step::Vmify,
        Step::WrapInFunction,
    ];

    /// Flag name as it appears in settings documents.
    pub fn key(&self) -> &'static str {
        match self {
            Step::EncryptStrings => "encryptStrings",
            Step::ControlFlowFlatten => "controlFlowFlatten",
            Step::OpaquePredicates => "opaquePredicates",
            Step::JunkCode => "junkCode",
            Step::NumbersToExpressions => "numbersToExpressions",
            Step::ConstantArray => "constantArray",
            Step::AntiTamper => "antiTamper",
            Step::Vmify => "vmify",
            Step::WrapInFunction => "wrapInFunction",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The nine step toggles. Every key is required when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StepFlags {
    pub encrypt_strings: bool,
    pub control_flow_flatten: bool,
    pub opaque_predicates: bool,
    pub junk_code: bool,
    pub numbers_to_expressions: bool,
    pub constant_array: bool,
    pub anti_tamper: bool,
    pub vmify: bool,
    pub wrap_in_function: bool,
}

impl StepFlags {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self::from_steps(&Step::ALL)
    }

    pub fn from_steps(steps: &[Step]) -> Self {
        let mut flags = Self::none();
        for step in steps {
            *flags.slot(*step) = true;
        }
        flags
    }

    pub fn get(&self, step: Step) -> bool {
        match step {
            Step::EncryptStrings => self.encrypt_strings,
            Step::ControlFlowFlatten => self.control_flow_flatten,
            Step::OpaquePredicates => self.opaque_predicates,
            Step::JunkCode => self.junk_code,
            Step::NumbersToExpressions => self.numbers_to_expressions,
            Step::ConstantArray => self.constant_array,
            Step::AntiTamper => self.anti_tamper,
            Step::Vmify => self.vmify,
            Step::WrapInFunction => self.wrap_in_function,
        }
    }

    fn slot(&mut self, step: Step) -> &mut bool {
        match step {
            Step::EncryptStrings => &mut self.encrypt_strings,
            Step::ControlFlowFlatten => &mut self.control_flow_flatten,
            Step::OpaquePredicates => &mut self.opaque_predicates,
            Step::JunkCode => &mut self.junk_code,
            Step::NumbersToExpressions => &mut self.numbers_to_expressions,
            Step::ConstantArray => &mut self.constant_array,
            Step::AntiTamper => &mut self.anti_tamper,
            Step::Vmify => &mut self.vmify,
            Step::WrapInFunction => &mut self.wrap_in_function,
        }
    }

    /// Enabled steps in pipeline order.
    pub fn enabled(&self) -> impl Iterator<Item = Step> + '_ {
        Step::ALL.into_iter().filter(|s| self.get(*s))
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled().count()
    }
}

/// Named step combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    Minify,
    Weak,
    Medium,
    Strong,
    Maximum,
    Performance,
    LuaU,
    Custom,
}

impl Preset {
    pub const ALL: [Preset; 8] = [
        Preset::Minify,
        Preset::Weak,
        Preset::Medium,
        Preset::Strong,
        Preset::Maximum,
        Preset::Performance,
        Preset::LuaU,
        Preset::Custom,
    ];

    /// Fixed flag combination, `None` for `Custom`.
    pub fn flags(&self) -> Option<StepFlags> {
        use Step::*;
        let steps: &[Step] = match self {
            Preset::Minify => &[],
            Preset::Weak => &[EncryptStrings, NumbersToExpressions, WrapInFunction],
            Preset::Medium => &[
                EncryptStrings,
                OpaquePredicates,
                NumbersToExpressions,
                ConstantArray,
                AntiTamper,
                WrapInFunction,
            ],
            Preset::Strong => &[
                EncryptStrings,
                ControlFlowFlatten,
                OpaquePredicates,
                JunkCode,
                NumbersToExpressions,
                ConstantArray,
                AntiTamper,
                WrapInFunction,
            ],
            Preset::Maximum => &Step::ALL,
            Preset::Performance => &[EncryptStrings, ConstantArray, WrapInFunction],
            // No payload loader: Roblox ships with loadstring disabled.
            Preset::LuaU => &[
                EncryptStrings,
                ControlFlowFlatten,
                OpaquePredicates,
                NumbersToExpressions,
                ConstantArray,
                WrapInFunction,
            ],
            Preset::Custom => return None,
        };
        Some(StepFlags::from_steps(steps))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Target language flavour. Advisory only: nothing is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dialect {
    #[default]
    Lua51,
    LuaU,
}

impl Dialect {
    pub fn default_preset(&self) -> Preset {
        match self {
            Dialect::Lua51 => Preset::Medium,
            Dialect::LuaU => Preset::LuaU,
        }
    }
}

/// Alphabet family for generated identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdentifierStyle {
    /// Mixed-case letters and underscore.
    #[default]
    Default,
    /// `l`-prefixed runs of look-alike glyphs.
    Confusable,
    /// `_` followed by digits.
    Numeric,
    /// One or two lowercase letters.
    Minimal,
}

/// Full settings record.
///
/// `preset` and `steps` are only reachable through methods so a named preset
/// never labels a flag combination it does not produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawSettings")]
pub struct Settings {
    preset: Preset,
    pub dialect: Dialect,
    pub identifier_style: IdentifierStyle,
    steps: StepFlags,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    preset: Preset,
    #[serde(default)]
    dialect: Dialect,
    #[serde(default)]
    identifier_style: IdentifierStyle,
    steps: StepFlags,
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        let preset = match raw.preset.flags() {
            Some(flags) if flags != raw.steps => {
                tracing::debug!(preset = %raw.preset, "flags diverge from preset, relabelling as Custom");
                Preset::Custom
            }
            _ => raw.preset,
        };
        Self {
            preset,
            dialect: raw.dialect,
            identifier_style: raw.identifier_style,
            steps: raw.steps,
        }
    }
}

impl Settings {
    /// Settings for a dialect, expanded from its default preset.
    pub fn for_dialect(dialect: Dialect) -> Self {
        let mut s = Self {
            preset: Preset::Custom,
            dialect,
            identifier_style: IdentifierStyle::Default,
            steps: StepFlags::none(),
        };
        s.apply_preset(dialect.default_preset());
        s
    }

    pub fn with_preset(preset: Preset) -> Self {
        let mut s = Self::default();
        s.apply_preset(preset);
        s
    }

    /// Settings labelled `Custom` with exactly the given flags.
    pub fn custom(steps: StepFlags) -> Self {
        Self {
            preset: Preset::Custom,
            dialect: Dialect::default(),
            identifier_style: IdentifierStyle::Default,
            steps,
        }
    }

    pub fn with_style(mut self, style: IdentifierStyle) -> Self {
        self.identifier_style = style;
        self
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn steps(&self) -> &StepFlags {
        &self.steps
    }

    /// Select a preset. Non-Custom presets overwrite all nine flags;
    /// selecting Custom keeps the current flags.
    pub fn apply_preset(&mut self, preset: Preset) {
        if let Some(flags) = preset.flags() {
            self.steps = flags;
        }
        self.preset = preset;
    }

    /// Toggle one step. Always relabels the settings as Custom.
    pub fn set_step(&mut self, step: Step, enabled: bool) {
        *self.steps.slot(step) = enabled;
        self.preset = Preset::Custom;
    }

    pub fn is_enabled(&self, step: Step) -> bool {
        self.steps.get(step)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::for_dialect(Dialect::default())
    }
}
