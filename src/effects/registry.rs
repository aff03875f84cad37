//! The built-in effect table.
//!
//! Every effect is a row in [`EFFECTS`]. Lookup tries an exact name match
//! first, then a case-insensitive match against names and aliases, so the
//! capitalised spellings (`Sketch`, `AutoTone`, `Line`) resolve too.

use super::definition::{EffectDefinition, Executable, Invocation, OptionArg};

use Invocation::{InputOptionsOutput, OptionsInputOutput};
use OptionArg::{Asset, Literal};

const fn lit<const N: usize>(args: [&'static str; N]) -> [OptionArg; N] {
    let mut out = [Literal(""); N];
    let mut i = 0;
    while i < N {
        out[i] = Literal(args[i]);
        i += 1;
    }
    out
}

const CONTRAST: [OptionArg; 2] = lit(["-sigmoidal-contrast", "10x40%"]);
const AUTOCOLOR: [OptionArg; 4] = lit(["-m", "gamma", "-c", "separate"]);
const CHARCOAL: [OptionArg; 5] = lit(["-k", "gray", "-c", "175", "-g"]);
const SKETCH: [OptionArg; 4] = lit(["-k", "gray", "-c", "175"]);
const EDGEFX: [OptionArg; 6] = lit(["-s", "5", "-m", "100", "-c", "overlay"]);
const COMPOSITE: [OptionArg; 3] = lit(["-tile", "-compose", "Hardlight"]);
const SPLITTONE: [OptionArg; 10] = lit([
    "-sc", "red", "-sa", "30", "-hc", "skyblue", "-ha", "30", "-m", "SH",
]);
const SPLITTONE2: [OptionArg; 10] = lit([
    "-sc", "gold", "-sa", "30", "-hc", "pink", "-ha", "30", "-m", "SH",
]);
const BORDER: [OptionArg; 2] = lit(["-T", "torn"]);
const LINES: [OptionArg; 13] = lit([
    "-colorspace",
    "gray",
    "(",
    "+clone",
    "-blur",
    "0x2",
    ")",
    "+swap",
    "-compose",
    "divide",
    "-composite",
    "-linear-stretch",
    "5%x0%",
]);
const PENCIL: [OptionArg; 16] = [
    Literal("-colorspace"),
    Literal("gray"),
    Literal("("),
    Literal("+clone"),
    Literal("-tile"),
    Asset("pencil_tile.gif"),
    Literal("-draw"),
    Literal("color 0,0 reset"),
    Literal("+clone"),
    Literal("+swap"),
    Literal("-compose"),
    Literal("color_dodge"),
    Literal("-composite"),
    Literal(")"),
    Literal("-fx"),
    Literal("u*.2+v*.8"),
];

const fn script(
    name: &'static str,
    description: &'static str,
    executable: &'static str,
    options: &'static [OptionArg],
) -> EffectDefinition {
    EffectDefinition {
        name,
        aliases: &[],
        description,
        executable: Executable::Script(executable),
        invocation: OptionsInputOutput,
        options,
    }
}

/// All registered effects, in display order.
pub static EFFECTS: &[EffectDefinition] = &[
    EffectDefinition {
        name: "contrast",
        aliases: &[],
        description: "Sigmoidal contrast boost",
        executable: Executable::Convert,
        invocation: InputOptionsOutput,
        options: &CONTRAST,
    },
    script("vintage", "Faded warm print with vignette", "vintage1", &[]),
    script("vintage2", "Cross-processed vintage look", "vintage2", &[]),
    script("vintage3", "Aged print with grain", "vintage3", &[]),
    EffectDefinition {
        aliases: &["auto-tone"],
        ..script("autotone", "Automatic levels, gamma and sharpening", "autotone", &[])
    },
    EffectDefinition {
        aliases: &["auto-color"],
        ..script("autocolor", "Per-channel automatic gamma", "autocolor", &AUTOCOLOR)
    },
    script("davehill", "High-contrast grungy \"Dave Hill\" look", "davehilleffect", &[]),
    script("charcoal", "Gray charcoal drawing", "sketch", &CHARCOAL),
    script("sketch", "Gray pencil sketch", "sketch", &SKETCH),
    EffectDefinition {
        name: "pencil",
        aliases: &[],
        description: "Pencil shading from a tiled stroke texture",
        executable: Executable::Convert,
        invocation: InputOptionsOutput,
        options: &PENCIL,
    },
    EffectDefinition {
        name: "lines",
        aliases: &["line"],
        description: "Line drawing via color-divide edge extraction",
        executable: Executable::Convert,
        invocation: InputOptionsOutput,
        options: &LINES,
    },
    script("edgefx", "Overlay of extracted edges", "edgefx", &EDGEFX),
    EffectDefinition {
        name: "composite",
        aliases: &[],
        description: "Hard-light fabric texture overlay",
        executable: Executable::Composite {
            overlay: "texture_fabric.gif",
        },
        invocation: InputOptionsOutput,
        options: &COMPOSITE,
    },
    EffectDefinition {
        aliases: &["split-tone"],
        ..script("splittone", "Red shadows, sky-blue highlights", "splittone1", &SPLITTONE)
    },
    script("splittone2", "Gold shadows, pink highlights", "splittone1", &SPLITTONE2),
    script("border", "Torn paper border", "border", &BORDER),
];

/// The full ordered registry.
pub fn definitions() -> &'static [EffectDefinition] {
    EFFECTS
}

/// Resolve an effect by name. Exact match wins; otherwise names and aliases
/// are compared ignoring ASCII case.
pub fn lookup(name: &str) -> Option<&'static EffectDefinition> {
    EFFECTS
        .iter()
        .find(|def| def.name == name)
        .or_else(|| EFFECTS.iter().find(|def| def.answers_to(name)))
}
