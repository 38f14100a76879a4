//! Rule block synthesis and rendering

use std::fmt::{self, Write};

use crate::lang::{LanguageSet, LanguageTag};

/// One fragment of the generated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleBlock {
    /// Prepend `family` when the pattern asks for `lang` and the generic family matches.
    LanguageMatch {
        lang: LanguageTag,
        generic: String,
        family: String,
    },
    /// Prepend `family` when the pattern asks for the generic family by name.
    FamilyMatch { generic: String, family: String },
    /// Fall back from `family` to the generic family.
    Alias { family: String, generic: String },
}

impl fmt::Display for RuleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LanguageMatch {
                lang,
                generic,
                family,
            } => write!(
                f,
                "  <match pattern=\"pattern\">\n\
                 \x20   <test name=\"lang\" compare=\"contains\">\n\
                 \x20     <string>{}</string>\n\
                 \x20   </test>\n\
                 \x20   <test name=\"genericfamily\">\n\
                 \x20     <const>{}</const>\n\
                 \x20   </test>\n\
                 \x20   <edit name=\"family\" mode=\"prepend\">\n\
                 \x20     <string>{}</string>\n\
                 \x20   </edit>\n\
                 \x20 </match>\n\n",
                Escaped(lang.as_str()),
                Escaped(generic),
                Escaped(family)
            ),
            Self::FamilyMatch { generic, family } => write!(
                f,
                "  <match target=\"pattern\">\n\
                 \x20   <test name=\"family\">\n\
                 \x20     <string>{}</string>\n\
                 \x20   </test>\n\
                 \x20   <edit name=\"family\" mode=\"prepend\">\n\
                 \x20     <string>{}</string>\n\
                 \x20   </edit>\n\
                 \x20 </match>\n",
                Escaped(generic),
                Escaped(family)
            ),
            Self::Alias { family, generic } => write!(
                f,
                "  <alias>\n\
                 \x20   <family>{}</family>\n\
                 \x20   <default><family>{}</family></default>\n\
                 \x20 </alias>\n",
                Escaped(family),
                Escaped(generic)
            ),
        }
    }
}

/// XML character data escaping for element text.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.0.chars() {
            match ch {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                other => f.write_char(other)?,
            }
        }
        Ok(())
    }
}

/// Build the rule group for one family.
///
/// With languages: one [`RuleBlock::LanguageMatch`] per tag in set order and
/// a single trailing alias. Without: a [`RuleBlock::FamilyMatch`] for the
/// generic name plus the alias, which together point both ways.
pub fn synthesize(family: &str, generic: &str, languages: &LanguageSet) -> Vec<RuleBlock> {
    let mut blocks = Vec::with_capacity(languages.len().max(1) + 1);

    if languages.is_empty() {
        blocks.push(RuleBlock::FamilyMatch {
            generic: generic.to_string(),
            family: family.to_string(),
        });
    } else {
        blocks.extend(languages.iter().map(|lang| RuleBlock::LanguageMatch {
            lang: lang.clone(),
            generic: generic.to_string(),
            family: family.to_string(),
        }));
    }

    blocks.push(RuleBlock::Alias {
        family: family.to_string(),
        generic: generic.to_string(),
    });
    blocks
}
