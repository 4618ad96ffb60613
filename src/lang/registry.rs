//! Language registry: the static code tables.
//!
//! Holds every supported language code, the per-direction exception lists and
//! the request/response code mappings. Tables are built once on first access
//! through `OnceLock` and never mutated afterwards.

use crate::lang::LanguageType;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Every supported code with its English display name.
const LANGUAGES: &[(&str, &str)] = &[
    ("auto", "Detect"),
    ("af", "Afrikaans"),
    ("sq", "Albanian"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("hy", "Armenian"),
    ("as", "Assamese"),
    ("ay", "Aymara"),
    ("az", "Azerbaijani"),
    ("bm", "Bambara"),
    ("eu", "Basque"),
    ("be", "Belarusian"),
    ("bn", "Bengali"),
    ("bho", "Bhojpuri"),
    ("bs", "Bosnian"),
    ("bg", "Bulgarian"),
    ("ca", "Catalan"),
    ("ceb", "Cebuano"),
    ("ny", "Chichewa"),
    ("zh", "Chinese"),
    ("zh_HANT", "Chinese (Traditional)"),
    ("co", "Corsican"),
    ("hr", "Croatian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("dv", "Dhivehi"),
    ("doi", "Dogri"),
    ("nl", "Dutch"),
    ("en", "English"),
    ("eo", "Esperanto"),
    ("et", "Estonian"),
    ("ee", "Ewe"),
    ("tl", "Filipino"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("fy", "Frisian"),
    ("gl", "Galician"),
    ("ka", "Georgian"),
    ("de", "German"),
    ("el", "Greek"),
    ("gn", "Guarani"),
    ("gu", "Gujarati"),
    ("ht", "Haitian Creole"),
    ("ha", "Hausa"),
    ("haw", "Hawaiian"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hmn", "Hmong"),
    ("hu", "Hungarian"),
    ("is", "Icelandic"),
    ("ig", "Igbo"),
    ("ilo", "Ilocano"),
    ("id", "Indonesian"),
    ("ga", "Irish"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("jv", "Javanese"),
    ("kn", "Kannada"),
    ("kk", "Kazakh"),
    ("km", "Khmer"),
    ("rw", "Kinyarwanda"),
    ("gom", "Konkani"),
    ("ko", "Korean"),
    ("kri", "Krio"),
    ("ku", "Kurdish (Kurmanji)"),
    ("ckb", "Kurdish (Sorani)"),
    ("ky", "Kyrgyz"),
    ("lo", "Lao"),
    ("la", "Latin"),
    ("lv", "Latvian"),
    ("ln", "Lingala"),
    ("lt", "Lithuanian"),
    ("lg", "Luganda"),
    ("lb", "Luxembourgish"),
    ("mk", "Macedonian"),
    ("mai", "Maithili"),
    ("mg", "Malagasy"),
    ("ms", "Malay"),
    ("ml", "Malayalam"),
    ("mt", "Maltese"),
    ("mi", "Maori"),
    ("mr", "Marathi"),
    ("mni", "Meiteilon (Manipuri)"),
    ("lus", "Mizo"),
    ("mn", "Mongolian"),
    ("my", "Myanmar (Burmese)"),
    ("ne", "Nepali"),
    ("no", "Norwegian"),
    ("or", "Odia (Oriya)"),
    ("om", "Oromo"),
    ("ps", "Pashto"),
    ("fa", "Persian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("pa", "Punjabi"),
    ("qu", "Quechua"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sm", "Samoan"),
    ("sa", "Sanskrit"),
    ("gd", "Scots Gaelic"),
    ("nso", "Sepedi"),
    ("sr", "Serbian"),
    ("st", "Sesotho"),
    ("sn", "Shona"),
    ("sd", "Sindhi"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("so", "Somali"),
    ("es", "Spanish"),
    ("su", "Sundanese"),
    ("sw", "Swahili"),
    ("sv", "Swedish"),
    ("tg", "Tajik"),
    ("ta", "Tamil"),
    ("tt", "Tatar"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("ti", "Tigrinya"),
    ("ts", "Tsonga"),
    ("tr", "Turkish"),
    ("tk", "Turkmen"),
    ("ak", "Twi"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("ug", "Uyghur"),
    ("uz", "Uzbek"),
    ("vi", "Vietnamese"),
    ("cy", "Welsh"),
    ("xh", "Xhosa"),
    ("yi", "Yiddish"),
    ("yo", "Yoruba"),
    ("zu", "Zulu"),
];

/// Codes not usable as a source, with the code used in their place.
/// A script variant only makes sense as a target; as a source it collapses
/// to its base language.
pub(crate) const SOURCE_EXCEPTIONS: &[(&str, &str)] = &[("zh_HANT", "zh")];

/// Codes not usable as a target, with the code used in their place.
pub(crate) const TARGET_EXCEPTIONS: &[(&str, &str)] = &[("auto", "en")];

/// Internal code -> provider code, for outgoing requests.
const REQUEST_MAPPINGS: &[(&str, &str)] = &[
    ("zh", "zh-CN"),
    ("zh_HANT", "zh-TW"),
    ("he", "iw"),
    ("jv", "jw"),
    ("mni", "mni-Mtei"),
];

/// Provider code -> internal code, for codes found in responses.
const RESPONSE_MAPPINGS: &[(&str, &str)] = &[
    ("zh-CN", "zh"),
    ("zh-TW", "zh_HANT"),
    ("iw", "he"),
    ("jw", "jv"),
    ("mni-Mtei", "mni"),
];

pub type LanguageMap = BTreeMap<&'static str, &'static str>;

/// Global language registry singleton.
pub struct LanguageRegistry {
    all: LanguageMap,
    source: LanguageMap,
    target: LanguageMap,
    request_mappings: HashMap<&'static str, &'static str>,
    response_mappings: HashMap<&'static str, &'static str>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| {
            let all: LanguageMap = LANGUAGES.iter().copied().collect();
            LanguageRegistry {
                source: without(&all, SOURCE_EXCEPTIONS),
                target: without(&all, TARGET_EXCEPTIONS),
                all,
                request_mappings: REQUEST_MAPPINGS.iter().copied().collect(),
                response_mappings: RESPONSE_MAPPINGS.iter().copied().collect(),
            }
        })
    }

    /// All codes, or the codes eligible for one direction
    pub fn list(&self, direction: Option<LanguageType>) -> &LanguageMap {
        match direction {
            None => &self.all,
            Some(LanguageType::Source) => &self.source,
            Some(LanguageType::Target) => &self.target,
        }
    }

    /// Look up a code's registered `&'static str` and display name
    pub fn get_by_code(&self, code: &str) -> Option<(&'static str, &'static str)> {
        self.all.get_key_value(code).map(|(code, name)| (*code, *name))
    }

    pub fn exceptions(&self, direction: LanguageType) -> &'static [(&'static str, &'static str)] {
        match direction {
            LanguageType::Source => SOURCE_EXCEPTIONS,
            LanguageType::Target => TARGET_EXCEPTIONS,
        }
    }

    pub fn request_mapping(&self, code: &str) -> Option<&'static str> {
        self.request_mappings.get(code).copied()
    }

    pub fn response_mapping(&self, code: &str) -> Option<&'static str> {
        self.response_mappings.get(code).copied()
    }

    /// Whether either mapping table mentions `code` on either side
    #[cfg(test)]
    pub(crate) fn is_mapped(&self, code: &str) -> bool {
        REQUEST_MAPPINGS
            .iter()
            .chain(RESPONSE_MAPPINGS)
            .any(|(from, to)| *from == code || *to == code)
    }
}

fn without(all: &LanguageMap, exceptions: &[(&str, &str)]) -> LanguageMap {
    all.iter()
        .filter(|(code, _)| !exceptions.iter().any(|(excepted, _)| excepted == *code))
        .map(|(code, name)| (*code, *name))
        .collect()
}
