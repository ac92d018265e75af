use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Default region for tags that only name a language
const LANGUAGE_DEFAULTS: &[(&str, &str)] = &[
    ("de", "de_DE"),
    ("en", "en_US"),
    ("es", "es_ES"),
    ("fr", "fr_FR"),
    ("it", "it_IT"),
    ("ja", "ja_JP"),
    ("ko", "ko_KR"),
    ("nl", "nl_NL"),
    ("pt", "pt_PT"),
    ("ru", "ru_RU"),
    ("vi", "vi_VN"),
    ("zh", "zh_CN"),
];

static SYSTEM_DEFAULT: Lazy<Locale> = Lazy::new(Locale::from_env);

/// A language/region identifier backed by chrono's locale tables.
///
/// Accepts BCP-47 style tags (`en-US`) as well as POSIX locale names
/// (`en_US.UTF-8`, `de_DE@euro`, `C`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale(chrono::Locale);

impl Locale {
    pub const EN_US: Locale = Locale(chrono::Locale::en_US);
    pub const POSIX: Locale = Locale(chrono::Locale::POSIX);

    /// Parse a locale tag
    pub fn parse(tag: &str) -> Result<Self> {
        let unknown = || Error::UnknownLocale(tag.to_string());
        let normalized = tag.trim().replace('-', "_");

        let (main, modifier) = match normalized.split_once('@') {
            Some((main, modifier)) => (main, Some(modifier)),
            None => (normalized.as_str(), None),
        };
        // Drop the codeset: en_US.UTF-8 -> en_US
        let main = main.split('.').next().unwrap_or(main);
        if main.is_empty() {
            return Err(unknown());
        }
        if main == "C" || main.eq_ignore_ascii_case("posix") {
            return Ok(Self::POSIX);
        }

        let name = match main.split_once('_') {
            Some((language, region)) => {
                format!("{}_{}", language.to_lowercase(), region.to_uppercase())
            }
            None => {
                let language = main.to_lowercase();
                LANGUAGE_DEFAULTS
                    .iter()
                    .find(|(lang, _)| *lang == language)
                    .map(|(_, name)| name.to_string())
                    .unwrap_or(language)
            }
        };

        if let Some(modifier) = modifier
            && let Ok(locale) = chrono::Locale::try_from(format!("{}@{}", name, modifier).as_str())
        {
            return Ok(Self(locale));
        }

        chrono::Locale::try_from(name.as_str())
            .map(Self)
            .map_err(|_| unknown())
    }

    /// The process default locale, resolved once from the environment.
    ///
    /// See [`Locale::from_env_values`] for the resolution order.
    pub fn system_default() -> Self {
        *SYSTEM_DEFAULT
    }

    fn from_env() -> Self {
        let lc_all = std::env::var("LC_ALL").ok();
        let lc_time = std::env::var("LC_TIME").ok();
        let lang = std::env::var("LANG").ok();
        Self::from_env_values(lc_all.as_deref(), lc_time.as_deref(), lang.as_deref())
    }

    /// Resolve a locale the way POSIX resolves `LC_TIME`:
    /// 1. `LC_ALL`
    /// 2. `LC_TIME`
    /// 3. `LANG`
    ///
    /// The first non-empty value wins. Absent or unrecognized values fall back to `en-US`.
    pub fn from_env_values(lc_all: Option<&str>, lc_time: Option<&str>, lang: Option<&str>) -> Self {
        [lc_all, lc_time, lang]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .and_then(|value| Self::parse(value).ok())
            .unwrap_or(Self::EN_US)
    }

    /// The BCP-47 style tag, e.g. `en-US`
    pub fn tag(&self) -> String {
        self.0.to_string().replace('_', "-")
    }

    /// The underlying chrono locale
    pub fn as_chrono(&self) -> chrono::Locale {
        self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::system_default()
    }
}

impl From<chrono::Locale> for Locale {
    fn from(locale: chrono::Locale) -> Self {
        Self(locale)
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Locale({})", self.tag())
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.tag())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Locale::parse(&tag).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag_forms() {
        let expected = Locale::from(chrono::Locale::de_DE);

        assert_eq!(Locale::parse("de-DE").unwrap(), expected);
        assert_eq!(Locale::parse("de_DE").unwrap(), expected);
        assert_eq!(Locale::parse("de_DE.UTF-8").unwrap(), expected);
        assert_eq!(Locale::parse("de-de").unwrap(), expected);
        assert_eq!(Locale::parse("de").unwrap(), expected);
        assert_eq!(Locale::parse(" de-DE ").unwrap(), expected);
    }

    #[test]
    fn test_parse_posix_names() {
        assert_eq!(Locale::parse("C").unwrap(), Locale::POSIX);
        assert_eq!(Locale::parse("POSIX").unwrap(), Locale::POSIX);
        assert_eq!(Locale::parse("C.UTF-8").unwrap(), Locale::POSIX);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            Locale::parse("xx-YY"),
            Err(Error::UnknownLocale(tag)) if tag == "xx-YY"
        ));
        assert!(Locale::parse("").is_err());
    }

    #[test]
    fn test_modifier_variants() {
        assert_eq!(
            Locale::parse("de_DE@euro").unwrap(),
            Locale::from(chrono::Locale::de_DE_euro)
        );
        assert_eq!(
            Locale::parse("de_DE.UTF-8@nosuchmodifier").unwrap(),
            Locale::from(chrono::Locale::de_DE)
        );
    }

    #[test]
    fn test_tag_display() {
        assert_eq!(Locale::EN_US.to_string(), "en-US");
        assert_eq!(Locale::POSIX.to_string(), "POSIX");
        assert_eq!(format!("{:?}", Locale::EN_US), "Locale(en-US)");
    }

    #[test]
    fn test_env_resolution_order() {
        let vi = Locale::from(chrono::Locale::vi_VN);
        let fr = Locale::from(chrono::Locale::fr_FR);

        assert_eq!(
            Locale::from_env_values(Some("vi_VN.UTF-8"), Some("fr_FR"), Some("de_DE")),
            vi
        );
        assert_eq!(
            Locale::from_env_values(Some(""), Some("fr_FR"), Some("de_DE")),
            fr
        );
        assert_eq!(Locale::from_env_values(None, None, None), Locale::EN_US);
        assert_eq!(
            Locale::from_env_values(None, None, Some("garbage")),
            Locale::EN_US
        );
    }

    #[test]
    fn test_system_default_is_stable() {
        assert_eq!(Locale::system_default(), Locale::system_default());
        assert_eq!(Locale::default(), Locale::system_default());
    }

    #[test]
    fn test_serde_as_tag() {
        let json = serde_json::to_string(&Locale::EN_US).unwrap();
        assert_eq!(json, "\"en-US\"");

        let back: Locale = serde_json::from_str("\"fr_FR\"").unwrap();
        assert_eq!(back, Locale::from(chrono::Locale::fr_FR));

        assert!(serde_json::from_str::<Locale>("\"nope\"").is_err());
    }
}
