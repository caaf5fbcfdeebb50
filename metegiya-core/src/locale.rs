//! Locale content store for the three supported interface languages.
//!
//! A closed set of language codes (`am`, `om`, `ti`) maps to complete
//! static string tables. Switching locale swaps the whole table at once;
//! the choice itself is transient and never persisted, so every session
//! starts from the configured default.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Amharic (አማርኛ)
    #[default]
    #[serde(rename = "am")]
    Amharic,
    /// Afaan Oromoo
    #[serde(rename = "om")]
    Oromo,
    /// Tigrinya (ትግርኛ)
    #[serde(rename = "ti")]
    Tigrinya,
}

impl Locale {
    /// All supported locales, in switcher order.
    pub const ALL: [Locale; 3] = [Locale::Amharic, Locale::Oromo, Locale::Tigrinya];

    /// Two-letter language code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Amharic => "am",
            Locale::Oromo => "om",
            Locale::Tigrinya => "ti",
        }
    }

    /// Name of the language in the language itself.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::Amharic => "አማርኛ",
            Locale::Oromo => "Afaan Oromoo",
            Locale::Tigrinya => "ትግርኛ",
        }
    }

    /// English label for the language.
    pub fn english_name(&self) -> &'static str {
        match self {
            Locale::Amharic => "Amharic",
            Locale::Oromo => "Oromo",
            Locale::Tigrinya => "Tigrinya",
        }
    }

    /// The full string table for this locale.
    pub fn content(&self) -> &'static LocaleContent {
        content(*self)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "am" | "amharic" => Ok(Locale::Amharic),
            "om" | "oromo" => Ok(Locale::Oromo),
            "ti" | "tigrinya" => Ok(Locale::Tigrinya),
            _ => Err(Error::UnknownLocale(s.to_string())),
        }
    }
}

/// Complete display-string table for one language.
///
/// Every user-visible phrase lives here; code never concatenates localized
/// fragments. `reminders` and `map_packs` are fixed-size on purpose: the
/// safety reminders are a curated set of four and the pack catalog names
/// three regions per language (the same regions, translated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleContent {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub emergency: &'static str,
    pub contacts_title: &'static str,
    pub trusted_title: &'static str,
    pub trusted_empty: &'static str,
    pub reminders_title: &'static str,
    pub reminders: [&'static str; 4],
    pub footer: &'static str,
    /// Shown when a position request fails after the service ran.
    pub location_alert: &'static str,
    /// Shown when no location service is available at all.
    pub location_error: &'static str,
    /// Emergency phrase prepended to the location link in alert bodies.
    pub sms_body: &'static str,
    pub maps_title: &'static str,
    pub map_caption: &'static str,
    pub download_map: &'static str,
    pub map_packs: [&'static str; 3],
    pub whatsapp_emergency: &'static str,
}

static AMHARIC: LocaleContent = LocaleContent {
    title: "መጠጊያ",
    subtitle: "አንቺ ብቻሽን አይደለሽም",
    emergency: "🚨 አደጋ ጊዜ",
    contacts_title: "የአደጋ ጊዜ ስልኮች",
    trusted_title: "የታመኑ ስልኮች",
    trusted_empty: "ምንም የታመነ ስልክ አልተጨመረም",
    reminders_title: "የደህንነት ማሳሰቢያዎች",
    reminders: [
        "አንቺ ብቻሽን አይደለሽም",
        "ገንዘብሽን አስቀምጪ",
        "ገንዘብሽን ለማንም አትስጪ",
        "ፓስፖርትሽን ጠብቂ",
    ],
    footer: "ነፃ • ማስታወቂያ የሌለው • መግቢያ የማይጠይቅ",
    location_alert: "እባክዎን የቦታ መገኛ ፍቃድ ይስጡ",
    location_error: "የቦታ መገኛ ማግኘት አልተቻለም",
    sms_body: "አስቸኳይ እርዳታ እፈልጋለሁ! ያለሁበት ቦታ:",
    maps_title: "የማይገናኝ ካርታ (Offline Maps)",
    map_caption: "ካርታው በኢንተርኔት ሲገናኙ በራሱ ይቀመጣል",
    download_map: "ካርታ አውርድ",
    map_packs: ["ዱባይ (ዴይራ)", "አቡ ዳቢ", "ሻርጃ"],
    whatsapp_emergency: "በዋትስአፕ ላክ (WhatsApp)",
};

static OROMO: LocaleContent = LocaleContent {
    title: "Metegiya",
    subtitle: "Ati qofti hin jirtu",
    emergency: "🚨 Yeroo balaa",
    contacts_title: "Lakkoofsota Balaa",
    trusted_title: "Namoota Amanamoo",
    trusted_empty: "No trusted contacts added",
    reminders_title: "Yaadachiisa Nageenyaa",
    reminders: [
        "Ati qofti hin jirtu",
        "Maallaqa kee qusadhu",
        "Maallaqa kee nama kamiifuu hin kennin",
        "Paaspoortii kee eegi",
    ],
    footer: "Bilisa • Beeksisa kan hin qabne • Galmee kan hin gaafanne",
    location_alert: "Maaloo hayyama bakka kee kenni",
    location_error: "Bakka kee argachuun hin danda'amne",
    sms_body: "Gargaarsa ariifachiisaa nan barbaada! Bakki ani jiru:",
    maps_title: "Kaartaa Intarneeta Malee",
    map_caption: "Maps are automatically cached for offline use.",
    download_map: "Kaartaa Buufadhu",
    map_packs: ["Dubai (Deira)", "Abu Dhabi", "Sharjah"],
    whatsapp_emergency: "WhatsApp'n Ergi",
};

static TIGRINYA: LocaleContent = LocaleContent {
    title: "መጠጊያ",
    subtitle: "በይንኺ ኣይኮንኪን",
    emergency: "🚨 ሓደጋ",
    contacts_title: "ናይ ሓደጋ ግዜ ቴሌፎናት",
    trusted_title: "ዝተኣመኑ ቴሌፎናት",
    trusted_empty: "No trusted contacts added",
    reminders_title: "ናይ ድሕንነት መዘኻኸሪታት",
    reminders: [
        "በይንኺ ኣይኮንኪን",
        "ገንዘብኪ ኣቑር",
        "ገንዘብኪ ንማንም ኣይትሃብ",
        "ፓስፖርትኪ ሓልዊ",
    ],
    footer: "ብነጻ • ምልክታ የብሉን • መእተዊ ኣይሓትትን",
    location_alert: "በጃኺ ናይ ቦታ መፍቀዲ ሃቢ",
    location_error: "ቦታኺ ክርከብ ኣይተኻእለን",
    sms_body: "ህጹጽ ሓገዝ እደሊ ኣለኹ! ዘለኹዎ ቦታ:",
    maps_title: "ኢንተርኔት ዘየድልዮ ካርታ",
    map_caption: "Maps are automatically cached for offline use.",
    download_map: "ካርታ ኣውርድ",
    map_packs: ["ዱባይ (ዴይራ)", "አቡ ዳቢ", "ሻርጃ"],
    whatsapp_emergency: "ብዋትስአፕ ስደድ (WhatsApp)",
};

/// Look up the string table for a locale. Total: every variant has a table.
pub fn content(locale: Locale) -> &'static LocaleContent {
    match locale {
        Locale::Amharic => &AMHARIC,
        Locale::Oromo => &OROMO,
        Locale::Tigrinya => &TIGRINYA,
    }
}
