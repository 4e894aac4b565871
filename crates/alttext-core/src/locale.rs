//! Locale to English language name resolution.
//!
//! Only the primary language subtag matters: `de-AT`, `de_DE.UTF-8` and `de`
//! all resolve to "German". Unknown or malformed input resolves to `None`
//! so callers can simply omit the language instruction.

/// Resolve a BCP-47-like locale string to the English name of its primary language.
pub fn language_name(locale: &str) -> Option<&'static str> {
    let primary = primary_subtag(locale)?;
    lookup(&primary)
}

/// Extract and normalize the primary language subtag.
///
/// Accepts 2- and 3-letter ASCII alphabetic subtags only.
pub fn primary_subtag(locale: &str) -> Option<String> {
    let primary = locale
        .trim()
        .split(['-', '_', '.', '@'])
        .next()
        .unwrap_or_default();

    let valid = (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic());
    valid.then(|| primary.to_ascii_lowercase())
}

fn lookup(code: &str) -> Option<&'static str> {
    let name = match code {
        "af" | "afr" => "Afrikaans",
        "ar" | "ara" => "Arabic",
        "bg" | "bul" => "Bulgarian",
        "bn" | "ben" => "Bangla",
        "bs" | "bos" => "Bosnian",
        "ca" | "cat" => "Catalan",
        "cs" | "ces" | "cze" => "Czech",
        "cy" | "cym" | "wel" => "Welsh",
        "da" | "dan" => "Danish",
        "de" | "deu" | "ger" => "German",
        "el" | "ell" | "gre" => "Greek",
        "en" | "eng" => "English",
        "eo" | "epo" => "Esperanto",
        "es" | "spa" => "Spanish",
        "et" | "est" => "Estonian",
        "eu" | "eus" | "baq" => "Basque",
        "fa" | "fas" | "per" => "Persian",
        "fi" | "fin" => "Finnish",
        "fil" => "Filipino",
        "fr" | "fra" | "fre" => "French",
        "ga" | "gle" => "Irish",
        "gl" | "glg" => "Galician",
        "gsw" => "Swiss German",
        "he" | "heb" => "Hebrew",
        "hi" | "hin" => "Hindi",
        "hr" | "hrv" => "Croatian",
        "hu" | "hun" => "Hungarian",
        "hy" | "hye" | "arm" => "Armenian",
        "id" | "ind" => "Indonesian",
        "is" | "isl" | "ice" => "Icelandic",
        "it" | "ita" => "Italian",
        "ja" | "jpn" => "Japanese",
        "ka" | "kat" | "geo" => "Georgian",
        "kk" | "kaz" => "Kazakh",
        "km" | "khm" => "Khmer",
        "ko" | "kor" => "Korean",
        "lb" | "ltz" => "Luxembourgish",
        "lt" | "lit" => "Lithuanian",
        "lv" | "lav" => "Latvian",
        "mk" | "mkd" | "mac" => "Macedonian",
        "ms" | "msa" | "may" => "Malay",
        "mt" | "mlt" => "Maltese",
        "nb" | "nob" => "Norwegian Bokmål",
        "nl" | "nld" | "dut" => "Dutch",
        "nn" | "nno" => "Norwegian Nynorsk",
        "no" | "nor" => "Norwegian",
        "pl" | "pol" => "Polish",
        "pt" | "por" => "Portuguese",
        "rm" | "roh" => "Romansh",
        "ro" | "ron" | "rum" => "Romanian",
        "ru" | "rus" => "Russian",
        "sk" | "slk" | "slo" => "Slovak",
        "sl" | "slv" => "Slovenian",
        "sq" | "sqi" | "alb" => "Albanian",
        "sr" | "srp" => "Serbian",
        "sv" | "swe" => "Swedish",
        "sw" | "swa" => "Swahili",
        "ta" | "tam" => "Tamil",
        "th" | "tha" => "Thai",
        "tr" | "tur" => "Turkish",
        "uk" | "ukr" => "Ukrainian",
        "ur" | "urd" => "Urdu",
        "vi" | "vie" => "Vietnamese",
        "zh" | "zho" | "chi" => "Chinese",
        _ => return None,
    };
    Some(name)
}
