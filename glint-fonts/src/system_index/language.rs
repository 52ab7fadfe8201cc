//! Language coverage by exemplar characters.
//!
//! A face is taken to support a language when it has glyphs for a handful
//! of characters that only that language's script (or orthography) uses.

const LATIN: &[char] = &['a', 'z', 'A', 'Z'];

/// Exemplar characters for a BCP 47 language subtag.
///
/// Unknown languages are treated as plain Latin.
pub fn exemplars(language: &str) -> &'static [char] {
    match language {
        "ja" => &['あ', 'ア', '日'],
        "zh" => &['中', '文', '的'],
        "ko" => &['한', '글'],
        "ru" | "uk" | "be" | "bg" | "sr" | "mk" | "kk" | "ky" | "mn" => &['Д', 'ж', 'я'],
        "el" => &['Ω', 'λ', 'ά'],
        "ar" | "fa" | "ur" | "ps" => &['ع', 'ب', 'ی'],
        "he" | "yi" => &['א', 'ש'],
        "hi" | "mr" | "ne" | "sa" => &['क', 'ह', 'ि'],
        "bn" | "as" => &['ক', 'হ'],
        "ta" => &['த', 'ம'],
        "te" => &['త'],
        "kn" => &['ಕ'],
        "ml" => &['ക'],
        "gu" => &['ક'],
        "pa" => &['ਕ'],
        "th" => &['ก', 'ข'],
        "lo" => &['ກ'],
        "km" => &['ក'],
        "my" => &['က'],
        "ka" => &['ა', 'ბ'],
        "hy" => &['Ա', 'ա'],
        "am" | "ti" => &['አ'],
        "vi" => &['ơ', 'ư', 'ạ'],
        "pl" => &['ł', 'ą', 'ż'],
        "cs" | "sk" => &['ř', 'ů', 'č'],
        "tr" | "az" => &['ğ', 'ş', 'ı'],
        "de" => &['ß', 'ä'],
        "ro" => &['ș', 'ț'],
        "hu" => &['ő', 'ű'],
        _ => LATIN,
    }
}
