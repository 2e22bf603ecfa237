//! Deterministic Cyrillic-to-Latin transliteration.
//!
//! The last-resort path of city-name resolution: total over all input (every
//! Cyrillic letter has a mapping, anything else passes through unchanged), so
//! it can never fail where the translation service can.

/// Latin substitution for a single Cyrillic letter, or `None` for characters
/// outside the table. Soft and hard signs map to the empty string.
fn map_char(c: char) -> Option<&'static str> {
    Some(match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'А' => "A",
        'Б' => "B",
        'В' => "V",
        'Г' => "G",
        'Д' => "D",
        'Е' => "E",
        'Ё' => "Yo",
        'Ж' => "Zh",
        'З' => "Z",
        'И' => "I",
        'Й' => "Y",
        'К' => "K",
        'Л' => "L",
        'М' => "M",
        'Н' => "N",
        'О' => "O",
        'П' => "P",
        'Р' => "R",
        'С' => "S",
        'Т' => "T",
        'У' => "U",
        'Ф' => "F",
        'Х' => "Kh",
        'Ц' => "Ts",
        'Ч' => "Ch",
        'Ш' => "Sh",
        'Щ' => "Shch",
        'Ъ' => "",
        'Ы' => "Y",
        'Ь' => "",
        'Э' => "E",
        'Ю' => "Yu",
        'Я' => "Ya",
        _ => return None,
    })
}

/// Transliterate a place name character by character. Runs of whitespace are
/// collapsed to a single space and the result is trimmed.
pub fn transliterate(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match map_char(c) {
            Some(s) => out.push_str(s),
            None => out.push(c),
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transliterates_moscow() {
        assert_eq!(transliterate("Москва"), "Moskva");
    }

    #[test]
    fn preserves_hyphens() {
        assert_eq!(transliterate("Санкт-Петербург"), "Sankt-Peterburg");
        assert_eq!(transliterate("Ростов-на-Дону"), "Rostov-na-Donu");
    }

    #[test]
    fn latin_input_is_unchanged() {
        assert_eq!(transliterate("New York"), "New York");
        assert_eq!(transliterate("Paris"), "Paris");
    }

    #[test]
    fn soft_and_hard_signs_are_dropped() {
        assert_eq!(transliterate("Пермь"), "Perm");
        assert_eq!(transliterate("Подъезд"), "Podezd");
    }

    #[test]
    fn digraphs_are_expanded() {
        assert_eq!(transliterate("Щёлково"), "Shchyolkovo");
        assert_eq!(transliterate("Железногорск"), "Zheleznogorsk");
    }

    #[test]
    fn unmapped_characters_pass_through() {
        assert_eq!(transliterate("Москва 2024!"), "Moskva 2024!");
    }

    #[test]
    fn whitespace_is_collapsed_and_trimmed() {
        assert_eq!(transliterate("  Нижний   Новгород "), "Nizhniy Novgorod");
    }

    #[test]
    fn is_deterministic() {
        let a = transliterate("Набережные Челны");
        let b = transliterate("Набережные Челны");
        assert_eq!(a, b);
        assert_eq!(a, "Naberezhnye Chelny");
    }
}
