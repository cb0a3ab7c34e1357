//! UTF-8 → WinAnsiEncoding (Windows-1252) for the standard Type1 fonts.
//!
//! Latin-1 printable characters map to themselves. The 0x80..=0x9F block holds the
//! typographic characters a CV actually uses (bullet, dashes, curly quotes).
//! Anything else becomes `?`.

const REPLACEMENT: u8 = b'?';

/// Byte for `c` in WinAnsiEncoding, if it has one.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}

/// Encodes `text`, replacing unencodable characters with `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(REPLACEMENT))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(encode_win_ansi("Ada Lovelace"), b"Ada Lovelace".to_vec());
    }

    #[test]
    fn test_latin1_passes_through() {
        assert_eq!(encode_win_ansi("Zürich"), vec![b'Z', 0xFC, b'r', b'i', b'c', b'h']);
        assert_eq!(encode_win_ansi("São"), vec![b'S', 0xE3, b'o']);
    }

    #[test]
    fn test_typographic_block() {
        assert_eq!(encode_win_ansi("•"), vec![0x95]);
        assert_eq!(encode_win_ansi("2020-01 – 2022-06")[8], 0x96);
        assert_eq!(encode_win_ansi("a — b"), vec![b'a', b' ', 0x97, b' ', b'b']);
        assert_eq!(encode_win_ansi("“q”"), vec![0x93, b'q', 0x94]);
        assert_eq!(encode_win_ansi("€…"), vec![0x80, 0x85]);
    }

    #[test]
    fn test_unencodable_becomes_question_mark() {
        assert_eq!(encode_win_ansi("Łódź"), vec![b'?', 0xF3, b'd', b'?']);
        assert_eq!(encode_win_ansi("東京"), b"??".to_vec());
        // C1 controls share code points with the typographic block but are not text.
        assert_eq!(encode_win_ansi("\u{95}"), b"?".to_vec());
    }

    #[test]
    fn test_one_byte_per_char() {
        let text = "Ωmega — 50€ “quoted” naïve";
        assert_eq!(encode_win_ansi(text).len(), text.chars().count());
    }
}
