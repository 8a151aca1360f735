//! Static kana table
//!
//! Rows are `(romaji, hiragana, katakana)`. Basic rows are listed in gojūon
//! order; the other groups follow the usual chart layout.

/// One row of the kana table
pub(crate) type KanaRow = (&'static str, &'static str, &'static str);

/// Canonical gojūon order used by sequential review
pub const GOJUON_ORDER: [&str; 46] = [
    "a", "i", "u", "e", "o",
    "ka", "ki", "ku", "ke", "ko",
    "sa", "shi", "su", "se", "so",
    "ta", "chi", "tsu", "te", "to",
    "na", "ni", "nu", "ne", "no",
    "ha", "hi", "fu", "he", "ho",
    "ma", "mi", "mu", "me", "mo",
    "ya", "yu", "yo",
    "ra", "ri", "ru", "re", "ro",
    "wa", "wo", "n",
];

pub(crate) const BASIC: [KanaRow; 46] = [
    ("a", "あ", "ア"),
    ("i", "い", "イ"),
    ("u", "う", "ウ"),
    ("e", "え", "エ"),
    ("o", "お", "オ"),
    ("ka", "か", "カ"),
    ("ki", "き", "キ"),
    ("ku", "く", "ク"),
    ("ke", "け", "ケ"),
    ("ko", "こ", "コ"),
    ("sa", "さ", "サ"),
    ("shi", "し", "シ"),
    ("su", "す", "ス"),
    ("se", "せ", "セ"),
    ("so", "そ", "ソ"),
    ("ta", "た", "タ"),
    ("chi", "ち", "チ"),
    ("tsu", "つ", "ツ"),
    ("te", "て", "テ"),
    ("to", "と", "ト"),
    ("na", "な", "ナ"),
    ("ni", "に", "ニ"),
    ("nu", "ぬ", "ヌ"),
    ("ne", "ね", "ネ"),
    ("no", "の", "ノ"),
    ("ha", "は", "ハ"),
    ("hi", "ひ", "ヒ"),
    ("fu", "ふ", "フ"),
    ("he", "へ", "ヘ"),
    ("ho", "ほ", "ホ"),
    ("ma", "ま", "マ"),
    ("mi", "み", "ミ"),
    ("mu", "む", "ム"),
    ("me", "め", "メ"),
    ("mo", "も", "モ"),
    ("ya", "や", "ヤ"),
    ("yu", "ゆ", "ユ"),
    ("yo", "よ", "ヨ"),
    ("ra", "ら", "ラ"),
    ("ri", "り", "リ"),
    ("ru", "る", "ル"),
    ("re", "れ", "レ"),
    ("ro", "ろ", "ロ"),
    ("wa", "わ", "ワ"),
    ("wo", "を", "ヲ"),
    ("n", "ん", "ン"),
];

pub(crate) const VOICED: [KanaRow; 20] = [
    ("ga", "が", "ガ"),
    ("gi", "ぎ", "ギ"),
    ("gu", "ぐ", "グ"),
    ("ge", "げ", "ゲ"),
    ("go", "ご", "ゴ"),
    ("za", "ざ", "ザ"),
    ("ji", "じ", "ジ"),
    ("zu", "ず", "ズ"),
    ("ze", "ぜ", "ゼ"),
    ("zo", "ぞ", "ゾ"),
    ("da", "だ", "ダ"),
    ("ji", "ぢ", "ヂ"),
    ("zu", "づ", "ヅ"),
    ("de", "で", "デ"),
    ("do", "ど", "ド"),
    ("ba", "ば", "バ"),
    ("bi", "び", "ビ"),
    ("bu", "ぶ", "ブ"),
    ("be", "べ", "ベ"),
    ("bo", "ぼ", "ボ"),
];

pub(crate) const SEMI_VOICED: [KanaRow; 5] = [
    ("pa", "ぱ", "パ"),
    ("pi", "ぴ", "ピ"),
    ("pu", "ぷ", "プ"),
    ("pe", "ぺ", "ペ"),
    ("po", "ぽ", "ポ"),
];

pub(crate) const COMBINATION: [KanaRow; 21] = [
    ("kya", "きゃ", "キャ"),
    ("kyu", "きゅ", "キュ"),
    ("kyo", "きょ", "キョ"),
    ("sha", "しゃ", "シャ"),
    ("shu", "しゅ", "シュ"),
    ("sho", "しょ", "ショ"),
    ("cha", "ちゃ", "チャ"),
    ("chu", "ちゅ", "チュ"),
    ("cho", "ちょ", "チョ"),
    ("nya", "にゃ", "ニャ"),
    ("nyu", "にゅ", "ニュ"),
    ("nyo", "にょ", "ニョ"),
    ("hya", "ひゃ", "ヒャ"),
    ("hyu", "ひゅ", "ヒュ"),
    ("hyo", "ひょ", "ヒョ"),
    ("mya", "みゃ", "ミャ"),
    ("myu", "みゅ", "ミュ"),
    ("myo", "みょ", "ミョ"),
    ("rya", "りゃ", "リャ"),
    ("ryu", "りゅ", "リュ"),
    ("ryo", "りょ", "リョ"),
];
