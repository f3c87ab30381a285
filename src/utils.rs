use regex::{Captures, Regex};

lazy_static::lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref ENTITY_RE: Regex =
        Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap();
}

// Latin-1 plus the typographic entities that show up in captions.
const NAMED_ENTITIES: &[(&str, char)] = &[
    ("quot", '\u{22}'), ("amp", '\u{26}'), ("apos", '\u{27}'), ("lt", '\u{3c}'),
    ("gt", '\u{3e}'), ("nbsp", '\u{a0}'), ("iexcl", '\u{a1}'), ("cent", '\u{a2}'),
    ("pound", '\u{a3}'), ("curren", '\u{a4}'), ("yen", '\u{a5}'), ("brvbar", '\u{a6}'),
    ("sect", '\u{a7}'), ("uml", '\u{a8}'), ("copy", '\u{a9}'), ("ordf", '\u{aa}'),
    ("laquo", '\u{ab}'), ("not", '\u{ac}'), ("shy", '\u{ad}'), ("reg", '\u{ae}'),
    ("macr", '\u{af}'), ("deg", '\u{b0}'), ("plusmn", '\u{b1}'), ("sup2", '\u{b2}'),
    ("sup3", '\u{b3}'), ("acute", '\u{b4}'), ("micro", '\u{b5}'), ("para", '\u{b6}'),
    ("middot", '\u{b7}'), ("cedil", '\u{b8}'), ("sup1", '\u{b9}'), ("ordm", '\u{ba}'),
    ("raquo", '\u{bb}'), ("frac14", '\u{bc}'), ("frac12", '\u{bd}'), ("frac34", '\u{be}'),
    ("iquest", '\u{bf}'), ("Agrave", '\u{c0}'), ("Aacute", '\u{c1}'), ("Acirc", '\u{c2}'),
    ("Atilde", '\u{c3}'), ("Auml", '\u{c4}'), ("Aring", '\u{c5}'), ("AElig", '\u{c6}'),
    ("Ccedil", '\u{c7}'), ("Egrave", '\u{c8}'), ("Eacute", '\u{c9}'), ("Ecirc", '\u{ca}'),
    ("Euml", '\u{cb}'), ("Igrave", '\u{cc}'), ("Iacute", '\u{cd}'), ("Icirc", '\u{ce}'),
    ("Iuml", '\u{cf}'), ("ETH", '\u{d0}'), ("Ntilde", '\u{d1}'), ("Ograve", '\u{d2}'),
    ("Oacute", '\u{d3}'), ("Ocirc", '\u{d4}'), ("Otilde", '\u{d5}'), ("Ouml", '\u{d6}'),
    ("times", '\u{d7}'), ("Oslash", '\u{d8}'), ("Ugrave", '\u{d9}'), ("Uacute", '\u{da}'),
    ("Ucirc", '\u{db}'), ("Uuml", '\u{dc}'), ("Yacute", '\u{dd}'), ("THORN", '\u{de}'),
    ("szlig", '\u{df}'), ("agrave", '\u{e0}'), ("aacute", '\u{e1}'), ("acirc", '\u{e2}'),
    ("atilde", '\u{e3}'), ("auml", '\u{e4}'), ("aring", '\u{e5}'), ("aelig", '\u{e6}'),
    ("ccedil", '\u{e7}'), ("egrave", '\u{e8}'), ("eacute", '\u{e9}'), ("ecirc", '\u{ea}'),
    ("euml", '\u{eb}'), ("igrave", '\u{ec}'), ("iacute", '\u{ed}'), ("icirc", '\u{ee}'),
    ("iuml", '\u{ef}'), ("eth", '\u{f0}'), ("ntilde", '\u{f1}'), ("ograve", '\u{f2}'),
    ("oacute", '\u{f3}'), ("ocirc", '\u{f4}'), ("otilde", '\u{f5}'), ("ouml", '\u{f6}'),
    ("divide", '\u{f7}'), ("oslash", '\u{f8}'), ("ugrave", '\u{f9}'), ("uacute", '\u{fa}'),
    ("ucirc", '\u{fb}'), ("uuml", '\u{fc}'), ("yacute", '\u{fd}'), ("thorn", '\u{fe}'),
    ("yuml", '\u{ff}'), ("OElig", '\u{152}'), ("oelig", '\u{153}'), ("Scaron", '\u{160}'),
    ("scaron", '\u{161}'), ("Yuml", '\u{178}'), ("fnof", '\u{192}'), ("circ", '\u{2c6}'),
    ("tilde", '\u{2dc}'), ("ensp", '\u{2002}'), ("emsp", '\u{2003}'), ("thinsp", '\u{2009}'),
    ("zwnj", '\u{200c}'), ("zwj", '\u{200d}'), ("lrm", '\u{200e}'), ("rlm", '\u{200f}'),
    ("ndash", '\u{2013}'), ("mdash", '\u{2014}'), ("lsquo", '\u{2018}'), ("rsquo", '\u{2019}'),
    ("sbquo", '\u{201a}'), ("ldquo", '\u{201c}'), ("rdquo", '\u{201d}'), ("bdquo", '\u{201e}'),
    ("dagger", '\u{2020}'), ("Dagger", '\u{2021}'), ("bull", '\u{2022}'), ("hellip", '\u{2026}'),
    ("permil", '\u{2030}'), ("prime", '\u{2032}'), ("Prime", '\u{2033}'), ("lsaquo", '\u{2039}'),
    ("rsaquo", '\u{203a}'), ("oline", '\u{203e}'), ("euro", '\u{20ac}'), ("trade", '\u{2122}'),
    ("larr", '\u{2190}'), ("uarr", '\u{2191}'), ("rarr", '\u{2192}'), ("darr", '\u{2193}'),
    ("harr", '\u{2194}'), ("spades", '\u{2660}'), ("clubs", '\u{2663}'), ("hearts", '\u{2665}'),
    ("diams", '\u{2666}'),
];

/// Decode HTML character references. Unknown references are left as they are.
pub fn unescape_html(input: &str) -> String {
    ENTITY_RE
        .replace_all(input, |caps: &Captures| {
            let reference = &caps[1];
            decode_reference(reference).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_reference(reference: &str) -> Option<String> {
    if let Some(number) = reference.strip_prefix('#') {
        let hex = number.strip_prefix('x').or_else(|| number.strip_prefix('X'));
        let code = match hex {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    NAMED_ENTITIES
        .iter()
        .find(|(name, _)| *name == reference)
        .map(|(_, decoded)| decoded.to_string())
}

/// Remove markup such as `<i>` or `<font color="...">` from caption text.
pub fn strip_tags(input: &str) -> String {
    TAG_RE.replace_all(input, "").into_owned()
}

pub fn looks_like_url(video_id: &str) -> bool {
    video_id.starts_with("http://") || video_id.starts_with("https://")
}
