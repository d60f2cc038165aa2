//! Minimal MARCXML reader for SRU responses.
//!
//! Only the handful of fields the catalog adapter needs are extracted:
//! 245 (title statement), 100 (main personal name) and 856 (electronic
//! location). Elements may carry a namespace prefix (`marc:datafield`) or
//! rely on a default namespace; both forms are accepted.

use std::sync::LazyLock;

use regex::Regex;

static RECORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(?:[\w-]+:)?record\b[^>]*>(.*?)</(?:[\w-]+:)?record>").expect("valid regex")
});

static DATAFIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(?:[\w-]+:)?datafield\b([^>]*)>(.*?)</(?:[\w-]+:)?datafield>")
        .expect("valid regex")
});

static SUBFIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<(?:[\w-]+:)?subfield\b[^>]*\bcode="([^"]*)"[^>]*>(.*?)</(?:[\w-]+:)?subfield>"#)
        .expect("valid regex")
});

static ATTRIBUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([\w-]+)="([^"]*)""#).expect("valid regex"));

/// URL fragments of catalog extras that are not the work itself.
const NON_TEXT_URL_MARKERS: &[&str] = &[
    "/catdir/",
    "/bios/",
    "/toc/",
    "/sample/",
    "/cover/",
    "contributor biographical",
];

/// Public-note phrases describing supplementary material.
const NON_TEXT_NOTE_MARKERS: &[&str] = &[
    "biography",
    "table of contents",
    "sample",
    "cover",
    "publisher description",
];

/// A variable data field with its indicators and subfields in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataField {
    pub tag: String,
    pub ind1: String,
    pub ind2: String,
    pub subfields: Vec<(String, String)>,
}

impl DataField {
    /// First value of subfield `code`.
    pub fn subfield(&self, code: &str) -> Option<&str> {
        self.subfields
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, value)| value.as_str())
    }
}

/// One bibliographic record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarcRecord {
    pub fields: Vec<DataField>,
}

impl MarcRecord {
    fn field(&self, tag: &str) -> Option<&DataField> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// 245 $a, joined with $b when a subtitle is present.
    pub fn title(&self) -> Option<String> {
        let field = self.field("245")?;
        let main = trim_isbd(field.subfield("a")?);
        if main.is_empty() {
            return None;
        }
        match field.subfield("b").map(trim_isbd).filter(|b| !b.is_empty()) {
            Some(rest) => Some(format!("{main}: {rest}")),
            None => Some(main.to_string()),
        }
    }

    /// 100 $a, the main personal author.
    pub fn author(&self) -> Option<String> {
        self.field("100")
            .and_then(|f| f.subfield("a"))
            .map(trim_isbd)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
    }

    /// First 856 link that points at the resource itself.
    ///
    /// Skips related resources (second indicator 2), non-HTTP locations and
    /// links whose URL or note marks them as a biography, table of contents,
    /// sample, cover or publisher blurb.
    pub fn online_text_url(&self) -> Option<String> {
        self.fields
            .iter()
            .filter(|f| f.tag == "856" && f.ind2 != "2")
            .find_map(|field| {
                let url = field.subfield("u")?.trim();
                if !url.starts_with("http") {
                    return None;
                }

                let url_lower = url.to_lowercase();
                if NON_TEXT_URL_MARKERS.iter().any(|m| url_lower.contains(m)) {
                    return None;
                }

                let noted_as_extra = field
                    .subfields
                    .iter()
                    .filter(|(code, _)| code == "z" || code == "3")
                    .map(|(_, note)| note.to_lowercase())
                    .any(|note| NON_TEXT_NOTE_MARKERS.iter().any(|m| note.contains(m)));
                if noted_as_extra {
                    return None;
                }

                Some(url.to_string())
            })
    }
}

/// Parse every record in an SRU `searchRetrieve` response.
pub fn parse_records(xml: &str) -> Vec<MarcRecord> {
    RECORD_RE
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|body| MarcRecord {
            fields: parse_datafields(body.as_str()),
        })
        .filter(|record| !record.fields.is_empty())
        .collect()
}

fn parse_datafields(record: &str) -> Vec<DataField> {
    DATAFIELD_RE
        .captures_iter(record)
        .filter_map(|caps| {
            let attributes = caps.get(1)?.as_str();
            let body = caps.get(2)?.as_str();

            let mut field = DataField {
                tag: String::new(),
                ind1: String::new(),
                ind2: String::new(),
                subfields: Vec::new(),
            };
            for attr in ATTRIBUTE_RE.captures_iter(attributes) {
                let value = attr[2].trim().to_string();
                match &attr[1] {
                    "tag" => field.tag = value,
                    "ind1" => field.ind1 = value,
                    "ind2" => field.ind2 = value,
                    _ => {}
                }
            }

            field.subfields = SUBFIELD_RE
                .captures_iter(body)
                .map(|sub| (sub[1].to_string(), decode_entities(sub[2].trim())))
                .collect();

            Some(field)
        })
        .collect()
}

/// Strip trailing ISBD punctuation such as " /", " :" and ",".
fn trim_isbd(value: &str) -> &str {
    value.trim().trim_end_matches([' ', '/', ':', ';', ',', '.', '=']).trim()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
