//! C text generation for the fixture source/header pair

use std::fmt::{self, Write};

use tracing::warn;

use super::layout::{CType, Collection, Field, FixtureValues, Value};
use crate::store::FixtureEntry;
use crate::uat::{AltitudeType, CallsignType, HeadingType, TrackType};

/// Named constants for every enumerated field domain, one block per domain
const CONSTANTS: &[&[(&str, u8)]] = &[
    &[
        ("UAT_ALT_INVALID", AltitudeType::Invalid as u8),
        ("UAT_ALT_BARO", AltitudeType::Baro as u8),
        ("UAT_ALT_GEO", AltitudeType::Geo as u8),
    ],
    &[
        ("UAT_TT_INVALID", TrackType::Invalid as u8),
        ("UAT_TT_TRACK", TrackType::Track as u8),
        ("UAT_TT_MAG_HEADING", TrackType::MagHeading as u8),
        ("UAT_TT_TRUE_HEADING", TrackType::TrueHeading as u8),
    ],
    &[
        ("UAT_CS_INVALID", CallsignType::Invalid as u8),
        ("UAT_CS_CALLSIGN", CallsignType::Callsign as u8),
        ("UAT_CS_SQUAWK", CallsignType::Squawk as u8),
    ],
    &[
        ("UAT_HT_TRUE", HeadingType::True as u8),
        ("UAT_HT_MAGNETIC", HeadingType::Magnetic as u8),
    ],
];

/// Consumer-side inverse of the hex encoding used for `frame_data_hex`
pub const HEX_HELPER_DECL: &str =
    "int uat_test_hex_to_bytes(const char* hex, uint8_t* bytes, int length);";

const HEX_HELPER_BODY: &str = r#"// Decode exactly `length` bytes from `hex`; returns `length`, or -1 on malformed hex
int uat_test_hex_to_bytes(const char* hex, uint8_t* bytes, int length) {
    for (int i = 0; i < length; i++) {
        int value = 0;
        for (int j = 0; j < 2; j++) {
            char c = hex[i * 2 + j];
            value <<= 4;
            if (c >= '0' && c <= '9') {
                value |= c - '0';
            } else if (c >= 'a' && c <= 'f') {
                value |= c - 'a' + 10;
            } else if (c >= 'A' && c <= 'F') {
                value |= c - 'A' + 10;
            } else {
                return -1;
            }
        }
        bytes[i] = (uint8_t)value;
    }
    return hex[length * 2] == '\0' ? length : -1;
}
"#;

pub fn write_constants(out: &mut String) -> fmt::Result {
    writeln!(out, "// Enum value constants")?;
    for block in CONSTANTS {
        let width = block.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, value) in block.iter() {
            writeln!(out, "#define {:<width$} {}", name, value, width = width)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_struct(out: &mut String, collection: &Collection) -> fmt::Result {
    writeln!(out, "// {} test frame structure", collection.title)?;
    writeln!(out, "typedef struct {{")?;
    for (i, group) in collection.groups.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        if let Some(heading) = group.heading {
            writeln!(out, "    // {}", heading)?;
        }
        for field in group.fields() {
            writeln!(out, "    {}", field.ctype.declare(field.name))?;
        }
    }
    if let Some(nested) = &collection.nested {
        writeln!(out)?;
        writeln!(out, "    // {}", nested.heading)?;
        writeln!(out, "    struct {{")?;
        for field in nested.fields {
            writeln!(out, "        {}", field.ctype.declare(field.name))?;
        }
        writeln!(out, "    }} {}[{}];", nested.name, nested.len)?;
    }
    writeln!(out, "}} {};", collection.type_name())?;
    writeln!(out)
}

pub fn write_array<R>(
    out: &mut String,
    collection: &Collection,
    entries: &[FixtureEntry<R>],
) -> fmt::Result
where
    FixtureEntry<R>: FixtureValues,
{
    let array = collection.array_name();
    writeln!(out, "// {} test frame data array", collection.title)?;

    if entries.is_empty() {
        // C has no empty initializer lists; keep one zeroed element behind a zero count
        writeln!(
            out,
            "static const {} {}[1] = {{",
            collection.type_name(),
            array
        )?;
        writeln!(out, "    {{0}}")?;
    } else {
        writeln!(out, "static const {} {}[] = {{", collection.type_name(), array)?;
        for (i, entry) in entries.iter().enumerate() {
            write_element(out, collection, entry)?;
            let sep = if i + 1 < entries.len() { "," } else { "" };
            writeln!(out, "{}", sep)?;
        }
    }

    writeln!(out, "}};")?;
    writeln!(out)?;
    writeln!(
        out,
        "static const int {}_count = {};",
        array,
        entries.len()
    )?;
    writeln!(out)
}

fn write_element<R>(out: &mut String, collection: &Collection, entry: &FixtureEntry<R>) -> fmt::Result
where
    FixtureEntry<R>: FixtureValues,
{
    let values = entry.values();
    let has_nested = collection.nested.is_some();
    let rows: Vec<(Option<&str>, &[Field])> = collection
        .groups
        .iter()
        .flat_map(|group| group.rows.iter().map(move |row| (group.tag, *row)))
        .collect();

    writeln!(out, "    {{")?;
    writeln!(out, "        // {}", entry.name)?;

    let mut values = values.iter();
    for (i, (tag, fields)) in rows.iter().enumerate() {
        let rendered: Vec<String> = fields
            .iter()
            .zip(values.by_ref())
            .map(|(field, value)| render_value(field, value))
            .collect();
        let names: Vec<&str> = fields.iter().map(|f| f.name).collect();
        let last = i + 1 == rows.len() && !has_nested;
        let comma = if last { "" } else { "," };
        let label = tag.map(|t| format!("{}: ", t)).unwrap_or_default();
        writeln!(
            out,
            "        {}{}  // {}{}",
            rendered.join(", "),
            comma,
            label,
            names.join(", ")
        )?;
    }

    if let Some(nested) = &collection.nested {
        let nested_rows = entry.nested_values();
        writeln!(out, "        {{")?;
        for (i, row) in nested_rows.iter().enumerate() {
            let rendered: Vec<String> = nested
                .fields
                .iter()
                .zip(row.iter())
                .map(|(field, value)| render_value(field, value))
                .collect();
            let comma = if i + 1 < nested_rows.len() { "," } else { "" };
            writeln!(out, "            {{{}}}{}", rendered.join(", "), comma)?;
        }
        writeln!(out, "        }}")?;
    }

    write!(out, "    }}")
}

pub fn write_accessors(out: &mut String, collection: &Collection) -> fmt::Result {
    let ty = collection.type_name();
    let array = collection.array_name();
    let item = collection.item;

    writeln!(out, "const {}* get_{}(void) {{", ty, array)?;
    writeln!(out, "    return {};", array)?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "int get_{}_count(void) {{", array)?;
    writeln!(out, "    return {}_count;", array)?;
    writeln!(out, "}}")?;
    writeln!(out)?;

    writeln!(out, "const {}* get_{}(int index) {{", ty, item)?;
    writeln!(out, "    if (index < 0 || index >= {}_count) {{", array)?;
    writeln!(out, "        return NULL;")?;
    writeln!(out, "    }}")?;
    writeln!(out, "    return &{}[index];", array)?;
    writeln!(out, "}}")?;
    writeln!(out)
}

pub fn write_accessor_decls(out: &mut String, collection: &Collection) -> fmt::Result {
    let ty = collection.type_name();
    let array = collection.array_name();
    writeln!(out, "const {}* get_{}(void);", ty, array)?;
    writeln!(out, "int get_{}_count(void);", array)?;
    writeln!(out, "const {}* get_{}(int index);", ty, collection.item)?;
    writeln!(out)
}

pub fn write_hex_helper(out: &mut String) -> fmt::Result {
    out.write_str(HEX_HELPER_BODY)
}

fn render_value(field: &Field, value: &Value) -> String {
    match (field.ctype, value) {
        (CType::Double { precision }, Value::Float(v)) => fixed(field.name, *v, precision),
        (_, Value::Float(v)) => fixed(field.name, *v, 6),
        (_, Value::Int(v)) => v.to_string(),
        (_, Value::Str(s)) => quote(s),
    }
}

/// Fixed-precision decimal, independent of locale
fn fixed(name: &str, value: f64, precision: usize) -> String {
    if value.is_finite() {
        format!("{:.*}", precision, value)
    } else {
        warn!("Non-finite value {} in field {}, emitting zero", value, name);
        format!("{:.*}", precision, 0.0)
    }
}

/// C string literal; non-printable bytes become 3-digit octal escapes
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for byte in text.bytes() {
        match byte {
            b'"' => quoted.push_str("\\\""),
            b'\\' => quoted.push_str("\\\\"),
            0x20..=0x7e => quoted.push(byte as char),
            _ => {
                let _ = write!(quoted, "\\{:03o}", byte);
            }
        }
    }
    quoted.push('"');
    quoted
}
