use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::bitstring::SECTION_BITS;
use crate::error::Error;

/// One instruction entry from the rules document, in declaration order.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub display_name: String,
    pub handler: String,
    pub sections: Vec<Section>,
}

/// One 32-bit encoding word of an instruction.
#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Normalized field definition. `width` and `offset` stay optional here:
/// a missing width is only diagnosed downstream, a missing offset is fatal.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub symbol: Option<String>,
    pub width: Option<u32>,
    pub offset: Option<u32>,
    pub argtype: Option<String>,
}

/// Object-shape field entry as written in current rules files.
#[derive(Debug, Deserialize)]
struct RawField {
    count: Option<u32>,
    offset: Option<u32>,
    bitname: Option<String>,
    argtype: Option<String>,
}

/// Reads and normalizes the rules document at `path`.
pub fn load(path: &Path) -> Result<Vec<Instruction>, Error> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let root: Value = serde_json::from_str(&text)
        .map_err(|e| Error::malformed(format!("JSON load failed: {e}")))?;
    parse_rules(&root)
}

/// Normalizes an already-parsed document tree, preserving declaration order
/// of instructions, sections and fields.
pub fn parse_rules(root: &Value) -> Result<Vec<Instruction>, Error> {
    let entries = root
        .as_object()
        .ok_or_else(|| Error::malformed("rules root must be an object keyed by instruction name"))?;
    entries
        .iter()
        .map(|(name, body)| parse_instruction(name, body))
        .collect()
}

fn parse_instruction(name: &str, body: &Value) -> Result<Instruction, Error> {
    let obj = body
        .as_object()
        .ok_or_else(|| Error::malformed(format!("instruction {name} must be an object")))?;

    let handler = match obj.get("handler") {
        Some(v) => v
            .as_str()
            .ok_or_else(|| Error::malformed(format!("handler of {name} must be a string")))?
            .to_string(),
        None => name.to_string(),
    };

    let defs = obj
        .get("defs")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::malformed(format!("instruction {name} has no defs")))?;

    let sections = defs
        .iter()
        .map(|(sec_name, fields)| parse_section(name, sec_name, fields))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Instruction {
        display_name: name.to_string(),
        handler,
        sections,
    })
}

fn parse_section(instruction: &str, name: &str, body: &Value) -> Result<Section, Error> {
    let map = body.as_object().ok_or_else(|| {
        Error::malformed(format!(
            "section {name} of {instruction} must be an object of fields"
        ))
    })?;

    // Legacy positional tuples carry no offsets; they pack downward from
    // bit 32 in declaration order, matching the old append-from-MSB output.
    let mut high = SECTION_BITS as u32;

    let mut fields = Vec::with_capacity(map.len());
    for (field_name, value) in map {
        let field = match value {
            Value::Object(_) => parse_object_field(instruction, field_name, value)?,
            Value::Array(items) => {
                parse_tuple_field(instruction, name, field_name, items, &mut high)?
            }
            _ => {
                return Err(Error::malformed(format!(
                    "field {field_name} in {instruction} must be an object or a tuple"
                )))
            }
        };
        fields.push(field);
    }

    Ok(Section {
        name: name.to_string(),
        fields,
    })
}

fn parse_object_field(instruction: &str, name: &str, value: &Value) -> Result<Field, Error> {
    let raw: RawField = serde_json::from_value(value.clone())
        .map_err(|e| Error::malformed(format!("field {name} in {instruction}: {e}")))?;
    if let Some(bn) = &raw.bitname {
        if bn.is_empty() {
            return Err(Error::malformed(format!(
                "field {name} in {instruction} has an empty bitname"
            )));
        }
    }
    Ok(Field {
        name: name.to_string(),
        symbol: raw.bitname,
        width: raw.count,
        offset: raw.offset,
        argtype: raw.argtype,
    })
}

/// Legacy shape: `[bitname?, count, argtype?]`.
fn parse_tuple_field(
    instruction: &str,
    section: &str,
    name: &str,
    items: &[Value],
    high: &mut u32,
) -> Result<Field, Error> {
    let mut idx = 0;
    let symbol = match items.first().and_then(Value::as_str) {
        Some(s) if s.is_empty() => {
            return Err(Error::malformed(format!(
                "field {name} in {instruction} has an empty bitname"
            )))
        }
        Some(s) => {
            idx = 1;
            Some(s.to_string())
        }
        None => None,
    };

    let width = items
        .get(idx)
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            Error::malformed(format!("field {name} in {instruction} has no bit count"))
        })? as u32;

    let argtype = items.get(idx + 1).and_then(Value::as_str).map(str::to_string);

    let offset = high.checked_sub(width).ok_or_else(|| {
        Error::malformed(format!(
            "section {section} of {instruction} packs past bit 0"
        ))
    })?;
    *high = offset;

    Ok(Field {
        name: name.to_string(),
        symbol,
        width: Some(width),
        offset: Some(offset),
        argtype,
    })
}
