use usse_autogen::bitstring::{assemble_section, FILLER, SECTION_BITS};
use usse_autogen::symbols::SymbolAllocator;
use usse_autogen::{Error, Field, Section};

fn field(name: &str, symbol: Option<&str>, width: u32, offset: u32) -> Field {
    Field {
        name: name.into(),
        symbol: symbol.map(str::to_string),
        width: Some(width),
        offset: Some(offset),
        argtype: None,
    }
}

fn section(fields: Vec<Field>) -> Section {
    Section {
        name: "low".into(),
        fields,
    }
}

#[test]
fn later_lower_field_overwrites_the_overlap() {
    // A at bits 10..13, then B at bits 8..11: B wins the shared 10..11 span,
    // A keeps only its high remainder.
    let sec = section(vec![
        field("a_field", Some("a"), 4, 10),
        field("b_field", Some("b"), 4, 8),
    ]);
    let mut symbols = SymbolAllocator::new();
    let out = assemble_section("op", &sec, 0, &mut symbols).unwrap();
    let expected = format!("{}aabbbb--------", FILLER.to_string().repeat(18));
    assert_eq!(out.pattern, expected);
    assert_eq!(out.pattern.len(), SECTION_BITS);
}

#[test]
fn short_section_is_front_padded_to_32() {
    // 20 declared bits -> exactly 12 leading fillers.
    let sec = section(vec![
        field("hi", Some("x"), 12, 8),
        field("lo", Some("y"), 8, 0),
    ]);
    let mut symbols = SymbolAllocator::new();
    let out = assemble_section("op", &sec, 0, &mut symbols).unwrap();
    let expected = format!("{}{}{}", "-".repeat(12), "x".repeat(12), "y".repeat(8));
    assert_eq!(out.pattern, expected);
}

#[test]
fn over_length_section_passes_through() {
    let sec = section(vec![field("wide", Some("w"), 40, 0)]);
    let mut symbols = SymbolAllocator::new();
    let out = assemble_section("op", &sec, 0, &mut symbols).unwrap();
    assert_eq!(out.pattern, "w".repeat(40));
}

#[test]
fn disjoint_fields_land_regardless_of_declaration_order() {
    let declared_low_first = section(vec![
        field("lo", Some("1"), 12, 0),
        field("hi", Some("a"), 19, 13),
    ]);
    let declared_high_first = section(vec![
        field("hi", Some("a"), 19, 13),
        field("lo", Some("1"), 12, 0),
    ]);
    let mut symbols = SymbolAllocator::new();
    let first = assemble_section("op", &declared_low_first, 0, &mut symbols).unwrap();
    let second = assemble_section("op", &declared_high_first, 0, &mut symbols).unwrap();
    assert_eq!(first.pattern, "aaaaaaaaaaaaaaaaaaa-111111111111");
    assert_eq!(first.pattern, second.pattern);
}

#[test]
fn global_offsets_scale_with_the_section_multiplier() {
    let sec = section(vec![field("f", Some("f"), 4, 5)]);
    let mut symbols = SymbolAllocator::new();
    let out = assemble_section("op", &sec, 2, &mut symbols).unwrap();
    assert_eq!(out.args[0].0, 5 + 2 * SECTION_BITS);
    assert_eq!(out.args[0].1.ty, "Imm4");
}

#[test]
fn missing_offset_is_fatal() {
    let sec = section(vec![Field {
        name: "f".into(),
        symbol: Some("f".into()),
        width: Some(4),
        offset: None,
        argtype: None,
    }]);
    let mut symbols = SymbolAllocator::new();
    let err = assemble_section("op", &sec, 0, &mut symbols).unwrap_err();
    assert!(matches!(err, Error::MissingOffset { .. }));
}

#[test]
fn missing_width_only_degrades_to_zero() {
    let sec = section(vec![Field {
        name: "f".into(),
        symbol: Some("f".into()),
        width: None,
        offset: Some(0),
        argtype: None,
    }]);
    let mut symbols = SymbolAllocator::new();
    let out = assemble_section("op", &sec, 0, &mut symbols).unwrap();
    assert_eq!(out.pattern, "-".repeat(SECTION_BITS));
    assert_eq!(out.args[0].1.ty, "Imm0");
}

#[test]
fn explicit_symbols_leave_the_allocator_untouched() {
    let sec = section(vec![
        field("named", Some("a"), 4, 4),
        field("auto", None, 4, 0),
    ]);
    let mut symbols = SymbolAllocator::new();
    let out = assemble_section("op", &sec, 0, &mut symbols).unwrap();
    // The auto field still receives 'a': explicit use does not reserve it.
    assert_eq!(out.notes[1].0, "a");
}
