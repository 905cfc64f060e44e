use sxasm::{assemble, Assembly};

fn case(code: &str) -> Assembly {
    for (idx, line) in code.lines().enumerate() {
        println!("{:>3}: {}", idx + 1, line);
    }
    let assembly = assemble(code).unwrap();
    print!("{}", assembly.assembler.msgs.log());
    assembly
}

#[test]
fn errors_suppress_all_output() {
    let assembly = case("ldc 1\nfoo\nHALT");
    assert!(assembly.assembler.msgs.has_error());
    assert!(assembly.listing.is_none());
}

#[test]
fn unknown_mnemonic_does_not_advance_pc() {
    let assembly = case("ldc 1\nfoo 3\nldc 2\nbar\nHALT");
    let addrs: Vec<u32> = assembly.assembler.records.iter().map(|r| r.addr).collect();
    assert_eq!(addrs, vec![0, 1, 2]);
    assert_eq!(
        assembly.assembler.msgs.log(),
        "Line Number:- 2 ERROR:- Bogus Mnemonic\nLine Number:- 4 ERROR:- Bogus Mnemonic\n"
    );
}

#[test]
fn every_use_of_undefined_label_is_reported() {
    let assembly = case("br there\nldc 1\nbrz there\ncall there");
    let lines: Vec<usize> = assembly
        .assembler
        .msgs
        .errors()
        .iter()
        .map(|msg| msg.line)
        .collect();
    assert_eq!(lines, vec![1, 3, 4]);
}

#[test]
fn unused_label_warned_once() {
    let assembly = case("a: ldc 1\nb: ldc 2\nbr b\nHALT");
    let warnings = assembly.assembler.msgs.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].line, 1);
    assert!(assembly.listing.is_some());
}

#[test]
fn used_label_not_warned() {
    let assembly = case("a: ldc a\nHALT");
    assert!(assembly.assembler.msgs.warnings().is_empty());
}

#[test]
fn labels_defined_once_resolve_to_definition_pc() {
    let assembly = case("ldc x\n\nbogus\nldc y\nx: adc 1\ny: HALT");
    let symbols = &assembly.assembler.symbols;
    assert_eq!(symbols.addr("x"), Some(2));
    assert_eq!(symbols.addr("y"), Some(3));
}

#[test]
fn glued_tokens() {
    let assembly = case("start:ldc 5;five\nbr start;again\nHALT");
    let listing = assembly.listing.unwrap();
    assert_eq!(listing.words(), vec![0x0000_0500, 0xFFFF_FE11, 0x0000_0012]);
    assert_eq!(assembly.assembler.comment(1), Some("five"));
}

#[test]
fn boundary_words() {
    let assembly = case("data 5\nHALT");
    let listing = assembly.listing.unwrap();
    assert_eq!(listing.words(), vec![0x0000_0005, 0x0000_0012]);
    assert_eq!(
        listing.text(),
        "00000000 00000005 data 5\n00000001 00000012 HALT\n"
    );
}

#[test]
fn full_width_hex_and_octal_data() {
    let assembly = case("data 0xFFFFFFFF\ndata 0x80000000\ndata 037777777777");
    let listing = assembly.listing.unwrap();
    assert_eq!(listing.words(), vec![0xFFFF_FFFF, 0x8000_0000, 0xFFFF_FFFF]);
    assert_eq!(
        listing.text(),
        "00000000 FFFFFFFF data 0xFFFFFFFF\n\
         00000001 80000000 data 0x80000000\n\
         00000002 FFFFFFFF data 037777777777\n"
    );
}

#[test]
fn wide_value_truncated_to_operand_field() {
    let assembly = case("ldc 0x7FFFFF\nldc 0x800000\nldc -1");
    let listing = assembly.listing.unwrap();
    assert_eq!(listing.words(), vec![0x7FFF_FF00, 0x8000_0000, 0xFFFF_FF00]);
    let flagged: Vec<usize> = listing.truncated().map(|entry| entry.line).collect();
    assert_eq!(flagged, vec![2]);
}
