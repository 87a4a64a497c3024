use expedition_tools::io::sheet::CellValue;
use expedition_tools::normalize::coerce;

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

#[test]
fn truthy_accepts_every_documented_true_form() {
    let truthy_cells = [
        CellValue::Boolean(true),
        CellValue::Integer(1),
        CellValue::Integer(-3),
        CellValue::Number(1.0),
        CellValue::Number(0.5),
        text("true"),
        text("TRUE"),
        text("True"),
        text("1"),
        text("yes"),
        text("Yes"),
        text("y"),
        text("Y"),
        text("  yes  "),
    ];

    for cell in &truthy_cells {
        assert!(coerce::truthy(cell), "expected {cell:?} to parse true");
    }
}

#[test]
fn truthy_rejects_every_documented_false_form() {
    let falsy_cells = [
        CellValue::Boolean(false),
        CellValue::Integer(0),
        CellValue::Number(0.0),
        text(""),
        text("   "),
        text("no"),
        text("0"),
        text("maybe"),
        text("yess"),
        text("false"),
    ];

    for cell in &falsy_cells {
        assert!(!coerce::truthy(cell), "expected {cell:?} to parse false");
    }
}

#[test]
fn int_or_falls_back_on_blank_and_garbage() {
    assert_eq!(coerce::int_or(&text(""), 1), 1);
    assert_eq!(coerce::int_or(&text("   "), 1), 1);
    assert_eq!(coerce::int_or(&text("soon"), 1), 1);
    assert_eq!(coerce::int_or(&text("3"), 1), 3);
    assert_eq!(coerce::int_or(&text(" 3 "), 1), 3);
    assert_eq!(coerce::int_or(&text("-2"), 1), -2);
    assert_eq!(coerce::int_or(&CellValue::Integer(0), 1), 0);
    assert_eq!(coerce::int_or(&CellValue::Number(7.0), 1), 7);
    assert_eq!(coerce::int_or(&CellValue::Number(7.9), 1), 7);
    assert_eq!(coerce::int_or(&text("7.9"), 1), 7);
    assert_eq!(coerce::int_or(&CellValue::Boolean(true), 0), 1);
}

#[test]
fn float_or_falls_back_on_blank_and_garbage() {
    assert_eq!(coerce::float_or(&text(""), 1.0), 1.0);
    assert_eq!(coerce::float_or(&text("often"), 1.0), 1.0);
    assert_eq!(coerce::float_or(&text("0.25"), 1.0), 0.25);
    assert_eq!(coerce::float_or(&CellValue::Number(0.5), 1.0), 0.5);
    assert_eq!(coerce::float_or(&CellValue::Integer(2), 1.0), 2.0);
}

#[test]
fn opt_int_refuses_to_invent_identities() {
    assert_eq!(coerce::opt_int(&text("")), None);
    assert_eq!(coerce::opt_int(&text("  ")), None);
    assert_eq!(coerce::opt_int(&text("wolf")), None);
    assert_eq!(coerce::opt_int(&text("42")), Some(42));
    assert_eq!(coerce::opt_int(&CellValue::Number(42.0)), Some(42));
    assert_eq!(coerce::opt_int(&CellValue::Integer(42)), Some(42));
}

#[test]
fn trimmed_renders_non_text_cells() {
    assert_eq!(coerce::trimmed(&text("  combat  ")), "combat");
    assert_eq!(coerce::trimmed(&CellValue::Integer(5)), "5");
    assert_eq!(coerce::trimmed(&CellValue::Boolean(true)), "true");
}
