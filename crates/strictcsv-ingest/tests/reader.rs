//! End-to-end tests for the validating reader.

use std::io::Cursor;

use strictcsv_ingest::{
    Dialect, ExtraColumnsPolicy, IngestError, ReaderOptions, RowErrorPolicy, ValidatingReader,
};
use strictcsv_model::{ColumnSpec, ColumnType, FieldErrorKind, Record, Schema, Value};

fn product_schema() -> Schema {
    Schema::new(vec![
        ColumnSpec::new("title").required(),
        ColumnSpec::new("category").required(),
        ColumnSpec::new("currency")
            .with_choices(["USD", "EUR"])
            .required(),
        ColumnSpec::new("price").with_type(ColumnType::Int).required(),
        ColumnSpec::new("note").with_default(""),
    ])
    .unwrap()
}

fn read_all(input: &str, schema: Schema, options: ReaderOptions) -> Vec<Record> {
    ValidatingReader::new(Cursor::new(input.to_owned()), schema, options)
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn yields_one_record_per_data_row_in_file_order() {
    let input = "\
title,category,currency,price,note
iPhone 5c blue,Phones,USD,699,
iPad mini,Tablets,EUR,599,refurb
";
    let records = read_all(input, product_schema(), ReaderOptions::new());
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("title"), Some(&Value::from("iPhone 5c blue")));
    assert_eq!(records[0].get("price"), Some(&Value::Int(699)));
    assert_eq!(records[1].get("title"), Some(&Value::from("iPad mini")));
    assert_eq!(records[1].get("note"), Some(&Value::from("refurb")));
}

#[test]
fn exhaustion_is_completion_not_error() {
    let input = "title,category,currency,price,note\na,b,USD,1,\n";
    let mut reader = ValidatingReader::new(
        Cursor::new(input.to_owned()),
        product_schema(),
        ReaderOptions::new(),
    );
    assert!(reader.next().unwrap().is_ok());
    assert!(reader.next().is_none());
    assert!(reader.next().is_none());
}

#[test]
fn header_matching_is_order_independent() {
    let input = "\
price,title,category,currency,note
699,iPhone 5c blue,Phones,USD,
";
    let records = read_all(input, product_schema(), ReaderOptions::new());
    assert_eq!(records[0].get("price"), Some(&Value::Int(699)));
    assert_eq!(records[0].get("title"), Some(&Value::from("iPhone 5c blue")));
    assert_eq!(records[0].get("category"), Some(&Value::from("Phones")));
}

#[test]
fn whitespace_is_stripped_by_default() {
    let input = "title,category,currency,price,note\n  Widget ,  Gadgets , USD , 599 ,\n";
    let records = read_all(input, product_schema(), ReaderOptions::new());
    assert_eq!(records[0].get("title"), Some(&Value::from("Widget")));
    assert_eq!(records[0].get("price"), Some(&Value::Int(599)));
}

#[test]
fn unstripped_whitespace_is_preserved_and_breaks_numerics() {
    let schema = Schema::new(vec![
        ColumnSpec::new("category").required(),
        ColumnSpec::new("price").with_type(ColumnType::Int).required(),
    ])
    .unwrap();
    let options = ReaderOptions::new().with_strip_white_spaces(false);

    let input = "category,price\n     Phones   ,599\n";
    let records = read_all(input, schema.clone(), options.clone());
    assert_eq!(
        records[0].get("category"),
        Some(&Value::from("     Phones   "))
    );

    let input = "category,price\nPhones, 599  \n";
    let mut reader = ValidatingReader::new(Cursor::new(input.to_owned()), schema, options);
    let err = reader.next().unwrap().unwrap_err();
    let row = err.as_row_error().expect("row error");
    assert_eq!(row.fields[0].column.as_deref(), Some("price"));
    assert!(matches!(
        row.fields[0].kind,
        FieldErrorKind::TypeMismatch { expected: ColumnType::Int }
    ));
}

#[test]
fn empty_required_cell_fails_empty_optional_cell_defaults() {
    let input = "title,category,currency,price,note\nWidget,Gadgets,USD,,\n";
    let mut reader = ValidatingReader::new(
        Cursor::new(input.to_owned()),
        product_schema(),
        ReaderOptions::new(),
    );
    let err = reader.next().unwrap().unwrap_err();
    let row = err.as_row_error().expect("row error");
    assert_eq!(row.row, 1);
    assert_eq!(row.fields.len(), 1);
    assert_eq!(row.fields[0].column.as_deref(), Some("price"));
    assert_eq!(row.fields[0].kind, FieldErrorKind::MissingRequired);

    // Same shape, but the empty cell is the optional note column.
    let input = "title,category,currency,price,note\nWidget,Gadgets,USD,10,\n";
    let records = read_all(input, product_schema(), ReaderOptions::new());
    assert_eq!(records[0].get("note"), Some(&Value::Text(String::new())));
}

#[test]
fn invalid_choice_fails_that_row_only() {
    let input = "\
title,category,currency,price,note
Widget,Gadgets,ARS,10,
Gizmo,Gadgets,EUR,20,
";
    let mut reader = ValidatingReader::new(
        Cursor::new(input.to_owned()),
        product_schema(),
        ReaderOptions::new().with_row_errors(RowErrorPolicy::Collect),
    );

    let records: Vec<Record> = reader.by_ref().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("title"), Some(&Value::from("Gizmo")));

    let errors = reader.row_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].row, 1);
    assert_eq!(errors[0].fields[0].column.as_deref(), Some("currency"));
    assert_eq!(errors[0].fields[0].raw, "ARS");
    assert!(matches!(
        &errors[0].fields[0].kind,
        FieldErrorKind::InvalidChoice { allowed } if allowed.len() == 2
    ));
}

#[test]
fn pipe_dialect_matches_default_comma_parsing() {
    let comma = "title,category,currency,price,note\nWidget,Gadgets,USD,10,\n";
    let piped = "title|category|currency|price|note\nWidget|Gadgets|USD|10|\n";

    let from_comma = read_all(comma, product_schema(), ReaderOptions::new());
    let from_pipes = read_all(
        piped,
        product_schema(),
        ReaderOptions::new().with_dialect(Dialect::default().with_delimiter(b'|')),
    );
    assert_eq!(from_comma, from_pipes);
}

#[test]
fn blank_lines_are_skipped_everywhere() {
    // Blank lines before the header, between rows (plain and all-empty
    // cells), and trailing.
    let input = "\n\n\
title,category,currency,price,note\n\
\n\
Widget,Gadgets,USD,10,\n\
\n\
,,,,\n\
Gizmo,Gadgets,EUR,20,\n\
\n\
\n";
    let records = read_all(input, product_schema(), ReaderOptions::new());
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("title"), Some(&Value::from("Widget")));
    assert_eq!(records[1].get("title"), Some(&Value::from("Gizmo")));
}

#[test]
fn blank_lines_before_header_do_not_hide_it() {
    let input = "\n\n\ntitle,category,currency,price,note\nWidget,Gadgets,USD,10,\n";
    let records = read_all(input, product_schema(), ReaderOptions::new());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("title"), Some(&Value::from("Widget")));
}

#[test]
fn blank_rows_do_not_advance_row_numbering() {
    let input = "\
title,category,currency,price,note

Widget,Gadgets,USD,10,

Broken,Gadgets,USD,oops,
";
    let mut reader = ValidatingReader::new(
        Cursor::new(input.to_owned()),
        product_schema(),
        ReaderOptions::new().with_row_errors(RowErrorPolicy::Collect),
    );
    let records: Vec<Record> = reader.by_ref().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(reader.row_errors()[0].row, 2);
}

#[test]
fn raise_policy_aborts_iteration_on_first_bad_row() {
    let input = "\
title,category,currency,price,note
Widget,Gadgets,USD,oops,
Gizmo,Gadgets,EUR,20,
";
    let mut reader = ValidatingReader::new(
        Cursor::new(input.to_owned()),
        product_schema(),
        ReaderOptions::new(),
    );
    let err = reader.next().unwrap().unwrap_err();
    assert!(matches!(err, IngestError::Row(_)));
    // The valid second row is never reached.
    assert!(reader.next().is_none());
}

#[test]
fn widget_gadget_scenario() {
    // Schema: title required, price required int, note optional default "".
    let schema = Schema::new(vec![
        ColumnSpec::new("title").required(),
        ColumnSpec::new("price").with_type(ColumnType::Int).required(),
        ColumnSpec::new("note").with_default(""),
    ])
    .unwrap();
    let input = "\
title,price,note
Widget,10,
Gadget,,ok
";
    let mut reader = ValidatingReader::new(
        Cursor::new(input.to_owned()),
        schema,
        ReaderOptions::new().with_row_errors(RowErrorPolicy::Collect),
    );

    let first = reader.next().unwrap().unwrap();
    assert_eq!(first.get("title"), Some(&Value::from("Widget")));
    assert_eq!(first.get("price"), Some(&Value::Int(10)));
    assert_eq!(first.get("note"), Some(&Value::Text(String::new())));

    // Second row is skipped under collect; the stream runs to exhaustion.
    assert!(reader.next().is_none());

    let errors = reader.take_row_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].row, 2);
    assert_eq!(errors[0].fields[0].column.as_deref(), Some("price"));
    assert_eq!(errors[0].fields[0].kind, FieldErrorKind::MissingRequired);
    assert!(reader.row_errors().is_empty());
}

#[test]
fn missing_required_column_in_header_is_fatal() {
    let input = "title,category,price,note\nWidget,Gadgets,10,\n";
    let mut reader = ValidatingReader::new(
        Cursor::new(input.to_owned()),
        product_schema(),
        ReaderOptions::new(),
    );
    let err = reader.next().unwrap().unwrap_err();
    assert!(
        matches!(err, IngestError::MissingRequiredColumn { column } if column == "currency")
    );
    assert!(reader.next().is_none());
}

#[test]
fn strict_mode_rejects_undeclared_header_columns() {
    let input = "title,category,currency,price,note,internal\nWidget,Gadgets,USD,10,,x\n";
    let mut reader = ValidatingReader::new(
        Cursor::new(input.to_owned()),
        product_schema(),
        ReaderOptions::new().with_extra_columns(ExtraColumnsPolicy::Fail),
    );
    let err = reader.next().unwrap().unwrap_err();
    assert!(matches!(err, IngestError::UnexpectedColumn { column } if column == "internal"));
}

#[test]
fn quoted_fields_pass_through_the_tokenizer() {
    let input = "title,category,currency,price,note\n\"Widget, large\",Gadgets,USD,10,\"said \"\"hi\"\"\"\n";
    let records = read_all(input, product_schema(), ReaderOptions::new());
    assert_eq!(records[0].get("title"), Some(&Value::from("Widget, large")));
    assert_eq!(records[0].get("note"), Some(&Value::from("said \"hi\"")));
}

#[test]
fn reads_from_a_file_on_disk() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "title,price,note\nWidget,10,\n").unwrap();

    let schema = Schema::new(vec![
        ColumnSpec::new("title").required(),
        ColumnSpec::new("price").with_type(ColumnType::Int).required(),
        ColumnSpec::new("note").with_default(""),
    ])
    .unwrap();

    let mut reader =
        ValidatingReader::open(file.path(), schema.clone(), ReaderOptions::new()).unwrap();
    let record = reader.next().unwrap().unwrap();
    assert_eq!(record.get("price"), Some(&Value::Int(10)));
    assert!(reader.next().is_none());

    let missing = std::path::Path::new("definitely-not-here.csv");
    let result = ValidatingReader::open(missing, schema, ReaderOptions::new());
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}

#[test]
fn schema_loaded_from_json_drives_the_reader() {
    let json = r#"[
        {"name": "title", "required": true},
        {"name": "price", "data_type": "int", "required": true}
    ]"#;
    let schema: Schema = serde_json::from_str(json).unwrap();

    let input = "title,price\nWidget,10\n";
    let records = read_all(input, schema, ReaderOptions::new());
    assert_eq!(records[0].get("price"), Some(&Value::Int(10)));
}
