//! End-to-end report rendering.

use std::io::Write;

use plaintab::{
    load_cells, Align, CellRecord, ColumnSet, ColumnSetting, Page, ReportConfig, RowKey, Table,
    TableOptions, FORM_FEED,
};

fn age_summary() -> ColumnSet {
    ColumnSet::builder()
        .order(["stats", "value"])
        .id_columns(["stats"])
        .label(ColumnSetting::by_key([
            ("stats", "Stat".to_string()),
            ("value", "Value".to_string()),
        ]))
        .spacing(ColumnSetting::by_key([("value", 2usize)]))
        .cell(CellRecord::new("Mean", "stats", RowKey::new([1])).label(["Age"]))
        .cell(CellRecord::new("4.5", "value", RowKey::new([1])).label(["Age"]))
        .cell(CellRecord::new("SD", "stats", RowKey::new([2])).label(["Age"]))
        .cell(CellRecord::new("1.2", "value", RowKey::new([2])).label(["Age"]))
        .build()
        .unwrap()
}

#[test]
fn renders_a_single_page_report() {
    let table = Table::new(
        age_summary(),
        Page::new(20, 20).unwrap(),
        TableOptions::new().rule_char('-'),
    );

    let expected = concat!(
        "--------------------\n",
        "    Stat      Value\n",
        "--------------------\n",
        "Age\n",
        "  Mean        4.5\n",
        "  SD          1.2\n",
        "--------------------\n",
    );
    assert_eq!(table.render(), expected);
    assert!(!table.has_overflow());
}

#[test]
fn title_and_footnotes_surround_the_table() {
    let table = Table::new(
        age_summary(),
        Page::new(20, 20).unwrap(),
        TableOptions::new()
            .rule_char('-')
            .title("Table 1~Age")
            .split("~")
            .footnote("Source: ADSL")
            .footnote(("18OCT2026", Align::Right)),
    );

    let text = table.render();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "      Table 1");
    assert_eq!(lines[1], "        Age");
    assert_eq!(lines[2], "");
    assert_eq!(lines[lines.len() - 2], "Source: ADSL");
    assert_eq!(lines[lines.len() - 1], "           18OCT2026");
    assert!(text.ends_with("18OCT2026\n"));
}

#[test]
fn wide_columns_shrink_onto_one_page() {
    let set = ColumnSet::builder()
        .min_width(5usize)
        .cell(CellRecord::new("abcdefghij", "a", RowKey::new([1])))
        .cell(CellRecord::new("abcdefghij", "b", RowKey::new([1])))
        .cell(CellRecord::new("abcdefghij", "c", RowKey::new([1])))
        .build()
        .unwrap();

    let layout = set.layout(20);
    assert_eq!(layout.len(), 1);
    assert_eq!(layout.pages()[0].widths, vec![6, 7, 7]);
}

#[test]
fn column_order_does_not_change_widths() {
    let build = |order: [&str; 3]| {
        ColumnSet::builder()
            .order(order)
            .cell(CellRecord::new("abcdefghij", "a", RowKey::new([1])))
            .cell(CellRecord::new("abcdefghijklmnopqrst", "b", RowKey::new([1])))
            .cell(CellRecord::new("abcde", "c", RowKey::new([1])))
            .build()
            .unwrap()
    };

    let forward = build(["a", "b", "c"]).layout(24);
    let backward = build(["c", "b", "a"]).layout(24);
    for key in ["a", "b", "c"] {
        assert_eq!(
            forward.pages()[0].width_of(key),
            backward.pages()[0].width_of(key)
        );
    }
    assert_eq!(forward.pages()[0].used, 24);
}

#[test]
fn long_listing_builds_and_lays_out() {
    let rows = 20_000;
    let mut records = Vec::with_capacity(rows * 2);
    for row in 0..rows {
        let key = RowKey::new([row as u32]);
        records.push(
            CellRecord::new(format!("subject {}", row), "id", key.clone())
                .label([format!("Site {}", row / 100)]),
        );
        records.push(CellRecord::new(row * 7, "value", key));
    }

    let set = ColumnSet::builder()
        .id_columns(["id"])
        .cells(records)
        .build()
        .unwrap();
    assert_eq!(set.row_count(), rows);
    assert_eq!(set.groups().len(), rows / 100);
    // "subject 19999" indented one level under its site label.
    assert_eq!(set.column("id").unwrap().max_content_width(), 15);

    let layout = set.layout(60);
    assert_eq!(layout.len(), 1);
    assert!(layout.pages()[0].used <= 60);
}

#[test]
fn unwrappable_columns_split_across_pages() {
    let set = ColumnSet::builder()
        .wrap(false)
        .cell(CellRecord::new("abcdefgh", "a", RowKey::new([1])))
        .cell(CellRecord::new("abcdefgh", "b", RowKey::new([1])))
        .cell(CellRecord::new("abcdefgh", "c", RowKey::new([1])))
        .build()
        .unwrap();

    let layout = set.layout(20);
    let keys: Vec<Vec<String>> = layout.pages().iter().map(|p| p.keys.clone()).collect();
    assert_eq!(keys, vec![vec!["a", "b"], vec!["c"]]);
    for page in layout.pages() {
        for (key, width) in page.keys.iter().zip(&page.widths) {
            assert_eq!(*width, set.column(key).unwrap().max_content_width());
        }
    }
}

#[test]
fn id_columns_repeat_on_every_column_page() {
    let mut builder = ColumnSet::builder()
        .order(["stub", "a", "b", "c"])
        .id_columns(["stub"])
        .wrap(false)
        .spacing(1usize);
    for (row, stub) in ["Mean", "Median"].iter().enumerate() {
        let key = RowKey::new([row as u32]);
        builder = builder.cell(CellRecord::new(*stub, "stub", key.clone()));
        for column in ["a", "b", "c"] {
            builder = builder.cell(CellRecord::new("12345678", column, key.clone()));
        }
    }
    let table = Table::new(
        builder.build().unwrap(),
        Page::new(30, 20).unwrap(),
        TableOptions::new().display_header(false),
    );

    let text = table.render();
    let pages: Vec<&str> = text.split(FORM_FEED).collect();
    assert_eq!(pages.len(), 2);
    for page in &pages {
        assert!(page.contains(" Mean"));
        assert!(page.contains(" Median"));
    }
    assert_eq!(table.layout().pages()[1].keys, vec!["stub", "c"]);
}

#[test]
fn long_reports_break_between_groups() {
    let mut builder = ColumnSet::builder().wrap(false);
    for group in 0..6 {
        for row in 0..3 {
            let key = RowKey::new([group * 10 + row]);
            builder = builder.cell(
                CellRecord::new(format!("row {}", row), "stats", key)
                    .label([format!("Group {}", group)]),
            );
        }
    }
    let table = Table::new(
        builder.build().unwrap(),
        Page::new(30, 14).unwrap(),
        TableOptions::new(),
    );

    let pages = table.render_pages();
    assert_eq!(pages.len(), 3);
    for page in &pages {
        assert!(page.len() <= 14);
        // Every page opens its body with a group label.
        assert!(page[3].starts_with("Group "));
    }
    let text = table.render();
    assert_eq!(text.matches(FORM_FEED).count(), 2);
}

#[test]
fn report_from_files() {
    let mut config = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        config,
        r#"
page:
  linesize: 40
  pagesize: 30
columns:
  order: [stats, placebo, active]
  id_columns: [stats]
  label: [null, "Placebo", "Active"]
  align: {{ placebo: right, active: right }}
  spacing: [0, 2, 2]
table:
  title: "Summary of Age"
  rule_char: "="
"#
    )
    .unwrap();

    let mut cells = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        cells,
        r#"[
  {{"value": "n", "column": "stats", "row": [1, 1], "label": ["Age (years)"]}},
  {{"value": 40, "column": "placebo", "row": [1, 1], "label": ["Age (years)"]}},
  {{"value": 41, "column": "active", "row": [1, 1], "label": ["Age (years)"]}},
  {{"value": "Mean", "column": "stats", "row": [1, 2], "label": ["Age (years)"]}},
  {{"value": 55.2, "column": "placebo", "row": [1, 2], "label": ["Age (years)"]}},
  {{"value": 54.9, "column": "active", "row": [1, 2], "label": ["Age (years)"]}}
]"#
    )
    .unwrap();

    let config = ReportConfig::from_file(config.path()).unwrap();
    let records = load_cells(cells.path()).unwrap();
    let table = Table::from_config(&config, records).unwrap();
    let text = table.render();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0].trim(), "Summary of Age");
    assert_eq!(lines[2], "=".repeat(40));
    assert!(lines.contains(&"Age (years)"));
    assert!(text.contains("55.2"));
    assert!(!text.contains(FORM_FEED));
    for line in &lines {
        assert!(plaintab::display_width(line) <= 40);
    }
}

#[test]
fn unknown_id_column_is_reported() {
    let config = ReportConfig::from_yaml(
        r#"
page: { linesize: 40, pagesize: 30 }
columns:
  id_columns: [missing]
"#,
    )
    .unwrap();
    let err = Table::from_config(&config, Vec::new()).unwrap_err();
    assert_eq!(err.to_string(), "id column 'missing' is not a known column");
}
