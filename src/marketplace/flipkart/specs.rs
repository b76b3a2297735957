use scraper::{ElementRef, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::marketplace::{first_own_text, selectors};
use crate::reconcile::normalize_text;

/// Longer "keys" on the row layout are prose, not specification names.
const MAX_ROW_KEY_LEN: usize = 50;

static TABLE_ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table tr").unwrap());
static TABLE_KEY: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        "td:first-child span",
        "td:first-child",
        r#"td[class*="col-3"] span"#,
        r#"td[class*="col-3"]"#,
    ])
});
static TABLE_VALUE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        "td:last-child li",
        "td:last-child span",
        "td:last-child",
        r#"td[class*="col-9"] li"#,
        r#"td[class*="col-9"] span"#,
    ])
});

static DIV_ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse(r#"div[class*="row"]"#).unwrap());
static DIV_KEY: LazyLock<Vec<Selector>> =
    LazyLock::new(|| selectors(&[r#"div[class*="col-3"]"#, "div:first-child"]));
static DIV_VALUE: LazyLock<Vec<Selector>> =
    LazyLock::new(|| selectors(&[r#"div[class*="col-9"]"#, "div:last-child"]));

/// Reads the specification table of a product page.
///
/// Pages lay specifications out either as `<table>` rows or as grid rows of
/// `col-3` / `col-9` divs; the table layout wins when it yields anything.
pub fn parse_specs(root: ElementRef) -> HashMap<String, String> {
    let specs = collect(root, &TABLE_ROW, &TABLE_KEY, &TABLE_VALUE, usize::MAX);
    if !specs.is_empty() {
        return specs;
    }
    collect(root, &DIV_ROW, &DIV_KEY, &DIV_VALUE, MAX_ROW_KEY_LEN)
}

fn collect(
    root: ElementRef,
    row: &Selector,
    key: &[Selector],
    value: &[Selector],
    max_key_len: usize,
) -> HashMap<String, String> {
    root.select(row)
        .filter_map(|row| {
            let key = first_own_text(row, key).and_then(|t| normalize_text(Some(&t)))?;
            let value = first_own_text(row, value).and_then(|t| normalize_text(Some(&t)))?;
            (key.chars().count() < max_key_len).then_some((key, value))
        })
        .collect()
}
