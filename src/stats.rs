use anyhow::Result;
use comfy_table::{
    Cell, CellAlignment, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS,
    presets::UTF8_FULL,
};
use std::collections::BTreeMap;

/// Render a name/count mapping as a two-column table. Keys arrive sorted
/// because the index stores them in a BTreeMap.
pub fn counts_table(header: &str, counts: &BTreeMap<String, usize>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new(header), Cell::new("Count")]);
    for (name, count) in counts {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn print_counts(
    header: &str,
    plural: &str,
    counts: &BTreeMap<String, usize>,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(counts)?);
        return Ok(());
    }
    if counts.is_empty() {
        println!("No {} found.", plural);
        return Ok(());
    }
    println!("{}", counts_table(header, counts));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BTreeMap<String, usize> {
        BTreeMap::from([("linux".to_string(), 1), ("rust".to_string(), 3)])
    }

    #[test]
    fn table_lists_keys_alphabetically() {
        let rendered = counts_table("Category", &sample()).to_string();
        let linux = rendered.find("linux").unwrap();
        let rust = rendered.find("rust").unwrap();
        assert!(linux < rust);
        assert!(rendered.contains("Category"));
        assert!(rendered.contains("Count"));
    }

    #[test]
    fn json_output_is_a_plain_object() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"linux":1,"rust":3}"#);
    }
}
