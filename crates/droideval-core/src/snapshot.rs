//! UI snapshot helpers: the element-id view of a serialized screen.
//!
//! A snapshot is a small markup string, one element per line, e.g.
//! `<button id=3 text='More options'></button>`. The model references
//! elements by that numeric `id`.

use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;

/// The first `id` attribute inside an opening tag. Text content such as
/// `<p id=1>Device id=42</p>` does not count.
static ELEMENT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<\w[^>]*?\bid\s*=\s*['"]?(\d+)"#).expect("element id pattern should compile")
});

/// All element ids in document order, one per opening tag.
pub fn element_ids(ui: &str) -> Vec<u32> {
    ELEMENT_ID
        .captures_iter(ui)
        .filter_map(|c| c[1].parse().ok())
        .collect()
}

/// Fail unless the snapshot contains at least one addressable element.
pub fn ensure_has_element(ui: &str) -> anyhow::Result<()> {
    anyhow::ensure!(
        !element_ids(ui).is_empty(),
        "UI snapshot has no element with a numeric id: {:?}",
        preview(ui)
    );
    Ok(())
}

/// Number of addressable elements, taken from the id of the first element on
/// the last line plus one.
///
/// Elements are numbered sequentially from 0, so the trailing id is the
/// highest one. Blank trailing lines are ignored.
pub fn total_index(ui: &str) -> anyhow::Result<i64> {
    let last_line = ui
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .context("UI snapshot is empty")?;

    let id = ELEMENT_ID
        .captures(last_line)
        .with_context(|| format!("no element id on last snapshot line: {:?}", last_line.trim()))?;

    let id: i64 = id[1]
        .parse()
        .with_context(|| format!("element id out of range: {:?}", &id[1]))?;
    Ok(id + 1)
}

fn preview(ui: &str) -> &str {
    match ui.char_indices().nth(80) {
        Some((i, _)) => &ui[..i],
        None => ui,
    }
}
