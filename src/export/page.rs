//! Page assembly.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::config::PageDoc;

use super::button::ButtonAssembler;
use super::schema::{GridSize, ResolvedButton, ResolvedPage};

/// Rows on a Companion page.
pub const GRID_ROWS: u32 = 4;
/// Columns on a Companion page.
pub const GRID_COLS: u32 = 8;

/// Grid bounds written into every page.
pub const GRID_SIZE: GridSize = GridSize {
    min_column: 0,
    max_column: GRID_COLS - 1,
    min_row: 0,
    max_row: GRID_ROWS - 1,
};

/// Name used for pages that do not declare one.
pub const UNNAMED_PAGE: &str = "Unnamed";

/// Build one page. Buttons without a valid `[row, col]` position are skipped;
/// the validator reports them before generation gets here.
pub fn build_page(doc: &PageDoc, assembler: &mut ButtonAssembler<'_, '_>) -> ResolvedPage {
    let name = doc
        .page
        .name
        .clone()
        .unwrap_or_else(|| UNNAMED_PAGE.to_string());

    let mut controls: IndexMap<String, IndexMap<String, ResolvedButton>> = IndexMap::new();
    for button in &doc.buttons {
        let Some((row, col)) = button.grid_position() else {
            warn!(page = %name, position = ?button.position, "Skipping button without a valid position");
            continue;
        };
        let built = assembler.build(button);
        controls
            .entry(row.to_string())
            .or_default()
            .insert(col.to_string(), built);
    }

    debug!(page = %name, rows = controls.len(), "Assembled page");
    ResolvedPage {
        name,
        controls,
        grid_size: GRID_SIZE,
    }
}
